use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::io;
use std::path::Path;

#[derive(Parser, Clone)]
#[command(
    name = "svg_to_xaml",
    about = "將 SVG 向量圖檔轉換為 XAML 資源字典",
    long_about = "將資料夾內的 SVG 圖檔轉換為 XAML ResourceDictionary，可輸出單一檔案或每個圖檔一個字典檔（附帶包裝字典），並可選擇產生瀏覽用的 HTML 預覽頁。\n使用 `--help` 查看詳細用法。",
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
    #[arg(long, global = true, default_value = "info", value_parser = ["debug", "info", "warn", "error"])]
    pub log_level: String,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Command {
    /// 以資料夾內的 SVG 圖檔建立 ResourceDictionary
    #[command(name = "build-dictionary", alias = "builddict")]
    BuildDictionary(BuildDictArgs),
}

#[derive(Args, Clone, Debug)]
pub struct BuildDictArgs {
    /// SVG 圖檔所在資料夾
    #[arg(short = 'i', long, alias = "inputdir")]
    pub input_dir: String,
    /// XAML 輸出檔名，未指定副檔名時補上 .xaml
    #[arg(short = 'o', long, alias = "outputname")]
    pub output_name: String,
    /// XAML 輸出資料夾，預設為 SVG 所在資料夾
    #[arg(long, alias = "outputdir")]
    pub output_dir: Option<String>,
    /// 產生瀏覽 SVG 的 HTML 檔
    #[arg(long, alias = "buildhtmlfile", default_value_t = true, action = ArgAction::Set)]
    pub build_html_file: bool,
    /// 所有項目名稱的前綴
    #[arg(long, alias = "nameprefix")]
    pub name_prefix: Option<String>,
    /// 使用 ComponentResourceKey 作為資源鍵
    #[arg(long, alias = "useComponentResKeys", default_value_t = false)]
    pub use_component_res_keys: bool,
    /// 搭配 --use-component-res-keys 使用的命名空間
    #[arg(long, alias = "compResKeyNS")]
    pub comp_res_key_ns: Option<String>,
    /// 搭配 --use-component-res-keys 使用的命名空間前綴名稱
    #[arg(long, alias = "compResKeyNSName")]
    pub comp_res_key_ns_name: Option<String>,
    /// 移除 PixelsPerDip 屬性以相容 .NET 4.6.2 以前版本
    ///
    /// 僅影響含文字（GlyphRun）的輸出；內建轉換器只產生幾何圖形，輸出不變
    #[arg(long, alias = "filterPixelsPerDip", default_value_t = false)]
    pub filter_pixels_per_dip: bool,
    /// 遞迴處理子資料夾
    #[arg(long, alias = "handleSubFolders", default_value_t = false)]
    pub handle_sub_folders: bool,
    /// 每個圖檔輸出一個字典檔，另產生包裝字典
    #[arg(long, alias = "createResourceDictionary", default_value_t = false)]
    pub create_resource_dictionary: bool,
    /// DrawingImage 資源鍵的後綴
    #[arg(long)]
    pub postfix: Option<String>,
    /// 字典模式下項目名稱重複時的處理方式
    #[arg(long, value_enum, default_value = "fail")]
    pub on_duplicate: DuplicatePolicy,
    /// 預覽頁縮圖的寬高（像素）
    #[arg(long, default_value_t = 128)]
    pub thumbnail_size: u32,
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}

#[derive(Clone, Copy, ValueEnum, PartialEq, Eq, Debug)]
pub enum DuplicatePolicy {
    /// 發現重複名稱即中止，不寫入任何項目
    Fail,
    /// 後寫入者覆蓋先前的項目
    Overwrite,
}

pub fn validate_input_path(input: &str) -> io::Result<&Path> {
    let path = Path::new(input);
    if !path.is_dir() {
        log::error!("輸入資料夾不存在：{}", input);
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("輸入資料夾 '{}' 不存在", input)
        ));
    }
    Ok(path)
}

pub fn is_valid_output_name(name: &str) -> bool {
    let invalid_chars = [':', '?', '"', '<', '>', '|', '*'];
    !name.trim().is_empty() && !name.contains(&invalid_chars[..])
}

/// XML 命名空間前綴：字母或底線開頭，其後為字母、數字或底線
pub fn is_valid_namespace_prefix(prefix: &str) -> bool {
    let mut chars = prefix.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

pub fn validate_namespace_prefix(prefix: &str) -> io::Result<()> {
    if !is_valid_namespace_prefix(prefix) {
        log::error!("無效的命名空間前綴: {}", prefix);
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的命名空間前綴: {}", prefix)));
    }
    Ok(())
}

pub fn validate_output_name(name: &str) -> io::Result<()> {
    if !is_valid_output_name(name) {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, format!("無效的輸出檔名: {}", name)));
    }
    Ok(())
}

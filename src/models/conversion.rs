use std::path::PathBuf;

/// 資源鍵命名資訊，原樣傳給轉換器
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResourceKeyInfo {
    pub name: Option<String>,
    /// 輸出檔名（不含副檔名），作為 ComponentResourceKey 的型別名稱
    pub xaml_name: String,
    pub prefix: Option<String>,
    pub use_component_res_keys: bool,
    pub name_space: Option<String>,
    pub name_space_name: Option<String>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct ConvertOptions {
    pub filter_pixels_per_dip: bool,
    pub handle_sub_folders: bool,
    pub no_progress: bool,
}

/// 字典模式下的一個項目：名稱與 XAML 內容
#[derive(Clone, Debug, PartialEq)]
pub struct DictEntry {
    pub name: String,
    pub xaml: String,
}

#[derive(Debug)]
pub enum ConversionResult {
    Single(String),
    Dictionary {
        folder: String,
        entries: Vec<DictEntry>,
        wrapper: String,
    },
}

#[derive(Debug)]
pub struct ConversionOutput {
    pub output_path: PathBuf,
    pub written_files: Vec<PathBuf>,
    pub preview_file: Option<PathBuf>,
}

use std::io;
use crate::config::config::DuplicatePolicy;

pub const DEFAULT_THUMBNAIL_SIZE: u32 = 128;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub input_dir: String,
    pub output_name: String,
    /// 未指定時使用 input_dir
    pub output_dir: Option<String>,
    pub build_html_file: bool,
    pub name_prefix: Option<String>,
    pub use_component_res_keys: bool,
    pub comp_res_key_ns: Option<String>,
    pub comp_res_key_ns_name: Option<String>,
    pub filter_pixels_per_dip: bool,
    pub handle_sub_folders: bool,
    pub create_resource_dictionary: bool,
    pub postfix: Option<String>,
    pub on_duplicate: DuplicatePolicy,
    pub thumbnail_size: u32,
    pub no_progress: bool,
}

impl AppConfig {
    /// 以預設值建立配置：產生 HTML 預覽、單一檔案模式、不遞迴
    pub fn new(input_dir: impl Into<String>, output_name: impl Into<String>) -> Self {
        AppConfig {
            input_dir: input_dir.into(),
            output_name: output_name.into(),
            output_dir: None,
            build_html_file: true,
            name_prefix: None,
            use_component_res_keys: false,
            comp_res_key_ns: None,
            comp_res_key_ns_name: None,
            filter_pixels_per_dip: false,
            handle_sub_folders: false,
            create_resource_dictionary: false,
            postfix: None,
            on_duplicate: DuplicatePolicy::Fail,
            thumbnail_size: DEFAULT_THUMBNAIL_SIZE,
            no_progress: false,
        }
    }
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}

// 轉換執行的 Port，回傳主要輸出檔案路徑
pub trait ConversionPort {
    fn execute(&self, config: AppConfig) -> io::Result<String>;
}

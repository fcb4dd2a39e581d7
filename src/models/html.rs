use std::path::PathBuf;

#[derive(Clone)]
pub struct PreviewGenerateInput {
    pub files: Vec<PathBuf>,
    /// 不含副檔名的輸出路徑，寫入時補上 .html
    pub target_base_path: PathBuf,
    pub thumbnail_size: u32,
}

#[derive(Debug)]
pub struct PreviewGenerateOutput {
    pub html_file_path: PathBuf,
    pub image_count: usize,
}

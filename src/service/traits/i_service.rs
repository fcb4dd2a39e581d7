use std::io;
use std::path::{Path, PathBuf};
use crate::models::conversion::{ConvertOptions, DictEntry, ResourceKeyInfo};
use crate::models::html::{PreviewGenerateInput, PreviewGenerateOutput};

// SVG 轉換服務接口，協調層只透過此接口與轉換器互動
pub trait SvgConverterTrait: Send + Sync {
    /// 列出資料夾中可轉換的 SVG 檔案
    /// # 參數
    /// - dir: 來源資料夾
    /// - recursive: 是否包含子資料夾
    /// # 回傳
    /// - 依路徑排序的檔案清單，失敗時返回 IO 錯誤
    fn list_qualifying_files(&self, dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>>;

    /// 將資料夾內所有 SVG 轉為單一 ResourceDictionary 文字
    fn convert_folder_to_single_document(
        &self,
        dir: &Path,
        key_info: &ResourceKeyInfo,
        options: &ConvertOptions,
    ) -> io::Result<String>;

    /// 將資料夾內每個 SVG 轉為獨立的 ResourceDictionary
    /// # 回傳
    /// - 依來源順序的（項目名稱, XAML）清單，名稱可能重複
    fn convert_folder_to_document_map(
        &self,
        dir: &Path,
        key_info: &ResourceKeyInfo,
        options: &ConvertOptions,
        postfix: Option<&str>,
    ) -> io::Result<Vec<DictEntry>>;

    /// 產生參照所有項目的包裝字典
    fn build_wrapper_document(&self, entries: &[DictEntry], folder: &str) -> String;
}

// 預覽頁服務接口，負責生成 HTML 瀏覽檔
pub trait PreviewServiceTrait: Send + Sync {
    fn generate_preview(&self, input: PreviewGenerateInput) -> io::Result<PreviewGenerateOutput>;
}

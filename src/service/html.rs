use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use log::info;
use crate::models::html::{PreviewGenerateInput, PreviewGenerateOutput};
use crate::service::traits::i_service::PreviewServiceTrait;
use crate::utils::file::write_text_file;
use crate::utils::utils::file_stem_string;
use crate::utils::xaml::{escape_attribute, escape_text};

pub const HTML_EXTENSION: &str = "html";
const PREVIEW_TITLE: &str = "Browse svg images";

/// HTML 預覽服務，列出所有來源圖檔的縮圖並實現 PreviewServiceTrait
pub struct PreviewService;

impl PreviewService {
    pub fn new() -> Self {
        PreviewService
    }
}

impl Default for PreviewService {
    fn default() -> Self {
        PreviewService::new()
    }
}

impl PreviewServiceTrait for PreviewService {
    /// 生成預覽頁並寫入 `<target_base_path>.html`，覆寫既有檔案
    fn generate_preview(&self, input: PreviewGenerateInput) -> io::Result<PreviewGenerateOutput> {
        let html_file_path = preview_file_path(&input.target_base_path);
        let html_content = build_preview_document(&input.files, &input.target_base_path, input.thumbnail_size)?;

        write_text_file(&html_file_path, &html_content)?;
        info!(
            "生成 HTML 預覽：{}，共 {} 張圖片",
            html_file_path.display(),
            input.files.len()
        );

        Ok(PreviewGenerateOutput {
            html_file_path,
            image_count: input.files.len(),
        })
    }
}

/// 在路徑後補上 .html，保留原有的點號
pub fn preview_file_path(target_base_path: &Path) -> PathBuf {
    let mut path: OsString = target_base_path.as_os_str().to_owned();
    path.push(".");
    path.push(HTML_EXTENSION);
    PathBuf::from(path)
}

/// 建立預覽頁內容：標題、說明文字、換行，之後每個檔案一個 img
pub fn build_preview_document(files: &[PathBuf], target_base_path: &Path, size: u32) -> io::Result<String> {
    let mut xml = xmlwriter::XmlWriter::new(xmlwriter::Options::default());
    xml.start_element("html");

    xml.start_element("head");
    xml.start_element("title");
    xml.write_text(PREVIEW_TITLE);
    xml.end_element();
    xml.end_element();

    xml.start_element("body");
    xml.write_text(&escape_text(&format!("Images in file: {}", target_base_path.display())));
    xml.start_element("br");
    xml.end_element();
    for file in files {
        let src = std::path::absolute(file)?;
        xml.start_element("img");
        xml.write_attribute("src", &escape_attribute(&src.display().to_string()));
        xml.write_attribute("title", &escape_attribute(&file_stem_string(file)));
        xml.write_attribute("height", &size);
        xml.write_attribute("width", &size);
        xml.end_element();
    }
    xml.end_element();

    xml.end_element();
    Ok(xml.end_document())
}

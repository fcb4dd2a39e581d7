use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::models::conversion::{ConvertOptions, DictEntry, ResourceKeyInfo};
use crate::models::svg::SvgDrawing;
use crate::service::traits::i_service::SvgConverterTrait;
use crate::utils::file::collect_svg_files;
use crate::utils::svg::load_svg;
use crate::utils::utils::create_progress_bar;
use crate::utils::xaml::{
    build_element_name, drawing_image_key, element_name_from_file, filter_pixels_per_dip,
    resource_key, write_resource_dictionary, write_wrapper_dictionary,
};

/// 內建的 SVG 轉 XAML 轉換器
pub struct SvgConverter;

impl SvgConverter {
    pub fn new() -> Self {
        SvgConverter
    }

    fn load_folder(&self, dir: &Path, options: &ConvertOptions) -> io::Result<Vec<(PathBuf, SvgDrawing)>> {
        let files = self.list_qualifying_files(dir, options.handle_sub_folders)?;
        info!("正在轉換 {} 個 SVG 檔案", files.len());

        let pm = create_progress_bar(files.len() as u64, options.no_progress);
        let mut drawings = Vec::with_capacity(files.len());
        for (index, file) in files.into_iter().enumerate() {
            pm.update(index as u64 + 1, &file);
            let drawing = load_svg(&file)?;
            drawings.push((file, drawing));
        }
        pm.finish(drawings.len() as u64);
        Ok(drawings)
    }
}

impl Default for SvgConverter {
    fn default() -> Self {
        SvgConverter::new()
    }
}

fn image_key(file: &Path, key_info: &ResourceKeyInfo, postfix: Option<&str>) -> String {
    let name = build_element_name(&element_name_from_file(file), key_info.prefix.as_deref());
    resource_key(&drawing_image_key(&name, postfix), key_info)
}

fn finish_document(xaml: String, options: &ConvertOptions) -> String {
    if options.filter_pixels_per_dip {
        filter_pixels_per_dip(&xaml)
    } else {
        xaml
    }
}

impl SvgConverterTrait for SvgConverter {
    fn list_qualifying_files(&self, dir: &Path, recursive: bool) -> io::Result<Vec<PathBuf>> {
        collect_svg_files(dir, recursive)
    }

    fn convert_folder_to_single_document(
        &self,
        dir: &Path,
        key_info: &ResourceKeyInfo,
        options: &ConvertOptions,
    ) -> io::Result<String> {
        let drawings = self.load_folder(dir, options)?;
        let mut images: Vec<(String, SvgDrawing)> = Vec::with_capacity(drawings.len());
        for (file, drawing) in drawings {
            let key = image_key(&file, key_info, None);
            if images.iter().any(|(existing, _)| *existing == key) {
                warn!("資源鍵重複：{}（來源：{}）", key, file.display());
            }
            images.push((key, drawing));
        }
        Ok(finish_document(write_resource_dictionary(&images, key_info), options))
    }

    fn convert_folder_to_document_map(
        &self,
        dir: &Path,
        key_info: &ResourceKeyInfo,
        options: &ConvertOptions,
        postfix: Option<&str>,
    ) -> io::Result<Vec<DictEntry>> {
        let drawings = self.load_folder(dir, options)?;
        Ok(drawings
            .into_iter()
            .map(|(file, drawing)| {
                let key = image_key(&file, key_info, postfix);
                let xaml = write_resource_dictionary(&[(key, drawing)], key_info);
                DictEntry {
                    name: element_name_from_file(&file),
                    xaml: finish_document(xaml, options),
                }
            })
            .collect())
    }

    fn build_wrapper_document(&self, entries: &[DictEntry], folder: &str) -> String {
        write_wrapper_dictionary(entries.iter().map(|e| e.name.as_str()), folder)
    }
}

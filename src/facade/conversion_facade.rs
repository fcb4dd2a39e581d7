use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use log::{info, warn};
use crate::config::config::DuplicatePolicy;
use crate::config::ports::AppConfig;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOutput, ConversionResult, ConvertOptions, DictEntry, ResourceKeyInfo};
use crate::models::html::PreviewGenerateInput;
use crate::service::traits::i_service::{PreviewServiceTrait, SvgConverterTrait};
use crate::utils::file::write_text_file;
use crate::utils::utils::file_stem_string;
use crate::utils::xaml::XAML_EXTENSION;

/// 批次轉換協調者：推導路徑、呼叫轉換器、寫出結果與預覽頁
pub struct ConversionFacade {
    converter: Box<dyn SvgConverterTrait>,
    preview_service: Box<dyn PreviewServiceTrait>,
}

/// 輸出資料夾，未指定時使用輸入資料夾
pub fn resolve_output_dir(config: &AppConfig) -> PathBuf {
    PathBuf::from(config.output_dir.as_deref().unwrap_or(&config.input_dir))
}

/// 單一檔案模式的輸出路徑，檔名沒有副檔名時補上 .xaml
pub fn resolve_output_path(config: &AppConfig) -> PathBuf {
    let path = resolve_output_dir(config).join(&config.output_name);
    if path.extension().is_none() {
        path.with_extension(XAML_EXTENSION)
    } else {
        path
    }
}

/// 字典模式的資料夾名稱：輸出檔名去除副檔名
pub fn dictionary_folder_name(output_name: &str) -> String {
    let path = Path::new(output_name);
    if path.extension().is_some() {
        path.with_extension("").to_string_lossy().into_owned()
    } else {
        output_name.to_string()
    }
}

pub fn resource_key_info(config: &AppConfig) -> ResourceKeyInfo {
    ResourceKeyInfo {
        name: None,
        xaml_name: file_stem_string(Path::new(&config.output_name)),
        prefix: config.name_prefix.clone(),
        use_component_res_keys: config.use_component_res_keys,
        name_space: config.comp_res_key_ns.clone(),
        name_space_name: config.comp_res_key_ns_name.clone(),
    }
}

fn convert_options(config: &AppConfig) -> ConvertOptions {
    ConvertOptions {
        filter_pixels_per_dip: config.filter_pixels_per_dip,
        handle_sub_folders: config.handle_sub_folders,
        no_progress: config.no_progress,
    }
}

/// 檢查項目名稱是否重複，依策略決定中止或僅警告
///
/// 不分大小寫比對，大小寫不敏感的檔案系統上 A.xaml 與 a.xaml 為同一檔案
fn check_duplicate_entries(entries: &[DictEntry], policy: DuplicatePolicy) -> io::Result<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if seen.insert(entry.name.to_ascii_lowercase()) {
            continue;
        }
        match policy {
            DuplicatePolicy::Fail => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("項目名稱重複：{}，未寫入任何檔案（可使用 --on-duplicate overwrite）", entry.name),
                ));
            }
            DuplicatePolicy::Overwrite => {
                warn!("項目名稱重複：{}，後者將覆蓋前者", entry.name);
            }
        }
    }
    Ok(())
}

impl ConversionFacade {
    pub fn new(
        converter: Box<dyn SvgConverterTrait>,
        preview_service: Box<dyn PreviewServiceTrait>,
    ) -> Self {
        ConversionFacade {
            converter,
            preview_service,
        }
    }

    /// 呼叫轉換器取得結果，不寫入磁碟
    pub fn convert(&self, config: &AppConfig) -> io::Result<ConversionResult> {
        let input_dir = Path::new(&config.input_dir);
        let key_info = resource_key_info(config);
        let options = convert_options(config);

        if config.create_resource_dictionary {
            let folder = dictionary_folder_name(&config.output_name);
            let entries = self.converter.convert_folder_to_document_map(
                input_dir,
                &key_info,
                &options,
                config.postfix.as_deref(),
            )?;
            let wrapper = self.converter.build_wrapper_document(&entries, &folder);
            Ok(ConversionResult::Dictionary { folder, entries, wrapper })
        } else {
            let xaml = self.converter.convert_folder_to_single_document(input_dir, &key_info, &options)?;
            Ok(ConversionResult::Single(xaml))
        }
    }

    /// 將轉換結果寫入輸出資料夾，回傳所有寫出的檔案；最後一個為主要輸出檔
    pub fn write_result(&self, config: &AppConfig, result: &ConversionResult) -> io::Result<Vec<PathBuf>> {
        let output_dir = resolve_output_dir(config);
        if !output_dir.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                format!("輸出資料夾不存在：{}", output_dir.display()),
            ));
        }
        match result {
            ConversionResult::Single(xaml) => {
                let path = resolve_output_path(config);
                write_text_file(&path, xaml)?;
                info!("xaml 已寫入：{}", path.display());
                Ok(vec![path])
            }
            ConversionResult::Dictionary { folder, entries, wrapper } => {
                check_duplicate_entries(entries, config.on_duplicate)?;

                let absolute_folder = output_dir.join(folder);
                if !absolute_folder.is_dir() {
                    fs::create_dir_all(&absolute_folder)?;
                    info!("建立字典資料夾：{}", absolute_folder.display());
                }

                let mut written = Vec::with_capacity(entries.len() + 1);
                for entry in entries {
                    let path = absolute_folder.join(format!("{}.{}", entry.name, XAML_EXTENSION));
                    write_text_file(&path, &entry.xaml)?;
                    info!("xaml 已寫入：{}", path.display());
                    written.push(path);
                }

                let wrapper_path = output_dir.join(format!("{}.{}", folder, XAML_EXTENSION));
                write_text_file(&wrapper_path, wrapper)?;
                info!("包裝字典已寫入：{}", wrapper_path.display());
                written.push(wrapper_path);
                Ok(written)
            }
        }
    }

    /// 若啟用預覽，列出來源檔案並生成 HTML
    pub fn maybe_build_preview(&self, config: &AppConfig) -> io::Result<Option<PathBuf>> {
        if !config.build_html_file {
            return Ok(None);
        }

        let files = self
            .converter
            .list_qualifying_files(Path::new(&config.input_dir), config.handle_sub_folders)?;
        let target_base_path = resolve_output_dir(config)
            .join(file_stem_string(Path::new(&config.output_name)));

        let output = self.preview_service.generate_preview(PreviewGenerateInput {
            files,
            target_base_path,
            thumbnail_size: config.thumbnail_size,
        })?;
        Ok(Some(output.html_file_path))
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, config: &AppConfig) -> io::Result<ConversionOutput> {
        let mode = if config.create_resource_dictionary { "字典" } else { "單一檔案" };
        info!(
            "開始{}模式轉換，輸入資料夾：{}，輸出資料夾：{}",
            mode,
            config.input_dir,
            resolve_output_dir(config).display()
        );

        let result = self.convert(config)?;
        let written_files = self.write_result(config, &result)?;
        let output_path = written_files
            .last()
            .cloned()
            .unwrap_or_else(|| resolve_output_path(config));
        let preview_file = self.maybe_build_preview(config)?;

        Ok(ConversionOutput {
            output_path,
            written_files,
            preview_file,
        })
    }
}

use std::io;
use log::info;
use crate::config::ports::{AppConfig, ConversionPort};
use crate::facade::conversion_facade::ConversionFacade;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::service::converter::SvgConverter;
use crate::service::html::PreviewService;

// 轉換適配器，以內建轉換器與預覽服務組裝 Facade
pub struct ConversionAdapter;

impl ConversionPort for ConversionAdapter {
    fn execute(&self, config: AppConfig) -> io::Result<String> {
        let facade = ConversionFacade::new(Box::new(SvgConverter::new()), Box::new(PreviewService::new()));
        let output = facade.execute_conversion(&config)?;

        info!("共寫出 {} 個 XAML 檔案", output.written_files.len());
        if let Some(preview) = &output.preview_file {
            info!("HTML 預覽：{}", preview.display());
        }
        Ok(output.output_path.display().to_string())
    }
}

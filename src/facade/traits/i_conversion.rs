use std::io;
use crate::config::ports::AppConfig;
use crate::models::conversion::ConversionOutput;

// Facade 接口，負責協調 SVG 轉換流程
pub trait ConversionFacadeTrait: Send + Sync {
    /// 執行一次完整轉換：寫出 XAML，必要時寫出 HTML 預覽
    /// # 參數
    /// - config: 轉換所需的配置
    /// # 回傳
    /// - 成功時返回所有寫出的檔案，失敗時返回 IO 錯誤
    fn execute_conversion(&self, config: &AppConfig) -> io::Result<ConversionOutput>;
}

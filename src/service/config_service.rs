use std::io;
use crate::config::ports::{AppConfig, ConfigPort};

// 配置服務，包裝實際提供配置的適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        let config = self.config_port.get_config()?;
        log::debug!("取得配置：{:?}", config);
        Ok(config)
    }
}

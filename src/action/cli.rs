use std::io;
use clap::Parser;
use crate::config::config::{
    validate_input_path, validate_namespace_prefix, validate_output_name, BuildDictArgs, Cli, Command,
};
use crate::config::ports::{AppConfig, ConfigPort, ConversionPort};
use crate::service::config_service::ConfigService;
use crate::utils::convert::ConversionAdapter;
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<String> {
    let cli = Cli::parse_from(args);
    setup_logging(&cli.log_level)?;

    match cli.command {
        Command::BuildDictionary(args) => process_build_dictionary(args),
    }
}

pub fn process_build_dictionary(args: BuildDictArgs) -> io::Result<String> {
    let show_config = args.show_config;
    let config_service = ConfigService::new(Box::new(CliConfigAdapter::new(args)));
    let config = config_service.get_config()?;

    let conversion_port: Box<dyn ConversionPort> = Box::new(ConversionAdapter);
    let output = conversion_port.execute(config.clone())?;

    // 若啟用 --show-config，在轉換後顯示配置
    if show_config {
        println!("實際使用的配置：{:#?}", config);
    }

    Ok(output)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    args: BuildDictArgs,
}

impl CliConfigAdapter {
    pub fn new(args: BuildDictArgs) -> Self {
        CliConfigAdapter { args }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let args = &self.args;
        // 驗證輸入資料夾與輸出檔名
        validate_input_path(&args.input_dir)?;
        validate_output_name(&args.output_name)?;
        if let Some(ns_name) = args.comp_res_key_ns_name.as_deref() {
            validate_namespace_prefix(ns_name)?;
        }

        // 未啟用 ComponentResourceKey 時，命名空間參數不會被使用
        if !args.use_component_res_keys && (args.comp_res_key_ns.is_some() || args.comp_res_key_ns_name.is_some()) {
            log::warn!("未啟用 --use-component-res-keys，忽略命名空間參數：ns={:?}, ns_name={:?}",
                args.comp_res_key_ns, args.comp_res_key_ns_name);
        }
        if args.use_component_res_keys && (args.comp_res_key_ns.is_none() || args.comp_res_key_ns_name.is_none()) {
            log::warn!("啟用 --use-component-res-keys 但未完整提供 --comp-res-key-ns 與 --comp-res-key-ns-name");
        }

        Ok(AppConfig {
            input_dir: args.input_dir.clone(),
            output_name: args.output_name.clone(),
            output_dir: args.output_dir.clone(),
            build_html_file: args.build_html_file,
            name_prefix: args.name_prefix.clone(),
            use_component_res_keys: args.use_component_res_keys,
            comp_res_key_ns: args.comp_res_key_ns.clone(),
            comp_res_key_ns_name: args.comp_res_key_ns_name.clone(),
            filter_pixels_per_dip: args.filter_pixels_per_dip,
            handle_sub_folders: args.handle_sub_folders,
            create_resource_dictionary: args.create_resource_dictionary,
            postfix: args.postfix.clone(),
            on_duplicate: args.on_duplicate,
            thumbnail_size: args.thumbnail_size,
            no_progress: args.no_progress,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse(extra: &[&str]) -> BuildDictArgs {
        let mut argv = vec!["svg_to_xaml", "build-dictionary"];
        argv.extend_from_slice(extra);
        match Cli::parse_from(argv).command {
            Command::BuildDictionary(args) => args,
        }
    }

    #[test]
    fn adapter_maps_every_option() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        let args = parse(&[
            "-i", &input, "-o", "icons.xaml", "--output-dir", "/out", "--build-html-file", "false",
            "--name-prefix", "app", "--use-component-res-keys", "--comp-res-key-ns", "My.App",
            "--comp-res-key-ns-name", "res", "--filter-pixels-per-dip", "--handle-sub-folders",
            "--create-resource-dictionary", "--postfix", "Big", "--on-duplicate", "overwrite",
            "--thumbnail-size", "64", "--no-progress",
        ]);

        let config = CliConfigAdapter::new(args).get_config().unwrap();
        assert_eq!(config.input_dir, input);
        assert_eq!(config.output_name, "icons.xaml");
        assert_eq!(config.output_dir.as_deref(), Some("/out"));
        assert!(!config.build_html_file);
        assert_eq!(config.name_prefix.as_deref(), Some("app"));
        assert!(config.use_component_res_keys);
        assert_eq!(config.comp_res_key_ns.as_deref(), Some("My.App"));
        assert_eq!(config.comp_res_key_ns_name.as_deref(), Some("res"));
        assert!(config.filter_pixels_per_dip);
        assert!(config.handle_sub_folders);
        assert!(config.create_resource_dictionary);
        assert_eq!(config.postfix.as_deref(), Some("Big"));
        assert_eq!(config.on_duplicate, crate::config::config::DuplicatePolicy::Overwrite);
        assert_eq!(config.thumbnail_size, 64);
        assert!(config.no_progress);
    }

    #[test]
    fn adapter_defaults_match_app_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        let config = CliConfigAdapter::new(parse(&["-i", &input, "-o", "icons"])).get_config().unwrap();
        assert_eq!(config, AppConfig::new(input, "icons"));
    }

    #[test]
    fn adapter_rejects_missing_input_dir() {
        let args = parse(&["-i", "/no/such/svgs", "-o", "icons"]);
        let err = CliConfigAdapter::new(args).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn adapter_rejects_malformed_namespace_prefix() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        for bad in ["a b", "1x"] {
            let args = parse(&[
                "-i", &input, "-o", "icons", "--use-component-res-keys",
                "--comp-res-key-ns", "My.App", "--comp-res-key-ns-name", bad,
            ]);
            let err = CliConfigAdapter::new(args).get_config().unwrap_err();
            assert_eq!(err.kind(), io::ErrorKind::InvalidInput, "prefix {bad:?}");
        }
    }

    #[test]
    fn companion_namespace_without_flag_is_accepted() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().to_string_lossy().into_owned();
        let args = parse(&["-i", &input, "-o", "icons", "--comp-res-key-ns", "My.App"]);
        let config = CliConfigAdapter::new(args).get_config().unwrap();
        assert!(!config.use_component_res_keys);
        assert_eq!(config.comp_res_key_ns.as_deref(), Some("My.App"));
    }
}

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context as _;

use crate::config::{Configuration, Environment, EnvironmentPropertySource, TomlPropertySource};
use crate::constants::{BANNER_KEY, DEFAULT_CONFIG_FILE, DEFAULT_ENV_PREFIX};
use crate::context::ApplicationContext;
use crate::logging::LoggingConfig;

/// LHSpring 应用程序
///
/// 提供便捷的应用启动方式
pub struct LhSpringApplication {
    /// 应用名称
    name: String,

    /// 配置文件路径
    config_files: Vec<String>,

    /// 环境变量前缀
    env_prefix: String,

    /// 是否显示 banner
    show_banner: bool,

    /// 日志配置
    logging_config: Option<LoggingConfig>,
}

impl LhSpringApplication {
    /// 创建新的应用
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            config_files: vec![DEFAULT_CONFIG_FILE.to_string()],
            env_prefix: DEFAULT_ENV_PREFIX.to_string(),
            show_banner: true,
            logging_config: None,
        }
    }

    /// 设置配置文件路径
    pub fn config_file(mut self, path: impl Into<String>) -> Self {
        self.config_files = vec![path.into()];
        self
    }

    /// 添加多个配置文件，后面的优先级更高
    pub fn config_files(mut self, paths: Vec<String>) -> Self {
        self.config_files = paths;
        self
    }

    /// 设置环境变量前缀
    pub fn env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = prefix.into();
        self
    }

    /// 设置是否显示 banner
    pub fn banner(mut self, show: bool) -> Self {
        self.show_banner = show;
        self
    }

    /// 设置日志配置
    ///
    /// 如果不设置，将使用默认配置（从环境变量读取）
    pub fn logging(mut self, config: LoggingConfig) -> Self {
        self.logging_config = Some(config);
        self
    }

    /// 使用给定的配置运行应用
    pub fn run_with<C>(self, configuration: &C) -> anyhow::Result<Arc<ApplicationContext>>
    where
        C: Configuration + ?Sized,
    {
        self.init_logging();
        let start_time = Instant::now();

        if self.show_banner {
            self.print_banner();
        }

        tracing::info!("Starting {} application", self.name);

        let context = ApplicationContext::new(configuration)
            .with_context(|| format!("Failed to start application '{}'", self.name))?;

        tracing::info!(
            "Started {} in {}ms",
            self.name,
            start_time.elapsed().as_millis()
        );

        Ok(Arc::new(context))
    }

    /// 运行应用，扫描路径从配置文件和环境变量读取
    ///
    /// 键为 `component-scan.base-packages`，环境变量形式如 `APP_COMPONENT_SCAN_BASE_PACKAGES`
    pub fn run(self) -> anyhow::Result<Arc<ApplicationContext>> {
        let environment = self.load_environment()?;
        self.apply_environment(&environment).run_with(&environment)
    }

    /// 用配置覆盖代码中的设置
    fn apply_environment(mut self, environment: &Environment) -> Self {
        if let Some(show) = environment.get_bool(BANNER_KEY) {
            self.show_banner = show;
        }
        self
    }

    /// 加载配置源
    ///
    /// 配置文件按声明顺序优先级递增，环境变量优先级最高
    fn load_environment(&self) -> anyhow::Result<Environment> {
        let environment = Environment::new();

        for (index, config_file) in self.config_files.iter().enumerate() {
            if !Path::new(config_file).exists() {
                tracing::debug!("Configuration file not found: {}", config_file);
                continue;
            }
            let source = TomlPropertySource::from_file(config_file)?;
            tracing::info!("Loaded configuration from: {}", config_file);
            environment.add_property_source(Box::new(source.with_priority(index as i32)));
        }

        environment.add_property_source(Box::new(EnvironmentPropertySource::new(&self.env_prefix)));
        tracing::debug!("Environment variable prefix: {}", self.env_prefix);

        Ok(environment)
    }

    fn init_logging(&self) {
        let logging_config = self
            .logging_config
            .clone()
            .unwrap_or_else(LoggingConfig::from_env);
        // 已有全局订阅者（例如测试中）时沿用现有的
        if let Err(e) = logging_config.init() {
            tracing::debug!("{}", e);
        }
    }

    fn print_banner(&self) {
        println!();
        println!(r"  _     _   _ ____             _             ");
        println!(r" | |   | | | / ___| _ __  _ __(_)_ __   __ _ ");
        println!(r" | |   | |_| \___ \| '_ \| '__| | '_ \ / _` |");
        println!(r" | |___|  _  |___) | |_) | |  | | | | | (_| |");
        println!(r" |_____|_| |_|____/| .__/|_|  |_|_| |_|\__, |");
        println!(r"                   |_|                 |___/ ");
        println!();
        println!("  :: LHSpring ::        (v{})", env!("CARGO_PKG_VERSION"));
        println!();
    }
}

impl Default for LhSpringApplication {
    fn default() -> Self {
        Self::new("LhSpringApplication")
    }
}

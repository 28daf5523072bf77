pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use clap::Parser;
use std::time::Duration;
use toml_config::TomlConfig;

pub const DEFAULT_URL_PREFIX: &str = "https://www.volby.cz/pls/ps2017nss/ps3";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("volby-scrape/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_DELIMITER: char = ',';

#[derive(Debug, Clone, Parser)]
#[command(name = "volby-scrape", version)]
#[command(about = "Export 2017 Chamber of Deputies election results of one district to CSV")]
pub struct CliConfig {
    /// District page on volby.cz, e.g. https://www.volby.cz/pls/ps2017nss/ps32?xjazyk=CZ&xkraj=2&xnumnuts=2101
    pub district_url: String,

    /// Output CSV file
    pub output_path: String,

    /// Path to TOML settings file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Allowed prefix of the district URL
    #[arg(long)]
    pub url_prefix: Option<String>,

    /// Per-request timeout
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long)]
    pub user_agent: Option<String>,

    /// CSV delimiter: ',', ';' or a tab
    #[arg(long)]
    pub delimiter: Option<char>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per stage")]
    pub monitor: bool,
}

impl CliConfig {
    /// 建立只含兩個必要參數的配置，其餘使用預設值
    pub fn new(district_url: impl Into<String>, output_path: impl Into<String>) -> Self {
        Self {
            district_url: district_url.into(),
            output_path: output_path.into(),
            config: None,
            url_prefix: None,
            timeout_seconds: None,
            user_agent: None,
            delimiter: None,
            verbose: false,
            monitor: false,
        }
    }

    /// 載入 `--config` 指定的設定檔，命令列參數優先
    pub fn merge_settings_file(&mut self) -> Result<()> {
        let Some(path) = self.config.clone() else {
            return Ok(());
        };

        tracing::debug!("Loading settings from {}", path);
        let settings = TomlConfig::from_file(&path)?;
        self.apply(&settings);
        Ok(())
    }

    pub fn apply(&mut self, settings: &TomlConfig) {
        if let Some(source) = &settings.source {
            if self.url_prefix.is_none() {
                self.url_prefix = source.url_prefix.clone();
            }
            if self.timeout_seconds.is_none() {
                self.timeout_seconds = source.timeout_seconds;
            }
            if self.user_agent.is_none() {
                self.user_agent = source.user_agent.clone();
            }
        }
        if let Some(load) = &settings.load {
            if self.delimiter.is_none() {
                self.delimiter = load.delimiter;
            }
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url_prefix("district_url", &self.district_url, self.url_prefix())?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_file_extension("output_path", &self.output_path, &["csv"])?;
        validation::validate_positive_number("timeout_seconds", self.timeout().as_secs(), 1)?;
        validation::validate_non_empty_string("user_agent", self.user_agent())?;
        validation::validate_delimiter("delimiter", self.delimiter.unwrap_or(DEFAULT_DELIMITER))?;
        Ok(())
    }
}

impl ConfigProvider for CliConfig {
    fn district_url(&self) -> &str {
        &self.district_url
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn url_prefix(&self) -> &str {
        self.url_prefix.as_deref().unwrap_or(DEFAULT_URL_PREFIX)
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn user_agent(&self) -> &str {
        self.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT)
    }

    fn delimiter(&self) -> u8 {
        validation::validate_delimiter("delimiter", self.delimiter.unwrap_or(DEFAULT_DELIMITER))
            .unwrap_or(b',')
    }
}

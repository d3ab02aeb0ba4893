use std::env;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000/";
// 环境变量优先于配置文件
pub const BASE_URL_ENV: &str = "QUIZ_BASE_URL";

#[derive(Deserialize, Default)]
struct ConfigFile {
    base_url: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    /// 为None时不设置超时
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            base_url: Url::parse(DEFAULT_BASE_URL).expect("default base url is valid"),
            timeout: None,
        }
    }
}

impl Config {
    pub fn from_toml_str(contents: &str) -> Result<Config, ConfigError> {
        let file: ConfigFile = toml::from_str(contents)?;
        Config::from_file_values(file)
    }

    fn from_file_values(file: ConfigFile) -> Result<Config, ConfigError> {
        let base_url = match file.base_url {
            Some(url) => Url::parse(&url)?,
            None => Config::default().base_url,
        };
        Ok(Config {
            base_url,
            timeout: file.timeout_secs.map(Duration::from_secs),
        })
    }

    /// 读取配置文件，文件不存在时使用默认值
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let mut config = if path.exists() {
            Config::from_toml_str(&std::fs::read_to_string(path)?)?
        } else {
            log::warn!("配置文件{}不存在，使用默认配置", path.display());
            Config::default()
        };
        if let Ok(url) = env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = Url::parse(url.trim())?;
            }
        }
        log::info!("服务器地址: {}", config.base_url);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_all_fields() {
        let config = Config::from_toml_str(
            r#"
            base_url = "https://quiz.example.com/app/"
            timeout_secs = 15
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url.as_str(), "https://quiz.example.com/app/");
        assert_eq!(config.timeout, Some(Duration::from_secs(15)));
    }

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.base_url.as_str(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn bad_values_are_errors() {
        assert!(matches!(Config::from_toml_str("base_url = 3"), Err(ConfigError::Toml(_))));
        assert!(matches!(
            Config::from_toml_str("base_url = \"not a url\""),
            Err(ConfigError::BaseUrl(_))
        ));
    }

    #[test]
    fn missing_file_falls_back() {
        let config = Config::load("/nonexistent/quiz-client.toml").unwrap();
        assert_eq!(config.timeout, None);
    }
}

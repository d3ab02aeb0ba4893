use reqwest::StatusCode;
use thiserror::Error;

/// 客户端所有可能出现的错误
#[derive(Debug, Error)]
pub enum ClientError {
    /// 输入格式不正确，未发出任何请求
    #[error("{0}")]
    Validation(String),

    /// 服务器返回了 `ok: false` 以及错误信息
    #[error("{0}")]
    ServerRejected(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("malformed response: {0}")]
    Parse(String),

    /// 非2xx且没有附带错误信息
    #[error("server responded with status {0}")]
    HttpStatus(StatusCode),

    /// 当前状态下不能执行该操作，不会发出请求
    #[error("{0}")]
    InvalidState(String),

    /// 后台控制器已经退出
    #[error("controller is no longer running")]
    Closed,
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Parse(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("invalid base_url: {0}")]
    BaseUrl(#[from] url::ParseError),
}

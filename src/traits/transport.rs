use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;

use crate::error::ClientError;

/// 未经解析的HTTP响应
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

/// 发送一次HTTP请求，只负责传输，不理解响应内容
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<RawResponse, ClientError>;
}

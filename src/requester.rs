use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::error::ClientError;
use crate::traits::transport::{RawResponse, Transport};

/// 基于reqwest的传输层
pub struct HttpTransport {
    client: Client,
    base_url: Url,
}

impl HttpTransport {
    pub fn new(mut base_url: Url, timeout: Option<Duration>) -> Result<HttpTransport, ClientError> {
        // 保证join时不会丢掉base_url中的路径
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(HttpTransport {
            client: builder.build()?,
            base_url,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::Parse(format!("invalid request path {path}: {e}")))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<RawResponse, ClientError> {
        let url = self.url(path)?;
        let mut request = self.client.request(method, url);
        // json()会同时设置Content-Type: application/json
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        Ok(RawResponse { status, body })
    }
}

/// 发送JSON请求并把响应解析为对应的类型
#[derive(Clone)]
pub struct JsonRequester {
    transport: Arc<dyn Transport>,
}

impl JsonRequester {
    pub fn new(transport: Arc<dyn Transport>) -> JsonRequester {
        JsonRequester { transport }
    }

    pub fn http(base_url: Url, timeout: Option<Duration>) -> Result<JsonRequester, ClientError> {
        Ok(JsonRequester::new(Arc::new(HttpTransport::new(base_url, timeout)?)))
    }

    /// GET/POST/DELETE共用的请求函数
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<T, ClientError> {
        log::debug!("{} {}", method, path);
        let response = match self.transport.send(method.clone(), path, body).await {
            Ok(response) => response,
            Err(e) => {
                log::error!("{} {} 请求失败: {}", method, path, e);
                return Err(e);
            }
        };
        decode(response).map_err(|e| {
            log::warn!("{} {} 响应异常: {}", method, path, e);
            e
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.request(Method::GET, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, path, Some(serde_json::to_value(body)?)).await
    }

    pub async fn delete<B, T>(&self, path: &str, body: &B) -> Result<T, ClientError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::DELETE, path, Some(serde_json::to_value(body)?)).await
    }
}

// 从响应体中取出服务器给出的错误信息
fn server_error(value: &Value) -> Option<String> {
    value.get("error").and_then(Value::as_str).map(str::to_string)
}

fn decode<T: DeserializeOwned>(response: RawResponse) -> Result<T, ClientError> {
    let text = response.body.trim();
    // 空响应体视为null
    let value = if text.is_empty() {
        Ok(Value::Null)
    } else {
        serde_json::from_str::<Value>(text)
    };

    if !response.status.is_success() {
        return Err(match value.as_ref().ok().and_then(server_error) {
            Some(message) => ClientError::ServerRejected(message),
            None => ClientError::HttpStatus(response.status),
        });
    }

    let value = value?;
    if value.get("ok") == Some(&Value::Bool(false)) {
        let message = server_error(&value).unwrap_or_else(|| "request rejected by server".to_string());
        return Err(ClientError::ServerRejected(message));
    }

    Ok(serde_json::from_value(value)?)
}

//! REST 客户端封装
//!
//! 无状态：不持有任何会话，需要认证的调用方显式传入 bearer 令牌。
//! 不重试，不设置超时。

use crate::request::{HttpClient, HttpMethod, HttpRequest, TransportError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fmt;
use travella_shared::{CONTENT_TYPE_JSON, HEADER_AUTHORIZATION, HEADER_CONTENT_TYPE, HEADER_LANG};

/// API 错误类型
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// 没有收到响应
    Network(TransportError),
    /// 收到了非 2xx 响应；错误体不解析
    Status { status: u16 },
    /// 2xx 响应但响应体无法解析
    Decode(String),
    /// 请求体序列化失败
    Encode(String),
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Status { status } => Some(*status),
            _ => None,
        }
    }

    /// 401/403：令牌无效或已过期
    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401) | Some(403))
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "network error: {}", e.0),
            ApiError::Status { status } => write!(f, "HTTP error! status: {}", status),
            ApiError::Decode(msg) => write!(f, "response decode error: {}", msg),
            ApiError::Encode(msg) => write!(f, "request encode error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Network(e)
    }
}

/// 单次请求的选项
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn new(method: HttpMethod) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get() -> Self {
        Self::new(HttpMethod::Get)
    }

    pub fn post() -> Self {
        Self::new(HttpMethod::Post)
    }

    pub fn put() -> Self {
        Self::new(HttpMethod::Put)
    }

    pub fn delete() -> Self {
        Self::new(HttpMethod::Delete)
    }

    pub fn header(mut self, key: &str, value: &str) -> Self {
        self.headers.push((key.to_string(), value.to_string()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header(HEADER_AUTHORIZATION, &format!("Bearer {}", token))
    }

    pub fn lang(self, lang: Option<&str>) -> Self {
        match lang {
            Some(lang) if !lang.is_empty() => self.header(HEADER_LANG, lang),
            _ => self,
        }
    }

    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let encoded = serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.body = Some(encoded);
        Ok(self)
    }
}

/// 针对配置的基础 URL 发起请求
#[derive(Clone)]
pub struct ApiClient<C> {
    base_url: String,
    transport: C,
}

impl<C: HttpClient> ApiClient<C> {
    pub fn new(base_url: impl Into<String>, transport: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn transport(&self) -> &C {
        &self.transport
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 构造最终请求：先放默认 Content-Type，再由调用方请求头覆盖
    pub fn build(&self, endpoint: &str, options: RequestOptions) -> HttpRequest {
        let mut req = HttpRequest::new(&self.url(endpoint), options.method)
            .with_header(HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON);
        for (key, value) in &options.headers {
            req.set_header(key, value);
        }
        req.body = options.body;
        req
    }

    /// 发送请求并解析 JSON 响应体
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let method = options.method;
        let req = self.build(endpoint, options);

        let resp = self.transport.send(req).await.map_err(|e| {
            log::warn!("API request failed: {} {}: {}", method.as_str(), endpoint, e);
            ApiError::Network(e)
        })?;

        if !resp.is_success() {
            log::warn!(
                "API request failed: {} {} -> HTTP {}",
                method.as_str(),
                endpoint,
                resp.status
            );
            return Err(ApiError::Status {
                status: resp.status,
            });
        }

        log::debug!("{} {} -> HTTP {}", method.as_str(), endpoint, resp.status);
        resp.json::<T>().map_err(|e| ApiError::Decode(e.to_string()))
    }
}

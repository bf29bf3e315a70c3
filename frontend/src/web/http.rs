//! 浏览器 HTTP 传输
//!
//! 基于 `gloo-net` 的 fetch 封装，实现核心 crate 的 `HttpClient` 端口。

use gloo_net::http::{Request, RequestBuilder};
use travella::{HttpClient, HttpRequest, HttpResponse, TransportError};
use travella_shared::HttpMethod;

/// fetch 传输，无状态
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserHttpClient;

impl BrowserHttpClient {
    fn builder(req: &HttpRequest) -> RequestBuilder {
        let builder = match req.method {
            HttpMethod::Get => Request::get(&req.url),
            HttpMethod::Post => Request::post(&req.url),
            HttpMethod::Put => Request::put(&req.url),
            HttpMethod::Delete => Request::delete(&req.url),
        };
        req.headers
            .iter()
            .fold(builder, |b, (key, value)| b.header(key, value))
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClient for BrowserHttpClient {
    async fn send(&self, req: HttpRequest) -> Result<HttpResponse, TransportError> {
        let builder = Self::builder(&req);
        let request = match req.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError(format!("请求构建失败: {}", e)))?;

        let response = request
            .send()
            .await
            .map_err(|e| TransportError(format!("网络错误: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError(format!("响应读取失败: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}

use crate::client::error::ApiError;
use reqwest::{blocking, Url};
use std::time::Duration;

/// API 요청의 기본 타임아웃 시간(초)
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

/// 전송 계층에서 돌려받은 응답. 상태 코드의 해석은 [`crate::Client`]가 담당한다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self { status: 200, body: body.into() }
    }
}

/// GET 요청 한 번을 실행하는 전송 계층
pub trait Transport {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError>;
}

/// reqwest blocking 클라이언트를 사용하는 기본 전송 계층
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ApiError> {
        Self::with_timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECONDS))
    }

    pub fn with_timeout(timeout: Duration) -> Result<Self, ApiError> {
        let client = blocking::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::RequestFailed(format!("cannot build http client: {}", e)))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
        let response = self.client.get(url.clone())
            .send()
            .map_err(|e| ApiError::RequestFailed(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text()
            .map_err(|e| ApiError::ResponseTextExtractionFailed(e.to_string()))?;

        Ok(HttpResponse { status, body })
    }
}

impl<T: Transport + ?Sized> Transport for &T {
    fn get(&self, url: &Url) -> Result<HttpResponse, ApiError> {
        (**self).get(url)
    }
}

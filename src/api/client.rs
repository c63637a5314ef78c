//! HTTP client for the recognition service

use super::types::{
    ApiError, ApiResult, RecognizeRequest, RecognizeResponse, TextToSignRequest,
    TextToSignResponse,
};
use crate::config::ApiConfig;
use async_trait::async_trait;
use std::time::Duration;

/// Remote operations the client depends on
#[async_trait]
pub trait SignApi: Send + Sync {
    /// Submit one encoded frame for gesture recognition
    async fn recognize_gesture(&self, frame: &str) -> ApiResult<RecognizeResponse>;

    /// Map text to an ordered list of sign clips
    async fn text_to_sign(&self, text: &str) -> ApiResult<TextToSignResponse>;
}

/// [`SignApi`] over HTTP/JSON
pub struct HttpSignApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpSignApi {
    /// Create a client for the given base URL, e.g. `http://localhost:5000/api`
    pub fn new(base_url: &str, timeout: Duration) -> ApiResult<Self> {
        let base_url = base_url.trim_end_matches('/').to_string();
        reqwest::Url::parse(&base_url)
            .map_err(|e| ApiError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;

        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, base_url })
    }

    /// Create a client from configuration
    pub fn from_config(config: &ApiConfig) -> ApiResult<Self> {
        Self::new(&config.base_url, Duration::from_millis(config.timeout_ms))
    }

    /// Base URL requests are sent to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }
}

#[async_trait]
impl SignApi for HttpSignApi {
    async fn recognize_gesture(&self, frame: &str) -> ApiResult<RecognizeResponse> {
        let response = self
            .client
            .post(self.endpoint("recognize-gesture"))
            .json(&RecognizeRequest {
                frame: frame.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn text_to_sign(&self, text: &str) -> ApiResult<TextToSignResponse> {
        tracing::debug!("Requesting sign sequence for {:?}", text);

        let response = self
            .client
            .post(self.endpoint("text-to-sign"))
            .json(&TextToSignRequest {
                text: text.to_string(),
            })
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

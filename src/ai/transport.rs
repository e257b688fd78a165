use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::ai::request::GenerateContentRequest;
use crate::ai::response::GenerateContentResponse;
use crate::config::Config;
use crate::error::{AppError, Result};

pub const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Sends a single `generateContent` call. No retries.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

#[async_trait]
impl Transport for Box<dyn Transport> {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        (**self).generate_content(model, request).await
    }
}

pub struct GeminiTransport {
    client: Client,
    api_key: String,
    base_url: Url,
}

impl GeminiTransport {
    pub fn new(api_key: &str, base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let api_key = api_key.trim();
        if api_key.is_empty() {
            return Err(AppError::MissingApiKey);
        }

        // Url::join drops the last segment unless the base ends with '/'
        let mut base = base_url.trim_end_matches('/').to_string();
        base.push('/');
        let base_url =
            Url::parse(&base).map_err(|e| AppError::Config(format!("Invalid API base URL: {}", e)))?;

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        let api_key = config.gemini_api_key.as_deref().ok_or(AppError::MissingApiKey)?;
        Self::new(
            api_key,
            &config.api_base_url,
            config.request_timeout_secs.map(Duration::from_secs),
        )
    }

    pub fn endpoint(&self, model: &str) -> Result<Url> {
        self.base_url
            .join(&format!("models/{}:generateContent", model))
            .map_err(|e| AppError::Config(format!("Invalid model name {}: {}", model, e)))
    }
}

#[async_trait]
impl Transport for GeminiTransport {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let endpoint = self.endpoint(model)?;
        tracing::debug!("POST {}", endpoint);

        let response = self
            .client
            .post(endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await?;
            return Err(AppError::GeminiApi(format!("{}: {}", status, error_text)));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};

    #[test]
    fn blank_key_is_fatal() {
        assert!(matches!(
            GeminiTransport::new("  ", GEMINI_API_URL, None),
            Err(AppError::MissingApiKey)
        ));
    }

    #[test]
    fn missing_key_in_config_is_fatal() {
        let config = Config {
            gemini_api_key: None,
            ..Config::default()
        };
        assert!(matches!(
            GeminiTransport::from_config(&config),
            Err(AppError::MissingApiKey)
        ));
    }

    #[test]
    fn endpoint_keeps_version_segment() {
        let transport = GeminiTransport::new("k", GEMINI_API_URL, None).unwrap();
        assert_eq!(
            transport.endpoint("gemini-2.5-flash").unwrap().as_str(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn posts_request_with_api_key_header() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-2.5-flash:generateContent")
            .match_header("x-goog-api-key", "test-key")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "tools": [{ "googleSearch": {} }]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"candidates":[{"content":{"parts":[{"text":"{\"author\":\"jane\"}"}]}}]}"#)
            .create_async()
            .await;

        let base = format!("{}/v1beta", server.url());
        let transport = GeminiTransport::new("test-key", &base, None).unwrap();
        let request = GenerateContentRequest::post_info("https://www.instagram.com/p/ABC123/");

        let response = transport
            .generate_content("gemini-2.5-flash", &request)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(response.text().unwrap(), r#"{"author":"jane"}"#);
    }

    #[tokio::test]
    async fn non_success_status_is_api_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", Matcher::Any)
            .with_status(403)
            .with_body("API key not valid")
            .create_async()
            .await;

        let transport = GeminiTransport::new("bad", &server.url(), None).unwrap();
        let request = GenerateContentRequest::post_info("https://www.instagram.com/p/x/");
        let err = transport
            .generate_content("gemini-2.5-flash", &request)
            .await
            .unwrap_err();

        match err {
            AppError::GeminiApi(msg) => assert!(msg.contains("API key not valid")),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}

use crate::ai::request::GenerateContentRequest;
use crate::ai::response::parse_json;
use crate::ai::transport::Transport;
use crate::error::Result;
use crate::models::{AnalysisResult, MediaFile, PostMetadata};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Runs the two analysis flows against a [`Transport`].
///
/// The link lookup never fails: any error degrades to
/// [`PostMetadata::fallback`]. Media analysis returns its errors to the caller.
pub struct Analyzer<T> {
    transport: T,
    model: String,
}

impl<T: Transport> Analyzer<T> {
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
        }
    }

    pub async fn try_extract_post_info(&self, url: &str) -> Result<PostMetadata> {
        let request = GenerateContentRequest::post_info(url);
        let response = self.transport.generate_content(&self.model, &request).await?;
        parse_json(&response.text()?)
    }

    pub async fn extract_post_info(&self, url: &str) -> PostMetadata {
        match self.try_extract_post_info(url).await {
            Ok(post) => post,
            Err(e) => {
                tracing::warn!("Gemini search failed for {}: {}", url, e);
                PostMetadata::fallback()
            }
        }
    }

    pub async fn analyze_media(&self, media: &MediaFile) -> Result<AnalysisResult> {
        let request = GenerateContentRequest::media_analysis(media);
        let response = self.transport.generate_content(&self.model, &request).await?;
        let result = parse_json(&response.text()?)?;
        tracing::info!("Analyzed {} ({})", media.name, media.mime_type);
        Ok(result)
    }
}

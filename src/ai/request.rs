use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use serde_json::{json, Value};

use crate::models::MediaFile;

pub const MEDIA_ANALYSIS_PROMPT: &str = r#"Analyze this social media content.
Provide:
1. A short engaging summary.
2. The sentiment (Positive, Neutral, Negative).
3. 5 viral hashtags relevant to this content.
4. 3 creative ideas for a caption or follow-up content."#;

pub fn post_info_prompt(url: &str) -> String {
    format!(
        "I have an Instagram URL: {url}.
Please use Google Search to find details about this specific post.
I need:
1. The caption text (or a summary of it).
2. The author's username.
3. A description of the visual content if mentioned in search snippets.
4. Any hashtags used.

Return the data in a clean JSON format."
    )
}

pub fn post_metadata_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "caption": { "type": "STRING" },
            "author": { "type": "STRING" },
            "description": { "type": "STRING" },
            "hashtags": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": { "type": "STRING" },
            "sentiment": { "type": "STRING", "enum": ["Positive", "Neutral", "Negative"] },
            "suggestedHashtags": { "type": "ARRAY", "items": { "type": "STRING" } },
            "contentIdeas": { "type": "ARRAY", "items": { "type": "STRING" } }
        }
    })
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub response_mime_type: String,
    pub response_schema: Value,
}

impl GenerationConfig {
    fn json(schema: Value) -> Self {
        Self {
            response_mime_type: "application/json".to_string(),
            response_schema: schema,
        }
    }
}

impl GenerateContentRequest {
    /// Search-grounded lookup of a public post.
    pub fn post_info(url: &str) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part::Text {
                    text: post_info_prompt(url),
                }],
            }],
            tools: vec![Tool {
                google_search: GoogleSearch {},
            }],
            generation_config: GenerationConfig::json(post_metadata_schema()),
        }
    }

    /// Inline media followed by the analysis instruction.
    pub fn media_analysis(media: &MediaFile) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineData {
                            mime_type: media.mime_type.clone(),
                            data: STANDARD.encode(&media.data),
                        },
                    },
                    Part::Text {
                        text: MEDIA_ANALYSIS_PROMPT.to_string(),
                    },
                ],
            }],
            tools: Vec::new(),
            generation_config: GenerationConfig::json(analysis_schema()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_info_request_enables_search_and_schema() {
        let request = GenerateContentRequest::post_info("https://www.instagram.com/p/ABC123/");
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["tools"][0]["googleSearch"], json!({}));
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["hashtags"]["type"],
            "ARRAY"
        );
        assert!(body["generationConfig"]["responseSchema"].get("required").is_none());

        let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(text.contains("https://www.instagram.com/p/ABC123/"));
        assert!(text.contains("Google Search"));
    }

    #[test]
    fn media_request_inlines_base64_before_prompt() {
        let media = MediaFile::new("a.png", "image/png", b"hello".to_vec());
        let body = serde_json::to_value(GenerateContentRequest::media_analysis(&media)).unwrap();

        assert!(body.get("tools").is_none());
        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inlineData"]["mimeType"], "image/png");
        assert_eq!(parts[0]["inlineData"]["data"], "aGVsbG8=");
        assert_eq!(parts[1]["text"], MEDIA_ANALYSIS_PROMPT);
        assert_eq!(
            body["generationConfig"]["responseSchema"]["properties"]["sentiment"]["enum"],
            json!(["Positive", "Neutral", "Negative"])
        );
    }
}

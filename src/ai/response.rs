use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Build a response carrying a single text part.
    #[cfg(test)]
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            candidates: vec![Candidate {
                content: Some(CandidateContent {
                    parts: vec![ResponsePart {
                        text: Some(text.into()),
                    }],
                }),
                finish_reason: Some("STOP".to_string()),
            }],
            prompt_feedback: None,
        }
    }

    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Result<String> {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(AppError::Blocked(reason));
        }

        let candidate = self.candidates.first().ok_or(AppError::EmptyResponse)?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(AppError::Blocked("SAFETY".to_string()));
        }

        let text = candidate
            .content
            .iter()
            .flat_map(|c| c.parts.iter())
            .filter_map(|p| p.text.as_deref())
            .collect::<Vec<_>>()
            .join("");

        if text.trim().is_empty() {
            return Err(AppError::EmptyResponse);
        }

        Ok(text)
    }
}

fn fence_regex() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("valid fence regex")
    })
}

/// Parse model text as JSON, unwrapping a markdown code fence if the text
/// is not JSON on its own.
///
/// Search-grounded calls often ignore the JSON mime type and fence the payload.
pub fn parse_json<T: DeserializeOwned>(text: &str) -> Result<T> {
    let trimmed = text.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(e) => {
            let fenced = fence_regex()
                .captures(trimmed)
                .and_then(|c| c.get(1))
                .map(|m| m.as_str());
            match fenced {
                Some(body) => Ok(serde_json::from_str(body)?),
                None => Err(e.into()),
            }
        }
    }
}

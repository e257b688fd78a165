use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    #[cfg(test)]
    pub const ALL: [Sentiment; 3] = [Sentiment::Positive, Sentiment::Neutral, Sentiment::Negative];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Model output for an uploaded image or video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub summary: String,
    pub sentiment: Sentiment,
    pub suggested_hashtags: Vec<String>,
    pub content_ideas: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_camel_case_result() {
        let result: AnalysisResult = serde_json::from_str(
            r##"{"summary":"Beach day","sentiment":"Positive","suggestedHashtags":["#beach"],"contentIdeas":["Golden hour reel"]}"##,
        )
        .unwrap();

        assert_eq!(result.sentiment, Sentiment::Positive);
        assert_eq!(result.suggested_hashtags, vec!["#beach"]);
        assert_eq!(result.content_ideas.len(), 1);
    }

    #[test]
    fn rejects_sentiment_outside_enum() {
        let parsed = serde_json::from_str::<AnalysisResult>(
            r#"{"summary":"x","sentiment":"Ecstatic","suggestedHashtags":[],"contentIdeas":[]}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn sentiment_is_case_sensitive() {
        assert!(serde_json::from_str::<Sentiment>(r#""positive""#).is_err());
        for sentiment in Sentiment::ALL {
            let json = format!("\"{sentiment}\"");
            assert_eq!(serde_json::from_str::<Sentiment>(&json).unwrap(), sentiment);
        }
    }
}

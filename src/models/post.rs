use serde::{Deserialize, Serialize};

pub const UNKNOWN_AUTHOR: &str = "Unknown";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const FALLBACK_DESCRIPTION: &str =
    "Could not retrieve live data. The post might be private or very new.";
pub const PLACEHOLDER_THUMBNAIL: &str = "https://picsum.photos/800/800";

/// Public metadata about an Instagram post, as found by the search-grounded model.
///
/// Every field is optional: the model returns whatever it could find.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caption: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hashtags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_url: Option<String>,
}

impl PostMetadata {
    /// Placeholder record returned when the lookup fails for any reason.
    pub fn fallback() -> Self {
        Self {
            description: Some(FALLBACK_DESCRIPTION.to_string()),
            author: Some(UNKNOWN_AUTHOR.to_string()),
            ..Self::default()
        }
    }

    pub fn author_display(&self) -> &str {
        non_empty(&self.author).unwrap_or(UNKNOWN_AUTHOR)
    }

    pub fn description_display(&self) -> &str {
        non_empty(&self.description).unwrap_or(NO_DESCRIPTION)
    }

    pub fn caption_display(&self) -> Option<&str> {
        non_empty(&self.caption)
    }

    pub fn thumbnail_or_placeholder(&self) -> &str {
        non_empty(&self.thumbnail_url).unwrap_or(PLACEHOLDER_THUMBNAIL)
    }

    /// Hashtags with a leading `#`, in the order the model returned them.
    pub fn display_hashtags(&self) -> Vec<String> {
        self.hashtags
            .as_deref()
            .unwrap_or_default()
            .iter()
            .map(|tag| as_hashtag(tag))
            .collect()
    }
}

pub fn as_hashtag(tag: &str) -> String {
    if tag.starts_with('#') {
        tag.to_string()
    } else {
        format!("#{tag}")
    }
}

// An empty string renders the same as a missing field.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_render_placeholders() {
        let post = PostMetadata::default();
        assert_eq!(post.author_display(), "Unknown");
        assert_eq!(post.description_display(), "No description available.");
        assert_eq!(post.caption_display(), None);
        assert_eq!(post.thumbnail_or_placeholder(), PLACEHOLDER_THUMBNAIL);
        assert!(post.display_hashtags().is_empty());
    }

    #[test]
    fn fields_pass_through_from_json() {
        let post: PostMetadata = serde_json::from_str(
            r##"{"author":"jane","description":"A sunset photo","hashtags":["travel","#sun"],"thumbnailUrl":"https://cdn.example/t.jpg"}"##,
        )
        .unwrap();

        assert_eq!(post.author.as_deref(), Some("jane"));
        assert_eq!(post.description_display(), "A sunset photo");
        assert_eq!(post.display_hashtags(), vec!["#travel", "#sun"]);
        assert_eq!(post.thumbnail_or_placeholder(), "https://cdn.example/t.jpg");
        assert!(post.caption.is_none());
    }

    #[test]
    fn fallback_only_sets_author_and_description() {
        let post = PostMetadata::fallback();
        assert_eq!(post.author.as_deref(), Some("Unknown"));
        assert_eq!(post.description.as_deref(), Some(FALLBACK_DESCRIPTION));
        assert!(post.caption.is_none());
        assert!(post.hashtags.is_none());
    }

    #[test]
    fn empty_author_is_unknown() {
        let post = PostMetadata {
            author: Some(String::new()),
            ..PostMetadata::default()
        };
        assert_eq!(post.author_display(), "Unknown");
    }
}

use crate::error::{AppError, Result};

pub const INSTAGRAM_MARKER: &str = "instagram.com/";
pub const INVALID_URL_MESSAGE: &str = "Please enter a valid Instagram URL";

/// Checks a pasted link locally, before any request is made.
pub fn validate_post_url(input: &str) -> Result<&str> {
    let url = input.trim();
    if url.contains(INSTAGRAM_MARKER) {
        Ok(url)
    } else {
        Err(AppError::InvalidUrl(INVALID_URL_MESSAGE.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_post_links() {
        assert_eq!(
            validate_post_url("  https://www.instagram.com/p/ABC123/ \n").unwrap(),
            "https://www.instagram.com/p/ABC123/"
        );
        assert!(validate_post_url("instagram.com/reel/xyz").is_ok());
    }

    #[test]
    fn rejects_other_links_with_message() {
        for input in ["", "https://example.com/p/1", "https://instagram.com"] {
            let err = validate_post_url(input).unwrap_err();
            assert_eq!(err.to_string(), "Please enter a valid Instagram URL");
        }
    }
}

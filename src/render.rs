//! Plain-text rendering of analysis records, shared by the TUI and headless output.

use crate::models::{as_hashtag, AnalysisResult, PostMetadata};

pub fn post_lines(post: &PostMetadata, width: usize) -> Vec<String> {
    let mut lines = vec![
        format!("Author: @{}", post.author_display()),
        String::new(),
        "AI Summary:".to_string(),
    ];
    lines.extend(wrap(post.description_display(), width));

    if let Some(caption) = post.caption_display() {
        lines.push(String::new());
        lines.push("Original Caption:".to_string());
        lines.extend(wrap(caption, width));
    }

    let tags = post.display_hashtags();
    if !tags.is_empty() {
        lines.push(String::new());
        lines.extend(wrap(&tags.join(" "), width));
    }

    lines
}

pub fn analysis_lines(result: &AnalysisResult, width: usize) -> Vec<String> {
    let mut lines = vec!["Vibe Check:".to_string()];
    lines.extend(wrap(&result.summary, width));
    lines.push(String::new());
    lines.push(format!("Sentiment: {}", result.sentiment));

    if !result.suggested_hashtags.is_empty() {
        lines.push(String::new());
        lines.push("Viral Hashtags:".to_string());
        let tags: Vec<String> = result
            .suggested_hashtags
            .iter()
            .map(|t| as_hashtag(t))
            .collect();
        lines.extend(wrap(&tags.join(" "), width));
    }

    if !result.content_ideas.is_empty() {
        lines.push(String::new());
        lines.push("Caption Ideas:".to_string());
        for (i, idea) in result.content_ideas.iter().enumerate() {
            let options = textwrap::Options::new(width.max(8))
                .initial_indent("")
                .subsequent_indent("   ");
            let numbered = format!("{}. {}", i + 1, idea);
            lines.extend(textwrap::wrap(&numbered, options).into_iter().map(|l| l.into_owned()));
        }
    }

    lines
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    textwrap::wrap(text, width.max(8))
        .into_iter()
        .map(|l| l.into_owned())
        .collect()
}

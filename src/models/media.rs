use std::path::Path;

use crate::error::{AppError, Result};

/// A local image or video loaded for inline analysis.
#[derive(Debug, Clone)]
pub struct MediaFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl MediaFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Read a file from disk, inferring its media type from the extension.
    pub async fn load(path: &Path) -> Result<Self> {
        let mime_type = mime_type_for(path)
            .ok_or_else(|| AppError::UnsupportedMedia(path.display().to_string()))?;

        let data = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.display().to_string());

        tracing::debug!("Loaded {} ({} bytes, {})", name, data.len(), mime_type);

        Ok(Self::new(name, mime_type, data))
    }

    /// Name and size line for a supported file on disk, without reading it.
    pub fn peek(path: &Path) -> Option<(String, String)> {
        let mime_type = mime_type_for(path)?;
        let metadata = std::fs::metadata(path).ok().filter(|m| m.is_file())?;
        let name = path.file_name()?.to_string_lossy().to_string();
        Some((name, describe_size(metadata.len(), mime_type)))
    }

    pub fn describe(&self) -> String {
        describe_size(self.data.len() as u64, &self.mime_type)
    }
}

fn describe_size(bytes: u64, mime_type: &str) -> String {
    format!("{:.2} MB • {}", bytes as f64 / 1024.0 / 1024.0, mime_type)
}

/// Media types the picker accepts: any common image, MP4 and QuickTime video.
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "heif" => "image/heif",
        "mp4" => "video/mp4",
        "mov" => "video/quicktime",
        _ => return None,
    };
    Some(mime)
}

mod analysis;
mod media;
mod post;
mod status;

pub use analysis::{AnalysisResult, Sentiment};
pub use media::MediaFile;
pub use post::{as_hashtag, PostMetadata};
pub use status::{AnalysisStatus, AppMode};

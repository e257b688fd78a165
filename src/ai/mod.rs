mod analyzer;
pub mod request;
pub mod response;
mod transport;

pub use analyzer::{Analyzer, DEFAULT_MODEL};
pub use transport::{GeminiTransport, Transport, GEMINI_API_URL};

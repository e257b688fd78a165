use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::ai::{Analyzer, GeminiTransport, Transport};
use crate::config::Config;
use crate::error::Result;
use crate::models::{AnalysisResult, AnalysisStatus, AppMode, MediaFile, PostMetadata};
use crate::tui::AppAction;
use crate::validation::validate_post_url;

pub const MEDIA_FAILURE_ALERT: &str = "Failed to analyze media. Please try a smaller file or image.";

pub type SharedAnalyzer = Arc<Analyzer<Box<dyn Transport>>>;

// Message for a completed request
pub enum AnalysisMessage {
    Post {
        request_id: u64,
        url: String,
        post: PostMetadata,
    },
    Media {
        request_id: u64,
        media: Option<(String, String)>, // (name, description) once the file was read
        result: std::result::Result<AnalysisResult, String>,
    },
}

pub struct App {
    pub mode: AppMode,
    pub show_help: bool,
    pub wrap_width: usize,

    // Link Inspector
    pub url_input: String,
    pub url_error: Option<String>,
    pub post: Option<PostMetadata>,
    pub post_url: Option<String>,
    pub post_status: AnalysisStatus,

    // Content AI
    pub media_input: String,
    pub media_label: Option<(String, String)>,
    pub analysis: Option<AnalysisResult>,
    pub media_status: AnalysisStatus,
    pub alert: Option<String>,

    // Async state
    next_request_id: u64,
    pending_post: Option<u64>,
    pending_media: Option<u64>,
    result_rx: mpsc::Receiver<AnalysisMessage>,
    result_tx: mpsc::Sender<AnalysisMessage>,

    analyzer: Option<SharedAnalyzer>,
}

impl App {
    pub fn new(config: &Config) -> Result<Self> {
        let analyzer = if config.has_api_key() {
            let transport: Box<dyn Transport> = Box::new(GeminiTransport::from_config(config)?);
            Some(Arc::new(Analyzer::new(transport, config.model.clone())))
        } else {
            tracing::warn!("No Gemini API key configured");
            None
        };

        Ok(Self::with_analyzer(analyzer, config.wrap_width))
    }

    pub fn with_analyzer(analyzer: Option<SharedAnalyzer>, wrap_width: usize) -> Self {
        let (result_tx, result_rx) = mpsc::channel(4);
        let status = if analyzer.is_some() {
            AnalysisStatus::Idle
        } else {
            AnalysisStatus::NoApiKey
        };

        Self {
            mode: AppMode::default(),
            show_help: false,
            wrap_width,
            url_input: String::new(),
            url_error: None,
            post: None,
            post_url: None,
            post_status: status,
            media_input: String::new(),
            media_label: None,
            analysis: None,
            media_status: status,
            alert: None,
            next_request_id: 0,
            pending_post: None,
            pending_media: None,
            result_rx,
            result_tx,
            analyzer,
        }
    }

    fn active_input(&mut self) -> &mut String {
        match self.mode {
            AppMode::LinkInspector => &mut self.url_input,
            AppMode::ContentAi => &mut self.media_input,
        }
    }

    pub fn handle_action(&mut self, action: AppAction) -> bool {
        match action {
            AppAction::Quit => return true,
            AppAction::SwitchMode => self.mode = self.mode.toggle(),
            AppAction::ShowHelp => self.show_help = true,
            AppAction::HideHelp => self.show_help = false,
            AppAction::DismissAlert => self.alert = None,
            AppAction::InputChar(c) => self.edit_input(|input| input.push(c)),
            AppAction::InputBackspace => self.edit_input(|input| {
                input.pop();
            }),
            AppAction::ClearInput => self.edit_input(String::clear),
            AppAction::Submit => match self.mode {
                AppMode::LinkInspector => self.submit_url(),
                AppMode::ContentAi => self.submit_media(),
            },
            AppAction::OpenPost => {
                if let Some(url) = &self.post_url {
                    if let Err(e) = open::that(url) {
                        tracing::warn!("Failed to open {}: {}", url, e);
                    }
                }
            }
        }

        false
    }

    fn edit_input(&mut self, edit: impl FnOnce(&mut String)) {
        edit(self.active_input());
        if self.mode == AppMode::ContentAi {
            self.refresh_media_label();
        }
    }

    /// Show the chosen file as soon as the path points at one.
    fn refresh_media_label(&mut self) {
        let label = MediaFile::peek(Path::new(self.media_input.trim()));
        if label == self.media_label {
            return;
        }
        self.media_label = label;

        // A different file clears the previous result
        if self.pending_media.is_none() {
            self.analysis = None;
            if matches!(self.media_status, AnalysisStatus::Ready | AnalysisStatus::Failed) {
                self.media_status = AnalysisStatus::Idle;
            }
        }
    }

    fn next_id(&mut self) -> u64 {
        self.next_request_id += 1;
        self.next_request_id
    }

    pub fn submit_url(&mut self) {
        let url = match validate_post_url(&self.url_input) {
            Ok(url) => url.to_string(),
            Err(e) => {
                self.url_error = Some(e.to_string());
                return;
            }
        };
        self.url_error = None;

        let Some(analyzer) = &self.analyzer else {
            self.post_status = AnalysisStatus::NoApiKey;
            return;
        };

        let analyzer = Arc::clone(analyzer);
        let request_id = self.next_id();
        let tx = self.result_tx.clone();
        self.pending_post = Some(request_id);
        self.post_status = AnalysisStatus::Analyzing;

        tokio::spawn(async move {
            let post = analyzer.extract_post_info(&url).await;
            let _ = tx
                .send(AnalysisMessage::Post {
                    request_id,
                    url,
                    post,
                })
                .await;
        });
    }

    pub fn submit_media(&mut self) {
        let input = self.media_input.trim();
        if input.is_empty() {
            return;
        }
        let path = PathBuf::from(input);

        let Some(analyzer) = &self.analyzer else {
            self.media_status = AnalysisStatus::NoApiKey;
            return;
        };

        let analyzer = Arc::clone(analyzer);
        let request_id = self.next_id();
        let tx = self.result_tx.clone();
        self.pending_media = Some(request_id);
        self.media_status = AnalysisStatus::Analyzing;
        self.analysis = None;

        tokio::spawn(async move {
            let (media, result) = match MediaFile::load(&path).await {
                Ok(file) => {
                    let label = (file.name.clone(), file.describe());
                    let result = analyzer.analyze_media(&file).await;
                    (Some(label), result)
                }
                Err(e) => (None, Err(e)),
            };

            let _ = tx
                .send(AnalysisMessage::Media {
                    request_id,
                    media,
                    result: result.map_err(|e| e.to_string()),
                })
                .await;
        });
    }

    /// Poll for completed requests (non-blocking)
    pub fn poll_results(&mut self) {
        while let Ok(message) = self.result_rx.try_recv() {
            self.apply(message);
        }
    }

    fn apply(&mut self, message: AnalysisMessage) {
        match message {
            AnalysisMessage::Post {
                request_id,
                url,
                post,
            } => {
                // Superseded by a newer request
                if self.pending_post != Some(request_id) {
                    tracing::debug!("Dropping stale post result {}", request_id);
                    return;
                }
                self.post = Some(post);
                self.post_url = Some(url);
                self.post_status = AnalysisStatus::Ready;
                self.pending_post = None;
            }
            AnalysisMessage::Media {
                request_id,
                media,
                result,
            } => {
                if self.pending_media != Some(request_id) {
                    tracing::debug!("Dropping stale media result {}", request_id);
                    return;
                }
                self.media_label = media;
                match result {
                    Ok(analysis) => {
                        self.analysis = Some(analysis);
                        self.media_status = AnalysisStatus::Ready;
                    }
                    Err(e) => {
                        tracing::error!("Failed to analyze media: {}", e);
                        self.analysis = None;
                        self.media_status = AnalysisStatus::Failed;
                        self.alert = Some(MEDIA_FAILURE_ALERT.to_string());
                    }
                }
                self.pending_media = None;
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        match self.mode {
            AppMode::LinkInspector => self.pending_post.is_some(),
            AppMode::ContentAi => self.pending_media.is_some(),
        }
    }
}

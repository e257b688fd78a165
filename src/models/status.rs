#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Analyzing,
    Ready,
    Failed,
    NoApiKey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    #[default]
    LinkInspector,
    ContentAi,
}

impl AppMode {
    pub fn toggle(&self) -> Self {
        match self {
            AppMode::LinkInspector => AppMode::ContentAi,
            AppMode::ContentAi => AppMode::LinkInspector,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AppMode::LinkInspector => "Link Inspector",
            AppMode::ContentAi => "Content AI",
        }
    }
}

use thiserror::Error;

/// Failures that can surface while generating suggestions.
#[derive(Debug, Error)]
pub enum SuggestError {
    /// No API key has been saved yet
    #[error("API key not set. Please configure your API key in the settings.")]
    Configuration,

    /// The endpoint answered with a non-2xx status
    #[error("API error: {status}")]
    Transport { status: u16 },

    /// The endpoint answered but not with a chat completion
    #[error("Unexpected response format from API: {0}")]
    Format(String),

    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to render prompt: {0}")]
    Template(#[from] handlebars::RenderError),

    #[error("Settings storage failed: {0}")]
    Storage(#[from] anyhow::Error),

    /// The host chat input has not been found yet
    #[error("Chat input is not ready")]
    HostNotReady,
}

impl SuggestError {
    /// Status code of a transport failure, if that's what this is.
    pub fn status(&self) -> Option<u16> {
        match self {
            SuggestError::Transport { status } => Some(*status),
            _ => None,
        }
    }
}

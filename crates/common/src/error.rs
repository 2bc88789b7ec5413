//! Error types shared across Placard crates.

use std::path::PathBuf;

/// Top-level error type for Placard operations.
#[derive(Debug, thiserror::Error)]
pub enum PlacardError {
    #[error("Failed to fetch talk data: {message}")]
    DataFetch { message: String },

    #[error("Talk {code} has no speaker")]
    MissingSpeaker { code: String },

    #[error("Speaker {speaker} has no profile photo")]
    MissingPhoto { speaker: String },

    #[error("Failed to download photo from {url}: {message}")]
    PhotoFetch { url: String, message: String },

    #[error("Failed to decode photo from {url}: {message}")]
    PhotoDecode { url: String, message: String },

    #[error("Template error at {}: {message}", path.display())]
    Template { path: PathBuf, message: String },

    #[error("Font error: {message}")]
    Font { message: String },

    #[error("Render error: {message}")]
    Render { message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("File not found: {}", path.display())]
    FileNotFound { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result type alias using PlacardError.
pub type PlacardResult<T> = Result<T, PlacardError>;

impl PlacardError {
    pub fn data_fetch(msg: impl Into<String>) -> Self {
        Self::DataFetch {
            message: msg.into(),
        }
    }

    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font {
            message: msg.into(),
        }
    }

    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render {
            message: msg.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn photo_decode(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::PhotoDecode {
            url: url.into(),
            message: msg.into(),
        }
    }

    pub fn photo_fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::PhotoFetch {
            url: url.into(),
            message: msg.into(),
        }
    }

    /// Whether this error only affects the current talk.
    ///
    /// Skippable errors are logged and the batch moves on to the next talk;
    /// everything else aborts the run.
    pub fn is_skippable(&self) -> bool {
        matches!(
            self,
            Self::MissingSpeaker { .. }
                | Self::MissingPhoto { .. }
                | Self::PhotoFetch { .. }
                | Self::PhotoDecode { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_talk_errors_are_skippable() {
        assert!(PlacardError::MissingSpeaker {
            code: "ABC123".into()
        }
        .is_skippable());
        assert!(PlacardError::MissingPhoto {
            speaker: "Ada".into()
        }
        .is_skippable());
        assert!(PlacardError::photo_decode("https://x/a.png", "bad magic").is_skippable());
        assert!(PlacardError::photo_fetch("https://x/a.png", "timeout").is_skippable());
    }

    #[test]
    fn test_run_level_errors_are_fatal() {
        assert!(!PlacardError::data_fetch("HTTP 500").is_skippable());
        assert!(!PlacardError::config("no templates").is_skippable());
        assert!(!PlacardError::Io(std::io::Error::other("disk full")).is_skippable());
    }

    #[test]
    fn test_decode_error_names_the_url() {
        let err = PlacardError::photo_decode("https://cdn.example/ada.jpg", "unsupported");
        assert!(err.to_string().contains("https://cdn.example/ada.jpg"));
    }
}

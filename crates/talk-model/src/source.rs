//! Seams between the renderer and the outside world.

use std::path::{Path, PathBuf};

use placard_common::error::{PlacardError, PlacardResult};

use crate::talk::Talk;

/// Something that can list the talks of an event.
pub trait TalkSource {
    /// Fetch every talk to render. Failure here aborts the run.
    fn talks(&mut self) -> PlacardResult<Vec<Talk>>;

    /// Source name for logs.
    fn name(&self) -> &str;
}

/// Something that can download speaker photos.
pub trait PhotoSource {
    /// Raw, still-encoded image bytes behind `url`.
    fn fetch_photo(&mut self, url: &str) -> PlacardResult<Vec<u8>>;
}

/// Talks read from a JSON array on disk, as written by [`save_talks`].
#[derive(Debug, Clone)]
pub struct JsonTalkSource {
    path: PathBuf,
}

impl JsonTalkSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TalkSource for JsonTalkSource {
    fn talks(&mut self) -> PlacardResult<Vec<Talk>> {
        if !self.path.exists() {
            return Err(PlacardError::FileNotFound {
                path: self.path.clone(),
            });
        }
        let content = std::fs::read_to_string(&self.path)?;
        let talks: Vec<Talk> = serde_json::from_str(&content).map_err(|e| {
            PlacardError::data_fetch(format!("Invalid talks file {}: {e}", self.path.display()))
        })?;
        tracing::info!(path = %self.path.display(), count = talks.len(), "Loaded talks file");
        Ok(talks)
    }

    fn name(&self) -> &str {
        "talks-file"
    }
}

/// Write talks as pretty JSON so a later run can use [`JsonTalkSource`].
pub fn save_talks(talks: &[Talk], path: &Path) -> PlacardResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, serde_json::to_string_pretty(talks)?)?;
    Ok(())
}

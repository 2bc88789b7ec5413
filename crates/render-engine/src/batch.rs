//! Batch runner: renders every talk of an event, one after another.
//!
//! Per-talk failures (no speaker, no photo, a photo that cannot be
//! downloaded or decoded) are logged and the talk is skipped. Anything else
//! stops the run.

use std::path::PathBuf;

use placard_common::config::EventInfo;
use placard_common::error::{PlacardError, PlacardResult};
use placard_talk_model::{PhotoSource, Talk};

use crate::announcement::{AnnouncementBuilder, ANNOUNCEMENTS_FILE};
use crate::export::PlacardRenderer;

/// Progress callback for batch rendering.
pub type ProgressCallback = Box<dyn Fn(BatchProgress)>;

/// Progress report for one talk.
#[derive(Debug, Clone)]
pub struct BatchProgress {
    /// Zero-based position of the talk in the batch.
    pub index: usize,

    /// Number of talks in the batch.
    pub total: usize,

    pub speaker_name: String,

    pub stage: TalkStage,
}

/// Where a talk is in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TalkStage {
    Working,
    Rendered { files: usize },
    Skipped { reason: String },
}

/// A talk that produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTalk {
    pub code: String,
    pub speaker_name: String,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchSummary {
    /// Talks with every variant written.
    pub rendered: usize,

    pub skipped: Vec<SkippedTalk>,

    /// Every placard written, in render order.
    pub files: Vec<PathBuf>,

    /// Location of the post drafts.
    pub announcements: Option<PathBuf>,
}

impl BatchSummary {
    pub fn total(&self) -> usize {
        self.rendered + self.skipped.len()
    }
}

fn render_one(
    talk: &Talk,
    photos: &mut dyn PhotoSource,
    renderer: &PlacardRenderer,
) -> PlacardResult<Vec<PathBuf>> {
    if talk.speaker_name.trim().is_empty() {
        return Err(PlacardError::MissingSpeaker {
            code: talk.code.clone(),
        });
    }

    let url = talk
        .photo_url
        .as_deref()
        .ok_or_else(|| PlacardError::MissingPhoto {
            speaker: talk.speaker_name.clone(),
        })?;

    let bytes = photos.fetch_photo(url)?;
    renderer.render_talk(talk, &bytes)
}

/// Render every talk and write the post drafts.
///
/// Only talks that were rendered get a post draft. The drafts file is
/// written once at the end, after the last talk.
pub fn run_batch(
    talks: &[Talk],
    photos: &mut dyn PhotoSource,
    renderer: &PlacardRenderer,
    event: &EventInfo,
    progress: Option<ProgressCallback>,
) -> PlacardResult<BatchSummary> {
    let total = talks.len();
    let mut summary = BatchSummary::default();
    let mut announcements = AnnouncementBuilder::new(event);

    tracing::info!(
        talks = total,
        templates = renderer.templates().len(),
        output = %renderer.output_dir().display(),
        "Starting batch"
    );

    let report = |index: usize, talk: &Talk, stage: TalkStage| {
        if let Some(cb) = &progress {
            cb(BatchProgress {
                index,
                total,
                speaker_name: talk.speaker_name.clone(),
                stage,
            });
        }
    };

    for (index, talk) in talks.iter().enumerate() {
        report(index, talk, TalkStage::Working);

        match render_one(talk, photos, renderer) {
            Ok(files) => {
                tracing::info!(
                    code = %talk.code,
                    speaker = %talk.speaker_name,
                    files = files.len(),
                    "Rendered talk"
                );
                report(index, talk, TalkStage::Rendered { files: files.len() });
                announcements.push(talk);
                summary.rendered += 1;
                summary.files.extend(files);
            }
            Err(e) if e.is_skippable() => {
                tracing::warn!(
                    code = %talk.code,
                    speaker = %talk.speaker_name,
                    "Skipping talk: {e}"
                );
                report(
                    index,
                    talk,
                    TalkStage::Skipped {
                        reason: e.to_string(),
                    },
                );
                summary.skipped.push(SkippedTalk {
                    code: talk.code.clone(),
                    speaker_name: talk.speaker_name.clone(),
                    reason: e.to_string(),
                });
            }
            Err(e) => {
                tracing::error!(code = %talk.code, "Aborting batch: {e}");
                return Err(e);
            }
        }
    }

    std::fs::create_dir_all(renderer.output_dir())?;
    let path = renderer.output_dir().join(ANNOUNCEMENTS_FILE);
    announcements.write_to(&path)?;
    summary.announcements = Some(path);

    tracing::info!(
        rendered = summary.rendered,
        skipped = summary.skipped.len(),
        "Batch complete"
    );
    Ok(summary)
}

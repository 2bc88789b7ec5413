//! pretalx REST API wire types and their conversion into [`Talk`]s.
//!
//! Only the fields the renderer needs are modelled; everything else in the
//! API responses is ignored.

use std::collections::BTreeSet;

use chrono::DateTime;
use placard_common::error::{PlacardError, PlacardResult};
use serde::{Deserialize, Serialize};

use crate::talk::Talk;

/// Placeholder schedule string for talks without a slot.
pub const UNSCHEDULED: &str = "TBA";

/// One page of a paginated list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub count: Option<u64>,

    /// Absolute URL of the next page, if any.
    #[serde(default)]
    pub next: Option<String>,

    pub results: Vec<T>,
}

/// A submission from `/events/{event}/submissions/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Submission {
    pub code: String,
    pub title: String,

    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub speakers: Vec<SubmissionSpeaker>,

    #[serde(default)]
    pub slot: Option<Slot>,
}

/// Speaker summary embedded in a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmissionSpeaker {
    pub code: String,
    pub name: String,

    #[serde(default)]
    pub avatar: Option<String>,
}

/// Scheduled slot of a submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    /// ISO 8601 start time with offset.
    #[serde(default)]
    pub start: Option<String>,
}

/// A speaker profile from `/events/{event}/speakers/{code}/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeakerProfile {
    pub code: String,

    #[serde(default)]
    pub answers: Vec<Answer>,
}

/// A questionnaire answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Answer {
    pub question: QuestionRef,

    #[serde(default)]
    pub answer: String,
}

/// Answers reference their question either inline or by id, depending on
/// the API version and expansion flags.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuestionRef {
    Id(u64),
    Object { id: u64 },
}

impl QuestionRef {
    pub fn id(self) -> u64 {
        match self {
            Self::Id(id) | Self::Object { id } => id,
        }
    }
}

impl Submission {
    /// Schedule string for this submission's slot.
    pub fn display_time(&self, tz_label: &str) -> String {
        self.slot
            .as_ref()
            .and_then(|slot| slot.start.as_deref())
            .and_then(|start| format_slot_start(start, tz_label))
            .unwrap_or_else(|| UNSCHEDULED.to_string())
    }
}

/// Format an ISO 8601 slot start as `"Feb 5, 2022\n1:30PM PST"`.
///
/// The time is shown in the offset it was published with; `tz_label` is
/// printed verbatim after it.
pub fn format_slot_start(start: &str, tz_label: &str) -> Option<String> {
    let parsed = DateTime::parse_from_rfc3339(start).ok()?;
    let formatted = parsed.format("%b %-d, %Y\n%-I:%M%p").to_string();
    if tz_label.is_empty() {
        Some(formatted)
    } else {
        Some(format!("{formatted} {tz_label}"))
    }
}

/// Extract the social handle from a speaker's answers.
///
/// Surrounding whitespace and `@` signs are stripped; blank answers count as
/// no handle.
pub fn social_handle_from_answers(answers: &[Answer], question_id: u64) -> Option<String> {
    answers
        .iter()
        .find(|a| a.question.id() == question_id)
        .map(|a| a.answer.trim().trim_matches('@').trim().to_string())
        .filter(|handle| !handle.is_empty())
}

/// Drop submissions whose code is excluded (announcements, panels, breaks).
pub fn retain_talks(submissions: Vec<Submission>, exclude: &BTreeSet<String>) -> Vec<Submission> {
    submissions
        .into_iter()
        .filter(|s| !exclude.contains(&s.code))
        .collect()
}

/// Expand a submission into one [`Talk`] per speaker.
///
/// `handle_for` resolves a speaker's social handle; it is only called for
/// speakers of submissions that have at least one speaker.
pub fn expand_submission<F>(
    submission: &Submission,
    tz_label: &str,
    mut handle_for: F,
) -> PlacardResult<Vec<Talk>>
where
    F: FnMut(&SubmissionSpeaker) -> Option<String>,
{
    if submission.speakers.is_empty() {
        return Err(PlacardError::MissingSpeaker {
            code: submission.code.clone(),
        });
    }

    let time = submission.display_time(tz_label);

    Ok(submission
        .speakers
        .iter()
        .map(|speaker| Talk {
            code: submission.code.clone(),
            title: submission.title.clone(),
            speaker_name: speaker.name.clone(),
            time: time.clone(),
            photo_url: speaker
                .avatar
                .as_ref()
                .map(|url| url.trim().to_string())
                .filter(|url| !url.is_empty()),
            social_handle: handle_for(speaker),
        })
        .collect())
}

//! The talk record consumed by the renderer.

use serde::{Deserialize, Serialize};

/// One talk as seen by a single speaker.
///
/// Submissions with several speakers are expanded into one `Talk` per
/// speaker, so every placard features exactly one person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Talk {
    /// Short unique submission code (e.g. `ZXKQ7C`).
    pub code: String,

    /// Talk title as entered by the speaker.
    pub title: String,

    /// Speaker display name.
    pub speaker_name: String,

    /// Pre-formatted schedule string; may contain a line break between the
    /// date and the time of day.
    pub time: String,

    /// Speaker photo. Talks without one are skipped.
    #[serde(default)]
    pub photo_url: Option<String>,

    /// Social-media handle without the leading `@`.
    #[serde(default)]
    pub social_handle: Option<String>,
}

impl Talk {
    /// How the speaker is addressed in a post: `@handle` when known,
    /// otherwise their name.
    pub fn mention(&self) -> String {
        match &self.social_handle {
            Some(handle) => format!("@{handle}"),
            None => self.speaker_name.clone(),
        }
    }

    /// The schedule string on a single line.
    pub fn time_inline(&self) -> String {
        self.time.replace('\n', " ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn talk() -> Talk {
        Talk {
            code: "ZXKQ7C".to_string(),
            title: "Rust for Pythonistas".to_string(),
            speaker_name: "Ada Lovelace".to_string(),
            time: "Feb 5, 2022\n1:30PM PST".to_string(),
            photo_url: Some("https://cdn.example/ada.jpg".to_string()),
            social_handle: Some("ada".to_string()),
        }
    }

    #[test]
    fn test_mention_prefers_handle() {
        assert_eq!(talk().mention(), "@ada");

        let anonymous = Talk {
            social_handle: None,
            ..talk()
        };
        assert_eq!(anonymous.mention(), "Ada Lovelace");
    }

    #[test]
    fn test_time_inline() {
        assert_eq!(talk().time_inline(), "Feb 5, 2022 1:30PM PST");
    }

    #[test]
    fn test_optional_fields_default_when_absent() {
        let parsed: Talk = serde_json::from_str(
            r#"{"code":"A","title":"T","speaker_name":"N","time":"Now"}"#,
        )
        .unwrap();
        assert_eq!(parsed.photo_url, None);
        assert_eq!(parsed.social_handle, None);
    }
}

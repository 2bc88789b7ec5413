//! Assembling the full text block and choosing its font size.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;
use crate::wrap::{wrap_speaker_name, wrap_title, SpeakerBlock};

/// The strings of one talk that end up on a placard.
#[derive(Debug, Clone, Copy)]
pub struct LayoutInput<'a> {
    pub talk_code: &'a str,
    pub title: &'a str,
    pub time: &'a str,
    pub speaker_name: &'a str,
}

/// Layout decisions for one placard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextLayout {
    pub title_lines: Vec<String>,
    pub time: String,
    pub speaker: SpeakerBlock,

    /// Line breaks between consecutive blocks.
    pub spacing: usize,

    pub font_size: u32,
}

impl TextLayout {
    /// The text block exactly as drawn: title, time, and name separated by
    /// `spacing` line breaks.
    pub fn text(&self) -> String {
        compose_text(&self.title_lines, &self.time, &self.speaker, self.spacing)
    }

    /// Lines in drawing order, blank separator lines included.
    pub fn lines(&self) -> Vec<String> {
        self.text().split('\n').map(str::to_string).collect()
    }
}

/// Font size for a text block, by its character count.
///
/// Longer blocks get smaller type so they fit the fixed text area.
pub fn select_font_size(combined_text: &str, config: &LayoutConfig) -> u32 {
    *config.font_sizes.lookup(combined_text.chars().count())
}

/// Line breaks between blocks for this talk.
pub fn block_spacing(title: &str, speaker_name: &str, config: &LayoutConfig) -> usize {
    config
        .overrides
        .spacing
        .iter()
        .find(|o| o.matches(title, speaker_name))
        .map(|o| o.line_breaks)
        .unwrap_or(config.block_spacing)
}

/// Compute every layout decision for one talk.
pub fn layout_text(input: LayoutInput<'_>, config: &LayoutConfig) -> TextLayout {
    let title_lines = wrap_title(input.title, input.talk_code, config);
    let speaker = wrap_speaker_name(input.speaker_name, config);
    let spacing = block_spacing(input.title, input.speaker_name, config);

    let combined = compose_text(&title_lines, input.time, &speaker, spacing);
    let font_size = select_font_size(&combined, config);

    TextLayout {
        title_lines,
        time: input.time.to_string(),
        speaker,
        spacing,
        font_size,
    }
}

fn compose_text(
    title_lines: &[String],
    time: &str,
    speaker: &SpeakerBlock,
    spacing: usize,
) -> String {
    let gap = "\n".repeat(spacing);
    format!("{}{gap}{time}{gap}{}", title_lines.join("\n"), speaker.wrapped())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIME: &str = "Feb 5, 2022\n1:30PM PST";

    fn input<'a>(title: &'a str, speaker_name: &'a str) -> LayoutInput<'a> {
        LayoutInput {
            talk_code: "ABC123",
            title,
            time: TIME,
            speaker_name,
        }
    }

    #[test]
    fn test_font_tiers() {
        let config = LayoutConfig::default();
        assert_eq!(select_font_size(&"x".repeat(79), &config), 60);
        assert_eq!(select_font_size(&"x".repeat(80), &config), 50);
        assert_eq!(select_font_size(&"x".repeat(119), &config), 50);
        assert_eq!(select_font_size(&"x".repeat(120), &config), 40);
        assert_eq!(select_font_size("", &config), 60);
    }

    #[test]
    fn test_text_block_composition() {
        let config = LayoutConfig::default();
        let layout = layout_text(input("Rust for Pythonistas", "Ada Lovelace"), &config);
        assert_eq!(
            layout.text(),
            "Rust for\nPythonistas\n\nFeb 5, 2022\n1:30PM PST\n\nAda Lovelace"
        );
        assert_eq!(layout.font_size, 60);
        assert_eq!(layout.lines().len(), 7);
        assert_eq!(layout.lines()[2], "");
    }

    #[test]
    fn test_long_title_uses_smallest_font() {
        let config = LayoutConfig::default();
        let title = "A".repeat(90);
        let layout = layout_text(input(&title, "Ada Lovelace"), &config);
        assert_eq!(layout.title_lines, vec![title.clone()]);
        assert!(layout.text().chars().count() >= 120);
        assert_eq!(layout.font_size, 40);
    }

    #[test]
    fn test_font_size_counts_wrapped_name() {
        let config = LayoutConfig::default();
        let layout = layout_text(
            input("Short", "Jean-Luc Alexandre De La Fontaine"),
            &config,
        );
        assert!(layout.text().ends_with("Jean-Luc Alexandre De\nLa Fontaine"));
        assert_eq!(layout.speaker.lines.len(), 2);
    }

    #[test]
    fn test_spacing_override_by_title_prefix() {
        let config = LayoutConfig::default();
        let layout = layout_text(
            input("Fifty shades of type hints", "Ada Lovelace"),
            &config,
        );
        assert_eq!(layout.spacing, 3);
        assert!(layout.text().contains("\n\n\nFeb 5, 2022"));
    }

    #[test]
    fn test_spacing_override_by_name_prefix() {
        let mut config = LayoutConfig::default();
        config.overrides.spacing.push(crate::SpacingOverride {
            prefix: "Bartholomew".to_string(),
            field: crate::SpacingField::Name,
            line_breaks: 4,
        });
        assert_eq!(block_spacing("Any title", "Bartholomew Q", &config), 4);
        assert_eq!(block_spacing("Any title", "Ada Lovelace", &config), 2);
    }

    #[test]
    fn test_empty_inputs_are_total() {
        let config = LayoutConfig::default();
        let layout = layout_text(
            LayoutInput {
                talk_code: "",
                title: "",
                time: "",
                speaker_name: "",
            },
            &config,
        );
        assert!(layout.title_lines.is_empty());
        assert_eq!(layout.text(), "\n\n\n\n");
        assert_eq!(layout.font_size, 60);
    }
}

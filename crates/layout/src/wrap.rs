//! Title and speaker-name wrapping.

use serde::{Deserialize, Serialize};

use crate::config::LayoutConfig;

/// Wrap column chosen for a title.
///
/// A per-talk override wins; otherwise the width comes from the title's
/// length in display columns, the same unit the wrap itself uses (wide CJK
/// characters count as two). Short titles get a narrow column so they fill the
/// text area vertically; long titles get a wide one so they stay within a
/// few lines.
pub fn title_width(title: &str, talk_code: &str, config: &LayoutConfig) -> usize {
    config
        .overrides
        .title_widths
        .get(talk_code)
        .copied()
        .unwrap_or_else(|| *config.title_widths.lookup(textwrap::core::display_width(title)))
}

/// Wrap a talk title at word boundaries.
///
/// Runs of whitespace collapse to single spaces. Words longer than the
/// column are kept whole on a line of their own.
pub fn wrap_title(title: &str, talk_code: &str, config: &LayoutConfig) -> Vec<String> {
    wrap_words(title, title_width(title, talk_code, config))
}

/// [`wrap_title`] joined into a single multi-line block.
pub fn wrapped_title_block(title: &str, talk_code: &str, config: &LayoutConfig) -> String {
    wrap_title(title, talk_code, config).join("\n")
}

fn wrap_words(text: &str, width: usize) -> Vec<String> {
    let normalized = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if normalized.is_empty() {
        return Vec::new();
    }

    let options = textwrap::Options::new(width.max(1))
        .break_words(false)
        .wrap_algorithm(textwrap::WrapAlgorithm::FirstFit)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
        .word_splitter(textwrap::WordSplitter::NoHyphenation);

    textwrap::wrap(&normalized, options)
        .into_iter()
        .map(|line| line.into_owned())
        .collect()
}

/// A speaker name prepared for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeakerBlock {
    /// The name exactly as supplied; used as the output file key.
    pub display_name: String,

    /// One or two lines to draw.
    pub lines: Vec<String>,
}

impl SpeakerBlock {
    pub fn wrapped(&self) -> String {
        self.lines.join("\n")
    }
}

/// Split long speaker names over two lines.
///
/// Names above `config.name_wrap_threshold` characters break after
/// `word_count / 2 + 1` words. The split point is clamped so the second line
/// is never empty; a single very long word cannot be split and stays on one
/// line.
pub fn wrap_speaker_name(name: &str, config: &LayoutConfig) -> SpeakerBlock {
    let words: Vec<&str> = name.split_whitespace().collect();

    let lines = if name.chars().count() > config.name_wrap_threshold && words.len() >= 2 {
        let mid = (words.len() / 2 + 1).min(words.len() - 1);
        vec![words[..mid].join(" "), words[mid..].join(" ")]
    } else {
        vec![name.to_string()]
    };

    SpeakerBlock {
        display_name: name.to_string(),
        lines,
    }
}

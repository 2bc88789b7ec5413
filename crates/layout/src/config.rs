//! Layout configuration: threshold tables and per-talk overrides.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::thresholds::ThresholdTable;
use crate::LayoutConfigError;

/// Everything the layout engine needs beyond the talk's own strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Wrap column width, keyed by title length in characters.
    pub title_widths: ThresholdTable<usize>,

    /// Font size in points, keyed by the combined text block length.
    pub font_sizes: ThresholdTable<u32>,

    /// Names longer than this (in characters) are split over two lines.
    pub name_wrap_threshold: usize,

    /// Line breaks between the title, time, and name blocks.
    pub block_spacing: usize,

    /// Escape hatches for talks whose natural layout looks wrong.
    pub overrides: LayoutOverrides,
}

/// Data-driven exceptions to the default layout rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOverrides {
    /// Forced wrap width by talk code.
    pub title_widths: BTreeMap<String, usize>,

    /// Forced block spacing by text prefix. First match wins.
    pub spacing: Vec<SpacingOverride>,
}

/// Replace the block spacing when a field starts with `prefix`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingOverride {
    pub prefix: String,

    #[serde(default)]
    pub field: SpacingField,

    pub line_breaks: usize,
}

/// Which talk string a [`SpacingOverride`] prefix is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SpacingField {
    #[default]
    Name,
    Title,
}

impl SpacingOverride {
    pub fn matches(&self, title: &str, speaker_name: &str) -> bool {
        let subject = match self.field {
            SpacingField::Name => speaker_name,
            SpacingField::Title => title,
        };
        subject.starts_with(&self.prefix)
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            title_widths: default_title_widths(),
            font_sizes: default_font_sizes(),
            name_wrap_threshold: 21,
            block_spacing: 2,
            overrides: LayoutOverrides {
                title_widths: BTreeMap::new(),
                // Short title above a long speaker name collided with the photo.
                spacing: vec![SpacingOverride {
                    prefix: "Fifty shades".to_string(),
                    field: SpacingField::Title,
                    line_breaks: 3,
                }],
            },
        }
    }
}

fn default_title_widths() -> ThresholdTable<usize> {
    ThresholdTable::from_pairs([(0, 15), (40, 18), (80, 24)])
        .unwrap_or_else(|e| unreachable!("built-in title widths are ordered: {e}"))
}

fn default_font_sizes() -> ThresholdTable<u32> {
    ThresholdTable::from_pairs([(0, 60), (80, 50), (120, 40)])
        .unwrap_or_else(|e| unreachable!("built-in font sizes are ordered: {e}"))
}

impl LayoutConfig {
    /// Reject values that would make wrapping or spacing degenerate.
    ///
    /// Table ordering is already enforced when the tables are built.
    pub fn validate(&self) -> Result<(), LayoutConfigError> {
        if self.title_widths.values().any(|w| *w == 0) {
            return Err(LayoutConfigError::ZeroWidth {
                context: "title_widths".to_string(),
            });
        }
        if let Some((code, _)) = self.overrides.title_widths.iter().find(|(_, w)| **w == 0) {
            return Err(LayoutConfigError::ZeroWidth {
                context: format!("overrides.title_widths[{code}]"),
            });
        }
        if self.font_sizes.values().any(|size| *size == 0) {
            return Err(LayoutConfigError::ZeroFontSize);
        }
        if self.block_spacing == 0 || self.overrides.spacing.iter().any(|o| o.line_breaks == 0) {
            return Err(LayoutConfigError::ZeroSpacing);
        }
        Ok(())
    }
}

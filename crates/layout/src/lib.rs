//! Placard Layout: the text layout engine
//!
//! Turns a talk's free-text title and speaker name into a few display lines
//! that fit the fixed text area of a placard, and picks a font size from how
//! much text there is:
//! - **Title wrapping:** word-boundary wrap at a width chosen by title length
//! - **Name wrapping:** long names split over two lines
//! - **Font size:** step function over the combined block length
//!
//! All thresholds and per-talk exceptions come from [`LayoutConfig`]. This
//! crate is pure computation: no I/O, and every function is total.

pub mod block;
pub mod config;
pub mod thresholds;
pub mod wrap;

pub use block::{block_spacing, layout_text, select_font_size, LayoutInput, TextLayout};
pub use config::{LayoutConfig, LayoutOverrides, SpacingField, SpacingOverride};
pub use thresholds::{ThresholdBand, ThresholdTable};
pub use wrap::{title_width, wrap_speaker_name, wrap_title, wrapped_title_block, SpeakerBlock};

/// Invalid layout configuration.
#[derive(Debug, thiserror::Error)]
pub enum LayoutConfigError {
    #[error("threshold table has no bands")]
    EmptyTable,

    #[error("first threshold band must start at 0, found {min_len}")]
    FirstBandNotZero { min_len: usize },

    #[error("threshold bands must be strictly increasing ({previous} then {next})")]
    UnorderedBands { previous: usize, next: usize },

    #[error("wrap width must be positive in {context}")]
    ZeroWidth { context: String },

    #[error("font sizes must be positive")]
    ZeroFontSize,

    #[error("block spacing must be at least one line break")]
    ZeroSpacing,
}

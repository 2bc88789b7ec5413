//! Placard Render Engine
//!
//! Turns talk records into finished promotional images and post drafts.
//!
//! # Pipeline Architecture
//!
//! ```text
//! Talk ──┬── layout (title wrap, name wrap, font size)
//!        │          │
//!        │          ├── Template copy ── Text block
//! photo ─┴── Decode ─┴── Fill-crop ── Circle mask ── Paste centered
//!                                                        │
//!                                                        ▼
//!                                         {speaker}{suffix}.png
//!
//! rendered talks ───────────────────────────────▶ tweets.txt
//! ```

pub mod announcement;
pub mod batch;
pub mod compositor;
pub mod export;

pub use batch::*;
pub use export::*;

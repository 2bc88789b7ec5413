//! Placard Talk Model
//!
//! Defines the data contracts between the talk data provider and the
//! renderer:
//! - **Talk:** one talk as seen by one speaker
//! - **pretalx:** API wire types and their expansion into talks
//! - **Sources:** traits for listing talks and downloading photos

pub mod pretalx;
pub mod source;
pub mod talk;

pub use source::*;
pub use talk::*;

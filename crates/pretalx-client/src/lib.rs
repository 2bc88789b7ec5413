//! Placard pretalx Client
//!
//! Talk data provider backed by the pretalx REST API, plus the photo
//! downloader used during rendering. All requests are blocking and made one
//! at a time.

pub mod client;
pub mod photo;

pub use client::{PretalxClient, speaker_url, submissions_url};
pub use photo::HttpPhotoSource;

//! Speaker photo downloads.

use std::path::Path;

use placard_common::error::{PlacardError, PlacardResult};
use placard_talk_model::PhotoSource;
use reqwest::blocking::Client;

use crate::client::build_http_client;

/// Fetches photos over HTTP(S) without credentials.
///
/// Anything that is not an `http://` or `https://` URL is read from the local
/// filesystem, with an optional `file://` prefix. That lets a hand-written
/// talks file point at photos on disk.
pub struct HttpPhotoSource {
    http: Client,
}

impl HttpPhotoSource {
    pub fn new() -> PlacardResult<Self> {
        Ok(Self {
            http: build_http_client()?,
        })
    }

    fn download(&self, url: &str) -> PlacardResult<Vec<u8>> {
        let response = self
            .http
            .get(url)
            .send()
            .map_err(|e| PlacardError::photo_fetch(url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlacardError::photo_fetch(url, format!("HTTP {status}")));
        }

        let bytes = response
            .bytes()
            .map_err(|e| PlacardError::photo_fetch(url, e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Whether `url` needs a network request.
pub fn is_remote(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn read_local(url: &str) -> PlacardResult<Vec<u8>> {
    let path = Path::new(url.strip_prefix("file://").unwrap_or(url));
    std::fs::read(path).map_err(|e| PlacardError::photo_fetch(url, e.to_string()))
}

impl PhotoSource for HttpPhotoSource {
    fn fetch_photo(&mut self, url: &str) -> PlacardResult<Vec<u8>> {
        let bytes = if is_remote(url) {
            self.download(url)?
        } else {
            read_local(url)?
        };
        tracing::debug!(url = %url, bytes = bytes.len(), "Fetched photo");
        Ok(bytes)
    }
}

//! pretalx REST API client.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::time::Duration;

use placard_common::config::{ApiConfig, EventConfig};
use placard_common::error::{PlacardError, PlacardResult};
use placard_talk_model::pretalx::{
    expand_submission, retain_talks, social_handle_from_answers, Page, SpeakerProfile, Submission,
};
use placard_talk_model::{Talk, TalkSource};
use reqwest::blocking::Client;
use serde::de::DeserializeOwned;

const REQUEST_TIMEOUT_SECS: u64 = 30;

pub(crate) const USER_AGENT: &str = concat!("placard/", env!("CARGO_PKG_VERSION"));

/// First page of confirmed submissions for an event.
pub fn submissions_url(base_url: &str, event: &str) -> String {
    format!(
        "{}/events/{}/submissions/?state=confirmed",
        base_url.trim_end_matches('/'),
        event
    )
}

/// Profile of one speaker, including question answers.
pub fn speaker_url(base_url: &str, event: &str, speaker_code: &str) -> String {
    format!(
        "{}/events/{}/speakers/{}/",
        base_url.trim_end_matches('/'),
        event,
        speaker_code
    )
}

pub(crate) fn build_http_client() -> PlacardResult<Client> {
    Client::builder()
        .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| PlacardError::data_fetch(format!("Failed to build HTTP client: {e}")))
}

/// Lists confirmed talks of one event from a pretalx instance.
pub struct PretalxClient {
    http: Client,
    base_url: String,
    event: String,
    token: Option<String>,
    social_question_id: Option<u64>,
    exclude_codes: BTreeSet<String>,
    tz_label: String,
    handles: HashMap<String, Option<String>>,
}

impl PretalxClient {
    pub fn new(api: &ApiConfig, event: &str, token: Option<String>) -> PlacardResult<Self> {
        if token.is_none() {
            tracing::warn!(
                env = %api.token_env,
                "No API token set; only public event data will be visible"
            );
        }

        Ok(Self {
            http: build_http_client()?,
            base_url: api.base_url.clone(),
            event: event.to_string(),
            token,
            social_question_id: api.social_question_id,
            exclude_codes: api.exclude_codes.clone(),
            tz_label: api.tz_label.clone(),
            handles: HashMap::new(),
        })
    }

    pub fn from_config(config: &EventConfig) -> PlacardResult<Self> {
        Self::new(&config.api, &config.event.slug, config.api_token())
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> PlacardResult<T> {
        let mut request = self.http.get(url);
        if let Some(token) = &self.token {
            request = request.header(reqwest::header::AUTHORIZATION, format!("Token {token}"));
        }

        let response = request
            .send()
            .map_err(|e| PlacardError::data_fetch(format!("GET {url} failed: {e}")))?;
        let status = response.status();
        if !status.is_success() {
            return Err(PlacardError::data_fetch(format!("GET {url}: HTTP {status}")));
        }

        let body = response
            .text()
            .map_err(|e| PlacardError::data_fetch(format!("GET {url}: {e}")))?;
        serde_json::from_str(&body)
            .map_err(|e| PlacardError::data_fetch(format!("Unexpected response from {url}: {e}")))
    }

    /// Every confirmed submission, following pagination.
    pub fn submissions(&self) -> PlacardResult<Vec<Submission>> {
        let mut url = submissions_url(&self.base_url, &self.event);
        let mut visited = HashSet::new();
        let mut submissions = Vec::new();

        loop {
            visited.insert(url.clone());
            let page: Page<Submission> = self.get_json(&url)?;
            tracing::debug!(
                url = %url,
                results = page.results.len(),
                count = ?page.count,
                "Fetched submissions page"
            );
            submissions.extend(page.results);

            match page.next {
                Some(next) if !visited.contains(&next) => url = next,
                Some(next) => {
                    tracing::warn!(url = %next, "Pagination loops back; stopping");
                    break;
                }
                None => break,
            }
        }

        Ok(submissions)
    }

    /// Social handle for a speaker, if the event asks for one.
    pub fn social_handle(&self, speaker_code: &str) -> PlacardResult<Option<String>> {
        let Some(question_id) = self.social_question_id else {
            return Ok(None);
        };
        let url = speaker_url(&self.base_url, &self.event, speaker_code);
        let profile: SpeakerProfile = self.get_json(&url)?;
        Ok(social_handle_from_answers(&profile.answers, question_id))
    }

    /// Cached handle lookup; lookup failures degrade to "no handle".
    fn handle_for(&mut self, speaker_code: &str) -> Option<String> {
        if let Some(handle) = self.handles.get(speaker_code) {
            return handle.clone();
        }

        let handle = match self.social_handle(speaker_code) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::warn!(speaker = %speaker_code, "Social handle lookup failed: {e}");
                None
            }
        };
        self.handles.insert(speaker_code.to_string(), handle.clone());
        handle
    }
}

impl TalkSource for PretalxClient {
    fn talks(&mut self) -> PlacardResult<Vec<Talk>> {
        let fetched = self.submissions()?;
        let fetched_count = fetched.len();
        let submissions = retain_talks(fetched, &self.exclude_codes);
        tracing::info!(
            event = %self.event,
            submissions = fetched_count,
            excluded = fetched_count - submissions.len(),
            "Fetched confirmed submissions"
        );

        let tz_label = self.tz_label.clone();
        let mut talks = Vec::new();
        for submission in &submissions {
            match expand_submission(submission, &tz_label, |speaker| {
                self.handle_for(&speaker.code)
            }) {
                Ok(expanded) => talks.extend(expanded),
                Err(e) if e.is_skippable() => {
                    tracing::warn!(code = %submission.code, "Skipping submission: {e}");
                }
                Err(e) => return Err(e),
            }
        }

        Ok(talks)
    }

    fn name(&self) -> &str {
        "pretalx"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submissions_url() {
        assert_eq!(
            submissions_url("https://pretalx.com/api", "pycascades-2022"),
            "https://pretalx.com/api/events/pycascades-2022/submissions/?state=confirmed"
        );
        assert_eq!(
            submissions_url("https://pretalx.com/api/", "demo"),
            "https://pretalx.com/api/events/demo/submissions/?state=confirmed"
        );
    }

    #[test]
    fn test_speaker_url() {
        assert_eq!(
            speaker_url("https://pretalx.com/api/", "demo", "SPK1"),
            "https://pretalx.com/api/events/demo/speakers/SPK1/"
        );
    }

    #[test]
    fn test_client_from_default_config() {
        let config = EventConfig::default();
        let client = PretalxClient::new(&config.api, &config.event.slug, None).unwrap();
        assert_eq!(client.name(), "pretalx");
        assert_eq!(client.event, "pycascades-2022");
        assert!(client.exclude_codes.contains("MVLLML"));
    }

    #[test]
    fn test_no_question_means_no_lookup() {
        let api = ApiConfig {
            // Unroutable; any request would fail.
            base_url: "http://127.0.0.1:9".to_string(),
            social_question_id: None,
            ..ApiConfig::default()
        };
        let mut client = PretalxClient::new(&api, "demo", None).unwrap();
        assert_eq!(client.social_handle("SPK1").unwrap(), None);
        assert_eq!(client.handle_for("SPK1"), None);
    }

    #[test]
    fn test_failed_lookup_degrades_and_is_cached() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            social_question_id: Some(1153),
            ..ApiConfig::default()
        };
        let mut client = PretalxClient::new(&api, "demo", Some("secret".into())).unwrap();
        assert_eq!(client.handle_for("SPK1"), None);
        assert_eq!(client.handles.get("SPK1"), Some(&None));
    }

    #[test]
    fn test_unreachable_api_is_fatal() {
        let api = ApiConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..ApiConfig::default()
        };
        let mut client = PretalxClient::new(&api, "demo", None).unwrap();
        let err = client.talks().unwrap_err();
        assert!(matches!(err, PlacardError::DataFetch { .. }));
        assert!(!err.is_skippable());
    }
}

//! Event configuration.
//!
//! One JSON file describes everything that varies between events: where the
//! talks come from, which templates to render onto, how text is laid out and
//! styled, and where outputs land. Every section falls back to defaults so a
//! config file only needs to name what it changes.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use placard_layout::LayoutConfig;
use serde::{Deserialize, Serialize};

use crate::error::{PlacardError, PlacardResult};

/// Complete configuration for one event run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventConfig {
    /// Event identity and announcement wording.
    pub event: EventInfo,

    /// Conference-management API access.
    pub api: ApiConfig,

    /// Text wrapping and font-size tables.
    pub layout: LayoutConfig,

    /// Fixed drawing parameters shared by every template.
    pub style: StyleConfig,

    /// Background templates; one placard is rendered per variant.
    pub templates: Vec<TemplateVariant>,

    /// Directory receiving placards and `tweets.txt`.
    pub output_dir: PathBuf,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// Event identity used in announcements.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EventInfo {
    /// Event slug as known to the API (e.g. `pycascades-2022`).
    pub slug: String,

    /// Human-readable event name.
    pub display_name: String,

    /// Hashtag line appended to every post.
    pub hashtag: String,

    /// Public talk page prefix; the talk code and a trailing `/` are appended.
    pub talk_url_base: String,

    /// Fixed alt-text lines describing the template artwork.
    pub alt_text_lines: Vec<String>,
}

/// Data-provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// API root, without trailing slash.
    pub base_url: String,

    /// Environment variable holding the API token.
    pub token_env: String,

    /// Questionnaire field whose answer is the speaker's social handle.
    pub social_question_id: Option<u64>,

    /// Submission codes that are not talks (announcements, panels, breaks).
    pub exclude_codes: BTreeSet<String>,

    /// Timezone label printed after the time of day.
    pub tz_label: String,
}

/// Drawing parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// TrueType/OpenType font used for the text block.
    pub font_path: PathBuf,

    /// Text color as RGB.
    pub text_color: [u8; 3],

    /// Top-left anchor of the text block in pixels.
    pub text_origin: [i32; 2],

    /// Extra pixels between consecutive lines.
    pub line_spacing: u32,

    /// Edge length of the square the speaker photo is fitted into.
    pub photo_size: u32,
}

/// One background template and the filename suffix of its placards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateVariant {
    /// Short label used in logs.
    pub name: String,

    /// Template image path.
    pub path: PathBuf,

    /// Appended to the speaker name to form the output file stem.
    #[serde(default)]
    pub suffix: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "placard=debug,warn").
    pub level: String,

    /// Whether to output structured JSON logs.
    pub json: bool,

    /// Optional log file path.
    pub file: Option<PathBuf>,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            event: EventInfo::default(),
            api: ApiConfig::default(),
            layout: LayoutConfig::default(),
            style: StyleConfig::default(),
            templates: vec![
                TemplateVariant {
                    name: "wide".to_string(),
                    path: PathBuf::from("talk-image-template-v2.png"),
                    suffix: String::new(),
                },
                TemplateVariant {
                    name: "insta".to_string(),
                    path: PathBuf::from("talk-image-template-insta.png"),
                    suffix: "-insta".to_string(),
                },
            ],
            output_dir: PathBuf::from("outputs"),
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for EventInfo {
    fn default() -> Self {
        Self {
            slug: "pycascades-2022".to_string(),
            display_name: "PyCascades 2022".to_string(),
            hashtag: "#PyCascades".to_string(),
            talk_url_base: "https://pretalx.com/pycascades-2022/talk/".to_string(),
            alt_text_lines: vec![
                "The PyCascades logo is in the top right.".to_string(),
                "The URL \"2022.pycascades.com\" is in the bottom right.".to_string(),
            ],
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "https://pretalx.com/api".to_string(),
            token_env: "PRETALX_TOKEN".to_string(),
            social_question_id: Some(1153),
            exclude_codes: ["MVLLML", "8YFUUC", "VVSFBR", "3C3BFP", "3HKZTJ"]
                .into_iter()
                .map(str::to_string)
                .collect(),
            tz_label: "PST".to_string(),
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            font_path: PathBuf::from("fonts/Anonymous_Pro_B.ttf"),
            text_color: [98, 60, 151],
            text_origin: [30, 30],
            line_spacing: 24,
            photo_size: 425,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

impl EventConfig {
    /// Load and validate a config file.
    ///
    /// Relative asset paths are resolved against the directory containing
    /// the config file, so an event folder can be moved as a unit.
    pub fn load(path: impl AsRef<Path>) -> PlacardResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(PlacardError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content).map_err(|e| {
            PlacardError::config(format!("Failed to parse {}: {e}", path.display()))
        })?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        config.resolve_paths(base);
        config.validate()?;

        tracing::debug!(
            config = %path.display(),
            templates = config.templates.len(),
            "Loaded event config"
        );
        Ok(config)
    }

    /// Write the config as pretty JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> PlacardResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Check cross-field invariants that serde cannot express.
    pub fn validate(&self) -> PlacardResult<()> {
        self.layout
            .validate()
            .map_err(|e| PlacardError::config(e.to_string()))?;

        if self.templates.is_empty() {
            return Err(PlacardError::config("At least one template is required"));
        }

        let mut suffixes = HashSet::new();
        for template in &self.templates {
            if !suffixes.insert(template.suffix.as_str()) {
                return Err(PlacardError::config(format!(
                    "Templates share the output suffix {:?}; their placards would overwrite each other",
                    template.suffix
                )));
            }
        }

        if self.style.photo_size == 0 {
            return Err(PlacardError::config("style.photo_size must be positive"));
        }

        Ok(())
    }

    /// Make every relative asset path relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        let resolve = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };

        resolve(&mut self.style.font_path);
        resolve(&mut self.output_dir);
        for template in &mut self.templates {
            resolve(&mut template.path);
        }
        if let Some(file) = self.logging.file.as_mut() {
            resolve(file);
        }
    }

    /// Read the API token from the configured environment variable.
    pub fn api_token(&self) -> Option<String> {
        std::env::var(&self.api.token_env)
            .ok()
            .filter(|token| !token.trim().is_empty())
    }
}

//! Configuration types for e2e-report.
//!
//! [`Config::load`] layers, in order: the embedded defaults, an optional TOML
//! file (explicit path, else `$XDG_CONFIG_HOME/e2e-report/config.toml`), and
//! `E2E_REPORT__<SECTION>__<KEY>` environment variables. [`Config::defaults`]
//! returns the embedded defaults without touching the filesystem (useful in
//! tests).

use crate::types::SpecState;
use serde::Deserialize;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[junit]
omit_captured_output = false
omit_timelines_for   = []

[polarion]
project_id = ""
dry_run    = false

[attachments]
parent_dir = "."
"#;

const ENV_PREFIX: &str = "E2E_REPORT";

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub junit: JunitConfig,
    #[serde(default)]
    pub polarion: PolarionConfig,
    #[serde(default)]
    pub attachments: AttachmentsConfig,
}

/// `[junit]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct JunitConfig {
    /// Leave system-out empty on every test case.
    #[serde(default)]
    pub omit_captured_output: bool,
    /// Spec states (lowercase Ginkgo names) whose system-err is left out.
    #[serde(default)]
    pub omit_timelines_for: Vec<String>,
}

impl JunitConfig {
    /// Whether system-err should be dropped for specs in `state`.
    /// Unrecognised state names are ignored.
    pub fn omits_timeline(&self, state: SpecState) -> bool {
        self.omit_timelines_for
            .iter()
            .filter_map(|s| SpecState::parse(s))
            .any(|s| s == state)
    }
}

/// `[polarion]` section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PolarionConfig {
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub dry_run: bool,
}

/// `[attachments]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct AttachmentsConfig {
    /// Directory under which `rp_preproc/` is (re)created.
    #[serde(default = "default_parent_dir")]
    pub parent_dir: PathBuf,
}

fn default_parent_dir() -> PathBuf { PathBuf::from(".") }

impl Default for AttachmentsConfig {
    fn default() -> Self {
        Self {
            parent_dir: default_parent_dir(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load configuration layered on top of the built-in defaults.
    ///
    /// An explicit `path` must exist; the XDG location is optional.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(p) => config::File::from(p).required(true),
            None => config::File::from(config_path().as_path()).required(false),
        };

        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("junit.omit_timelines_for")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("e2e-report")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Runtime configuration.
//!
//! # Responsibility
//! - Load settings from an optional `heatgrid.toml`.
//! - Layer environment overrides on top so credentials never live in source
//!   or in committed files.
//!
//! # Invariants
//! - Every field has a usable default; an empty file is valid.
//! - The API token is optional; anonymous requests are allowed.
//! - Precedence: CLI flags > environment > file > defaults.

use crate::feed::github::{DEFAULT_API_BASE, MAX_PER_PAGE};
use crate::feed::{ConfiguredFeed, FeedError, FileEventFeed, GithubEventFeed};
use crate::render::label::DisplayLocale;
use crate::service::heatmap_service::FallbackPolicy;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "heatgrid.toml";

pub const ENV_USER: &str = "HEATGRID_USER";
pub const ENV_API_BASE: &str = "HEATGRID_API_BASE";
pub const ENV_TOKEN: &str = "HEATGRID_GITHUB_TOKEN";
/// Conventional token variable, read when [`ENV_TOKEN`] is unset.
pub const ENV_TOKEN_FALLBACK: &str = "GITHUB_TOKEN";

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid(String),
    /// The configured feed could not be constructed.
    Feed(FeedError),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config `{}`: {source}", path.display())
            }
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
            Self::Feed(err) => write!(f, "failed to set up event feed: {err}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid(_) => None,
            Self::Feed(err) => Some(err),
        }
    }
}

/// Top-level settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeatgridConfig {
    pub feed: FeedSettings,
    pub render: RenderSettings,
    pub logging: LoggingSettings,
}

/// Where events come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedSettings {
    /// GitHub login whose public events are fetched.
    pub user: Option<String>,
    pub api_base: String,
    pub per_page: u32,
    /// Prefer `HEATGRID_GITHUB_TOKEN`; a file token must stay uncommitted.
    pub token: Option<String>,
    /// Read events from this JSON file instead of the API.
    pub events_file: Option<PathBuf>,
}

impl Default for FeedSettings {
    fn default() -> Self {
        Self {
            user: None,
            api_base: DEFAULT_API_BASE.to_string(),
            per_page: MAX_PER_PAGE,
            token: None,
            events_file: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSettings {
    pub locale: DisplayLocale,
    pub fallback: FallbackPolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSettings {
    /// `trace|debug|info|warn|error`; build-mode default when unset.
    pub level: Option<String>,
    /// Absolute directory for rolling log files; logging is off when unset.
    pub dir: Option<PathBuf>,
}

impl HeatgridConfig {
    /// Parses TOML text.
    pub fn from_toml_str(raw: &str, origin: &Path) -> ConfigResult<Self> {
        toml::from_str(raw).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Loads a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw, path)
    }

    /// Loads `path` when given, else `./heatgrid.toml` when present, else
    /// defaults; then applies process environment overrides.
    pub fn load(path: Option<&Path>) -> ConfigResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(CONFIG_FILE_NAME);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Applies environment overrides through `lookup`.
    ///
    /// Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(user) = non_empty(ENV_USER) {
            self.feed.user = Some(user);
        }
        if let Some(api_base) = non_empty(ENV_API_BASE) {
            self.feed.api_base = api_base;
        }
        if let Some(token) = non_empty(ENV_TOKEN).or_else(|| non_empty(ENV_TOKEN_FALLBACK)) {
            self.feed.token = Some(token);
        }
    }

    /// Builds the feed these settings describe.
    ///
    /// A configured `events_file` wins over the API.
    ///
    /// # Errors
    /// - Returns [`ConfigError::Invalid`] when neither a user nor an events
    ///   file is configured, or the user name is blank.
    /// - Returns [`ConfigError::Feed`] when the HTTP client cannot be built.
    pub fn feed(&self) -> ConfigResult<ConfiguredFeed> {
        if let Some(path) = &self.feed.events_file {
            return Ok(ConfiguredFeed::File(FileEventFeed::new(path.clone())));
        }

        let user = self
            .feed
            .user
            .as_deref()
            .map(str::trim)
            .filter(|user| !user.is_empty())
            .ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "no event source: set feed.user, {ENV_USER}, or feed.events_file"
                ))
            })?;
        if user.contains('/') {
            return Err(ConfigError::Invalid(format!(
                "user name must not contain `/`, got `{user}`"
            )));
        }

        let feed = GithubEventFeed::try_new(
            self.feed.api_base.clone(),
            user,
            self.feed.token.clone(),
            self.feed.per_page,
        )
        .map_err(ConfigError::Feed)?;
        Ok(ConfiguredFeed::Github(feed))
    }
}

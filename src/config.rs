//! Runtime configuration resolved from the environment.
//!
//! Launchers pass workflow settings as environment variables, so everything
//! here reads from a variable lookup. The binary loads a `.env` file first
//! (via `dotenvy`) and then applies CLI overrides on top.

use std::path::PathBuf;

use crate::error::ConfigError;
use crate::query::SearchOptions;

/// Location of Bear's database relative to the home directory.
///
/// See: https://bear.app/faq/where-are-bears-notes-located
pub const BEAR_DATABASE_WITHIN_HOME: &str =
    "Library/Group Containers/9K33E3U3T4.net.shinyfrog.bear/Application Data/database.sqlite";

pub const DATABASE_PATH_VAR: &str = "BEAR_DATABASE_PATH";
pub const EXCLUDE_ARCHIVED_VAR: &str = "BEAR_EXCLUDE_ARCHIVED";
pub const EXCLUDE_TRASHED_VAR: &str = "BEAR_EXCLUDE_TRASHED";
pub const TOKEN_VAR: &str = "BEAR_TOKEN";
pub const ICON_VAR: &str = "BEAR_SEARCH_ICON";

const DEFAULT_ICON: &str = "icon.png";

/// Settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_path: PathBuf,
    pub options: SearchOptions,
    /// Whether a Bear API token is configured. Only its presence is checked.
    pub has_token: bool,
    pub icon: PathBuf,
}

impl Config {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined (and no
    /// explicit database path is set) or a boolean variable is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), dirs::home_dir())
    }

    /// Builds configuration from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F, home: Option<PathBuf>) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_path = match non_empty(lookup(DATABASE_PATH_VAR)) {
            Some(path) => PathBuf::from(path),
            None => home
                .ok_or(ConfigError::HomeDirUnavailable)?
                .join(BEAR_DATABASE_WITHIN_HOME),
        };

        let options = SearchOptions {
            exclude_archived: parse_bool(EXCLUDE_ARCHIVED_VAR, lookup(EXCLUDE_ARCHIVED_VAR), true)?,
            exclude_trashed: parse_bool(EXCLUDE_TRASHED_VAR, lookup(EXCLUDE_TRASHED_VAR), true)?,
        };

        let has_token = non_empty(lookup(TOKEN_VAR)).is_some();
        let icon = non_empty(lookup(ICON_VAR))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_ICON));

        Ok(Self {
            database_path,
            options,
            has_token,
            icon,
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_bool(
    name: &'static str,
    value: Option<String>,
    default: bool,
) -> Result<bool, ConfigError> {
    let Some(value) = non_empty(value) else {
        return Ok(default);
    };

    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidBool { name, value }),
    }
}

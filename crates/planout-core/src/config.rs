//! Paths, credentials and the persisted key file.
//!
//! Planout keeps its database under the XDG data directory and an optional
//! dotenv file under the XDG config directory:
//!
//! - `$XDG_DATA_HOME/planout/planout.db`
//! - `$XDG_CONFIG_HOME/planout/planout.env`

use std::{
    fmt, fs,
    path::{Path, PathBuf},
};

use crate::error::{PlannerError, Result};

/// Environment variable holding the generation API key.
pub const API_KEY_VAR: &str = "GEMINI_API_KEY";

const APP_PREFIX: &str = "planout";
const DATABASE_FILE: &str = "planout.db";
const ENV_FILE: &str = "planout.env";

/// API key for the text-generation service.
///
/// Never printed: `Debug` redacts the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    /// Wraps a key, rejecting blank input.
    pub fn new(key: impl Into<String>) -> Option<Self> {
        let key = key.into().trim().to_string();
        (!key.is_empty()).then_some(Self(key))
    }

    /// The raw key, for building requests.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Default database location, creating its directory if needed.
pub fn default_database_path() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .place_data_file(DATABASE_FILE)
        .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
}

/// Default env file location, creating its directory if needed.
pub fn default_env_file() -> Result<PathBuf> {
    xdg::BaseDirectories::with_prefix(APP_PREFIX)
        .place_config_file(ENV_FILE)
        .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
}

/// Reads `key` from a dotenv file. A missing file reads as unset.
///
/// The file is parsed with dotenv rules (`export` prefixes, quoting, inline
/// comments) without touching the process environment. When the key occurs
/// more than once the last entry wins.
pub fn read_env_var(path: &Path, key: &str) -> Result<Option<String>> {
    let entries = match dotenvy::from_path_iter(path) {
        Ok(entries) => entries,
        Err(e) if e.not_found() => return Ok(None),
        Err(e) => return Err(dotenv_error(path, e)),
    };

    let mut found = None;
    for entry in entries {
        let (name, value) = entry.map_err(|e| dotenv_error(path, e))?;
        if name == key {
            found = Some(value.trim().to_string());
        }
    }
    Ok(found)
}

fn dotenv_error(path: &Path, error: dotenvy::Error) -> PlannerError {
    match error {
        dotenvy::Error::Io(source) => PlannerError::FileSystem {
            path: path.to_path_buf(),
            source,
        },
        other => PlannerError::Configuration {
            message: format!("Invalid env file {}: {other}", path.display()),
        },
    }
}

/// Name assigned by a dotenv line, if it is an assignment.
fn entry_name(line: &str) -> Option<&str> {
    let line = line.trim_start();
    if line.starts_with('#') {
        return None;
    }
    let line = line.strip_prefix("export ").unwrap_or(line);
    line.split_once('=').map(|(name, _)| name.trim())
}

/// Sets `key=value` in a `KEY=value` file.
///
/// The first line assigning `key` is replaced in place and any later ones
/// are dropped; otherwise the pair is appended. All other lines are kept as
/// they were.
pub fn upsert_env_var(path: &Path, key: &str, value: &str) -> Result<()> {
    let fs_error = |source| PlannerError::FileSystem {
        path: path.to_path_buf(),
        source,
    };

    let existing = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => String::new(),
        Err(e) => return Err(fs_error(e)),
    };

    let entry = format!("{key}={value}");
    let mut replaced = false;
    let mut lines = Vec::new();
    for line in existing.lines() {
        if entry_name(line) != Some(key) {
            lines.push(line.to_string());
        } else if !replaced {
            replaced = true;
            lines.push(entry.clone());
        }
    }

    if !replaced {
        lines.push(entry);
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let mut content = lines.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(fs_error)
}

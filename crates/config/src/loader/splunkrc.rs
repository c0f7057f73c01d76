//! `.splunkrc` credentials file support.
//!
//! The file holds `key=value` lines; blank lines and lines starting with `#`
//! are ignored. Recognised keys: `host`, `port`, `scheme`, `username`,
//! `password`, `token`, `app`. `version` is accepted and ignored.
//!
//! Invariants:
//! - A missing default file (`$HOME/.splunkrc`) is not an error.
//! - A missing explicit file (`ConfigLoader::with_rc_path`) is an error.
//! - Secret values are never logged.

use directories::BaseDirs;
use secrecy::SecretString;
use std::path::{Path, PathBuf};
use tracing::debug;

use super::builder::ConfigLoader;
use super::error::ConfigError;
use crate::constants::SPLUNKRC_FILE_NAME;

/// Location of the credentials file in the user's home directory.
pub(crate) fn default_splunkrc_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(SPLUNKRC_FILE_NAME))
}

/// Parse credentials file content into `(key, value)` pairs.
///
/// Keys are lowercased; a leading `--` on a key is tolerated.
pub(crate) fn parse_splunkrc(
    content: &str,
    path: &Path,
) -> Result<Vec<(String, String)>, ConfigError> {
    let mut pairs = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| ConfigError::RcFileParse {
            path: path.to_path_buf(),
            line: idx + 1,
        })?;
        let key = key.trim().trim_start_matches("--").to_ascii_lowercase();
        pairs.push((key, value.trim().to_string()));
    }
    Ok(pairs)
}

pub(crate) fn apply_splunkrc(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    let (path, explicit) = match loader.rc_path() {
        Some(p) => (p.clone(), true),
        None => match default_splunkrc_path() {
            Some(p) => (p, false),
            None => return Ok(()),
        },
    };

    let content = match std::fs::read_to_string(&path) {
        Ok(c) => c,
        Err(e) if !explicit && e.kind() == std::io::ErrorKind::NotFound => {
            debug!("No credentials file at {}", path.display());
            return Ok(());
        }
        Err(source) => return Err(ConfigError::RcFileRead { path, source }),
    };

    debug!("Loading credentials file {}", path.display());
    for (key, value) in parse_splunkrc(&content, &path)? {
        if value.is_empty() {
            continue;
        }
        match key.as_str() {
            "host" => loader.set_host(Some(value)),
            "port" => {
                let port = value.parse::<u16>().map_err(|_| ConfigError::InvalidValue {
                    var: format!("port ({})", path.display()),
                    message: "must be a port number".to_string(),
                })?;
                loader.set_port(Some(port));
            }
            "scheme" => loader.set_scheme(Some(value)),
            "username" => loader.set_username(Some(value)),
            "password" => loader.set_password(Some(SecretString::new(value.into()))),
            "token" => loader.set_api_token(Some(SecretString::new(value.into()))),
            "app" => loader.set_app(Some(value)),
            "version" => {}
            other => debug!("Ignoring unknown credentials file key '{}'", other),
        }
    }
    Ok(())
}

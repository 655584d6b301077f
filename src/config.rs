use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

pub const DEFAULT_OUTPUT_FILE: &str = "api_data.xlsx";
pub const DEFAULT_TERMS_START: &str = "21";
pub const DEFAULT_TERMS_END: &str = "36";

/// Term window sent in the data request body. The provider expects the
/// bounds as strings, not numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRange {
    pub start: String,
    pub end: String,
}

impl Default for TermRange {
    fn default() -> Self {
        TermRange {
            start: DEFAULT_TERMS_START.to_string(),
            end: DEFAULT_TERMS_END.to_string(),
        }
    }
}

/// All settings for one run, constructed once at process start and passed
/// into the pipeline stages. Credentials are held only in memory and never
/// persisted.
#[derive(Debug, Clone)]
pub struct Settings {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub data_url: String,
    pub terms: TermRange,
    pub output: PathBuf,
}

impl Settings {
    /// Reads the settings from the environment. `CLIENT_ID`, `CLIENT_SECRET`,
    /// `AUTH_URL` and `DATA_URL` are required; the term range and output
    /// file fall back to their defaults.
    pub fn from_env() -> Result<Settings> {
        Ok(Settings {
            client_id: required("CLIENT_ID")?,
            client_secret: required("CLIENT_SECRET")?,
            auth_url: required("AUTH_URL")?,
            data_url: required("DATA_URL")?,
            terms: TermRange {
                start: optional("TERMS_START", DEFAULT_TERMS_START),
                end: optional("TERMS_END", DEFAULT_TERMS_END),
            },
            output: PathBuf::from(optional("OUTPUT_FILE", DEFAULT_OUTPUT_FILE)),
        })
    }
}

fn required(key: &'static str) -> Result<String> {
    match env::var(key) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(Error::MissingConfig { key }),
    }
}

fn optional(key: &str, default: &str) -> String {
    env::var(key)
        .ok()
        .filter(|val| !val.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

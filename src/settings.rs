//! Persisted user settings.
//!
//! The on-disk format is the JSON object editor plugins store in their
//! `data.json`: camelCase keys, every key optional. Missing keys take their
//! defaults, so a settings file written by an older version keeps working.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::format::FormatterOptions;

const KNOWN_KEYS: &[&str] = &[
    "stripWwwSubdomain",
    "stripWwwPlusSubdomain",
    "stripMobileSubdomain",
    "stripAmpSubdomain",
    "formatMetadata",
];

/// User-facing configuration.
///
/// A key set to `null` reads as `false`, as the plugin's truthiness checks
/// see it; a missing key takes its default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    #[serde(deserialize_with = "null_as_false")]
    pub strip_www_subdomain: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub strip_www_plus_subdomain: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub strip_mobile_subdomain: bool,
    #[serde(deserialize_with = "null_as_false")]
    pub strip_amp_subdomain: bool,
    /// Also rewrite links in the metadata (properties) panel.
    #[serde(deserialize_with = "null_as_false")]
    pub format_metadata: bool,
}

impl Settings {
    pub const DEFAULT: Settings = Settings {
        strip_www_subdomain: true,
        strip_www_plus_subdomain: true,
        strip_mobile_subdomain: true,
        strip_amp_subdomain: true,
        format_metadata: false,
    };

    /// Parse settings JSON, filling missing keys with defaults.
    ///
    /// `null` yields the defaults; anything else that is not an object is
    /// rejected. Unknown keys are ignored, `null` values read as `false`.
    ///
    /// ```
    /// use tidylinks::Settings;
    ///
    /// let settings = Settings::from_json(r#"{"stripMobileSubdomain": false}"#).unwrap();
    /// assert!(!settings.strip_mobile_subdomain);
    /// assert!(settings.strip_www_subdomain);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        match &value {
            Value::Null => return Ok(Self::DEFAULT),
            Value::Object(map) => {
                for key in map.keys().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
                    log::warn!("ignoring unknown setting {key:?}");
                }
            }
            other => {
                return Err(Error::Settings(format!(
                    "expected a JSON object, found {}",
                    json_type(other)
                )));
            }
        }
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Read settings from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Read settings from a file, or use the defaults if it does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(json) => Self::from_json(&json),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no settings at {}, using defaults", path.display());
                Ok(Self::DEFAULT)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Write settings to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// The formatter switches of these settings.
    pub fn formatter_options(&self) -> FormatterOptions {
        FormatterOptions {
            strip_www_subdomain: self.strip_www_subdomain,
            strip_www_plus_subdomain: self.strip_www_plus_subdomain,
            strip_mobile_subdomain: self.strip_mobile_subdomain,
            strip_amp_subdomain: self.strip_amp_subdomain,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn null_as_false<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

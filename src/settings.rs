//! Preference store consulted by the generator and profiles.
//!
//! Preferences are a flat key/value map keyed by dotted names. Language-specific settings are namespaced as
//! `<language>.<setting>` (for example `cpp.long-type`).
//!
//! ## Notes
//! - The store is owned by the caller. Profiles never cache values read from it: every lookup happens at the point
//!   of use, so edits between a generate call and a later parse call are always observed.
//! - Preference files are JSON. Nested objects flatten to dotted keys, so `{"cpp": {"indent": "  "}}` and
//!   `{"cpp.indent": "  "}` are equivalent.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Errors raised while loading a preference file.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read preferences '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid preferences JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preference '{key}' must be a string, number or boolean")]
    UnsupportedValue { key: String },

    #[error("preferences root must be a JSON object")]
    NotAnObject,
}

/// Flat key/value preference store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Settings {
    values: BTreeMap<String, String>,
}

/// Build a language-namespaced key, e.g. `language_key("cpp", "long-type")` → `cpp.long-type`.
pub fn language_key(namespace: &str, setting: &str) -> String {
    format!("{namespace}.{setting}")
}

impl Settings {
    /// Create an empty store; every accessor then returns its default.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load preferences from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Parse preferences from JSON text.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        let value: Value = serde_json::from_str(text)?;
        let Value::Object(map) = value else {
            return Err(ConfigError::NotAnObject);
        };
        let mut settings = Self::new();
        for (key, value) in map {
            flatten_into(&mut settings.values, key, value)?;
        }
        Ok(settings)
    }

    /// Set (or replace) a preference.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Builder-style [`Settings::set`].
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }

    /// Raw lookup.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn get_string(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or(default).to_string()
    }

    /// Boolean lookup; `true`/`false`/`1`/`0`/`yes`/`no` are accepted, anything else yields `default`.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key).map(|v| v.trim().to_ascii_lowercase()) {
            None => default,
            Some(v) => match v.as_str() {
                "true" | "1" | "yes" => true,
                "false" | "0" | "no" => false,
                _ => {
                    tracing::warn!(key, value = %v, "ignoring non-boolean preference");
                    default
                }
            },
        }
    }

    /// Integer lookup; unparsable values yield `default`.
    pub fn get_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            None => default,
            Some(v) => v.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(key, value = v, "ignoring non-integer preference");
                default
            }),
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn flatten_into(out: &mut BTreeMap<String, String>, key: String, value: Value) -> Result<(), ConfigError> {
    match value {
        Value::Object(map) => {
            for (child, value) in map {
                flatten_into(out, language_key(&key, &child), value)?;
            }
        }
        Value::String(s) => {
            out.insert(key, s);
        }
        Value::Bool(b) => {
            out.insert(key, b.to_string());
        }
        Value::Number(n) => {
            out.insert(key, n.to_string());
        }
        Value::Null => {}
        Value::Array(_) => return Err(ConfigError::UnsupportedValue { key }),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================
    // Accessor tests
    // ========================================

    #[test]
    fn test_defaults_when_missing() {
        let settings = Settings::new();
        assert_eq!(settings.get_string("cpp.long-type", "long long"), "long long");
        assert!(!settings.get_bool("cpp.include-statement", false));
        assert_eq!(settings.get_int("editor.width", 80), 80);
    }

    #[test]
    fn test_typed_accessors() {
        let settings = Settings::new()
            .with("a.flag", "Yes")
            .with("a.count", " 12 ")
            .with("a.bad", "maybe");
        assert!(settings.get_bool("a.flag", false));
        assert_eq!(settings.get_int("a.count", 0), 12);
        assert!(settings.get_bool("a.bad", true));
        assert_eq!(settings.get_int("a.bad", 7), 7);
    }

    #[test]
    fn test_set_replaces_and_remove() {
        let mut settings = Settings::new();
        settings.set("k", "1");
        settings.set("k", "2");
        assert_eq!(settings.get("k"), Some("2"));
        assert_eq!(settings.remove("k"), Some("2".to_string()));
        assert!(settings.is_empty());
    }

    // ========================================
    // JSON loading tests
    // ========================================

    #[test]
    fn test_nested_objects_flatten_to_dotted_keys() {
        let settings =
            Settings::from_json_str(r#"{"cpp": {"long-type": "__int64", "include-statement": true}, "java.indent": 4}"#)
                .unwrap();
        assert_eq!(settings.get("cpp.long-type"), Some("__int64"));
        assert!(settings.get_bool("cpp.include-statement", false));
        assert_eq!(settings.get_int("java.indent", 0), 4);
        assert_eq!(settings.len(), 3);
    }

    #[test]
    fn test_arrays_are_rejected() {
        let err = Settings::from_json_str(r#"{"cpp": {"x": [1]}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::UnsupportedValue { ref key } if key == "cpp.x"));
    }

    #[test]
    fn test_root_must_be_object() {
        assert!(matches!(Settings::from_json_str("[]"), Err(ConfigError::NotAnObject)));
        assert!(matches!(Settings::from_json_str("{"), Err(ConfigError::Json(_))));
    }

    #[test]
    fn test_language_key() {
        assert_eq!(language_key("vb", "template-file"), "vb.template-file");
    }
}

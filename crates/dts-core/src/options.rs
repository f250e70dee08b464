//! Generator options parsed from the plugin parameter string.
//!
//! The host passes one parameter string per invocation, shaped as a
//! comma-separated list of `key=value` (or bare `key`) entries. No key has
//! a defined effect yet; the parsed map is kept so new keys can be added
//! without changing the parsing contract.
//!
//! # Examples
//!
//! ```
//! use grpc_dts_core::GeneratorOptions;
//!
//! let options = GeneratorOptions::parse("mode=strict,verbose").unwrap();
//! assert_eq!(options.get("mode"), Some("strict"));
//! assert_eq!(options.get("verbose"), Some(""));
//!
//! assert!(GeneratorOptions::parse("").unwrap().is_empty());
//! assert!(GeneratorOptions::parse("=oops").is_err());
//! ```

use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// Parsed generator options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GeneratorOptions {
    entries: BTreeMap<String, String>,
}

impl GeneratorOptions {
    /// Keys that currently change generator behavior.
    ///
    /// Empty: every key is accepted and ignored.
    pub const RECOGNIZED_KEYS: &'static [&'static str] = &[];

    /// Parses a parameter string.
    ///
    /// Entries are separated by `,`. Each entry is split at its first `=`;
    /// an entry without `=` is a key with an empty value. Surrounding
    /// whitespace is trimmed and empty entries are skipped. When a key
    /// repeats, the last value wins.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigError` if an entry has an empty key.
    pub fn parse(parameter: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for entry in parameter.split(',').map(str::trim) {
            if entry.is_empty() {
                continue;
            }

            let (key, value) = entry.split_once('=').unwrap_or((entry, ""));
            let key = key.trim();

            if key.is_empty() {
                return Err(Error::ConfigError {
                    message: format!("option '{entry}' has an empty key"),
                });
            }

            entries.insert(key.to_string(), value.trim().to_string());
        }

        let options = Self { entries };

        for key in options.unrecognized_keys() {
            tracing::warn!(key, "ignoring unrecognized generator option");
        }

        Ok(options)
    }

    /// Returns the value of an option, if present.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Returns `true` if no options were given.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of parsed options.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Iterates over the parsed options in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Keys that were given but have no defined effect.
    pub fn unrecognized_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|key| !Self::RECOGNIZED_KEYS.contains(key))
    }

    /// Template variables the options contribute to every emitted block.
    ///
    /// Each recognized key that was given becomes a variable of the same
    /// name; unrecognized keys never reach a template.
    #[must_use]
    pub fn vars(&self) -> BTreeMap<&'static str, String> {
        Self::RECOGNIZED_KEYS
            .iter()
            .filter_map(|&key| self.get(key).map(|value| (key, value.to_string())))
            .collect()
    }
}

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;

/// Variable that switches the crate into test mode.
pub const TEST_MODE_KEY: &str = "APP_ENV";
/// Value of [`TEST_MODE_KEY`] that silences report logging.
pub const TEST_MODE_VALUE: &str = "test";

/// An explicit, insertion-ordered set of environment variables.
///
/// Keys are case-sensitive. Iteration order is the order variables were first
/// inserted; the substitution pass walks targets in that order and uses it to
/// break ties between equally long source keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Environment {
    vars: IndexMap<String, String>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current process environment. Entries that are not valid
    /// UTF-8 are skipped.
    pub fn from_process() -> Self {
        std::env::vars_os()
            .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
            .collect()
    }

    /// Parses a JSON object of string values, e.g. `{"FOO": "bar"}`.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }

    /// Inserts or overwrites `key`. An existing key keeps its position.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.vars.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.vars.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.vars.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.vars.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// True when `APP_ENV=test`.
    pub fn is_test_mode(&self) -> bool {
        self.get(TEST_MODE_KEY) == Some(TEST_MODE_VALUE)
    }

    /// Copies the given keys into the process environment. Unknown keys are ignored.
    pub fn apply_to_process<'a>(&self, keys: impl IntoIterator<Item = &'a str>) {
        for key in keys {
            if let Some(value) = self.get(key) {
                std::env::set_var(key, value);
            }
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Environment {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        env.extend(iter);
        env
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Environment {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.set(k, v);
        }
    }
}

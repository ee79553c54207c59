//! Search limits.

use serde::{Deserialize, Serialize};

/// Limits applied when searching and rewriting whole files.
///
/// Every field has a default, so a configuration file only needs to name the
/// limits it changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Most matches reported for one file.
    pub max_matches: usize,
    /// Largest file, in bytes, that callers should hand to the parser.
    pub max_file_bytes: u64,
}

impl SearchConfig {
    /// Default for [`SearchConfig::max_matches`].
    pub const DEFAULT_MAX_MATCHES: usize = 10_000;
    /// Default for [`SearchConfig::max_file_bytes`]: 4 MiB.
    pub const DEFAULT_MAX_FILE_BYTES: u64 = 4 * 1024 * 1024;

    /// Returns this configuration with a different match cap.
    #[must_use]
    pub const fn with_max_matches(mut self, max_matches: usize) -> Self {
        self.max_matches = max_matches;
        self
    }

    /// Returns whether a file of `len` bytes is within the size limit.
    #[must_use]
    pub const fn admits(&self, len: u64) -> bool {
        len <= self.max_file_bytes
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_matches: Self::DEFAULT_MAX_MATCHES,
            max_file_bytes: Self::DEFAULT_MAX_FILE_BYTES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: SearchConfig =
            serde_json::from_str(r#"{ "max_matches": 5 }"#).expect("valid config");
        assert_eq!(config.max_matches, 5);
        assert_eq!(config.max_file_bytes, SearchConfig::DEFAULT_MAX_FILE_BYTES);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let result = serde_json::from_str::<SearchConfig>(r#"{ "max_match": 5 }"#);
        assert!(result.is_err());
    }

    #[test]
    fn file_size_limit_is_inclusive() {
        let config = SearchConfig::default();
        assert!(config.admits(SearchConfig::DEFAULT_MAX_FILE_BYTES));
        assert!(!config.admits(SearchConfig::DEFAULT_MAX_FILE_BYTES + 1));
    }
}

//! Parser configuration.
//!
//! Limits that keep recursive descent bounded on hostile or generated input.

/// Default cap on nested type/generic/bracket depth.
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 64;

/// Default cap on source size accepted by callers that read files (8 MiB).
pub const DEFAULT_MAX_SOURCE_LEN: usize = 8 * 1024 * 1024;

/// Parser configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum nesting of types, parameter clauses and type bodies before failing closed
    pub max_nesting_depth: usize,
    /// Largest source (in bytes) that file-level callers should hand to the parser
    pub max_source_len: usize,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            max_nesting_depth: DEFAULT_MAX_NESTING_DEPTH,
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
        }
    }
}

impl ParseConfig {
    /// Create a new config with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_nesting_depth(mut self, depth: usize) -> Self {
        self.max_nesting_depth = depth;
        self
    }

    /// Set the maximum source length
    pub fn with_max_source_len(mut self, len: usize) -> Self {
        self.max_source_len = len;
        self
    }

    /// Return `true` if a source of `len` bytes is within the configured limit.
    pub fn accepts_source_len(&self, len: usize) -> bool {
        len <= self.max_source_len
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_nesting_depth() {
        let config = ParseConfig::default();
        assert_eq!(config.max_nesting_depth, 64);
    }

    #[test]
    fn test_default_config_source_len() {
        let config = ParseConfig::default();
        assert_eq!(config.max_source_len, 8 * 1024 * 1024);
    }

    #[test]
    fn test_new_equals_default() {
        assert_eq!(ParseConfig::new(), ParseConfig::default());
    }

    #[test]
    fn test_with_max_nesting_depth() {
        let config = ParseConfig::new().with_max_nesting_depth(3);
        assert_eq!(config.max_nesting_depth, 3);
        // Other fields unchanged
        assert_eq!(config.max_source_len, DEFAULT_MAX_SOURCE_LEN);
    }

    #[test]
    fn test_with_max_source_len() {
        let config = ParseConfig::new().with_max_source_len(10);
        assert!(config.accepts_source_len(10));
        assert!(!config.accepts_source_len(11));
    }

    #[test]
    fn test_builder_chaining() {
        let config = ParseConfig::new().with_max_nesting_depth(1).with_max_source_len(0);
        assert_eq!(config.max_nesting_depth, 1);
        assert_eq!(config.max_source_len, 0);
    }
}

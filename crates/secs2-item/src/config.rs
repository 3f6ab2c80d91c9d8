//! Codec configuration.

use crate::Jis8Charset;
use serde::{Deserialize, Serialize};

/// Default limit on list nesting accepted by the decoder.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Settings shared by encoding and decoding.
///
/// Deserializable so a host application can embed it in its own config file;
/// missing fields take their defaults.
///
/// ```yaml
/// jis8: jis_x0201
/// max_depth: 16
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Character set for JIS-8 items.
    pub jis8: Jis8Charset,
    /// Deepest list nesting the decoder accepts.
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        CodecConfig {
            jis8: Jis8Charset::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl CodecConfig {
    /// Use `jis8` for JIS-8 items.
    pub fn with_jis8(mut self, jis8: Jis8Charset) -> Self {
        self.jis8 = jis8;
        self
    }

    /// Limit list nesting to `max_depth`.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = CodecConfig::default();
        assert_eq!(config.jis8, Jis8Charset::Utf8);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_yaml_partial() {
        let config: CodecConfig = serde_yaml::from_str("jis8: jis_x0201\n").unwrap();
        assert_eq!(config.jis8, Jis8Charset::JisX0201);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);

        let config: CodecConfig = serde_yaml::from_str("max_depth: 4\n").unwrap();
        assert_eq!(config, CodecConfig::default().with_max_depth(4));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = CodecConfig::default().with_jis8(Jis8Charset::JisX0201);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"jis8":"jis_x0201","max_depth":64}"#);
        let parsed: CodecConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}

use std::{fs, path::Path};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Tunables shared by the store, the full-text cache and the binary.
///
/// Every field has a default, so a config file only needs the keys it overrides:
///
/// ```
/// use corpus_search::SearchConfig;
/// let config = SearchConfig::from_json_str(r#"{ "context": 60 }"#).unwrap();
/// assert_eq!(config.context, 60);
/// assert_eq!(config.top_k, 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// characters of context on each side of a match
    pub context: usize,
    /// number of documents returned by a ranked query
    pub top_k: usize,
    /// joins document bodies in the full-text cache
    pub separator: char,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            context: 40,
            top_k: 5,
            separator: '\n',
        }
    }
}

impl SearchConfig {
    pub fn from_json_str(s: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }

    /// The separator must never be part of a word, so the joined text keeps a
    /// word boundary between every pair of documents.
    pub fn validate(&self) -> Result<()> {
        if is_word_char(self.separator)? {
            return Err(Error::InvalidSeparator(self.separator));
        }
        Ok(())
    }
}

/// Whether `c` is in the Unicode `\w` class, the same class `\b` uses, so
/// this covers connector punctuation and combining marks too.
fn is_word_char(c: char) -> Result<bool> {
    let word = Regex::new(r"\A\w\z")?;
    Ok(word.is_match(c.encode_utf8(&mut [0; 4])))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SearchConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SearchConfig::default());
    }

    #[test]
    fn word_separator_is_rejected() {
        let res = SearchConfig::from_json_str(r#"{ "separator": "x" }"#);
        assert!(matches!(res, Err(Error::InvalidSeparator('x'))));
        let res = SearchConfig::from_json_str(r#"{ "separator": "_" }"#);
        assert!(matches!(res, Err(Error::InvalidSeparator('_'))));
    }

    #[test]
    fn separator_follows_the_regex_word_class() {
        // undertie (connector punctuation) and a combining acute accent
        for c in ['\u{203F}', '\u{0301}', 'é', '7'] {
            let config = SearchConfig { separator: c, ..SearchConfig::default() };
            assert!(matches!(config.validate(), Err(Error::InvalidSeparator(s)) if s == c));
        }
        for c in ['\n', '|', '\u{1E}', ' '] {
            let config = SearchConfig { separator: c, ..SearchConfig::default() };
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let res = SearchConfig::from_json_str("{ context: }");
        assert!(matches!(res, Err(Error::Config(_))));
    }
}

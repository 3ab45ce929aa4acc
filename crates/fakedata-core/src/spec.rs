use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One parsed field specifier: `[name=]key[:options]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Display name of the column; defaults to `key`.
    pub name: String,
    /// Generator key looked up in the registry.
    pub key: String,
    /// Raw, generator-specific option text. Empty when absent.
    pub options: String,
}

impl FieldSpec {
    /// Parse a specifier token.
    ///
    /// The token is split on the first `:` (so options may contain further
    /// colons), then the left part on the first `=`.
    pub fn parse(token: &str) -> Result<Self> {
        let (head, options) = match token.split_once(':') {
            Some((head, options)) => (head, options),
            None => (token, ""),
        };

        let (name, key) = match head.split_once('=') {
            Some((name, key)) => (name, key),
            None => (head, head),
        };

        if key.is_empty() {
            return Err(Error::InvalidSpecifier {
                token: token.to_string(),
                reason: "missing generator key".to_string(),
            });
        }

        if name.is_empty() {
            return Err(Error::InvalidSpecifier {
                token: token.to_string(),
                reason: "empty column name".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            key: key.to_string(),
            options: options.to_string(),
        })
    }
}

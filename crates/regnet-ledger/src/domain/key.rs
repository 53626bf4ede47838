//! # Composite Keys
//!
//! Identity keys are ordered sequences of scalar parts. Each part is
//! JSON-encoded on its own and the encoded parts are joined with `:`:
//!
//! ```text
//! ["P1", "Alice", "A123"]  →  "P1":"Alice":"A123"
//! ```
//!
//! A `:` inside a value is always enclosed in a JSON string literal, so the
//! join can be reversed unambiguously.
//!
//! The physical ledger key adds the namespace and uses `\0` delimiters:
//!
//! ```text
//! \0{namespace}\0"P1"\0"Alice"\0"A123"\0
//! ```
//!
//! JSON escapes every control character, so an encoded part never contains
//! `\0`. Because every part is terminated, a byte-prefix scan over physical
//! keys matches whole parts only.

use crate::domain::errors::KeyError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between encoded parts of an identity key.
pub const PART_SEPARATOR: char = ':';

/// Delimiter used in physical ledger keys.
pub const PHYSICAL_DELIMITER: char = '\u{0}';

// =============================================================================
// KEY PART
// =============================================================================

/// A single scalar component of a composite key.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyPart {
    /// A string value.
    Text(String),
    /// An integer value.
    Integer(i64),
}

impl KeyPart {
    /// Canonical JSON token for this part.
    #[must_use]
    pub fn to_token(&self) -> String {
        match self {
            Self::Text(text) => serde_json::Value::String(text.clone()).to_string(),
            Self::Integer(value) => value.to_string(),
        }
    }

    /// Parse exactly one canonical JSON token.
    pub fn from_token(token: &str) -> Result<Self, KeyError> {
        let value: serde_json::Value =
            serde_json::from_str(token).map_err(|e| KeyError::Malformed {
                input: token.to_string(),
                reason: e.to_string(),
            })?;
        let part = Self::try_from(value)?;
        if part.to_token() != token {
            return Err(KeyError::NonCanonical(token.to_string()));
        }
        Ok(part)
    }
}

impl TryFrom<serde_json::Value> for KeyPart {
    type Error = KeyError;

    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        match value {
            serde_json::Value::String(text) => Ok(Self::Text(text)),
            serde_json::Value::Number(number) => number
                .as_i64()
                .map(Self::Integer)
                .ok_or_else(|| KeyError::UnsupportedPart(number.to_string())),
            other => Err(KeyError::UnsupportedPart(other.to_string())),
        }
    }
}

impl From<&str> for KeyPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for KeyPart {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&String> for KeyPart {
    fn from(value: &String) -> Self {
        Self::Text(value.clone())
    }
}

impl From<i64> for KeyPart {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl fmt::Display for KeyPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Integer(value) => write!(f, "{value}"),
        }
    }
}

// =============================================================================
// COMPOSITE KEY
// =============================================================================

/// An ordered sequence of key parts. Used for full keys and partial prefixes.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CompositeKey {
    parts: Vec<KeyPart>,
}

impl CompositeKey {
    /// Build a key from ordered parts.
    pub fn new<I, P>(parts: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<KeyPart>,
    {
        Self {
            parts: parts.into_iter().map(Into::into).collect(),
        }
    }

    /// The parts of this key, in order.
    #[must_use]
    pub fn parts(&self) -> &[KeyPart] {
        &self.parts
    }

    /// Number of parts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Returns true if the key has no parts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns true if every part of `self` equals the leading parts of `other`.
    #[must_use]
    pub fn is_prefix_of(&self, other: &CompositeKey) -> bool {
        other.parts.starts_with(&self.parts)
    }

    /// Encode as `token:token:...`.
    #[must_use]
    pub fn encode(&self) -> String {
        self.parts
            .iter()
            .map(KeyPart::to_token)
            .collect::<Vec<_>>()
            .join(&PART_SEPARATOR.to_string())
    }

    /// Decode a string produced by [`CompositeKey::encode`].
    pub fn decode(encoded: &str) -> Result<Self, KeyError> {
        if encoded.is_empty() {
            return Ok(Self::default());
        }

        let mut parts = Vec::new();
        let mut rest = encoded;
        loop {
            let mut stream =
                serde_json::Deserializer::from_str(rest).into_iter::<serde_json::Value>();
            let value = match stream.next() {
                Some(Ok(value)) => value,
                Some(Err(e)) => {
                    return Err(KeyError::Malformed {
                        input: encoded.to_string(),
                        reason: e.to_string(),
                    })
                }
                None => {
                    return Err(KeyError::Malformed {
                        input: encoded.to_string(),
                        reason: "missing key part".to_string(),
                    })
                }
            };
            let consumed = stream.byte_offset();
            let token = &rest[..consumed];
            let part = KeyPart::try_from(value)?;
            if part.to_token() != token {
                return Err(KeyError::NonCanonical(token.to_string()));
            }
            parts.push(part);

            rest = &rest[consumed..];
            if rest.is_empty() {
                break;
            }
            rest = rest
                .strip_prefix(PART_SEPARATOR)
                .ok_or_else(|| KeyError::Malformed {
                    input: encoded.to_string(),
                    reason: format!("expected '{PART_SEPARATOR}' after part {}", parts.len()),
                })?;
            if rest.is_empty() {
                return Err(KeyError::Malformed {
                    input: encoded.to_string(),
                    reason: "dangling separator".to_string(),
                });
            }
        }

        Ok(Self { parts })
    }

    /// Physical ledger key for this key under `namespace`.
    ///
    /// Partial keys produce a prefix of every full key that extends them.
    pub fn to_physical(&self, namespace: &str) -> Result<String, KeyError> {
        validate_namespace(namespace)?;
        let mut physical = String::with_capacity(namespace.len() + 2 + self.parts.len() * 16);
        physical.push(PHYSICAL_DELIMITER);
        physical.push_str(namespace);
        physical.push(PHYSICAL_DELIMITER);
        for part in &self.parts {
            physical.push_str(&part.to_token());
            physical.push(PHYSICAL_DELIMITER);
        }
        Ok(physical)
    }

    /// Split a physical key back into its namespace and composite key.
    pub fn from_physical(physical: &str) -> Result<(String, Self), KeyError> {
        let body = physical
            .strip_prefix(PHYSICAL_DELIMITER)
            .and_then(|rest| rest.strip_suffix(PHYSICAL_DELIMITER))
            .ok_or_else(|| KeyError::Malformed {
                input: physical.escape_default().to_string(),
                reason: "physical key must start and end with a delimiter".to_string(),
            })?;

        let mut segments = body.split(PHYSICAL_DELIMITER);
        let namespace = segments.next().unwrap_or_default().to_string();
        validate_namespace(&namespace)?;

        let parts = segments
            .map(KeyPart::from_token)
            .collect::<Result<Vec<_>, _>>()?;
        Ok((namespace, Self { parts }))
    }
}

impl fmt::Display for CompositeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

impl From<Vec<KeyPart>> for CompositeKey {
    fn from(parts: Vec<KeyPart>) -> Self {
        Self { parts }
    }
}

fn validate_namespace(namespace: &str) -> Result<(), KeyError> {
    if namespace.is_empty() || namespace.contains(PHYSICAL_DELIMITER) {
        return Err(KeyError::InvalidNamespace(namespace.escape_default().to_string()));
    }
    Ok(())
}

// =============================================================================
// TESTS
// =============================================================================

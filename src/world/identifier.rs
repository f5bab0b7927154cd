//! Namespaced Identifier
//!
//! Resource locations such as `minecraft:zombie`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::shared::error::IdentifierError;

/// Namespace used when an identifier string has none
pub const DEFAULT_NAMESPACE: &str = "minecraft";

/// A namespace and a value.
///
/// Namespaces match `[0-9a-z_-]+` and values match `[0-9a-z_/.-]+`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identifier {
    namespace: String,
    value: String,
}

fn is_namespace_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_ascii_lowercase() || c == '_' || c == '-'
}

fn is_value_char(c: char) -> bool {
    is_namespace_char(c) || c == '/' || c == '.'
}

impl Identifier {
    pub fn new(
        namespace: impl Into<String>,
        value: impl Into<String>,
    ) -> Result<Self, IdentifierError> {
        let namespace = namespace.into();
        let value = value.into();

        if namespace.is_empty() || !namespace.chars().all(is_namespace_char) {
            return Err(IdentifierError::InvalidNamespace(namespace));
        }
        if value.is_empty() || !value.chars().all(is_value_char) {
            return Err(IdentifierError::InvalidValue(value));
        }

        Ok(Self { namespace, value })
    }

    /// Identifier from parts already known to be valid
    pub(crate) fn from_static(namespace: &'static str, value: &'static str) -> Self {
        debug_assert!(Self::new(namespace, value).is_ok());
        Self {
            namespace: namespace.to_string(),
            value: value.to_string(),
        }
    }

    /// Identifier in the default namespace
    pub fn minecraft(value: impl Into<String>) -> Result<Self, IdentifierError> {
        Self::new(DEFAULT_NAMESPACE, value)
    }

    /// Parse `namespace:value` or a bare `value`.
    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        if input.is_empty() {
            return Err(IdentifierError::Empty);
        }

        let mut parts = input.splitn(3, ':');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(value), None, None) => Self::minecraft(value),
            (Some(namespace), Some(value), None) => Self::new(namespace, value),
            _ => Err(IdentifierError::TooManySeparators(input.to_string())),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.namespace, self.value)
    }
}

impl FromStr for Identifier {
    type Err = IdentifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Identifier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Identifier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Self::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn id(namespace: &str, value: &str) -> Identifier {
        Identifier::new(namespace, value).unwrap()
    }

    // ==========================================================================
    // Parsing
    // ==========================================================================

    #[test_case("minecraft:zombie", "minecraft", "zombie" ; "explicit default namespace")]
    #[test_case("diorite:player", "diorite", "player" ; "custom namespace")]
    #[test_case("zombie", "minecraft", "zombie" ; "bare value")]
    #[test_case("minecraft:textures/block/stone.png", "minecraft", "textures/block/stone.png" ; "path value")]
    fn test_parse_valid(input: &str, namespace: &str, value: &str) {
        assert_eq!(Identifier::parse(input).unwrap(), id(namespace, value));
    }

    #[test_case("diorite=:player" ; "invalid namespace char")]
    #[test_case("diorite/:player" ; "slash in namespace")]
    #[test_case("diorite:player=" ; "invalid value char")]
    #[test_case("a:b:c" ; "two separators")]
    #[test_case("Diorite:player" ; "uppercase namespace")]
    #[test_case(":player" ; "empty namespace")]
    #[test_case("diorite:" ; "empty value")]
    #[test_case("" ; "empty input")]
    fn test_parse_invalid(input: &str) {
        assert!(Identifier::parse(input).is_err());
    }

    // ==========================================================================
    // Formatting
    // ==========================================================================

    #[test_case("minecraft", "minecraft-zombie", "minecraft:minecraft-zombie")]
    #[test_case("minecraft", "zombie", "minecraft:zombie")]
    #[test_case("diorite", "diorite", "diorite:diorite")]
    fn test_display(namespace: &str, value: &str, expected: &str) {
        assert_eq!(id(namespace, value).to_string(), expected);
    }

    #[test]
    fn test_serde_uses_string_form() {
        let identifier = id("diorite", "player");
        let json = serde_json::to_string(&identifier).unwrap();
        assert_eq!(json, "\"diorite:player\"");

        let back: Identifier = serde_json::from_str(&json).unwrap();
        assert_eq!(back, identifier);

        assert!(serde_json::from_str::<Identifier>("\"Bad:Value\"").is_err());
    }
}

//! Dimensions

use std::fmt;

use super::identifier::{Identifier, DEFAULT_NAMESPACE};
use crate::shared::error::IdentifierError;

/// A world dimension such as `minecraft:overworld`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Dimension {
    identifier: Identifier,
}

impl Dimension {
    pub fn new(identifier: Identifier) -> Self {
        Self { identifier }
    }

    fn vanilla(value: &'static str) -> Self {
        Self::new(Identifier::from_static(DEFAULT_NAMESPACE, value))
    }

    pub fn overworld() -> Self {
        Self::vanilla("overworld")
    }

    pub fn the_nether() -> Self {
        Self::vanilla("the_nether")
    }

    pub fn the_end() -> Self {
        Self::vanilla("the_end")
    }

    pub fn parse(input: &str) -> Result<Self, IdentifierError> {
        Identifier::parse(input).map(Self::new)
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    /// Dimension name without its namespace
    pub fn name(&self) -> &str {
        self.identifier.value()
    }
}

impl From<Identifier> for Dimension {
    fn from(identifier: Identifier) -> Self {
        Self::new(identifier)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.identifier.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vanilla_dimensions() {
        assert_eq!(Dimension::overworld().to_string(), "minecraft:overworld");
        assert_eq!(Dimension::the_nether().name(), "the_nether");
        assert_eq!(Dimension::parse("the_end").unwrap(), Dimension::the_end());
    }
}

//! Client-supplied repository identifiers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::InputError;

/// Maximum length of a whole identifier, in bytes.
const MAX_IDENTIFIER_LEN: usize = 255;

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9][A-Za-z0-9._-]{0,63}$").expect("component pattern is valid")
});

/// An opaque token naming a repository.
///
/// Identifiers may be namespaced: `kde/frameworks-kcoreaddons` is two
/// components. Each component starts with an alphanumeric character, so `.`
/// and `..` can never appear and the identifier is safe to join onto a
/// directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct RepositoryIdentifier(String);

impl RepositoryIdentifier {
    /// Validates and wraps a raw identifier.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Identifier`] if the text is empty, too long, or
    /// has a component outside the allowed character class.
    pub fn parse(raw: &str) -> Result<Self, InputError> {
        let valid = !raw.is_empty()
            && raw.len() <= MAX_IDENTIFIER_LEN
            && raw.split('/').all(|component| COMPONENT.is_match(component));

        if valid {
            Ok(Self(raw.to_string()))
        } else {
            Err(InputError::Identifier(raw.to_string()))
        }
    }

    /// Returns the identifier text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the `/`-separated components.
    pub fn components(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for RepositoryIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let id = RepositoryIdentifier::parse("frameworks-kcoreaddons").unwrap();
        assert_eq!(id.as_str(), "frameworks-kcoreaddons");
    }

    #[test]
    fn test_parse_namespaced() {
        let id = RepositoryIdentifier::parse("kde/frameworks/kcoreaddons").unwrap();
        let components: Vec<_> = id.components().collect();
        assert_eq!(components, vec!["kde", "frameworks", "kcoreaddons"]);
    }

    #[test]
    fn test_parse_allows_dots_and_underscores_inside() {
        assert!(RepositoryIdentifier::parse("a1b2c3_d.e-f").is_ok());
    }

    #[test]
    fn test_parse_rejects_empty() {
        assert!(RepositoryIdentifier::parse("").is_err());
    }

    #[test]
    fn test_parse_rejects_traversal() {
        assert!(RepositoryIdentifier::parse("..").is_err());
        assert!(RepositoryIdentifier::parse("a/../b").is_err());
        assert!(RepositoryIdentifier::parse("./a").is_err());
    }

    #[test]
    fn test_parse_rejects_empty_component() {
        assert!(RepositoryIdentifier::parse("a//b").is_err());
        assert!(RepositoryIdentifier::parse("/a").is_err());
        assert!(RepositoryIdentifier::parse("a/").is_err());
    }

    #[test]
    fn test_parse_rejects_disallowed_characters() {
        assert!(RepositoryIdentifier::parse("a b").is_err());
        assert!(RepositoryIdentifier::parse("a%2e").is_err());
        assert!(RepositoryIdentifier::parse("a\\b").is_err());
    }

    #[test]
    fn test_parse_rejects_overlong() {
        let long = "a".repeat(300);
        assert!(RepositoryIdentifier::parse(&long).is_err());

        let long_component = "a".repeat(65);
        assert!(RepositoryIdentifier::parse(&long_component).is_err());
    }

    #[test]
    fn test_display() {
        let id = RepositoryIdentifier::parse("kdelibs").unwrap();
        assert_eq!(id.to_string(), "kdelibs");
    }
}

use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// The caller-facing key of a mapping.
///
/// Aliases are compared byte for byte, so `Ex1` and `ex1` are distinct keys.
/// The only structural rule is that an alias is never empty.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alias(String);

impl Alias {
    /// Creates a new `Alias` after checking that it is not empty.
    pub fn new(alias: impl Into<String>) -> Result<Self, CoreError> {
        let alias = alias.into();
        if alias.is_empty() {
            return Err(CoreError::InvalidAlias("alias must not be empty".to_string()));
        }
        Ok(Self(alias))
    }

    /// Creates an `Alias` without validation.
    ///
    /// Use this only for values produced by trusted internal sources such as
    /// a generator or a row already read back from storage.
    pub fn new_unchecked(alias: impl Into<String>) -> Self {
        Self(alias.into())
    }

    /// Returns the alias as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the alias and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl AsRef<str> for Alias {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Alias {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Alias {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for Alias {
    type Error = CoreError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Alias> for String {
    fn from(value: Alias) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_empty() {
        assert_eq!(Alias::new("ex1").unwrap().as_str(), "ex1");
        assert_eq!(Alias::new("a").unwrap().as_str(), "a");
    }

    #[test]
    fn rejects_empty() {
        let err = Alias::new("").unwrap_err();
        assert!(matches!(err, CoreError::InvalidAlias(_)));
    }

    #[test]
    fn comparison_is_case_sensitive() {
        assert_ne!(Alias::new("Ex1").unwrap(), Alias::new("ex1").unwrap());
    }

    #[test]
    fn display_is_the_raw_value() {
        let alias = Alias::new("my-link").unwrap();
        assert_eq!(alias.to_string(), "my-link");
    }

    #[test]
    fn deserialize_validates() {
        let alias: Alias = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(alias.as_str(), "abc");
        assert!(serde_json::from_str::<Alias>("\"\"").is_err());
    }
}

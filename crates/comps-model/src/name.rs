#![deny(unsafe_code)]

use std::fmt;

use crate::ModelError;

/// A user-facing comp set name.
///
/// The display form is kept as typed (trimmed). [`CompSetName::key`] is the
/// filesystem-safe form used to address the persisted file; every character
/// outside `[A-Za-z0-9_-]` becomes `_`, so path separators and dots never
/// reach the filesystem.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(try_from = "String", into = "String")]
pub struct CompSetName(String);

impl CompSetName {
    pub fn new(value: impl Into<String>) -> Result<Self, ModelError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ModelError::EmptyCompSetName);
        }
        if !trimmed.chars().any(is_key_char) {
            return Err(ModelError::UnusableCompSetName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe storage key derived from the display name.
    pub fn key(&self) -> String {
        sanitize_key(&self.0)
    }

    /// Whether two names address the same persisted comp set.
    pub fn same_key(&self, other: &CompSetName) -> bool {
        self.key() == other.key()
    }
}

/// Replace everything outside `[A-Za-z0-9_-]` with `_`.
pub fn sanitize_key(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|ch| if is_key_char(ch) { ch } else { '_' })
        .collect()
}

fn is_key_char(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '-' || ch == '_'
}

impl TryFrom<String> for CompSetName {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<CompSetName> for String {
    fn from(name: CompSetName) -> Self {
        name.0
    }
}

impl fmt::Display for CompSetName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_keeps_display_form() {
        let name = CompSetName::new("  Q1 Final ").unwrap();
        assert_eq!(name.as_str(), "Q1 Final");
        assert_eq!(name.key(), "Q1_Final");
    }

    #[test]
    fn path_traversal_is_neutralized() {
        let name = CompSetName::new("../../etc/passwd").unwrap();
        assert_eq!(name.key(), "______etc_passwd");
        assert!(!name.key().contains('/'));
        assert!(!name.key().contains('.'));
    }

    #[test]
    fn rejects_empty_and_unusable_names() {
        assert_eq!(CompSetName::new("   "), Err(ModelError::EmptyCompSetName));
        assert!(matches!(
            CompSetName::new("../"),
            Err(ModelError::UnusableCompSetName(_))
        ));
    }

    #[test]
    fn hyphen_and_underscore_survive() {
        let name = CompSetName::new("sa-downtown_2024").unwrap();
        assert_eq!(name.key(), "sa-downtown_2024");
    }
}

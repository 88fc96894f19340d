use std::{fmt, ops::Deref, str::FromStr};

use non_empty_string::NonEmptyString;
use serde::{Deserialize, Serialize};

/// A validated project tag shortcut, such as `COMP` or `BIO`.
///
/// Shortcuts are non-empty and contain neither whitespace nor the `|` row
/// delimiter used by the configuration tables.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagShortcut(NonEmptyString);

impl TagShortcut {
    /// Creates a new `TagShortcut` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidShortcutError` if the string is empty or contains
    /// whitespace or `|`.
    pub fn new(s: String) -> Result<Self, InvalidShortcutError> {
        if s.chars().any(|c| c.is_whitespace() || c == '|') {
            return Err(InvalidShortcutError(s));
        }

        let non_empty = NonEmptyString::new(s.clone()).map_err(|_| InvalidShortcutError(s))?;
        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for TagShortcut {
    type Error = InvalidShortcutError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl FromStr for TagShortcut {
    type Err = InvalidShortcutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl AsRef<str> for TagShortcut {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for TagShortcut {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.0.as_str()
    }
}

impl fmt::Display for TagShortcut {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for TagShortcut {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TagShortcut {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a string is not a valid tag shortcut.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid tag shortcut '{0}': must be non-empty and contain no whitespace or '|'")]
pub struct InvalidShortcutError(String);

/// Normalizes an infobox or project name for table lookups.
///
/// Lower-cases, treats `_` as a space, and collapses runs of whitespace, so
/// `Infobox_Software` and `infobox   software` share a key.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    name.replace('_', " ")
        .split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

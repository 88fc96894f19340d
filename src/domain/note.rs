use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A document-level quality or attention flag.
///
/// Variants are declared in rule evaluation order, so an ordered set of notes
/// lists them the way the classifier checks them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Note {
    /// The draft carries a suspected copyright violation marker.
    Copyvio,
    /// The draft links to outside sources but has no inline citations.
    NoInline,
    /// The draft has neither inline citations nor external links.
    Unsourced,
    /// The draft is below the length threshold.
    Short,
    /// The draft was declined at least once before.
    Resubmit,
    /// The draft has been waiting for review for a very long time.
    Veryold,
    /// The draft lives in a user's personal namespace.
    Userspace,
}

impl Note {
    /// Every note, in evaluation order.
    pub const ALL: [Self; 7] = [
        Self::Copyvio,
        Self::NoInline,
        Self::Unsourced,
        Self::Short,
        Self::Resubmit,
        Self::Veryold,
        Self::Userspace,
    ];

    /// The stable identifier used in reports and filters.
    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::Copyvio => "copyvio",
            Self::NoInline => "no-inline",
            Self::Unsourced => "unsourced",
            Self::Short => "short",
            Self::Resubmit => "resubmit",
            Self::Veryold => "veryold",
            Self::Userspace => "userspace",
        }
    }

    /// A human-readable description for filter labels.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Copyvio => "Suspected copyright violation",
            Self::NoInline => "No inline citations",
            Self::Unsourced => "Completely unsourced",
            Self::Short => "Short submission",
            Self::Resubmit => "Previously declined",
            Self::Veryold => "Waiting a very long time",
            Self::Userspace => "In userspace",
        }
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Note {
    type Err = UnknownNoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|note| note.id() == s)
            .ok_or_else(|| UnknownNoteError(s.to_string()))
    }
}

/// Error returned when parsing an unknown note identifier.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Unknown note '{0}'")]
pub struct UnknownNoteError(String);

use serde::{Deserialize, Serialize};

/// A draft submission handed to the classifier.
///
/// Documents are produced by the snapshot source and are never modified by
/// classification.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Document {
    /// The full title, including the namespace prefix.
    pub title: String,

    /// Raw wikitext of the draft.
    pub text: String,

    /// Whether the page is a redirect.
    #[serde(default)]
    pub redirect: bool,

    /// Names of the categories the page belongs to.
    #[serde(default)]
    pub categories: Vec<String>,

    /// The associated talk page, if it exists.
    #[serde(default)]
    pub talk: Option<TalkPage>,
}

/// The discussion page attached to a draft.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TalkPage {
    /// Raw wikitext of the talk page.
    pub text: String,

    /// Whether the talk page is a redirect.
    #[serde(default)]
    pub redirect: bool,
}

impl Document {
    /// Creates a document with the given title and text and no metadata.
    #[must_use]
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Adds a category membership.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Attaches a talk page.
    #[must_use]
    pub fn with_talk(mut self, text: impl Into<String>) -> Self {
        self.talk = Some(TalkPage {
            text: text.into(),
            redirect: false,
        });
        self
    }

    /// Returns the talk page text when it can carry project banners.
    ///
    /// Missing, redirecting and empty talk pages yield `None`.
    #[must_use]
    pub fn banner_source(&self) -> Option<&str> {
        self.talk
            .as_ref()
            .filter(|talk| !talk.redirect && !talk.text.trim().is_empty())
            .map(|talk| talk.text.as_str())
    }
}

use std::{io, path::Path};

use serde::{Deserialize, Serialize};

/// Settings that control how drafts are selected and classified.
///
/// Every field has a default matching the production deployment. A missing
/// or blank settings file yields the defaults; otherwise the file must carry
/// `_version = "1"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Versions", into = "Versions")]
pub struct Settings {
    /// Titles that are never classified, even when they sit in the pending
    /// category.
    pub disallowed_titles: Vec<String>,

    /// Drafts whose text is shorter than this many bytes get the `short`
    /// note.
    pub short_threshold: usize,

    /// Suffix of the category marking drafts that have waited a very long
    /// time.
    pub very_old_marker: String,

    /// Title prefix of the personal namespace.
    pub userspace_prefix: String,

    /// Emit a progress line after this many documents.
    pub progress_interval: usize,

    /// The only account allowed to have last edited the configuration
    /// tables.
    pub trusted_editor: String,

    /// The line separating the infobox section from the project name section.
    pub section_delimiter: String,

    /// Domain of the wiki itself. Links to it are not treated as sources.
    pub host_domain: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            disallowed_titles: default_disallowed_titles(),
            short_threshold: default_short_threshold(),
            very_old_marker: default_very_old_marker(),
            userspace_prefix: default_userspace_prefix(),
            progress_interval: default_progress_interval(),
            trusted_editor: default_trusted_editor(),
            section_delimiter: default_section_delimiter(),
            host_domain: default_host_domain(),
        }
    }
}

impl Settings {
    /// Loads the settings from a TOML file at the given path.
    ///
    /// A file containing only whitespace yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(toml::from_str(&content)?)
    }

    /// Loads the settings from `path` if it exists, or falls back to the
    /// defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            tracing::debug!("No settings at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Checks whether a title is excluded from classification.
    #[must_use]
    pub fn is_disallowed(&self, title: &str) -> bool {
        self.disallowed_titles.iter().any(|t| t == title)
    }
}

/// Errors that can occur when loading settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("Failed to read settings file: {0}")]
    Io(#[from] io::Error),
    /// The settings file is not valid TOML for this format.
    #[error("Failed to parse settings file: {0}")]
    Toml(#[from] toml::de::Error),
}

fn default_disallowed_titles() -> Vec<String> {
    vec![
        "Wikipedia:Articles for creation/Redirects".to_string(),
        "Wikipedia:Files for upload".to_string(),
    ]
}

const fn default_short_threshold() -> usize {
    1000
}

fn default_very_old_marker() -> String {
    "Very old".to_string()
}

fn default_userspace_prefix() -> String {
    "User:".to_string()
}

const fn default_progress_interval() -> usize {
    100
}

fn default_trusted_editor() -> String {
    "PendingSubsMaintainer".to_string()
}

fn default_section_delimiter() -> String {
    "----".to_string()
}

fn default_host_domain() -> String {
    "en.wikipedia.org".to_string()
}

/// The serialized versions of the settings.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_disallowed_titles")]
        disallowed_titles: Vec<String>,

        #[serde(default = "default_short_threshold")]
        short_threshold: usize,

        #[serde(default = "default_very_old_marker")]
        very_old_marker: String,

        #[serde(default = "default_userspace_prefix")]
        userspace_prefix: String,

        /// Zero disables progress lines.
        #[serde(default = "default_progress_interval")]
        progress_interval: usize,

        #[serde(default = "default_trusted_editor")]
        trusted_editor: String,

        #[serde(default = "default_section_delimiter")]
        section_delimiter: String,

        #[serde(default = "default_host_domain")]
        host_domain: String,
    },
}

impl From<Versions> for Settings {
    fn from(versions: Versions) -> Self {
        match versions {
            Versions::V1 {
                disallowed_titles,
                short_threshold,
                very_old_marker,
                userspace_prefix,
                progress_interval,
                trusted_editor,
                section_delimiter,
                host_domain,
            } => Self {
                disallowed_titles,
                short_threshold,
                very_old_marker,
                userspace_prefix,
                progress_interval,
                trusted_editor,
                section_delimiter,
                host_domain,
            },
        }
    }
}

impl From<Settings> for Versions {
    fn from(settings: Settings) -> Self {
        let Settings {
            disallowed_titles,
            short_threshold,
            very_old_marker,
            userspace_prefix,
            progress_interval,
            trusted_editor,
            section_delimiter,
            host_domain,
        } = settings;
        Self::V1 {
            disallowed_titles,
            short_threshold,
            very_old_marker,
            userspace_prefix,
            progress_interval,
            trusted_editor,
            section_delimiter,
            host_domain,
        }
    }
}

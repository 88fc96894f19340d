//! Lookup tables built from the shared configuration page.
//!
//! The page has two sections separated by a delimiter line. The first maps
//! infobox names to one or more project shortcuts, the second maps project
//! names to a single shortcut:
//!
//! ```text
//! # infobox name | shortcut | shortcut ...
//! Infobox software|COMP
//! Infobox scientist|BIO|SCI
//! ----
//! # project name | shortcut
//! WikiProject Computing|COMP
//! ```
//!
//! Rows are maintained by hand, so a malformed row is skipped rather than
//! failing the whole parse. The editor check and the section structure are
//! not negotiable.

use std::collections::BTreeMap;

use crate::domain::{Settings, TagShortcut, normalize_name};

const COMMENT_MARKER: char = '#';
const ROW_DELIMITER: char = '|';

/// Bidirectional lookup tables between project names, shortcuts and infobox
/// names.
///
/// Built once per run and shared read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LookupTables {
    /// Shortcut to canonical display name.
    shortcut_names: BTreeMap<TagShortcut, String>,
    /// Normalized project name to shortcut.
    name_shortcuts: BTreeMap<String, TagShortcut>,
    /// Normalized infobox name to shortcuts.
    infobox_rules: BTreeMap<String, Vec<TagShortcut>>,
}

/// The configuration page was last edited by someone other than the trusted
/// editor.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("configuration was last edited by '{found}', expected '{expected}'")]
pub struct StaleConfigError {
    /// The required editor.
    pub expected: String,
    /// The editor reported by the document source.
    pub found: String,
}

/// Errors that abort building the lookup tables.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TablesError {
    /// The configuration page has not been verified by the trusted editor.
    #[error(transparent)]
    Stale(#[from] StaleConfigError),

    /// No section delimiter line was found.
    #[error("configuration has no '{0}' section delimiter")]
    MissingDelimiter(String),

    /// More than one section delimiter line was found.
    #[error("configuration has a second '{delimiter}' section delimiter on line {line}")]
    ExtraDelimiter {
        /// The delimiter string.
        delimiter: String,
        /// One-based line number of the extra delimiter.
        line: usize,
    },

    /// An infobox row refers to a shortcut with no project name.
    #[error("infobox '{infobox}' refers to unknown shortcut '{shortcut}'")]
    UnknownShortcut {
        /// The normalized infobox name.
        infobox: String,
        /// The unknown shortcut.
        shortcut: TagShortcut,
    },
}

/// A single line of the configuration page.
#[derive(Debug, PartialEq, Eq)]
enum Row<'a> {
    /// Blank line or comment.
    Skip,
    /// A name followed by at least one value.
    Entry { name: &'a str, values: Vec<&'a str> },
    /// Fewer than two non-empty tokens.
    Malformed,
}

fn parse_row(line: &str) -> Row<'_> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
        return Row::Skip;
    }

    let mut tokens = trimmed
        .split(ROW_DELIMITER)
        .map(str::trim)
        .filter(|token| !token.is_empty());

    let Some(name) = tokens.next() else {
        return Row::Malformed;
    };

    let values: Vec<_> = tokens.collect();
    if values.is_empty() {
        Row::Malformed
    } else {
        Row::Entry { name, values }
    }
}

/// Iterates the entries of one section, skipping malformed rows.
///
/// `offset` is the zero-based index of the section's first line in the page.
fn entries<'a>(
    lines: &'a [&'a str],
    offset: usize,
) -> impl Iterator<Item = (usize, &'a str, Vec<&'a str>)> + 'a {
    lines
        .iter()
        .enumerate()
        .filter_map(move |(index, &text)| match parse_row(text) {
            Row::Skip => None,
            Row::Malformed => {
                tracing::warn!(line = offset + index + 1, "Skipping malformed row: {text:?}");
                None
            }
            Row::Entry { name, values } => Some((offset + index + 1, name, values)),
        })
}

fn parse_shortcut(line: usize, token: &str) -> Option<TagShortcut> {
    TagShortcut::try_from(token)
        .inspect_err(|e| tracing::warn!(line, "Skipping shortcut: {e}"))
        .ok()
}

impl LookupTables {
    /// Parses the configuration page.
    ///
    /// # Errors
    ///
    /// - [`TablesError::Stale`] if `last_editor` is not the trusted editor
    /// - [`TablesError::MissingDelimiter`] or [`TablesError::ExtraDelimiter`]
    ///   if the page does not have exactly two sections
    /// - [`TablesError::UnknownShortcut`] if an infobox row names a shortcut
    ///   that no project row defines
    pub fn parse(last_editor: &str, text: &str, settings: &Settings) -> Result<Self, TablesError> {
        if last_editor != settings.trusted_editor {
            return Err(StaleConfigError {
                expected: settings.trusted_editor.clone(),
                found: last_editor.to_string(),
            }
            .into());
        }

        let delimiter = settings.section_delimiter.as_str();
        let lines: Vec<&str> = text.lines().collect();
        let mut delimiters = lines
            .iter()
            .enumerate()
            .filter(|(_, line)| line.trim() == delimiter)
            .map(|(index, _)| index);

        let split = delimiters
            .next()
            .ok_or_else(|| TablesError::MissingDelimiter(delimiter.to_string()))?;
        if let Some(extra) = delimiters.next() {
            return Err(TablesError::ExtraDelimiter {
                delimiter: delimiter.to_string(),
                line: extra + 1,
            });
        }

        let (infobox_lines, rest) = lines.split_at(split);
        let name_lines = &rest[1..];

        let mut tables = Self::default();

        for (line, name, values) in entries(name_lines, split + 1) {
            let Some(shortcut) = parse_shortcut(line, values[0]) else {
                continue;
            };
            if values.len() > 1 {
                tracing::debug!(line, "Ignoring extra tokens after shortcut {shortcut}");
            }
            tables.insert_project(line, name, &shortcut);
        }

        for (line, name, values) in entries(infobox_lines, 0) {
            let shortcuts: Vec<TagShortcut> = values
                .into_iter()
                .filter_map(|token| parse_shortcut(line, token))
                .collect();
            if shortcuts.is_empty() {
                continue;
            }

            let key = normalize_name(name);
            if let Some(shortcut) = shortcuts
                .iter()
                .find(|shortcut| !tables.shortcut_names.contains_key(*shortcut))
            {
                return Err(TablesError::UnknownShortcut {
                    infobox: key,
                    shortcut: shortcut.clone(),
                });
            }
            tables.infobox_rules.insert(key, shortcuts);
        }

        tracing::info!(
            projects = tables.shortcut_names.len(),
            infoboxes = tables.infobox_rules.len(),
            "Built lookup tables"
        );

        Ok(tables)
    }

    /// Records a project row. A later row replaces any earlier row with the
    /// same name or the same shortcut, so both maps stay one-to-one.
    fn insert_project(&mut self, line: usize, name: &str, shortcut: &TagShortcut) {
        let key = normalize_name(name);

        if let Some(previous) = self
            .name_shortcuts
            .insert(key.clone(), shortcut.clone())
            .filter(|previous| previous != shortcut)
        {
            tracing::warn!(line, "Project '{name}' redefined, previously {previous}");
            self.shortcut_names.remove(&previous);
        }

        if let Some(previous) = self
            .shortcut_names
            .insert(shortcut.clone(), name.to_string())
            .filter(|previous| normalize_name(previous) != key)
        {
            tracing::warn!(line, "Shortcut {shortcut} redefined, previously '{previous}'");
            self.name_shortcuts.remove(&normalize_name(&previous));
        }
    }

    /// Looks up the shortcut for a project name, ignoring case and spacing.
    #[must_use]
    pub fn shortcut_for_name(&self, name: &str) -> Option<&TagShortcut> {
        self.name_shortcuts.get(&normalize_name(name))
    }

    /// Looks up the shortcuts for an infobox name, ignoring case and spacing.
    #[must_use]
    pub fn shortcuts_for_infobox(&self, name: &str) -> Option<&[TagShortcut]> {
        self.infobox_rules
            .get(&normalize_name(name))
            .map(Vec::as_slice)
    }

    /// Returns the canonical display name of a shortcut.
    #[must_use]
    pub fn name_of(&self, shortcut: &TagShortcut) -> Option<&str> {
        self.shortcut_names.get(shortcut).map(String::as_str)
    }

    /// Iterates over every (shortcut, canonical name) pair, ordered by
    /// shortcut.
    pub fn projects(&self) -> impl Iterator<Item = (&TagShortcut, &str)> {
        self.shortcut_names
            .iter()
            .map(|(shortcut, name)| (shortcut, name.as_str()))
    }

    /// The number of project name rows.
    #[must_use]
    pub fn project_count(&self) -> usize {
        self.name_shortcuts.len()
    }

    /// The number of infobox rows.
    #[must_use]
    pub fn infobox_count(&self) -> usize {
        self.infobox_rules.len()
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    const EDITOR: &str = "Maintainer";

    fn settings() -> Settings {
        Settings {
            trusted_editor: EDITOR.to_string(),
            ..Settings::default()
        }
    }

    fn parse(text: &str) -> Result<LookupTables, TablesError> {
        LookupTables::parse(EDITOR, text, &settings())
    }

    fn shortcut(s: &str) -> TagShortcut {
        TagShortcut::try_from(s).unwrap()
    }

    #[test_case("", Row::Skip; "blank")]
    #[test_case("   ", Row::Skip; "whitespace")]
    #[test_case("# Infobox software|COMP", Row::Skip; "comment")]
    #[test_case("Infobox software", Row::Malformed; "one token")]
    #[test_case("Infobox software|", Row::Malformed; "empty value")]
    #[test_case("|COMP", Row::Malformed; "empty name")]
    fn classifies_rows(line: &str, expected: Row<'_>) {
        assert_eq!(parse_row(line), expected);
    }

    #[test]
    fn row_tokens_are_trimmed() {
        assert_eq!(
            parse_row("  Infobox scientist | BIO |SCI  "),
            Row::Entry {
                name: "Infobox scientist",
                values: vec!["BIO", "SCI"],
            }
        );
    }

    #[test]
    fn builds_maps_of_expected_size() {
        let tables = parse(
            "Infobox software|COMP\nInfobox scientist|BIO|SCI\n----\nWikiProject \
             Computing|COMP\nWikiProject Biography|BIO\nWikiProject Science|SCI\n",
        )
        .unwrap();

        assert_eq!(tables.infobox_count(), 2);
        assert_eq!(tables.project_count(), 3);
        assert_eq!(
            tables.shortcuts_for_infobox("infobox scientist").unwrap(),
            &[shortcut("BIO"), shortcut("SCI")]
        );
        assert_eq!(tables.name_of(&shortcut("COMP")), Some("WikiProject Computing"));
    }

    #[test]
    fn keys_are_case_insensitive() {
        let tables = parse("Infobox Software|COMP\n----\nWikiProject Computing|COMP\n").unwrap();

        assert_eq!(
            tables.shortcuts_for_infobox("INFOBOX SOFTWARE"),
            Some([shortcut("COMP")].as_slice())
        );
        assert_eq!(
            tables.shortcut_for_name("wikiproject computing"),
            Some(&shortcut("COMP"))
        );
    }

    #[test]
    fn malformed_row_does_not_affect_later_rows() {
        let tables = parse(
            "Infobox broken\nInfobox software|COMP\n----\n# comment\nWikiProject Nothing\nWikiProject \
             Computing|COMP\n",
        )
        .unwrap();

        assert_eq!(tables.infobox_count(), 1);
        assert_eq!(tables.project_count(), 1);
        assert!(tables.shortcuts_for_infobox("infobox broken").is_none());
    }

    #[test]
    fn untrusted_editor_is_fatal() {
        let result = LookupTables::parse(
            "Vandal",
            "Infobox software|COMP\n----\nWikiProject Computing|COMP\n",
            &settings(),
        );

        assert_eq!(
            result,
            Err(TablesError::Stale(StaleConfigError {
                expected: EDITOR.to_string(),
                found: "Vandal".to_string(),
            }))
        );
    }

    #[test]
    fn missing_delimiter_is_fatal() {
        let result = parse("Infobox software|COMP\nWikiProject Computing|COMP\n");
        assert_eq!(result, Err(TablesError::MissingDelimiter("----".to_string())));
    }

    #[test]
    fn extra_delimiter_is_fatal() {
        let result = parse("Infobox software|COMP\n----\nWikiProject Computing|COMP\n----\n");
        assert!(matches!(
            result,
            Err(TablesError::ExtraDelimiter { line: 4, .. })
        ));
    }

    #[test]
    fn infobox_with_unknown_shortcut_is_fatal() {
        let result = parse("Infobox software|COMP|SOFT\n----\nWikiProject Computing|COMP\n");
        assert_eq!(
            result,
            Err(TablesError::UnknownShortcut {
                infobox: "infobox software".to_string(),
                shortcut: shortcut("SOFT"),
            })
        );
    }

    #[test]
    fn redefined_name_drops_previous_shortcut() {
        let tables = parse("----\nWikiProject Foo|OLD\nWikiProject Foo|NEW\n").unwrap();

        assert_eq!(tables.project_count(), 1);
        assert_eq!(tables.shortcut_for_name("WikiProject Foo"), Some(&shortcut("NEW")));
        assert_eq!(tables.name_of(&shortcut("OLD")), None);
        assert_eq!(tables.projects().count(), 1);
    }

    #[test]
    fn infobox_naming_a_replaced_shortcut_is_fatal() {
        let result = parse("Infobox foo|OLD\n----\nWikiProject Foo|OLD\nWikiProject Foo|NEW\n");

        assert_eq!(
            result,
            Err(TablesError::UnknownShortcut {
                infobox: "infobox foo".to_string(),
                shortcut: shortcut("OLD"),
            })
        );
    }

    #[test]
    fn redefined_shortcut_drops_previous_name() {
        let tables = parse("----\nWikiProject Foo|FOO\nWikiProject Bar|FOO\n").unwrap();

        assert_eq!(tables.project_count(), 1);
        assert_eq!(tables.shortcut_for_name("WikiProject Foo"), None);
        assert_eq!(tables.name_of(&shortcut("FOO")), Some("WikiProject Bar"));
    }

    #[test]
    fn delimiter_may_be_indented() {
        let tables = parse("Infobox software|COMP\n  ----  \nWikiProject Computing|COMP\n").unwrap();
        assert_eq!(tables.project_count(), 1);
    }

    #[test]
    fn projects_are_ordered_by_shortcut() {
        let tables = parse("----\nWikiProject Physics|PHYS\nWikiProject Biology|BIO\n").unwrap();
        let shortcuts: Vec<_> = tables.projects().map(|(s, _)| s.to_string()).collect();
        assert_eq!(shortcuts, ["BIO", "PHYS"]);
    }
}

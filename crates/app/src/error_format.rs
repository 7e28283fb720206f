//! Flat-text error transport.
//!
//! Older collaborators exchange validation errors as one string in which each
//! message is prefixed by a section marker (`ROOM DEVICE:`, `ROOM GROUP:` …).
//! [`format_errors`] turns that string into display lines; [`to_legacy_string`]
//! produces it from structured errors. Nothing outside this module needs to
//! know the marker format.

use roomconf_domain::error::ValidationError;
use roomconf_domain::section::SectionKind;

/// Errors as received from a collaborator: flat marker text, or lines that
/// are already formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawErrors {
    Text(String),
    Lines(Vec<String>),
}

impl From<String> for RawErrors {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RawErrors {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<Vec<String>> for RawErrors {
    fn from(lines: Vec<String>) -> Self {
        Self::Lines(lines)
    }
}

/// Turn raw errors into display lines.
///
/// Flat text is split on every section marker (and on the wizard's
/// `KASTA DEVICE:` marker); each fragment is trimmed, one
/// leftover leading `:` and the spaces after it are removed, and empty
/// fragments are dropped. Lines pass through untouched, so formatting the
/// output again returns it unchanged.
#[must_use]
pub fn format_errors(raw: impl Into<RawErrors>) -> Vec<String> {
    match raw.into() {
        RawErrors::Lines(lines) => lines,
        RawErrors::Text(text) => split_on_markers(&text)
            .into_iter()
            .map(clean_fragment)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
    }
}

/// Device marker emitted by the spreadsheet wizard's device validation.
const WIZARD_DEVICE_MARKER: &str = "KASTA DEVICE:";

/// Every marker the splitter recognizes.
fn markers() -> impl Iterator<Item = &'static str> {
    SectionKind::ALL
        .into_iter()
        .map(SectionKind::marker)
        .chain(std::iter::once(WIZARD_DEVICE_MARKER))
}

fn split_on_markers(text: &str) -> Vec<&str> {
    let mut fragments = Vec::new();
    let mut rest = text;
    while let Some((at, marker)) = markers()
        .filter_map(|marker| rest.find(marker).map(|at| (at, marker)))
        .min_by_key(|(at, _)| *at)
    {
        fragments.push(&rest[..at]);
        rest = &rest[at + marker.len()..];
    }
    fragments.push(rest);
    fragments
}

fn clean_fragment(fragment: &str) -> &str {
    let fragment = fragment.trim();
    match fragment.strip_prefix(':') {
        Some(rest) => rest.trim_start(),
        None => fragment,
    }
}

/// Render structured errors in the flat marker format.
///
/// `format_errors(to_legacy_string(errors))` yields the same lines as
/// [`to_lines`].
#[must_use]
pub fn to_legacy_string(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|error| format!("{}{error}", error.section.marker()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Display lines of structured errors.
#[must_use]
pub fn to_lines(errors: &[ValidationError]) -> Vec<String> {
    errors.iter().map(ToString::to_string).collect()
}

//! Category classification.
//!
//! Matching only: where the label comes from is decided by the layout
//! adapters in [`crate::layout`].

use crate::locale::locale;
use shared::{Category, Language};
use std::collections::BTreeSet;

/// Categories the caller wants left out of the export
pub type Exclusions = BTreeSet<Category>;

/// A type label as found on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeLabel {
    /// Dedicated type element, e.g. `<span class="type">TV Series</span>`
    Tag(String),
    /// Whole title carrying the label as a suffix, e.g. `Foundation (TV Series)`
    TitleSuffix(String),
}

impl TypeLabel {
    fn matches(&self, label: &str) -> bool {
        match self {
            TypeLabel::Tag(text) => text.trim().to_lowercase() == label.to_lowercase(),
            TypeLabel::TitleSuffix(title) => title
                .trim()
                .to_lowercase()
                .ends_with(&format!("({})", label.to_lowercase())),
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            TypeLabel::Tag(text) | TypeLabel::TitleSuffix(text) => text.trim().is_empty(),
        }
    }
}

/// Find the category a label denotes, if any
pub fn classify(label: &TypeLabel, language: Language) -> Option<Category> {
    if label.is_empty() {
        return None;
    }
    locale(language)
        .category_labels
        .iter()
        .find(|(_, text)| label.matches(text))
        .map(|(category, _)| *category)
}

/// True iff the label denotes a category in `exclusions`.
///
/// An absent or empty label is never excluded.
pub fn is_excluded(
    label: Option<&TypeLabel>,
    language: Language,
    exclusions: &Exclusions,
) -> bool {
    if exclusions.is_empty() {
        return false;
    }
    label
        .and_then(|label| classify(label, language))
        .is_some_and(|category| exclusions.contains(&category))
}

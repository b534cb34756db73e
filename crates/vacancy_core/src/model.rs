use std::fmt;

use crate::diff::Keyed;

pub type VacancyId = String;

/// Text shown when a description has no upstream source yet.
pub const NOT_YET_SOURCED: &str = "???";

/// A description field whose data source may not be wired up yet.
///
/// Kept distinct from the missing-data placeholder: `NotYetSourced` means the
/// payload never carries the value, not that the employer left it empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourcedText {
    Available(String),
    NotYetSourced,
}

impl SourcedText {
    pub fn as_display(&self) -> &str {
        match self {
            SourcedText::Available(text) => text,
            SourcedText::NotYetSourced => NOT_YET_SOURCED,
        }
    }
}

impl fmt::Display for SourcedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_display())
    }
}

/// Display-ready vacancy. Every field except `image_url` is renderable as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VacancySummary {
    pub id: VacancyId,
    pub title: String,
    pub image_url: Option<String>,
    pub city: String,
    pub salary_from: String,
    pub salary_to: String,
    pub currency: String,
    pub employer_name: String,
    pub experience_level: String,
    pub employment_type: String,
    pub schedule: String,
    pub responsibility_snippet: String,
    pub requirement_snippet: String,
    pub conditions: SourcedText,
    pub skills: SourcedText,
}

impl Keyed for VacancySummary {
    type Key = str;

    fn key(&self) -> &str {
        &self.id
    }
}

/// One mapped page of search results.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchResultPage {
    /// Relevance order as returned upstream.
    pub items: Vec<VacancySummary>,
    pub total_pages: u32,
    pub found: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Industry {
    pub id: String,
    pub name: String,
}

impl Keyed for Industry {
    type Key = str;

    fn key(&self) -> &str {
        &self.id
    }
}

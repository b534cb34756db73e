use crate::raw::{RawIndustryGroup, RawSearchResponse, RawVacancy};
use crate::{Industry, SearchResultPage, SourcedText, VacancySummary};

/// Placeholder used when the payload has no value for a field.
pub const NOT_SPECIFIED: &str = "Не указано";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MapError {
    #[error("search response is missing required field `{field}`")]
    MalformedInput { field: &'static str },
}

/// Resolve an optional value to its display string, or fall back to `default`.
///
/// Blank strings count as missing.
pub fn resolve_or_default<T: ToString>(value: Option<T>, default: &str) -> String {
    value
        .map(|v| v.to_string())
        .filter(|text| !text.trim().is_empty())
        .unwrap_or_else(|| default.to_owned())
}

/// Turns raw search payloads into display-ready pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseMapper {
    missing: String,
}

impl Default for ResponseMapper {
    fn default() -> Self {
        Self::new(NOT_SPECIFIED)
    }
}

impl ResponseMapper {
    pub fn new(missing: impl Into<String>) -> Self {
        let missing = missing.into();
        // An empty placeholder would break the non-empty guarantee.
        let missing = if missing.trim().is_empty() {
            NOT_SPECIFIED.to_owned()
        } else {
            missing
        };
        Self { missing }
    }

    pub fn placeholder(&self) -> &str {
        &self.missing
    }

    pub fn map(&self, raw: RawSearchResponse) -> Result<SearchResultPage, MapError> {
        let items = raw
            .items
            .ok_or(MapError::MalformedInput { field: "items" })?;
        let total_pages = raw
            .pages
            .ok_or(MapError::MalformedInput { field: "pages" })?;

        Ok(SearchResultPage {
            items: items.into_iter().map(|dto| self.map_vacancy(dto)).collect(),
            total_pages,
            found: raw.found.unwrap_or(0),
        })
    }

    fn map_vacancy(&self, dto: RawVacancy) -> VacancySummary {
        let or_missing = |value: Option<String>| resolve_or_default(value, &self.missing);
        let salary = dto.salary.unwrap_or_default();
        let snippet = dto.snippet.unwrap_or_default();
        let employer = dto.employer.unwrap_or_default();

        VacancySummary {
            id: dto.id,
            title: dto.name,
            image_url: employer.logo_urls.and_then(|logos| logos.original),
            city: or_missing(dto.area.and_then(|area| area.name)),
            salary_from: resolve_or_default(salary.from, &self.missing),
            salary_to: resolve_or_default(salary.to, &self.missing),
            currency: or_missing(salary.currency),
            employer_name: or_missing(employer.name),
            experience_level: or_missing(dto.experience.and_then(|e| e.name)),
            employment_type: or_missing(dto.employment.and_then(|e| e.name)),
            schedule: or_missing(dto.schedule.and_then(|s| s.name)),
            responsibility_snippet: or_missing(snippet.responsibility),
            requirement_snippet: or_missing(snippet.requirement),
            conditions: SourcedText::NotYetSourced,
            skills: SourcedText::NotYetSourced,
        }
    }
}

/// Flatten the two-level industry catalogue into selectable industries.
///
/// A category without children is selectable itself.
pub fn map_industries(groups: Vec<RawIndustryGroup>) -> Vec<Industry> {
    let mut industries = Vec::new();
    for group in groups {
        match group.industries {
            Some(children) if !children.is_empty() => {
                industries.extend(children.into_iter().map(|child| Industry {
                    id: child.id,
                    name: child.name,
                }));
            }
            _ => industries.push(Industry {
                id: group.id,
                name: group.name,
            }),
        }
    }
    industries
}

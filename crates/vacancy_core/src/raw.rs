//! Upstream payload shapes, as loose as the API delivers them.
//!
//! Every nested value is optional; `null` and absent keys decode the same way.
//! Only `RawVacancy::id` and `RawVacancy::name` are required by the decoder.

use serde::Deserialize;

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawSearchResponse {
    #[serde(default)]
    pub items: Option<Vec<RawVacancy>>,
    #[serde(default)]
    pub pages: Option<u32>,
    #[serde(default)]
    pub found: Option<u32>,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub per_page: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawVacancy {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub employer: Option<RawEmployer>,
    #[serde(default)]
    pub area: Option<RawNamed>,
    #[serde(default)]
    pub salary: Option<RawSalary>,
    #[serde(default)]
    pub experience: Option<RawNamed>,
    #[serde(default)]
    pub employment: Option<RawNamed>,
    #[serde(default)]
    pub schedule: Option<RawNamed>,
    #[serde(default)]
    pub snippet: Option<RawSnippet>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawEmployer {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub logo_urls: Option<RawLogoUrls>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawLogoUrls {
    #[serde(default)]
    pub original: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawSalary {
    #[serde(default)]
    pub from: Option<i64>,
    #[serde(default)]
    pub to: Option<i64>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// `{ id, name }` dictionary entry (area, experience, employment, schedule).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawNamed {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawSnippet {
    #[serde(default)]
    pub requirement: Option<String>,
    #[serde(default)]
    pub responsibility: Option<String>,
}

/// Top level of the industry catalogue: a category with its industries.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawIndustryGroup {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub industries: Option<Vec<RawIndustry>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct RawIndustry {
    pub id: String,
    pub name: String,
}

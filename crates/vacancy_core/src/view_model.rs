use crate::{Industry, VacancySummary};

/// Exactly one of these is on screen at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchRender {
    Loading,
    /// No query yet, or a query with zero results.
    Empty,
    Error,
    NoConnectivity,
    Content {
        items: Vec<VacancySummary>,
        found: u32,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchViewModel {
    pub query: String,
    pub industry: Option<Industry>,
    pub render: SearchRender,
    /// A next page is being fetched below the visible content.
    pub loading_more: bool,
    pub can_load_more: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndustryRender {
    Loading,
    Empty,
    Error,
    NoConnectivity,
    Content(Vec<IndustryRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryRow {
    pub industry: Industry,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryViewModel {
    pub filter: String,
    pub render: IndustryRender,
    pub apply_visible: bool,
}

use crate::{Industry, VacancyId};

/// Monotonic tag of a fetch attempt; results carrying an older tag are dropped.
pub type Generation = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub industry_id: Option<String>,
    /// Zero-based page index.
    pub page: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    FetchPage {
        generation: Generation,
        request: SearchRequest,
    },
    /// Best-effort abort of the outstanding search request.
    CancelOutstanding,
    OpenVacancy {
        id: VacancyId,
    },
    Notify(Notification),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndustryEffect {
    FetchIndustries { generation: Generation },
    /// Hand the chosen filter back to the search screen and close.
    ReturnIndustry(Industry),
    Close,
    Notify(Notification),
}

/// Transient message shown on top of whatever the screen renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    ErrorOccurred,
    NoConnectivity,
}

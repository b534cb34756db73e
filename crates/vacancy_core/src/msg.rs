use std::time::Instant;

use crate::raw::{RawIndustryGroup, RawSearchResponse};
use crate::{Generation, Industry, VacancyId};

/// Why a fetch failed, as far as the screens care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailure {
    NoConnectivity,
    Server,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User edited the search box (raw keystroke, debounced by the state).
    QueryChanged { text: String, at: Instant },
    /// User tapped the clear button.
    QueryCleared,
    /// Clock tick; fires debounced input.
    Tick { now: Instant },
    /// The list was scrolled to its last item.
    LastItemReached,
    /// Industry screen returned a filter (or removed it).
    IndustryFilterApplied(Option<Industry>),
    RetryClicked,
    PageLoaded {
        generation: Generation,
        page: u32,
        response: RawSearchResponse,
    },
    PageFailed {
        generation: Generation,
        page: u32,
        failure: FetchFailure,
    },
    VacancyClicked { id: VacancyId, at: Instant },
    /// Navigated away; outstanding results must be discarded.
    ScreenLeft,
    /// Fallback for placeholder wiring.
    NoOp,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndustryMsg {
    /// Screen opened with the filter currently applied on the search screen.
    Opened { selected: Option<Industry> },
    IndustriesLoaded {
        generation: Generation,
        groups: Vec<RawIndustryGroup>,
    },
    IndustriesFailed {
        generation: Generation,
        failure: FetchFailure,
    },
    FilterChanged { text: String, at: Instant },
    FilterCleared,
    Tick { now: Instant },
    IndustryClicked { id: String },
    ApplyClicked,
    BackClicked,
    RetryClicked,
}

//! Vacancy search core: payload normalization, keyed list diffing and the pure
//! state machines behind the search and industry filter screens.
pub mod debounce;
pub mod diff;
mod effect;
mod industry;
mod mapper;
mod model;
mod msg;
mod paged_list;
pub mod raw;
mod state;
mod update;
mod view_model;

pub use diff::{diff, Change, ChangeCounts, ChangeSet, Keyed};
pub use effect::{Effect, Generation, IndustryEffect, Notification, SearchRequest};
pub use industry::{update_industry, IndustrySettings, IndustryState};
pub use mapper::{map_industries, resolve_or_default, MapError, ResponseMapper, NOT_SPECIFIED};
pub use model::{Industry, SearchResultPage, SourcedText, VacancyId, VacancySummary, NOT_YET_SOURCED};
pub use msg::{FetchFailure, IndustryMsg, Msg};
pub use paged_list::{PagedList, PagedVacancyList};
pub use state::{SearchSettings, SearchState, SessionPhase};
pub use update::update;
pub use view_model::{
    IndustryRender, IndustryRow, IndustryViewModel, SearchRender, SearchViewModel,
};

//! Vacancy engine: HTTP access to the listing API and effect execution.
mod api;
mod engine;
mod types;

pub use api::{ApiSettings, ReqwestVacancyApi, VacancyApi};
pub use engine::{EngineError, EngineHandle};
pub use types::{EngineEvent, FailureKind, FetchError};

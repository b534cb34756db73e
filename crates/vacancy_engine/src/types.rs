use std::fmt;

use vacancy_core::raw::{RawIndustryGroup, RawSearchResponse};
use vacancy_core::{FetchFailure, Generation};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SearchCompleted {
        generation: Generation,
        page: u32,
        result: Result<RawSearchResponse, FetchError>,
    },
    IndustriesCompleted {
        generation: Generation,
        result: Result<Vec<RawIndustryGroup>, FetchError>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    Network,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    Decode,
    Cancelled,
}

impl FailureKind {
    /// Collapses transport detail into what the screens distinguish.
    pub fn to_failure(&self) -> FetchFailure {
        match self {
            FailureKind::Timeout | FailureKind::Network => FetchFailure::NoConnectivity,
            FailureKind::InvalidUrl
            | FailureKind::HttpStatus(_)
            | FailureKind::TooLarge { .. }
            | FailureKind::Decode
            | FailureKind::Cancelled => FetchFailure::Server,
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::Decode => write!(f, "undecodable payload"),
            FailureKind::Cancelled => write!(f, "cancelled"),
        }
    }
}

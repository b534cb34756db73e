use std::time::Duration;

use vacancy_core::{Generation, IndustryMsg, Msg, SearchRequest};
use vacancy_engine::{EngineEvent, EngineHandle};
use vacancy_logging::{vacancy_info, vacancy_warn};

use super::app::AppMsg;

/// Forwards fetch effects to the engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self { engine }
    }

    pub fn fetch_page(&self, generation: Generation, request: SearchRequest) {
        vacancy_info!(
            "FetchPage generation={} page={} query_len={} industry={:?}",
            generation,
            request.page,
            request.query.len(),
            request.industry_id
        );
        self.engine.search(generation, request);
    }

    pub fn cancel_search(&self) {
        self.engine.cancel_search();
    }

    pub fn fetch_industries(&self, generation: Generation) {
        vacancy_info!("FetchIndustries generation={}", generation);
        self.engine.industries(generation);
    }

    /// Waits up to `timeout` for the first event, then drains whatever else is queued.
    pub fn drain(&self, timeout: Duration) -> Vec<AppMsg> {
        let mut messages = Vec::new();
        if let Some(event) = self.engine.recv_timeout(timeout) {
            messages.push(event_to_msg(event));
        }
        while let Some(event) = self.engine.try_recv() {
            messages.push(event_to_msg(event));
        }
        messages
    }
}

fn event_to_msg(event: EngineEvent) -> AppMsg {
    match event {
        EngineEvent::SearchCompleted {
            generation,
            page,
            result,
        } => AppMsg::Search(match result {
            Ok(response) => Msg::PageLoaded {
                generation,
                page,
                response,
            },
            Err(err) => {
                vacancy_warn!("Search page {} of generation {} failed: {}", page, generation, err);
                Msg::PageFailed {
                    generation,
                    page,
                    failure: err.kind.to_failure(),
                }
            }
        }),
        EngineEvent::IndustriesCompleted { generation, result } => AppMsg::Industry(match result {
            Ok(groups) => IndustryMsg::IndustriesLoaded { generation, groups },
            Err(err) => {
                vacancy_warn!("Industry catalogue of generation {} failed: {}", generation, err);
                IndustryMsg::IndustriesFailed {
                    generation,
                    failure: err.kind.to_failure(),
                }
            }
        }),
    }
}

#[cfg(test)]
mod tests {
    use vacancy_core::raw::RawSearchResponse;
    use vacancy_core::FetchFailure;
    use vacancy_engine::{FailureKind, FetchError};

    use super::*;

    fn failed(kind: FailureKind) -> EngineEvent {
        EngineEvent::SearchCompleted {
            generation: 4,
            page: 1,
            result: Err(FetchError {
                kind,
                message: "boom".to_string(),
            }),
        }
    }

    #[test]
    fn loaded_page_keeps_generation_and_page() {
        let msg = event_to_msg(EngineEvent::SearchCompleted {
            generation: 2,
            page: 0,
            result: Ok(RawSearchResponse::default()),
        });
        assert_eq!(
            msg,
            AppMsg::Search(Msg::PageLoaded {
                generation: 2,
                page: 0,
                response: RawSearchResponse::default(),
            })
        );
    }

    #[test]
    fn transport_failures_are_classified() {
        assert_eq!(
            event_to_msg(failed(FailureKind::Timeout)),
            AppMsg::Search(Msg::PageFailed {
                generation: 4,
                page: 1,
                failure: FetchFailure::NoConnectivity,
            })
        );
        assert_eq!(
            event_to_msg(failed(FailureKind::HttpStatus(500))),
            AppMsg::Search(Msg::PageFailed {
                generation: 4,
                page: 1,
                failure: FetchFailure::Server,
            })
        );
    }

    #[test]
    fn industry_failure_maps_to_industry_msg() {
        let msg = event_to_msg(EngineEvent::IndustriesCompleted {
            generation: 1,
            result: Err(FetchError {
                kind: FailureKind::Network,
                message: "offline".to_string(),
            }),
        });
        assert_eq!(
            msg,
            AppMsg::Industry(IndustryMsg::IndustriesFailed {
                generation: 1,
                failure: FetchFailure::NoConnectivity,
            })
        );
    }
}

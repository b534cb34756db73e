use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use vacancy_core::{Generation, SearchRequest};
use vacancy_logging::{vacancy_debug, vacancy_info};

use crate::api::{ApiSettings, ReqwestVacancyApi, VacancyApi};
use crate::{EngineEvent, FailureKind, FetchError};

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
    #[error("failed to build http client: {0}")]
    Client(#[from] FetchError),
}

enum EngineCommand {
    Search {
        generation: Generation,
        request: SearchRequest,
    },
    CancelSearch,
    Industries {
        generation: Generation,
    },
}

/// Runs API calls on a background tokio runtime and reports results as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let api = ReqwestVacancyApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api))?)
    }

    pub fn with_api(api: Arc<dyn VacancyApi>) -> io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()?;

        thread::spawn(move || {
            // Only searches supersede each other; industry loads always complete.
            let mut search_token: Option<CancellationToken> = None;
            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Search {
                        generation,
                        request,
                    } => {
                        if let Some(previous) = search_token.take() {
                            previous.cancel();
                        }
                        let token = CancellationToken::new();
                        search_token = Some(token.clone());
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            run_search(api.as_ref(), generation, request, token, event_tx).await;
                        });
                    }
                    EngineCommand::CancelSearch => {
                        if let Some(previous) = search_token.take() {
                            previous.cancel();
                        }
                    }
                    EngineCommand::Industries { generation } => {
                        let api = api.clone();
                        let event_tx = event_tx.clone();
                        runtime.spawn(async move {
                            let result = api.industries().await;
                            let _ = event_tx.send(EngineEvent::IndustriesCompleted {
                                generation,
                                result,
                            });
                        });
                    }
                }
            }
            vacancy_info!("engine command channel closed; shutting down");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn search(&self, generation: Generation, request: SearchRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Search {
            generation,
            request,
        });
    }

    pub fn cancel_search(&self) {
        let _ = self.cmd_tx.send(EngineCommand::CancelSearch);
    }

    pub fn industries(&self, generation: Generation) {
        let _ = self.cmd_tx.send(EngineCommand::Industries { generation });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn run_search(
    api: &dyn VacancyApi,
    generation: Generation,
    request: SearchRequest,
    token: CancellationToken,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let page = request.page;
    let result = tokio::select! {
        _ = token.cancelled() => Err(FetchError::new(FailureKind::Cancelled, "superseded")),
        result = api.search(&request) => result,
    };
    if let Err(err) = &result {
        if err.kind == FailureKind::Cancelled {
            vacancy_debug!(
                "search page {} of generation {} cancelled",
                page,
                generation
            );
            return;
        }
    }
    let _ = event_tx.send(EngineEvent::SearchCompleted {
        generation,
        page,
        result,
    });
}

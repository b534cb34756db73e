use std::time::{Duration, Instant};

use vacancy_logging::{vacancy_debug, vacancy_warn};

use crate::debounce::{Debouncer, Throttle};
use crate::diff::ChangeSet;
use crate::raw::RawSearchResponse;
use crate::view_model::{SearchRender, SearchViewModel};
use crate::{
    Effect, FetchFailure, Generation, Industry, Notification, PagedVacancyList, ResponseMapper,
    SearchRequest, VacancySummary,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionPhase {
    #[default]
    Idle,
    Loading,
    Loaded,
    Error,
    NoConnectivity,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSettings {
    pub query_debounce: Duration,
    pub click_throttle: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            query_debounce: Duration::from_millis(2000),
            click_throttle: Duration::from_millis(1000),
        }
    }
}

/// Search screen session. Mutated only through [`crate::update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchState {
    mapper: ResponseMapper,
    query_debounce: Debouncer<String>,
    click_throttle: Throttle,
    query: String,
    industry: Option<Industry>,
    generation: Generation,
    phase: SessionPhase,
    list: PagedVacancyList,
    next_page: u32,
    total_pages: u32,
    found: u32,
    in_flight: Option<u32>,
    failed_page: Option<u32>,
    pending_changes: Vec<ChangeSet<VacancySummary>>,
    dirty: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::with_settings(&SearchSettings::default(), ResponseMapper::default())
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &SearchSettings, mapper: ResponseMapper) -> Self {
        Self {
            mapper,
            query_debounce: Debouncer::new(settings.query_debounce),
            click_throttle: Throttle::new(settings.click_throttle),
            query: String::new(),
            industry: None,
            generation: 0,
            phase: SessionPhase::Idle,
            list: PagedVacancyList::new(),
            next_page: 0,
            total_pages: 0,
            found: 0,
            in_flight: None,
            failed_page: None,
            pending_changes: Vec::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> SearchViewModel {
        let render = match self.phase {
            SessionPhase::Idle => SearchRender::Empty,
            SessionPhase::Loading => SearchRender::Loading,
            SessionPhase::Error => SearchRender::Error,
            SessionPhase::NoConnectivity => SearchRender::NoConnectivity,
            SessionPhase::Loaded if self.list.is_empty() => SearchRender::Empty,
            SessionPhase::Loaded => SearchRender::Content {
                items: self.list.items().to_vec(),
                found: self.found,
            },
        };
        let loaded = self.phase == SessionPhase::Loaded;
        SearchViewModel {
            query: self.query.clone(),
            industry: self.industry.clone(),
            render,
            loading_more: loaded && self.in_flight.is_some(),
            can_load_more: loaded && self.next_page < self.total_pages,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn industry(&self) -> Option<&Industry> {
        self.industry.as_ref()
    }

    pub fn items(&self) -> &[VacancySummary] {
        self.list.items()
    }

    pub fn outstanding_page(&self) -> Option<u32> {
        self.in_flight
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Drains list deltas in the order they happened, for the rendering sink.
    pub fn take_changes(&mut self) -> Vec<ChangeSet<VacancySummary>> {
        std::mem::take(&mut self.pending_changes)
    }

    pub(crate) fn push_query(&mut self, text: String, at: Instant) {
        self.query_debounce.push(text, at);
    }

    pub(crate) fn poll_query(&mut self, now: Instant) -> Option<String> {
        self.query_debounce.poll(now)
    }

    pub(crate) fn is_session_active(&self) -> bool {
        matches!(self.phase, SessionPhase::Loading | SessionPhase::Loaded)
    }

    pub(crate) fn accept_click(&mut self, at: Instant) -> bool {
        self.click_throttle.accept(at)
    }

    pub(crate) fn set_industry(&mut self, industry: Option<Industry>) {
        self.industry = industry;
        self.dirty = true;
    }

    /// Starts a new session for `query`: new generation, empty list, first page.
    pub(crate) fn start_session(&mut self, query: String) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(2);
        if self.in_flight.is_some() {
            effects.push(Effect::CancelOutstanding);
        }
        self.generation += 1;
        self.query = query;
        self.reset_pages();
        self.phase = SessionPhase::Loading;
        self.in_flight = Some(0);
        self.dirty = true;
        effects.push(Effect::FetchPage {
            generation: self.generation,
            request: self.request_for(0),
        });
        effects
    }

    pub(crate) fn reset_to_idle(&mut self) -> Vec<Effect> {
        self.query_debounce.cancel();
        let had_outstanding = self.in_flight.take().is_some();
        self.generation += 1;
        self.query.clear();
        self.reset_pages();
        self.phase = SessionPhase::Idle;
        self.dirty = true;
        if had_outstanding {
            vec![Effect::CancelOutstanding]
        } else {
            Vec::new()
        }
    }

    pub(crate) fn request_next_page(&mut self) -> Option<Effect> {
        if self.phase != SessionPhase::Loaded
            || self.in_flight.is_some()
            || self.next_page >= self.total_pages
        {
            return None;
        }
        let page = self.next_page;
        self.in_flight = Some(page);
        self.dirty = true;
        Some(Effect::FetchPage {
            generation: self.generation,
            request: self.request_for(page),
        })
    }

    pub(crate) fn retry(&mut self) -> Vec<Effect> {
        match self.phase {
            SessionPhase::Error | SessionPhase::NoConnectivity if !self.query.is_empty() => {
                let query = self.query.clone();
                self.start_session(query)
            }
            SessionPhase::Loaded if self.failed_page.is_some() => {
                self.request_next_page().into_iter().collect()
            }
            _ => Vec::new(),
        }
    }

    pub(crate) fn apply_page(
        &mut self,
        generation: Generation,
        page: u32,
        response: RawSearchResponse,
    ) -> Vec<Effect> {
        if !self.accepts(generation, page) {
            return Vec::new();
        }
        self.in_flight = None;

        let result = match self.mapper.map(response) {
            Ok(result) => result,
            Err(err) => {
                vacancy_warn!("search page {} for {:?} rejected: {}", page, self.query, err);
                return self.fail(page, FetchFailure::Server);
            }
        };

        self.total_pages = result.total_pages;
        self.found = result.found;
        self.next_page = page + 1;
        self.failed_page = None;
        let changes = self.list.append(result.items);
        self.queue_changes(changes);
        self.phase = SessionPhase::Loaded;
        self.dirty = true;
        Vec::new()
    }

    pub(crate) fn apply_failure(
        &mut self,
        generation: Generation,
        page: u32,
        failure: FetchFailure,
    ) -> Vec<Effect> {
        if !self.accepts(generation, page) {
            return Vec::new();
        }
        self.in_flight = None;
        self.fail(page, failure)
    }

    pub(crate) fn leave_screen(&mut self) -> Vec<Effect> {
        self.query_debounce.cancel();
        self.generation += 1;
        let Some(page) = self.in_flight.take() else {
            return Vec::new();
        };
        if page == 0 {
            // Nothing was shown yet; the same query must be able to start over.
            self.query.clear();
            self.phase = SessionPhase::Idle;
        }
        self.dirty = true;
        vec![Effect::CancelOutstanding]
    }

    fn accepts(&self, generation: Generation, page: u32) -> bool {
        let current = generation == self.generation && self.in_flight == Some(page);
        if !current {
            vacancy_debug!(
                "dropping result for page {} of generation {} (current generation {}, outstanding {:?})",
                page,
                generation,
                self.generation,
                self.in_flight
            );
        }
        current
    }

    fn fail(&mut self, page: u32, failure: FetchFailure) -> Vec<Effect> {
        self.failed_page = Some(page);
        self.dirty = true;
        if page == 0 {
            self.phase = match failure {
                FetchFailure::NoConnectivity => SessionPhase::NoConnectivity,
                FetchFailure::Server => SessionPhase::Error,
            };
        }
        match failure {
            FetchFailure::Server => vec![Effect::Notify(Notification::ErrorOccurred)],
            // The placeholder already says so on a first page.
            FetchFailure::NoConnectivity if page == 0 => Vec::new(),
            FetchFailure::NoConnectivity => vec![Effect::Notify(Notification::NoConnectivity)],
        }
    }

    fn reset_pages(&mut self) {
        let changes = self.list.clear();
        self.queue_changes(changes);
        self.next_page = 0;
        self.total_pages = 0;
        self.found = 0;
        self.failed_page = None;
    }

    fn queue_changes(&mut self, changes: ChangeSet<VacancySummary>) {
        if !changes.is_empty() {
            self.pending_changes.push(changes);
        }
    }

    fn request_for(&self, page: u32) -> SearchRequest {
        SearchRequest {
            query: self.query.clone(),
            industry_id: self.industry.as_ref().map(|industry| industry.id.clone()),
            page,
        }
    }
}

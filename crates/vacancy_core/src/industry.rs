//! Industry filter screen: load the catalogue, narrow it by name, pick one.

use std::time::Duration;

use vacancy_logging::vacancy_debug;

use crate::debounce::Debouncer;
use crate::diff::ChangeSet;
use crate::mapper::map_industries;
use crate::paged_list::PagedList;
use crate::raw::RawIndustryGroup;
use crate::state::SessionPhase;
use crate::view_model::{IndustryRender, IndustryRow, IndustryViewModel};
use crate::{FetchFailure, Generation, Industry, IndustryEffect, IndustryMsg, Notification};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustrySettings {
    pub filter_debounce: Duration,
}

impl Default for IndustrySettings {
    fn default() -> Self {
        Self {
            filter_debounce: Duration::from_millis(300),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryState {
    filter_debounce: Debouncer<String>,
    filter: String,
    catalogue: Vec<Industry>,
    visible: PagedList<Industry>,
    selected: Option<Industry>,
    generation: Generation,
    phase: SessionPhase,
    pending_changes: Vec<ChangeSet<Industry>>,
    dirty: bool,
}

impl Default for IndustryState {
    fn default() -> Self {
        Self::with_settings(&IndustrySettings::default())
    }
}

impl IndustryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: &IndustrySettings) -> Self {
        Self {
            filter_debounce: Debouncer::new(settings.filter_debounce),
            filter: String::new(),
            catalogue: Vec::new(),
            visible: PagedList::new(),
            selected: None,
            generation: 0,
            phase: SessionPhase::Idle,
            pending_changes: Vec::new(),
            dirty: false,
        }
    }

    pub fn view(&self) -> IndustryViewModel {
        let render = match self.phase {
            SessionPhase::Idle | SessionPhase::Loading => IndustryRender::Loading,
            SessionPhase::Error => IndustryRender::Error,
            SessionPhase::NoConnectivity => IndustryRender::NoConnectivity,
            SessionPhase::Loaded if self.visible.is_empty() => IndustryRender::Empty,
            SessionPhase::Loaded => IndustryRender::Content(
                self.visible
                    .items()
                    .iter()
                    .map(|industry| IndustryRow {
                        industry: industry.clone(),
                        selected: self.selected.as_ref() == Some(industry),
                    })
                    .collect(),
            ),
        };
        IndustryViewModel {
            filter: self.filter.clone(),
            render,
            apply_visible: self.phase == SessionPhase::Loaded && self.selected.is_some(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn selected(&self) -> Option<&Industry> {
        self.selected.as_ref()
    }

    pub fn visible(&self) -> &[Industry] {
        self.visible.items()
    }

    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn take_changes(&mut self) -> Vec<ChangeSet<Industry>> {
        std::mem::take(&mut self.pending_changes)
    }

    fn load(&mut self) -> Vec<IndustryEffect> {
        self.generation += 1;
        self.phase = SessionPhase::Loading;
        self.catalogue.clear();
        self.refilter();
        self.dirty = true;
        vec![IndustryEffect::FetchIndustries {
            generation: self.generation,
        }]
    }

    fn is_current(&self, generation: Generation) -> bool {
        let current = generation == self.generation && self.phase == SessionPhase::Loading;
        if !current {
            vacancy_debug!(
                "dropping industry result of generation {} (current {})",
                generation,
                self.generation
            );
        }
        current
    }

    fn set_filter(&mut self, raw: &str) {
        let filter = raw.trim().to_owned();
        if filter == self.filter {
            return;
        }
        self.filter = filter;
        self.refilter();
        self.dirty = true;
    }

    fn refilter(&mut self) {
        let needle = self.filter.to_lowercase();
        let matches = self
            .catalogue
            .iter()
            .filter(|industry| industry.name.to_lowercase().contains(&needle))
            .cloned()
            .collect();
        let changes = self.visible.replace(matches);
        if !changes.is_empty() {
            self.pending_changes.push(changes);
        }
    }
}

/// Pure update function for the industry filter screen.
pub fn update_industry(
    mut state: IndustryState,
    msg: IndustryMsg,
) -> (IndustryState, Vec<IndustryEffect>) {
    let effects = match msg {
        IndustryMsg::Opened { selected } => {
            state.filter_debounce.cancel();
            state.filter.clear();
            state.selected = selected;
            state.load()
        }
        IndustryMsg::IndustriesLoaded { generation, groups } => {
            if state.is_current(generation) {
                apply_catalogue(&mut state, groups);
            }
            Vec::new()
        }
        IndustryMsg::IndustriesFailed {
            generation,
            failure,
        } => {
            if !state.is_current(generation) {
                return (state, Vec::new());
            }
            state.dirty = true;
            match failure {
                FetchFailure::NoConnectivity => {
                    state.phase = SessionPhase::NoConnectivity;
                    Vec::new()
                }
                FetchFailure::Server => {
                    state.phase = SessionPhase::Error;
                    vec![IndustryEffect::Notify(Notification::ErrorOccurred)]
                }
            }
        }
        IndustryMsg::FilterChanged { text, at } => {
            state.filter_debounce.push(text, at);
            Vec::new()
        }
        IndustryMsg::Tick { now } => {
            if let Some(text) = state.filter_debounce.poll(now) {
                state.set_filter(&text);
            }
            Vec::new()
        }
        IndustryMsg::FilterCleared => {
            state.filter_debounce.cancel();
            state.set_filter("");
            Vec::new()
        }
        IndustryMsg::IndustryClicked { id } => {
            let picked = state
                .visible
                .items()
                .iter()
                .find(|industry| industry.id == id)
                .cloned();
            if picked.is_some() && picked != state.selected {
                state.selected = picked;
                state.dirty = true;
            }
            Vec::new()
        }
        IndustryMsg::ApplyClicked => match state.selected.clone() {
            Some(industry) => vec![IndustryEffect::ReturnIndustry(industry)],
            None => Vec::new(),
        },
        IndustryMsg::BackClicked => {
            // Invalidate a catalogue request that may still land.
            state.generation += 1;
            vec![IndustryEffect::Close]
        }
        IndustryMsg::RetryClicked => match state.phase {
            SessionPhase::Error | SessionPhase::NoConnectivity => state.load(),
            _ => Vec::new(),
        },
    };

    (state, effects)
}

fn apply_catalogue(state: &mut IndustryState, groups: Vec<RawIndustryGroup>) {
    state.catalogue = map_industries(groups);
    state.phase = SessionPhase::Loaded;
    state.refilter();
    state.dirty = true;
}

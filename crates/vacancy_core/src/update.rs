use crate::{Effect, Msg, SearchState};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: SearchState, msg: Msg) -> (SearchState, Vec<Effect>) {
    let effects = match msg {
        Msg::QueryChanged { text, at } => {
            state.push_query(text, at);
            Vec::new()
        }
        Msg::Tick { now } => match state.poll_query(now) {
            Some(raw) => submit_query(&mut state, &raw),
            None => Vec::new(),
        },
        Msg::QueryCleared => state.reset_to_idle(),
        Msg::LastItemReached => state.request_next_page().into_iter().collect(),
        Msg::IndustryFilterApplied(industry) => {
            if state.industry() == industry.as_ref() {
                return (state, Vec::new());
            }
            state.set_industry(industry);
            if state.query().is_empty() {
                Vec::new()
            } else {
                let query = state.query().to_owned();
                state.start_session(query)
            }
        }
        Msg::RetryClicked => state.retry(),
        Msg::PageLoaded {
            generation,
            page,
            response,
        } => state.apply_page(generation, page, response),
        Msg::PageFailed {
            generation,
            page,
            failure,
        } => state.apply_failure(generation, page, failure),
        Msg::VacancyClicked { id, at } => {
            if state.accept_click(at) {
                vec![Effect::OpenVacancy { id }]
            } else {
                Vec::new()
            }
        }
        Msg::ScreenLeft => state.leave_screen(),
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

fn submit_query(state: &mut SearchState, raw: &str) -> Vec<Effect> {
    let query = normalize_query(raw);
    if query.is_empty() {
        return state.reset_to_idle();
    }
    // Typing back to the running query is not a new search.
    if query == state.query() && state.is_session_active() {
        return Vec::new();
    }
    state.start_session(query)
}

fn normalize_query(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

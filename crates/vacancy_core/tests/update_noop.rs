use vacancy_core::{update, Msg, SearchState};

#[test]
fn update_is_noop() {
    let state = SearchState::new();
    let (next, effects) = update(state.clone(), Msg::NoOp);

    assert_eq!(state, next);
    assert!(effects.is_empty());
}

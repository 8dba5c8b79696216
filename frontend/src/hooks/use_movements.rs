use std::rc::Rc;

use shared::{FilterCriteria, Movement, MovementView};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Movement list, filter and the filtered view, updated through actions.
#[derive(Clone, Default, PartialEq)]
pub struct MovementListState {
    pub view: MovementView,
    pub loading: bool,
    pub error: Option<String>,
}

pub enum MovementListAction {
    LoadStarted,
    Loaded(Vec<Movement>),
    LoadFailed(String),
    Created(Movement),
    FilterApplied(FilterCriteria),
    FilterCleared,
}

impl Reducible for MovementListState {
    type Action = MovementListAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            MovementListAction::LoadStarted => {
                next.loading = true;
                next.error = None;
            }
            MovementListAction::Loaded(movements) => {
                next.view.replace_movements(movements);
                next.loading = false;
            }
            MovementListAction::LoadFailed(message) => {
                next.loading = false;
                next.error = Some(message);
            }
            MovementListAction::Created(movement) => next.view.prepend(movement),
            MovementListAction::FilterApplied(criteria) => next.view.apply_filter(criteria),
            MovementListAction::FilterCleared => next.view.clear_filter(),
        }
        next.into()
    }
}

pub struct UseMovementsResult {
    pub state: MovementListState,
    pub actions: UseMovementsActions,
}

#[derive(Clone, PartialEq)]
pub struct UseMovementsActions {
    pub refresh: Callback<()>,
    pub apply_filter: Callback<FilterCriteria>,
    pub clear_filter: Callback<()>,
    pub add_created: Callback<Movement>,
}

#[hook]
pub fn use_movements(api_client: &ApiClient) -> UseMovementsResult {
    let list = use_reducer(MovementListState::default);

    let refresh = {
        let api_client = api_client.clone();
        let dispatcher = list.dispatcher();

        use_callback((), move |_, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();

            spawn_local(async move {
                dispatcher.dispatch(MovementListAction::LoadStarted);

                match api_client.get_movements().await {
                    Ok(movements) => {
                        Logger::debug_with_component("use_movements", &format!("Loaded {} movements", movements.len()));
                        dispatcher.dispatch(MovementListAction::Loaded(movements));
                    }
                    Err(e) => {
                        gloo::console::error!("Erro ao carregar movimentos:", e.to_string());
                        dispatcher.dispatch(MovementListAction::LoadFailed(e.to_string()));
                    }
                }
            });
        })
    };

    let apply_filter = {
        let dispatcher = list.dispatcher();
        use_callback((), move |criteria: FilterCriteria, _| {
            dispatcher.dispatch(MovementListAction::FilterApplied(criteria));
        })
    };

    let clear_filter = {
        let dispatcher = list.dispatcher();
        use_callback((), move |_, _| {
            dispatcher.dispatch(MovementListAction::FilterCleared);
        })
    };

    let add_created = {
        let dispatcher = list.dispatcher();
        use_callback((), move |movement: Movement, _| {
            dispatcher.dispatch(MovementListAction::Created(movement));
        })
    };

    // Load initial list
    use_effect_with((), {
        let refresh = refresh.clone();
        move |_| {
            refresh.emit(());
            || ()
        }
    });

    let state = (*list).clone();

    let actions = UseMovementsActions {
        refresh,
        apply_filter,
        clear_filter,
        add_created,
    };

    UseMovementsResult { state, actions }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::PeriodValue;
    use wasm_bindgen_test::*;

    fn movement(month: i32, description: &str) -> Movement {
        Movement {
            month: month.into(),
            year: 2024.into(),
            product_code: "0001".to_string(),
            classification_code: "7111".to_string(),
            amount: 1.0,
            description: description.to_string(),
            id: None,
            entry_number: None,
            user_code: None,
            recorded_at: None,
        }
    }

    #[wasm_bindgen_test]
    fn test_reducer_keeps_filter_across_reload() {
        let state = Rc::new(MovementListState::default());
        let state = state.reduce(MovementListAction::FilterApplied(FilterCriteria::new(
            Some(PeriodValue::from(3)),
            None,
        )));
        let state = state.reduce(MovementListAction::LoadStarted);
        assert!(state.loading);

        let state = state.reduce(MovementListAction::Loaded(vec![movement(3, "a"), movement(4, "b")]));
        assert!(!state.loading);
        assert_eq!(state.view.visible().len(), 1);

        let state = state.reduce(MovementListAction::Created(movement(3, "new")));
        assert_eq!(state.view.visible()[0].description, "new");

        let state = state.reduce(MovementListAction::FilterCleared);
        assert_eq!(state.view.visible().len(), 3);
    }

    #[wasm_bindgen_test]
    fn test_reducer_load_failure() {
        let state = Rc::new(MovementListState::default())
            .reduce(MovementListAction::LoadStarted)
            .reduce(MovementListAction::LoadFailed("offline".to_string()));
        assert!(!state.loading);
        assert_eq!(state.error.as_deref(), Some("offline"));
    }

    #[wasm_bindgen_test]
    fn test_created_after_failed_load_is_visible() {
        let state = Rc::new(MovementListState::default())
            .reduce(MovementListAction::LoadStarted)
            .reduce(MovementListAction::LoadFailed("offline".to_string()))
            .reduce(MovementListAction::Created(movement(3, "new")));

        assert!(!state.loading);
        assert_eq!(state.view.visible().len(), 1);
        assert_eq!(state.view.visible()[0].description, "new");

        // A later successful reload clears the error
        let state = state
            .reduce(MovementListAction::LoadStarted)
            .reduce(MovementListAction::Loaded(vec![movement(3, "a")]));
        assert_eq!(state.error, None);
    }
}

use std::rc::Rc;

use shared::{Cosif, Movement, MovementForm, Product};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::date_utils::current_period;
use crate::services::logging::Logger;

#[derive(Clone, Default, PartialEq)]
pub struct MovementFormState {
    pub form: MovementForm,
    /// COSIF options for the selected product
    pub classifications: Vec<Cosif>,
    pub submitting: bool,
    pub submit_error: Option<String>,
    pub submit_success: bool,
}

pub enum MovementFormAction {
    New { month: u32, year: i32 },
    Clear,
    SetMonth(String),
    SetYear(String),
    SelectProduct(String),
    ClassificationsLoaded { product_code: String, items: Vec<Cosif> },
    SetClassification(String),
    SetAmount(String),
    SetDescription(String),
    Rejected,
    SubmitStarted,
    SubmitFailed(String),
    Submitted,
    DismissSuccess,
}

impl Reducible for MovementFormState {
    type Action = MovementFormAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            MovementFormAction::New { month, year } => {
                next.form.enable_editing(month, year);
                next.classifications.clear();
                next.submit_error = None;
                next.submit_success = false;
            }
            MovementFormAction::Clear => {
                next.form.clear();
                next.classifications.clear();
                next.submit_error = None;
            }
            MovementFormAction::SetMonth(raw) => next.form.set_month_input(&raw),
            MovementFormAction::SetYear(raw) => next.form.set_year_input(&raw),
            MovementFormAction::SelectProduct(code) => {
                next.form.select_product(&code);
                next.classifications.clear();
            }
            MovementFormAction::ClassificationsLoaded { product_code, items } => {
                if next.form.classifications_loaded(&product_code) {
                    next.classifications = items;
                }
            }
            MovementFormAction::SetClassification(code) => next.form.set_classification(&code),
            MovementFormAction::SetAmount(raw) => next.form.set_amount_input(&raw),
            MovementFormAction::SetDescription(text) => next.form.set_description(&text),
            MovementFormAction::Rejected => {
                // Only marks the form touched; the errors are derived on render
                let _ = next.form.submit();
            }
            MovementFormAction::SubmitStarted => {
                next.submitting = true;
                next.submit_error = None;
                next.submit_success = false;
            }
            MovementFormAction::SubmitFailed(message) => {
                next.submitting = false;
                next.submit_error = Some(message);
            }
            MovementFormAction::Submitted => {
                next.submitting = false;
                next.submit_success = true;
                next.form.clear();
                next.classifications.clear();
            }
            MovementFormAction::DismissSuccess => next.submit_success = false,
        }
        next.into()
    }
}

pub struct UseMovementFormResult {
    pub state: MovementFormState,
    pub products: Vec<Product>,
    pub actions: UseMovementFormActions,
}

#[derive(Clone, PartialEq)]
pub struct UseMovementFormActions {
    pub new_movement: Callback<()>,
    pub clear: Callback<()>,
    pub submit: Callback<()>,
    pub on_month_input: Callback<String>,
    pub on_year_input: Callback<String>,
    pub on_product_change: Callback<String>,
    pub on_classification_change: Callback<String>,
    pub on_amount_input: Callback<String>,
    pub on_description_input: Callback<String>,
}

/// Entry form state plus the product/COSIF lookups it depends on.
///
/// `on_created` receives the movement returned by the backend after a
/// successful submit.
#[hook]
pub fn use_movement_form(api_client: &ApiClient, on_created: Callback<Movement>) -> UseMovementFormResult {
    let form_state = use_reducer(MovementFormState::default);
    let products = use_state(Vec::<Product>::new);

    // Load products once
    use_effect_with((), {
        let api_client = api_client.clone();
        let products = products.clone();
        move |_| {
            spawn_local(async move {
                match api_client.get_products().await {
                    Ok(list) => {
                        Logger::info_with_component("use_movement_form", &format!("Loaded {} products", list.len()));
                        products.set(list);
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            "use_movement_form",
                            &format!("Falha ao carregar produtos (backend fora do ar ou CORS?): {}", e),
                        );
                    }
                }
            });
            || ()
        }
    });

    let new_movement = {
        let dispatcher = form_state.dispatcher();
        use_callback((), move |_, _| {
            let (month, year) = current_period();
            dispatcher.dispatch(MovementFormAction::New { month, year });
        })
    };

    let clear = {
        let dispatcher = form_state.dispatcher();
        use_callback((), move |_, _| dispatcher.dispatch(MovementFormAction::Clear))
    };

    let on_product_change = {
        let api_client = api_client.clone();
        let dispatcher = form_state.dispatcher();

        use_callback((), move |product_code: String, _| {
            dispatcher.dispatch(MovementFormAction::SelectProduct(product_code.clone()));
            if product_code.is_empty() {
                return;
            }

            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match api_client.get_classifications(&product_code).await {
                    Ok(items) => {
                        dispatcher.dispatch(MovementFormAction::ClassificationsLoaded { product_code, items });
                    }
                    Err(e) => {
                        Logger::warn_with_component("use_movement_form", &format!("Erro ao carregar cosifs: {}", e));
                    }
                }
            });
        })
    };

    // Rebuilt every render so validation sees the current form
    let submit = {
        let api_client = api_client.clone();
        let form_state = form_state.clone();
        let on_created = on_created.clone();

        Callback::from(move |_| {
            if form_state.submitting {
                return;
            }

            let payload = match form_state.form.validate() {
                Ok(payload) => payload,
                Err(errors) => {
                    Logger::debug_with_component("use_movement_form", &format!("Rejected submit: {} errors", errors.len()));
                    form_state.dispatch(MovementFormAction::Rejected);
                    return;
                }
            };

            let api_client = api_client.clone();
            let dispatcher = form_state.dispatcher();
            let on_created = on_created.clone();

            spawn_local(async move {
                dispatcher.dispatch(MovementFormAction::SubmitStarted);

                match api_client.create_movement(&payload).await {
                    Ok(created) => {
                        dispatcher.dispatch(MovementFormAction::Submitted);
                        on_created.emit(created);

                        gloo::timers::future::TimeoutFuture::new(3000).await;
                        dispatcher.dispatch(MovementFormAction::DismissSuccess);
                    }
                    Err(e) => {
                        Logger::error_with_component("use_movement_form", &format!("Erro ao incluir movimento: {}", e));
                        dispatcher.dispatch(MovementFormAction::SubmitFailed(e.to_string()));
                    }
                }
            });
        })
    };

    let on_month_input = field_callback(&form_state, MovementFormAction::SetMonth);
    let on_year_input = field_callback(&form_state, MovementFormAction::SetYear);
    let on_classification_change = field_callback(&form_state, MovementFormAction::SetClassification);
    let on_amount_input = field_callback(&form_state, MovementFormAction::SetAmount);
    let on_description_input = field_callback(&form_state, MovementFormAction::SetDescription);

    let state = (*form_state).clone();

    let actions = UseMovementFormActions {
        new_movement,
        clear,
        submit,
        on_month_input,
        on_year_input,
        on_product_change,
        on_classification_change,
        on_amount_input,
        on_description_input,
    };

    UseMovementFormResult {
        state,
        products: (*products).clone(),
        actions,
    }
}

fn field_callback(
    form_state: &UseReducerHandle<MovementFormState>,
    action: fn(String) -> MovementFormAction,
) -> Callback<String> {
    let dispatcher = form_state.dispatcher();
    Callback::from(move |value: String| dispatcher.dispatch(action(value)))
}

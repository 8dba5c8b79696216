use yew::prelude::*;

mod components;
mod config;
mod hooks;
mod services;

use components::forms::filter_form::FilterForm;
use components::forms::movement_entry_form::MovementEntryForm;
use components::movements::movement_table::MovementTable;
use hooks::use_movement_form::use_movement_form;
use hooks::use_movements::use_movements;
use services::api::ApiClient;
use services::logging::Logger;

#[function_component(App)]
fn app() -> Html {
    let api_client = use_memo((), |_| ApiClient::new());

    let movements = use_movements(&api_client);
    let entry = use_movement_form(&api_client, movements.actions.add_created.clone());

    let view = &movements.state.view;

    html! {
        <>
            <header class="header">
                <div class="container">
                    <h1>{"Movimentos Manuais"}</h1>
                </div>
            </header>

            <main class="main">
                <div class="container">
                    <MovementEntryForm
                        state={entry.state}
                        products={entry.products}
                        actions={entry.actions}
                    />

                    <section class="movements-section">
                        <div class="movements-header">
                            <h2>{"Movimentos"}</h2>
                            <button
                                type="button"
                                class="btn btn-secondary"
                                onclick={movements.actions.refresh.reform(|_: MouseEvent| ())}
                                disabled={movements.state.loading}
                            >
                                {"Recarregar"}
                            </button>
                            <FilterForm
                                on_apply={movements.actions.apply_filter.clone()}
                                on_clear={movements.actions.clear_filter.clone()}
                            />
                        </div>
                        <MovementTable
                            movements={view.visible().to_vec()}
                            loading={movements.state.loading}
                            error={movements.state.error.clone()}
                        />
                    </section>
                </div>
            </main>
        </>
    }
}

fn main() {
    Logger::info_with_component("main", &format!("API em {}", config::AppConfig::from_build_env().api_base_url));
    yew::Renderer::<App>::new().render();
}

use shared::{encode_keystroke, FormField, Product};
use web_sys::{HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};
use yew::prelude::*;

use crate::hooks::use_movement_form::{MovementFormState, UseMovementFormActions};

#[derive(Properties, PartialEq)]
pub struct MovementEntryFormProps {
    pub state: MovementFormState,
    pub products: Vec<Product>,
    pub actions: UseMovementFormActions,
}

fn input_value(callback: &Callback<String>) -> Callback<InputEvent> {
    callback.reform(|e: InputEvent| {
        let input: HtmlInputElement = e.target_unchecked_into();
        input.value()
    })
}

fn input_value_textarea(callback: &Callback<String>) -> Callback<InputEvent> {
    callback.reform(|e: InputEvent| {
        let textarea: HtmlTextAreaElement = e.target_unchecked_into();
        textarea.value()
    })
}

fn select_value(callback: &Callback<String>) -> Callback<Event> {
    callback.reform(|e: Event| {
        let select: HtmlSelectElement = e.target_unchecked_into();
        select.value()
    })
}

fn field_errors(state: &MovementFormState, field: FormField) -> Html {
    let errors = state.form.errors_for(field);
    if errors.is_empty() {
        return html! {};
    }
    html! {
        <div class="field-errors">
            {for errors.iter().map(|error| html! { <small class="error">{error.to_string()}</small> })}
        </div>
    }
}

#[function_component(MovementEntryForm)]
pub fn movement_entry_form(props: &MovementEntryFormProps) -> Html {
    let state = &props.state;
    let form = &state.form;
    let actions = &props.actions;
    let locked = !form.is_enabled() || state.submitting;

    // Re-mask in place so the input never shows unmasked text, even when
    // the masked value did not change.
    let on_amount_input = {
        let on_amount_input = actions.on_amount_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            input.set_value(&encode_keystroke(&raw).display);
            on_amount_input.emit(raw);
        })
    };

    let onsubmit = {
        let submit = actions.submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            submit.emit(());
        })
    };

    html! {
        <section class="movement-entry-section">
            <h2>{"Movimentos Manuais"}</h2>

            {if let Some(error) = state.submit_error.as_ref() {
                html! { <div class="form-message error">{error}</div> }
            } else { html! {} }}

            {if state.submit_success {
                html! { <div class="form-message success">{"Movimento incluído com sucesso!"}</div> }
            } else { html! {} }}

            <form class="movement-entry-form" {onsubmit}>
                <div class="form-row">
                    <div class="form-group">
                        <label for="mes">{"Mês"}</label>
                        <input
                            type="number"
                            id="mes"
                            min="1"
                            max="12"
                            value={form.month.map(|m| m.to_string()).unwrap_or_default()}
                            oninput={input_value(&actions.on_month_input)}
                            disabled={locked}
                        />
                        {field_errors(state, FormField::Month)}
                    </div>

                    <div class="form-group">
                        <label for="ano">{"Ano"}</label>
                        <input
                            type="number"
                            id="ano"
                            min="1900"
                            value={form.year.map(|y| y.to_string()).unwrap_or_default()}
                            oninput={input_value(&actions.on_year_input)}
                            disabled={locked}
                        />
                        {field_errors(state, FormField::Year)}
                    </div>
                </div>

                <div class="form-group">
                    <label for="produto">{"Produto"}</label>
                    <select
                        id="produto"
                        onchange={select_value(&actions.on_product_change)}
                        disabled={locked}
                    >
                        <option value="" selected={form.product_code.is_empty()}>{"Selecione"}</option>
                        {for props.products.iter().map(|product| html! {
                            <option
                                value={product.code.clone()}
                                selected={product.code == form.product_code}
                            >
                                {format!("{} - {}", product.code, product.description)}
                            </option>
                        })}
                    </select>
                    {field_errors(state, FormField::Product)}
                </div>

                <div class="form-group">
                    <label for="cosif">{"Cosif"}</label>
                    <select
                        id="cosif"
                        onchange={select_value(&actions.on_classification_change)}
                        disabled={locked || !form.is_classification_enabled()}
                    >
                        <option value="" selected={form.classification_code.is_empty()}>{"Selecione"}</option>
                        {for state.classifications.iter().map(|cosif| html! {
                            <option
                                value={cosif.code.clone()}
                                selected={cosif.code == form.classification_code}
                            >
                                {match cosif.classification.as_ref() {
                                    Some(classification) => format!("{} - {}", cosif.code, classification),
                                    None => cosif.code.clone(),
                                }}
                            </option>
                        })}
                    </select>
                    {field_errors(state, FormField::Classification)}
                </div>

                <div class="form-group">
                    <label for="valor">{"Valor (R$)"}</label>
                    <input
                        type="text"
                        id="valor"
                        inputmode="numeric"
                        placeholder="0,00"
                        value={form.amount.display.clone()}
                        oninput={on_amount_input}
                        disabled={locked}
                    />
                    {field_errors(state, FormField::Amount)}
                </div>

                <div class="form-group">
                    <label for="descricao">{"Descrição"}</label>
                    <textarea
                        id="descricao"
                        maxlength="50"
                        value={form.description.clone()}
                        oninput={input_value_textarea(&actions.on_description_input)}
                        disabled={locked}
                    />
                    {field_errors(state, FormField::Description)}
                </div>

                <div class="form-actions">
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={actions.clear.reform(|_: MouseEvent| ())}
                        disabled={state.submitting}
                    >
                        {"Limpar"}
                    </button>
                    <button
                        type="button"
                        class="btn btn-secondary"
                        onclick={actions.new_movement.reform(|_: MouseEvent| ())}
                        disabled={state.submitting}
                    >
                        {"Novo"}
                    </button>
                    <button type="submit" class="btn btn-primary" disabled={locked}>
                        {if state.submitting { "Incluindo..." } else { "Incluir" }}
                    </button>
                </div>
            </form>
        </section>
    }
}

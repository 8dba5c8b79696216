use shared::FilterCriteria;
use web_sys::HtmlInputElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct FilterFormProps {
    pub on_apply: Callback<FilterCriteria>,
    pub on_clear: Callback<()>,
}

/// Month/year filter over the loaded list. Blank inputs do not filter.
#[function_component(FilterForm)]
pub fn filter_form(props: &FilterFormProps) -> Html {
    let month = use_state(String::new);
    let year = use_state(String::new);

    let on_month_input = {
        let month = month.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            month.set(input.value());
        })
    };

    let on_year_input = {
        let year = year.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            year.set(input.value());
        })
    };

    let onsubmit = {
        let month = month.clone();
        let year = year.clone();
        let on_apply = props.on_apply.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_apply.emit(FilterCriteria::from_inputs(&month, &year));
        })
    };

    let on_clear = {
        let month = month.clone();
        let year = year.clone();
        let on_clear = props.on_clear.clone();
        Callback::from(move |_: MouseEvent| {
            month.set(String::new());
            year.set(String::new());
            on_clear.emit(());
        })
    };

    html! {
        <form class="filter-form" {onsubmit}>
            <div class="form-group">
                <label for="filtro-mes">{"Mês"}</label>
                <input type="number" id="filtro-mes" min="1" max="12" value={(*month).clone()} oninput={on_month_input} />
            </div>
            <div class="form-group">
                <label for="filtro-ano">{"Ano"}</label>
                <input type="number" id="filtro-ano" min="1900" value={(*year).clone()} oninput={on_year_input} />
            </div>
            <button type="submit" class="btn btn-primary">{"Filtrar"}</button>
            <button type="button" class="btn btn-secondary" onclick={on_clear}>{"Limpar filtro"}</button>
        </form>
    }
}

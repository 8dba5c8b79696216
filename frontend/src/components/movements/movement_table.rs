use shared::Movement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct MovementTableProps {
    pub movements: Vec<Movement>,
    pub loading: bool,
    #[prop_or_default]
    pub error: Option<String>,
}

#[function_component(MovementTable)]
pub fn movement_table(props: &MovementTableProps) -> Html {
    if props.loading {
        return html! { <div class="loading">{"Carregando movimentos..."}</div> };
    }

    // The error does not hide rows created after a failed load
    let error_banner = match props.error.as_ref() {
        Some(error) => html! {
            <div class="form-message error">{format!("Erro ao carregar movimentos: {}", error)}</div>
        },
        None => html! {},
    };

    if props.movements.is_empty() {
        return html! {
            <>
                {error_banner}
                <div class="empty">{"Nenhum movimento encontrado."}</div>
            </>
        };
    }

    html! {
        <>
        {error_banner}
        <div class="table-container">
            <table class="movements-table">
                <thead>
                    <tr>
                        <th>{"Mês/Ano"}</th>
                        <th>{"Produto"}</th>
                        <th>{"Cosif"}</th>
                        <th>{"Nº Lançamento"}</th>
                        <th>{"Descrição"}</th>
                        <th>{"Valor"}</th>
                        <th>{"Usuário"}</th>
                        <th>{"Data"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for props.movements.iter().map(|movement| html! {
                        <tr>
                            <td class="period">{movement.period_label()}</td>
                            <td>{&movement.product_code}</td>
                            <td>{&movement.classification_code}</td>
                            <td>{movement.entry_number.map(|n| n.to_string()).unwrap_or_default()}</td>
                            <td class="description">{&movement.description}</td>
                            <td class="amount">{movement.formatted_amount()}</td>
                            <td>{movement.user_code.clone().unwrap_or_default()}</td>
                            <td class="date">{movement.formatted_recorded_at()}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
        </>
    }
}

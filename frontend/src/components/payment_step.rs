use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PaymentStepProps {
    pub busy: bool,
    /// Payment already recorded; the view is informational only
    pub completed: bool,
    pub on_payment_success: Callback<()>,
    pub on_resume: Callback<()>,
}

#[function_component(PaymentStep)]
pub fn payment_step(props: &PaymentStepProps) -> Html {
    if props.completed {
        let on_resume = props.on_resume.reform(|_: MouseEvent| ());
        return html! {
            <div class="step-content payment-step">
                <h2>{"Fizetés sikeres"}</h2>
                <p class="muted">{"A tagságod díját rögzítettük."}</p>
                <button type="button" class="btn btn-primary" onclick={on_resume}>
                    {"Tovább"}
                </button>
            </div>
        };
    }

    let on_simulate = props.on_payment_success.reform(|_: MouseEvent| ());

    html! {
        <div class="step-content payment-step">
            <div class="loading-spinner" />

            <h2>{"Fizetés folyamatban"}</h2>
            <p class="muted">{"Kérjük kövesse a lépéseket az új ablakban."}</p>

            <div class="divider" />

            <p class="muted small">{"Teszteléshez:"}</p>
            <button
                type="button"
                class="btn btn-outline"
                onclick={on_simulate}
                disabled={props.busy}
            >
                {if props.busy { "Mentés..." } else { "Fizetés szimulálása" }}
            </button>
        </div>
    }
}

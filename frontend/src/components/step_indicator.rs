use club_card_core::WizardState;
use shared::WizardStep;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct StepIndicatorProps {
    pub state: WizardState,
    pub on_step_click: Callback<WizardStep>,
}

fn circle_classes(state: &WizardState, step: WizardStep) -> Classes {
    let completed = state.is_completed(step);
    let active = state.is_active(step);

    let mut classes = classes!("step-circle");
    if completed {
        classes.push("step-circle-completed");
    } else if active {
        classes.push("step-circle-active");
    } else {
        classes.push("step-circle-inactive");
    }
    if state.is_clickable(step) {
        classes.push("step-circle-clickable");
    }
    classes
}

#[function_component(StepIndicator)]
pub fn step_indicator(props: &StepIndicatorProps) -> Html {
    let state = &props.state;
    let last = WizardStep::ALL.len() - 1;

    html! {
        <div class="step-indicator">
            {for WizardStep::ALL.iter().enumerate().map(|(index, &step)| {
                let clickable = state.is_clickable(step);
                let completed = state.is_completed(step);
                let highlighted = completed || state.is_active(step);

                let onclick = {
                    let on_step_click = props.on_step_click.clone();
                    Callback::from(move |_: MouseEvent| {
                        if clickable {
                            on_step_click.emit(step);
                        }
                    })
                };

                html! {
                    <div class="step-item" key={step.number().to_string()}>
                        <div class="step-column">
                            <button
                                type="button"
                                class={circle_classes(state, step)}
                                disabled={!clickable && !state.is_active(step)}
                                aria-label={format!("{} - Step {}", step.label(), step.number())}
                                {onclick}
                            >
                                {if completed {
                                    html! { <span class="step-check">{"✓"}</span> }
                                } else {
                                    html! { {step.number().to_string()} }
                                }}
                            </button>
                            <span class={classes!("step-label", highlighted.then_some("step-label-highlighted"))}>
                                {step.label()}
                            </span>
                        </div>

                        {if index < last {
                            let connector = if completed {
                                "step-connector-active"
                            } else {
                                "step-connector-inactive"
                            };
                            html! { <div class={classes!("step-connector", connector)} /> }
                        } else { html! {} }}
                    </div>
                }
            })}
        </div>
    }
}

use shared::WizardStep;
use yew::prelude::*;

use super::payment_step::PaymentStep;
use super::personal_data_step::PersonalDataStep;
use super::step_indicator::StepIndicator;
use super::summary_step::SummaryStep;
use crate::config::AppConfig;
use crate::hooks::use_signup_wizard::use_signup_wizard;

#[derive(Properties, PartialEq)]
pub struct ClubCardFormProps {
    pub config: AppConfig,
}

#[function_component(ClubCardForm)]
pub fn club_card_form(props: &ClubCardFormProps) -> Html {
    let wizard = use_signup_wizard(&props.config);
    let view = &wizard.view;
    let actions = &wizard.actions;
    let state = &view.wizard;
    let signup = &props.config.signup;

    let current_step = match state.current_step() {
        WizardStep::PersonalData => html! {
            <PersonalDataStep
                form={state.form().clone()}
                errors={state.form_errors().clone()}
                busy={view.is_busy()}
                completed={state.is_completed(WizardStep::PersonalData)}
                min_birth_year={signup.min_birth_year}
                on_field_change={actions.on_field_change.clone()}
                on_submit={actions.on_submit.clone()}
                on_simulate={actions.on_simulate.clone()}
                on_resume={actions.on_resume.clone()}
            />
        },
        WizardStep::Payment => html! {
            <PaymentStep
                busy={view.is_busy()}
                completed={state.is_completed(WizardStep::Payment)}
                on_payment_success={actions.on_payment_success.clone()}
                on_resume={actions.on_resume.clone()}
            />
        },
        WizardStep::Summary => match state.member() {
            Some(member) => html! {
                <SummaryStep member={member.clone()} qr_size_px={signup.qr_size_px} />
            },
            // Unreachable through the wizard transitions
            None => html! {},
        },
    };

    let notification = match &view.notification {
        Some(message) => {
            let on_dismiss = actions.dismiss_notification.reform(|_: MouseEvent| ());
            html! {
                <div class="notification error" role="alert" onclick={on_dismiss}>
                    {message}
                </div>
            }
        }
        None => html! {},
    };

    html! {
        <div class="form-card">
            <StepIndicator state={state.clone()} on_step_click={actions.on_step_click.clone()} />
            <div class="divider" />
            <div class="form-content">
                {current_step}
            </div>
            {notification}
            {if props.config.is_offline() {
                html! { <p class="offline-badge">{"Offline mód"}</p> }
            } else { html! {} }}
        </div>
    }
}

use std::cell::RefCell;
use std::rc::Rc;

use club_card_core::{FieldChange, SignupWizard, WizardError, WizardState};
use gloo::timers::future::TimeoutFuture;
use shared::{PersonalDataForm, WizardStep};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::AppConfig;
use crate::services::logging::Logger;
use crate::services::store::MemberBackend;

const COMPONENT: &str = "signup";

type Wizard = SignupWizard<MemberBackend>;

#[derive(Clone, Copy, Debug)]
enum Transition {
    SubmitPersonalData,
    SubmitDemoData,
    ConfirmPayment,
}

impl Transition {
    fn describe(self) -> &'static str {
        match self {
            Transition::SubmitPersonalData => "Personal data submission",
            Transition::SubmitDemoData => "Demo submission",
            Transition::ConfirmPayment => "Payment confirmation",
        }
    }
}

#[derive(Clone, PartialEq)]
pub struct SignupWizardView {
    pub wizard: WizardState,
    /// A request was started from the UI and has not finished yet
    pub pending: bool,
    pub notification: Option<String>,
}

impl SignupWizardView {
    pub fn is_busy(&self) -> bool {
        self.pending || self.wizard.is_submitting()
    }
}

pub struct UseSignupWizardResult {
    pub view: SignupWizardView,
    pub actions: UseSignupWizardActions,
}

#[derive(Clone, PartialEq)]
pub struct UseSignupWizardActions {
    pub on_field_change: Callback<FieldChange>,
    pub on_submit: Callback<()>,
    pub on_simulate: Callback<()>,
    pub on_payment_success: Callback<()>,
    pub on_step_click: Callback<WizardStep>,
    pub on_resume: Callback<()>,
    pub dismiss_notification: Callback<()>,
}

/// Shows a transient message and clears it after `duration_ms` unless a
/// newer message replaced it in the meantime
#[derive(Clone)]
struct Notifier {
    message: UseStateHandle<Option<String>>,
    sequence: Rc<RefCell<u32>>,
    duration_ms: u32,
}

impl Notifier {
    fn show(&self, text: &str) {
        let id = {
            let mut sequence = self.sequence.borrow_mut();
            *sequence = sequence.wrapping_add(1);
            *sequence
        };
        self.message.set(Some(text.to_string()));

        let message = self.message.clone();
        let sequence = self.sequence.clone();
        let duration_ms = self.duration_ms;
        spawn_local(async move {
            TimeoutFuture::new(duration_ms).await;
            if *sequence.borrow() == id {
                message.set(None);
            }
        });
    }

    fn clear(&self) {
        *self.sequence.borrow_mut() += 1;
        self.message.set(None);
    }
}

/// Report a failed transition. Field errors are rendered inline from the
/// wizard state, everything else goes to the notification.
fn report_failure(notifier: &Notifier, action: &str, error: &WizardError) {
    match error {
        WizardError::Validation(errors) => {
            Logger::debug_with_component(COMPONENT, &format!("{} rejected: {}", action, errors));
        }
        WizardError::SubmissionInProgress => {
            Logger::debug_with_component(COMPONENT, &format!("{} ignored: request in flight", action));
        }
        _ => {
            Logger::error_with_component(COMPONENT, &format!("{} failed: {}", action, error));
            notifier.show(error.user_message());
        }
    }
}

#[hook]
pub fn use_signup_wizard(config: &AppConfig) -> UseSignupWizardResult {
    let wizard = {
        let config = config.clone();
        use_memo((), move |_| {
            let store = MemberBackend::from_config(&config);
            Wizard::with_config(store, config.signup.clone())
        })
    };

    let snapshot = {
        let wizard = wizard.clone();
        use_state(move || wizard.state())
    };
    let pending = use_state(|| false);
    let message = use_state(|| Option::<String>::None);
    let sequence = use_mut_ref(|| 0u32);

    let notifier = Notifier {
        message: message.clone(),
        sequence,
        duration_ms: config.signup.notification_duration_ms,
    };

    let on_field_change = {
        let wizard = wizard.clone();
        let snapshot = snapshot.clone();

        use_callback((), move |change: FieldChange, _| {
            match wizard.update_field(change) {
                Ok(()) => snapshot.set(wizard.state()),
                Err(e) => Logger::debug_with_component(
                    COMPONENT,
                    &format!("Field change ignored: {}", e),
                ),
            }
        })
    };

    // Shared driver for the three async transitions
    let run = {
        let wizard = wizard.clone();
        let snapshot = snapshot.clone();
        let pending = pending.clone();
        let notifier = notifier.clone();

        move |transition: Transition| {
            let wizard = wizard.clone();
            let snapshot = snapshot.clone();
            let pending = pending.clone();
            let notifier = notifier.clone();

            pending.set(true);
            spawn_local(async move {
                let result = match transition {
                    Transition::SubmitPersonalData => wizard.submit_personal_data().await,
                    Transition::SubmitDemoData => {
                        wizard.submit_personal_data_with(PersonalDataForm::demo()).await
                    }
                    Transition::ConfirmPayment => wizard.confirm_payment().await,
                };

                match result {
                    Ok(member) => {
                        Logger::info_with_component(
                            COMPONENT,
                            &format!("{} succeeded for {}", transition.describe(), member.member_id),
                        );
                        notifier.clear();
                    }
                    Err(e) => report_failure(&notifier, transition.describe(), &e),
                }

                snapshot.set(wizard.state());
                pending.set(false);
            });
        }
    };

    let on_submit = {
        let run = run.clone();
        Callback::from(move |_: ()| run(Transition::SubmitPersonalData))
    };

    let on_simulate = {
        let run = run.clone();
        Callback::from(move |_: ()| run(Transition::SubmitDemoData))
    };

    let on_payment_success = Callback::from(move |_: ()| run(Transition::ConfirmPayment));

    let on_step_click = {
        let wizard = wizard.clone();
        let snapshot = snapshot.clone();

        use_callback((), move |step: WizardStep, _| {
            if wizard.go_to_step(step) {
                snapshot.set(wizard.state());
            }
        })
    };

    let on_resume = {
        let wizard = wizard.clone();
        let snapshot = snapshot.clone();

        use_callback((), move |_: (), _| {
            let step = wizard.resume();
            Logger::debug_with_component(COMPONENT, &format!("Resuming at step {}", step));
            snapshot.set(wizard.state());
        })
    };

    let dismiss_notification = {
        let notifier = notifier.clone();
        Callback::from(move |_: ()| notifier.clear())
    };

    UseSignupWizardResult {
        view: SignupWizardView {
            wizard: (*snapshot).clone(),
            pending: *pending,
            notification: (*message).clone(),
        },
        actions: UseSignupWizardActions {
            on_field_change,
            on_submit,
            on_simulate,
            on_payment_success,
            on_step_click,
            on_resume,
            dismiss_notification,
        },
    }
}

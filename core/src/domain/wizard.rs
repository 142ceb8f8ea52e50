//! Step wizard controller.
//!
//! `SignupWizard` owns the whole sign-up session: current step, completed
//! steps, the form and the member record once it exists. The UI only reads
//! snapshots of `WizardState` and requests changes through the transition
//! methods below; there are no raw setters.
//!
//! State lives in a `RefCell` because the wizard runs on a single event
//! loop. A borrow is never held across an `.await`, so the UI may render
//! (and read the state) while a request is in flight.

use anyhow::Context;
use chrono::{DateTime, Datelike, Days, Months, NaiveDate, SecondsFormat, Utc};
use shared::{
    CreateMemberRequest, FormErrors, MemberRecord, PaymentUpdateRequest, PersonalDataForm,
    SignupConfig, WizardStep,
};
use std::cell::RefCell;
use std::collections::BTreeSet;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::member_id::{derive_member_id, generate_token};
use super::phone::format_phone;
use super::validation::FormValidator;
use crate::storage::MemberStore;

/// A single edit of the personal data form
#[derive(Debug, Clone, PartialEq)]
pub enum FieldChange {
    FirstName(String),
    LastName(String),
    BirthYear(String),
    BirthMonth(String),
    BirthDay(String),
    Email(String),
    /// Raw input; the stored value is re-masked on every change
    Phone(String),
    AcceptedPrivacy(bool),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    #[error("personal data is invalid ({0})")]
    Validation(FormErrors),
    #[error("could not save membership data: {0}")]
    Persistence(String),
    #[error("a submission is already in progress")]
    SubmissionInProgress,
    #[error("step {0} is already completed")]
    StepCompleted(WizardStep),
    #[error("cannot {action} while on step {current}")]
    InvalidTransition {
        action: &'static str,
        current: WizardStep,
    },
    #[error("no member record has been created yet")]
    MemberNotCreated,
    #[error("membership end date is out of range")]
    DateOutOfRange,
}

impl WizardError {
    /// Whether resubmitting the same action may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, WizardError::Persistence(_))
    }

    /// Notification text for errors that are not rendered next to a field
    pub fn user_message(&self) -> &'static str {
        match self {
            WizardError::Validation(_) => "Kérjük javítsa a megjelölt mezőket.",
            WizardError::Persistence(_) => {
                "Nem sikerült menteni az adatokat. Kérjük próbálja újra."
            }
            WizardError::SubmissionInProgress => "A kérés feldolgozása folyamatban van.",
            WizardError::StepCompleted(_) => "Ez a lépés már lezárult.",
            WizardError::InvalidTransition { .. }
            | WizardError::MemberNotCreated
            | WizardError::DateOutOfRange => "Váratlan hiba történt.",
        }
    }
}

/// Snapshot of one sign-up session
#[derive(Debug, Clone, PartialEq)]
pub struct WizardState {
    current_step: WizardStep,
    completed_steps: BTreeSet<WizardStep>,
    submitting: bool,
    form: PersonalDataForm,
    form_errors: FormErrors,
    member: Option<MemberRecord>,
}

impl WizardState {
    pub fn new() -> Self {
        Self {
            current_step: WizardStep::PersonalData,
            completed_steps: BTreeSet::new(),
            submitting: false,
            form: PersonalDataForm::default(),
            form_errors: FormErrors::new(),
            member: None,
        }
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn completed_steps(&self) -> &BTreeSet<WizardStep> {
        &self.completed_steps
    }

    pub fn is_completed(&self, step: WizardStep) -> bool {
        self.completed_steps.contains(&step)
    }

    pub fn is_active(&self, step: WizardStep) -> bool {
        self.current_step == step
    }

    /// Completed steps and steps before the current one can be jumped to
    pub fn is_clickable(&self, step: WizardStep) -> bool {
        self.is_completed(step) || step < self.current_step
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn form(&self) -> &PersonalDataForm {
        &self.form
    }

    /// Errors of the last rejected step 1 submission
    pub fn form_errors(&self) -> &FormErrors {
        &self.form_errors
    }

    pub fn member(&self) -> Option<&MemberRecord> {
        self.member.as_ref()
    }

    /// First step that still has work to do
    pub fn first_open_step(&self) -> WizardStep {
        WizardStep::ALL
            .into_iter()
            .find(|step| !self.is_completed(*step))
            .unwrap_or(WizardStep::Summary)
    }
}

impl Default for WizardState {
    fn default() -> Self {
        Self::new()
    }
}

/// Add `months` calendar months to `start`. A day that does not exist in
/// the target month overflows into the next one, so 29 Feb 2024 plus a
/// year is 1 Mar 2025.
fn membership_end(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    let end = start.checked_add_months(Months::new(months))?;
    let overflow = start.day().saturating_sub(end.day());
    end.checked_add_days(Days::new(u64::from(overflow)))
}

/// Controller driving the three-step sign-up against a `MemberStore`
pub struct SignupWizard<S> {
    store: S,
    validator: FormValidator,
    config: SignupConfig,
    state: RefCell<WizardState>,
}

impl<S: MemberStore> SignupWizard<S> {
    pub fn new(store: S) -> Self {
        Self::with_config(store, SignupConfig::default())
    }

    pub fn with_config(store: S, config: SignupConfig) -> Self {
        Self {
            store,
            validator: FormValidator::with_config(config.clone()),
            config,
            state: RefCell::new(WizardState::new()),
        }
    }

    /// Copy of the current state for rendering
    pub fn state(&self) -> WizardState {
        self.state.borrow().clone()
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.borrow().current_step
    }

    pub fn config(&self) -> &SignupConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Apply one form edit. The form is frozen once step 1 is completed
    /// and while its submission is in flight.
    pub fn update_field(&self, change: FieldChange) -> Result<(), WizardError> {
        let mut state = self.state.borrow_mut();
        if state.is_completed(WizardStep::PersonalData) {
            return Err(WizardError::StepCompleted(WizardStep::PersonalData));
        }
        if state.submitting {
            return Err(WizardError::SubmissionInProgress);
        }

        let form = &mut state.form;
        match change {
            FieldChange::FirstName(value) => form.first_name = value,
            FieldChange::LastName(value) => form.last_name = value,
            FieldChange::BirthYear(value) => form.birth_year = value,
            FieldChange::BirthMonth(value) => form.birth_month = value,
            FieldChange::BirthDay(value) => form.birth_day = value,
            FieldChange::Email(value) => form.email = value,
            FieldChange::Phone(value) => form.phone = format_phone(&value),
            FieldChange::AcceptedPrivacy(value) => form.accepted_privacy = value,
        }
        Ok(())
    }

    /// Handle a click on a step number. Returns whether the step changed.
    pub fn go_to_step(&self, step: WizardStep) -> bool {
        let mut state = self.state.borrow_mut();
        if !state.is_clickable(step) {
            debug!("Ignoring click on step {} from step {}", step, state.current_step);
            return false;
        }
        debug!("Navigating from step {} to step {}", state.current_step, step);
        state.current_step = step;
        true
    }

    /// Return from a revisited step to the first step not yet completed
    pub fn resume(&self) -> WizardStep {
        let mut state = self.state.borrow_mut();
        let step = state.first_open_step();
        state.current_step = step;
        step
    }

    /// Replace the whole form and submit it (the "Szimulálás" action)
    pub async fn submit_personal_data_with(
        &self,
        form: PersonalDataForm,
    ) -> Result<MemberRecord, WizardError> {
        {
            let mut state = self.state.borrow_mut();
            Self::check_can_submit_personal_data(&state)?;
            state.form = PersonalDataForm {
                phone: format_phone(&form.phone),
                ..form
            };
        }
        self.submit_personal_data().await
    }

    /// Step 1 -> step 2: validate, generate the member identifiers and
    /// create the remote member row.
    ///
    /// On failure the wizard stays on step 1 and the step is not marked
    /// completed. A retry generates a fresh token.
    pub async fn submit_personal_data(&self) -> Result<MemberRecord, WizardError> {
        let (member, request) = self.begin_personal_data_submission()?;

        info!("Creating member row {} ({})", member.member_uuid, member.member_id);
        let result = self.store.create_member(&request).await;

        let mut state = self.state.borrow_mut();
        state.submitting = false;
        match result {
            Ok(()) => {
                info!("✅ Member {} created, moving to payment", member.member_id);
                state.member = Some(member.clone());
                state.completed_steps.insert(WizardStep::PersonalData);
                state.current_step = WizardStep::Payment;
                Ok(member)
            }
            Err(e) => {
                warn!("Failed to create member {}: {:#}", member.member_uuid, e);
                Err(WizardError::Persistence(format!("{:#}", e)))
            }
        }
    }

    fn check_can_submit_personal_data(state: &WizardState) -> Result<(), WizardError> {
        if state.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if state.is_completed(WizardStep::PersonalData) {
            return Err(WizardError::StepCompleted(WizardStep::PersonalData));
        }
        if state.current_step != WizardStep::PersonalData {
            return Err(WizardError::InvalidTransition {
                action: "submit personal data",
                current: state.current_step,
            });
        }
        Ok(())
    }

    fn begin_personal_data_submission(
        &self,
    ) -> Result<(MemberRecord, CreateMemberRequest), WizardError> {
        let mut state = self.state.borrow_mut();
        Self::check_can_submit_personal_data(&state)?;

        let errors = self.validator.validate(&state.form);
        if !errors.is_empty() {
            warn!("Personal data rejected: {}", errors);
            state.form_errors = errors.clone();
            return Err(WizardError::Validation(errors));
        }
        state.form_errors = FormErrors::new();

        let token = generate_token();
        let member_id = derive_member_id(&token, &state.form.last_name);
        let member = MemberRecord::new(token, member_id);
        let request = CreateMemberRequest::new(&member, &state.form);

        state.submitting = true;
        Ok((member, request))
    }

    /// Step 2 -> step 3 on the "payment succeeded" signal
    pub async fn confirm_payment(&self) -> Result<MemberRecord, WizardError> {
        self.confirm_payment_at(Utc::now()).await
    }

    /// Record a payment made at `now`: payment date, membership end one
    /// membership period after today, and membership start only when the
    /// stored row has none.
    pub async fn confirm_payment_at(&self, now: DateTime<Utc>) -> Result<MemberRecord, WizardError> {
        let (member, start, end) = self.begin_payment_confirmation(now)?;

        info!("Recording payment of member {}", member.member_id);
        let result = self.record_payment(&member, now, start, end).await;

        let mut state = self.state.borrow_mut();
        state.submitting = false;
        match result {
            Ok(effective_start) => {
                let paid = MemberRecord {
                    payment_status: true,
                    payment_date: Some(now),
                    membership_start: Some(effective_start),
                    membership_end: Some(end),
                    ..member
                };
                info!(
                    "✅ Membership of {} valid from {} to {}",
                    paid.member_id, effective_start, end
                );
                state.member = Some(paid.clone());
                state.completed_steps.insert(WizardStep::Payment);
                state.current_step = WizardStep::Summary;
                Ok(paid)
            }
            Err(e) => {
                warn!("Failed to record payment of {}: {:#}", member.member_uuid, e);
                Err(WizardError::Persistence(format!("{:#}", e)))
            }
        }
    }

    fn begin_payment_confirmation(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(MemberRecord, NaiveDate, NaiveDate), WizardError> {
        let mut state = self.state.borrow_mut();
        if state.submitting {
            return Err(WizardError::SubmissionInProgress);
        }
        if state.is_completed(WizardStep::Payment) {
            return Err(WizardError::StepCompleted(WizardStep::Payment));
        }
        if state.current_step != WizardStep::Payment {
            return Err(WizardError::InvalidTransition {
                action: "confirm payment",
                current: state.current_step,
            });
        }
        let member = state.member.clone().ok_or(WizardError::MemberNotCreated)?;

        let start = now.date_naive();
        let end = membership_end(start, self.config.membership_months)
            .ok_or(WizardError::DateOutOfRange)?;

        state.submitting = true;
        Ok((member, start, end))
    }

    /// Returns the membership start in effect after the update
    async fn record_payment(
        &self,
        member: &MemberRecord,
        now: DateTime<Utc>,
        start: NaiveDate,
        end: NaiveDate,
    ) -> anyhow::Result<NaiveDate> {
        let stored = self
            .store
            .get_membership_start(&member.member_uuid)
            .await
            .context("failed to read membership start")?
            .with_context(|| format!("member {} not found", member.member_uuid))?;

        if let Some(existing) = stored.membership_start {
            debug!("Keeping existing membership start {}", existing);
        }

        let update = PaymentUpdateRequest {
            payment_date: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            payment_status: true,
            membership_end: end,
            membership_start: match stored.membership_start {
                Some(_) => None,
                None => Some(start),
            },
        };

        self.store
            .update_payment(&member.member_uuid, &update)
            .await
            .context("failed to update payment")?;

        Ok(stored.membership_start.unwrap_or(start))
    }
}

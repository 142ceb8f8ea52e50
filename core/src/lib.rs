//! # Club Card Core
//!
//! Business logic of the club card sign-up wizard, independent of any UI
//! framework or remote backend.
//!
//! - **domain**: member id generation, form validation, phone masking and
//!   the step wizard controller
//! - **storage**: the `MemberStore` abstraction over the remote member table

pub mod domain;
pub mod storage;

pub use domain::wizard::{FieldChange, SignupWizard, WizardError, WizardState};
pub use storage::{InMemoryMemberStore, MemberStore};

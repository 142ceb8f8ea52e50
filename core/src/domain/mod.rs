//! # Domain Module
//!
//! Contains the business rules of the sign-up flow.
//!
//! ## Module Organization
//!
//! - **member_id**: random token and public member id generation, QR payload
//! - **validation**: field validators for the personal data form
//! - **phone**: `+36 XX XXX XXXX` input mask
//! - **wizard**: the three-step state machine driving the sign-up
//!
//! ## Business Rules
//!
//! - Nothing is persisted before the personal data form validates
//! - A member id is the first 8 characters of the token plus the uppercased surname
//! - Membership starts at the first confirmed payment and lasts one year
//! - A membership start, once stored, is never overwritten
//! - Completed steps can be revisited but never resubmitted

pub mod member_id;
pub mod phone;
pub mod validation;
pub mod wizard;

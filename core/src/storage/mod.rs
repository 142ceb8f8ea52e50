//! # Storage Module
//!
//! Persistence seam of the sign-up flow. The member table lives in a remote
//! hosted backend; the domain layer only talks to it through the
//! `MemberStore` trait so the wizard can run against the real REST client
//! in the browser, or against `InMemoryMemberStore` in tests and offline
//! development.

pub mod memory;
pub mod traits;

pub use memory::{InMemoryMemberStore, StoredMember};
pub use traits::MemberStore;

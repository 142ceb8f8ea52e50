//! # Storage Traits

use anyhow::Result;
use async_trait::async_trait;
use shared::{CreateMemberRequest, MembershipStartRow, PaymentUpdateRequest};

/// Remote member table consumed by the sign-up wizard
///
/// Futures are not required to be `Send`: the wizard runs on a single
/// event loop and browser HTTP futures are thread-bound.
#[async_trait(?Send)]
pub trait MemberStore {
    /// Insert one unpaid member row keyed by its `vendeg_uuid`
    async fn create_member(&self, request: &CreateMemberRequest) -> Result<()>;

    /// Read the stored membership start of a member.
    /// Returns `None` when no row exists for the given uuid.
    async fn get_membership_start(&self, member_uuid: &str) -> Result<Option<MembershipStartRow>>;

    /// Patch the payment fields of an existing member row
    async fn update_payment(&self, member_uuid: &str, update: &PaymentUpdateRequest) -> Result<()>;
}

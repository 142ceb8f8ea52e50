use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use shared::{CreateMemberRequest, MembershipStartRow, PaymentUpdateRequest};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

use super::MemberStore;

/// A member row as held by `InMemoryMemberStore`
#[derive(Debug, Clone, PartialEq)]
pub struct StoredMember {
    pub member: CreateMemberRequest,
    pub payment_status: bool,
    pub payment_date: Option<String>,
    pub membership_start: Option<NaiveDate>,
    pub membership_end: Option<NaiveDate>,
}

#[derive(Default)]
struct Inner {
    rows: BTreeMap<String, StoredMember>,
    create_requests: Vec<CreateMemberRequest>,
    update_requests: Vec<(String, PaymentUpdateRequest)>,
    fail_next_create: bool,
    fail_next_update: bool,
}

/// Member table kept in process memory
///
/// Clones share the same rows, so a test can hand one handle to the wizard
/// and inspect the recorded requests through another.
#[derive(Clone, Default)]
pub struct InMemoryMemberStore {
    inner: Arc<Mutex<Inner>>,
}

impl InMemoryMemberStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, member_uuid: &str) -> Option<StoredMember> {
        self.lock().rows.get(member_uuid).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Every create request received, including rejected ones
    pub fn create_requests(&self) -> Vec<CreateMemberRequest> {
        self.lock().create_requests.clone()
    }

    /// Every payment update received, including rejected ones
    pub fn update_requests(&self) -> Vec<(String, PaymentUpdateRequest)> {
        self.lock().update_requests.clone()
    }

    /// Make the next `create_member` call fail like a network error would
    pub fn fail_next_create(&self) {
        self.lock().fail_next_create = true;
    }

    /// Make the next `update_payment` call fail like a network error would
    pub fn fail_next_update(&self) {
        self.lock().fail_next_update = true;
    }

    /// Overwrite the stored membership start of an existing row
    pub fn set_membership_start(&self, member_uuid: &str, start: NaiveDate) -> Result<()> {
        let mut inner = self.lock();
        let row = inner
            .rows
            .get_mut(member_uuid)
            .ok_or_else(|| anyhow!("no member row for {}", member_uuid))?;
        row.membership_start = Some(start);
        Ok(())
    }
}

#[async_trait(?Send)]
impl MemberStore for InMemoryMemberStore {
    async fn create_member(&self, request: &CreateMemberRequest) -> Result<()> {
        let mut inner = self.lock();
        inner.create_requests.push(request.clone());

        if std::mem::take(&mut inner.fail_next_create) {
            bail!("simulated network failure while creating member");
        }
        if inner.rows.contains_key(&request.member_uuid) {
            bail!("duplicate key value: vendeg_uuid {}", request.member_uuid);
        }

        debug!("Storing member row {}", request.member_uuid);
        inner.rows.insert(
            request.member_uuid.clone(),
            StoredMember {
                member: request.clone(),
                payment_status: request.payment_status,
                payment_date: None,
                membership_start: None,
                membership_end: None,
            },
        );
        Ok(())
    }

    async fn get_membership_start(&self, member_uuid: &str) -> Result<Option<MembershipStartRow>> {
        Ok(self.lock().rows.get(member_uuid).map(|row| MembershipStartRow {
            membership_start: row.membership_start,
        }))
    }

    async fn update_payment(&self, member_uuid: &str, update: &PaymentUpdateRequest) -> Result<()> {
        let mut inner = self.lock();
        inner
            .update_requests
            .push((member_uuid.to_string(), update.clone()));

        if std::mem::take(&mut inner.fail_next_update) {
            bail!("simulated network failure while updating payment");
        }

        let row = inner
            .rows
            .get_mut(member_uuid)
            .ok_or_else(|| anyhow!("no member row for {}", member_uuid))?;

        debug!("Updating payment of member row {}", member_uuid);
        row.payment_status = update.payment_status;
        row.payment_date = Some(update.payment_date.clone());
        row.membership_end = Some(update.membership_end);
        if let Some(start) = update.membership_start {
            row.membership_start = Some(start);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{MemberRecord, PersonalDataForm};

    fn create_request(uuid: &str) -> CreateMemberRequest {
        let member = MemberRecord::new(uuid.to_string(), format!("{}-TESZT", &uuid[..8]));
        CreateMemberRequest::new(&member, &PersonalDataForm::demo())
    }

    fn payment_update(start: Option<NaiveDate>) -> PaymentUpdateRequest {
        PaymentUpdateRequest {
            payment_date: "2025-03-01T10:00:00.000Z".to_string(),
            payment_status: true,
            membership_end: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            membership_start: start,
        }
    }

    #[tokio::test]
    async fn test_create_and_read_member() {
        let store = InMemoryMemberStore::new();
        let request = create_request("11111111-2222-4333-8444-555555555555");

        store.create_member(&request).await.expect("Failed to create member");

        assert_eq!(store.len(), 1);
        let row = store.get(&request.member_uuid).unwrap();
        assert!(!row.payment_status);
        assert_eq!(row.member, request);

        let start = store.get_membership_start(&request.member_uuid).await.unwrap();
        assert_eq!(start, Some(MembershipStartRow { membership_start: None }));

        let missing = store.get_membership_start("nope").await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_uuid_is_rejected() {
        let store = InMemoryMemberStore::new();
        let request = create_request("11111111-2222-4333-8444-555555555555");

        store.create_member(&request).await.unwrap();
        assert!(store.create_member(&request).await.is_err());
        assert_eq!(store.len(), 1);
        assert_eq!(store.create_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_injected_failures_are_one_shot() {
        let store = InMemoryMemberStore::new();
        let request = create_request("11111111-2222-4333-8444-555555555555");

        store.fail_next_create();
        assert!(store.create_member(&request).await.is_err());
        assert!(store.is_empty());
        store.create_member(&request).await.unwrap();

        store.fail_next_update();
        assert!(store.update_payment(&request.member_uuid, &payment_update(None)).await.is_err());
        assert!(store.update_payment(&request.member_uuid, &payment_update(None)).await.is_ok());
        assert_eq!(store.update_requests().len(), 2);
    }

    #[tokio::test]
    async fn test_update_payment_keeps_start_when_not_sent() {
        let store = InMemoryMemberStore::new();
        let request = create_request("11111111-2222-4333-8444-555555555555");
        store.create_member(&request).await.unwrap();

        let original_start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store.set_membership_start(&request.member_uuid, original_start).unwrap();

        store
            .update_payment(&request.member_uuid, &payment_update(None))
            .await
            .unwrap();

        let row = store.get(&request.member_uuid).unwrap();
        assert!(row.payment_status);
        assert_eq!(row.membership_start, Some(original_start));
        assert_eq!(row.membership_end, NaiveDate::from_ymd_opt(2026, 3, 1));
        assert_eq!(row.payment_date.as_deref(), Some("2025-03-01T10:00:00.000Z"));
    }

    #[tokio::test]
    async fn test_update_unknown_member_fails() {
        let store = InMemoryMemberStore::new();
        let result = store.update_payment("missing", &payment_update(None)).await;
        assert!(result.is_err());
        assert!(store.set_membership_start("missing", NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()).is_err());
    }
}

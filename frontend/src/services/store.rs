use anyhow::Result;
use async_trait::async_trait;
use club_card_core::{InMemoryMemberStore, MemberStore};
use shared::{CreateMemberRequest, MembershipStartRow, PaymentUpdateRequest};

use super::api::ApiClient;
use super::logging::Logger;
use crate::config::AppConfig;

/// Member table backing the wizard: the hosted table, or an in-memory one
/// when no credentials were configured at build time
#[derive(Clone)]
pub enum MemberBackend {
    Supabase(ApiClient),
    Offline(InMemoryMemberStore),
}

impl MemberBackend {
    pub fn from_config(config: &AppConfig) -> Self {
        match &config.supabase {
            Some(supabase) => {
                Logger::info_with_component(
                    "store",
                    &format!("Using member table '{}' at {}", supabase.table, supabase.url),
                );
                MemberBackend::Supabase(ApiClient::new(supabase.clone()))
            }
            None => {
                Logger::warn_with_component(
                    "store",
                    "SUPABASE_URL / SUPABASE_ANON_KEY not set, members are kept in memory only",
                );
                MemberBackend::Offline(InMemoryMemberStore::new())
            }
        }
    }
}

#[async_trait(?Send)]
impl MemberStore for MemberBackend {
    async fn create_member(&self, request: &CreateMemberRequest) -> Result<()> {
        match self {
            MemberBackend::Supabase(client) => client.create_member(request).await,
            MemberBackend::Offline(store) => store.create_member(request).await,
        }
    }

    async fn get_membership_start(&self, member_uuid: &str) -> Result<Option<MembershipStartRow>> {
        match self {
            MemberBackend::Supabase(client) => client.get_membership_start(member_uuid).await,
            MemberBackend::Offline(store) => store.get_membership_start(member_uuid).await,
        }
    }

    async fn update_payment(&self, member_uuid: &str, update: &PaymentUpdateRequest) -> Result<()> {
        match self {
            MemberBackend::Supabase(client) => client.update_payment(member_uuid, update).await,
            MemberBackend::Offline(store) => store.update_payment(member_uuid, update).await,
        }
    }
}

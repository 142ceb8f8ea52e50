use anyhow::{anyhow, bail, Result};
use async_trait::async_trait;
use club_card_core::MemberStore;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::Deserialize;
use shared::{CreateMemberRequest, MembershipStartRow, PaymentUpdateRequest};

use super::logging::Logger;
use crate::config::SupabaseConfig;

const COMPONENT: &str = "api";

/// Error body returned by the REST endpoint on failures
#[derive(Debug, Deserialize)]
struct RestErrorBody {
    message: String,
    #[serde(default)]
    code: Option<String>,
}

/// API client for the hosted member table (Supabase REST interface)
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    config: SupabaseConfig,
}

impl ApiClient {
    pub fn new(config: SupabaseConfig) -> Self {
        Self { config }
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.config.url, self.config.table)
    }

    /// Row filter on the primary key
    fn member_url(&self, member_uuid: &str) -> String {
        format!("{}?vendeg_uuid=eq.{}", self.table_url(), member_uuid)
    }

    fn membership_start_url(&self, member_uuid: &str) -> String {
        format!("{}&select=membership_start", self.member_url(member_uuid))
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.config.anon_key)
            .header("Authorization", &format!("Bearer {}", self.config.anon_key))
    }

    async fn check_response(response: Response, action: &str) -> Result<Response> {
        if response.ok() {
            return Ok(response);
        }

        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let detail = describe_error_body(&body);
        Logger::error_with_component(
            COMPONENT,
            &format!("Server error {} while {}: {}", status, action, detail),
        );
        bail!("Server error {} while {}: {}", status, action, detail)
    }
}

fn describe_error_body(body: &str) -> String {
    match serde_json::from_str::<RestErrorBody>(body) {
        Ok(RestErrorBody { message, code: Some(code) }) => format!("{} ({})", message, code),
        Ok(RestErrorBody { message, code: None }) => message,
        Err(_) => body.to_string(),
    }
}

#[async_trait(?Send)]
impl MemberStore for ApiClient {
    async fn create_member(&self, request: &CreateMemberRequest) -> Result<()> {
        Logger::debug_with_component(
            COMPONENT,
            &format!("Creating member row {}", request.member_uuid),
        );

        let response = self
            .authorize(Request::post(&self.table_url()))
            .header("Prefer", "return=minimal")
            .json(request)
            .map_err(|e| anyhow!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        Self::check_response(response, "creating member").await?;
        Ok(())
    }

    async fn get_membership_start(&self, member_uuid: &str) -> Result<Option<MembershipStartRow>> {
        let response = self
            .authorize(Request::get(&self.membership_start_url(member_uuid)))
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        let response = Self::check_response(response, "reading membership start").await?;
        let rows = response
            .json::<Vec<MembershipStartRow>>()
            .await
            .map_err(|e| anyhow!("Failed to parse membership start: {}", e))?;

        Ok(rows.into_iter().next())
    }

    async fn update_payment(&self, member_uuid: &str, update: &PaymentUpdateRequest) -> Result<()> {
        Logger::debug_with_component(
            COMPONENT,
            &format!("Updating payment of member row {}", member_uuid),
        );

        let response = self
            .authorize(Request::patch(&self.member_url(member_uuid)))
            .header("Prefer", "return=minimal")
            .json(update)
            .map_err(|e| anyhow!("Failed to serialize request: {}", e))?
            .send()
            .await
            .map_err(|e| anyhow!("Network error: {}", e))?;

        Self::check_response(response, "updating payment").await?;
        Ok(())
    }
}

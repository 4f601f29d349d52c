//! Minimal client for the identity provider's admin REST API.
//!
//! Only the two account-management calls the admin surface needs. All
//! other auth concerns (sign-in, refresh, password reset) stay entirely
//! inside the provider.

use serde::Deserialize;
use serde_json::json;
use starlet_core::types::EntityId;

/// Errors from the identity provider's admin API.
#[derive(Debug, thiserror::Error)]
pub enum SupabaseError {
    /// The provider rejected the call; message preserved for the caller.
    #[error("Identity provider error: {0}")]
    Provider(String),

    /// Transport-level HTTP failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A user account as returned by the admin API.
#[derive(Debug, Deserialize)]
pub struct ProviderUser {
    pub id: EntityId,
    pub email: Option<String>,
}

/// Admin REST client. Constructed once at process start and shared.
#[derive(Debug, Clone)]
pub struct SupabaseAdmin {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl SupabaseAdmin {
    pub fn new(base_url: impl Into<String>, service_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            service_key: service_key.into(),
        }
    }

    /// Create a confirmed user account with the given role stored in its
    /// metadata.
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<ProviderUser, SupabaseError> {
        let response = self
            .http
            .post(format!("{}/auth/v1/admin/users", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .json(&json!({
                "email": email,
                "password": password,
                "email_confirm": true,
                "user_metadata": { "role": role },
            }))
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Provider(format!(
                "user creation failed ({status}): {body}"
            )));
        }

        Ok(response.json().await?)
    }

    /// Delete a user account.
    pub async fn delete_user(&self, id: EntityId) -> Result<(), SupabaseError> {
        let response = self
            .http
            .delete(format!("{}/auth/v1/admin/users/{id}", self.base_url))
            .header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(SupabaseError::Provider(format!(
                "user deletion failed ({status}): {body}"
            )));
        }

        Ok(())
    }
}

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;

use crate::error::{AuthError, Result};
use crate::verifier::{Identity, IdentityVerifier};

/// Verifies access tokens by asking Supabase who they belong to.
///
/// A token is valid exactly when the user-info endpoint accepts it; no
/// local JWT parsing.
pub struct SupabaseVerifier {
    client: Client,
    base_url: String,
    anon_key: String,
}

impl SupabaseVerifier {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        })
    }
}

#[async_trait]
impl IdentityVerifier for SupabaseVerifier {
    async fn verify_token(&self, token: &str) -> Result<Identity> {
        let url = format!("{}/auth/v1/user", self.base_url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.anon_key)
            .bearer_auth(token)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: SupabaseUser = response.json().await?;
                Ok(user.into())
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("token rejected by identity provider");
                Err(AuthError::InvalidToken)
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::Provider(format!("{}: {}", status, body)))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct SupabaseUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    user_metadata: UserMetadata,
}

#[derive(Debug, Default, Deserialize)]
struct UserMetadata {
    #[serde(default)]
    full_name: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

impl From<SupabaseUser> for Identity {
    fn from(user: SupabaseUser) -> Self {
        let display_name = user.user_metadata.full_name.or(user.user_metadata.name);
        Self {
            uid: user.id,
            email: user.email,
            display_name,
        }
    }
}

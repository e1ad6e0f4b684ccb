use async_trait::async_trait;

use crate::error::Result;

/// A verified user identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    /// Opaque provider-issued user id; the persistence partition key
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
}

/// Trait for the opaque token -> identity check.
///
/// Implementations talk to an external identity provider; callers treat
/// the call as a potentially long-latency network operation with a single
/// attempt and no retry.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify_token(&self, token: &str) -> Result<Identity>;
}

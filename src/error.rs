//! Error taxonomy for the session token manager.
//!
//! Three classes matter to callers: authentication failures (bad, expired,
//! or replayed credentials - the caller can re-authenticate), authorization
//! failures (correct identity, insufficient standing), and infrastructure
//! failures (store or signing unavailable - not caller-correctable).
//! The request layer maps these to 401 / 403 / 503 via [`AuthError::status_code`].

use thiserror::Error;

use crate::store::StoreError;

/// Coarse classification of an [`AuthError`], for callers that branch on
/// class rather than variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Authentication,
    Authorization,
    Infrastructure,
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// Unknown identifier or wrong secret. Deliberately one message for
    /// both cases: callers must not learn which guard tripped.
    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("account locked")]
    AccountLocked,

    #[error("account not active")]
    AccountNotActive,

    /// Bad signature, crypto-level expiry, unknown value, revoked record,
    /// denylisted value, or a lost rotation race. One message for all.
    #[error("invalid refresh token")]
    InvalidRefreshToken,

    /// The persisted record's expiry has passed.
    #[error("refresh token expired")]
    RefreshTokenExpired,

    #[error("invalid access token")]
    InvalidAccessToken,

    /// Actor behind a verified refresh token is gone or no longer Active.
    #[error("user not found or inactive")]
    ActorUnavailable,

    #[error("tenant is suspended")]
    TenantSuspended,

    #[error("tenant is cancelled")]
    TenantCancelled,

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("token signing error: {0}")]
    Signing(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::InvalidCredentials
            | AuthError::AccountLocked
            | AuthError::AccountNotActive
            | AuthError::InvalidRefreshToken
            | AuthError::RefreshTokenExpired
            | AuthError::InvalidAccessToken
            | AuthError::ActorUnavailable => ErrorKind::Authentication,
            AuthError::TenantSuspended | AuthError::TenantCancelled => ErrorKind::Authorization,
            AuthError::Store(_) | AuthError::Signing(_) => ErrorKind::Infrastructure,
        }
    }

    /// Suggested HTTP status for a transport layer surfacing this error.
    pub fn status_code(&self) -> u16 {
        match self.kind() {
            ErrorKind::Authentication => 401,
            ErrorKind::Authorization => 403,
            ErrorKind::Infrastructure => 503,
        }
    }
}

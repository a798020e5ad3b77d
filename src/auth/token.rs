//! JWT construction and verification for the credential pair.
//!
//! Access and refresh tokens are both HS256 JWTs but are signed with
//! distinct keys, so neither can ever stand in for the other. The access
//! token is stateless and self-describing; the refresh token additionally
//! carries a `jti` and is tracked server-side as a `RefreshRecord`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::error::AuthError;
use crate::models::{Actor, Role};

#[derive(Debug, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Actor id.
    pub sub: Uuid,
    pub tenant: Option<Uuid>,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RefreshClaims {
    pub sub: Uuid,
    pub tenant: Option<Uuid>,
    /// Unique per token; makes every minted refresh value distinct even
    /// for the same actor within the same second.
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

/// What [`crate::SessionTokenManager::verify_access`] hands to the request
/// layer for downstream authorization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessContext {
    pub actor_id: Uuid,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
}

/// Holds the two signing keys and mints/verifies both halves of a pair.
pub struct TokenSigner {
    access_encoding: EncodingKey,
    access_decoding: DecodingKey,
    refresh_encoding: EncodingKey,
    refresh_decoding: DecodingKey,
}

impl TokenSigner {
    pub fn new(access_key: &str, refresh_key: &str) -> Self {
        Self {
            access_encoding: EncodingKey::from_secret(access_key.as_bytes()),
            access_decoding: DecodingKey::from_secret(access_key.as_bytes()),
            refresh_encoding: EncodingKey::from_secret(refresh_key.as_bytes()),
            refresh_decoding: DecodingKey::from_secret(refresh_key.as_bytes()),
        }
    }

    pub fn sign_access(
        &self,
        actor: &Actor,
        issued_at: DateTime<Utc>,
        ttl_minutes: i64,
    ) -> Result<(String, DateTime<Utc>), AuthError> {
        let expires_at = issued_at + Duration::minutes(ttl_minutes);
        let claims = AccessClaims {
            sub: actor.id,
            tenant: actor.tenant_id,
            role: actor.role,
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.access_encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok((token, expires_at))
    }

    pub fn sign_refresh(
        &self,
        actor: &Actor,
        issued_at: DateTime<Utc>,
        ttl_days: i64,
    ) -> Result<(String, DateTime<Utc>), AuthError> {
        let expires_at = issued_at + Duration::days(ttl_days);
        let claims = RefreshClaims {
            sub: actor.id,
            tenant: actor.tenant_id,
            jti: Uuid::new_v4().to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.refresh_encoding)
            .map_err(|e| AuthError::Signing(e.to_string()))?;
        Ok((token, expires_at))
    }

    /// Verify an access token. Pure: no store involved.
    pub fn verify_access(&self, token: &str) -> Result<AccessContext, AuthError> {
        let data = decode::<AccessClaims>(
            token,
            &self.access_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| {
            debug!(reason = %e, "access token rejected");
            AuthError::InvalidAccessToken
        })?;
        Ok(AccessContext {
            actor_id: data.claims.sub,
            tenant_id: data.claims.tenant,
            role: data.claims.role,
        })
    }

    /// Verify a refresh token's signature and crypto-level expiry.
    ///
    /// Signature and expiry failures are logged distinctly but collapse to
    /// the same caller-facing error.
    pub fn verify_refresh(&self, token: &str) -> Result<RefreshClaims, AuthError> {
        decode::<RefreshClaims>(
            token,
            &self.refresh_decoding,
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    debug!("refresh token rejected: expired signature");
                }
                kind => {
                    debug!(?kind, "refresh token rejected: verification failed");
                }
            }
            AuthError::InvalidRefreshToken
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActorStatus;

    fn signer() -> TokenSigner {
        TokenSigner::new("access-secret", "refresh-secret")
    }

    fn actor() -> Actor {
        Actor {
            id: Uuid::new_v4(),
            email: "a@x.com".into(),
            tenant_id: Some(Uuid::new_v4()),
            role: Role::Admin,
            password_hash: String::new(),
            status: ActorStatus::Active,
            failed_logins: 0,
            locked_until: None,
            last_login_at: None,
            last_login_from: None,
        }
    }

    #[test]
    fn test_access_roundtrip() {
        let s = signer();
        let a = actor();
        let (token, expires_at) = s.sign_access(&a, Utc::now(), 15).unwrap();
        assert!(expires_at > Utc::now());

        let ctx = s.verify_access(&token).unwrap();
        assert_eq!(ctx.actor_id, a.id);
        assert_eq!(ctx.tenant_id, a.tenant_id);
        assert_eq!(ctx.role, Role::Admin);
    }

    #[test]
    fn test_keys_are_not_interchangeable() {
        let s = signer();
        let a = actor();
        let (access, _) = s.sign_access(&a, Utc::now(), 15).unwrap();
        let (refresh, _) = s.sign_refresh(&a, Utc::now(), 7).unwrap();

        assert!(s.verify_refresh(&access).is_err());
        assert!(s.verify_access(&refresh).is_err());
    }

    #[test]
    fn test_tampered_refresh_rejected() {
        let s = signer();
        let (token, _) = s.sign_refresh(&actor(), Utc::now(), 7).unwrap();
        let mut bytes = token.into_bytes();
        let last = bytes.len() - 1;
        bytes[last] = if bytes[last] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            s.verify_refresh(&tampered),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn test_expired_refresh_rejected_at_crypto_level() {
        let s = signer();
        let issued = Utc::now() - Duration::days(8);
        let (token, _) = s.sign_refresh(&actor(), issued, 7).unwrap();
        assert!(matches!(
            s.verify_refresh(&token),
            Err(AuthError::InvalidRefreshToken)
        ));
    }

    #[test]
    fn test_refresh_values_are_unique() {
        let s = signer();
        let a = actor();
        let now = Utc::now();
        let (t1, _) = s.sign_refresh(&a, now, 7).unwrap();
        let (t2, _) = s.sign_refresh(&a, now, 7).unwrap();
        // Same actor, same second: jti keeps the values distinct.
        assert_ne!(t1, t2);
    }
}

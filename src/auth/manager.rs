//! The session token manager: authenticate, rotate, revoke, verify.
//!
//! Each operation runs to completion inside the caller's request context
//! and suspends only at store I/O. Nothing here retries, schedules, or
//! holds state across calls beyond the revocation denylist.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::denylist::Denylist;
use super::password::verify_password;
use super::token::{AccessContext, TokenSigner};
use crate::audit::{AuditEvent, AuditKind, AuditSink, TracingAuditSink};
use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::models::{Actor, ActorStatus, RefreshRecord, TenantStatus};
use crate::store::SessionStore;

/// One short-lived access token plus one long-lived refresh token, bound
/// to a single actor and tenant at issuance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: String,
    pub access_expires_at: DateTime<Utc>,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
}

pub struct SessionTokenManager {
    store: Arc<dyn SessionStore>,
    audit: Arc<dyn AuditSink>,
    signer: TokenSigner,
    denylist: Denylist,
    config: AuthConfig,
}

impl SessionTokenManager {
    pub fn new(
        config: AuthConfig,
        store: Arc<dyn SessionStore>,
        audit: Arc<dyn AuditSink>,
    ) -> Self {
        let signer = TokenSigner::new(&config.access_signing_key, &config.refresh_signing_key);
        Self {
            store,
            audit,
            signer,
            denylist: Denylist::new(),
            config,
        }
    }

    /// Convenience constructor with the default structured-log audit sink.
    pub fn with_tracing_audit(config: AuthConfig, store: Arc<dyn SessionStore>) -> Self {
        Self::new(config, store, Arc::new(TracingAuditSink))
    }

    /// Authenticate an actor by identifier and secret.
    ///
    /// Guards run in a fixed order and the first failure wins. Unknown
    /// identifiers and wrong secrets produce the identical
    /// "invalid credentials" error so callers cannot enumerate accounts.
    pub async fn authenticate(
        &self,
        identifier: &str,
        secret: &str,
        origin: &str,
    ) -> Result<(crate::models::ActorProfile, CredentialPair), AuthError> {
        let now = Utc::now();

        if !is_email_shaped(identifier) {
            self.record_audit(
                AuditEvent::new(AuditKind::LoginFailed)
                    .origin(origin)
                    .detail("malformed identifier"),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        }

        let Some(mut actor) = self.store.actor_by_email(identifier).await? else {
            self.record_audit(
                AuditEvent::new(AuditKind::LoginFailed)
                    .origin(origin)
                    .detail("unknown identifier"),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        };

        if actor.is_locked(now) {
            self.record_audit(
                AuditEvent::new(AuditKind::LoginFailed)
                    .actor(actor.id)
                    .tenant(actor.tenant_id)
                    .origin(origin)
                    .detail("account locked"),
            )
            .await;
            return Err(AuthError::AccountLocked);
        }

        if !verify_password(secret, &actor.password_hash)? {
            actor.register_failure(self.config.max_failed_logins, self.config.lockout_minutes, now);
            self.store.update_actor(&actor).await?;
            self.record_audit(
                AuditEvent::new(AuditKind::LoginFailed)
                    .actor(actor.id)
                    .tenant(actor.tenant_id)
                    .origin(origin)
                    .detail("secret mismatch"),
            )
            .await;
            return Err(AuthError::InvalidCredentials);
        }

        if actor.status != ActorStatus::Active {
            return Err(AuthError::AccountNotActive);
        }

        self.check_tenant_standing(&actor).await?;

        actor.register_success(origin, now);
        self.store.update_actor(&actor).await?;

        let pair = self.issue(&actor, now).await?;

        self.record_audit(
            AuditEvent::new(AuditKind::Login)
                .actor(actor.id)
                .tenant(actor.tenant_id)
                .origin(origin),
        )
        .await;
        info!(actor = %actor.id, "login succeeded");

        Ok((actor.profile(), pair))
    }

    /// Exchange a refresh token for a brand-new credential pair,
    /// invalidating the presented one. One-shot per record: a replayed
    /// value always fails, no matter the timing.
    pub async fn rotate(&self, presented: &str) -> Result<CredentialPair, AuthError> {
        let now = Utc::now();

        let claims = self.signer.verify_refresh(presented)?;

        if self.denylist.contains(presented, now) {
            debug!("rotation rejected: value denylisted");
            return Err(AuthError::InvalidRefreshToken);
        }

        let record = match self.store.refresh_by_token(presented).await? {
            Some(record) if !record.is_revoked() => record,
            Some(_) => {
                debug!("rotation rejected: record already revoked");
                return Err(AuthError::InvalidRefreshToken);
            }
            None => {
                debug!("rotation rejected: no record for value");
                return Err(AuthError::InvalidRefreshToken);
            }
        };

        if record.is_expired(now) {
            return Err(AuthError::RefreshTokenExpired);
        }

        let actor = match self.store.actor_by_id(claims.sub).await? {
            Some(actor) if actor.status == ActorStatus::Active => actor,
            _ => return Err(AuthError::ActorUnavailable),
        };

        // Tenant standing gates refresh just as it gates login.
        self.check_tenant_standing(&actor).await?;

        let pair = self.issue(&actor, now).await?;

        let swapped = self
            .store
            .revoke_refresh(presented, now, Some(pair.refresh_token.clone()))
            .await?;
        if !swapped {
            // Lost a race on the same value. Retire the record we just
            // minted so no live orphan survives, then fail like any
            // replayed token.
            self.store
                .revoke_refresh(&pair.refresh_token, now, None)
                .await?;
            warn!(actor = %actor.id, "rotation race lost; presented value already rotated");
            return Err(AuthError::InvalidRefreshToken);
        }

        self.record_audit(
            AuditEvent::new(AuditKind::TokenRefreshed)
                .actor(actor.id)
                .tenant(actor.tenant_id),
        )
        .await;
        debug!(actor = %actor.id, "refresh token rotated");

        Ok(pair)
    }

    /// Revoke a refresh token. Idempotent: unknown or already-revoked
    /// values are a no-op, never an error.
    pub async fn revoke(&self, presented: &str) -> Result<(), AuthError> {
        let now = Utc::now();

        let record = self.store.refresh_by_token(presented).await?;

        // Denylist the value for its remaining validity; full window when
        // no record tells us better.
        let deny_until = match &record {
            Some(record) => record.expires_at,
            None => now + Duration::days(self.config.refresh_ttl_days),
        };
        self.denylist.insert(presented, deny_until);
        self.denylist.purge_expired(now);

        if let Some(record) = record {
            let transitioned = self.store.revoke_refresh(presented, now, None).await?;
            if transitioned {
                self.record_audit(AuditEvent::new(AuditKind::Logout).actor(record.actor_id))
                    .await;
                debug!(actor = %record.actor_id, "refresh token revoked");
            } else {
                debug!("revoke no-op: record already revoked");
            }
        } else {
            debug!("revoke no-op: no record for value");
        }

        Ok(())
    }

    /// Verify an access token and return the identity it asserts. Pure
    /// with respect to the store; used by the request layer on every
    /// protected call.
    pub fn verify_access(&self, token: &str) -> Result<AccessContext, AuthError> {
        self.signer.verify_access(token)
    }

    /// Mint a credential pair for `actor` and persist the refresh half.
    async fn issue(&self, actor: &Actor, issued_at: DateTime<Utc>) -> Result<CredentialPair, AuthError> {
        let (access_token, access_expires_at) =
            self.signer
                .sign_access(actor, issued_at, self.config.access_ttl_minutes)?;
        let (refresh_token, refresh_expires_at) =
            self.signer
                .sign_refresh(actor, issued_at, self.config.refresh_ttl_days)?;

        self.store
            .insert_refresh(RefreshRecord::new(
                refresh_token.clone(),
                actor.id,
                refresh_expires_at,
            ))
            .await?;

        Ok(CredentialPair {
            access_token,
            access_expires_at,
            refresh_token,
            refresh_expires_at,
        })
    }

    /// Suspended and cancelled tenants can neither obtain nor refresh
    /// credentials. Platform actors without a tenant skip this check.
    async fn check_tenant_standing(&self, actor: &Actor) -> Result<(), AuthError> {
        let Some(tenant_id) = actor.tenant_id else {
            return Ok(());
        };
        let tenant = self
            .store
            .tenant_by_id(tenant_id)
            .await?
            .ok_or_else(|| {
                // Referential integrity broken: the actor points at a
                // tenant row that is gone.
                AuthError::Store(crate::store::StoreError::Unavailable(format!(
                    "tenant {tenant_id} not found"
                )))
            })?;
        match tenant.status {
            TenantStatus::Suspended => Err(AuthError::TenantSuspended),
            TenantStatus::Cancelled => Err(AuthError::TenantCancelled),
            TenantStatus::Trial | TenantStatus::Active => Ok(()),
        }
    }

    /// Best-effort audit write: failures are logged, never propagated.
    async fn record_audit(&self, event: AuditEvent) {
        if let Err(e) = self.audit.record(event).await {
            warn!(error = %e, "audit write failed; continuing");
        }
    }
}

/// Syntactic shape check only; the identifier is never resolved as an
/// address.
fn is_email_shaped(identifier: &str) -> bool {
    match identifier.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        None => false,
    }
}

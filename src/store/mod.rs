//! Persistence seam for actors, tenants, and refresh records.
//!
//! The manager only talks to this trait; production deployments back it
//! with the relational store, tests and small embedders use
//! [`MemoryStore`]. Every write that changes revocation state goes through
//! [`SessionStore::revoke_refresh`], which is conditional on the record
//! being currently unrevoked - never a blind overwrite.

mod memory;

pub use memory::MemoryStore;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{Actor, RefreshRecord, Tenant};

/// Store failures are infrastructure errors, never credential errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),

    #[error("duplicate refresh token value")]
    DuplicateToken,
}

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn actor_by_email(&self, email: &str) -> Result<Option<Actor>, StoreError>;

    async fn actor_by_id(&self, id: Uuid) -> Result<Option<Actor>, StoreError>;

    async fn tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError>;

    /// Persist counter, lockout, and last-login changes on an actor.
    async fn update_actor(&self, actor: &Actor) -> Result<(), StoreError>;

    async fn insert_refresh(&self, record: RefreshRecord) -> Result<(), StoreError>;

    async fn refresh_by_token(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError>;

    /// Conditionally revoke a refresh record: set `revoked_at` and
    /// `replaced_by` in one write, but only if `revoked_at` is currently
    /// null. Returns `true` if this call performed the transition, `false`
    /// if the record was absent or already revoked. This is the
    /// compare-and-swap that makes rotation one-shot under races.
    async fn revoke_refresh(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
        replaced_by: Option<String>,
    ) -> Result<bool, StoreError>;
}

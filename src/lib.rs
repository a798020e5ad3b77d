//! tokengate - session token manager for multi-tenant services.
//!
//! Issues, verifies, rotates, and revokes paired short-lived/long-lived
//! credentials for actors scoped to tenants. The access token is a
//! stateless, self-describing JWT; the refresh token is tracked
//! server-side and is strictly one-shot: using it revokes it and links it
//! to its successor, so a replayed value is always rejected.
//!
//! The HTTP layer, relational schema, and audit store are collaborators,
//! reached through the [`store::SessionStore`] and [`audit::AuditSink`]
//! seams. [`store::MemoryStore`] backs tests and small embedders.
//!
//! ```no_run
//! use std::sync::Arc;
//! use tokengate::{AuthConfig, MemoryStore, SessionTokenManager};
//!
//! # async fn run() -> Result<(), tokengate::AuthError> {
//! let config = AuthConfig::from_env().expect("signing keys");
//! let manager = SessionTokenManager::with_tracing_audit(config, Arc::new(MemoryStore::new()));
//!
//! let (actor, pair) = manager.authenticate("a@x.com", "secret", "203.0.113.9").await?;
//! let context = manager.verify_access(&pair.access_token)?;
//! assert_eq!(context.actor_id, actor.id);
//!
//! let next_pair = manager.rotate(&pair.refresh_token).await?;
//! manager.revoke(&next_pair.refresh_token).await?;
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use audit::{AuditEvent, AuditKind, AuditSink, AuditWriteError, TracingAuditSink};
pub use auth::{hash_password, verify_password, AccessContext, CredentialPair, SessionTokenManager};
pub use config::{AuthConfig, ConfigError};
pub use error::{AuthError, ErrorKind};
pub use models::{Actor, ActorProfile, ActorStatus, PlanTier, RefreshRecord, Role, Tenant, TenantStatus};
pub use store::{MemoryStore, SessionStore, StoreError};

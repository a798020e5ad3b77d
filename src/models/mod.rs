//! Data models for the session token manager.
//!
//! - `Actor`, `ActorProfile`: an authenticated human and its hash-free view
//! - `Tenant`: an isolated customer organization
//! - `RefreshRecord`: the persisted half of a credential pair

pub mod actor;
pub mod refresh;
pub mod tenant;

pub use actor::{Actor, ActorProfile, ActorStatus, Role};
pub use refresh::RefreshRecord;
pub use tenant::{PlanTier, Tenant, TenantStatus};

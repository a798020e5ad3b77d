use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Account standing of an actor. Only `Active` actors can authenticate
/// or refresh credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActorStatus {
    Active,
    Inactive,
    Suspended,
    Pending,
}

/// Role carried inside the access token and enforced by the request layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform-level actor with no tenant.
    SuperAdmin,
    Admin,
    Member,
}

/// An authenticated human. `tenant_id` is `None` only for platform
/// super-admins.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: Uuid,
    pub email: String,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
    pub password_hash: String,
    pub status: ActorStatus,
    pub failed_logins: u32,
    pub locked_until: Option<DateTime<Utc>>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub last_login_from: Option<String>,
}

impl Actor {
    /// Whether a lockout is currently in force. An elapsed `locked_until`
    /// counts as unlocked.
    pub fn is_locked(&self, now: DateTime<Utc>) -> bool {
        self.locked_until.map(|until| until > now).unwrap_or(false)
    }

    /// Record a failed authentication attempt, locking the account for
    /// `lockout_minutes` once `max_failed` attempts accumulate.
    pub fn register_failure(&mut self, max_failed: u32, lockout_minutes: i64, now: DateTime<Utc>) {
        self.failed_logins += 1;
        if self.failed_logins >= max_failed {
            self.locked_until = Some(now + Duration::minutes(lockout_minutes));
        }
    }

    /// Record a successful authentication: reset the failure counter,
    /// clear any lockout, stamp when and where.
    pub fn register_success(&mut self, origin: &str, now: DateTime<Utc>) {
        self.failed_logins = 0;
        self.locked_until = None;
        self.last_login_at = Some(now);
        self.last_login_from = Some(origin.to_string());
    }

    /// Hash-free view of this actor, safe to return to callers.
    pub fn profile(&self) -> ActorProfile {
        ActorProfile {
            id: self.id,
            email: self.email.clone(),
            tenant_id: self.tenant_id,
            role: self.role,
            status: self.status,
            last_login_at: self.last_login_at,
        }
    }
}

/// What `authenticate` returns: the actor without its credential hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorProfile {
    pub id: Uuid,
    pub email: String,
    pub tenant_id: Option<Uuid>,
    pub role: Role,
    pub status: ActorStatus,
    pub last_login_at: Option<DateTime<Utc>>,
}

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted server-side state of a refresh token.
///
/// The access token is stateless and never stored; this record is what
/// makes the refresh token revocable. `revoked_at` and `replaced_by` are
/// always written together at rotation time, so a record has at most one
/// successor over its entire life.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRecord {
    /// The signed refresh token value. Unique per record.
    pub token: String,
    pub actor_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub revoked_at: Option<DateTime<Utc>>,
    /// Token value of the record minted when this one was rotated.
    pub replaced_by: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl RefreshRecord {
    pub fn new(token: String, actor_id: Uuid, expires_at: DateTime<Utc>) -> Self {
        Self {
            token,
            actor_id,
            expires_at,
            revoked_at: None,
            replaced_by: None,
            created_at: Utc::now(),
        }
    }

    pub fn is_revoked(&self) -> bool {
        self.revoked_at.is_some()
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at < now
    }

    /// Whether this record can still be exchanged for a new pair.
    pub fn is_exchangeable(&self, now: DateTime<Utc>) -> bool {
        !self.is_revoked() && !self.is_expired(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_exchangeability() {
        let now = Utc::now();
        let mut rec = RefreshRecord::new("tok".into(), Uuid::new_v4(), now + Duration::days(7));
        assert!(rec.is_exchangeable(now));

        rec.revoked_at = Some(now);
        assert!(!rec.is_exchangeable(now));

        rec.revoked_at = None;
        rec.expires_at = now - Duration::seconds(1);
        assert!(!rec.is_exchangeable(now));
    }
}

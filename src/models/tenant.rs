use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TenantStatus {
    Trial,
    Active,
    Suspended,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanTier {
    Free,
    Starter,
    Professional,
    Enterprise,
}

/// An isolated customer organization. Actors of a suspended or cancelled
/// tenant cannot obtain or refresh credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tenant {
    pub id: Uuid,
    pub name: String,
    pub status: TenantStatus,
    pub plan: PlanTier,
}

impl Tenant {
    /// Trial and Active tenants may hold sessions; Suspended and Cancelled
    /// may not.
    pub fn can_hold_sessions(&self) -> bool {
        matches!(self.status, TenantStatus::Trial | TenantStatus::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_eligibility_by_status() {
        let mut t = Tenant {
            id: Uuid::new_v4(),
            name: "Acme".into(),
            status: TenantStatus::Trial,
            plan: PlanTier::Starter,
        };
        assert!(t.can_hold_sessions());
        t.status = TenantStatus::Active;
        assert!(t.can_hold_sessions());
        t.status = TenantStatus::Suspended;
        assert!(!t.can_hold_sessions());
        t.status = TenantStatus::Cancelled;
        assert!(!t.can_hold_sessions());
    }
}

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{SessionStore, StoreError};
use crate::models::{Actor, RefreshRecord, Tenant};

#[derive(Default)]
struct Tables {
    actors: HashMap<Uuid, Actor>,
    tenants: HashMap<Uuid, Tenant>,
    refresh: HashMap<String, RefreshRecord>,
}

/// In-process store. All three tables live behind one mutex, so the
/// conditional revoke in `revoke_refresh` is atomic with respect to
/// concurrent rotations.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        // A poisoned lock only means a panic elsewhere; the data is still
        // consistent for our single-map writes.
        self.tables.lock().unwrap_or_else(|p| p.into_inner())
    }

    pub fn add_actor(&self, actor: Actor) {
        self.lock().actors.insert(actor.id, actor);
    }

    pub fn add_tenant(&self, tenant: Tenant) {
        self.lock().tenants.insert(tenant.id, tenant);
    }

    /// Direct record lookup for embedders and tests.
    pub fn refresh_record(&self, token: &str) -> Option<RefreshRecord> {
        self.lock().refresh.get(token).cloned()
    }
}

#[async_trait]
impl SessionStore for MemoryStore {
    async fn actor_by_email(&self, email: &str) -> Result<Option<Actor>, StoreError> {
        Ok(self
            .lock()
            .actors
            .values()
            .find(|a| a.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn actor_by_id(&self, id: Uuid) -> Result<Option<Actor>, StoreError> {
        Ok(self.lock().actors.get(&id).cloned())
    }

    async fn tenant_by_id(&self, id: Uuid) -> Result<Option<Tenant>, StoreError> {
        Ok(self.lock().tenants.get(&id).cloned())
    }

    async fn update_actor(&self, actor: &Actor) -> Result<(), StoreError> {
        self.lock().actors.insert(actor.id, actor.clone());
        Ok(())
    }

    async fn insert_refresh(&self, record: RefreshRecord) -> Result<(), StoreError> {
        let mut tables = self.lock();
        if tables.refresh.contains_key(&record.token) {
            return Err(StoreError::DuplicateToken);
        }
        tables.refresh.insert(record.token.clone(), record);
        Ok(())
    }

    async fn refresh_by_token(&self, token: &str) -> Result<Option<RefreshRecord>, StoreError> {
        Ok(self.lock().refresh.get(token).cloned())
    }

    async fn revoke_refresh(
        &self,
        token: &str,
        revoked_at: DateTime<Utc>,
        replaced_by: Option<String>,
    ) -> Result<bool, StoreError> {
        let mut tables = self.lock();
        match tables.refresh.get_mut(token) {
            Some(record) if record.revoked_at.is_none() => {
                record.revoked_at = Some(revoked_at);
                record.replaced_by = replaced_by;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ActorStatus, Role};
    use chrono::Duration;

    fn record(token: &str) -> RefreshRecord {
        RefreshRecord::new(token.into(), Uuid::new_v4(), Utc::now() + Duration::days(7))
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let store = MemoryStore::new();
        store.add_actor(Actor {
            id: Uuid::new_v4(),
            email: "A@X.com".into(),
            tenant_id: None,
            role: Role::SuperAdmin,
            password_hash: "h".into(),
            status: ActorStatus::Active,
            failed_logins: 0,
            locked_until: None,
            last_login_at: None,
            last_login_from: None,
        });
        assert!(store.actor_by_email("a@x.com").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_duplicate_refresh_value_rejected() {
        let store = MemoryStore::new();
        store.insert_refresh(record("tok")).await.unwrap();
        assert!(matches!(
            store.insert_refresh(record("tok")).await,
            Err(StoreError::DuplicateToken)
        ));
    }

    #[tokio::test]
    async fn test_revoke_is_conditional() {
        let store = MemoryStore::new();
        store.insert_refresh(record("tok")).await.unwrap();

        let now = Utc::now();
        assert!(store
            .revoke_refresh("tok", now, Some("next".into()))
            .await
            .unwrap());
        // Second attempt observes the record already revoked.
        assert!(!store.revoke_refresh("tok", now, None).await.unwrap());
        // The successor set by the winning call survives.
        let rec = store.refresh_record("tok").unwrap();
        assert_eq!(rec.replaced_by.as_deref(), Some("next"));

        assert!(!store.revoke_refresh("missing", now, None).await.unwrap());
    }
}

//! Preference resolution.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::NotificationPreference;
use crate::services::store::PreferenceStore;

/// Resolves and mutates per-user notification preferences.
///
/// Reads and writes go through an explicit read-then-write cycle against the
/// store; there is no implicit change tracking between the two steps.
#[derive(Clone)]
pub struct PreferenceService {
    store: Arc<dyn PreferenceStore>,
}

impl PreferenceService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Create or replace a user's preference.
    ///
    /// An existing record keeps its identity and has both fields replaced;
    /// otherwise a new record is constructed and persisted.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        enabled: bool,
        contact_info: String,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let preference = match self.store.find_by_user_id(user_id).await? {
            Some(mut existing) => {
                existing.enabled = enabled;
                existing.contact_info = contact_info;
                existing
            }
            None => NotificationPreference::new(user_id, enabled, contact_info),
        };

        self.store.save(&preference).await
    }

    /// Return the user's preference, creating and persisting the default
    /// (enabled, empty contact info) when none exists yet.
    ///
    /// Always yields a usable preference, so downstream dispatch never has to
    /// handle a missing record.
    pub async fn get_or_create(
        &self,
        user_id: Uuid,
    ) -> Result<NotificationPreference, sqlx::Error> {
        if let Some(existing) = self.store.find_by_user_id(user_id).await? {
            return Ok(existing);
        }

        self.store
            .save(&NotificationPreference::default_for(user_id))
            .await
    }

    /// Flip only the enabled flag, resolving via [`Self::get_or_create`].
    pub async fn set_enabled(
        &self,
        user_id: Uuid,
        enabled: bool,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let mut preference = self.get_or_create(user_id).await?;
        preference.enabled = enabled;
        self.store.save(&preference).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryPreferenceStore;

    fn service_with_store() -> (PreferenceService, Arc<MemoryPreferenceStore>) {
        let store = Arc::new(MemoryPreferenceStore::new());
        (PreferenceService::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_get_or_create_persists_default() {
        let (service, store) = service_with_store();
        let user_id = Uuid::new_v4();

        let preference = service.get_or_create(user_id).await.unwrap();

        assert!(preference.enabled);
        assert!(preference.contact_info.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_is_idempotent() {
        let (service, store) = service_with_store();
        let user_id = Uuid::new_v4();

        let first = service.get_or_create(user_id).await.unwrap();
        let second = service.get_or_create(user_id).await.unwrap();

        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_creates_when_missing() {
        let (service, store) = service_with_store();
        let user_id = Uuid::new_v4();

        let preference = service
            .upsert(user_id, true, "someone@example.com".to_string())
            .await
            .unwrap();

        assert_eq!(preference.user_id, user_id);
        assert!(preference.enabled);
        assert_eq!(preference.contact_info, "someone@example.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_fields() {
        let (service, store) = service_with_store();
        let user_id = Uuid::new_v4();

        let original = service
            .upsert(user_id, false, "old@example.com".to_string())
            .await
            .unwrap();
        let updated = service
            .upsert(user_id, true, "new@example.com".to_string())
            .await
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert!(updated.enabled);
        assert_eq!(updated.contact_info, "new@example.com");
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_set_enabled_flips_only_flag() {
        let (service, _store) = service_with_store();
        let user_id = Uuid::new_v4();

        service
            .upsert(user_id, true, "user@example.com".to_string())
            .await
            .unwrap();
        let disabled = service.set_enabled(user_id, false).await.unwrap();

        assert!(!disabled.enabled);
        assert_eq!(disabled.contact_info, "user@example.com");
    }

    #[tokio::test]
    async fn test_set_enabled_auto_creates_missing_preference() {
        let (service, store) = service_with_store();
        let user_id = Uuid::new_v4();

        let preference = service.set_enabled(user_id, false).await.unwrap();

        assert!(!preference.enabled);
        assert!(preference.contact_info.is_empty());
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_store_faults_propagate() {
        struct FailingStore;

        #[async_trait::async_trait]
        impl PreferenceStore for FailingStore {
            async fn find_by_user_id(
                &self,
                _user_id: Uuid,
            ) -> Result<Option<NotificationPreference>, sqlx::Error> {
                Err(sqlx::Error::PoolTimedOut)
            }

            async fn save(
                &self,
                _preference: &NotificationPreference,
            ) -> Result<NotificationPreference, sqlx::Error> {
                Err(sqlx::Error::PoolTimedOut)
            }
        }

        let service = PreferenceService::new(Arc::new(FailingStore));
        let result = service.get_or_create(Uuid::new_v4()).await;
        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
    }
}

//! Store contracts for preferences and notifications.
//!
//! The persistence crate implements these traits over PostgreSQL; the
//! in-memory implementations below back unit tests and local development.
//! Storage faults surface as `sqlx::Error` unchanged — the services have no
//! meaningful recovery for an unavailable store.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{Notification, NotificationPreference};

/// Durable keyed storage of one preference record per user.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, sqlx::Error>;

    /// Persist the given record, replacing any existing record for the same
    /// user. Returns the persisted state.
    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, sqlx::Error>;
}

/// Durable append-only storage of notification records, queryable by user.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error>;

    async fn find_unseen_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error>;

    async fn save(&self, notification: &Notification) -> Result<Notification, sqlx::Error>;

    /// Persist a batch of already-existing records. Atomic per record only.
    async fn save_all(&self, notifications: &[Notification]) -> Result<(), sqlx::Error>;
}

/// In-memory preference store for development and testing.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    records: Mutex<HashMap<Uuid, NotificationPreference>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all users.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl PreferenceStore for MemoryPreferenceStore {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        Ok(self.records.lock().unwrap().get(&user_id).cloned())
    }

    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, sqlx::Error> {
        self.records
            .lock()
            .unwrap()
            .insert(preference.user_id, preference.clone());
        Ok(preference.clone())
    }
}

/// In-memory notification store for development and testing.
///
/// Listing order matches the PostgreSQL repository: creation order,
/// newest first.
#[derive(Debug, Default)]
pub struct MemoryNotificationStore {
    records: Mutex<Vec<Notification>>,
}

impl MemoryNotificationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records, across all users.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl NotificationStore for MemoryNotificationStore {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        let mut matching: Vec<Notification> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id)
            .cloned()
            .collect();
        matching.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(matching)
    }

    async fn find_unseen_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<Notification>, sqlx::Error> {
        let mut unseen: Vec<Notification> = self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|n| n.user_id == user_id && !n.seen)
            .cloned()
            .collect();
        unseen.sort_by(|a, b| b.created_on.cmp(&a.created_on));
        Ok(unseen)
    }

    async fn save(&self, notification: &Notification) -> Result<Notification, sqlx::Error> {
        self.records.lock().unwrap().push(notification.clone());
        Ok(notification.clone())
    }

    async fn save_all(&self, notifications: &[Notification]) -> Result<(), sqlx::Error> {
        let mut records = self.records.lock().unwrap();
        for updated in notifications {
            if let Some(existing) = records.iter_mut().find(|n| n.id == updated.id) {
                *existing = updated.clone();
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_preference_store_roundtrip() {
        let store = MemoryPreferenceStore::new();
        let user_id = Uuid::new_v4();

        assert!(store.find_by_user_id(user_id).await.unwrap().is_none());

        let preference = NotificationPreference::new(user_id, true, "a@example.com".to_string());
        store.save(&preference).await.unwrap();

        let found = store.find_by_user_id(user_id).await.unwrap().unwrap();
        assert_eq!(found, preference);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_memory_preference_store_save_replaces() {
        let store = MemoryPreferenceStore::new();
        let user_id = Uuid::new_v4();

        let mut preference = NotificationPreference::new(user_id, true, String::new());
        store.save(&preference).await.unwrap();

        preference.enabled = false;
        store.save(&preference).await.unwrap();

        assert_eq!(store.len(), 1);
        let found = store.find_by_user_id(user_id).await.unwrap().unwrap();
        assert!(!found.enabled);
    }

    #[tokio::test]
    async fn test_memory_notification_store_filters_by_user() {
        let store = MemoryNotificationStore::new();
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        store
            .save(&Notification::new(user_a, "a".to_string(), "b".to_string()))
            .await
            .unwrap();
        store
            .save(&Notification::new(user_b, "c".to_string(), "d".to_string()))
            .await
            .unwrap();

        let for_a = store.find_by_user_id(user_a).await.unwrap();
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].subject, "a");
    }

    #[tokio::test]
    async fn test_memory_notification_store_save_all_updates_in_place() {
        let store = MemoryNotificationStore::new();
        let user_id = Uuid::new_v4();

        let notification = Notification::new(user_id, "s".to_string(), "b".to_string());
        store.save(&notification).await.unwrap();

        let mut updated = notification.clone();
        updated.seen = true;
        store.save_all(&[updated]).await.unwrap();

        assert_eq!(store.len(), 1);
        assert!(store.find_unseen_by_user_id(user_id).await.unwrap().is_empty());
    }
}

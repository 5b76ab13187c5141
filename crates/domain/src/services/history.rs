//! Notification history reads and the bulk mark-as-read mutation.

use std::sync::Arc;

use uuid::Uuid;

use crate::models::Notification;
use crate::services::store::NotificationStore;

/// Read-only queries over persisted notifications, plus mark-as-read.
#[derive(Clone)]
pub struct HistoryService {
    store: Arc<dyn NotificationStore>,
}

impl HistoryService {
    pub fn new(store: Arc<dyn NotificationStore>) -> Self {
        Self { store }
    }

    /// All notifications for the user, newest first.
    pub async fn history(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        self.store.find_by_user_id(user_id).await
    }

    /// The unseen subset, newest first.
    pub async fn unseen(&self, user_id: Uuid) -> Result<Vec<Notification>, sqlx::Error> {
        self.store.find_unseen_by_user_id(user_id).await
    }

    /// Mark every notification that is unseen at call start as seen.
    ///
    /// Returns how many records were marked. The batch write is atomic per
    /// record only; a concurrent dispatch may add new unseen records that
    /// this call does not cover.
    pub async fn mark_all_seen(&self, user_id: Uuid) -> Result<usize, sqlx::Error> {
        let mut unseen = self.store.find_unseen_by_user_id(user_id).await?;
        if unseen.is_empty() {
            return Ok(0);
        }

        for notification in &mut unseen {
            notification.seen = true;
        }
        self.store.save_all(&unseen).await?;

        Ok(unseen.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::MemoryNotificationStore;

    async fn seed(store: &MemoryNotificationStore, user_id: Uuid, subject: &str, seen: bool) {
        let mut notification =
            Notification::new(user_id, subject.to_string(), "body".to_string());
        notification.seen = seen;
        store.save(&notification).await.unwrap();
    }

    #[tokio::test]
    async fn test_history_empty_for_unknown_user() {
        let store = Arc::new(MemoryNotificationStore::new());
        let service = HistoryService::new(store);

        let history = service.history(Uuid::new_v4()).await.unwrap();
        assert!(history.is_empty());
    }

    #[tokio::test]
    async fn test_history_returns_all_unseen_returns_subset() {
        let store = Arc::new(MemoryNotificationStore::new());
        let service = HistoryService::new(store.clone());
        let user_id = Uuid::new_v4();

        seed(&store, user_id, "first", true).await;
        seed(&store, user_id, "second", false).await;
        seed(&store, user_id, "third", false).await;

        assert_eq!(service.history(user_id).await.unwrap().len(), 3);

        let unseen = service.unseen(user_id).await.unwrap();
        assert_eq!(unseen.len(), 2);
        assert!(unseen.iter().all(|n| !n.seen));
    }

    #[tokio::test]
    async fn test_mark_all_seen_covers_unseen_at_call_start() {
        let store = Arc::new(MemoryNotificationStore::new());
        let service = HistoryService::new(store.clone());
        let user_id = Uuid::new_v4();

        seed(&store, user_id, "a", false).await;
        seed(&store, user_id, "b", false).await;
        seed(&store, user_id, "c", true).await;

        let marked = service.mark_all_seen(user_id).await.unwrap();

        assert_eq!(marked, 2);
        assert!(service.unseen(user_id).await.unwrap().is_empty());
        assert_eq!(service.history(user_id).await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_mark_all_seen_noop_when_nothing_unseen() {
        let store = Arc::new(MemoryNotificationStore::new());
        let service = HistoryService::new(store.clone());
        let user_id = Uuid::new_v4();

        seed(&store, user_id, "a", true).await;

        let marked = service.mark_all_seen(user_id).await.unwrap();
        assert_eq!(marked, 0);
    }

    #[tokio::test]
    async fn test_mark_all_seen_ignores_other_users() {
        let store = Arc::new(MemoryNotificationStore::new());
        let service = HistoryService::new(store.clone());
        let user_a = Uuid::new_v4();
        let user_b = Uuid::new_v4();

        seed(&store, user_a, "a", false).await;
        seed(&store, user_b, "b", false).await;

        let marked = service.mark_all_seen(user_a).await.unwrap();

        assert_eq!(marked, 1);
        assert_eq!(service.unseen(user_b).await.unwrap().len(), 1);
    }
}

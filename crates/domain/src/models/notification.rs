//! Notification domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// A dispatched notification. Immutable after creation except for `seen`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
    pub created_on: DateTime<Utc>,
    pub seen: bool,
}

impl Notification {
    /// Construct a new unseen notification, stamping identity and creation
    /// time at construction.
    pub fn new(user_id: Uuid, subject: String, body: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            subject,
            body,
            created_on: Utc::now(),
            seen: false,
        }
    }
}

/// Request payload for dispatching a notification.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendNotificationRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 150, message = "Subject must be 1-150 characters"))]
    pub subject: String,

    #[validate(length(min = 1, max = 5000, message = "Body must be 1-5000 characters"))]
    pub body: String,
}

/// Response payload for a single notification.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subject: String,
    pub body: String,
    pub created_on: DateTime<Utc>,
    pub seen: bool,
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self {
            id: n.id,
            user_id: n.user_id,
            subject: n.subject,
            body: n.body,
            created_on: n.created_on,
            seen: n.seen,
        }
    }
}

/// Response for history and unseen listings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListNotificationsResponse {
    pub notifications: Vec<NotificationResponse>,
    pub total: usize,
}

/// Response for the bulk mark-as-read operation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkSeenResponse {
    pub marked: usize,
}

/// Query parameters identifying the user whose notifications are addressed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub user_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_notification_is_unseen() {
        let notification = Notification::new(
            Uuid::new_v4(),
            "Welcome".to_string(),
            "Hello there".to_string(),
        );
        assert!(!notification.seen);
        assert_eq!(notification.subject, "Welcome");
        assert_eq!(notification.body, "Hello there");
    }

    #[test]
    fn test_new_notifications_get_distinct_ids() {
        let user_id = Uuid::new_v4();
        let a = Notification::new(user_id, "s".to_string(), "b".to_string());
        let b = Notification::new(user_id, "s".to_string(), "b".to_string());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_send_request_deserialization() {
        let json = r#"{
            "userId": "550e8400-e29b-41d4-a716-446655440000",
            "subject": "Hi",
            "body": "Your weekly summary is ready."
        }"#;

        let request: SendNotificationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.subject, "Hi");
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_request_empty_subject_rejected() {
        let request = SendNotificationRequest {
            user_id: Uuid::new_v4(),
            subject: String::new(),
            body: "body".to_string(),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_send_request_oversized_body_rejected() {
        let request = SendNotificationRequest {
            user_id: Uuid::new_v4(),
            subject: "subject".to_string(),
            body: "x".repeat(5001),
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_notification_response_serialization() {
        let notification =
            Notification::new(Uuid::new_v4(), "Hi".to_string(), "body".to_string());
        let response: NotificationResponse = notification.into();

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"subject\":\"Hi\""));
        assert!(json.contains("\"seen\":false"));
        assert!(json.contains("\"createdOn\""));
    }

    #[test]
    fn test_list_response_serialization() {
        let response = ListNotificationsResponse {
            notifications: vec![],
            total: 0,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"notifications\":[]"));
        assert!(json.contains("\"total\":0"));
    }
}

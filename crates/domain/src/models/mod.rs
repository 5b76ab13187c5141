//! Domain models for the Notifier backend.

pub mod notification;
pub mod preference;

pub use notification::{
    ListNotificationsResponse, MarkSeenResponse, Notification, NotificationResponse,
    SendNotificationRequest,
};
pub use preference::{NotificationPreference, PreferenceResponse, UpsertPreferenceRequest};

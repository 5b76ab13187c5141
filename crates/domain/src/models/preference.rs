//! Notification preference domain model.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Per-user notification preference. At most one record exists per user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPreference {
    pub id: Uuid,
    pub user_id: Uuid,
    pub enabled: bool,
    /// Email delivery address. May be empty when the user has not provided one.
    pub contact_info: String,
}

impl NotificationPreference {
    /// Construct a new preference with a freshly generated identifier.
    ///
    /// Identifiers are assigned here, by the creating component, never by
    /// the store.
    pub fn new(user_id: Uuid, enabled: bool, contact_info: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            enabled,
            contact_info,
        }
    }

    /// The preference a user gets on first access: notifications enabled,
    /// no contact address yet.
    pub fn default_for(user_id: Uuid) -> Self {
        Self::new(user_id, true, String::new())
    }
}

/// Request payload for creating or replacing a user's preference.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertPreferenceRequest {
    pub user_id: Uuid,

    pub notification_enabled: bool,

    #[validate(length(max = 255, message = "Contact info must be at most 255 characters"))]
    pub contact_info: Option<String>,
}

/// Response payload for preference operations.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub enabled: bool,
    pub contact_info: String,
}

impl From<NotificationPreference> for PreferenceResponse {
    fn from(p: NotificationPreference) -> Self {
        Self {
            id: p.id,
            user_id: p.user_id,
            enabled: p.enabled,
            contact_info: p.contact_info,
        }
    }
}

/// Query parameters identifying the user whose preference is addressed.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PreferenceQuery {
    pub user_id: Uuid,
}

/// Query parameters for the enabled-flag toggle.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TogglePreferenceQuery {
    pub user_id: Uuid,
    pub enabled: bool,
}

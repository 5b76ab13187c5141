//! Notification preference entity (database row mapping).

use sqlx::FromRow;
use uuid::Uuid;

/// Database row mapping for the notification_preferences table.
#[derive(Debug, Clone, FromRow)]
pub struct PreferenceEntity {
    pub id: Uuid,
    pub user_id: Uuid,
    pub enabled: bool,
    pub contact_info: String,
}

impl From<PreferenceEntity> for domain::models::NotificationPreference {
    fn from(entity: PreferenceEntity) -> Self {
        Self {
            id: entity.id,
            user_id: entity.user_id,
            enabled: entity.enabled,
            contact_info: entity.contact_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preference_entity_to_domain() {
        let entity = PreferenceEntity {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            enabled: true,
            contact_info: "user@example.com".to_string(),
        };

        let preference: domain::models::NotificationPreference = entity.clone().into();
        assert_eq!(preference.id, entity.id);
        assert_eq!(preference.user_id, entity.user_id);
        assert!(preference.enabled);
        assert_eq!(preference.contact_info, "user@example.com");
    }
}

//! Notification preference repository for database operations.

use async_trait::async_trait;
use domain::models::NotificationPreference;
use domain::services::PreferenceStore;
use sqlx::PgPool;
use uuid::Uuid;

use crate::entities::PreferenceEntity;

/// Repository for notification preference database operations.
#[derive(Clone)]
pub struct PreferenceRepository {
    pool: PgPool,
}

impl PreferenceRepository {
    /// Create a new repository instance.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a preference by user ID.
    pub async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        let entity = sqlx::query_as::<_, PreferenceEntity>(
            r#"
            SELECT id, user_id, enabled, contact_info
            FROM notification_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entity.map(Into::into))
    }

    /// Persist a preference record.
    ///
    /// The upsert targets the user_id unique constraint, so concurrent saves
    /// for the same user collapse to a single row (last write wins).
    pub async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, sqlx::Error> {
        let entity = sqlx::query_as::<_, PreferenceEntity>(
            r#"
            INSERT INTO notification_preferences (id, user_id, enabled, contact_info)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id) DO UPDATE
                SET enabled = EXCLUDED.enabled,
                    contact_info = EXCLUDED.contact_info
            RETURNING id, user_id, enabled, contact_info
            "#,
        )
        .bind(preference.id)
        .bind(preference.user_id)
        .bind(preference.enabled)
        .bind(&preference.contact_info)
        .fetch_one(&self.pool)
        .await?;

        Ok(entity.into())
    }
}

#[async_trait]
impl PreferenceStore for PreferenceRepository {
    async fn find_by_user_id(
        &self,
        user_id: Uuid,
    ) -> Result<Option<NotificationPreference>, sqlx::Error> {
        PreferenceRepository::find_by_user_id(self, user_id).await
    }

    async fn save(
        &self,
        preference: &NotificationPreference,
    ) -> Result<NotificationPreference, sqlx::Error> {
        PreferenceRepository::save(self, preference).await
    }
}

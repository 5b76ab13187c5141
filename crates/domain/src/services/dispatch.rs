//! Notification dispatch.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::models::Notification;
use crate::services::mailer::MailSender;
use crate::services::preferences::PreferenceService;
use crate::services::store::NotificationStore;

/// Errors the dispatch engine can surface to its callers.
///
/// Mail transport failures are deliberately absent: delivery is best-effort
/// and its outcome is observable only through logs and metrics.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// The user's preference has notifications disabled.
    #[error("User {user_id} does not accept notifications")]
    NotEligible { user_id: Uuid },

    /// A storage fault, passed through unchanged.
    #[error(transparent)]
    Store(#[from] sqlx::Error),
}

/// Dispatches notifications: eligibility check, best-effort email delivery,
/// unconditional history persistence.
#[derive(Clone)]
pub struct DispatchService {
    preferences: PreferenceService,
    notifications: Arc<dyn NotificationStore>,
    mailer: Arc<dyn MailSender>,
}

impl DispatchService {
    pub fn new(
        preferences: PreferenceService,
        notifications: Arc<dyn NotificationStore>,
        mailer: Arc<dyn MailSender>,
    ) -> Self {
        Self {
            preferences,
            notifications,
            mailer,
        }
    }

    /// Send a notification to a user.
    ///
    /// The preference is resolved via get-or-create, so first-time recipients
    /// are eligible by default. When the preference is disabled, nothing is
    /// persisted and the mailer is never invoked. Otherwise email delivery is
    /// attempted unconditionally (an empty contact address is rejected by the
    /// transport, not special-cased here) and a history record is persisted
    /// whatever the delivery outcome.
    pub async fn send(
        &self,
        user_id: Uuid,
        subject: &str,
        body: &str,
    ) -> Result<Notification, DispatchError> {
        let preference = self.preferences.get_or_create(user_id).await?;

        if !preference.enabled {
            return Err(DispatchError::NotEligible { user_id });
        }

        match self
            .mailer
            .send_mail(&preference.contact_info, subject, body)
            .await
        {
            Ok(()) => {
                tracing::info!(user_id = %user_id, to = %preference.contact_info, "Email sent");
            }
            Err(err) => {
                tracing::warn!(
                    user_id = %user_id,
                    to = %preference.contact_info,
                    error = %err,
                    "Failed to send email"
                );
            }
        }

        let notification = Notification::new(user_id, subject.to_string(), body.to_string());
        Ok(self.notifications.save(&notification).await?)
    }
}

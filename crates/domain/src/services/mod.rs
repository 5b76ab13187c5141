//! Core services for the Notifier backend.
//!
//! Services contain the decision logic that operates on domain models. The
//! store and mail-sender contracts they depend on are defined here as traits
//! so the logic runs identically over PostgreSQL repositories in production
//! and in-memory implementations in tests.

pub mod dispatch;
pub mod history;
pub mod mailer;
pub mod preferences;
pub mod store;

pub use dispatch::{DispatchError, DispatchService};
pub use history::HistoryService;
pub use mailer::{MailError, MailSender, MockMailSender};
pub use preferences::PreferenceService;
pub use store::{
    MemoryNotificationStore, MemoryPreferenceStore, NotificationStore, PreferenceStore,
};

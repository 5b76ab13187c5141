//! Database entity definitions.
//!
//! Entities are direct mappings to database rows.

pub mod notification;
pub mod preference;

pub use notification::NotificationEntity;
pub use preference::PreferenceEntity;

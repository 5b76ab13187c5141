//! Repository implementations for database operations.

pub mod notification;
pub mod preference;

pub use notification::NotificationRepository;
pub use preference::PreferenceRepository;

//! API-layer services.

pub mod mailer;

pub use mailer::EmailSender;

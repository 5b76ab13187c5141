//! Domain layer for the Notifier backend.
//!
//! This crate contains:
//! - Domain models (NotificationPreference, Notification)
//! - Core services (preference resolution, dispatch, history)
//! - Store and mail-sender contracts with in-memory/mock implementations

pub mod models;
pub mod services;

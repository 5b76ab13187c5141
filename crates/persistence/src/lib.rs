//! Persistence layer for the Notifier backend.
//!
//! This crate contains:
//! - Database connection management
//! - Entity definitions (database row mappings)
//! - Repository implementations of the domain store contracts

pub mod db;
pub mod entities;
pub mod repositories;

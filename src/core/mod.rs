//! Core domain logic for codigo
//!
//! This module contains pure business logic with no I/O dependencies.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (`ClassificationResult`, `MatchRecord`, `Notification`)
//! - `services/` - Classification and the match session
//! - `ports/` - Trait definitions for the matcher and notifier

pub mod models;
pub mod ports;
pub mod services;

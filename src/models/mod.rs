// src/models/mod.rs

//! Domain models for the status bot.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod feed;
mod issue;
mod status;

// Re-export all public types
pub use config::{CommandConfig, Config, LoggingConfig, StatusConfig, TranslationConfig};
pub use feed::FeedEntry;
pub use issue::{ComponentIssueLog, IssueEntry};
pub use status::{
    AffectedComponent, Component, Incident, IncidentUpdate, PageInfo, StatusIndex, StatusMeta,
    StatusSnapshot,
};

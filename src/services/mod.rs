//! Service layer for the status bot.
//!
//! This module contains the business logic for:
//! - Timestamp and timezone normalization (`time`)
//! - Incident filtering per component (`incidents`)
//! - Feed parsing and lookback filtering (`feed`)
//! - Markup cleanup for feed text (`sanitize`)
//! - Frame splitting for chat transports (`chunk`)
//! - Status page fetching (`StatusSource`)
//! - Machine translation (`Translator`)

pub mod chunk;
pub mod feed;
pub mod incidents;
pub mod sanitize;
mod source;
pub mod time;
mod translate;

pub use source::{HttpStatusSource, StatusSource};
pub use translate::{GoogleTranslator, Translator};

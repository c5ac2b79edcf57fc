// src/lib.rs

//! isgptup status bot library

pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;
pub mod services;
pub mod transport;
pub mod utils;

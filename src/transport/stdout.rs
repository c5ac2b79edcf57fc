// src/transport/stdout.rs

//! Console transport for one-shot runs.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use super::{ChatTransport, MessageHandle};
use crate::error::TransportError;

/// Prints every message to stdout, numbering them in send order.
#[derive(Debug, Default)]
pub struct StdoutTransport {
    next_id: AtomicU64,
}

impl StdoutTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChatTransport for StdoutTransport {
    async fn send(&self, text: &str) -> Result<MessageHandle, TransportError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
        println!("── message #{id} ──");
        println!("{text}");
        Ok(MessageHandle(id))
    }

    async fn edit(&self, handle: &MessageHandle, text: &str) -> Result<(), TransportError> {
        println!("── message #{} (edited) ──", handle.0);
        println!("{text}");
        Ok(())
    }
}

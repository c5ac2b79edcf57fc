//! Chat transport abstractions.
//!
//! The command layer only needs to post a message and later replace its
//! text. Backends:
//! - `DiscordChannel`: a Discord text channel via serenity (feature `discord`)
//! - `StdoutTransport`: prints frames, used by the `check` subcommand

#[cfg(feature = "discord")]
pub mod discord;
mod stdout;

use async_trait::async_trait;

use crate::error::TransportError;

#[cfg(feature = "discord")]
pub use discord::{DiscordBot, DiscordChannel};
pub use stdout::StdoutTransport;

/// Identifies a message previously sent through a transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageHandle(pub u64);

/// Trait for chat delivery backends.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Post a new message.
    async fn send(&self, text: &str) -> Result<MessageHandle, TransportError>;

    /// Replace the text of a message sent earlier.
    async fn edit(&self, handle: &MessageHandle, text: &str) -> Result<(), TransportError>;
}

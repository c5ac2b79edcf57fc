// src/transport/discord.rs

//! Discord backend built on serenity.

use std::sync::Arc;

use async_trait::async_trait;
use serenity::all::{
    ChannelId, Client, Context, EditMessage, EventHandler, GatewayIntents, Http, Message,
    MessageId, Ready,
};
use serenity::http::HttpError;

use super::{ChatTransport, MessageHandle};
use crate::error::{AppError, Result, TransportError};
use crate::pipeline::{StatusCommand, parse_command_line};

/// Discord JSON error code for "Invalid Form Body", returned for
/// oversized message content.
pub const INVALID_FORM_BODY: isize = 50035;

/// A single Discord text channel.
pub struct DiscordChannel {
    http: Arc<Http>,
    channel_id: ChannelId,
}

impl DiscordChannel {
    pub fn new(http: Arc<Http>, channel_id: ChannelId) -> Self {
        Self { http, channel_id }
    }
}

/// Separate size rejections from every other delivery failure.
fn classify(err: serenity::Error) -> TransportError {
    match &err {
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
            if response.error.code == INVALID_FORM_BODY =>
        {
            TransportError::TooLarge
        }
        _ => TransportError::Other(err.to_string()),
    }
}

#[async_trait]
impl ChatTransport for DiscordChannel {
    async fn send(&self, text: &str) -> std::result::Result<MessageHandle, TransportError> {
        let message = self
            .channel_id
            .say(&self.http, text)
            .await
            .map_err(classify)?;
        Ok(MessageHandle(message.id.get()))
    }

    async fn edit(
        &self,
        handle: &MessageHandle,
        text: &str,
    ) -> std::result::Result<(), TransportError> {
        self.channel_id
            .edit_message(
                &self.http,
                MessageId::new(handle.0),
                EditMessage::new().content(text),
            )
            .await
            .map_err(classify)?;
        Ok(())
    }
}

/// Gateway event handler that serves the status command.
pub struct DiscordBot {
    command: Arc<StatusCommand>,
    trigger: String,
}

impl DiscordBot {
    pub fn new(command: Arc<StatusCommand>) -> Self {
        let trigger = command.config().trigger();
        Self { command, trigger }
    }

    /// Connect to the gateway and serve until the connection ends.
    pub async fn run(self, token: &str) -> Result<()> {
        let intents = GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::DIRECT_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let mut client = Client::builder(token, intents)
            .event_handler(self)
            .await
            .map_err(|e| AppError::config(format!("Failed to build Discord client: {e}")))?;

        client
            .start()
            .await
            .map_err(|e| AppError::from(TransportError::Other(e.to_string())))
    }
}

#[async_trait]
impl EventHandler for DiscordBot {
    async fn ready(&self, _ctx: Context, ready: Ready) {
        log::info!(
            "Connected to Discord as {} ({} guilds)",
            ready.user.name,
            ready.guilds.len()
        );
    }

    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }
        let Some(args) = parse_command_line(&msg.content, &self.trigger) else {
            return;
        };

        log::info!(
            "{} invoked by {} in channel {}",
            self.trigger,
            msg.author.name,
            msg.channel_id
        );
        let channel = DiscordChannel::new(Arc::clone(&ctx.http), msg.channel_id);
        match self.command.run(&args, &channel).await {
            Ok(outcome) => log::debug!("Invocation finished: {outcome:?}"),
            Err(e) => log::error!("Invocation {:?} failed: {}", args, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use serenity::http::ErrorResponse;

    use super::*;

    async fn discord_rejection(body: &'static str) -> serenity::Error {
        let response = http::Response::builder().status(400).body(body).unwrap();
        let response =
            ErrorResponse::from_response(reqwest::Response::from(response), reqwest::Method::POST)
                .await;
        serenity::Error::Http(HttpError::UnsuccessfulRequest(response))
    }

    #[tokio::test]
    async fn test_classify_invalid_form_body_as_too_large() {
        let err =
            discord_rejection(r#"{"code":50035,"message":"Invalid Form Body","errors":{}}"#).await;
        assert_eq!(classify(err), TransportError::TooLarge);
    }

    #[tokio::test]
    async fn test_classify_other_discord_codes() {
        let err = discord_rejection(r#"{"code":50013,"message":"Missing Permissions","errors":{}}"#)
            .await;
        assert!(matches!(classify(err), TransportError::Other(_)));
    }

    #[test]
    fn test_classify_other_errors() {
        let err = serenity::Error::Other("gateway closed");
        assert_eq!(
            classify(err),
            TransportError::Other("gateway closed".to_string())
        );
    }
}

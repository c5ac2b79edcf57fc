// src/pipeline/command.rs

//! Status command orchestration.
//!
//! One invocation runs to completion: parse arguments, fetch fresh status
//! data, format, chunk into frames, deliver, then optionally translate.
//! Nothing is shared between invocations except the immutable
//! collaborators held by [`StatusCommand`].

use std::num::NonZeroUsize;
use std::sync::Arc;

use chrono::Utc;

use super::invocation::{Invocation, Mode, parse_invocation};
use super::report::{
    Report, all_services_report, feed_report, help_text, service_report, too_large_notice,
    translated_block,
};
use crate::error::{AppError, Result};
use crate::models::{CommandConfig, Config};
use crate::services::chunk::split_frames;
use crate::services::feed::recent_entries;
use crate::services::incidents::filter_recent;
use crate::services::time::resolve_timezone;
use crate::services::{GoogleTranslator, HttpStatusSource, StatusSource, Translator};
use crate::transport::ChatTransport;
use crate::utils::http::create_async_client;

/// Placeholder posted before any work is done.
pub const LOADING_TEXT: &str = "Loading...";

/// How an invocation ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Arguments were refused; the placeholder now shows this message
    Rejected(String),
    /// Output was delivered in this many frames
    Delivered { frames: usize },
    /// The platform refused a frame for its size; the placeholder now
    /// asks for a smaller range
    TooLarge,
}

/// Translator plus the fixed language pair.
struct Translation {
    translator: Arc<dyn Translator>,
    source: String,
    target: String,
}

/// The `isgptup` command and its collaborators.
pub struct StatusCommand {
    config: CommandConfig,
    frame_limit: NonZeroUsize,
    source: Arc<dyn StatusSource>,
    translation: Option<Translation>,
}

impl StatusCommand {
    /// Create a command without translation.
    pub fn new(config: CommandConfig, source: Arc<dyn StatusSource>) -> Result<Self> {
        let frame_limit = NonZeroUsize::new(config.frame_limit)
            .ok_or_else(|| AppError::config("command.frame_limit must be > 0"))?;
        Ok(Self {
            config,
            frame_limit,
            source,
            translation: None,
        })
    }

    /// Translate reported issues from `source` to `target` language.
    pub fn with_translator(
        mut self,
        translator: Arc<dyn Translator>,
        source: impl Into<String>,
        target: impl Into<String>,
    ) -> Self {
        self.translation = Some(Translation {
            translator,
            source: source.into(),
            target: target.into(),
        });
        self
    }

    /// Build the production command from configuration. The status source
    /// and translator share one HTTP client.
    pub fn from_config(config: &Config) -> Result<Self> {
        let client = create_async_client(&config.status)?;
        let source = Arc::new(HttpStatusSource::with_client(client.clone(), &config.status));
        let command = Self::new(config.command.clone(), source)?;

        if !config.translation.enabled {
            return Ok(command);
        }
        let translator = Arc::new(GoogleTranslator::new(
            client,
            config.translation.endpoint.clone(),
        ));
        Ok(command.with_translator(
            translator,
            config.translation.source.clone(),
            config.translation.target.clone(),
        ))
    }

    pub fn config(&self) -> &CommandConfig {
        &self.config
    }

    /// Handle one invocation and deliver its output through `transport`.
    ///
    /// Validation problems and size rejections are reported in the chat
    /// and returned as outcomes. Fetch, parse and translation failures,
    /// and any other transport error, are returned as errors. Frames
    /// already delivered stay delivered.
    pub async fn run(&self, args: &[&str], transport: &dyn ChatTransport) -> Result<CommandOutcome> {
        let placeholder = transport.send(LOADING_TEXT).await?;

        let invocation = match parse_invocation(args, &self.config) {
            Ok(invocation) => invocation,
            Err(rejection) => {
                let message = rejection.message(&self.config);
                log::info!("Rejected invocation {args:?}: {rejection:?}");
                transport.edit(&placeholder, &message).await?;
                return Ok(CommandOutcome::Rejected(message));
            }
        };

        match self.deliver(&invocation, transport).await {
            Err(e) if e.is_too_large() => {
                log::warn!(
                    "Frame rejected as too large for {:?}; asking for a smaller range",
                    invocation
                );
                transport
                    .edit(&placeholder, &too_large_notice(invocation.days))
                    .await?;
                Ok(CommandOutcome::TooLarge)
            }
            other => other,
        }
    }

    async fn deliver(
        &self,
        invocation: &Invocation,
        transport: &dyn ChatTransport,
    ) -> Result<CommandOutcome> {
        let report = self.build_report(invocation).await?;
        let mut frames = self.send_frames(&report.body, transport).await?;

        if let Some(translation) = &self.translation {
            if !report.translation_source.is_empty() {
                let translated = translation
                    .translator
                    .translate(
                        &report.translation_source,
                        &translation.source,
                        &translation.target,
                    )
                    .await?;
                frames += self
                    .send_frames(&translated_block(&translated), transport)
                    .await?;
            }
        }

        Ok(CommandOutcome::Delivered { frames })
    }

    /// Produce the report text for a validated invocation.
    pub async fn build_report(&self, invocation: &Invocation) -> Result<Report> {
        let days = invocation.days;
        match &invocation.mode {
            Mode::HelpMe => Ok(Report {
                body: help_text(&self.config),
                ..Report::default()
            }),
            Mode::Issue => {
                let entries = self.source.fetch_feed().await?;
                let recent = recent_entries(&entries, days, &self.config.day_range(), Utc::now())?;
                log::info!("{} feed entries within {} day(s)", recent.len(), days);
                // feed text is not translated
                Ok(Report {
                    body: feed_report(days, &recent),
                    ..Report::default()
                })
            }
            Mode::All | Mode::Service(_) => {
                let snapshot = self.source.fetch_snapshot().await?;
                let tz = resolve_timezone(&snapshot)?;
                let issue_log = filter_recent(&snapshot, days, tz)?;
                Ok(match &invocation.mode {
                    Mode::Service(service) => service_report(service, days, &issue_log),
                    _ => all_services_report(days, &issue_log),
                })
            }
        }
    }

    async fn send_frames(&self, text: &str, transport: &dyn ChatTransport) -> Result<usize> {
        let frames = split_frames(text, self.frame_limit);
        for frame in &frames {
            transport.send(frame).await?;
        }
        Ok(frames.len())
    }
}

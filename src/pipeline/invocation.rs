// src/pipeline/invocation.rs

//! Command argument parsing.
//!
//! Grammar: `<prefix><name> [service|days] [days]`. A bare integer in the
//! first position is a day count and selects every service.

use crate::models::CommandConfig;

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Report every declared component
    All,
    /// Report a single named service
    Service(String),
    /// Print usage, no fetch
    HelpMe,
    /// Report entries from the incident history feed
    Issue,
}

/// A validated invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    pub days: i64,
}

/// Why an invocation was refused before any fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    InvalidService(String),
    InvalidDays,
}

impl Rejection {
    /// User-facing text for the rejection.
    pub fn message(&self, config: &CommandConfig) -> String {
        match self {
            Self::InvalidService(_) => {
                let names: Vec<String> = config
                    .services
                    .iter()
                    .map(|name| format!("'{name}'"))
                    .collect();
                format!(
                    "**Invalid service name. Please use {}, or 'all'.**",
                    names.join(", ")
                )
            }
            Self::InvalidDays => format!(
                "Please enter a valid number of days between {} and {}.",
                config.min_days, config.max_days
            ),
        }
    }
}

/// Split a chat line into positionals if it starts with `trigger`.
///
/// Returns `None` for lines that are not this command. Words after the
/// second positional are ignored.
pub fn parse_command_line<'a>(line: &'a str, trigger: &str) -> Option<Vec<&'a str>> {
    let mut words = line.split_whitespace();
    if words.next()? != trigger {
        return None;
    }
    Some(words.take(2).collect())
}

fn is_digits(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Interpret positionals against the configured services and day range.
pub fn parse_invocation(args: &[&str], config: &CommandConfig) -> Result<Invocation, Rejection> {
    let service = args.first().copied();
    let explicit_days = args.get(1).copied();

    let (mode, days_token) = match service {
        None | Some("all") => (Mode::All, explicit_days),
        Some(token) if is_digits(token) => (Mode::All, Some(token)),
        Some("helpme") => (Mode::HelpMe, explicit_days),
        Some("issue") => (Mode::Issue, explicit_days),
        Some(token) if config.services.iter().any(|s| s == token) => {
            (Mode::Service(token.to_string()), explicit_days)
        }
        Some(token) => return Err(Rejection::InvalidService(token.to_string())),
    };

    let days = match days_token {
        Some(token) => token.parse::<i64>().map_err(|_| Rejection::InvalidDays)?,
        None => config.default_days,
    };
    if !config.day_range().contains(&days) {
        return Err(Rejection::InvalidDays);
    }

    Ok(Invocation { mode, days })
}

// src/services/incidents.rs

//! Incident filter.
//!
//! Builds the per-component issue log for a lookback window. Window
//! membership counts whole elapsed days between `now` and the incident's
//! creation time, so an incident 36 hours old is one day back.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::error::Result;
use crate::models::{ComponentIssueLog, IssueEntry, StatusSnapshot};
use crate::services::time::parse_instant;

/// Collect non-operational updates from incidents at most `days_back`
/// days old, measured from the current time.
pub fn filter_recent(
    snapshot: &StatusSnapshot,
    days_back: i64,
    tz: Tz,
) -> Result<ComponentIssueLog> {
    filter_recent_at(snapshot, days_back, tz, Utc::now())
}

/// [`filter_recent`] against an explicit `now`.
///
/// Fails on the first incident whose timestamp cannot be parsed.
/// Component names missing from the snapshot's declared set are skipped
/// with a warning.
pub fn filter_recent_at(
    snapshot: &StatusSnapshot,
    days_back: i64,
    tz: Tz,
    now: DateTime<Utc>,
) -> Result<ComponentIssueLog> {
    let now = now.with_timezone(&tz);
    let mut issue_log =
        ComponentIssueLog::with_components(snapshot.components.iter().map(|c| c.name.as_str()));
    let mut included = 0usize;

    for incident in &snapshot.incidents {
        let created = parse_instant(&incident.created_at)?.with_timezone(&tz);
        if (now - created).num_days() > days_back {
            continue;
        }
        included += 1;

        let date = created.date_naive();
        for update in &incident.updates {
            for component in update
                .affected_components
                .iter()
                .filter(|c| c.was_degraded())
            {
                let entry = IssueEntry {
                    date,
                    text: update.body.clone(),
                };
                if !issue_log.push(&component.name, entry) {
                    log::warn!(
                        "Skipping update for undeclared component '{}' (incident created {})",
                        component.name,
                        incident.created_at
                    );
                }
            }
        }
    }

    log::debug!(
        "{} of {} incidents within {} day(s); {} issue entries",
        included,
        snapshot.incidents.len(),
        days_back,
        issue_log.issue_count()
    );
    Ok(issue_log)
}

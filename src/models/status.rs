//! Status page data structures.
//!
//! Field names follow the Atlassian Statuspage JSON API. Only the fields
//! the report needs are modelled; everything else is ignored on decode.

use serde::{Deserialize, Serialize};

/// Response of the page metadata endpoint (`api/v2/status.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusMeta {
    pub page: PageInfo,
}

/// Page description carrying the declared timezone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageInfo {
    /// IANA zone name, e.g. `America/Los_Angeles`
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Response of the summary endpoint (`index.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusIndex {
    #[serde(default)]
    pub components: Vec<Component>,

    #[serde(default)]
    pub incidents: Vec<Incident>,
}

/// A point-in-time view of the status page, fetched fresh per invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    /// Declared zone, absent when the page did not publish one
    pub timezone: Option<String>,

    /// Components in the order the page lists them
    pub components: Vec<Component>,

    /// Incidents in the order the page lists them
    pub incidents: Vec<Incident>,
}

impl StatusSnapshot {
    /// Combine the metadata and summary responses.
    pub fn assemble(meta: StatusMeta, index: StatusIndex) -> Self {
        Self {
            timezone: meta.page.time_zone,
            components: index.components,
            incidents: index.incidents,
        }
    }
}

/// A named sub-service of the monitored system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Component {
    pub name: String,
}

/// A reported event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Incident {
    /// Creation time as published, ISO-8601 with an offset
    pub created_at: String,

    #[serde(default, rename = "incident_updates")]
    pub updates: Vec<IncidentUpdate>,
}

/// One update posted on an incident.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct IncidentUpdate {
    #[serde(default)]
    pub body: String,

    #[serde(default)]
    pub affected_components: Vec<AffectedComponent>,
}

/// A component touched by an update, with its status before the update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AffectedComponent {
    pub name: String,

    #[serde(default)]
    pub old_status: String,
}

impl AffectedComponent {
    /// Status value that marks a component as healthy.
    pub const OPERATIONAL: &'static str = "operational";

    /// Whether the component was degraded before the update.
    pub fn was_degraded(&self) -> bool {
        self.old_status != Self::OPERATIONAL
    }
}

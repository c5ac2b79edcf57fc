// src/pipeline/report.rs

//! Chat message formatting.

use crate::models::{CommandConfig, ComponentIssueLog, FeedEntry, IssueEntry};
use crate::services::sanitize::clean_html;

/// A formatted status report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    /// Markdown text for the chat channel
    pub body: String,

    /// Plain issue lines to translate, empty when nothing was reported
    pub translation_source: String,
}

impl Report {
    fn push_issues(&mut self, issues: &[IssueEntry]) {
        if issues.is_empty() {
            self.body.push_str("  > No issues reported.\n");
            return;
        }
        for issue in issues {
            let line = issue.plain_line();
            self.body.push_str(&format!("  > `{line}`\n"));
            self.translation_source.push_str(&line);
            self.translation_source.push('\n');
        }
    }
}

/// Report for one service. Unknown names report no issues.
pub fn service_report(service: &str, days: i64, log: &ComponentIssueLog) -> Report {
    let mut report = Report {
        body: format!("> **{service} Status in the last {days} days:**\n"),
        ..Report::default()
    };
    report.push_issues(log.get(service).unwrap_or_default());
    report
}

/// Report covering every declared component, in declaration order.
pub fn all_services_report(days: i64, log: &ComponentIssueLog) -> Report {
    let mut report = Report {
        body: format!("**All Services Status in the last {days} days:**\n"),
        ..Report::default()
    };
    for (name, issues) in log.iter() {
        report.body.push_str(&format!("\n> **Service: {name}**\n"));
        report.push_issues(issues);
    }
    report
}

/// Report for recent feed entries. Descriptions are cleaned of markup.
pub fn feed_report(days: i64, entries: &[&FeedEntry]) -> String {
    let mut text = format!("**Recent Issues in the last {days} days:**\n");
    if entries.is_empty() {
        text.push_str(&format!("No issues reported in the last {days} days.\n"));
        return text;
    }

    for entry in entries {
        text.push_str(&format!("\n> **{}**\n", clean_html(&entry.title).trim()));
        text.push_str(&format!("> Published: {}\n", entry.published.trim()));
        for line in clean_html(&entry.description)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
        {
            text.push_str(&format!("> {line}\n"));
        }
        if !entry.link.trim().is_empty() {
            text.push_str(&format!("> <{}>\n", entry.link.trim()));
        }
    }
    text
}

/// Block appended after a report with its translation.
pub fn translated_block(translated: &str) -> String {
    format!("**Translated Issues:**\n```{translated}```")
}

/// Replacement text when the platform refused a frame for its size.
pub fn too_large_notice(days: i64) -> String {
    format!("**Too many issue items, try again with a date range smaller than current ({days})!**")
}

/// Static usage text.
pub fn help_text(config: &CommandConfig) -> String {
    let trigger = config.trigger();
    format!(
        "**Usage:** `{trigger} [service|days] [days]`\n\
         > `{trigger}` - all services, last {default} day(s)\n\
         > `{trigger} <days>` - all services, last <days> days\n\
         > `{trigger} all <days>` - same as above\n\
         > `{trigger} <service> [days]` - one service ({services})\n\
         > `{trigger} issue [days]` - incident history feed\n\
         > `{trigger} helpme` - this message\n\
         Days must be between {min} and {max}.\n",
        default = config.default_days,
        services = config.services.join(", "),
        min = config.min_days,
        max = config.max_days,
    )
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn log_with_api_issue() -> ComponentIssueLog {
        let mut log = ComponentIssueLog::with_components(["API", "ChatGPT"]);
        log.push(
            "API",
            IssueEntry {
                date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
                text: "Elevated errors".to_string(),
            },
        );
        log
    }

    #[test]
    fn test_service_report_with_issue() {
        let report = service_report("API", 3, &log_with_api_issue());
        assert_eq!(
            report.body,
            "> **API Status in the last 3 days:**\n  > `Date: 2024-01-09, Issue: Elevated errors`\n"
        );
        assert_eq!(
            report.translation_source,
            "Date: 2024-01-09, Issue: Elevated errors\n"
        );
    }

    #[test]
    fn test_service_report_without_issue() {
        let report = service_report("Labs", 1, &log_with_api_issue());
        assert_eq!(
            report.body,
            "> **Labs Status in the last 1 days:**\n  > No issues reported.\n"
        );
        assert!(report.translation_source.is_empty());
    }

    #[test]
    fn test_all_services_report() {
        let report = all_services_report(2, &log_with_api_issue());
        assert_eq!(
            report.body,
            "**All Services Status in the last 2 days:**\n\
             \n> **Service: API**\n  > `Date: 2024-01-09, Issue: Elevated errors`\n\
             \n> **Service: ChatGPT**\n  > No issues reported.\n"
        );
        assert_eq!(report.translation_source.lines().count(), 1);
    }

    #[test]
    fn test_feed_report_cleans_entries() {
        let entry = FeedEntry {
            title: "Elevated errors".into(),
            description: "<p><strong>Resolved</strong> - Fixed &amp; monitoring</p>\n<p>Thanks</p>".into(),
            link: "https://status.openai.com/incidents/abc".into(),
            published: "Tue, 09 Jan 2024 18:00:00 +0000".into(),
        };
        let text = feed_report(1, &[&entry]);
        assert_eq!(
            text,
            "**Recent Issues in the last 1 days:**\n\
             \n> **Elevated errors**\n\
             > Published: Tue, 09 Jan 2024 18:00:00 +0000\n\
             > Resolved - Fixed & monitoring\n\
             > Thanks\n\
             > <https://status.openai.com/incidents/abc>\n"
        );
    }

    #[test]
    fn test_feed_report_empty() {
        assert!(feed_report(4, &[]).ends_with("No issues reported in the last 4 days.\n"));
    }

    #[test]
    fn test_help_text_mentions_services_and_range() {
        let text = help_text(&CommandConfig::default());
        assert!(text.contains("`!isgptup [service|days] [days]`"));
        assert!(text.contains("API, ChatGPT, Labs, Playground"));
        assert!(text.contains("between 1 and 90"));
    }

    #[test]
    fn test_notices() {
        assert_eq!(translated_block("번역"), "**Translated Issues:**\n```번역```");
        assert!(too_large_notice(30).contains("smaller than current (30)"));
    }
}

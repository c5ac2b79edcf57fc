//! Per-component issue log produced by the incident filter.

use std::collections::HashMap;

use chrono::NaiveDate;

/// One non-operational update attributed to a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueEntry {
    /// Incident creation date in the page's timezone
    pub date: NaiveDate,

    /// Update body as published
    pub text: String,
}

impl IssueEntry {
    /// Plain line used for translation input.
    pub fn plain_line(&self) -> String {
        format!("Date: {}, Issue: {}", self.date, self.text)
    }
}

/// Mapping from component name to its issues, in declaration order.
///
/// Every declared component has a key, even with no issues. Entries keep
/// incident/update iteration order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentIssueLog {
    components: Vec<(String, Vec<IssueEntry>)>,
    positions: HashMap<String, usize>,
}

impl ComponentIssueLog {
    /// Create a log with an empty list for each name. Repeated names
    /// collapse into the first occurrence.
    pub fn with_components<'a>(names: impl IntoIterator<Item = &'a str>) -> Self {
        let mut log = Self::default();
        for name in names {
            if !log.positions.contains_key(name) {
                log.positions.insert(name.to_string(), log.components.len());
                log.components.push((name.to_string(), Vec::new()));
            }
        }
        log
    }

    /// Append an entry for a declared component.
    ///
    /// Returns `false` without modifying the log when `name` was not
    /// declared.
    pub fn push(&mut self, name: &str, entry: IssueEntry) -> bool {
        match self.positions.get(name) {
            Some(&index) => {
                self.components[index].1.push(entry);
                true
            }
            None => false,
        }
    }

    /// Issues for one component, `None` if it was not declared.
    pub fn get(&self, name: &str) -> Option<&[IssueEntry]> {
        self.positions
            .get(name)
            .map(|&index| self.components[index].1.as_slice())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Iterate components with their issues in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[IssueEntry])> {
        self.components
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Total number of entries across components.
    pub fn issue_count(&self) -> usize {
        self.components.iter().map(|(_, entries)| entries.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(text: &str) -> IssueEntry {
        IssueEntry {
            date: NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            text: text.to_string(),
        }
    }

    #[test]
    fn test_keeps_declaration_order() {
        let log = ComponentIssueLog::with_components(["Playground", "API", "ChatGPT"]);
        let names: Vec<_> = log.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["Playground", "API", "ChatGPT"]);
    }

    #[test]
    fn test_duplicate_names_collapse() {
        let log = ComponentIssueLog::with_components(["API", "API"]);
        assert_eq!(log.len(), 1);
    }

    #[test]
    fn test_push_unknown_is_rejected() {
        let mut log = ComponentIssueLog::with_components(["API"]);
        assert!(!log.push("Sora", entry("down")));
        assert!(!log.contains("Sora"));
        assert_eq!(log.issue_count(), 0);
    }

    #[test]
    fn test_push_appends_in_order() {
        let mut log = ComponentIssueLog::with_components(["API"]);
        assert!(log.push("API", entry("first")));
        assert!(log.push("API", entry("second")));
        let texts: Vec<_> = log.get("API").unwrap().iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[test]
    fn test_plain_line() {
        assert_eq!(entry("Outage").plain_line(), "Date: 2024-01-09, Issue: Outage");
    }
}

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::{FullUpdateInfo, Priority, UpdateSummary, VersionAnnouncement};
use crate::version::ReleaseVersion;

/// Recommended-action text for each priority.
///
/// An empty string means no action is recommended for that priority.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionWording {
    #[serde(default = "default_urgent")]
    pub urgent: String,
    #[serde(default = "default_normal")]
    pub normal: String,
    #[serde(default = "default_available")]
    pub minor: String,
    #[serde(default = "default_available")]
    pub low: String,
}

fn default_urgent() -> String {
    "update immediately".to_string()
}

fn default_normal() -> String {
    "update recommended".to_string()
}

fn default_available() -> String {
    "update available".to_string()
}

impl Default for ActionWording {
    fn default() -> Self {
        Self {
            urgent: default_urgent(),
            normal: default_normal(),
            minor: default_available(),
            low: default_available(),
        }
    }
}

impl ActionWording {
    #[must_use]
    pub fn for_priority(&self, priority: Priority) -> Option<&str> {
        let text = match priority {
            Priority::Urgent => &self.urgent,
            Priority::Normal => &self.normal,
            Priority::Minor => &self.minor,
            Priority::Low => &self.low,
        };
        let text = text.trim();
        (!text.is_empty()).then_some(text)
    }
}

// Total order over announcements so equal versions still sort the same way
// regardless of input order.
fn canonical_order(a: &VersionAnnouncement, b: &VersionAnnouncement) -> Ordering {
    a.version
        .cmp(&b.version)
        .then_with(|| a.version.is_stable().cmp(&b.version.is_stable()))
        .then_with(|| a.version.as_str().cmp(b.version.as_str()))
        .then_with(|| a.priority.cmp(&b.priority))
        .then_with(|| a.announcement.cmp(&b.announcement))
        .then_with(|| a.compatibility.cmp(&b.compatibility))
}

/// Announcements strictly newer than `current_version`, in ascending version
/// order.
#[must_use]
pub fn new_versions(
    current_version: &str,
    announcements: &[VersionAnnouncement],
) -> Vec<VersionAnnouncement> {
    let current = ReleaseVersion::new(current_version);
    let mut newer: Vec<VersionAnnouncement> = announcements
        .iter()
        .filter(|announcement| announcement.version.is_newer_than(&current))
        .cloned()
        .collect();
    newer.sort_by(canonical_order);
    newer
}

fn latest_stable(newer: &[VersionAnnouncement]) -> Option<String> {
    newer
        .iter()
        .rev()
        .find(|announcement| announcement.version.is_stable())
        .map(|announcement| announcement.version.to_string())
}

/// Reduce a set of announcements into a single summary for `current_version`.
#[must_use]
pub fn aggregate(
    current_version: &str,
    announcements: &[VersionAnnouncement],
    wording: &ActionWording,
) -> UpdateSummary {
    summarize(current_version, &new_versions(current_version, announcements), wording)
}

fn summarize(
    current_version: &str,
    newer: &[VersionAnnouncement],
    wording: &ActionWording,
) -> UpdateSummary {
    let Some(latest) = newer.last() else {
        return UpdateSummary::up_to_date(current_version);
    };

    let max_priority = newer
        .iter()
        .map(|announcement| announcement.priority)
        .max()
        .unwrap_or_default();

    UpdateSummary {
        latest_version: latest.version.to_string(),
        latest_stable_version: latest_stable(newer),
        max_priority,
        any_breaking: newer.iter().any(VersionAnnouncement::has_breaking_changes),
        recommended_action: wording.for_priority(max_priority).map(str::to_string),
        migration_guides: newer
            .iter()
            .filter_map(VersionAnnouncement::migration_guide)
            .collect(),
    }
}

/// Filtered announcement list together with the latest and latest stable
/// versions it contains.
#[must_use]
pub fn full_update_info(
    current_version: &str,
    announcements: &[VersionAnnouncement],
) -> FullUpdateInfo {
    let newer = new_versions(current_version, announcements);
    let latest_version = newer
        .last()
        .map_or_else(|| current_version.to_string(), |a| a.version.to_string());

    FullUpdateInfo {
        latest_version,
        latest_stable_version: latest_stable(&newer),
        new_versions: newer,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(version: &str, priority: Priority, breaking: bool) -> VersionAnnouncement {
        let announcement =
            VersionAnnouncement::new(version, priority, format!("Release {version}"), "notes");
        if breaking {
            announcement.breaking(None)
        } else {
            announcement
        }
    }

    fn permutations(items: &[VersionAnnouncement]) -> Vec<Vec<VersionAnnouncement>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut all = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                all.push(tail);
            }
        }
        all
    }

    #[test]
    fn empty_input_is_up_to_date() {
        let summary = aggregate("2.0.0", &[], &ActionWording::default());

        assert_eq!(summary.latest_version, "2.0.0");
        assert_eq!(summary.max_priority, Priority::Low);
        assert!(!summary.any_breaking);
        assert!(summary.recommended_action.is_none());
        assert!(summary.migration_guides.is_empty());
        assert!(summary.latest_stable_version.is_none());
    }

    #[test]
    fn only_strictly_newer_versions_count() {
        let announcements = vec![
            release("1.9.0", Priority::Urgent, true),
            release("2.0", Priority::Urgent, true),
            release("2.0.1", Priority::Minor, false),
        ];

        let summary = aggregate("2.0.0", &announcements, &ActionWording::default());

        assert_eq!(summary.latest_version, "2.0.1");
        assert_eq!(summary.max_priority, Priority::Minor);
        assert!(!summary.any_breaking);
    }

    #[test]
    fn nothing_newer_returns_current_version() {
        let announcements = vec![release("1.0.0", Priority::Urgent, true)];

        let summary = aggregate("1.0", &announcements, &ActionWording::default());

        assert_eq!(summary, UpdateSummary::up_to_date("1.0"));
    }

    #[test]
    fn urgent_breaking_release_dominates() {
        let announcements = vec![
            release("2.1.0", Priority::Normal, false),
            release("2.2.0", Priority::Urgent, true),
        ];

        let summary = aggregate("2.0.0", &announcements, &ActionWording::default());

        assert_eq!(summary.latest_version, "2.2.0");
        assert_eq!(summary.max_priority, Priority::Urgent);
        assert!(summary.any_breaking);
    }

    #[test]
    fn breaking_flag_aggregates_independently_of_priority() {
        let announcements = vec![
            release("2.1.0", Priority::Low, true),
            release("2.2.0", Priority::Urgent, false),
            release("2.3.0", Priority::Urgent, false),
        ];

        let summary = aggregate("2.0.0", &announcements, &ActionWording::default());

        assert_eq!(summary.max_priority, Priority::Urgent);
        assert!(summary.any_breaking);
    }

    #[test]
    fn recommended_action_follows_priority_ranking() {
        let wording = ActionWording::default();

        for priority in [
            Priority::Low,
            Priority::Minor,
            Priority::Normal,
            Priority::Urgent,
        ] {
            let summary = aggregate("1.0.0", &[release("1.1.0", priority, false)], &wording);
            assert_eq!(
                summary.recommended_action.as_deref(),
                wording.for_priority(priority)
            );
        }
        assert_ne!(
            wording.for_priority(Priority::Urgent),
            wording.for_priority(Priority::Low)
        );
    }

    #[test]
    fn empty_wording_suppresses_action() {
        let wording = ActionWording {
            low: "   ".to_string(),
            ..ActionWording::default()
        };

        let summary = aggregate("1.0.0", &[release("1.0.1", Priority::Low, false)], &wording);

        assert!(summary.recommended_action.is_none());
    }

    #[test]
    fn migration_guides_are_ascending() {
        let announcements = vec![
            release("3.0.0", Priority::Normal, true)
                .with_migration_guide("https://docs.example.com/3"),
            release("2.5.0", Priority::Minor, false),
            release("2.1.0", Priority::Normal, true)
                .breaking(Some("Renamed settings".to_string()))
                .with_migration_guide("https://docs.example.com/2.1"),
        ];

        let summary = aggregate("2.0.0", &announcements, &ActionWording::default());

        let versions: Vec<&str> = summary
            .migration_guides
            .iter()
            .map(|guide| guide.version.as_str())
            .collect();
        assert_eq!(versions, ["2.1.0", "3.0.0"]);
        assert_eq!(summary.migration_guides[0].notes, "Renamed settings");
        assert_eq!(summary.migration_guides[1].notes, "notes");
    }

    #[test]
    fn latest_stable_skips_prereleases() {
        let announcements = vec![
            release("2.1.0", Priority::Minor, false),
            release("2.2.0-rc1", Priority::Minor, false),
            release("2.3.0-beta", Priority::Minor, false),
        ];

        let summary = aggregate("2.0.0", &announcements, &ActionWording::default());

        assert_eq!(summary.latest_stable_version.as_deref(), Some("2.1.0"));
    }

    #[test]
    fn summary_is_independent_of_input_order() {
        let announcements = vec![
            release("2.1.0", Priority::Normal, false).with_migration_guide("https://a"),
            release("2.2.0", Priority::Urgent, true),
            release("2.2", Priority::Minor, false).with_migration_guide("https://b"),
            release("1.0.0", Priority::Urgent, true),
        ];
        let wording = ActionWording::default();
        let expected = aggregate("2.0.0", &announcements, &wording);

        for ordering in permutations(&announcements) {
            assert_eq!(aggregate("2.0.0", &ordering, &wording), expected);
        }
    }

    #[test]
    fn equal_versions_prefer_stable_spelling() {
        let rc = release("2.2.0-rc1", Priority::Minor, false);
        let stable = release("2.2.0", Priority::Minor, false);
        let wording = ActionWording::default();

        for announcements in [vec![rc.clone(), stable.clone()], vec![stable, rc]] {
            let summary = aggregate("2.0.0", &announcements, &wording);
            assert_eq!(summary.latest_version, "2.2.0");
            assert_eq!(summary.latest_stable_version.as_deref(), Some("2.2.0"));

            let info = full_update_info("2.0.0", &announcements);
            assert_eq!(info.latest_version, "2.2.0");
        }
    }

    #[test]
    fn full_info_lists_newer_versions_ascending() {
        let announcements = vec![
            release("2.2.0", Priority::Urgent, true),
            release("1.5.0", Priority::Normal, false),
            release("2.1.0", Priority::Normal, false),
        ];

        let info = full_update_info("2.0.0", &announcements);

        let versions: Vec<&str> = info
            .new_versions
            .iter()
            .map(|a| a.version.as_str())
            .collect();
        assert_eq!(versions, ["2.1.0", "2.2.0"]);
        assert_eq!(info.latest_version, "2.2.0");
        assert_eq!(info.latest_stable_version.as_deref(), Some("2.2.0"));
        assert!(info.has_update());
    }

    #[test]
    fn full_info_without_updates_keeps_current_version() {
        let info = full_update_info("3.0.0", &[release("2.0.0", Priority::Low, false)]);

        assert_eq!(info.latest_version, "3.0.0");
        assert!(!info.has_update());
    }
}

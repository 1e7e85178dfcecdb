//! Pure update-resolution logic for Stirling-PDF installations.
//!
//! Nothing in this crate performs I/O:
//! - Lenient release version comparison.
//! - Machine profile to download artifact resolution.
//! - Reduction of release announcements into an update summary.

mod aggregate;
mod artifact;
mod types;
mod version;

/// Announcement reduction and recommended-action wording.
pub use aggregate::{ActionWording, aggregate, full_update_info, new_versions};
/// Download artifact decision table.
pub use artifact::{SERVER_JAR, SERVER_JAR_WITH_LOGIN, artifact_name, resolve_download_url};
/// Announcement, profile and summary model.
pub use types::{
    AnnouncementText, ClientOs, Compatibility, FullUpdateInfo, MachineProfile, MachineType,
    MigrationGuide, Priority, UpdateSummary, VersionAnnouncement,
};
/// Lenient version parsing and comparison.
pub use version::{ReleaseVersion, compare_versions, is_newer_version, is_stable_release};

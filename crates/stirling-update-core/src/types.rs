use serde::{Deserialize, Serialize};
use std::fmt;

use crate::version::ReleaseVersion;

/// Urgency of a release announcement, ordered `Low < Minor < Normal < Urgent`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    #[default]
    Low,
    Minor,
    Normal,
    Urgent,
}

impl Priority {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Minor => "minor",
            Self::Normal => "normal",
            Self::Urgent => "urgent",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deployment shape of a client installation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineProfile {
    #[serde(alias = "machine_type")]
    pub machine_type: String,
    #[serde(default, alias = "active_security")]
    pub active_security: bool,
    #[serde(default, alias = "license_type")]
    pub license_type: String,
}

impl MachineProfile {
    #[must_use]
    pub fn new(machine_type: impl Into<String>, active_security: bool) -> Self {
        Self {
            machine_type: machine_type.into(),
            active_security,
            license_type: String::new(),
        }
    }

    #[must_use]
    pub fn with_license_type(mut self, license_type: impl Into<String>) -> Self {
        self.license_type = license_type.into();
        self
    }

    #[must_use]
    pub fn kind(&self) -> MachineType<'_> {
        MachineType::classify(&self.machine_type)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineType<'a> {
    Docker,
    Kubernetes,
    ServerJar,
    Client(ClientOs<'a>),
    Other(&'a str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOs<'a> {
    Windows,
    Mac,
    Unix,
    Other(&'a str),
}

impl<'a> MachineType<'a> {
    #[must_use]
    pub fn classify(machine_type: &'a str) -> Self {
        match machine_type {
            "Docker" => Self::Docker,
            "Kubernetes" => Self::Kubernetes,
            "Server-jar" => Self::ServerJar,
            other => match other.strip_prefix("Client-") {
                Some("win") => Self::Client(ClientOs::Windows),
                Some("mac") => Self::Client(ClientOs::Mac),
                Some("unix") => Self::Client(ClientOs::Unix),
                Some(os) => Self::Client(ClientOs::Other(os)),
                None => Self::Other(other),
            },
        }
    }

    /// Container deployments are upgraded by their orchestrator.
    #[must_use]
    pub fn is_managed(self) -> bool {
        matches!(self, Self::Docker | Self::Kubernetes)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AnnouncementText {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Compatibility {
    #[serde(default)]
    pub breaking_changes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub breaking_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub migration_guide_url: Option<String>,
}

/// A published release together with its urgency and compatibility notes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionAnnouncement {
    pub version: ReleaseVersion,
    #[serde(default)]
    pub priority: Priority,
    pub announcement: AnnouncementText,
    #[serde(default)]
    pub compatibility: Compatibility,
}

impl VersionAnnouncement {
    #[must_use]
    pub fn new(
        version: impl Into<ReleaseVersion>,
        priority: Priority,
        title: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            version: version.into(),
            priority,
            announcement: AnnouncementText {
                title: title.into(),
                message: message.into(),
            },
            compatibility: Compatibility::default(),
        }
    }

    #[must_use]
    pub fn breaking(mut self, description: Option<String>) -> Self {
        self.compatibility.breaking_changes = true;
        self.compatibility.breaking_description = description;
        self
    }

    #[must_use]
    pub fn with_migration_guide(mut self, url: impl Into<String>) -> Self {
        self.compatibility.migration_guide_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn has_breaking_changes(&self) -> bool {
        self.compatibility.breaking_changes
    }

    #[must_use]
    pub fn migration_guide(&self) -> Option<MigrationGuide> {
        let url = self.compatibility.migration_guide_url.clone()?;
        let notes = self
            .compatibility
            .breaking_description
            .clone()
            .unwrap_or_else(|| self.announcement.message.clone());
        Some(MigrationGuide {
            version: self.version.to_string(),
            notes,
            url,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationGuide {
    pub version: String,
    pub notes: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateSummary {
    pub latest_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_stable_version: Option<String>,
    pub max_priority: Priority,
    pub any_breaking: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_action: Option<String>,
    #[serde(default)]
    pub migration_guides: Vec<MigrationGuide>,
}

impl UpdateSummary {
    /// Summary for a client that is already on the newest known release.
    #[must_use]
    pub fn up_to_date(current_version: &str) -> Self {
        Self {
            latest_version: current_version.to_string(),
            latest_stable_version: None,
            max_priority: Priority::Low,
            any_breaking: false,
            recommended_action: None,
            migration_guides: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullUpdateInfo {
    pub latest_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latest_stable_version: Option<String>,
    pub new_versions: Vec<VersionAnnouncement>,
}

impl FullUpdateInfo {
    #[must_use]
    pub fn has_update(&self) -> bool {
        !self.new_versions.is_empty()
    }
}

use async_trait::async_trait;
use std::sync::Arc;
use stirling_update_core::{MachineProfile, VersionAnnouncement};

use crate::error::SourceError;

/// Context a source may forward to its transport.
#[derive(Debug, Clone, Copy)]
pub struct AnnouncementQuery<'a> {
    pub current_version: &'a str,
    pub profile: &'a MachineProfile,
}

/// Supplier of release announcements, implemented by the hosting application.
///
/// An empty list is a normal answer meaning nothing has been announced.
#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_announcements(
        &self,
        query: &AnnouncementQuery<'_>,
    ) -> Result<Vec<VersionAnnouncement>, SourceError>;
}

#[async_trait]
impl<S> AnnouncementSource for Box<S>
where
    S: AnnouncementSource + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_announcements(
        &self,
        query: &AnnouncementQuery<'_>,
    ) -> Result<Vec<VersionAnnouncement>, SourceError> {
        (**self).fetch_announcements(query).await
    }
}

#[async_trait]
impl<S> AnnouncementSource for Arc<S>
where
    S: AnnouncementSource + ?Sized,
{
    fn name(&self) -> &'static str {
        (**self).name()
    }

    async fn fetch_announcements(
        &self,
        query: &AnnouncementQuery<'_>,
    ) -> Result<Vec<VersionAnnouncement>, SourceError> {
        (**self).fetch_announcements(query).await
    }
}

/// Source backed by a fixed list, for offline use and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticAnnouncementSource {
    announcements: Vec<VersionAnnouncement>,
}

impl StaticAnnouncementSource {
    #[must_use]
    pub fn new(announcements: Vec<VersionAnnouncement>) -> Self {
        Self { announcements }
    }
}

#[async_trait]
impl AnnouncementSource for StaticAnnouncementSource {
    fn name(&self) -> &'static str {
        "static"
    }

    async fn fetch_announcements(
        &self,
        _query: &AnnouncementQuery<'_>,
    ) -> Result<Vec<VersionAnnouncement>, SourceError> {
        Ok(self.announcements.clone())
    }
}

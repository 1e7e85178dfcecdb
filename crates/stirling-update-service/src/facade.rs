use stirling_update_core::{
    FullUpdateInfo, MachineProfile, UpdateSummary, VersionAnnouncement, aggregate,
    full_update_info, resolve_download_url,
};

use crate::config::UpdateConfig;
use crate::source::{AnnouncementQuery, AnnouncementSource};

/// Entry point for update lookups.
///
/// Source failures never escape: they are logged and reported as `None`.
pub struct UpdateFacade<S> {
    config: UpdateConfig,
    source: S,
}

impl<S: AnnouncementSource> UpdateFacade<S> {
    #[must_use]
    pub fn new(config: UpdateConfig, source: S) -> Self {
        Self { config, source }
    }

    #[must_use]
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    #[must_use]
    pub fn download_url(&self, profile: &MachineProfile) -> Option<String> {
        resolve_download_url(profile, &self.config.download_base_url)
    }

    pub async fn update_summary(
        &self,
        current_version: &str,
        profile: &MachineProfile,
    ) -> Option<UpdateSummary> {
        let announcements = self.fetch(current_version, profile).await?;
        let summary = aggregate(
            current_version,
            &announcements,
            &self.config.action_wording,
        );
        log::debug!(
            "Update summary for {current_version}: latest {} ({}), breaking: {}",
            summary.latest_version,
            summary.max_priority,
            summary.any_breaking
        );
        Some(summary)
    }

    pub async fn full_update_info(
        &self,
        current_version: &str,
        profile: &MachineProfile,
    ) -> Option<FullUpdateInfo> {
        let announcements = self.fetch(current_version, profile).await?;
        let info = full_update_info(current_version, &announcements);
        log::debug!(
            "{} newer release(s) than {current_version}",
            info.new_versions.len()
        );
        Some(info)
    }

    async fn fetch(
        &self,
        current_version: &str,
        profile: &MachineProfile,
    ) -> Option<Vec<VersionAnnouncement>> {
        if !self.config.update_checks_enabled {
            log::debug!("Update checks disabled, skipping announcement fetch");
            return None;
        }

        let query = AnnouncementQuery {
            current_version,
            profile,
        };
        match self.source.fetch_announcements(&query).await {
            Ok(announcements) => {
                log::debug!(
                    "Fetched {} announcement(s) from {} source for {}",
                    announcements.len(),
                    self.source.name(),
                    profile.machine_type
                );
                Some(announcements)
            }
            Err(error) => {
                log::warn!(
                    "Failed to fetch update announcements from {} source: {error}",
                    self.source.name()
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use stirling_update_core::Priority;

    use super::*;
    use crate::error::SourceError;
    use crate::source::StaticAnnouncementSource;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AnnouncementSource for CountingSource {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn fetch_announcements(
            &self,
            _query: &AnnouncementQuery<'_>,
        ) -> Result<Vec<VersionAnnouncement>, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn disabled_checks_skip_the_source() {
        let facade = UpdateFacade::new(
            UpdateConfig::default().with_update_checks(false),
            CountingSource::default(),
        );
        let profile = MachineProfile::new("Server-jar", false);

        assert!(facade.update_summary("1.0.0", &profile).await.is_none());
        assert!(facade.full_update_info("1.0.0", &profile).await.is_none());
        assert_eq!(facade.source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn each_call_fetches_once() {
        let facade = UpdateFacade::new(UpdateConfig::default(), CountingSource::default());
        let profile = MachineProfile::new("Server-jar", false);

        let summary = facade
            .update_summary("1.0.0", &profile)
            .await
            .expect("empty fetch still yields a summary");
        assert_eq!(summary, UpdateSummary::up_to_date("1.0.0"));
        facade.full_update_info("1.0.0", &profile).await;

        assert_eq!(facade.source.calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn download_url_uses_configured_base() {
        let facade = UpdateFacade::new(
            UpdateConfig::default().with_download_base_url("https://mirror.local"),
            StaticAnnouncementSource::default(),
        );

        assert_eq!(
            facade
                .download_url(&MachineProfile::new("Client-win", false))
                .as_deref(),
            Some("https://mirror.local/win-installer.exe")
        );
        assert!(
            facade
                .download_url(&MachineProfile::new("Kubernetes", true))
                .is_none()
        );
    }

    #[tokio::test]
    async fn summary_uses_configured_wording() {
        let mut config = UpdateConfig::default();
        config.action_wording.urgent = "patch now".to_string();
        let facade = UpdateFacade::new(
            config,
            StaticAnnouncementSource::new(vec![VersionAnnouncement::new(
                "1.0.1",
                Priority::Urgent,
                "Security",
                "CVE fix",
            )]),
        );

        let summary = facade
            .update_summary("1.0.0", &MachineProfile::new("Docker", false))
            .await
            .expect("static source always yields a summary");

        assert_eq!(summary.recommended_action.as_deref(), Some("patch now"));
    }
}

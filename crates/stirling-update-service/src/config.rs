use std::time::Duration;

use stirling_update_core::ActionWording;

pub const DEFAULT_ANNOUNCEMENTS_URL: &str = "https://supabase.stirling.com/functions/v1/updates";
pub const DEFAULT_DOWNLOAD_BASE_URL: &str = "https://files.stirlingpdf.com/";
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings consulted by the update facade and the HTTP announcement source.
///
/// Built once by the host and passed by reference; nothing here is read from
/// process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateConfig {
    pub announcements_url: String,
    pub download_base_url: String,
    pub update_checks_enabled: bool,
    pub http_timeout: Duration,
    pub action_wording: ActionWording,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            announcements_url: DEFAULT_ANNOUNCEMENTS_URL.to_string(),
            download_base_url: DEFAULT_DOWNLOAD_BASE_URL.to_string(),
            update_checks_enabled: true,
            http_timeout: DEFAULT_HTTP_TIMEOUT,
            action_wording: ActionWording::default(),
        }
    }
}

impl UpdateConfig {
    #[must_use]
    pub fn with_download_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.download_base_url = normalize_base_url(base_url.into());
        self
    }

    #[must_use]
    pub fn with_update_checks(mut self, enabled: bool) -> Self {
        self.update_checks_enabled = enabled;
        self
    }
}

/// Ensure a download base URL ends with `/` so artifact names append cleanly.
#[must_use]
pub fn normalize_base_url(mut base_url: String) -> String {
    if !base_url.is_empty() && !base_url.ends_with('/') {
        base_url.push('/');
    }
    base_url
}

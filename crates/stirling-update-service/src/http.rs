use async_trait::async_trait;
use serde::Deserialize;
use stirling_update_core::VersionAnnouncement;

use crate::config::UpdateConfig;
use crate::error::SourceError;
use crate::source::{AnnouncementQuery, AnnouncementSource};

const OPERATION: &str = "fetch announcements";
const USER_AGENT: &str = concat!("stirling-update/", env!("CARGO_PKG_VERSION"));

#[derive(Deserialize)]
#[serde(untagged)]
enum AnnouncementsResponse {
    List(Vec<VersionAnnouncement>),
    Wrapped {
        new_versions: Vec<VersionAnnouncement>,
    },
}

/// Announcement source that queries the release announcement endpoint.
///
/// Issues a single GET per fetch; retries are left to the caller.
#[derive(Debug, Clone)]
pub struct HttpAnnouncementSource {
    client: reqwest::Client,
    url: String,
}

impl HttpAnnouncementSource {
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Build a source with its own client using the configured endpoint and
    /// timeout.
    ///
    /// # Errors
    /// Returns an error when the HTTP client cannot be constructed.
    pub fn from_config(config: &UpdateConfig) -> Result<Self, SourceError> {
        let client = reqwest::Client::builder()
            .timeout(config.http_timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| SourceError::unavailable(format!("failed to build HTTP client: {e}")))?;
        Ok(Self::new(client, config.announcements_url.clone()))
    }
}

#[async_trait]
impl AnnouncementSource for HttpAnnouncementSource {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_announcements(
        &self,
        query: &AnnouncementQuery<'_>,
    ) -> Result<Vec<VersionAnnouncement>, SourceError> {
        let active_security = if query.profile.active_security {
            "true"
        } else {
            "false"
        };

        let response = self
            .client
            .get(&self.url)
            .header("User-Agent", USER_AGENT)
            .query(&[
                ("current_version", query.current_version),
                ("machine_type", query.profile.machine_type.as_str()),
                ("active_security", active_security),
                ("license_type", query.profile.license_type.as_str()),
            ])
            .send()
            .await
            .map_err(|e| SourceError::network_request_from(OPERATION, e))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body_snippet = response
                .text()
                .await
                .ok()
                .map(|body| response_snippet(&body, 160))
                .unwrap_or_default();
            return Err(SourceError::HttpStatus {
                status,
                body_snippet,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| SourceError::network_request_from(OPERATION, e))?;
        parse_announcements(&body)
    }
}

fn parse_announcements(body: &str) -> Result<Vec<VersionAnnouncement>, SourceError> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: AnnouncementsResponse =
        serde_json::from_str(body).map_err(|e| SourceError::network_parse_from(OPERATION, e))?;
    Ok(match parsed {
        AnnouncementsResponse::List(announcements)
        | AnnouncementsResponse::Wrapped {
            new_versions: announcements,
        } => announcements,
    })
}

fn response_snippet(body: &str, max_chars: usize) -> String {
    let snippet: String = body.chars().take(max_chars).collect();
    if snippet.is_empty() {
        String::new()
    } else {
        format!(": {snippet}")
    }
}

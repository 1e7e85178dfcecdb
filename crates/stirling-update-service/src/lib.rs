//! Update lookups for hosting applications.
//!
//! Wraps the pure resolution logic in `stirling-update-core` behind
//! [`UpdateFacade`], which pulls announcements from an
//! [`AnnouncementSource`] supplied by the host.

mod config;
mod error;
mod facade;
mod http;
mod source;

pub use config::{
    DEFAULT_ANNOUNCEMENTS_URL, DEFAULT_DOWNLOAD_BASE_URL, DEFAULT_HTTP_TIMEOUT, UpdateConfig,
    normalize_base_url,
};
pub use error::{NetworkStage, SourceError};
pub use facade::UpdateFacade;
pub use http::HttpAnnouncementSource;
pub use source::{AnnouncementQuery, AnnouncementSource, StaticAnnouncementSource};

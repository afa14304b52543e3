//! Network side of a run
//!
//! This module holds everything that talks to the portal:
//! - Building the authenticated HTTP client
//! - Loading the saved browser session into a cookie jar
//! - A static-DOM [`Renderer`](crate::render::Renderer) and the [`Fetcher`]
//!   used for resource downloads

mod client;
mod http;
mod session;

pub use client::build_http_client;
pub use http::{HttpFetcher, HttpRenderer};
pub use session::{load_session_state, SessionCookie, SessionState};

use crate::MirrorError;
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use url::Url;

/// A fully read HTTP response
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code
    pub status: u16,
    /// Response headers (case-insensitive lookup)
    pub headers: HeaderMap,
    /// Complete body
    pub body: Vec<u8>,
}

impl FetchResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs GET requests within the authenticated session
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetches `url`, following redirects
    ///
    /// Only transport failures are errors; any status code is returned as a
    /// response.
    async fn get(&self, url: &Url) -> Result<FetchResponse, MirrorError>;
}

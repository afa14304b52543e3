use reqwest::cookie::Jar;
use reqwest::{redirect::Policy, Client};
use std::sync::Arc;
use std::time::Duration;

/// Builds the HTTP client shared by page loads and downloads
///
/// # Arguments
///
/// * `user_agent` - Value of the User-Agent header
/// * `jar` - Session cookies; every request carries them and responses may
///   update them
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use portal_mirror::transport::build_http_client;
/// use reqwest::cookie::Jar;
/// use std::sync::Arc;
///
/// let client = build_http_client("portal-mirror/0.1", Arc::new(Jar::default())).unwrap();
/// ```
pub fn build_http_client(user_agent: &str, jar: Arc<Jar>) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .cookie_provider(jar)
        .timeout(Duration::from_secs(120))
        .connect_timeout(Duration::from_secs(10))
        .redirect(Policy::limited(10))
        .gzip(true)
        .brotli(true)
        .build()
}

//! Saved browser session
//!
//! The portal sits behind an interactive login. The session is captured once
//! by a browser and saved as a storage-state JSON document; a run only
//! replays its cookies.

use crate::MirrorError;
use reqwest::cookie::Jar;
use serde::Deserialize;
use std::path::Path;
use std::sync::Arc;
use url::Url;

/// Storage-state document as written by browser automation tools
#[derive(Debug, Clone, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub cookies: Vec<SessionCookie>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCookie {
    pub name: String,
    pub value: String,
    pub domain: String,

    #[serde(default = "default_cookie_path")]
    pub path: String,

    #[serde(default)]
    pub secure: bool,

    #[serde(default)]
    pub http_only: bool,
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl SessionCookie {
    /// `Set-Cookie` form understood by [`Jar::add_cookie_str`]
    fn to_set_cookie(&self) -> String {
        let mut cookie = format!(
            "{}={}; Domain={}; Path={}",
            self.name, self.value, self.domain, self.path
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        if self.http_only {
            cookie.push_str("; HttpOnly");
        }
        cookie
    }

    /// Origin the cookie is registered for
    fn origin(&self) -> Option<Url> {
        let host = self.domain.trim_start_matches('.');
        if host.is_empty() {
            return None;
        }
        let scheme = if self.secure { "https" } else { "http" };
        Url::parse(&format!("{}://{}{}", scheme, host, self.path)).ok()
    }
}

impl SessionState {
    /// Parses a storage-state document
    pub fn parse(content: &str, path: &Path) -> Result<Self, MirrorError> {
        serde_json::from_str(content).map_err(|e| MirrorError::SessionState {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads every cookie into a fresh jar
    pub fn into_jar(self) -> Arc<Jar> {
        let jar = Jar::default();
        for cookie in &self.cookies {
            match cookie.origin() {
                Some(origin) => jar.add_cookie_str(&cookie.to_set_cookie(), &origin),
                None => tracing::warn!(
                    "Skipping session cookie '{}' with invalid domain '{}'",
                    cookie.name,
                    cookie.domain
                ),
            }
        }
        Arc::new(jar)
    }
}

/// Reads the session-state file into a cookie jar
///
/// The file is a prerequisite of every run: a missing file is reported as
/// [`MirrorError::MissingSessionState`] so the caller can abort before any
/// network activity.
///
/// # Arguments
///
/// * `path` - Path to the storage-state JSON file
///
/// # Returns
///
/// * `Ok(Arc<Jar>)` - Jar holding the saved cookies
/// * `Err(MirrorError)` - File missing, unreadable or malformed
pub fn load_session_state(path: &Path) -> Result<Arc<Jar>, MirrorError> {
    if !path.exists() {
        return Err(MirrorError::MissingSessionState {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path)?;
    let state = SessionState::parse(&content, path)?;
    tracing::info!(
        "Loaded {} session cookies from {}",
        state.cookies.len(),
        path.display()
    );

    Ok(state.into_jar())
}

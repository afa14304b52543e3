//! Plain HTTP implementations of the page and resource capabilities

use crate::render::{matches_selector, Renderer, WaitPolicy};
use crate::transport::{FetchResponse, Fetcher};
use crate::MirrorError;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// A [`Renderer`] that loads server-rendered HTML without running scripts
///
/// The DOM never changes after load, so waiting for a selector either
/// succeeds immediately or times out immediately. Both wait policies behave
/// the same: the body is read in full before `goto` returns.
#[derive(Debug, Clone)]
pub struct HttpRenderer {
    client: Client,
    current: Option<(Url, String)>,
}

impl HttpRenderer {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            current: None,
        }
    }

    /// URL of the current page after redirects
    pub fn current_url(&self) -> Option<&Url> {
        self.current.as_ref().map(|(url, _)| url)
    }

    fn current_html(&self) -> Result<&str, MirrorError> {
        self.current
            .as_ref()
            .map(|(_, html)| html.as_str())
            .ok_or_else(|| MirrorError::Render {
                url: String::new(),
                message: "no page loaded".to_string(),
            })
    }
}

#[async_trait]
impl Renderer for HttpRenderer {
    async fn goto(&mut self, url: &Url, _wait: WaitPolicy) -> Result<(), MirrorError> {
        self.current = None;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MirrorError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(MirrorError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().clone();
        let html = response.text().await.map_err(|e| MirrorError::Http {
            url: url.to_string(),
            source: e,
        })?;

        tracing::trace!("Loaded {} ({} bytes)", final_url, html.len());
        self.current = Some((final_url, html));
        Ok(())
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), MirrorError> {
        if matches_selector(self.current_html()?, selector)? {
            Ok(())
        } else {
            Err(MirrorError::SelectorTimeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    async fn content(&mut self) -> Result<String, MirrorError> {
        self.current_html().map(str::to_string)
    }
}

/// A [`Fetcher`] over the session's HTTP client
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get(&self, url: &Url) -> Result<FetchResponse, MirrorError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| MirrorError::Http {
                url: url.to_string(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        let body = response.bytes().await.map_err(|e| MirrorError::Http {
            url: url.to_string(),
            source: e,
        })?;

        Ok(FetchResponse {
            status,
            headers,
            body: body.to_vec(),
        })
    }
}

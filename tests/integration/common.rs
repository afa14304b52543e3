//! Shared fixtures for integration tests

use async_trait::async_trait;
use portal_mirror::config::{parse_config, Config};
use portal_mirror::render::{matches_selector, Renderer, WaitPolicy};
use portal_mirror::MirrorError;
use std::collections::HashMap;
use std::io::{Cursor, Write};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub const BASE: &str = "https://portal.example.com/Portal/";

/// Serves canned HTML by URL and records every navigation
#[derive(Default)]
pub struct MemoryRenderer {
    pages: HashMap<Url, String>,
    current: Option<String>,
    pub visits: Vec<Url>,
}

impl MemoryRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: Url, html: impl Into<String>) -> Self {
        self.pages.insert(url, html.into());
        self
    }

    pub fn visit_count(&self, url: &Url) -> usize {
        self.visits.iter().filter(|v| *v == url).count()
    }
}

#[async_trait]
impl Renderer for MemoryRenderer {
    async fn goto(&mut self, url: &Url, _wait: WaitPolicy) -> Result<(), MirrorError> {
        self.visits.push(url.clone());
        match self.pages.get(url) {
            Some(html) => {
                self.current = Some(html.clone());
                Ok(())
            }
            None => {
                self.current = None;
                Err(MirrorError::Render {
                    url: url.to_string(),
                    message: "navigation failed".to_string(),
                })
            }
        }
    }

    async fn wait_for_selector(
        &mut self,
        selector: &str,
        timeout: Duration,
    ) -> Result<(), MirrorError> {
        let html = self.current.as_deref().unwrap_or("");
        if matches_selector(html, selector)? {
            Ok(())
        } else {
            Err(MirrorError::SelectorTimeout {
                selector: selector.to_string(),
                timeout,
            })
        }
    }

    async fn content(&mut self) -> Result<String, MirrorError> {
        self.current.clone().ok_or_else(|| MirrorError::Render {
            url: String::new(),
            message: "no page".to_string(),
        })
    }
}

/// Article URL under `base`
pub fn article_at(base: &str, oid: u32) -> Url {
    Url::parse(&format!("{}ViewArticle.aspx?oid={}", base, oid)).unwrap()
}

pub fn article(oid: u32) -> Url {
    article_at(BASE, oid)
}

/// A page whose left menu holds `items` below the tree root `oid=1`
pub fn menu_page(items: &str, body: &str) -> String {
    format!(
        r#"<html><body>
        <div id="leftnav"><ul class="leftmenu">
          <li><a href="ViewArticle.aspx?oid=99">Elsewhere</a></li>
          <li><a href="ViewArticle.aspx?oid=1">TTP</a><ul>{}</ul></li>
        </ul></div>
        <div id="content">{}</div>
        </body></html>"#,
        items, body
    )
}

/// Configuration with zero delay rooted at `root_url`
pub fn test_config(root_url: &Url, output: &Path, session: &Path, excluded: &[&str]) -> Config {
    let excluded = excluded
        .iter()
        .map(|l| format!("\"{}\"", l))
        .collect::<Vec<_>>()
        .join(", ");

    parse_config(&format!(
        r#"
        [portal]
        root-url = "{}"
        session-state = "{}"

        [crawler]
        request-delay = 0
        menu-timeout = 50
        root-menu-timeout = 50
        excluded-labels = [{}]

        [output]
        root = "{}"
        "#,
        root_url,
        session.display(),
        excluded,
        output.display()
    ))
    .unwrap()
}

/// Zip archive holding `entries`
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Minimal storage-state document
pub fn write_session_state(path: &Path, domain: &str) {
    std::fs::write(
        path,
        format!(
            r#"{{"cookies":[{{"name":"ASP.NET_SessionId","value":"test","domain":"{}","path":"/","secure":false}}],"origins":[]}}"#,
            domain
        ),
    )
    .unwrap();
}

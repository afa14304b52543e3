use crate::config::types::{Config, CrawlerConfig, MarkupConfig, OutputConfig, PortalConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_markup_config(&config.markup)?;
    validate_portal_config(&config.portal, &config.markup)?;
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates the portal entry point
fn validate_portal_config(config: &PortalConfig, markup: &MarkupConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.root_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid root-url '{}': {}", config.root_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "root-url must use HTTP or HTTPS, got '{}'",
            url.scheme()
        )));
    }

    if !config.root_url.contains(&markup.article_marker) {
        return Err(ConfigError::Validation(format!(
            "root-url '{}' is not an article page (expected '{}')",
            config.root_url, markup.article_marker
        )));
    }

    if config.session_state.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "session-state cannot be empty".to_string(),
        ));
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    if config.menu_timeout == 0 || config.root_menu_timeout == 0 {
        return Err(ConfigError::Validation(
            "menu timeouts must be greater than zero".to_string(),
        ));
    }

    if let Some(label) = config.excluded_labels.iter().find(|l| l.trim().is_empty()) {
        return Err(ConfigError::Validation(format!(
            "excluded-labels cannot contain blank entries, got '{}'",
            label
        )));
    }

    Ok(())
}

/// Validates the markup conventions
fn validate_markup_config(config: &MarkupConfig) -> Result<(), ConfigError> {
    for (name, marker) in [
        ("article-marker", &config.article_marker),
        ("resource-marker", &config.resource_marker),
    ] {
        if marker.is_empty() {
            return Err(ConfigError::Validation(format!("{} cannot be empty", name)));
        }
        if marker.contains('"') {
            return Err(ConfigError::Validation(format!(
                "{} cannot contain quotes, got '{}'",
                name, marker
            )));
        }
    }

    validate_selector(&config.menu_selector)?;
    validate_selector(&config.resource_selector())?;

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "output root cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_selector(selector: &str) -> Result<(), ConfigError> {
    Selector::parse(selector)
        .map(|_| ())
        .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", selector, e)))
}

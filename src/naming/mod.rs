//! File name resolution for downloaded resources
//!
//! The portal reports file names inconsistently: sometimes as an RFC 5987
//! `filename*` parameter, sometimes as a plain `filename` whose Czech
//! diacritics were sent in a legacy single-byte encoding, sometimes not at
//! all. This module turns the response headers plus the link text into one
//! diacritic-preserving name and extension. Everything here is pure.

mod disposition;
mod extension;
mod score;

pub use disposition::parse_disposition_filename;
pub use extension::{extension_from_content_type, extension_from_name_suffix, split_extension};
pub use score::{accent_score, choose_best_name, nfc, ACCENTED_CHARS};

use reqwest::header::{HeaderMap, CONTENT_DISPOSITION, CONTENT_TYPE};

/// Name and extension chosen for one downloaded payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFilename {
    /// Name without the extension
    pub base_name: String,
    /// Extension including its leading dot, empty when undeterminable
    pub extension: String,
}

impl ResolvedFilename {
    /// Full file name (`base_name` followed by `extension`)
    pub fn file_name(&self) -> String {
        format!("{}{}", self.base_name, self.extension)
    }
}

/// Resolves the file name for a response
///
/// # Base name
///
/// The Content-Disposition name (see [`parse_disposition_filename`]) and the
/// suggested name compete through [`choose_best_name`]; without a disposition
/// name the suggested name is used as is.
///
/// # Extension
///
/// 1. The chosen name's own extension
/// 2. The disposition name's extension
/// 3. A `zip`/`pdf` marker in Content-Type
/// 4. A known document type at the end of the suggested name
/// 5. Otherwise empty
///
/// # Example
///
/// ```
/// use portal_mirror::naming::resolve_filename;
/// use reqwest::header::{HeaderMap, HeaderValue, CONTENT_DISPOSITION};
///
/// let mut headers = HeaderMap::new();
/// headers.insert(
///     CONTENT_DISPOSITION,
///     HeaderValue::from_static("attachment; filename*=UTF-8''n%C3%A1zev.pdf"),
/// );
/// let resolved = resolve_filename(&headers, "nazev");
/// assert_eq!(resolved.base_name, "název");
/// assert_eq!(resolved.extension, ".pdf");
/// ```
pub fn resolve_filename(headers: &HeaderMap, suggested_name: &str) -> ResolvedFilename {
    let disposition = headers
        .get(CONTENT_DISPOSITION)
        .and_then(|value| parse_disposition_filename(value.as_bytes()));

    let chosen = choose_best_name(disposition.as_deref(), suggested_name);

    let (stem, ext) = split_extension(&chosen);
    if !ext.is_empty() {
        return ResolvedFilename {
            base_name: stem.to_string(),
            extension: ext.to_string(),
        };
    }

    let extension = disposition
        .as_deref()
        .map(|name| split_extension(name).1)
        .filter(|ext| !ext.is_empty())
        .map(str::to_string)
        .or_else(|| {
            headers
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .and_then(extension_from_content_type)
                .map(str::to_string)
        })
        .or_else(|| extension_from_name_suffix(suggested_name))
        .unwrap_or_default();

    tracing::debug!(
        "Resolved '{}' with inferred extension '{}'",
        chosen,
        extension
    );

    ResolvedFilename {
        base_name: chosen,
        extension,
    }
}

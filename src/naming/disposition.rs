//! Content-Disposition filename parsing (filename* and filename)

use crate::naming::score::{accent_score, nfc};
use encoding_rs::{Encoding, ISO_8859_2, WINDOWS_1250};
use regex::Regex;
use std::sync::LazyLock;

static EXTENDED_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\*\s*=\s*([^']+)'[^']*'([^;]+)").expect("hardcoded regex pattern is valid")
});

static QUOTED_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)filename\s*=\s*"([^"]+)""#).expect("hardcoded regex pattern is valid")
});

static BARE_PARAM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)filename\s*=\s*([^;]+)").expect("hardcoded regex pattern is valid")
});

/// Extracts the file name from a raw Content-Disposition header value
///
/// Takes the header bytes as received. Supports:
/// - `filename*=charset'lang'percent-encoded` (RFC 5987), decoded with the
///   declared charset and retried as UTF-8 when that fails
/// - `filename="value"` and bare `filename=value`, re-decoded as UTF-8,
///   windows-1250 and ISO-8859-2 with the most accented candidate kept
///
/// If both forms exist, `filename*` takes precedence. The result is NFC.
pub fn parse_disposition_filename(raw: &[u8]) -> Option<String> {
    let header = latin1(raw);

    if let Some(caps) = EXTENDED_PARAM.captures(&header) {
        let charset = caps[1].trim().trim_start_matches('"');
        let value = caps[2].trim().trim_end_matches('"');
        return Some(nfc(&decode_extended(charset, value)));
    }

    let caps = QUOTED_PARAM
        .captures(&header)
        .or_else(|| BARE_PARAM.captures(&header))?;
    let value = caps[1]
        .trim()
        .trim_matches(|c| c == '\'' || c == '"');
    if value.is_empty() {
        return None;
    }

    Some(nfc(&best_redecoding(value)))
}

/// Percent-decodes `value` and decodes the bytes with `charset`
fn decode_extended(charset: &str, value: &str) -> String {
    let bytes = urlencoding::decode_binary(value.as_bytes());

    if let Some(encoding) = Encoding::for_label(charset.as_bytes()) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes);
        if !had_errors {
            return text.into_owned();
        }
    }

    tracing::debug!(
        "Could not decode filename* as '{}', falling back to UTF-8",
        charset
    );
    String::from_utf8_lossy(&bytes).into_owned()
}

/// Re-interprets a Latin-1 decoded value under Central-European encodings
///
/// Candidates are the raw value, UTF-8, windows-1250 and ISO-8859-2. The
/// first candidate with the highest accent score wins, so ties keep the raw
/// value.
fn best_redecoding(value: &str) -> String {
    let bytes: Vec<u8> = value
        .chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect();

    let mut candidates = vec![value.to_string()];
    if let Ok(text) = std::str::from_utf8(&bytes) {
        candidates.push(text.to_string());
    }
    for encoding in [WINDOWS_1250, ISO_8859_2] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(&bytes) {
            candidates.push(text.into_owned());
        }
    }

    let mut best = candidates.remove(0);
    let mut best_score = accent_score(&nfc(&best));
    for candidate in candidates {
        let score = accent_score(&nfc(&candidate));
        if score > best_score {
            best = candidate;
            best_score = score;
        }
    }
    best
}

/// Maps every byte to the code point of the same value
fn latin1(raw: &[u8]) -> String {
    raw.iter().map(|&b| char::from(b)).collect()
}

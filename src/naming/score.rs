//! Diacritics scoring used to pick between candidate names

use unicode_normalization::UnicodeNormalization;

/// Accented letters of the Czech alphabet, precomposed
pub const ACCENTED_CHARS: &str = "áčďéěíňóřšťúůýžÁČĎÉĚÍŇÓŘŠŤÚŮÝŽ";

/// Composed (NFC) form of `s`
pub fn nfc(s: &str) -> String {
    s.nfc().collect()
}

/// Number of recognized accented characters in `s`
///
/// Callers pass NFC text; decomposed sequences are not counted.
pub fn accent_score(s: &str) -> usize {
    s.chars().filter(|c| ACCENTED_CHARS.contains(*c)).count()
}

/// Picks between the disposition-derived name and the link text
///
/// More accented characters wins, then the longer name (in characters), then
/// the disposition name. Both sides are trimmed and composed first.
pub fn choose_best_name(disposition: Option<&str>, suggested: &str) -> String {
    let a = nfc(disposition.unwrap_or("").trim());
    let b = nfc(suggested.trim());

    if a.is_empty() {
        return b;
    }
    if b.is_empty() {
        return a;
    }

    let (score_a, score_b) = (accent_score(&a), accent_score(&b));
    if score_b != score_a {
        return if score_b > score_a { b } else { a };
    }

    if b.chars().count() > a.chars().count() {
        b
    } else {
        a
    }
}

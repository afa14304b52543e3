//! Path segment sanitization

/// Characters rejected by at least one common file system
const RESERVED_CHARS: &[char] = &['\\', '/', '*', '?', '"', '<', '>', '|', ':'];

/// Substitute for reserved characters
pub const SUBSTITUTE: char = '_';

/// Maps an arbitrary display string to a safe path segment
///
/// - Replaces `\ / * ? " < > | :` and control characters with `_`
/// - Collapses runs of whitespace into a single space
/// - Trims leading/trailing whitespace
/// - A result made only of dots becomes `_` so it cannot name a parent
///
/// # Examples
///
/// ```
/// use portal_mirror::mirror::sanitize;
///
/// assert_eq!(sanitize("a:b/c*d"), "a_b_c_d");
/// assert_eq!(sanitize("  TTP   trať\t301 "), "TTP trať 301");
/// ```
pub fn sanitize(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut pending_space = false;

    for c in name.chars() {
        if c.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }

        if pending_space {
            out.push(' ');
            pending_space = false;
        }

        if RESERVED_CHARS.contains(&c) || c.is_control() {
            out.push(SUBSTITUTE);
        } else {
            out.push(c);
        }
    }

    if !out.is_empty() && out.chars().all(|c| c == '.') {
        return SUBSTITUTE.to_string();
    }

    out
}

//! File extension detection and inference

/// Document extensions recognized at the end of a link text, longest first
const KNOWN_DOCUMENT_EXTENSIONS: &[&str] = &["docx", "xlsx", "pdf", "doc", "xls", "zip"];

/// Content-type markers and the extension they imply
const CONTENT_TYPE_MARKERS: &[(&str, &str)] = &[("zip", ".zip"), ("pdf", ".pdf")];

const MAX_EXTENSION_LEN: usize = 5;

/// Splits `name` into stem and extension (with its leading dot)
///
/// An extension is a final `.` segment of 1 to 5 ASCII alphanumerics. Leading
/// dots never start an extension, and a dot inside free text such as
/// `Tabulka 1.2 - úsek` does not count.
///
/// # Examples
///
/// ```
/// use portal_mirror::naming::split_extension;
///
/// assert_eq!(split_extension("název.pdf"), ("název", ".pdf"));
/// assert_eq!(split_extension("Tabulka 1.2 - úsek"), ("Tabulka 1.2 - úsek", ""));
/// assert_eq!(split_extension(".hidden"), (".hidden", ""));
/// ```
pub fn split_extension(name: &str) -> (&str, &str) {
    let Some(dot) = name.rfind('.') else {
        return (name, "");
    };

    let stem = &name[..dot];
    let ext = &name[dot + 1..];

    let valid = !ext.is_empty()
        && ext.len() <= MAX_EXTENSION_LEN
        && ext.chars().all(|c| c.is_ascii_alphanumeric())
        && stem.chars().any(|c| c != '.');

    if valid {
        (stem, &name[dot..])
    } else {
        (name, "")
    }
}

/// Extension implied by a Content-Type header value
pub fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let lowered = content_type.to_ascii_lowercase();
    CONTENT_TYPE_MARKERS
        .iter()
        .find(|(marker, _)| lowered.contains(marker))
        .map(|(_, ext)| *ext)
}

/// Extension implied by a name ending in a known document type
///
/// The type has to be separated from the preceding text, as in
/// `Tabulka pdf` or `grafikon_PDF`.
pub fn extension_from_name_suffix(name: &str) -> Option<String> {
    let lowered = name.trim().to_lowercase();

    KNOWN_DOCUMENT_EXTENSIONS.iter().find_map(|ext| {
        let head = lowered.strip_suffix(ext)?;
        let separated = head
            .chars()
            .last()
            .map(|c| !c.is_alphanumeric())
            .unwrap_or(true);
        separated.then(|| format!(".{}", ext))
    })
}

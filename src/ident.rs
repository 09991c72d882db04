//! Identifier sanitizing
//!
//! Turns arbitrary file and directory names into PascalCase identifiers that are
//! valid in the generated source. Used for container names and accessor names.

/// Sanitize a raw file or directory name into an identifier.
///
/// Non-alphanumeric ASCII characters act as word separators; each word is emitted with
/// its first character uppercased and the rest lowercased. Names whose first word
/// starts with a digit are prefixed with `_`. A name with no alphanumeric characters
/// yields an empty string.
pub fn sanitize(raw: &str) -> String {
    let words: Vec<&str> = raw
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();

    let mut out = String::with_capacity(raw.len() + 1);

    if let Some(first) = words.first() {
        if first.starts_with(|c: char| c.is_ascii_digit()) {
            out.push('_');
        }
    }

    for word in &words {
        let mut chars = word.chars();
        if let Some(head) = chars.next() {
            out.push(head.to_ascii_uppercase());
            out.push_str(&chars.as_str().to_ascii_lowercase());
        }
    }

    out
}

//! Deterministic slug derivation for poll titles.

/// Derive a URL-safe slug from a title.
///
/// Lowercases ASCII, keeps alphanumerics, and joins every other run of
/// characters with a single hyphen. `"Cats vs Dogs!"` becomes
/// `"cats-vs-dogs"`. Deterministic: the same title always yields the same
/// slug.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_hyphen = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    slug
}

//! Text transformation helpers
//!
//! Slug derivation, excerpt trimming and markup stripping for member
//! records. These are the only derivations the member lifecycle performs,
//! so they live here rather than in the repository.

/// Maximum excerpt source length before trimming kicks in
pub const EXCERPT_LEN: usize = 320;

/// Ellipsis marker appended to trimmed excerpts
pub const EXCERPT_APPENDIX: &str = " ...";

/// Length of the body prefix the description is derived from
pub const DESC_LEN: usize = 160;

/// Derive a URL-safe slug from a display name.
///
/// Lowercases, keeps alphanumerics, maps whitespace runs to a single
/// hyphen and drops everything else. "Acme Corp!" becomes "acme-corp".
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;
    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            for lc in c.to_lowercase() {
                slug.push(lc);
            }
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_hyphen = true;
        }
        // Other punctuation is dropped without acting as a separator
    }
    slug
}

/// Trim `text` to at most `length` characters, breaking on the last
/// occurrence of `delim` within the window, then append `appendix`.
///
/// Text at or under the limit is returned unchanged, without an appendix.
pub fn smart_trim(text: &str, length: usize, delim: &str, appendix: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= length {
        return text.to_string();
    }

    let end = (length + delim.chars().count()).min(chars.len());
    let window: String = chars[..end].iter().collect();
    let trimmed = match window.rfind(delim) {
        Some(idx) => &window[..idx],
        None => window.as_str(),
    };
    if trimmed.is_empty() {
        return String::new();
    }
    format!("{trimmed}{appendix}")
}

/// Derive the member excerpt from its body text.
pub fn excerpt_of(body: &str) -> String {
    smart_trim(body, EXCERPT_LEN, " ", EXCERPT_APPENDIX)
}

/// Derive the short description from a body: markup tags stripped from the
/// first [`DESC_LEN`] characters.
pub fn desc_of(body: &str) -> String {
    let prefix: String = body.chars().take(DESC_LEN).collect();
    strip_markup(&prefix)
}

/// Remove `<...>` markup tags, keeping the text content.
///
/// An unterminated tag at the end of the input is dropped entirely.
pub fn strip_markup(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

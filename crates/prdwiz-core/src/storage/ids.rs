//! Document id generation.

use jiff::Timestamp;

/// Lowercase the name and collapse each whitespace run into one `-`.
///
/// Characters that cannot appear in a blob key are mapped to `-` as well.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut in_whitespace = false;

    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
            continue;
        }
        in_whitespace = false;

        match ch {
            '/' | '\\' | '\0' => slug.push('-'),
            other => slug.extend(other.to_lowercase()),
        }
    }

    slug
}

/// `{unix-millis}-{slug}` for a document created at `created_at`.
pub fn document_id(created_at: Timestamp, project_name: &str) -> String {
    format!("{}-{}", created_at.as_millisecond(), slugify(project_name))
}

/// The `n`th candidate id when `base` is already taken.
pub(crate) fn with_suffix(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

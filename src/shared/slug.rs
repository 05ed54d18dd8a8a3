//! Storage object naming for uploaded images.

use deunicode::deunicode;

/// ASCII-folds and lowercases `input`, collapsing runs of non-alphanumerics
/// into single underscores.
pub fn slugify(input: &str) -> String {
    let folded = deunicode(input).to_ascii_lowercase();
    let mut slug = String::with_capacity(folded.len());
    let mut last_was_separator = true;
    for ch in folded.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch);
            last_was_separator = false;
        } else if !last_was_separator {
            slug.push('_');
            last_was_separator = true;
        }
    }
    if slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Builds the storage file name for an upload: `{name}_{secondary}.{ext}`
/// when both labels survive slugification, otherwise `{kind}_{timestamp}.{ext}`.
pub fn storage_file_name(kind: &str, original_file_name: &str, name: &str, secondary: &str) -> String {
    let extension = original_file_name
        .rsplit('.')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase();

    let name_slug = slugify(name);
    let secondary_slug = slugify(secondary);

    if !name_slug.is_empty() && !secondary_slug.is_empty() {
        format!("{name_slug}_{secondary_slug}.{extension}")
    } else {
        let timestamp = chrono::Utc::now().timestamp_millis();
        format!("{kind}_{timestamp}.{extension}")
    }
}

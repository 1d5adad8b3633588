//! Filesystem-safe slugs.

/// Replaces every run of characters outside `[A-Za-z0-9]` with a single `-`
/// and trims hyphens from both ends.
///
/// The output is always ASCII, so it can be sliced at any byte index.
pub fn slugify(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_hyphen = false;

    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            prev_hyphen = false;
        } else if !prev_hyphen {
            out.push('-');
            prev_hyphen = true;
        }
    }

    out.trim_matches('-').to_string()
}

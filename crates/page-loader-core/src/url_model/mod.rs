//! URL modeling and file name derivation.
//!
//! Turns page and resource URLs into deterministic, filesystem-safe names:
//! host and path are slugified, the query string is ignored, the extension is
//! kept (or forced), and the total length is bounded.

mod path;
mod slug;

use path::NameParts;

pub use slug::slugify;

/// Upper bound for any generated file or directory name, in bytes.
pub const MAX_FILE_NAME_LENGTH: usize = 128;

/// Extension used when the URL has none (and for pages).
pub const DEFAULT_EXTENSION: &str = "html";

/// Suffix of the directory that holds a page's resources.
pub const RESOURCE_DIR_SUFFIX: &str = "_files";

/// Stem used when neither host nor path yields anything usable.
const FALLBACK_STEM: &str = "index";

/// Derives a file name from `url`.
///
/// With `forced_extension`, the URL's own extension is dropped and replaced
/// (pages are always saved as `html`). Without it the URL's extension is kept,
/// defaulting to `html` when the URL has none. Never fails.
///
/// # Examples
///
/// - `to_file_name("http://test.com/style.css", None)` → `"test-com-style.css"`
/// - `to_file_name("http://test.com/test.php", Some("html"))` → `"test-com-test.html"`
/// - `to_file_name("/local_path/images/image.png", None)` → `"local-path-images-image.png"`
pub fn to_file_name(url: &str, forced_extension: Option<&str>) -> String {
    let parts = NameParts::from_url(url);
    let extension = match forced_extension {
        Some(ext) => slugify(ext),
        None => parts.extension.as_deref().map(slugify).unwrap_or_default(),
    };
    let extension = if extension.is_empty() {
        DEFAULT_EXTENSION.to_string()
    } else {
        extension
    };
    bounded(&stem_of(&parts), &format!(".{}", extension))
}

/// Derives the resource directory name for a page URL (`<slug>_files`).
pub fn to_dir_name(url: &str) -> String {
    bounded(&stem_of(&NameParts::from_url(url)), RESOURCE_DIR_SUFFIX)
}

/// Splices `_v<version>` between stem and extension: `image.png` → `image_v2.png`.
/// Stays within `MAX_FILE_NAME_LENGTH` by shortening the stem.
pub fn versioned_name(name: &str, version: u32) -> String {
    let (stem, extension) = match name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, format!(".{}", ext)),
        _ => (name, String::new()),
    };
    bounded(stem, &format!("_v{}{}", version, extension))
}

fn stem_of(parts: &NameParts) -> String {
    let stem = slugify(&parts.joined());
    if stem.is_empty() {
        FALLBACK_STEM.to_string()
    } else {
        stem
    }
}

/// Joins `stem` and `suffix`, truncating the stem so the whole fits in
/// `MAX_FILE_NAME_LENGTH`. The suffix is only cut when it alone would not fit
/// next to a one-byte stem.
fn bounded(stem: &str, suffix: &str) -> String {
    let suffix = truncate_ascii(suffix, MAX_FILE_NAME_LENGTH - 1);
    let room = MAX_FILE_NAME_LENGTH - suffix.len();
    let mut stem = truncate_ascii(stem, room).trim_end_matches('-');
    if stem.is_empty() {
        stem = truncate_ascii(FALLBACK_STEM, room);
    }
    format!("{}{}", stem, suffix)
}

fn truncate_ascii(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut take = max;
    while take > 0 && !s.is_char_boundary(take) {
        take -= 1;
    }
    &s[..take]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_name_keeps_resource_extension() {
        assert_eq!(to_file_name("http://test.com/style.css", None), "test-com-style.css");
    }

    #[test]
    fn file_name_forced_extension_replaces_own() {
        assert_eq!(
            to_file_name("http://test.com/test.php", Some("html")),
            "test-com-test.html"
        );
        assert_eq!(
            to_file_name("http://test.com/test.html", Some("html")),
            "test-com-test.html"
        );
    }

    #[test]
    fn file_name_without_extension_defaults_to_html() {
        assert_eq!(to_file_name("http://test.com/test", None), "test-com-test.html");
        assert_eq!(to_file_name("http://test.com/", None), "test-com.html");
        assert_eq!(to_file_name("http://test.com", Some("html")), "test-com.html");
    }

    #[test]
    fn file_name_ignores_query_and_fragment() {
        assert_eq!(
            to_file_name("http://test.com/test.html?foo=bar&baz=test", Some("html")),
            "test-com-test.html"
        );
        assert_eq!(
            to_file_name("/abs/image2.png?v=123", None),
            to_file_name("/abs/image2.png", None)
        );
    }

    #[test]
    fn relative_resource_has_no_host_in_name() {
        assert_eq!(
            to_file_name("/local_path/images/image.png", None),
            "local-path-images-image.png"
        );
        assert_eq!(to_file_name("/f/img1.jpg", None), "f-img1.jpg");
    }

    #[test]
    fn dir_name_uses_html_stem() {
        assert_eq!(to_dir_name("http://test.com/test.php"), "test-com-test_files");
        assert_eq!(to_dir_name("http://test.com/test.html"), "test-com-test_files");
        assert_eq!(to_dir_name("http://test.com/"), "test-com_files");
    }

    #[test]
    fn empty_path_falls_back() {
        assert_eq!(to_file_name("?only=query", None), "index.html");
        assert_eq!(to_file_name("", Some("html")), "index.html");
    }

    #[test]
    fn deterministic() {
        let url = "https://Example.com/a/b/c.min.js?x=1";
        assert_eq!(to_file_name(url, None), to_file_name(url, None));
        assert_eq!(to_dir_name(url), to_dir_name(url));
    }

    #[test]
    fn long_names_truncate_stem_and_keep_extension() {
        let long = format!("http://test.com/{}image.png", "segment/".repeat(40));
        let name = to_file_name(&long, None);
        assert!(name.len() <= MAX_FILE_NAME_LENGTH);
        assert!(name.ends_with(".png"), "{}", name);
        assert!(name.starts_with("test-com-segment-"));
        assert!(!name.contains("-.png"));

        let dir = to_dir_name(&long);
        assert!(dir.len() <= MAX_FILE_NAME_LENGTH);
        assert!(dir.ends_with("_files"));
    }

    #[test]
    fn length_bound_holds_for_assorted_urls() {
        let urls = [
            "http://test.com/".to_string(),
            format!("http://{}.com/x", "h".repeat(300)),
            format!("/{}", "a-".repeat(200)),
            format!("/file.{}", "e".repeat(300)),
            format!("http://test.com/{}?{}", "p".repeat(127), "q".repeat(50)),
        ];
        for url in &urls {
            let name = to_file_name(url, None);
            assert!(name.len() <= MAX_FILE_NAME_LENGTH, "{} -> {}", url, name);
            let (stem, ext) = name.rsplit_once('.').unwrap();
            assert!(!stem.is_empty());
            assert!(!ext.is_empty());
        }
    }

    #[test]
    fn versioned_name_splices_before_extension() {
        assert_eq!(versioned_name("image.png", 2), "image_v2.png");
        assert_eq!(versioned_name("f-img1.jpg", 3), "f-img1_v3.jpg");
        assert_eq!(versioned_name("noext", 2), "noext_v2");
    }

    #[test]
    fn versioned_name_respects_length_bound() {
        let name = format!("{}.css", "s".repeat(MAX_FILE_NAME_LENGTH - 4));
        assert_eq!(name.len(), MAX_FILE_NAME_LENGTH);
        let v = versioned_name(&name, 12);
        assert_eq!(v.len(), MAX_FILE_NAME_LENGTH);
        assert!(v.ends_with("_v12.css"));
    }
}

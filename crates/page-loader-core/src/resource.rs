//! Resource kinds and same-origin classification.

use url::Url;

/// The tags whose referenced files are saved next to the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ResourceKind {
    /// `<img src>`
    Image,
    /// `<link href>`
    Stylesheet,
    /// `<script src>`
    Script,
}

impl ResourceKind {
    /// All kinds, in the order they are resolved and downloaded.
    pub const ALL: [ResourceKind; 3] = [
        ResourceKind::Image,
        ResourceKind::Stylesheet,
        ResourceKind::Script,
    ];

    /// HTML tag name.
    pub const fn tag(self) -> &'static str {
        match self {
            ResourceKind::Image => "img",
            ResourceKind::Stylesheet => "link",
            ResourceKind::Script => "script",
        }
    }

    /// Attribute that carries the resource URL.
    pub const fn attribute(self) -> &'static str {
        match self {
            ResourceKind::Image | ResourceKind::Script => "src",
            ResourceKind::Stylesheet => "href",
        }
    }

    /// CSS selector matching tags of this kind that carry the attribute.
    pub fn selector(self) -> String {
        format!("{}[{}]", self.tag(), self.attribute())
    }
}

/// Returns true if `raw` refers to the same site as `page_url`.
///
/// References without a host (`/a.png`, `img/a.png`, `./a.png`) are local.
/// Absolute and scheme-relative references are local only when their host
/// equals the page host; scheme and port are not compared. Hostless absolute
/// URLs such as `data:` or `mailto:` cannot be fetched and are never local.
pub fn is_local(page_url: &Url, raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    let parsed = match raw.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("http://{}", rest)),
        None => Url::parse(raw),
    };
    match parsed {
        Ok(resource) => match (resource.host_str(), page_url.host_str()) {
            (Some(host), Some(page_host)) => host == page_host,
            _ => false,
        },
        Err(url::ParseError::RelativeUrlWithoutBase) => true,
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> Url {
        Url::parse("http://test.com/test.html").unwrap()
    }

    #[test]
    fn kind_attributes() {
        assert_eq!(ResourceKind::Image.attribute(), "src");
        assert_eq!(ResourceKind::Stylesheet.attribute(), "href");
        assert_eq!(ResourceKind::Script.attribute(), "src");
        assert_eq!(ResourceKind::Stylesheet.selector(), "link[href]");
    }

    #[test]
    fn relative_references_are_local() {
        assert!(is_local(&page(), "/local_path/images/image.png"));
        assert!(is_local(&page(), "images/image.png"));
        assert!(is_local(&page(), "./style.css"));
        assert!(is_local(&page(), "../up.js"));
    }

    #[test]
    fn same_host_is_local() {
        assert!(is_local(&page(), "http://test.com/img.png"));
        assert!(is_local(&page(), "https://test.com/img.png"));
        assert!(is_local(&page(), "http://TEST.com/img.png"));
        assert!(is_local(&page(), "//test.com/app.js"));
    }

    #[test]
    fn other_hosts_are_foreign() {
        assert!(!is_local(&page(), "http://cdn.test.com/img.png"));
        assert!(!is_local(&page(), "https://site.com/img.png"));
        assert!(!is_local(&page(), "//cdn.test.com/app.js"));
    }

    #[test]
    fn hostless_schemes_and_empty_are_not_local() {
        assert!(!is_local(&page(), "data:image/png;base64,AAAA"));
        assert!(!is_local(&page(), "mailto:me@test.com"));
        assert!(!is_local(&page(), ""));
        assert!(!is_local(&page(), "   "));
    }
}

//! Splitting a URL into the pieces that participate in naming.

use url::Url;

/// The parts of a URL used to build a file name.
///
/// Query strings and fragments are never part of a name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NameParts {
    /// `host[:port]`, present only for URLs that carry a host.
    pub origin: Option<String>,
    /// Path without its extension.
    pub path: String,
    /// Extension of the last path segment, without the dot.
    pub extension: Option<String>,
}

impl NameParts {
    pub(crate) fn from_url(raw: &str) -> Self {
        let raw = raw.trim();
        let (origin, path) = match parse_with_host(raw) {
            Some(parsed) => (origin_of(&parsed), parsed.path().to_string()),
            None => (None, strip_query_and_fragment(raw).to_string()),
        };
        let (path, extension) = split_extension(&path);
        NameParts {
            origin,
            path: path.to_string(),
            extension: extension.map(str::to_string),
        }
    }

    /// Origin and path joined, leading/trailing slashes removed.
    pub(crate) fn joined(&self) -> String {
        let joined = match &self.origin {
            Some(origin) => format!("{}{}", origin, self.path),
            None => self.path.clone(),
        };
        joined.trim_matches('/').to_string()
    }
}

/// Parses absolute and scheme-relative (`//host/x`) URLs.
/// Returns `None` for anything relative to a document.
fn parse_with_host(raw: &str) -> Option<Url> {
    if let Some(rest) = raw.strip_prefix("//") {
        return Url::parse(&format!("http://{}", rest)).ok();
    }
    Url::parse(raw).ok()
}

fn origin_of(url: &Url) -> Option<String> {
    let host = url.host_str()?;
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    })
}

fn strip_query_and_fragment(raw: &str) -> &str {
    match raw.find(['?', '#']) {
        Some(idx) => &raw[..idx],
        None => raw,
    }
}

/// Splits `.ext` off the last path segment. A leading dot (`.hidden`) and a
/// trailing dot (`file.`) do not count as an extension.
fn split_extension(path: &str) -> (&str, Option<&str>) {
    let segment_start = path.rfind('/').map(|i| i + 1).unwrap_or(0);
    let segment = &path[segment_start..];
    match segment.rfind('.') {
        Some(dot) if dot > 0 && dot + 1 < segment.len() => {
            let split_at = segment_start + dot;
            (&path[..split_at], Some(&path[split_at + 1..]))
        }
        Some(dot) if dot > 0 => (&path[..segment_start + dot], None),
        _ => (path, None),
    }
}

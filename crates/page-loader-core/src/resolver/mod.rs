//! Resource resolution: raw tag values → local paths.
//!
//! Filters the references found in a page down to local ones, deduplicates
//! them per tag kind, names each one with the URL namer and disambiguates
//! name collisions. The resulting [`RewriteMap`] drives both the document
//! rewrite and the download loop, so the two always agree.

mod versions;

use std::collections::{BTreeMap, HashMap};

use html_escape::decode_html_entities;
use url::Url;

use crate::resource::{is_local, ResourceKind};
use crate::url_model::{to_dir_name, to_file_name};

use versions::NameVersions;

/// Raw attribute values per tag kind, in document order.
pub type ResourceUrls = BTreeMap<ResourceKind, Vec<String>>;

/// One local resource: where it lives remotely and where it goes on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedResource {
    pub kind: ResourceKind,
    /// Attribute value exactly as found in the document.
    pub raw_url: String,
    /// Absolute URL to download (raw value joined onto the page URL).
    pub url: Url,
    /// Path relative to the output directory, `/`-separated:
    /// `<page slug>_files/<name>`. Also the new attribute value.
    pub path: String,
}

/// Mapping from (kind, raw URL) to resolved resource.
///
/// Iterates kinds in declaration order and, within a kind, raw URLs in the
/// order they first appeared. Paths are unique across the whole map. Raw
/// spellings of the same target (`/a?x=1&amp;y=2` and `/a?x=1&y=2`) share one
/// entry.
#[derive(Debug, Clone, Default)]
pub struct RewriteMap {
    entries: Vec<ResolvedResource>,
    index: HashMap<(ResourceKind, String), usize>,
}

impl RewriteMap {
    pub fn get(&self, kind: ResourceKind, raw_url: &str) -> Option<&ResolvedResource> {
        self.index
            .get(&(kind, raw_url.to_string()))
            .map(|&i| &self.entries[i])
    }

    /// New attribute value for `raw_url` in a tag of `kind`, if it was resolved.
    pub fn path_for(&self, kind: ResourceKind, raw_url: &str) -> Option<&str> {
        self.get(kind, raw_url).map(|r| r.path.as_str())
    }

    pub fn contains(&self, kind: ResourceKind, raw_url: &str) -> bool {
        self.index.contains_key(&(kind, raw_url.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ResolvedResource> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, resource: ResolvedResource) -> usize {
        let key = (resource.kind, resource.raw_url.clone());
        let slot = self.entries.len();
        self.index.insert(key, slot);
        self.entries.push(resource);
        slot
    }

    /// Maps another spelling of an already resolved reference to the same entry.
    fn alias(&mut self, kind: ResourceKind, raw_url: &str, slot: usize) {
        self.index.insert((kind, raw_url.to_string()), slot);
    }
}

/// Resolves the raw references of a page into a [`RewriteMap`].
///
/// For each kind, in first-seen order: empty values are skipped; character
/// references (`&amp;`, `&#38;`) are decoded and surrounding whitespace is
/// trimmed, and values that decode to an already resolved target share its
/// entry; foreign references are left out. The file name comes from the
/// decoded value (absolute values keep their host, relative ones do not; the
/// query string is ignored); names that collide with an earlier, different
/// URL get a `_v<n>` suffix. The version table is shared by all kinds since
/// they land in the same directory. Map keys stay exactly as written in the
/// document so the rewrite pass finds them.
pub fn resolve(page_url: &Url, resources: &ResourceUrls) -> RewriteMap {
    let directory = to_dir_name(page_url.as_str());
    let mut versions = NameVersions::default();
    let mut map = RewriteMap::default();
    let mut targets: HashMap<(ResourceKind, String), usize> = HashMap::new();

    for (&kind, raw_urls) in resources {
        for raw_url in raw_urls {
            if map.contains(kind, raw_url) {
                continue;
            }
            let target = decode_html_entities(raw_url.trim()).trim().to_string();
            if target.is_empty() {
                continue;
            }
            if let Some(&slot) = targets.get(&(kind, target.clone())) {
                map.alias(kind, raw_url, slot);
                continue;
            }
            if !is_local(page_url, &target) {
                tracing::debug!(kind = kind.tag(), url = %raw_url, "skipping foreign resource");
                continue;
            }
            let url = match page_url.join(&target) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!(url = %raw_url, error = %e, "skipping unresolvable resource");
                    continue;
                }
            };
            let name = versions.claim(&to_file_name(&target, None));
            let path = format!("{}/{}", directory, name);
            tracing::debug!(kind = kind.tag(), url = %raw_url, path = %path, "resolved resource");
            let slot = map.insert(ResolvedResource {
                kind,
                raw_url: raw_url.clone(),
                url,
                path,
            });
            targets.insert((kind, target), slot);
        }
    }

    map
}

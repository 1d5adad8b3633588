//! Collision versioning for resource file names within one run.

use std::collections::{HashMap, HashSet};

use crate::url_model::versioned_name;

/// Hands out unique file names inside one resource directory.
///
/// The first claim of a name returns it unchanged; each later claim of the
/// same base name returns `_v2`, `_v3`, ... spliced before the extension.
/// A candidate already handed out (e.g. a URL literally named `image_v2.png`)
/// is skipped, so every returned name is unique.
#[derive(Debug, Default)]
pub(crate) struct NameVersions {
    counters: HashMap<String, u32>,
    taken: HashSet<String>,
}

impl NameVersions {
    pub(crate) fn claim(&mut self, name: &str) -> String {
        let counter = self.counters.entry(name.to_string()).or_insert(0);
        *counter += 1;
        if *counter == 1 && self.taken.insert(name.to_string()) {
            return name.to_string();
        }
        loop {
            let version = (*counter).max(2);
            *counter = version;
            let candidate = versioned_name(name, version);
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
            *counter += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_claim_is_unchanged_then_versions() {
        let mut v = NameVersions::default();
        assert_eq!(v.claim("image.png"), "image.png");
        assert_eq!(v.claim("image.png"), "image_v2.png");
        assert_eq!(v.claim("image.png"), "image_v3.png");
        assert_eq!(v.claim("style.css"), "style.css");
    }

    #[test]
    fn skips_names_taken_literally() {
        let mut v = NameVersions::default();
        assert_eq!(v.claim("image_v2.png"), "image_v2.png");
        assert_eq!(v.claim("image.png"), "image.png");
        assert_eq!(v.claim("image.png"), "image_v3.png");
    }

    #[test]
    fn base_name_taken_by_earlier_version() {
        let mut v = NameVersions::default();
        assert_eq!(v.claim("a.js"), "a.js");
        assert_eq!(v.claim("a.js"), "a_v2.js");
        assert_eq!(v.claim("a_v2.js"), "a_v2_v2.js");
    }
}

//! Resource discovery and attribute rewriting built on `lol_html`.
//!
//! Both passes stream the document once and never rebuild it: markup that is
//! not a rewritten attribute comes out byte-for-byte as it went in.

use std::cell::RefCell;
use std::error::Error;
use std::fmt;

use lol_html::{element, HtmlRewriter, Settings};

use crate::resolver::{ResourceUrls, RewriteMap};
use crate::resource::ResourceKind;

/// Collects the URL attribute of every `img`, `link` and `script` tag, per
/// kind, in document order. Tags without the attribute are ignored.
pub fn extract(document: &[u8]) -> Result<ResourceUrls, HtmlError> {
    let found: RefCell<ResourceUrls> = RefCell::new(
        ResourceKind::ALL
            .iter()
            .map(|&kind| (kind, Vec::new()))
            .collect(),
    );

    {
        let handlers: Vec<_> = ResourceKind::ALL
            .iter()
            .map(|&kind| {
                let found = &found;
                element!(kind.selector(), move |el| {
                    if let Some(value) = el.get_attribute(kind.attribute()) {
                        found.borrow_mut().entry(kind).or_default().push(value);
                    }
                    Ok(())
                })
            })
            .collect();

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: handlers,
                strict: false,
                ..Settings::default()
            },
            |_: &[u8]| {},
        );
        rewriter.write(document).map_err(HtmlError::Rewrite)?;
        rewriter.end().map_err(HtmlError::Rewrite)?;
    }

    Ok(found.into_inner())
}

/// Replaces the URL attribute of every tag whose value is in `map` for that
/// tag's kind. All occurrences are rewritten; unmapped values are untouched.
pub fn rewrite(document: &[u8], map: &RewriteMap) -> Result<Vec<u8>, HtmlError> {
    let mut output = Vec::with_capacity(document.len());

    {
        let handlers: Vec<_> = ResourceKind::ALL
            .iter()
            .map(|&kind| {
                element!(kind.selector(), move |el| {
                    let attribute = kind.attribute();
                    if let Some(value) = el.get_attribute(attribute) {
                        if let Some(path) = map.path_for(kind, &value) {
                            el.set_attribute(attribute, path)?;
                        }
                    }
                    Ok(())
                })
            })
            .collect();

        let mut rewriter = HtmlRewriter::new(
            Settings {
                element_content_handlers: handlers,
                strict: false,
                ..Settings::default()
            },
            |chunk: &[u8]| output.extend_from_slice(chunk),
        );
        rewriter.write(document).map_err(HtmlError::Rewrite)?;
        rewriter.end().map_err(HtmlError::Rewrite)?;
    }

    Ok(output)
}

/// Errors surfaced while streaming HTML.
#[derive(Debug)]
pub enum HtmlError {
    /// The HTML rewriter gave up on the markup.
    Rewrite(lol_html::errors::RewritingError),
}

impl fmt::Display for HtmlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rewrite(err) => write!(f, "html rewrite error: {err}"),
        }
    }
}

impl Error for HtmlError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Rewrite(err) => Some(err),
        }
    }
}

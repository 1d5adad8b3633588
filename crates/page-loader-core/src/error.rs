//! Error taxonomy for one page load.
//!
//! Collaborator failures (curl, lol_html, the filesystem) are translated into
//! these kinds at the loader boundary. Naming and resolution never fail.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::html::HtmlError;
use crate::retry::{classify, ErrorKind, FetchError};
use crate::storage::DirectoryError;

/// Fatal error for a whole page load. Nothing past the failing step ran.
#[derive(Debug, Error)]
pub enum LoadPageError {
    /// The page URL is unparsable or lacks a scheme or host.
    #[error("invalid page URL `{url}`: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// The output directory failed the pre-flight check.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The page itself could not be fetched (after retries, where allowed).
    #[error("failed to load `{url}`: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    /// The page could not be parsed or rewritten.
    #[error(transparent)]
    Html(#[from] HtmlError),

    /// The rewritten page could not be written.
    #[error("failed to save `{}`: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadPageError {
    /// Retry classification of the underlying fetch failure, if any.
    pub fn fetch_kind(&self) -> Option<ErrorKind> {
        match self {
            LoadPageError::Fetch { source, .. } => Some(classify(source)),
            _ => None,
        }
    }
}

/// Non-fatal error for a single resource; the load continues without it.
#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("failed to load resource `{url}`: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },

    #[error("failed to save resource `{}`: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

//! Save a web page for offline viewing.
//!
//! [`download`] fetches one page, copies the images, stylesheets and scripts it
//! references on its own host into a `<slug>_files/` directory, and rewrites
//! the page so those references point at the local copies.

pub mod config;
pub mod error;
pub mod fetch;
pub mod html;
pub mod loader;
pub mod logging;
pub mod resolver;
pub mod resource;
pub mod retry;
pub mod storage;
pub mod url_model;

pub use error::{LoadPageError, ResourceError};
pub use fetch::{CurlFetcher, Fetch, FetchOptions};
pub use loader::{download, LoadedPage, LoaderOptions, PageLoader, ResourceProgress, ResourceReport};
pub use resource::ResourceKind;

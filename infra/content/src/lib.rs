//! # Content Store
//!
//! Loads the site's content document once and shares it with every consumer.
//!
//! ## Overview
//!
//! * [`ContentStore`] caches one [`ContentDocument`] per store. Concurrent first
//!   calls share a single in-flight fetch; a failure leaves the cache empty so
//!   the next call fetches again.
//! * [`ContentStore::subscribe`] is the observer contract: exactly one of
//!   `on_resolve` / `on_error` fires unless the returned [`Subscription`] is
//!   cancelled first.
//! * [`ContentConsumer`] wraps a subscription into the `loading` / `content` /
//!   `error` view a rendering component reads.
//! * [`ContentSource`] is the seam the store fetches through:
//!   [`HttpContentSource`] for the published document, [`FileContentSource`]
//!   for local previews.
//!
//! The store is an explicit value: construct it once at startup and hand out
//! clones. Tests build isolated stores over their own sources.
//!
//! # Example
//!
//! ```rust,no_run
//! use nf_content::{ContentConsumer, ContentLoadError, ContentStore, HttpContentSource};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), ContentLoadError> {
//!     let source = HttpContentSource::new("https://neemafoundation.org/content/nf-content.json")?;
//!     let store = ContentStore::new(source);
//!
//!     let mut consumer = ContentConsumer::mount(&store);
//!     assert!(consumer.is_loading());
//!
//!     let state = consumer.settled().await;
//!     let brand = state.content().map(|doc| doc.brand_name().to_owned());
//!     println!("{}", brand.unwrap_or_default());
//!     Ok(())
//! }
//! ```

mod consumer;
mod error;
mod source;
mod store;

pub use consumer::{ConsumerState, ContentConsumer, Subscription};
pub use error::{ContentLoadError, ContentLoadErrorExt};
pub use nf_domain::content::ContentDocument;
pub use source::{
    ConfiguredSource, ContentSource, FileContentSource, HttpContentSource,
    HttpContentSourceBuilder,
};
pub use store::ContentStore;

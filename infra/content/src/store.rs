use crate::error::ContentLoadError;
use crate::source::ContentSource;
use nf_domain::content::ContentDocument;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::watch;
use tracing::{debug, info, trace, warn};

type Loaded = Result<Arc<ContentDocument>, ContentLoadError>;

/// Cache slot. Moves `Empty -> Loading -> Ready`, or back to `Empty` on failure.
/// `Ready` is never left.
#[derive(Debug)]
enum Slot {
    Empty,
    /// Receiver of the in-flight fetch; `None` until it completes.
    Loading(watch::Receiver<Option<Loaded>>),
    Ready(Arc<ContentDocument>),
}

impl Slot {
    /// A loading slot whose sender is closed means the fetch task died; it counts as empty.
    fn in_flight(&self) -> bool {
        matches!(self, Self::Loading(rx) if rx.has_changed().is_ok())
    }
}

struct Shared<S> {
    source: S,
    slot: Mutex<Slot>,
    fetches: AtomicU64,
}

/// Caches the one content document fetched from a [`ContentSource`].
///
/// * At most one fetch is in flight at a time; concurrent first callers share it.
/// * A successful result is kept for the lifetime of the store and never refetched.
/// * A failure leaves the cache empty, so the next call fetches again.
///
/// The fetch runs as its own Tokio task: dropping a waiting caller does not
/// cancel it, and the cache is still populated.
///
/// Cloning is cheap and shares the same cache.
pub struct ContentStore<S> {
    shared: Arc<Shared<S>>,
}

impl<S: ContentSource> ContentStore<S> {
    pub fn new(source: S) -> Self {
        Self {
            shared: Arc::new(Shared {
                source,
                slot: Mutex::new(Slot::Empty),
                fetches: AtomicU64::new(0),
            }),
        }
    }

    #[must_use]
    pub fn source(&self) -> &S {
        &self.shared.source
    }

    /// Returns the cached document, or loads it.
    ///
    /// While a load is in flight, every caller waits on that same load and
    /// receives its result, success or failure alike.
    ///
    /// # Errors
    /// Returns the [`ContentLoadError`] of the fetch this call waited on.
    /// Errors are not cached.
    pub async fn get_content(&self) -> Result<Arc<ContentDocument>, ContentLoadError> {
        let mut pending = {
            let mut slot = self.shared.slot.lock();
            let in_flight = match &*slot {
                Slot::Ready(doc) => {
                    debug!("Content cache hit");
                    return Ok(Arc::clone(doc));
                },
                Slot::Loading(rx) if rx.has_changed().is_ok() => Some(rx.clone()),
                Slot::Loading(_) | Slot::Empty => None,
            };

            if let Some(rx) = in_flight {
                trace!("Joining in-flight content fetch");
                rx
            } else {
                let rx = self.start_fetch();
                *slot = Slot::Loading(rx.clone());
                rx
            }
        };

        let outcome = match pending.wait_for(Option::is_some).await {
            Ok(outcome) => outcome.clone(),
            Err(_) => None,
        };

        outcome.unwrap_or_else(|| {
            Err(ContentLoadError::from("Content fetch ended without a result"))
        })
    }

    /// The cached document, without triggering a load.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<ContentDocument>> {
        match &*self.shared.slot.lock() {
            Slot::Ready(doc) => Some(Arc::clone(doc)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        matches!(&*self.shared.slot.lock(), Slot::Ready(_))
    }

    /// `true` while a fetch is running.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.shared.slot.lock().in_flight()
    }

    /// Number of fetches started over the lifetime of the store.
    #[must_use]
    pub fn fetch_count(&self) -> u64 {
        self.shared.fetches.load(Ordering::Relaxed)
    }

    /// Must be called with the slot lock held.
    fn start_fetch(&self) -> watch::Receiver<Option<Loaded>> {
        let (tx, rx) = watch::channel(None);
        let attempt = self.shared.fetches.fetch_add(1, Ordering::Relaxed) + 1;
        let shared = Arc::clone(&self.shared);

        debug!(source = %shared.source.location(), attempt, "Starting content fetch");

        tokio::spawn(async move {
            let loaded = shared.load().await;
            shared.settle(&loaded, attempt);
            tx.send_replace(Some(loaded));
        });

        rx
    }
}

impl<S: ContentSource> Shared<S> {
    async fn load(&self) -> Loaded {
        let body = self.source.fetch().await?;
        let doc = ContentDocument::from_slice(&body)
            .map_err(|err| ContentLoadError::decode(err.to_string()))?;
        Ok(Arc::new(doc))
    }

    fn settle(&self, loaded: &Loaded, attempt: u64) {
        let mut slot = self.slot.lock();
        match loaded {
            Ok(doc) => {
                *slot = Slot::Ready(Arc::clone(doc));
                info!(source = %self.source.location(), attempt, "Content document cached");
            },
            Err(err) => {
                *slot = Slot::Empty;
                warn!(source = %self.source.location(), attempt, error = %err, "Content load failed");
            },
        }
    }
}

impl<S> Clone for ContentStore<S> {
    fn clone(&self) -> Self {
        Self { shared: Arc::clone(&self.shared) }
    }
}

impl<S> fmt::Debug for ContentStore<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match &*self.shared.slot.lock() {
            Slot::Ready(_) => "ready",
            slot if slot.in_flight() => "loading",
            _ => "empty",
        };
        f.debug_struct("ContentStore")
            .field("state", &state)
            .field("fetches", &self.shared.fetches.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

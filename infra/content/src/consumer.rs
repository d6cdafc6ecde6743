use crate::error::ContentLoadError;
use crate::source::ContentSource;
use crate::store::ContentStore;
use nf_domain::content::ContentDocument;
use parking_lot::ReentrantMutex;
use std::cell::Cell;
use std::fmt;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::trace;

/// Whether the callbacks of a subscription may still run.
///
/// Held for the whole callback invocation, so once [`Subscription::unsubscribe`]
/// returns no callback is running or will run. Reentrant so a callback may drop
/// its own subscription.
type Gate = Arc<ReentrantMutex<Cell<bool>>>;

impl<S: ContentSource> ContentStore<S> {
    /// Requests the document once and reports the outcome to exactly one callback.
    ///
    /// `on_resolve` or `on_error` is called at most once, from a Tokio task.
    /// Unsubscribing (or dropping the [`Subscription`]) cancels only the
    /// callbacks; a fetch already in flight still completes and fills the cache.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn subscribe<R, E>(&self, on_resolve: R, on_error: E) -> Subscription
    where
        R: FnOnce(Arc<ContentDocument>) + Send + 'static,
        E: FnOnce(ContentLoadError) + Send + 'static,
    {
        let gate: Gate = Arc::new(ReentrantMutex::new(Cell::new(true)));
        let task_gate = Arc::clone(&gate);
        let store = self.clone();

        let task = tokio::spawn(async move {
            let loaded = store.get_content().await;

            let open = task_gate.lock();
            if !open.replace(false) {
                trace!("Subscription cancelled before the content resolved");
                return;
            }
            match loaded {
                Ok(doc) => on_resolve(doc),
                Err(err) => on_error(err),
            }
        });

        Subscription { gate, task: Some(task) }
    }
}

/// Handle returned by [`ContentStore::subscribe`].
#[must_use = "dropping a Subscription cancels its callbacks"]
pub struct Subscription {
    gate: Gate,
    task: Option<JoinHandle<()>>,
}

impl Subscription {
    /// Cancels the callbacks. Blocks while a callback is running.
    pub fn unsubscribe(mut self) {
        self.cancel();
    }

    /// `true` until a callback has fired or the subscription was cancelled.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.gate.lock().get()
    }

    fn cancel(&mut self) {
        self.gate.lock().set(false);
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("pending", &self.is_pending()).finish()
    }
}

/// What a mounted consumer currently sees.
#[derive(Debug, Clone)]
pub enum ConsumerState {
    Loading,
    Resolved(Arc<ContentDocument>),
    Failed(ContentLoadError),
}

impl ConsumerState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn content(&self) -> Option<Arc<ContentDocument>> {
        match self {
            Self::Resolved(doc) => Some(Arc::clone(doc)),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<ContentLoadError> {
        match self {
            Self::Failed(err) => Some(err.clone()),
            _ => None,
        }
    }
}

/// One mounted reader of the content: `loading`, then `content` or `error`.
///
/// Always starts in [`ConsumerState::Loading`], even when the store is warm.
/// A terminal state is never left; mount a new consumer to resolve again.
/// Dropping the consumer unmounts it.
#[derive(Debug)]
pub struct ContentConsumer {
    state: watch::Receiver<ConsumerState>,
    subscription: Subscription,
}

impl ContentConsumer {
    /// Mounts a consumer and triggers exactly one load through `store`.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime.
    pub fn mount<S: ContentSource>(store: &ContentStore<S>) -> Self {
        let (tx, state) = watch::channel(ConsumerState::Loading);
        let tx = Arc::new(tx);
        let err_tx = Arc::clone(&tx);

        let subscription = store.subscribe(
            move |doc| {
                tx.send_replace(ConsumerState::Resolved(doc));
            },
            move |err| {
                err_tx.send_replace(ConsumerState::Failed(err));
            },
        );

        Self { state, subscription }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    #[must_use]
    pub fn content(&self) -> Option<Arc<ContentDocument>> {
        self.state.borrow().content()
    }

    #[must_use]
    pub fn error(&self) -> Option<ContentLoadError> {
        self.state.borrow().error()
    }

    #[must_use]
    pub fn state(&self) -> ConsumerState {
        self.state.borrow().clone()
    }

    /// Waits for the next state change. `None` once no change can follow.
    pub async fn changed(&mut self) -> Option<ConsumerState> {
        match self.state.changed().await {
            Ok(()) => Some(self.state.borrow_and_update().clone()),
            Err(_) => None,
        }
    }

    /// Waits until the consumer leaves `Loading`.
    ///
    /// Returns `Loading` only if the load can no longer finish, e.g. when the
    /// runtime is shutting down.
    pub async fn settled(&mut self) -> ConsumerState {
        let settled = match self.state.wait_for(|s| !s.is_loading()).await {
            Ok(state) => Some(state.clone()),
            Err(_) => None,
        };
        settled.unwrap_or_else(|| self.state.borrow().clone())
    }

    /// Stops state updates. The underlying fetch is left running.
    pub fn unmount(self) {
        self.subscription.unsubscribe();
    }
}

//! # Runtime
//!
//! The single-threaded Tokio runtime the workspace binaries run on.
//!
//! Every task, content fetches included, runs cooperatively on the thread that
//! calls `block_on`. Only blocking work (file reads through `tokio::fs`) leaves
//! that thread, on a small pool of named helper threads.
//!
//! ```rust,ignore
//! #[nf_runtime::main(event_loop)]
//! async fn main() -> anyhow::Result<()> {
//!     Ok(())
//! }
//! ```

pub use anyhow::Result;
pub use nf_derive::main;

use anyhow::Context;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

/// Upper bound on helper threads for blocking work.
const MAX_BLOCKING_THREADS: usize = 8;

/// Settings of the event-loop runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    /// Name of the helper threads that run blocking work.
    pub blocking_thread_name: String,
    pub max_blocking_threads: usize,
}

impl RuntimeConfig {
    #[must_use]
    pub fn event_loop() -> Self {
        Self {
            blocking_thread_name: "nf-blocking".to_owned(),
            max_blocking_threads: MAX_BLOCKING_THREADS,
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::event_loop()
    }
}

/// Builds a current-thread runtime with I/O and timers enabled.
///
/// # Errors
/// Fails when the OS refuses to set up the runtime's I/O driver.
///
/// ```rust
/// use nf_runtime::{build_runtime_with_config, RuntimeConfig};
///
/// let runtime = build_runtime_with_config(&RuntimeConfig::event_loop())?;
/// assert_eq!(runtime.block_on(async { 40 + 2 }), 42);
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn build_runtime_with_config(config: &RuntimeConfig) -> Result<Runtime> {
    debug!(?config, "Building event-loop runtime");

    Builder::new_current_thread()
        .enable_all()
        .thread_name(config.blocking_thread_name.as_str())
        .max_blocking_threads(config.max_blocking_threads.max(1))
        .build()
        .context("Failed to initialize the event-loop runtime")
}

#![allow(dead_code, unreachable_pub)]

use nf_content::{ContentLoadError, ContentSource};
use parking_lot::Mutex;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
pub enum Reply {
    Body(Vec<u8>),
    Status(u16),
    Panic,
}

impl Reply {
    pub fn json(value: &Value) -> Self {
        Self::Body(serde_json::to_vec(value).expect("serialize body"))
    }
}

/// In-memory source: scripted replies, call counting and an optional gate
/// that holds every fetch until released.
#[derive(Debug, Clone)]
pub struct MockSource {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Reply,
    calls: AtomicU32,
    gate: Option<Semaphore>,
}

impl MockSource {
    /// Always answers with `fallback` once the scripted replies run out.
    pub fn new(fallback: Reply) -> Self {
        Self::build(fallback, Vec::new(), false)
    }

    pub fn scripted(replies: Vec<Reply>, fallback: Reply) -> Self {
        Self::build(fallback, replies, false)
    }

    /// Fetches wait until [`MockSource::release`] is called.
    pub fn gated(fallback: Reply) -> Self {
        Self::build(fallback, Vec::new(), true)
    }

    fn build(fallback: Reply, replies: Vec<Reply>, gated: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                replies: Mutex::new(replies.into()),
                fallback,
                calls: AtomicU32::new(0),
                gate: gated.then(|| Semaphore::new(0)),
            }),
        }
    }

    pub fn calls(&self) -> u32 {
        self.inner.calls.load(Ordering::SeqCst)
    }

    /// Lets `n` waiting (or future) fetches through the gate.
    pub fn release(&self, n: usize) {
        if let Some(gate) = &self.inner.gate {
            gate.add_permits(n);
        }
    }
}

impl ContentSource for MockSource {
    fn location(&self) -> Cow<'_, str> {
        Cow::Borrowed("mock://content")
    }

    fn fetch(&self) -> impl Future<Output = Result<Vec<u8>, ContentLoadError>> + Send {
        let inner = Arc::clone(&self.inner);
        async move {
            inner.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &inner.gate {
                gate.acquire().await.expect("gate closed").forget();
            }

            let reply = inner.replies.lock().pop_front().unwrap_or_else(|| inner.fallback.clone());
            match reply {
                Reply::Body(body) => Ok(body),
                Reply::Status(status) => Err(ContentLoadError::Status { status, context: None }),
                Reply::Panic => panic!("mock source failure"),
            }
        }
    }
}

/// Polls `condition` until it holds, failing the test after one second.
pub async fn eventually(condition: impl Fn() -> bool) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
    while !condition() {
        assert!(tokio::time::Instant::now() < deadline, "condition not reached in time");
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

pub mod fixtures;

use fixtures::{MockSource, Reply, eventually};
use nf_content::{ConsumerState, ContentConsumer, ContentStore};
use nf_domain::fallback::SiteSummary;
use serde_json::json;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

fn brand_reply() -> Reply {
    Reply::json(&json!({ "site": { "brandName": "Neema Foundation" } }))
}

#[tokio::test]
async fn subscribe_calls_on_resolve_once() {
    let store = ContentStore::new(MockSource::new(brand_reply()));
    let (tx, rx) = oneshot::channel();
    let errors = Arc::new(AtomicU32::new(0));
    let errors_seen = Arc::clone(&errors);

    let subscription = store.subscribe(
        move |doc| {
            let _ = tx.send(doc);
        },
        move |_| {
            errors_seen.fetch_add(1, Ordering::SeqCst);
        },
    );

    let doc = rx.await.expect("resolved");
    assert_eq!(doc.brand_name(), "Neema Foundation");
    assert_eq!(errors.load(Ordering::SeqCst), 0);
    assert!(!subscription.is_pending());
}

#[tokio::test]
async fn subscribe_reports_status_errors() {
    let store = ContentStore::new(MockSource::new(Reply::Status(500)));
    let (tx, rx) = oneshot::channel();

    let _subscription = store.subscribe(
        |_| panic!("must not resolve"),
        move |err| {
            let _ = tx.send(err);
        },
    );

    let err = rx.await.expect("failed");
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn unsubscribe_before_resolution_suppresses_callbacks() {
    let source = MockSource::gated(brand_reply());
    let store = ContentStore::new(source.clone());
    let fired = Arc::new(AtomicU32::new(0));
    let (on_ok, on_err) = (Arc::clone(&fired), Arc::clone(&fired));

    let subscription = store.subscribe(
        move |_| {
            on_ok.fetch_add(1, Ordering::SeqCst);
        },
        move |_| {
            on_err.fetch_add(1, Ordering::SeqCst);
        },
    );

    eventually(|| source.calls() == 1).await;
    subscription.unsubscribe();

    source.release(1);
    eventually(|| store.is_loaded()).await;
    tokio::time::sleep(Duration::from_millis(20)).await;

    assert_eq!(fired.load(Ordering::SeqCst), 0, "no callback after unsubscribe");
    assert_eq!(source.calls(), 1, "the in-flight fetch still filled the cache");
}

#[tokio::test]
async fn dropping_the_subscription_cancels_it() {
    let source = MockSource::gated(brand_reply());
    let store = ContentStore::new(source.clone());
    let fired = Arc::new(AtomicU32::new(0));
    let on_ok = Arc::clone(&fired);

    drop(store.subscribe(
        move |_| {
            on_ok.fetch_add(1, Ordering::SeqCst);
        },
        |_| {},
    ));

    source.release(1);
    store.get_content().await.expect("load");
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(fired.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn consumer_starts_loading_even_with_a_warm_cache() {
    let store = ContentStore::new(MockSource::new(brand_reply()));
    store.get_content().await.expect("warm up");

    let mut consumer = ContentConsumer::mount(&store);
    assert!(consumer.is_loading());
    assert!(consumer.content().is_none());
    assert!(consumer.error().is_none());

    let state = consumer.settled().await;
    assert!(matches!(state, ConsumerState::Resolved(_)));
    assert!(!consumer.is_loading());
    assert_eq!(consumer.content().expect("content").brand_name(), "Neema Foundation");
}

#[tokio::test]
async fn consumer_failure_keeps_content_empty() {
    let store = ContentStore::new(MockSource::new(Reply::Status(500)));

    let mut consumer = ContentConsumer::mount(&store);
    let state = consumer.settled().await;

    assert!(state.content().is_none());
    assert_eq!(state.error().and_then(|e| e.status()), Some(500));
    assert!(!consumer.is_loading());
    assert!(consumer.content().is_none());
}

#[tokio::test]
async fn failed_consumer_stays_failed_and_a_new_mount_refetches() {
    let source = MockSource::scripted(vec![Reply::Status(500)], brand_reply());
    let store = ContentStore::new(source.clone());

    let mut failed = ContentConsumer::mount(&store);
    assert!(failed.settled().await.error().is_some());

    let mut fresh = ContentConsumer::mount(&store);
    assert!(fresh.settled().await.content().is_some());
    assert_eq!(source.calls(), 2);

    assert!(failed.error().is_some(), "terminal state is never left");
    assert!(failed.content().is_none());
    assert!(failed.settled().await.error().is_some(), "settling again returns the same state");
}

#[tokio::test]
async fn changed_reports_the_single_transition() {
    let store = ContentStore::new(MockSource::new(brand_reply()));
    let mut consumer = ContentConsumer::mount(&store);

    let next = consumer.changed().await.expect("one transition");
    assert!(matches!(next, ConsumerState::Resolved(_)));
    assert!(consumer.changed().await.is_none(), "no transition after a terminal state");
}

#[tokio::test]
async fn unmount_before_resolution_still_populates_the_cache() {
    let source = MockSource::gated(brand_reply());
    let store = ContentStore::new(source.clone());

    let consumer = ContentConsumer::mount(&store);
    eventually(|| source.calls() == 1).await;
    consumer.unmount();

    source.release(1);
    eventually(|| store.is_loaded()).await;

    let mut later = ContentConsumer::mount(&store);
    assert!(later.settled().await.content().is_some());
    assert_eq!(source.calls(), 1, "later mount hits the warm cache");
}

#[tokio::test]
async fn simultaneous_mounts_observe_the_same_document() {
    let source = MockSource::gated(brand_reply());
    let store = ContentStore::new(source.clone());

    let mut first = ContentConsumer::mount(&store);
    let mut second = ContentConsumer::mount(&store);
    assert!(first.is_loading() && second.is_loading());

    eventually(|| source.calls() == 1).await;
    source.release(1);

    let (a, b) = tokio::join!(first.settled(), second.settled());
    let (a, b) = (a.content().expect("first"), b.content().expect("second"));
    assert_eq!(a.brand_name(), b.brand_name());
    assert_eq!(a.raw(), b.raw());
    assert_eq!(source.calls(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn many_consumers_across_threads_share_one_fetch() {
    let source = MockSource::gated(brand_reply());
    let store = ContentStore::new(source.clone());

    let mut consumers: Vec<_> = (0..32).map(|_| ContentConsumer::mount(&store)).collect();
    eventually(|| source.calls() == 1).await;
    source.release(1);

    for consumer in &mut consumers {
        assert!(consumer.settled().await.content().is_some());
    }
    assert_eq!(source.calls(), 1);
}

#[tokio::test]
async fn summary_falls_back_while_loading_and_after_failure() {
    let store = ContentStore::new(MockSource::new(Reply::Status(502)));
    let mut consumer = ContentConsumer::mount(&store);

    let loading = SiteSummary::resolve(consumer.content().as_deref());
    assert_eq!(loading.brand_name, "Neema Foundation");

    consumer.settled().await;
    let failed = SiteSummary::resolve(consumer.content().as_deref());
    assert_eq!(failed.metrics.children_supported, 650);
}

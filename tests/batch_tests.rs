//! Tests for URL normalization and the fan-out executor.
//!
//! The executor core is exercised through `run_batch_with` with mock
//! operations; nothing here launches a browser.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use pagepress::batch::run_batch_with;
use pagepress::{Artifact, CancelToken, CaptureConfig, CaptureError, normalize_url};

fn quick_config() -> CaptureConfig {
    CaptureConfig::builder().retry_cooldown_secs(0).build()
}

fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(ToString::to_string).collect()
}

#[test]
fn scheme_less_urls_get_the_default_scheme() {
    assert_eq!(normalize_url("example.com"), "http://example.com");
    assert_eq!(
        normalize_url("  example.com/page  "),
        "http://example.com/page"
    );
}

#[test]
fn urls_with_a_scheme_are_unchanged() {
    assert_eq!(normalize_url("http://example.com"), "http://example.com");
    assert_eq!(normalize_url("https://example.com"), "https://example.com");
}

#[tokio::test]
async fn all_succeeding_batch_yields_one_artifact_per_url() {
    let inputs = urls(&["a.example", "b.example", "c.example"]);

    let outcome = run_batch_with(&inputs, &quick_config(), &CancelToken::new(), |url| {
        async move { Artifact::from_bytes("pdf", url.as_bytes()) }
    })
    .await;

    assert_eq!(outcome.successes.len(), 3);
    assert!(outcome.failures.is_empty());

    // Order is unconstrained, contents must be set-equal to the input
    let produced: HashSet<String> = outcome
        .successes
        .iter()
        .map(|a| String::from_utf8(a.read().unwrap()).unwrap())
        .collect();
    let expected: HashSet<String> = inputs.iter().map(|u| normalize_url(u)).collect();
    assert_eq!(produced, expected);

    for artifact in &outcome.successes {
        artifact.delete();
    }
}

#[tokio::test]
async fn failing_url_is_reported_after_exactly_max_attempts() {
    let attempts: Arc<Mutex<HashMap<String, u32>>> = Arc::new(Mutex::new(HashMap::new()));
    let counter = Arc::clone(&attempts);
    let inputs = urls(&["good.example", "bad.example"]);

    let outcome = run_batch_with(&inputs, &quick_config(), &CancelToken::new(), move |url| {
        let counter = Arc::clone(&counter);
        async move {
            *counter.lock().unwrap().entry(url.clone()).or_insert(0) += 1;
            if url.contains("bad") {
                Err(CaptureError::Render {
                    url,
                    reason: "browser crashed".into(),
                })
            } else {
                Artifact::from_bytes("pdf", b"%PDF-1.7")
            }
        }
    })
    .await;

    assert_eq!(outcome.successes.len(), 1);
    assert_eq!(outcome.failures.len(), 1);

    let (failed_url, reason) = &outcome.failures[0];
    assert_eq!(failed_url, "http://bad.example");
    assert!(reason.contains("browser crashed"), "got: {reason}");

    let attempts = attempts.lock().unwrap();
    assert_eq!(attempts["http://bad.example"], 3);
    assert_eq!(attempts["http://good.example"], 1);

    for artifact in &outcome.successes {
        artifact.delete();
    }
}

#[tokio::test]
async fn one_failing_task_never_aborts_its_siblings() {
    let inputs = urls(&["a.example", "poison.example", "b.example", "c.example"]);

    let outcome = run_batch_with(&inputs, &quick_config(), &CancelToken::new(), |url| {
        async move {
            if url.contains("poison") {
                Err(CaptureError::SessionStart("no browser".into()))
            } else {
                Artifact::from_bytes("pdf", url.as_bytes())
            }
        }
    })
    .await;

    assert_eq!(outcome.successes.len(), 3);
    assert_eq!(outcome.failures.len(), 1);

    for artifact in &outcome.successes {
        artifact.delete();
    }
}

#[tokio::test]
async fn cancelled_token_rejects_every_task_at_start() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&calls);
    let cancel = CancelToken::new();
    cancel.cancel();

    let inputs = urls(&["a.example", "b.example"]);
    let outcome = run_batch_with(&inputs, &quick_config(), &cancel, move |_| {
        let counter = Arc::clone(&counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Artifact::from_bytes("pdf", b"%PDF-1.7")
        }
    })
    .await;

    assert_eq!(calls.load(Ordering::SeqCst), 0, "no operation may start");
    assert!(outcome.successes.is_empty());
    assert_eq!(outcome.failures.len(), 2);
    for (_, reason) in &outcome.failures {
        assert!(reason.contains("cancelled"), "got: {reason}");
    }
}

#[tokio::test]
async fn pool_width_bounds_concurrency() {
    let gauge = Arc::new(AtomicU32::new(0));
    let high_water = Arc::new(AtomicU32::new(0));

    let config = CaptureConfig::builder()
        .worker_count(2)
        .retry_cooldown_secs(0)
        .build();
    let inputs = urls(&[
        "a.example",
        "b.example",
        "c.example",
        "d.example",
        "e.example",
        "f.example",
    ]);

    let gauge_handle = Arc::clone(&gauge);
    let high_water_handle = Arc::clone(&high_water);
    let outcome = run_batch_with(&inputs, &config, &CancelToken::new(), move |_| {
        let gauge = Arc::clone(&gauge_handle);
        let high_water = Arc::clone(&high_water_handle);
        async move {
            let current = gauge.fetch_add(1, Ordering::SeqCst) + 1;
            high_water.fetch_max(current, Ordering::SeqCst);
            tokio::time::sleep(Duration::from_millis(20)).await;
            gauge.fetch_sub(1, Ordering::SeqCst);
            Artifact::from_bytes("pdf", b"%PDF-1.7")
        }
    })
    .await;

    assert_eq!(outcome.successes.len(), 6);
    assert!(
        high_water.load(Ordering::SeqCst) <= 2,
        "worker pool exceeded its width: {}",
        high_water.load(Ordering::SeqCst)
    );

    for artifact in &outcome.successes {
        artifact.delete();
    }
}

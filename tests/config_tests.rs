//! Tests for the capture configuration builder.

use std::time::Duration;

use pagepress::CaptureConfig;

#[test]
fn defaults_match_service_behavior() {
    let config = CaptureConfig::default();

    assert_eq!(config.worker_count(), 4);
    assert_eq!(config.max_attempts(), 3);
    assert_eq!(config.retry_cooldown(), Duration::from_secs(5));
    assert_eq!(config.page_load_timeout_secs(), 30);
    assert_eq!(config.navigation_timeout_secs(), 30);
    assert_eq!(config.consent_wait(), Duration::from_secs(10));
    assert!(config.headless());
    assert!(config.chrome_executable().is_none());
}

#[test]
fn builder_overrides_named_fields_only() {
    let config = CaptureConfig::builder()
        .worker_count(8)
        .max_attempts(5)
        .retry_cooldown_secs(0)
        .headless(false)
        .build();

    assert_eq!(config.worker_count(), 8);
    assert_eq!(config.max_attempts(), 5);
    assert_eq!(config.retry_cooldown(), Duration::from_secs(0));
    assert!(!config.headless());
    // Untouched fields keep their defaults
    assert_eq!(config.page_load_timeout_secs(), 30);
}

#[test]
fn builder_field_override_last_wins() {
    let config = CaptureConfig::builder()
        .worker_count(2)
        .worker_count(6)
        .build();
    assert_eq!(config.worker_count(), 6);
}

#[test]
fn zero_widths_are_clamped() {
    let config = CaptureConfig::builder()
        .worker_count(0)
        .max_attempts(0)
        .consent_poll_ms(0)
        .build();

    assert_eq!(config.worker_count(), 1);
    assert_eq!(config.max_attempts(), 1);
    assert_eq!(config.consent_poll(), Duration::from_millis(1));
}

#[test]
fn config_serializes_for_diagnostics() {
    let config = CaptureConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("\"worker_count\":4"), "got: {json}");

    let back: CaptureConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.worker_count(), config.worker_count());
}

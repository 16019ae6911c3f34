//! Core infrastructure tests.

use std::io::Write;
use std::time::Duration;

use tempfile::NamedTempFile;
use trellis::config::{ClientConfig, DEFAULT_KV_TIMEOUT_MS, DEFAULT_SERVICE_TIMEOUT_MS};
use trellis::{Deadline, ServiceType};

// ============================================================================
// Config tests
// ============================================================================

#[test]
fn parse_empty_config_uses_defaults() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"").unwrap();

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timeouts.kv_ms, DEFAULT_KV_TIMEOUT_MS);
    assert_eq!(config.timeouts.query_ms, DEFAULT_SERVICE_TIMEOUT_MS);
    assert_eq!(config.retry.strategy, "best_effort");
}

#[test]
fn parse_config_with_overrides() {
    let config_content = r#"
[timeouts]
kv_ms = 1000

[retry]
strategy = "fail_fast"
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let config = ClientConfig::from_file(file.path()).unwrap();
    assert_eq!(config.timeouts.kv_ms, 1000);
    assert_eq!(config.timeouts.search_ms, DEFAULT_SERVICE_TIMEOUT_MS);
    assert_eq!(config.retry.strategy, "fail_fast");
    config.retry.build_strategy().unwrap();
}

#[test]
fn reject_zero_timeout() {
    let config_content = r#"
[timeouts]
kv_ms = 0
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = ClientConfig::from_file(file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("kv_ms"));
}

#[test]
fn reject_unknown_retry_strategy() {
    let config_content = r#"
[retry]
strategy = "hope"
"#;
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(config_content.as_bytes()).unwrap();

    let result = ClientConfig::from_file(file.path());
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("strategy"));
}

#[test]
fn timeout_resolution_prefers_explicit() {
    let config = ClientConfig::default();
    assert_eq!(
        config
            .timeouts
            .resolve(ServiceType::Query, Some(Duration::from_millis(250))),
        Duration::from_millis(250)
    );
    assert_eq!(
        config.timeouts.resolve(ServiceType::Query, None),
        Duration::from_millis(DEFAULT_SERVICE_TIMEOUT_MS)
    );
}

// ============================================================================
// Deadline tests
// ============================================================================

#[test]
fn deadline_is_monotonic_and_stable() {
    let deadline = Deadline::after(Duration::from_secs(30));
    let observed = deadline.instant();
    for _ in 0..100 {
        assert_eq!(deadline.instant(), observed);
    }
    assert!(!deadline.has_passed());
}

#[test]
fn deadline_remaining_decreases() {
    let deadline = Deadline::after(Duration::from_millis(200));
    let first = deadline.remaining();
    std::thread::sleep(Duration::from_millis(20));
    let second = deadline.remaining();
    assert!(second <= first);
}

//! Configuration file round-trip.

use habitz_core::HabitzConfig;

#[test]
fn config_loads_from_file() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("habitz.toml");
    std::fs::write(
        &path,
        r#"
        [general]
        log_level = "debug"

        [award]
        max_resolve_attempts = 5
        retry_backoff_ms = 100

        [cache]
        capacity = 64
        "#,
    )
    .expect("write config");

    let config = HabitzConfig::from_file(&path).expect("load");
    assert_eq!(config.general.log_level, "debug");
    assert_eq!(config.award.max_resolve_attempts, 5);
    assert_eq!(config.award.retry_backoff_ms, 100);
    assert_eq!(config.cache.capacity, 64);
    // Untouched sections keep their defaults.
    assert_eq!(config.award.base_completion_xp, 15);
    assert!(config.cache.enabled);
}

#[test]
fn missing_file_is_an_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("nope.toml");
    let err = HabitzConfig::from_file(&missing).expect_err("should fail");
    assert!(matches!(err, habitz_core::CoreError::Io(_)));
}

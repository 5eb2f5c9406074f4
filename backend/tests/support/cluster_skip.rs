//! Opt-in and skip policy for tests needing external databases.

/// True when `SKIP_TEST_CLUSTER` is `1`, `true` or `yes` (any case).
pub fn should_skip_test_cluster() -> bool {
    std::env::var("SKIP_TEST_CLUSTER")
        .map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

/// True when embedded PostgreSQL tests were requested with `RUN_PG_EMBEDDED=1`.
pub fn pg_embedded_requested() -> bool {
    std::env::var("RUN_PG_EMBEDDED").as_deref() == Ok("1")
}

/// Report a setup failure: skip with a marker when allowed, panic otherwise.
pub fn handle_cluster_setup_failure<T>(reason: impl std::fmt::Display) -> Option<T> {
    if should_skip_test_cluster() {
        eprintln!("SKIP-TEST-CLUSTER: {reason}");
        None
    } else {
        panic!("Test cluster setup failed: {reason}. Set SKIP_TEST_CLUSTER=1 to skip.");
    }
}

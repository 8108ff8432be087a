//! Tracing and logging setup shared by checkout binaries and tests.

/// Initialize process-wide tracing (JSON logs, `RUST_LOG` filtering).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Route tracing output through the test harness so it only shows for failing tests.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

/// Tracing configuration (filters, layers).
pub mod tracing;

//! Tracing/logging setup shared by every process embedding the pricing crates.

/// Tracing configuration (filters, formatters).
pub mod tracing;

/// Initialize process-wide JSON logging.
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init();
}

/// Initialize human-readable logging captured by the test harness.
pub fn init_for_tests() {
    tracing::init_for_tests();
}

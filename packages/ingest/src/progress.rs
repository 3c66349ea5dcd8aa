//! Progress reporting for long-running loads.
//!
//! The [`ProgressCallback`] trait keeps this crate free of any rendering
//! backend: the loader reports byte offsets, and whoever owns the
//! terminal decides whether that becomes an `indicatif` bar, log lines,
//! or nothing at all.

use std::sync::Arc;

/// Receives progress updates from a load.
///
/// Implementations must be `Send + Sync` so a load can run on a worker
/// thread while the bar renders elsewhere.
pub trait ProgressCallback: Send + Sync {
    /// Total expected units of work (enables percentage/ETA display).
    fn set_total(&self, total: u64);

    /// Current absolute position within the total.
    fn set_position(&self, pos: u64);

    /// Marks the work complete with a final message.
    fn finish(&self, msg: String);
}

/// A [`ProgressCallback`] that ignores every update.
///
/// Used by scriptable commands and tests that have no terminal to draw
/// on.
pub struct NullProgress;

impl ProgressCallback for NullProgress {
    fn set_total(&self, _total: u64) {}
    fn set_position(&self, _pos: u64) {}
    fn finish(&self, _msg: String) {}
}

/// Returns a shared [`NullProgress`] instance for convenient use.
#[must_use]
pub fn null_progress() -> Arc<dyn ProgressCallback> {
    Arc::new(NullProgress)
}

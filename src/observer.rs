//! Module with the scan observer, an optional sink for per-construct timing
//! events. The observer is a trait the caller injects; no observer means no
//! overhead beyond a branch.

use std::time::Duration;

use crate::Span;

/// An observer for profiling scan operations.
///
/// The tokenizers report one event per container construct they scan. The
/// methods take `&self`; an implementation that accumulates data uses interior
/// mutability, e.g. a `Cell` or `RefCell`.
pub trait ScanObserver {
    /// Called after a construct was scanned.
    fn construct_scanned(&self, construct: &'static str, span: Span, elapsed: Duration);
}

/// An observer that discards all events.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl ScanObserver for NullObserver {
    fn construct_scanned(&self, _construct: &'static str, _span: Span, _elapsed: Duration) {}
}

//! Shared numeric constants for the workbench crate.

// ── Gestures ────────────────────────────────────────────────────

/// Pointer travel in pixels before a press over an item retroactively
/// becomes a rubber-band rectangle.
pub const DRAG_START_THRESHOLD_PX: f64 = 5.0;

/// Window in milliseconds after a drag ends during which item clicks and
/// rubber-band presses are ignored. A drop gesture produces a synthetic
/// trailing click that would otherwise collapse the selection.
pub const DRAG_END_SUPPRESS_MS: f64 = 400.0;

// ── Dispatch ────────────────────────────────────────────────────

/// Maximum mutation calls in flight per batch, uniform across kinds.
pub const MAX_IN_FLIGHT: usize = 3;

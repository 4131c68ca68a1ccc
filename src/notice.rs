//! User-visible outcome notices with count-aware text.

#[cfg(test)]
#[path = "notice_test.rs"]
mod notice_test;

use std::fmt;

use crate::clipboard::PasteError;
use crate::drag::DropError;
use crate::entity::EntityKind;

/// The outcome surfaced to the user after an engine action. One notice
/// per user action, never one per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Every move in a batch applied.
    Moved { kind: EntityKind, count: usize },
    /// Every duplicate in a batch applied.
    Copied { kind: EntityKind, count: usize },
    /// At least one call in a batch failed. Every item was still
    /// attempted; the counts cover the whole batch.
    BatchFailed { succeeded: usize, failed: usize },
    /// A drop was rejected before dispatch.
    DropRejected(DropError),
    /// A paste was rejected before dispatch.
    PasteRejected(PasteError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Moved { kind, count } => write_counted(f, *kind, *count, "moved"),
            Self::Copied { kind, count } => write_counted(f, *kind, *count, "copied"),
            Self::BatchFailed {
                succeeded: 0,
                failed: _,
            } => write!(f, "Operation failed"),
            Self::BatchFailed { succeeded, failed } => {
                write!(f, "{succeeded} succeeded, {failed} failed")
            }
            Self::DropRejected(err) => write!(f, "{err}"),
            Self::PasteRejected(err) => write!(f, "{err}"),
        }
    }
}

fn write_counted(
    f: &mut fmt::Formatter<'_>,
    kind: EntityKind,
    count: usize,
    verb: &str,
) -> fmt::Result {
    if count == 1 {
        write!(f, "{} {verb}", kind.title())
    } else {
        write!(f, "{count} {} {verb}", kind.label_plural())
    }
}

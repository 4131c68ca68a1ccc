//! Rubber-band selection: deferred starts, the travel threshold, and
//! idempotent recomputation of the selected set.

#[cfg(test)]
#[path = "marquee_test.rs"]
mod marquee_test;

use crate::consts::DRAG_START_THRESHOLD_PX;
use crate::entity::Item;
use crate::geometry::{Point, Rect};
use crate::selection::SelectionSet;

/// The rubber-band gesture tracked between pointer-down and pointer-up.
#[derive(Debug, Clone, Default)]
pub enum Marquee {
    /// No gesture in progress.
    #[default]
    Idle,
    /// Pressed over an item. The rectangle starts only once the pointer
    /// travels past the start threshold; until then the press may still
    /// resolve to a click or an item drag.
    Deferred { pressed: Point, additive: bool },
    /// Rectangle active from `origin` to `current`. `base` is the
    /// selection captured at activation; every recompute starts from it,
    /// so recomputation is idempotent and an additive band can shrink.
    Active {
        origin: Point,
        current: Point,
        additive: bool,
        base: SelectionSet,
    },
}

impl Marquee {
    /// Pointer-down over empty container space: the rectangle starts
    /// immediately at the press point. A non-additive press clears the
    /// prior selection first. Returns whether the selection changed.
    pub fn press_empty(&mut self, at: Point, additive: bool, selection: &mut SelectionSet) -> bool {
        let changed = !additive && !selection.is_empty();
        if !additive {
            selection.clear();
        }
        *self = Self::Active {
            origin: at,
            current: at,
            additive,
            base: selection.clone(),
        };
        changed
    }

    /// Pointer-down over an item: record the press point, defer the
    /// rectangle.
    pub fn press_item(&mut self, at: Point, additive: bool) {
        *self = Self::Deferred { pressed: at, additive };
    }

    /// Pointer-move. A deferred press activates once the pointer travels
    /// past the threshold; the rectangle then starts retroactively from
    /// the original press point, applying the same clear-unless-additive
    /// rule as an immediate start. While active, recomputes the selected
    /// set from the normalized rectangle. Returns whether the selection
    /// changed.
    pub fn pointer_move(&mut self, to: Point, items: &[Item], selection: &mut SelectionSet) -> bool {
        match self {
            Self::Idle => false,
            Self::Deferred { pressed, additive } => {
                let (origin, additive) = (*pressed, *additive);
                if origin.distance(to) <= DRAG_START_THRESHOLD_PX {
                    return false;
                }
                let before = selection.clone();
                if !additive {
                    selection.clear();
                }
                let base = selection.clone();
                let next = matched_union(&Rect::from_corners(origin, to), &base, items);
                *selection = next;
                *self = Self::Active { origin, current: to, additive, base };
                *selection != before
            }
            Self::Active {
                origin,
                current,
                base,
                ..
            } => {
                *current = to;
                let next = matched_union(&Rect::from_corners(*origin, to), base, items);
                if next == *selection {
                    false
                } else {
                    *selection = next;
                    true
                }
            }
        }
    }

    /// End the gesture: pointer-up in the container, the window-level
    /// mouse-up the host relays when the pointer left the container, or a
    /// drag taking over a deferred press. The last computed selection
    /// stands. Returns whether an active rectangle was dismissed.
    pub fn release(&mut self) -> bool {
        let was_active = matches!(self, Self::Active { .. });
        *self = Self::Idle;
        was_active
    }

    /// The current overlay rectangle, if a band is active.
    #[must_use]
    pub fn rect(&self) -> Option<Rect> {
        match self {
            Self::Active { origin, current, .. } => Some(Rect::from_corners(*origin, *current)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

/// The selection a rectangle produces: everything in `base` plus every
/// item whose bounds intersect it.
fn matched_union(rect: &Rect, base: &SelectionSet, items: &[Item]) -> SelectionSet {
    let mut next = base.clone();
    for item in items {
        if rect.intersects(&item.rect) {
            next.insert(item.entity.kind, item.entity.id);
        }
    }
    next
}

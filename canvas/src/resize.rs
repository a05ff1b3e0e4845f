//! Explicit resize mode for item cards.
//!
//! Items are resized in a mode the user enters deliberately: handles appear,
//! the card size follows the handles, and nothing is persisted until the user
//! confirms. Cancel rolls back to the size captured on entry; reset jumps to
//! the default card size but stays in the mode.
//!
//! Groups do not use this machine. They resize live from corner handles with
//! no rollback (see [`crate::input::InputState::ResizingGroup`]); the two share
//! only the [`Size`] payload.

#[cfg(test)]
#[path = "resize_test.rs"]
mod resize_test;

use crate::doc::{EntityId, NodeKind, Size};

/// Item resize mode.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum ItemResize {
    /// Normal browsing; handles hidden.
    #[default]
    Browsing,
    /// Handles visible for `id`.
    Resizing {
        id: EntityId,
        /// Size when the mode was entered; restored on cancel.
        baseline: Size,
        /// Size currently displayed.
        current: Size,
    },
}

/// How a resize session ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ResizeOutcome {
    /// The user kept `size`; it must be cached and persisted.
    Confirmed { id: EntityId, size: Size },
    /// The user backed out; `size` is the restored baseline.
    Cancelled { id: EntityId, size: Size },
}

impl ItemResize {
    /// Enter resize mode for `id`, capturing `current` as the rollback baseline.
    /// Entering while another card is in resize mode replaces that session
    /// without confirming it.
    pub fn enter(&mut self, id: EntityId, current: Size) {
        *self = Self::Resizing { id, baseline: current, current };
    }

    /// The card in resize mode, if any.
    #[must_use]
    pub fn active(&self) -> Option<EntityId> {
        match self {
            Self::Browsing => None,
            Self::Resizing { id, .. } => Some(*id),
        }
    }

    /// Size currently shown for the card in resize mode.
    #[must_use]
    pub fn current(&self) -> Option<Size> {
        match self {
            Self::Browsing => None,
            Self::Resizing { current, .. } => Some(*current),
        }
    }

    /// Follow the handles. Returns the clamped size now displayed, or `None`
    /// outside resize mode.
    pub fn resize_to(&mut self, size: Size) -> Option<Size> {
        match self {
            Self::Browsing => None,
            Self::Resizing { current, .. } => {
                *current = NodeKind::Item.clamp(size);
                Some(*current)
            }
        }
    }

    /// Jump to the default card size. Stays in resize mode.
    pub fn reset(&mut self) -> Option<Size> {
        self.resize_to(NodeKind::Item.default_size())
    }

    /// Leave resize mode keeping the current size.
    pub fn confirm(&mut self) -> Option<ResizeOutcome> {
        match std::mem::take(self) {
            Self::Browsing => None,
            Self::Resizing { id, current, .. } => Some(ResizeOutcome::Confirmed { id, size: current }),
        }
    }

    /// Leave resize mode restoring the baseline.
    pub fn cancel(&mut self) -> Option<ResizeOutcome> {
        match std::mem::take(self) {
            Self::Browsing => None,
            Self::Resizing { id, baseline, .. } => Some(ResizeOutcome::Cancelled { id, size: baseline }),
        }
    }
}

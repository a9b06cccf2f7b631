// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: widget identifiers, flags, and local state.

use kurbo::Rect;
use wayfinder_input::event::PointerEvent;
use wayfinder_input::key::Key;
use wayfinder_menu::Visibility;

/// Identifier for a widget in a [`WidgetTree`](crate::WidgetTree).
///
/// A slot index plus a generation counter, with the same semantics as the menu ids:
/// a stale id never aliases a newer widget in the same slot.
///
/// ### Newer
///
/// Higher generation is newer; on equal generations the higher slot index is newer.
/// Used only to break hit-test ties between overlapping widgets at the same z-index.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) fn is_newer_than(self, other: Self) -> bool {
        (self.1 > other.1) || (self.1 == other.1 && self.0 > other.0)
    }
}

bitflags::bitflags! {
    /// Widget capabilities.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct WidgetFlags: u8 {
        /// Can hold keyboard focus.
        const FOCUSABLE    = 0b0000_0001;
        /// Reacts to pointer input (buttons, sliders). Slows the analog cursor down.
        const INTERACTABLE = 0b0000_0010;
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Local state of a widget.
#[derive(Clone, Debug)]
pub struct LocalWidget {
    /// Bounds in absolute screen space.
    pub bounds: Rect,
    /// Stacking order among overlapping widgets. Higher is on top.
    pub z_index: i32,
    /// Capabilities.
    pub flags: WidgetFlags,
    /// Visibility of the widget itself.
    pub visibility: Visibility,
}

impl Default for LocalWidget {
    fn default() -> Self {
        Self {
            bounds: Rect::ZERO,
            z_index: 0,
            flags: WidgetFlags::default(),
            visibility: Visibility::Visible,
        }
    }
}

impl LocalWidget {
    /// A visible widget covering `bounds`.
    pub fn new(bounds: Rect) -> Self {
        Self {
            bounds,
            ..Default::default()
        }
    }

    /// Add capabilities.
    #[must_use]
    pub fn with_flags(mut self, flags: WidgetFlags) -> Self {
        self.flags |= flags;
        self
    }

    /// A focusable, interactable widget: a button.
    pub fn button(bounds: Rect) -> Self {
        Self::new(bounds).with_flags(WidgetFlags::FOCUSABLE | WidgetFlags::INTERACTABLE)
    }
}

/// A pointer event the tree was asked to dispatch.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PointerRecord {
    /// A pointer move.
    Move(PointerEvent),
    /// A pointer button edge.
    Button {
        /// The event, positioned at the cursor.
        event: PointerEvent,
        /// The button.
        button: Key,
        /// Press (`true`) or release.
        pressed: bool,
    },
}

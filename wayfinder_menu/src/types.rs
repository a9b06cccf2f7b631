// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the menu tree: identifiers, routes, visibility and focus records.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use wayfinder_input::key::UserIndex;

/// Identifier for a menu in a [`MenuTree`](crate::MenuTree).
///
/// A slot index plus a generation counter.
/// Removing a menu frees its slot; reusing the slot bumps the generation, so a stale
/// `MenuId` never aliases a different live menu.
/// Use [`MenuTree::is_alive`](crate::MenuTree::is_alive) to check liveness.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MenuId(pub(crate) u32, pub(crate) u32);

impl MenuId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Name of a child slot on a menu.
///
/// The empty route ([`Route::NONE`]) means "nothing": navigating to it closes the
/// active child.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Route(String);

impl Route {
    /// The empty route.
    pub const NONE: Self = Self(String::new());

    /// Create a route from a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Whether this is [`Route::NONE`].
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    /// The route name.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Route {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Route {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}

/// What a menu node is.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum MenuKind {
    /// A navigable menu. Starts collapsed and expects to be navigated to.
    #[default]
    Menu,
    /// A top-level HUD region owned by the HUD. Starts self-hit-test-invisible,
    /// never registers to a parent and ignores Back.
    SubHud,
}

impl MenuKind {
    /// Visibility a fresh menu of this kind starts with.
    pub const fn initial_visibility(self) -> Visibility {
        match self {
            Self::Menu => Visibility::Collapsed,
            Self::SubHud => Visibility::SelfHitTestInvisible,
        }
    }
}

/// Widget visibility as understood by the host UI.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Visibility {
    /// Drawn and hit-testable.
    #[default]
    Visible,
    /// Not drawn, takes no space.
    Collapsed,
    /// Not drawn, still takes space.
    Hidden,
    /// Drawn; neither this widget nor its children are hit-testable.
    HitTestInvisible,
    /// Drawn; this widget is not hit-testable but its children are.
    SelfHitTestInvisible,
}

impl Visibility {
    /// Whether the widget is drawn.
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Collapsed | Self::Hidden)
    }

    /// Whether the widget itself takes part in hit testing.
    pub const fn is_hit_testable(self) -> bool {
        matches!(self, Self::Visible)
    }
}

/// Why keyboard focus moved.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FocusCause {
    /// A pointer click.
    Mouse,
    /// The host's focus-navigation system (arrow keys, d-pad, tab).
    Navigation,
    /// Explicitly set by code.
    SetDirectly,
    /// Focus was cleared.
    Cleared,
    /// Another widget lost focus and focus fell back.
    OtherWidgetLostFocus,
    /// The window lost OS focus.
    WindowFocusLost,
    /// Not reported by the host.
    #[default]
    Unknown,
}

/// One keyboard focus transition, as reported by the host.
///
/// Paths run root to leaf; an empty path means no focus.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange<W> {
    /// The player whose focus moved.
    pub user: UserIndex,
    /// Why it moved.
    pub cause: FocusCause,
    /// Path to the previously focused widget.
    pub old_path: Vec<W>,
    /// Path to the newly focused widget.
    pub new_path: Vec<W>,
}

impl<W: Copy> FocusChange<W> {
    /// The newly focused widget, if any.
    pub fn new_leaf(&self) -> Option<W> {
        self.new_path.last().copied()
    }

    /// The previously focused widget, if any.
    pub fn old_leaf(&self) -> Option<W> {
        self.old_path.last().copied()
    }
}

/// Outcome of [`MenuTree::restore_focus`](crate::MenuTree::restore_focus).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum FocusRestore {
    /// Focus was set this frame.
    Focused,
    /// Focus could not be set this frame; the host was asked to set it next frame.
    Deferred,
    /// Nothing to focus, and that is expected (a HUD region with nothing open).
    Nothing,
    /// Nothing sensible to focus; the menu is misconfigured.
    Failed,
}

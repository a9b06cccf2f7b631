// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator traits: the host UI, visibility observers and per-menu behavior hooks.

use alloc::vec::Vec;
use core::fmt::Debug;

use wayfinder_input::key::UserIndex;

use crate::tree::MenuTree;
use crate::types::{FocusChange, MenuId, Route, Visibility};

/// What the menu tree needs from the host widget system.
///
/// The tree never owns widgets. It only stores `Widget` handles and asks the host about
/// them.
pub trait WidgetHost {
    /// Widget handle type.
    type Widget: Copy + Ord + Debug;

    /// Whether `widget` still exists.
    fn is_alive(&self, widget: Self::Widget) -> bool;

    /// Parent of `widget` in the UI tree.
    fn parent(&self, widget: Self::Widget) -> Option<Self::Widget>;

    /// Current visibility of `widget` itself (ancestors are not consulted).
    fn visibility(&self, widget: Self::Widget) -> Visibility;

    /// Change the visibility of `widget`.
    fn set_visibility(&mut self, widget: Self::Widget, visibility: Visibility);

    /// Try to give `user`'s keyboard focus to `widget` right now.
    ///
    /// Returns false when focus cannot be set this frame.
    fn set_keyboard_focus(&mut self, widget: Self::Widget, user: UserIndex) -> bool;

    /// Ask the host to give focus to `widget` on the next frame, replacing any earlier request.
    fn request_keyboard_focus(&mut self, widget: Self::Widget, user: UserIndex);

    /// Drop a pending [`request_keyboard_focus`](Self::request_keyboard_focus) for `user`.
    fn cancel_keyboard_focus_request(&mut self, _user: UserIndex) {}

    /// Show a navigation button as pressed (the active tab) or released.
    fn set_appear_pressed(&mut self, _widget: Self::Widget, _pressed: bool) {}

    /// Drain the focus transitions recorded since the last call, oldest first.
    ///
    /// Hosts that report focus changes through callbacks instead leave this empty.
    fn take_focus_changes(&mut self) -> Vec<FocusChange<Self::Widget>> {
        Vec::new()
    }

    /// Whether `widget`'s own visibility is a drawn state.
    fn is_visible(&self, widget: Self::Widget) -> bool {
        self.visibility(widget).is_visible()
    }

    /// Whether `ancestor` is a strict ancestor of `widget`.
    fn is_ancestor(&self, ancestor: Self::Widget, widget: Self::Widget) -> bool {
        let mut cursor = self.parent(widget);
        while let Some(w) = cursor {
            if w == ancestor {
                return true;
            }
            cursor = self.parent(w);
        }
        false
    }
}

/// Receives menu visibility and registration changes, synchronously.
///
/// `visibility_changed` fires exactly once per [`MenuTree::show`] or [`MenuTree::hide`]
/// call, after the host visibility has been updated.
pub trait MenuObserver<W> {
    /// `menu` was shown (`visible == true`) or hidden.
    fn visibility_changed(&mut self, _tree: &MenuTree<W>, _menu: MenuId, _visible: bool) {}

    /// A child was registered to or unregistered from `parent` at `route`.
    fn registrations_changed(&mut self, _tree: &MenuTree<W>, _parent: MenuId, _route: &Route) {}
}

/// An observer that ignores everything.
#[derive(Copy, Clone, Debug, Default)]
pub struct NoopObserver;

impl<W> MenuObserver<W> for NoopObserver {}

/// Per-menu hooks, run after the tree's own bookkeeping.
///
/// Hooks may navigate re-entrantly through [`MenuCx`]. While a hook runs, the menu's
/// behavior is detached, so a hook is never re-entered for the same menu.
pub trait MenuBehavior<W> {
    /// Runs after the menu became visible and observers were told.
    fn on_show(&mut self, _cx: &mut MenuCx<'_, W>) {}

    /// Runs after the menu was hidden and observers were told.
    fn on_hide(&mut self, _cx: &mut MenuCx<'_, W>) {}

    /// Runs at the end of a completed navigation on this menu.
    fn after_navigate(&mut self, _cx: &mut MenuCx<'_, W>, _old_route: &Route, _new_route: &Route) {}
}

/// Access to the tree from inside a [`MenuBehavior`] hook.
pub struct MenuCx<'a, W> {
    /// The tree.
    pub tree: &'a mut MenuTree<W>,
    /// The host UI.
    pub host: &'a mut dyn WidgetHost<Widget = W>,
    /// The observer the current operation reports to.
    pub observer: &'a mut dyn MenuObserver<W>,
    /// The menu whose hook is running.
    pub menu: MenuId,
}

impl<W> Debug for MenuCx<'_, W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("MenuCx")
            .field("menu", &self.menu)
            .finish_non_exhaustive()
    }
}

impl<W: Copy + Ord + Debug + 'static> MenuCx<'_, W> {
    /// Ask this menu's parent to navigate to `route`. See [`MenuTree::request_navigation`].
    pub fn request_navigation(&mut self, route: &Route) -> Option<MenuId> {
        self.tree
            .request_navigation(self.menu, route, &mut *self.host, &mut *self.observer)
    }

    /// Navigate this menu's own children. See [`MenuTree::navigate_to_route`].
    pub fn navigate_to_route(&mut self, route: &Route) -> Option<MenuId> {
        self.tree
            .navigate_to_route(self.menu, route, &mut *self.host, &mut *self.observer)
    }
}

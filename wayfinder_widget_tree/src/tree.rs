// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, visibility, hit testing and focus.

use alloc::collections::{BTreeMap, BTreeSet};
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use wayfinder_input::device::InputDeviceTracker;
use wayfinder_input::event::{InputEvent, PointerEvent};
use wayfinder_input::key::{Key, UserIndex};
use wayfinder_menu::{FocusCause, FocusChange, Visibility};

use crate::types::{LocalWidget, PointerRecord, WidgetFlags, WidgetId};

/// Results of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched widget.
    pub widget: WidgetId,
    /// Path from root to widget (inclusive).
    pub path: Vec<WidgetId>,
}

#[derive(Clone, Debug)]
struct Widget {
    generation: u32,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    local: LocalWidget,
}

#[derive(Clone, Debug, Default)]
struct UserState {
    focus: Option<WidgetId>,
    pending_focus: Option<WidgetId>,
    pointer: Option<Point>,
    player_screen: Option<Rect>,
}

/// An in-memory widget tree with per-user focus and pointer state.
pub struct WidgetTree {
    widgets: Vec<Option<Widget>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    users: BTreeMap<UserIndex, UserState>,
    viewport: Option<Rect>,
    foreground: bool,
    focus_blocked: bool,
    pressed: BTreeSet<WidgetId>,
    focus_changes: Vec<FocusChange<WidgetId>>,
    pointer_log: Vec<PointerRecord>,
    devices: InputDeviceTracker,
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.widgets.len();
        let alive = self.widgets.iter().filter(|w| w.is_some()).count();
        f.debug_struct("WidgetTree")
            .field("widgets_total", &total)
            .field("widgets_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("users", &self.users.len())
            .field("foreground", &self.foreground)
            .field("focus_blocked", &self.focus_blocked)
            .finish_non_exhaustive()
    }
}

impl WidgetTree {
    /// Create an empty tree. The application starts in the foreground.
    pub fn new() -> Self {
        Self {
            widgets: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            users: BTreeMap::new(),
            viewport: None,
            foreground: true,
            focus_blocked: false,
            pressed: BTreeSet::new(),
            focus_changes: Vec::new(),
            pointer_log: Vec::new(),
            devices: InputDeviceTracker::new(),
        }
    }

    /// Insert a widget under `parent` (or as a root).
    pub fn insert(&mut self, parent: Option<WidgetId>, local: LocalWidget) -> WidgetId {
        let widget = |generation| Widget {
            generation,
            parent: None,
            children: Vec::new(),
            local,
        };
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.widgets[idx] = Some(widget(generation));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.widgets.push(Some(widget(generation)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId stores 32-bit slot indices."
            )]
            ((self.widgets.len() - 1) as u32, generation)
        };
        let id = WidgetId::new(idx, generation);
        if let Some(p) = parent {
            self.link_parent(id, p);
        }
        id
    }

    /// Remove a widget and its subtree.
    ///
    /// Users focused inside the subtree lose focus with [`FocusCause::Cleared`].
    pub fn remove(&mut self, id: WidgetId) {
        if !self.is_alive(id) {
            return;
        }
        let users: Vec<UserIndex> = self
            .users
            .iter()
            .filter(|(_, s)| s.focus.is_some_and(|f| f == id || self.is_ancestor_of(id, f)))
            .map(|(u, _)| *u)
            .collect();
        for user in users {
            self.clear_focus(user, FocusCause::Cleared);
        }
        self.remove_subtree(id);
    }

    fn remove_subtree(&mut self, id: WidgetId) {
        if let Some(parent) = self.widget(id).and_then(|w| w.parent) {
            self.unlink_parent(id, parent);
        }
        let children = self.widget(id).map(|w| w.children.clone()).unwrap_or_default();
        for child in children {
            self.remove_subtree(child);
        }
        self.pressed.remove(&id);
        for state in self.users.values_mut() {
            if state.pending_focus == Some(id) {
                state.pending_focus = None;
            }
        }
        self.widgets[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Reparent `id` under `new_parent`.
    pub fn reparent(&mut self, id: WidgetId, new_parent: Option<WidgetId>) {
        if !self.is_alive(id) {
            return;
        }
        if let Some(parent) = self.widget(id).and_then(|w| w.parent) {
            self.unlink_parent(id, parent);
        }
        if let Some(p) = new_parent {
            self.link_parent(id, p);
        }
    }

    /// Whether `id` refers to a live widget.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.widget(id).is_some()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.widgets.iter().filter(|w| w.is_some()).count()
    }

    /// Whether the tree has no live widgets.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Local state of a live widget.
    pub fn local(&self, id: WidgetId) -> Option<&LocalWidget> {
        self.widget(id).map(|w| &w.local)
    }

    /// Parent of a live widget.
    pub fn parent_of(&self, id: WidgetId) -> Option<WidgetId> {
        self.widget(id)?.parent
    }

    /// Children of a live widget, in insertion order.
    pub fn children_of(&self, id: WidgetId) -> &[WidgetId] {
        self.widget(id).map(|w| w.children.as_slice()).unwrap_or(&[])
    }

    /// Update bounds.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
        if let Some(w) = self.widget_mut(id) {
            w.local.bounds = bounds;
        }
    }

    /// Update z-index.
    pub fn set_z_index(&mut self, id: WidgetId, z: i32) {
        if let Some(w) = self.widget_mut(id) {
            w.local.z_index = z;
        }
    }

    /// Update flags.
    pub fn set_flags(&mut self, id: WidgetId, flags: WidgetFlags) {
        if let Some(w) = self.widget_mut(id) {
            w.local.flags = flags;
        }
    }

    /// Update the widget's own visibility.
    pub fn set_widget_visibility(&mut self, id: WidgetId, visibility: Visibility) {
        if let Some(w) = self.widget_mut(id) {
            w.local.visibility = visibility;
        }
    }

    /// Whether the widget and all of its ancestors are drawn.
    pub fn is_effectively_visible(&self, id: WidgetId) -> bool {
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let Some(w) = self.widget(c) else {
                return false;
            };
            if !w.local.visibility.is_visible() {
                return false;
            }
            cursor = w.parent;
        }
        true
    }

    /// Whether the widget receives hits.
    ///
    /// The widget itself must be [`Visibility::Visible`]; ancestors may also be
    /// [`Visibility::SelfHitTestInvisible`], which only excludes the ancestor itself.
    pub fn is_hit_testable(&self, id: WidgetId) -> bool {
        let Some(w) = self.widget(id) else {
            return false;
        };
        if !w.local.visibility.is_hit_testable() {
            return false;
        }
        let mut cursor = w.parent;
        while let Some(c) = cursor {
            let Some(a) = self.widget(c) else {
                return false;
            };
            if !matches!(
                a.local.visibility,
                Visibility::Visible | Visibility::SelfHitTestInvisible
            ) {
                return false;
            }
            cursor = a.parent;
        }
        true
    }

    /// Topmost hit-testable widget containing `pt`.
    ///
    /// Higher z-index wins; among equal z the newer widget wins.
    pub fn hit_test(&self, pt: Point) -> Option<Hit> {
        let mut best: Option<(WidgetId, i32)> = None;
        for id in self.live_ids() {
            let Some(w) = self.widget(id) else {
                continue;
            };
            if !w.local.bounds.contains(pt) || !self.is_hit_testable(id) {
                continue;
            }
            let z = w.local.z_index;
            match best {
                None => best = Some((id, z)),
                Some((best_id, z_best)) => {
                    if z > z_best || (z == z_best && id.is_newer_than(best_id)) {
                        best = Some((id, z));
                    }
                }
            }
        }
        best.map(|(widget, _)| Hit {
            widget,
            path: self.path_to_root(widget),
        })
    }

    /// Whether any hit-testable widget under `pt` is [`WidgetFlags::INTERACTABLE`].
    pub fn is_interactable_at(&self, pt: Point) -> bool {
        self.live_ids().any(|id| {
            self.widget(id).is_some_and(|w| {
                w.local.flags.contains(WidgetFlags::INTERACTABLE)
                    && w.local.bounds.contains(pt)
                    && self.is_hit_testable(id)
            })
        })
    }

    /// Path from the root down to `id` (inclusive). Empty for a dead id.
    pub fn path_to_root(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut cursor = Some(id);
        while let Some(c) = cursor {
            let Some(w) = self.widget(c) else {
                break;
            };
            out.push(c);
            cursor = w.parent;
        }
        out.reverse();
        out
    }

    // --- Focus ---

    /// The widget `user` currently focuses.
    pub fn focus(&self, user: UserIndex) -> Option<WidgetId> {
        self.users.get(&user).and_then(|s| s.focus)
    }

    /// Focus `widget` for `user`.
    ///
    /// Fails while focus is blocked, or when the widget is dead, not focusable or not
    /// effectively visible. Setting the current focus again succeeds without a change record.
    pub fn set_focus(&mut self, widget: WidgetId, user: UserIndex, cause: FocusCause) -> bool {
        if self.focus_blocked || !self.can_focus(widget) {
            return false;
        }
        let old = self.focus(user);
        if old == Some(widget) {
            return true;
        }
        self.users.entry(user).or_default().focus = Some(widget);
        self.record_focus_change(user, cause, old, Some(widget));
        true
    }

    /// Drop `user`'s focus.
    pub fn clear_focus(&mut self, user: UserIndex, cause: FocusCause) {
        let Some(state) = self.users.get_mut(&user) else {
            return;
        };
        if let Some(old) = state.focus.take() {
            self.record_focus_change(user, cause, Some(old), None);
        }
    }

    /// Whether `widget` could take focus right now, ignoring the focus block.
    pub fn can_focus(&self, widget: WidgetId) -> bool {
        self.local(widget)
            .is_some_and(|l| l.flags.contains(WidgetFlags::FOCUSABLE))
            && self.is_effectively_visible(widget)
    }

    /// Refuse all focus changes until unblocked, like a host mid-frame.
    pub fn set_focus_blocked(&mut self, blocked: bool) {
        self.focus_blocked = blocked;
    }

    /// Whether focus changes are currently refused.
    pub fn is_focus_blocked(&self) -> bool {
        self.focus_blocked
    }

    /// Queue a focus request for the next [`advance_frame`](Self::advance_frame).
    ///
    /// Replaces any earlier request for `user`.
    pub fn request_focus(&mut self, widget: WidgetId, user: UserIndex) {
        self.users.entry(user).or_default().pending_focus = Some(widget);
    }

    /// Drop `user`'s queued focus request.
    pub fn cancel_focus_request(&mut self, user: UserIndex) {
        if let Some(state) = self.users.get_mut(&user) {
            state.pending_focus = None;
        }
    }

    /// `user`'s queued focus request.
    pub fn pending_focus(&self, user: UserIndex) -> Option<WidgetId> {
        self.users.get(&user).and_then(|s| s.pending_focus)
    }

    /// Apply queued focus requests.
    ///
    /// Requests that cannot be applied yet stay queued while their widget is alive.
    pub fn advance_frame(&mut self) {
        let pending: Vec<(UserIndex, WidgetId)> = self
            .users
            .iter()
            .filter_map(|(u, s)| s.pending_focus.map(|w| (*u, w)))
            .collect();
        for (user, widget) in pending {
            let done = !self.is_alive(widget) || self.set_focus(widget, user, FocusCause::SetDirectly);
            if done && let Some(state) = self.users.get_mut(&user) {
                state.pending_focus = None;
            }
        }
    }

    /// Drain the recorded focus transitions, oldest first.
    pub fn take_focus_changes(&mut self) -> Vec<FocusChange<WidgetId>> {
        core::mem::take(&mut self.focus_changes)
    }

    fn record_focus_change(
        &mut self,
        user: UserIndex,
        cause: FocusCause,
        old: Option<WidgetId>,
        new: Option<WidgetId>,
    ) {
        let old_path = old.map(|w| self.path_to_root(w)).unwrap_or_default();
        let new_path = new.map(|w| self.path_to_root(w)).unwrap_or_default();
        self.focus_changes.push(FocusChange {
            user,
            cause,
            old_path,
            new_path,
        });
    }

    // --- Pressed appearance ---

    /// Show `widget` as pressed or released.
    pub fn set_pressed(&mut self, widget: WidgetId, pressed: bool) {
        if pressed && self.is_alive(widget) {
            self.pressed.insert(widget);
        } else {
            self.pressed.remove(&widget);
        }
    }

    /// Whether `widget` is shown as pressed.
    pub fn is_pressed(&self, widget: WidgetId) -> bool {
        self.pressed.contains(&widget)
    }

    // --- Pointer, screen and device state ---

    /// `user`'s pointer position, once known.
    pub fn pointer_position(&self, user: UserIndex) -> Option<Point> {
        self.users.get(&user).and_then(|s| s.pointer)
    }

    /// Move `user`'s pointer without dispatching anything.
    pub fn set_pointer_position(&mut self, user: UserIndex, position: Point) {
        self.users.entry(user).or_default().pointer = Some(position);
    }

    /// `user`'s region of the screen.
    pub fn player_screen(&self, user: UserIndex) -> Option<Rect> {
        self.users.get(&user).and_then(|s| s.player_screen)
    }

    /// Set or clear `user`'s region of the screen.
    pub fn set_player_screen(&mut self, user: UserIndex, rect: Option<Rect>) {
        self.users.entry(user).or_default().player_screen = rect;
    }

    /// The whole viewport.
    pub fn viewport(&self) -> Option<Rect> {
        self.viewport
    }

    /// Set or clear the whole viewport.
    pub fn set_viewport(&mut self, rect: Option<Rect>) {
        self.viewport = rect;
    }

    /// Whether the window has OS focus.
    pub fn is_foreground(&self) -> bool {
        self.foreground
    }

    /// Set whether the window has OS focus.
    pub fn set_foreground(&mut self, foreground: bool) {
        self.foreground = foreground;
    }

    /// The device tracker fed by dispatched pointer moves and [`observe_input`](Self::observe_input).
    pub fn devices(&self) -> &InputDeviceTracker {
        &self.devices
    }

    /// Mutable access to the device tracker, for subscribing.
    pub fn devices_mut(&mut self) -> &mut InputDeviceTracker {
        &mut self.devices
    }

    /// Feed a raw platform event to the device tracker.
    pub fn observe_input(&mut self, event: &InputEvent) {
        self.devices.observe(event);
    }

    /// Pointer events dispatched so far.
    pub fn pointer_log(&self) -> &[PointerRecord] {
        &self.pointer_log
    }

    /// Drain the pointer log.
    pub fn take_pointer_log(&mut self) -> Vec<PointerRecord> {
        core::mem::take(&mut self.pointer_log)
    }

    /// Route a pointer move. Returns whether a widget was under it.
    pub fn dispatch_pointer_move(&mut self, event: &PointerEvent) -> bool {
        self.pointer_log.push(PointerRecord::Move(*event));
        self.devices.observe(&InputEvent::PointerMove(*event));
        self.hit_test(event.position).is_some()
    }

    /// Route a pointer button edge. Returns whether a widget was under it.
    ///
    /// A press focuses the nearest focusable widget along the hit path.
    pub fn dispatch_pointer_button(
        &mut self,
        event: &PointerEvent,
        button: Key,
        pressed: bool,
    ) -> bool {
        self.pointer_log.push(PointerRecord::Button {
            event: *event,
            button,
            pressed,
        });
        let Some(hit) = self.hit_test(event.position) else {
            return false;
        };
        if pressed
            && let Some(target) = hit.path.iter().rev().copied().find(|w| self.can_focus(*w))
        {
            self.set_focus(target, event.user, FocusCause::Mouse);
        }
        true
    }

    // --- Internals ---

    fn live_ids(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.widgets.iter().enumerate().filter_map(|(i, w)| {
            w.as_ref().map(|w| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "WidgetId stores 32-bit slot indices."
                )]
                WidgetId::new(i as u32, w.generation)
            })
        })
    }

    fn is_ancestor_of(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut cursor = self.parent_of(id);
        while let Some(c) = cursor {
            if c == ancestor {
                return true;
            }
            cursor = self.parent_of(c);
        }
        false
    }

    fn widget(&self, id: WidgetId) -> Option<&Widget> {
        let w = self.widgets.get(id.idx())?.as_ref()?;
        (w.generation == id.1).then_some(w)
    }

    fn widget_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        let w = self.widgets.get_mut(id.idx())?.as_mut()?;
        (w.generation == id.1).then_some(w)
    }

    fn link_parent(&mut self, id: WidgetId, parent: WidgetId) {
        if !self.is_alive(parent) || parent == id || self.is_ancestor_of(id, parent) {
            return;
        }
        if let Some(p) = self.widget_mut(parent) {
            p.children.push(id);
        }
        if let Some(w) = self.widget_mut(id) {
            w.parent = Some(parent);
        }
    }

    fn unlink_parent(&mut self, id: WidgetId, parent: WidgetId) {
        if let Some(p) = self.widget_mut(parent) {
            p.children.retain(|c| *c != id);
        }
        if let Some(w) = self.widget_mut(id) {
            w.parent = None;
        }
    }
}

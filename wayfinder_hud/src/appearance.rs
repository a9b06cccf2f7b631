// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor appearance state for presentation layers.

use wayfinder_input::device::InputDevice;

bitflags::bitflags! {
    /// Situations a custom cursor may want to reflect.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CursorContexts: u8 {
        /// The pawn wants the cursor pinned to the screen center.
        const PAWN_DESIRES_CENTERED_WORLD_CURSOR = 0b0000_0001;
        /// A menu is open on the player-screen HUD.
        const PLAYER_SCREEN_HUD_MENU_VISIBLE     = 0b0000_0010;
        /// A menu is open on the viewport HUD.
        const PLAYER_VIEWPORT_HUD_MENU_VISIBLE   = 0b0000_0100;
        /// A menu is open on the pawn HUD.
        const PAWN_HUD_MENU_VISIBLE              = 0b0000_1000;
        /// A menu is open on any HUD region.
        const ANY_SUB_HUD_MENU_VISIBLE           = 0b0001_0000;
    }
}

impl Default for CursorContexts {
    fn default() -> Self {
        Self::empty()
    }
}

/// What a cursor renderer needs to pick its look.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct AppearanceSnapshot {
    /// Active contexts.
    pub contexts: CursorContexts,
    /// Whether the cursor is pinned to the screen center.
    pub frozen: bool,
    /// The owning player's current input device.
    pub device: InputDevice,
}

/// Handle returned by [`CursorAppearance::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AppearanceListenerId(u64);

type AppearanceListener = Box<dyn FnMut(&AppearanceSnapshot)>;

/// Cursor appearance state with change subscribers.
///
/// Subscribers run synchronously, in subscription order, once per actual change.
#[derive(Default)]
pub struct CursorAppearance {
    state: AppearanceSnapshot,
    listeners: Vec<(AppearanceListenerId, AppearanceListener)>,
    next_id: u64,
}

impl core::fmt::Debug for CursorAppearance {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CursorAppearance")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl CursorAppearance {
    /// No contexts, not frozen, no device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn snapshot(&self) -> AppearanceSnapshot {
        self.state
    }

    /// Active contexts.
    pub fn contexts(&self) -> CursorContexts {
        self.state.contexts
    }

    /// Whether all of `contexts` are active.
    pub fn has(&self, contexts: CursorContexts) -> bool {
        self.state.contexts.contains(contexts)
    }

    /// Add contexts. Returns whether the set changed.
    pub fn add(&mut self, contexts: CursorContexts) -> bool {
        self.set_context(contexts, true)
    }

    /// Remove contexts. Returns whether the set changed.
    pub fn remove(&mut self, contexts: CursorContexts) -> bool {
        self.set_context(contexts, false)
    }

    /// Add or remove contexts. Returns whether the set changed.
    pub fn set_context(&mut self, contexts: CursorContexts, on: bool) -> bool {
        let mut next = self.state.contexts;
        next.set(contexts, on);
        if next == self.state.contexts {
            return false;
        }
        self.state.contexts = next;
        self.notify();
        true
    }

    /// Set the frozen flag. Returns whether it changed.
    pub fn set_frozen(&mut self, frozen: bool) -> bool {
        if self.state.frozen == frozen {
            return false;
        }
        self.state.frozen = frozen;
        self.notify();
        true
    }

    /// Set the owning player's device. Returns whether it changed.
    pub fn set_device(&mut self, device: InputDevice) -> bool {
        if self.state.device == device {
            return false;
        }
        self.state.device = device;
        self.notify();
        true
    }

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&AppearanceSnapshot) + 'static) -> AppearanceListenerId {
        let id = AppearanceListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns whether it was registered.
    pub fn unsubscribe(&mut self, id: AppearanceListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    fn notify(&mut self) {
        let state = self.state;
        for (_, listener) in &mut self.listeners {
            listener(&state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn reports_only_real_changes() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut appearance = CursorAppearance::new();
        let sink = Rc::clone(&seen);
        appearance.subscribe(move |s| sink.borrow_mut().push(*s));

        assert!(appearance.add(CursorContexts::PAWN_HUD_MENU_VISIBLE));
        assert!(!appearance.add(CursorContexts::PAWN_HUD_MENU_VISIBLE), "already present");
        assert!(appearance.set_frozen(true));
        assert!(!appearance.set_frozen(true));
        assert!(appearance.set_device(InputDevice::Gamepad));
        assert!(appearance.remove(CursorContexts::PAWN_HUD_MENU_VISIBLE));
        assert!(!appearance.remove(CursorContexts::PAWN_HUD_MENU_VISIBLE), "already gone");

        let seen = seen.borrow();
        assert_eq!(seen.len(), 4, "one notification per change");
        assert!(seen[1].frozen);
        assert_eq!(seen[3].device, InputDevice::Gamepad);
        assert!(seen[3].contexts.is_empty());
    }

    #[test]
    fn unsubscribed_listeners_stay_quiet() {
        let count = Rc::new(RefCell::new(0));
        let mut appearance = CursorAppearance::new();
        let sink = Rc::clone(&count);
        let id = appearance.subscribe(move |_| *sink.borrow_mut() += 1);
        appearance.set_frozen(true);
        assert!(appearance.unsubscribe(id));
        assert!(!appearance.unsubscribe(id), "second removal is a no-op");
        appearance.set_frozen(false);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn set_context_handles_several_flags() {
        let mut appearance = CursorAppearance::new();
        let both = CursorContexts::PAWN_HUD_MENU_VISIBLE | CursorContexts::ANY_SUB_HUD_MENU_VISIBLE;
        assert!(appearance.set_context(both, true));
        assert!(appearance.has(both));
        assert!(appearance.set_context(CursorContexts::PAWN_HUD_MENU_VISIBLE, false));
        assert_eq!(appearance.contexts(), CursorContexts::ANY_SUB_HUD_MENU_VISIBLE);
    }
}

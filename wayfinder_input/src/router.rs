// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Navigation key router: physical keys → focus-navigation directions and actions.
//!
//! ## Rules
//!
//! Every key maps to at most one rule, either a [`NavDirection`] or a [`UiAction`].
//! Binding a key that already has a rule is a configuration error: the new mapping is
//! rejected and logged, and the first rule stays in force.
//!
//! ## Shift+Next
//!
//! A key bound to [`NavDirection::Next`] also acts as [`NavDirection::Previous`] while
//! Shift is held and no other modifier is. With Ctrl, Alt or Cmd held as well the key
//! stays `Next`.
//!
//! ## Minimal example
//!
//! ```
//! use wayfinder_input::event::KeyEvent;
//! use wayfinder_input::key::{Key, Modifiers, UserIndex};
//! use wayfinder_input::router::{NavDirection, NavigationKeyRouter, UiAction};
//!
//! let mut router = NavigationKeyRouter::new();
//! router.bind_direction(Key::Tab, NavDirection::Next).unwrap();
//! router.bind_action(Key::Enter, UiAction::Accept).unwrap();
//! assert!(router.bind_action(Key::Tab, UiAction::Back).is_err());
//!
//! let ctrl_shift_tab = KeyEvent::new(Key::Tab, UserIndex(0))
//!     .with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
//! assert_eq!(router.direction_for_key(&ctrl_shift_tab), Some(NavDirection::Next));
//! assert_eq!(router.action_for_key(Key::Enter), Some(UiAction::Accept));
//! ```

use alloc::collections::BTreeMap;

use crate::action::NavAction;
use crate::binding::BindingSource;
use crate::event::{AnalogInputEvent, KeyEvent};
use crate::key::{Key, Modifiers};

/// Focus-navigation direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NavDirection {
    /// Spatially up.
    Up,
    /// Spatially down.
    Down,
    /// Spatially left.
    Left,
    /// Spatially right.
    Right,
    /// Forward in tab order.
    Next,
    /// Backward in tab order.
    Previous,
}

/// Non-directional navigation action.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum UiAction {
    /// Activate the focused widget.
    Accept,
    /// Back out of the current context.
    Back,
}

/// What a key is bound to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeyRule {
    /// A navigation direction.
    Direction(NavDirection),
    /// A navigation action.
    Action(UiAction),
}

/// Errors building the router's key rules.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    /// The key already has a rule.
    #[error("key {key:?} is already bound to {existing:?}, cannot also bind {rejected:?}")]
    DuplicateKey {
        /// The contested key.
        key: Key,
        /// The rule that stays in force.
        existing: KeyRule,
        /// The rule that was rejected.
        rejected: KeyRule,
    },
}

/// Maps keys to navigation rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavigationKeyRouter {
    rules: BTreeMap<Key, KeyRule>,
}

/// Actions installed as directions, in installation order.
const DIRECTION_ACTIONS: [(NavAction, NavDirection); 6] = [
    (NavAction::Up, NavDirection::Up),
    (NavAction::Down, NavDirection::Down),
    (NavAction::Left, NavDirection::Left),
    (NavAction::Right, NavDirection::Right),
    (NavAction::Previous, NavDirection::Previous),
    (NavAction::Next, NavDirection::Next),
];

/// Actions installed as [`UiAction`]s, after the directions.
const UI_ACTIONS: [(NavAction, UiAction); 2] = [
    (NavAction::Select, UiAction::Accept),
    (NavAction::Back, UiAction::Back),
];

impl NavigationKeyRouter {
    /// A router with no rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a router from the standard navigation actions in `source`.
    ///
    /// See [`install`](Self::install).
    pub fn from_bindings(source: &impl BindingSource) -> Result<Self, BindingError> {
        let mut router = Self::new();
        router.install(source)?;
        Ok(router)
    }

    /// Install rules for the standard navigation actions found in `source`.
    ///
    /// Directions are installed first (Up, Down, Left, Right, Previous, Next), then
    /// Select as [`UiAction::Accept`] and Back as [`UiAction::Back`]. Modifiers on the
    /// configured chords are ignored; rules match on the key alone.
    ///
    /// Conflicting keys are skipped and installation continues; the first conflict is
    /// returned so callers can surface the misconfiguration.
    pub fn install(&mut self, source: &impl BindingSource) -> Result<(), BindingError> {
        let mut first_error = None;
        let rules = DIRECTION_ACTIONS
            .iter()
            .map(|&(a, d)| (a, KeyRule::Direction(d)))
            .chain(UI_ACTIONS.iter().map(|&(a, u)| (a, KeyRule::Action(u))));
        for (action, rule) in rules {
            for chord in source.bindings_for(action.name()) {
                if let Err(e) = self.bind(chord.key, rule) {
                    first_error.get_or_insert(e);
                }
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Bind `key` to `rule`.
    pub fn bind(&mut self, key: Key, rule: KeyRule) -> Result<(), BindingError> {
        if let Some(&existing) = self.rules.get(&key) {
            log::error!("navigation key {key:?} is already bound to {existing:?}; rejecting {rule:?}");
            return Err(BindingError::DuplicateKey {
                key,
                existing,
                rejected: rule,
            });
        }
        self.rules.insert(key, rule);
        Ok(())
    }

    /// Bind `key` to a direction.
    pub fn bind_direction(&mut self, key: Key, direction: NavDirection) -> Result<(), BindingError> {
        self.bind(key, KeyRule::Direction(direction))
    }

    /// Bind `key` to an action.
    pub fn bind_action(&mut self, key: Key, action: UiAction) -> Result<(), BindingError> {
        self.bind(key, KeyRule::Action(action))
    }

    /// Remove the rule for `key`, if any.
    pub fn unbind(&mut self, key: Key) -> Option<KeyRule> {
        self.rules.remove(&key)
    }

    /// The raw rule for `key`.
    pub fn rule_for_key(&self, key: Key) -> Option<KeyRule> {
        self.rules.get(&key).copied()
    }

    /// Whether `key` is bound to any direction.
    pub fn is_direction_key(&self, key: Key) -> bool {
        matches!(self.rules.get(&key), Some(KeyRule::Direction(_)))
    }

    /// The navigation direction for a key event, or `None` if the key is not a direction.
    pub fn direction_for_key(&self, event: &KeyEvent) -> Option<NavDirection> {
        match self.rules.get(&event.key)? {
            KeyRule::Direction(NavDirection::Next) => {
                let others = Modifiers::CTRL | Modifiers::ALT | Modifiers::CMD;
                if event.modifiers.contains(Modifiers::SHIFT) && !event.modifiers.intersects(others) {
                    Some(NavDirection::Previous)
                } else {
                    Some(NavDirection::Next)
                }
            }
            KeyRule::Direction(d) => Some(*d),
            KeyRule::Action(_) => None,
        }
    }

    /// The navigation action for `key`, or `None` if the key is not an action.
    pub fn action_for_key(&self, key: Key) -> Option<UiAction> {
        match self.rules.get(&key)? {
            KeyRule::Action(a) => Some(*a),
            KeyRule::Direction(_) => None,
        }
    }

    /// Analog input never produces discrete navigation; stick-driven focus moves are
    /// left to the host's own repeat logic.
    pub fn direction_for_analog(&self, _event: &AnalogInputEvent) -> Option<NavDirection> {
        None
    }

    /// Number of bound keys.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no keys are bound.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::BindingStore;
    use crate::key::{KeyChord, UserIndex};
    use alloc::vec;

    fn ev(key: Key, modifiers: Modifiers) -> KeyEvent {
        KeyEvent::new(key, UserIndex(0)).with_modifiers(modifiers)
    }

    #[test]
    fn defaults_install_cleanly() {
        let router = NavigationKeyRouter::from_bindings(&BindingStore::with_defaults()).unwrap();
        assert_eq!(router.direction_for_key(&ev(Key::Up, Modifiers::empty())), Some(NavDirection::Up));
        assert_eq!(
            router.direction_for_key(&ev(Key::GamepadDPadLeft, Modifiers::empty())),
            Some(NavDirection::Left)
        );
        assert_eq!(router.action_for_key(Key::GamepadFaceButtonBottom), Some(UiAction::Accept));
        assert_eq!(router.action_for_key(Key::Escape), Some(UiAction::Back));
        // Extended actions are not navigation rules.
        assert_eq!(router.rule_for_key(Key::Char('R')), None);
        // Directions are not actions and vice versa.
        assert_eq!(router.action_for_key(Key::Up), None);
        assert_eq!(router.direction_for_key(&ev(Key::Enter, Modifiers::empty())), None);
    }

    #[test]
    fn shift_next_is_previous_only_without_other_modifiers() {
        let router = NavigationKeyRouter::from_bindings(&BindingStore::with_defaults()).unwrap();
        let dir = |m| router.direction_for_key(&ev(Key::Tab, m));
        assert_eq!(dir(Modifiers::empty()), Some(NavDirection::Next));
        assert_eq!(dir(Modifiers::SHIFT), Some(NavDirection::Previous));
        assert_eq!(dir(Modifiers::SHIFT | Modifiers::CTRL), Some(NavDirection::Next));
        assert_eq!(dir(Modifiers::SHIFT | Modifiers::ALT), Some(NavDirection::Next));
        assert_eq!(dir(Modifiers::CTRL), Some(NavDirection::Next));
    }

    #[test]
    fn duplicate_key_is_rejected_first_rule_wins() {
        let mut store = BindingStore::with_defaults();
        // Enter as both Up and Select: Up installs first.
        store.add("NavUp", KeyChord::new(Key::Enter));
        let mut router = NavigationKeyRouter::new();
        let err = router.install(&store).unwrap_err();
        assert_eq!(
            err,
            BindingError::DuplicateKey {
                key: Key::Enter,
                existing: KeyRule::Direction(NavDirection::Up),
                rejected: KeyRule::Action(UiAction::Accept),
            }
        );
        assert_eq!(router.rule_for_key(Key::Enter), Some(KeyRule::Direction(NavDirection::Up)));
        // The rest of the configuration still installed.
        assert_eq!(router.action_for_key(Key::SpaceBar), Some(UiAction::Accept));
        assert_eq!(router.action_for_key(Key::Escape), Some(UiAction::Back));
    }

    #[test]
    fn explicit_previous_key_is_allowed() {
        let mut store = BindingStore::with_defaults();
        store.set("NavPrevious", vec![KeyChord::new(Key::Char('Q'))]);
        let router = NavigationKeyRouter::from_bindings(&store).unwrap();
        assert_eq!(
            router.direction_for_key(&ev(Key::Char('Q'), Modifiers::empty())),
            Some(NavDirection::Previous)
        );
        // Shift+Tab still works alongside it.
        assert_eq!(router.direction_for_key(&ev(Key::Tab, Modifiers::SHIFT)), Some(NavDirection::Previous));
    }

    #[test]
    fn analog_never_navigates() {
        let router = NavigationKeyRouter::from_bindings(&BindingStore::with_defaults()).unwrap();
        let e = AnalogInputEvent::new(Key::GamepadLeftY, UserIndex(0), 1.0);
        assert_eq!(router.direction_for_analog(&e), None);
    }

    #[test]
    fn unbind_frees_key() {
        let mut router = NavigationKeyRouter::new();
        router.bind_direction(Key::Tab, NavDirection::Next).unwrap();
        assert_eq!(router.unbind(Key::Tab), Some(KeyRule::Direction(NavDirection::Next)));
        assert!(router.is_empty(), "no rules left");
        router.bind_action(Key::Tab, UiAction::Accept).unwrap();
        assert_eq!(router.len(), 1);
    }
}

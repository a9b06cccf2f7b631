// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named navigation actions and their default key bindings.
//!
//! The eight standard actions drive focus navigation. The three extended actions
//! are conveniences commonly bound by games (open main menu, reset, extra).
//! `Previous` is deliberately unbound by default: the `Next` key doubles as
//! `Previous` while Shift is held (see [`NavigationKeyRouter`](crate::router::NavigationKeyRouter)).

use crate::key::Key;

/// A named navigation action stored in the binding configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NavAction {
    /// Close the current menu / go back.
    Back,
    /// Move focus down.
    Down,
    /// Move focus left.
    Left,
    /// Move focus to the next widget in tab order.
    Next,
    /// Move focus to the previous widget in tab order.
    Previous,
    /// Move focus right.
    Right,
    /// Activate the focused widget.
    Select,
    /// Move focus up.
    Up,
    /// Game-defined secondary action.
    Extra,
    /// Toggle the main menu.
    MainMenu,
    /// Reset the current setting or selection.
    Reset,
}

impl NavAction {
    /// The actions focus navigation depends on.
    pub const STANDARD: [Self; 8] = [
        Self::Back,
        Self::Down,
        Self::Left,
        Self::Next,
        Self::Previous,
        Self::Right,
        Self::Select,
        Self::Up,
    ];

    /// Optional actions seeded alongside the standard ones.
    pub const EXTENDED: [Self; 3] = [Self::Extra, Self::MainMenu, Self::Reset];

    /// Name under which the action is stored in a [`BindingStore`](crate::binding::BindingStore).
    pub const fn name(self) -> &'static str {
        match self {
            Self::Back => "NavBack",
            Self::Down => "NavDown",
            Self::Left => "NavLeft",
            Self::Next => "NavNext",
            Self::Previous => "NavPrevious",
            Self::Right => "NavRight",
            Self::Select => "NavSelect",
            Self::Up => "NavUp",
            Self::Extra => "NavExtra",
            Self::MainMenu => "NavMainMenu",
            Self::Reset => "NavReset",
        }
    }

    /// Look an action up by its stored name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::STANDARD
            .into_iter()
            .chain(Self::EXTENDED)
            .find(|a| a.name() == name)
    }

    /// Keys bound to this action on first run.
    pub const fn default_keys(self) -> &'static [Key] {
        match self {
            Self::Back => &[Key::Escape, Key::GamepadFaceButtonRight],
            Self::Down => &[Key::Down, Key::GamepadDPadDown],
            Self::Left => &[Key::Left, Key::GamepadDPadLeft],
            Self::Next => &[Key::Tab],
            Self::Previous => &[],
            Self::Right => &[Key::Right, Key::GamepadDPadRight],
            Self::Select => &[Key::Enter, Key::SpaceBar, Key::GamepadFaceButtonBottom],
            Self::Up => &[Key::Up, Key::GamepadDPadUp],
            Self::Extra => &[Key::Char('V'), Key::GamepadFaceButtonLeft],
            Self::MainMenu => &[Key::Escape, Key::GamepadSpecialRight],
            Self::Reset => &[Key::Char('R'), Key::GamepadFaceButtonTop],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip() {
        for action in NavAction::STANDARD.into_iter().chain(NavAction::EXTENDED) {
            assert_eq!(NavAction::from_name(action.name()), Some(action));
        }
        assert_eq!(NavAction::from_name("Jump"), None);
    }

    #[test]
    fn previous_unbound_by_default() {
        assert!(NavAction::Previous.default_keys().is_empty(), "Shift+Next covers Previous");
        assert_eq!(NavAction::Next.default_keys(), &[Key::Tab]);
    }
}

// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Physical keys, modifier flags, chords and player identifiers.

use serde::{Deserialize, Serialize};

/// Index of a local player (a "user" in the host input system).
///
/// Each local player has its own current input device, its own keyboard focus and
/// optionally its own analog cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
pub struct UserIndex(pub u32);

/// A physical key, button or axis.
///
/// The set is closed over what focus navigation and cursor simulation reason about.
/// Keys that only matter to gameplay can be carried as [`Key::Char`] or ignored.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character key, stored as an uppercase ASCII letter or digit.
    Char(char),
    /// Tab.
    Tab,
    /// Enter / Return.
    Enter,
    /// Space bar.
    SpaceBar,
    /// Escape.
    Escape,
    /// Backspace.
    BackSpace,
    /// Insert.
    Insert,
    /// Delete.
    Delete,
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Left shift as a key in its own right.
    LeftShift,
    /// Right shift as a key in its own right.
    RightShift,
    /// Left control as a key in its own right.
    LeftControl,
    /// Right control as a key in its own right.
    RightControl,

    /// Left mouse button.
    LeftMouseButton,
    /// Right mouse button.
    RightMouseButton,
    /// Middle mouse button.
    MiddleMouseButton,
    /// Wheel scrolled up.
    MouseScrollUp,
    /// Wheel scrolled down.
    MouseScrollDown,

    /// Bottom face button (A / Cross).
    GamepadFaceButtonBottom,
    /// Right face button (B / Circle).
    GamepadFaceButtonRight,
    /// Left face button (X / Square).
    GamepadFaceButtonLeft,
    /// Top face button (Y / Triangle).
    GamepadFaceButtonTop,
    /// D-pad up.
    GamepadDPadUp,
    /// D-pad down.
    GamepadDPadDown,
    /// D-pad left.
    GamepadDPadLeft,
    /// D-pad right.
    GamepadDPadRight,
    /// Left shoulder.
    GamepadLeftShoulder,
    /// Right shoulder.
    GamepadRightShoulder,
    /// Left special button (Back / Share / View).
    GamepadSpecialLeft,
    /// Right special button (Start / Options / Menu).
    GamepadSpecialRight,
    /// Left stick horizontal axis.
    GamepadLeftX,
    /// Left stick vertical axis (up is positive).
    GamepadLeftY,
    /// Right stick horizontal axis.
    GamepadRightX,
    /// Right stick vertical axis (up is positive).
    GamepadRightY,
    /// Left stick pushed up past its digital threshold.
    GamepadLeftStickUp,
    /// Left stick pushed down past its digital threshold.
    GamepadLeftStickDown,
    /// Left stick pushed left past its digital threshold.
    GamepadLeftStickLeft,
    /// Left stick pushed right past its digital threshold.
    GamepadLeftStickRight,
    /// Right stick pushed up past its digital threshold.
    GamepadRightStickUp,
    /// Right stick pushed down past its digital threshold.
    GamepadRightStickDown,
    /// Right stick pushed left past its digital threshold.
    GamepadRightStickLeft,
    /// Right stick pushed right past its digital threshold.
    GamepadRightStickRight,
    /// Left stick click.
    ///
    /// Also used as the effecting button of pointer moves driven by the left stick.
    GamepadLeftThumbstick,
    /// Right stick click.
    ///
    /// Also used as the effecting button of pointer moves driven by the right stick.
    GamepadRightThumbstick,
}

impl Key {
    /// Whether this key originates from a gamepad.
    pub const fn is_gamepad_key(self) -> bool {
        matches!(
            self,
            Self::GamepadFaceButtonBottom
                | Self::GamepadFaceButtonRight
                | Self::GamepadFaceButtonLeft
                | Self::GamepadFaceButtonTop
                | Self::GamepadDPadUp
                | Self::GamepadDPadDown
                | Self::GamepadDPadLeft
                | Self::GamepadDPadRight
                | Self::GamepadLeftShoulder
                | Self::GamepadRightShoulder
                | Self::GamepadSpecialLeft
                | Self::GamepadSpecialRight
                | Self::GamepadLeftX
                | Self::GamepadLeftY
                | Self::GamepadRightX
                | Self::GamepadRightY
                | Self::GamepadLeftStickUp
                | Self::GamepadLeftStickDown
                | Self::GamepadLeftStickLeft
                | Self::GamepadLeftStickRight
                | Self::GamepadRightStickUp
                | Self::GamepadRightStickDown
                | Self::GamepadRightStickLeft
                | Self::GamepadRightStickRight
                | Self::GamepadLeftThumbstick
                | Self::GamepadRightThumbstick
        )
    }

    /// Whether this key is a mouse button or wheel direction.
    pub const fn is_mouse_button(self) -> bool {
        matches!(
            self,
            Self::LeftMouseButton
                | Self::RightMouseButton
                | Self::MiddleMouseButton
                | Self::MouseScrollUp
                | Self::MouseScrollDown
        )
    }

    /// Whether this key is a thumbstick identifier, used to attribute pointer moves to a stick.
    pub const fn is_thumbstick(self) -> bool {
        matches!(
            self,
            Self::GamepadLeftThumbstick | Self::GamepadRightThumbstick
        )
    }
}

bitflags::bitflags! {
    /// Modifier keys held while another key is pressed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
    #[derive(Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Modifiers: u8 {
        /// Either shift key.
        const SHIFT = 0b0000_0001;
        /// Either control key.
        const CTRL  = 0b0000_0010;
        /// Either alt / option key.
        const ALT   = 0b0000_0100;
        /// Either command / super key.
        const CMD   = 0b0000_1000;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

/// A key together with the modifiers that must be held for it to match.
///
/// Chords compare exactly: `Shift+Tab` does not match a binding for plain `Tab`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeyChord {
    /// The key.
    pub key: Key,
    /// Modifiers that must be held.
    #[serde(default, skip_serializing_if = "Modifiers::is_empty")]
    pub modifiers: Modifiers,
}

impl KeyChord {
    /// A chord for `key` with no modifiers.
    pub const fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Return this chord with `modifiers` added.
    #[must_use]
    pub fn with(mut self, modifiers: Modifiers) -> Self {
        self.modifiers |= modifiers;
        self
    }
}

impl From<Key> for KeyChord {
    fn from(key: Key) -> Self {
        Self::new(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gamepad_classification() {
        assert!(Key::GamepadDPadUp.is_gamepad_key(), "d-pad is a gamepad key");
        assert!(Key::GamepadRightX.is_gamepad_key(), "axes are gamepad keys");
        assert!(!Key::Tab.is_gamepad_key(), "tab is a keyboard key");
        assert!(!Key::LeftMouseButton.is_gamepad_key(), "mouse is not gamepad");
        assert!(Key::LeftMouseButton.is_mouse_button(), "lmb is a mouse button");
        assert!(Key::GamepadLeftThumbstick.is_thumbstick(), "thumbstick id");
        assert!(!Key::GamepadLeftX.is_thumbstick(), "axis is not a thumbstick id");
    }

    #[test]
    fn chords_compare_with_modifiers() {
        let tab = KeyChord::new(Key::Tab);
        let shift_tab = tab.with(Modifiers::SHIFT);
        assert_ne!(tab, shift_tab, "modifiers are part of the chord");
        assert_eq!(shift_tab.modifiers, Modifiers::SHIFT, "shift only");
        assert_eq!(KeyChord::from(Key::Tab), tab, "From<Key> has no modifiers");
    }
}

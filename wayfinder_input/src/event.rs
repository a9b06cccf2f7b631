// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Decoded input events fed to the device tracker, the navigation router and the analog cursor.

use kurbo::{Point, Vec2};

use crate::key::{Key, KeyChord, Modifiers, UserIndex};

/// A key press or release.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// The player that produced the event.
    pub user: UserIndex,
    /// Modifiers held at the time of the event.
    pub modifiers: Modifiers,
    /// True for auto-repeat presses generated while the key is held.
    pub repeat: bool,
}

impl KeyEvent {
    /// A non-repeat event for `key` with no modifiers.
    pub const fn new(key: Key, user: UserIndex) -> Self {
        Self {
            key,
            user,
            modifiers: Modifiers::empty(),
            repeat: false,
        }
    }

    /// Return this event with `modifiers` held.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Return this event marked as an auto-repeat.
    #[must_use]
    pub fn repeated(mut self) -> Self {
        self.repeat = true;
        self
    }

    /// The chord (key plus modifiers) this event represents.
    pub fn chord(&self) -> KeyChord {
        KeyChord {
            key: self.key,
            modifiers: self.modifiers,
        }
    }
}

/// A single analog axis sample.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnalogInputEvent {
    /// The axis key, e.g. [`Key::GamepadLeftX`].
    pub key: Key,
    /// The player that produced the event.
    pub user: UserIndex,
    /// Axis value in `[-1, 1]`.
    pub value: f64,
}

impl AnalogInputEvent {
    /// Create an analog sample.
    pub const fn new(key: Key, user: UserIndex, value: f64) -> Self {
        Self { key, user, value }
    }
}

/// A pointer move, button, wheel or gesture event in absolute screen space.
///
/// `synthetic` marks events injected by software (for example the analog cursor
/// pinning itself to the screen center) that must not count as user activity.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// The player that owns the pointer.
    pub user: UserIndex,
    /// Position after the event.
    pub position: Point,
    /// Position before the event.
    pub previous_position: Point,
    /// The button responsible for the event, if any.
    ///
    /// Pointer moves driven by an analog stick carry the stick's thumbstick key here.
    pub effecting_button: Option<Key>,
    /// True for injected events that do not represent user input.
    pub synthetic: bool,
}

impl PointerEvent {
    /// A user-caused move from `previous_position` to `position`.
    pub const fn moved(user: UserIndex, previous_position: Point, position: Point) -> Self {
        Self {
            user,
            position,
            previous_position,
            effecting_button: None,
            synthetic: false,
        }
    }

    /// Return this event with an effecting button.
    #[must_use]
    pub fn with_button(mut self, button: Key) -> Self {
        self.effecting_button = Some(button);
        self
    }

    /// Return this event marked as synthetic.
    #[must_use]
    pub fn as_synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Movement covered by this event.
    pub fn delta(&self) -> Vec2 {
        self.position - self.previous_position
    }
}

/// Any raw event the device tracker classifies.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InputEvent {
    /// A key or button was pressed.
    KeyDown(KeyEvent),
    /// An analog axis moved.
    Analog(AnalogInputEvent),
    /// The pointer moved.
    PointerMove(PointerEvent),
    /// The mouse wheel turned.
    Wheel(PointerEvent),
    /// A touchpad gesture (pinch, swipe, scroll).
    Gesture(PointerEvent),
}

impl InputEvent {
    /// The player that produced the event.
    pub fn user(&self) -> UserIndex {
        match self {
            Self::KeyDown(e) => e.user,
            Self::Analog(e) => e.user,
            Self::PointerMove(e) | Self::Wheel(e) | Self::Gesture(e) => e.user,
        }
    }
}

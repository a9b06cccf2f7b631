// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analog cursor configuration.

use wayfinder_input::key::Key;

/// Which physical stick drives the cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Stick {
    /// Left stick.
    Left,
    /// Right stick.
    #[default]
    Right,
}

impl Stick {
    /// Horizontal and vertical axis keys.
    pub const fn axes(self) -> (Key, Key) {
        match self {
            Self::Left => (Key::GamepadLeftX, Key::GamepadLeftY),
            Self::Right => (Key::GamepadRightX, Key::GamepadRightY),
        }
    }

    /// Axis keys plus the stick's digital direction keys; all are consumed by the cursor.
    pub const fn movement_keys(self) -> [Key; 6] {
        match self {
            Self::Left => [
                Key::GamepadLeftX,
                Key::GamepadLeftY,
                Key::GamepadLeftStickRight,
                Key::GamepadLeftStickLeft,
                Key::GamepadLeftStickUp,
                Key::GamepadLeftStickDown,
            ],
            Self::Right => [
                Key::GamepadRightX,
                Key::GamepadRightY,
                Key::GamepadRightStickRight,
                Key::GamepadRightStickLeft,
                Key::GamepadRightStickUp,
                Key::GamepadRightStickDown,
            ],
        }
    }

    /// Key attached to pointer moves caused by this stick.
    pub const fn thumbstick(self) -> Key {
        match self {
            Self::Left => Key::GamepadLeftThumbstick,
            Self::Right => Key::GamepadRightThumbstick,
        }
    }
}

/// How stick deflection maps to velocity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorMode {
    /// Velocity follows deflection immediately.
    Direct,
    /// Velocity ramps up along a cubic curve, capped by deflection.
    #[default]
    Accelerated,
}

/// Which geometry bounds the cursor.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorScreenSpace {
    /// The local player's region of the screen (split-screen aware).
    #[default]
    PlayerScreen,
    /// The whole game viewport.
    Viewport,
}

/// Tunables for an [`AnalogCursor`](crate::analog::AnalogCursor).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AnalogCursorConfig {
    /// Stick that drives the cursor.
    pub stick: Stick,
    /// Radial dead zone in `[0, 1)`.
    pub dead_zone: f64,
    /// Acceleration constant in px/s² at full deflection.
    pub acceleration: f64,
    /// Top speed in px/s at full deflection.
    pub max_speed: f64,
    /// Speed multiplier while over an interactable widget.
    pub sticky_slowdown: f64,
    /// Velocity model.
    pub mode: CursorMode,
    /// Bounds used for clamping.
    pub screen_space: CursorScreenSpace,
}

impl Default for AnalogCursorConfig {
    fn default() -> Self {
        Self {
            stick: Stick::Right,
            dead_zone: 0.2,
            acceleration: 1000.0,
            max_speed: 1500.0,
            sticky_slowdown: 0.5,
            mode: CursorMode::Accelerated,
            screen_space: CursorScreenSpace::PlayerScreen,
        }
    }
}

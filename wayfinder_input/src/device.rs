// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Current input device detection.
//!
//! ## Classification
//!
//! | Event | Result |
//! |---|---|
//! | Analog axis, gamepad key, `abs(value) > 0.15` | Gamepad |
//! | Analog axis below the dead zone | ignored |
//! | Key down | Gamepad for gamepad keys, else Keyboard |
//! | Pointer move, synthetic | ignored |
//! | Pointer move under 4px | ignored |
//! | Pointer move attributed to a thumbstick | Gamepad |
//! | Other pointer move | Mouse |
//! | Wheel or gesture | Mouse |
//!
//! Subscribers are notified once per actual change, in subscription order.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::event::InputEvent;
use crate::key::UserIndex;

/// Analog values at or below this magnitude never count as gamepad activity.
pub const ANALOG_DEAD_ZONE: f64 = 0.15;

/// Pointer moves shorter than this (in pixels) are treated as sensor noise.
pub const POINTER_NOISE_THRESHOLD: f64 = 4.0;

/// The kind of device a player most recently used.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum InputDevice {
    /// No input observed yet.
    #[default]
    None,
    /// Keyboard.
    Keyboard,
    /// Mouse, wheel or touchpad.
    Mouse,
    /// Gamepad buttons or sticks.
    Gamepad,
    /// Tracked spatial controllers and anything else.
    OtherSpatial,
}

/// Handle returned by [`InputDeviceTracker::subscribe`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type DeviceListener = Box<dyn FnMut(InputDevice, UserIndex)>;

/// Classify a raw event, or `None` when it says nothing about the active device.
pub fn classify(event: &InputEvent) -> Option<InputDevice> {
    match event {
        InputEvent::Analog(e) => {
            let outside = e.value > ANALOG_DEAD_ZONE || e.value < -ANALOG_DEAD_ZONE;
            (outside && e.key.is_gamepad_key()).then_some(InputDevice::Gamepad)
        }
        InputEvent::KeyDown(e) => Some(if e.key.is_gamepad_key() {
            InputDevice::Gamepad
        } else {
            InputDevice::Keyboard
        }),
        InputEvent::PointerMove(e) => {
            if e.synthetic {
                return None;
            }
            if e.delta().hypot2() < POINTER_NOISE_THRESHOLD * POINTER_NOISE_THRESHOLD {
                return None;
            }
            match e.effecting_button {
                Some(button) if button.is_thumbstick() => Some(InputDevice::Gamepad),
                _ => Some(InputDevice::Mouse),
            }
        }
        InputEvent::Wheel(_) | InputEvent::Gesture(_) => Some(InputDevice::Mouse),
    }
}

/// Per-player record of the most recently used input device.
///
/// Entries are created lazily the first time a player produces a classifiable event.
/// Players never seen report [`InputDevice::None`].
#[derive(Default)]
pub struct InputDeviceTracker {
    devices: BTreeMap<UserIndex, InputDevice>,
    listeners: Vec<(ListenerId, DeviceListener)>,
    next_listener: u64,
}

impl core::fmt::Debug for InputDeviceTracker {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InputDeviceTracker")
            .field("devices", &self.devices)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

impl InputDeviceTracker {
    /// Create a tracker with no players and no subscribers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `listener` to be called with `(device, user)` on every change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(InputDevice, UserIndex) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// The device `user` most recently used.
    pub fn current_device(&self, user: UserIndex) -> InputDevice {
        self.devices.get(&user).copied().unwrap_or_default()
    }

    /// Classify `event` and record the result for its player.
    ///
    /// Returns the new device when the event changed it.
    pub fn observe(&mut self, event: &InputEvent) -> Option<InputDevice> {
        let device = classify(event)?;
        self.set_device(device, event.user()).then_some(device)
    }

    /// Explicitly set the device for `user`, notifying subscribers if it changed.
    ///
    /// Returns whether the stored device changed.
    pub fn set_device(&mut self, device: InputDevice, user: UserIndex) -> bool {
        let previous = self.devices.insert(user, device).unwrap_or_default();
        if previous == device {
            return false;
        }
        log::debug!("input device for user {} changed: {previous:?} -> {device:?}", user.0);
        for (_, listener) in &mut self.listeners {
            listener(device, user);
        }
        true
    }

    /// Run `inject` (which may feed synthetic input through this tracker) and then
    /// restore the device `user` had before, so simulated input is not mistaken for
    /// a real device switch.
    pub fn preserve_device<R>(
        &mut self,
        user: UserIndex,
        inject: impl FnOnce(&mut Self) -> R,
    ) -> R {
        let before = self.current_device(user);
        let out = inject(self);
        self.set_device(before, user);
        out
    }
}

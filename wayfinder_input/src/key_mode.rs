// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hold/toggle preferences for actions, per input device.

use alloc::collections::BTreeMap;
use alloc::string::String;

use crate::device::InputDevice;

/// How a held action behaves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum KeyMode {
    /// Active while the key is held.
    Hold,
    /// Each press flips the state.
    #[default]
    Toggle,
}

/// Per-device, per-action key modes. Unset entries are [`KeyMode::Toggle`].
#[derive(Clone, Debug, Default)]
pub struct KeyModes {
    modes: BTreeMap<InputDevice, BTreeMap<String, KeyMode>>,
}

impl KeyModes {
    /// Empty set; everything toggles.
    pub fn new() -> Self {
        Self::default()
    }

    /// The mode for `action` on `device`.
    pub fn mode(&self, device: InputDevice, action: &str) -> KeyMode {
        self.modes
            .get(&device)
            .and_then(|actions| actions.get(action))
            .copied()
            .unwrap_or_default()
    }

    /// Set the mode for `action` on `device`.
    pub fn set_mode(&mut self, device: InputDevice, action: impl Into<String>, mode: KeyMode) {
        self.modes
            .entry(device)
            .or_default()
            .insert(action.into(), mode);
    }

    /// Resolve whether an action is active after a key edge.
    ///
    /// `active` is the current state; `pressed` is true on key down, false on key up.
    pub fn apply(&self, device: InputDevice, action: &str, active: bool, pressed: bool) -> bool {
        match self.mode(device, action) {
            KeyMode::Hold => pressed,
            KeyMode::Toggle if pressed => !active,
            KeyMode::Toggle => active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_toggle_per_device() {
        let mut m = KeyModes::new();
        m.set_mode(InputDevice::Gamepad, "Aim", KeyMode::Hold);
        assert_eq!(m.mode(InputDevice::Gamepad, "Aim"), KeyMode::Hold);
        assert_eq!(m.mode(InputDevice::Mouse, "Aim"), KeyMode::Toggle);
        assert_eq!(m.mode(InputDevice::Gamepad, "Crouch"), KeyMode::Toggle);
    }

    #[test]
    fn apply_edges() {
        let mut m = KeyModes::new();
        m.set_mode(InputDevice::Keyboard, "Aim", KeyMode::Hold);
        assert!(m.apply(InputDevice::Keyboard, "Aim", false, true), "hold: down activates");
        assert!(!m.apply(InputDevice::Keyboard, "Aim", true, false), "hold: up releases");
        assert!(m.apply(InputDevice::Mouse, "Aim", false, true), "toggle: down flips on");
        assert!(m.apply(InputDevice::Mouse, "Aim", true, false), "toggle: up keeps state");
        assert!(!m.apply(InputDevice::Mouse, "Aim", true, true), "toggle: down flips off");
    }
}

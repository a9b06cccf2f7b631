// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The owning player controller.

use kurbo::Point;

use crate::mode::InputMode;

/// Receives input mode and hardware cursor updates from a [`Hud`](crate::Hud).
pub trait PlayerController {
    /// Switch input routing. [`InputMode::Game`] hides the cursor, the others show it.
    fn activate_input_mode(&mut self, mode: InputMode);

    /// Move the hardware cursor.
    fn set_mouse_location(&mut self, position: Point);
}

/// A controller that just remembers what it was told.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ControllerState {
    /// Last activated mode.
    pub mode: InputMode,
    /// Whether the hardware cursor is shown.
    pub cursor_visible: bool,
    /// Last hardware cursor location set.
    pub mouse_location: Option<Point>,
    /// Number of mode activations.
    pub activations: usize,
}

impl PlayerController for ControllerState {
    fn activate_input_mode(&mut self, mode: InputMode) {
        self.mode = mode;
        self.cursor_visible = mode != InputMode::Game;
        self.activations += 1;
    }

    fn set_mouse_location(&mut self, position: Point) {
        self.mouse_location = Some(position);
    }
}

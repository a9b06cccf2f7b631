// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The platform-facing collaborator the analog cursor drives.

use kurbo::{Point, Rect};
use wayfinder_input::device::InputDevice;
use wayfinder_input::event::PointerEvent;
use wayfinder_input::key::{Key, UserIndex};

use crate::config::CursorScreenSpace;

/// What an [`AnalogCursor`](crate::analog::AnalogCursor) needs from the UI host.
///
/// `None` results mean "not available right now" (player not spawned, viewport torn
/// down) and make the current operation a no-op.
pub trait CursorHost {
    /// Current pointer position of `user` in absolute screen space.
    fn cursor_position(&self, user: UserIndex) -> Option<Point>;

    /// Absolute bounds of the given screen space for `user`.
    fn screen_geometry(&self, space: CursorScreenSpace, user: UserIndex) -> Option<Rect>;

    /// Whether the application window has OS focus.
    fn is_foreground(&self) -> bool;

    /// Whether any widget under `point` is interactable.
    fn is_interactable_under(&self, point: Point, user: UserIndex) -> bool;

    /// The device `user` most recently used.
    fn current_input_device(&self, user: UserIndex) -> InputDevice;

    /// Move `user`'s pointer.
    fn set_cursor_position(&mut self, user: UserIndex, position: Point);

    /// Route a pointer-move event through the UI. Returns whether it was handled.
    fn dispatch_pointer_move(&mut self, event: &PointerEvent) -> bool;

    /// Route a pointer button press (`pressed`) or release. Returns whether it was handled.
    fn dispatch_pointer_button(&mut self, event: &PointerEvent, button: Key, pressed: bool) -> bool;
}

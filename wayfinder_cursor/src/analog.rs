// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The analog cursor state machine.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use wayfinder_cursor::analog::AnalogCursor;
//! use wayfinder_cursor::config::{AnalogCursorConfig, CursorMode, CursorScreenSpace};
//! use wayfinder_cursor::host::CursorHost;
//! use wayfinder_input::device::InputDevice;
//! use wayfinder_input::event::{AnalogInputEvent, PointerEvent};
//! use wayfinder_input::key::{Key, UserIndex};
//! use wayfinder_input::router::NavigationKeyRouter;
//!
//! struct Screen { pointer: Point }
//! impl CursorHost for Screen {
//!     fn cursor_position(&self, _: UserIndex) -> Option<Point> { Some(self.pointer) }
//!     fn screen_geometry(&self, _: CursorScreenSpace, _: UserIndex) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 1920.0, 1080.0))
//!     }
//!     fn is_foreground(&self) -> bool { true }
//!     fn is_interactable_under(&self, _: Point, _: UserIndex) -> bool { false }
//!     fn current_input_device(&self, _: UserIndex) -> InputDevice { InputDevice::Gamepad }
//!     fn set_cursor_position(&mut self, _: UserIndex, p: Point) { self.pointer = p; }
//!     fn dispatch_pointer_move(&mut self, _: &PointerEvent) -> bool { true }
//!     fn dispatch_pointer_button(&mut self, _: &PointerEvent, _: Key, _: bool) -> bool { true }
//! }
//!
//! let user = UserIndex(0);
//! let config = AnalogCursorConfig { mode: CursorMode::Direct, ..Default::default() };
//! let mut cursor = AnalogCursor::new(user, config, NavigationKeyRouter::new());
//! let mut host = Screen { pointer: Point::new(100.0, 100.0) };
//!
//! cursor.handle_analog_input(&AnalogInputEvent::new(Key::GamepadRightX, user, 1.0));
//! cursor.tick(1.0 / 64.0, &mut host);
//! // 1500 px/s for 1/64 s is 23.4375 px: 23 applied, the rest carried.
//! assert_eq!(cursor.position(), Point::new(123.0, 100.0));
//! ```

use kurbo::{Point, Rect, Vec2};
use wayfinder_input::device::InputDevice;
use wayfinder_input::event::{AnalogInputEvent, KeyEvent, PointerEvent};
use wayfinder_input::key::{Key, UserIndex};
use wayfinder_input::router::{NavigationKeyRouter, UiAction};

use crate::config::{AnalogCursorConfig, CursorMode, CursorScreenSpace, Stick};
use crate::host::CursorHost;

/// Remove a radial dead zone from a stick value and rescale the remainder to `[0, 1]`.
///
/// Values with magnitude at or below `dead_zone` map to zero; magnitude 1 stays 1.
/// Direction is preserved.
pub fn apply_dead_zone(value: Vec2, dead_zone: f64) -> Vec2 {
    let len = value.hypot();
    if len <= dead_zone || len == 0.0 {
        return Vec2::ZERO;
    }
    let target = (len - dead_zone).max(0.0) / (1.0 - dead_zone);
    value * (target / len)
}

/// Clamp `point` to lie inside `bounds` with a 1px margin on every side.
pub fn clamp_to_bounds(point: Point, bounds: Rect) -> Point {
    // `max` then `min` instead of `clamp`: degenerate bounds must not panic.
    Point::new(
        point.x.max(bounds.x0 + 1.0).min(bounds.x1 - 1.0),
        point.y.max(bounds.y0 + 1.0).min(bounds.y1 - 1.0),
    )
}

/// Accumulates fractional pixel motion across ticks.
///
/// Only whole pixels are applied to the position; the fraction is kept so that slow
/// motion is not lost to truncation every tick.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SubPixelCarry {
    offset: Vec2,
}

impl SubPixelCarry {
    /// Apply `delta` starting at `from` and return the new whole-pixel position.
    pub fn advance(&mut self, from: Point, delta: Vec2) -> Point {
        self.offset += delta;
        let target = from + self.offset;
        let whole = target.floor();
        self.offset = target - whole;
        whole
    }

    /// The carried fraction, each component in `[0, 1)`.
    pub fn remainder(&self) -> Vec2 {
        self.offset
    }

    /// Drop the carried fraction.
    pub fn reset(&mut self) {
        self.offset = Vec2::ZERO;
    }
}

/// A software cursor driven by one player's analog stick.
#[derive(Clone, Debug)]
pub struct AnalogCursor {
    owner: UserIndex,
    config: AnalogCursorConfig,
    /// Raw stick value; Y is stored screen-down.
    analog: Vec2,
    velocity: Vec2,
    carry: SubPixelCarry,
    position: Point,
    frozen: bool,
    select_as_click: bool,
    navigation: NavigationKeyRouter,
}

impl AnalogCursor {
    /// Create a cursor for `owner`.
    ///
    /// `navigation` decides which keys count as select (its [`UiAction::Accept`] keys)
    /// and which count as directional navigation.
    pub fn new(owner: UserIndex, config: AnalogCursorConfig, navigation: NavigationKeyRouter) -> Self {
        Self {
            owner,
            config,
            analog: Vec2::ZERO,
            velocity: Vec2::ZERO,
            carry: SubPixelCarry::default(),
            position: Point::ZERO,
            frozen: false,
            select_as_click: false,
            navigation,
        }
    }

    /// The player this cursor belongs to.
    pub fn owner(&self) -> UserIndex {
        self.owner
    }

    /// Current configuration.
    pub fn config(&self) -> &AnalogCursorConfig {
        &self.config
    }

    /// Last position written by this cursor.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current velocity in px/s.
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Raw stick value (screen-down Y).
    pub fn analog_value(&self) -> Vec2 {
        self.analog
    }

    /// Whether the cursor is pinned to the screen center.
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Whether the next select press will be turned into a click.
    pub fn is_select_armed(&self) -> bool {
        self.select_as_click
    }

    /// The stick driving the cursor.
    pub fn stick(&self) -> Stick {
        self.config.stick
    }

    /// Switch sticks. Stored stick values are dropped.
    pub fn set_stick(&mut self, stick: Stick) {
        self.config.stick = stick;
        self.analog = Vec2::ZERO;
    }

    /// Change the dead zone radius.
    pub fn set_dead_zone(&mut self, dead_zone: f64) {
        self.config.dead_zone = dead_zone;
    }

    /// Change the velocity model.
    pub fn set_mode(&mut self, mode: CursorMode) {
        self.config.mode = mode;
    }

    /// Change the clamping bounds.
    pub fn set_screen_space(&mut self, space: CursorScreenSpace) {
        self.config.screen_space = space;
    }

    /// Replace the navigation rules used for select-as-click.
    pub fn set_navigation_keys(&mut self, navigation: NavigationKeyRouter) {
        self.navigation = navigation;
    }

    /// Pin (or release) the cursor to the center of the player screen.
    pub fn set_freeze_to_center(&mut self, frozen: bool) {
        if self.frozen != frozen {
            log::debug!("analog cursor for user {} frozen: {frozen}", self.owner.0);
        }
        self.frozen = frozen;
    }

    fn set_select_as_click(&mut self, armed: bool) {
        if self.select_as_click != armed {
            log::trace!(
                "analog cursor (dead zone {}) select as click: {armed}",
                self.config.dead_zone
            );
        }
        self.select_as_click = armed;
    }

    fn is_movement_key(&self, key: Key) -> bool {
        self.config.stick.movement_keys().contains(&key)
    }

    fn is_select_key(&self, key: Key) -> bool {
        self.navigation.action_for_key(key) == Some(UiAction::Accept)
    }

    fn disarms(&self, key: Key) -> bool {
        !key.is_gamepad_key() || self.navigation.is_direction_key(key)
    }

    fn exceeds_dead_zone(&self) -> bool {
        self.analog.hypot() > self.config.dead_zone
    }

    /// Record a stick axis sample. Returns whether the event was consumed.
    ///
    /// Frozen cursors, other players' events and axes of the other stick are ignored.
    pub fn handle_analog_input(&mut self, event: &AnalogInputEvent) -> bool {
        if self.frozen || event.user != self.owner || !self.is_movement_key(event.key) {
            return false;
        }
        if event.value > self.config.dead_zone || event.value < -self.config.dead_zone {
            self.set_select_as_click(true);
        }
        let (x_axis, y_axis) = self.config.stick.axes();
        if event.key == x_axis {
            self.analog.x = event.value;
        } else if event.key == y_axis {
            self.analog.y = -event.value;
        } else {
            return false;
        }
        true
    }

    /// Handle a key press. Returns whether the event was consumed.
    pub fn handle_key_down(&mut self, event: &KeyEvent, host: &mut impl CursorHost) -> bool {
        if event.user != self.owner {
            return false;
        }
        if self.is_movement_key(event.key) {
            return true;
        }
        if !event.repeat && self.select_as_click && self.disarms(event.key) {
            self.set_select_as_click(false);
        }
        if self.select_as_click && self.is_select_key(event.key) {
            if event.repeat {
                return true;
            }
            return self.click(host, true);
        }
        false
    }

    /// Handle a key release. Returns whether the event was consumed.
    pub fn handle_key_up(&mut self, event: &KeyEvent, host: &mut impl CursorHost) -> bool {
        if event.user != self.owner {
            return false;
        }
        if self.is_movement_key(event.key) {
            return true;
        }
        if event.repeat {
            return false;
        }
        if self.select_as_click && self.disarms(event.key) {
            self.set_select_as_click(false);
        }
        if self.select_as_click && self.is_select_key(event.key) {
            return self.click(host, false);
        }
        false
    }

    fn click(&mut self, host: &mut impl CursorHost, pressed: bool) -> bool {
        let Some(position) = host.cursor_position(self.owner) else {
            return false;
        };
        let event = PointerEvent::moved(self.owner, position, position).with_button(Key::LeftMouseButton);
        log::trace!(
            "user {}: select processed as click ({})",
            self.owner.0,
            if pressed { "down" } else { "up" }
        );
        host.dispatch_pointer_button(&event, Key::LeftMouseButton, pressed)
    }

    /// Advance the cursor by `dt` seconds.
    pub fn tick(&mut self, dt: f64, host: &mut impl CursorHost) {
        let Some(old) = host.cursor_position(self.owner) else {
            log::debug!("analog cursor tick skipped: no pointer for user {}", self.owner.0);
            return;
        };

        if self.frozen {
            self.analog = Vec2::ZERO;
            self.velocity = Vec2::ZERO;
            let Some(screen) = host.screen_geometry(CursorScreenSpace::PlayerScreen, self.owner) else {
                return;
            };
            self.update_position(screen.center(), old, host, true);
            return;
        }

        let scaled = apply_dead_zone(self.analog, self.config.dead_zone);
        let mut multiplier = 1.0;
        if host.current_input_device(self.owner) != InputDevice::Mouse
            && host.is_interactable_under(old, self.owner)
        {
            multiplier = self.config.sticky_slowdown;
        }

        match self.config.mode {
            CursorMode::Accelerated => {
                // Bounds follow the deflection sign so crossing the axis reverses at once.
                let cap = scaled * self.config.max_speed;
                let (min_x, max_x) = if scaled.x > 0.0 { (0.0, cap.x) } else { (cap.x, 0.0) };
                let (min_y, max_y) = if scaled.y > 0.0 { (0.0, cap.y) } else { (cap.y, 0.0) };
                let cubed = Vec2::new(scaled.x * scaled.x * scaled.x, scaled.y * scaled.y * scaled.y);
                self.velocity += cubed * self.config.acceleration * dt;
                self.velocity.x = self.velocity.x.max(min_x).min(max_x);
                self.velocity.y = self.velocity.y.max(min_y).min(max_y);
            }
            CursorMode::Direct => {
                self.velocity = scaled * self.config.max_speed;
            }
        }

        let target = self.carry.advance(old, self.velocity * dt * multiplier);
        self.update_position(target, old, host, true);
    }

    /// Move the cursor to `target` (clamped), skipping the update when the whole-pixel
    /// position would not change.
    pub fn move_to(&mut self, target: Point, host: &mut impl CursorHost) {
        if let Some(old) = host.cursor_position(self.owner) {
            self.update_position(target, old, host, false);
        }
    }

    fn update_position(&mut self, target: Point, old: Point, host: &mut impl CursorHost, force: bool) {
        if !host.is_foreground() {
            log::trace!("application in background, cursor left alone");
            return;
        }
        if !force && old.trunc() == target.trunc() {
            return;
        }
        let Some(bounds) = host.screen_geometry(self.config.screen_space, self.owner) else {
            return;
        };
        let clamped = clamp_to_bounds(target, bounds);
        host.set_cursor_position(self.owner, clamped);
        let updated = host.cursor_position(self.owner).unwrap_or(clamped);

        let event = if self.frozen {
            // Same previous and current position: no derived mouse delta.
            PointerEvent::moved(self.owner, updated, updated).as_synthetic()
        } else {
            let event = PointerEvent::moved(self.owner, old, updated);
            if self.exceeds_dead_zone() {
                event.with_button(self.config.stick.thumbstick())
            } else {
                event
            }
        };
        host.dispatch_pointer_move(&event);
        self.position = updated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfinder_input::binding::BindingStore;

    const USER: UserIndex = UserIndex(0);
    const DT: f64 = 1.0 / 64.0;

    struct TestHost {
        pointer: Option<Point>,
        screen: Option<Rect>,
        foreground: bool,
        interactable: Option<Rect>,
        device: InputDevice,
        moves: Vec<PointerEvent>,
        buttons: Vec<(Point, Key, bool)>,
    }

    impl TestHost {
        fn at(x: f64, y: f64) -> Self {
            Self {
                pointer: Some(Point::new(x, y)),
                screen: Some(Rect::new(0.0, 0.0, 1920.0, 1080.0)),
                foreground: true,
                interactable: None,
                device: InputDevice::Gamepad,
                moves: Vec::new(),
                buttons: Vec::new(),
            }
        }
    }

    impl CursorHost for TestHost {
        fn cursor_position(&self, _: UserIndex) -> Option<Point> {
            self.pointer
        }
        fn screen_geometry(&self, _: CursorScreenSpace, _: UserIndex) -> Option<Rect> {
            self.screen
        }
        fn is_foreground(&self) -> bool {
            self.foreground
        }
        fn is_interactable_under(&self, point: Point, _: UserIndex) -> bool {
            self.interactable.is_some_and(|r| r.contains(point))
        }
        fn current_input_device(&self, _: UserIndex) -> InputDevice {
            self.device
        }
        fn set_cursor_position(&mut self, _: UserIndex, position: Point) {
            self.pointer = Some(position);
        }
        fn dispatch_pointer_move(&mut self, event: &PointerEvent) -> bool {
            self.moves.push(*event);
            true
        }
        fn dispatch_pointer_button(&mut self, event: &PointerEvent, button: Key, pressed: bool) -> bool {
            self.buttons.push((event.position, button, pressed));
            true
        }
    }

    fn cursor(mode: CursorMode) -> AnalogCursor {
        let router = NavigationKeyRouter::from_bindings(&BindingStore::with_defaults()).unwrap();
        let config = AnalogCursorConfig {
            mode,
            ..Default::default()
        };
        AnalogCursor::new(USER, config, router)
    }

    fn push(c: &mut AnalogCursor, key: Key, value: f64) -> bool {
        c.handle_analog_input(&AnalogInputEvent::new(key, USER, value))
    }

    #[test]
    fn dead_zone_edges() {
        assert_eq!(apply_dead_zone(Vec2::new(0.2, 0.0), 0.2), Vec2::ZERO);
        assert_eq!(apply_dead_zone(Vec2::new(0.1, -0.1), 0.2), Vec2::ZERO);
        assert_eq!(apply_dead_zone(Vec2::new(1.0, 0.0), 0.2), Vec2::new(1.0, 0.0));
        let half = apply_dead_zone(Vec2::new(0.0, 0.6), 0.2);
        assert!((half.y - 0.5).abs() < 1e-12, "0.6 maps to 0.5, got {half:?}");
    }

    #[test]
    fn clamp_keeps_one_pixel_margin() {
        let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert_eq!(clamp_to_bounds(Point::new(-10.0, 80.0), bounds), Point::new(1.0, 49.0));
        assert_eq!(clamp_to_bounds(Point::new(100.0, 0.0), bounds), Point::new(99.0, 1.0));
        assert_eq!(clamp_to_bounds(Point::new(40.0, 20.0), bounds), Point::new(40.0, 20.0));
    }

    #[test]
    fn direct_mode_moves_and_carries() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(100.0, 100.0);
        assert!(push(&mut c, Key::GamepadRightX, 1.0), "right stick x is consumed");
        c.tick(DT, &mut host);
        assert_eq!(c.position(), Point::new(123.0, 100.0));
        assert_eq!(c.velocity(), Vec2::new(1500.0, 0.0));
        c.tick(DT, &mut host);
        // 100 + 2 * 23.4375 = 146.875
        assert_eq!(c.position(), Point::new(146.0, 100.0));

        let last = host.moves.last().unwrap();
        assert_eq!(last.previous_position, Point::new(123.0, 100.0));
        assert_eq!(last.effecting_button, Some(Key::GamepadRightThumbstick));
        assert!(!last.synthetic, "stick moves are real input");
    }

    #[test]
    fn stick_up_moves_up_screen() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(100.0, 100.0);
        push(&mut c, Key::GamepadRightY, 1.0);
        c.tick(DT, &mut host);
        assert_eq!(c.position(), Point::new(100.0, 76.0));
    }

    #[test]
    fn accelerated_ramps_caps_and_reverses() {
        let mut c = cursor(CursorMode::Accelerated);
        let mut host = TestHost::at(960.0, 540.0);
        push(&mut c, Key::GamepadRightX, 1.0);
        c.tick(DT, &mut host);
        assert_eq!(c.velocity().x, 1000.0 * DT, "one tick of full acceleration");
        for _ in 0..200 {
            c.tick(DT, &mut host);
        }
        assert_eq!(c.velocity().x, 1500.0, "capped at max speed");

        // Crossing the axis drops the bound to zero at once.
        push(&mut c, Key::GamepadRightX, -1.0);
        c.tick(DT, &mut host);
        assert_eq!(c.velocity().x, 0.0, "no coasting after reversal");
        c.tick(DT, &mut host);
        assert!(c.velocity().x < 0.0, "now accelerating left");
    }

    #[test]
    fn released_stick_stops_accelerated_cursor() {
        let mut c = cursor(CursorMode::Accelerated);
        let mut host = TestHost::at(960.0, 540.0);
        push(&mut c, Key::GamepadRightX, 1.0);
        for _ in 0..10 {
            c.tick(DT, &mut host);
        }
        push(&mut c, Key::GamepadRightX, 0.1);
        c.tick(DT, &mut host);
        assert_eq!(c.velocity(), Vec2::ZERO);
        assert_eq!(host.moves.last().unwrap().effecting_button, None, "inside dead zone");
    }

    #[test]
    fn position_is_clamped_inside_screen() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(1910.0, 5.0);
        push(&mut c, Key::GamepadRightX, 1.0);
        push(&mut c, Key::GamepadRightY, 1.0);
        c.tick(DT, &mut host);
        assert_eq!(c.position(), Point::new(1919.0, 1.0));
        assert_eq!(host.pointer, Some(Point::new(1919.0, 1.0)));
    }

    #[test]
    fn sticky_widgets_slow_non_mouse_users() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(100.0, 100.0);
        host.interactable = Some(Rect::new(0.0, 0.0, 500.0, 500.0));
        push(&mut c, Key::GamepadRightX, 1.0);
        c.tick(DT, &mut host);
        // 23.4375 * 0.5 = 11.71875
        assert_eq!(c.position(), Point::new(111.0, 100.0));

        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(100.0, 100.0);
        host.interactable = Some(Rect::new(0.0, 0.0, 500.0, 500.0));
        host.device = InputDevice::Mouse;
        push(&mut c, Key::GamepadRightX, 1.0);
        c.tick(DT, &mut host);
        assert_eq!(c.position(), Point::new(123.0, 100.0));
    }

    #[test]
    fn frozen_cursor_pins_to_center_with_synthetic_events() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(10.0, 10.0);
        push(&mut c, Key::GamepadRightX, 1.0);
        c.set_freeze_to_center(true);
        assert!(!push(&mut c, Key::GamepadRightX, 1.0), "analog ignored while frozen");
        c.tick(DT, &mut host);
        assert_eq!(c.position(), Point::new(960.0, 540.0));
        assert_eq!(c.analog_value(), Vec2::ZERO, "stick values cleared");
        let e = host.moves.last().unwrap();
        assert!(e.synthetic, "freeze moves are synthetic");
        assert_eq!(e.previous_position, e.position);
        assert_eq!(e.effecting_button, None);
    }

    #[test]
    fn background_or_missing_player_is_a_no_op() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(100.0, 100.0);
        host.foreground = false;
        c.set_freeze_to_center(true);
        c.tick(DT, &mut host);
        assert_eq!(host.pointer, Some(Point::new(100.0, 100.0)));
        assert!(host.moves.is_empty(), "never hijack a background cursor");

        host.foreground = true;
        host.pointer = None;
        c.tick(DT, &mut host);
        assert!(host.moves.is_empty(), "no player, no tick");

        host.pointer = Some(Point::new(100.0, 100.0));
        host.screen = None;
        c.tick(DT, &mut host);
        assert!(host.moves.is_empty(), "no viewport, no tick");
    }

    #[test]
    fn select_becomes_click_while_stick_active() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(300.0, 200.0);
        assert!(!c.is_select_armed(), "not armed before stick use");
        push(&mut c, Key::GamepadRightX, 0.5);
        assert!(c.is_select_armed(), "stick movement arms the click");

        let a = KeyEvent::new(Key::GamepadFaceButtonBottom, USER);
        assert!(c.handle_key_down(&a, &mut host), "click handled");
        assert!(c.handle_key_down(&a.repeated(), &mut host), "repeat swallowed");
        assert!(c.handle_key_up(&a, &mut host), "release handled");
        assert_eq!(
            host.buttons,
            vec![
                (Point::new(300.0, 200.0), Key::LeftMouseButton, true),
                (Point::new(300.0, 200.0), Key::LeftMouseButton, false),
            ]
        );
    }

    #[test]
    fn navigation_or_keyboard_disarms_click() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(300.0, 200.0);
        push(&mut c, Key::GamepadRightX, 0.5);
        assert!(!c.handle_key_down(&KeyEvent::new(Key::GamepadDPadUp, USER), &mut host));
        assert!(!c.is_select_armed(), "d-pad navigation disarms");
        let a = KeyEvent::new(Key::GamepadFaceButtonBottom, USER);
        assert!(!c.handle_key_down(&a, &mut host), "falls back to focus activation");

        push(&mut c, Key::GamepadRightX, 0.5);
        assert!(!c.handle_key_down(&KeyEvent::new(Key::Enter, USER), &mut host));
        assert!(!c.is_select_armed(), "keyboard disarms");
        assert!(host.buttons.is_empty(), "no clicks synthesized");
    }

    #[test]
    fn movement_keys_are_consumed_for_owner_only() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(0.0, 0.0);
        assert!(c.handle_key_down(&KeyEvent::new(Key::GamepadRightStickUp, USER), &mut host));
        assert!(c.handle_key_up(&KeyEvent::new(Key::GamepadRightStickUp, USER), &mut host));
        let other = KeyEvent::new(Key::GamepadRightStickUp, UserIndex(1));
        assert!(!c.handle_key_down(&other, &mut host), "other player");
        assert!(!push(&mut c, Key::GamepadLeftX, 1.0), "left stick not configured");

        c.set_stick(Stick::Left);
        assert!(push(&mut c, Key::GamepadLeftX, 1.0), "left stick now drives");
        assert!(!push(&mut c, Key::GamepadRightX, 1.0), "right stick ignored");
    }

    #[test]
    fn move_to_skips_same_pixel() {
        let mut c = cursor(CursorMode::Direct);
        let mut host = TestHost::at(50.0, 50.0);
        c.move_to(Point::new(50.4, 50.9), &mut host);
        assert!(host.moves.is_empty(), "same whole pixel");
        c.move_to(Point::new(70.0, 50.0), &mut host);
        assert_eq!(c.position(), Point::new(70.0, 50.0));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn inside_dead_zone_is_zero(angle in 0.0_f64..core::f64::consts::TAU, r in 0.0_f64..=0.2) {
                let v = Vec2::from_angle(angle) * r;
                prop_assert_eq!(apply_dead_zone(v, 0.2), Vec2::ZERO);
            }

            #[test]
            fn outside_dead_zone_rescales(angle in 0.0_f64..core::f64::consts::TAU, r in 0.21_f64..=1.0) {
                let v = Vec2::from_angle(angle) * r;
                let out = apply_dead_zone(v, 0.2);
                let expected = (r - 0.2) / 0.8;
                prop_assert!((out.hypot() - expected).abs() < 1e-9);
                // Same direction.
                prop_assert!(out.dot(v) > 0.0);
            }

            // Dyadic steps keep the arithmetic exact, so equality is meaningful.
            #[test]
            fn carry_matches_single_step(start in 0_i32..1000, step in 1_i32..64, ticks in 1_u32..200) {
                let from = Point::new(f64::from(start), f64::from(start));
                let delta = Vec2::new(f64::from(step) / 64.0, f64::from(step) / 128.0);
                let mut carry = SubPixelCarry::default();
                let mut p = from;
                for _ in 0..ticks {
                    p = carry.advance(p, delta);
                }
                let once = SubPixelCarry::default().advance(from, delta * f64::from(ticks));
                prop_assert_eq!(p, once);
            }
        }
    }
}

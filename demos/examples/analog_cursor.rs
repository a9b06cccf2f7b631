// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Analog cursor basics.
//!
//! Drive the software cursor with the right stick, slow down over a button, click it
//! with the select key, then freeze the cursor to the screen center.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p wayfinder_demos --example analog_cursor`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use wayfinder_cursor::analog::AnalogCursor;
use wayfinder_cursor::config::AnalogCursorConfig;
use wayfinder_input::binding::BindingStore;
use wayfinder_input::event::{AnalogInputEvent, KeyEvent};
use wayfinder_input::key::{Key, UserIndex};
use wayfinder_input::router::NavigationKeyRouter;
use wayfinder_widget_tree::{LocalWidget, PointerRecord, WidgetTree};

const DT: f64 = 1.0 / 60.0;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user = UserIndex(0);
    let screen = Rect::new(0.0, 0.0, 1280.0, 720.0);
    let mut ui = WidgetTree::new();
    ui.set_viewport(Some(screen));
    ui.set_player_screen(user, Some(screen));
    ui.set_pointer_position(user, Point::new(100.0, 360.0));

    let root = ui.insert(None, LocalWidget::new(screen));
    let button = ui.insert(Some(root), LocalWidget::button(Rect::new(300.0, 300.0, 500.0, 420.0)));

    let router = NavigationKeyRouter::from_bindings(&BindingStore::with_defaults()).unwrap();
    let mut cursor = AnalogCursor::new(user, AnalogCursorConfig::default(), router);

    // Push the stick fully right for half a second
    cursor.handle_analog_input(&AnalogInputEvent::new(Key::GamepadRightX, user, 1.0));
    for frame in 0..30 {
        cursor.tick(DT, &mut ui);
        if frame % 10 == 0 {
            println!("frame {frame:2}: cursor at {:?}, velocity {:?}", cursor.position(), cursor.velocity());
        }
    }
    println!("over the button: {}", ui.is_interactable_at(cursor.position()));

    // Select clicks at the cursor while the stick is deflected
    let select = KeyEvent::new(Key::GamepadFaceButtonBottom, user);
    cursor.handle_key_down(&select, &mut ui);
    cursor.handle_key_up(&select, &mut ui);
    let clicks = ui
        .pointer_log()
        .iter()
        .filter(|r| matches!(r, PointerRecord::Button { .. }))
        .count();
    println!("synthesized button edges: {clicks}, focus: {:?} (button is {button:?})", ui.focus(user));

    // Frozen cursors ignore the stick and sit in the center
    cursor.set_freeze_to_center(true);
    cursor.tick(DT, &mut ui);
    println!("frozen at {:?}", cursor.position());
    assert_eq!(cursor.position(), screen.center(), "frozen cursor is centered");
}

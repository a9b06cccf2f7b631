// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! HUD input mode and focus guarding.
//!
//! Attach screen and viewport HUDs, possess a pawn, open and close menus, and watch the
//! input mode, cursor freeze and appearance contexts follow. Finally lose focus to an
//! unmanaged widget and let the HUD put it back.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p wayfinder_demos --example hud_input_mode`

use kurbo::{Point, Rect};
use tracing_subscriber::EnvFilter;
use wayfinder_hud::{ControllerState, Hud, PawnId};
use wayfinder_input::key::UserIndex;
use wayfinder_menu::{FocusCause, MenuOptions, Route};
use wayfinder_widget_tree::{LocalWidget, WidgetId, WidgetTree};

fn report(label: &str, hud: &Hud<WidgetId, ControllerState>) {
    println!(
        "{label:<22} mode {:?}, frozen {}, cursor shown {}, contexts {:?}",
        hud.input_mode(),
        hud.is_cursor_frozen(),
        hud.controller().cursor_visible,
        hud.appearance().contexts(),
    );
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user = UserIndex(0);
    let screen = Rect::new(0.0, 0.0, 1280.0, 720.0);
    let mut ui = WidgetTree::new();
    ui.set_viewport(Some(screen));
    ui.set_player_screen(user, Some(screen));
    ui.set_pointer_position(user, Point::ZERO);

    let screen_w = ui.insert(None, LocalWidget::new(screen));
    let pause_w = ui.insert(Some(screen_w), LocalWidget::new(Rect::new(400.0, 200.0, 880.0, 520.0)));
    let resume = ui.insert(Some(pause_w), LocalWidget::button(Rect::new(500.0, 250.0, 780.0, 300.0)));
    let viewport_w = ui.insert(None, LocalWidget::new(screen));
    let pawn_w = ui.insert(None, LocalWidget::new(screen));
    let inventory_w = ui.insert(Some(pawn_w), LocalWidget::new(Rect::new(40.0, 40.0, 400.0, 680.0)));
    let slot = ui.insert(Some(inventory_w), LocalWidget::button(Rect::new(60.0, 60.0, 120.0, 120.0)));
    let chat_box = ui.insert(None, LocalWidget::button(Rect::new(0.0, 690.0, 300.0, 720.0)));

    let mut hud = Hud::new(user, ControllerState::default());
    let screen_hud = hud.attach_screen_hud(screen_w, &mut ui).unwrap();
    hud.attach_viewport_hud(viewport_w, &mut ui).unwrap();
    hud.create_menu(pause_w, MenuOptions::menu(user).auto_register("Pause").default_focus(resume), &mut ui)
        .unwrap();
    report("start", &hud);

    let pawn_hud = hud.possess(PawnId(7), Some(pawn_w), &mut ui).unwrap().unwrap();
    hud.create_menu(inventory_w, MenuOptions::menu(user).auto_register("Inventory").default_focus(slot), &mut ui)
        .unwrap();
    report("possessed", &hud);

    hud.navigate_to_route(pawn_hud, &Route::from("Inventory"), &mut ui);
    report("inventory open", &hud);

    hud.navigate_to_route(screen_hud, &Route::from("Pause"), &mut ui);
    report("pause open", &hud);

    // Focus escapes to a widget no HUD region owns
    ui.set_focus(chat_box, user, FocusCause::Mouse);
    let restored = hud.process_focus_changes(&mut ui);
    println!("restorations: {restored}, focus back on resume: {}", ui.focus(user) == Some(resume));

    hud.navigate_to_route(screen_hud, &Route::NONE, &mut ui);
    report("pause closed", &hud);

    hud.set_pawn_wants_centered_cursor(false, &mut ui);
    hud.navigate_to_route(pawn_hud, &Route::NONE, &mut ui);
    report("free cursor", &hud);

    hud.unpossess(&mut ui);
    report("unpossessed", &hud);
}

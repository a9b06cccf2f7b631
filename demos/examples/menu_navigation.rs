// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu navigation basics.
//!
//! Build a HUD region with a main menu and an options submenu, navigate by route and
//! by nav button, then back out with Escape.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p wayfinder_demos --example menu_navigation`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use wayfinder_input::binding::BindingStore;
use wayfinder_input::key::{Key, KeyChord, UserIndex};
use wayfinder_menu::{MenuOptions, MenuTree, NoopObserver, Route};
use wayfinder_widget_tree::{LocalWidget, WidgetTree};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let user = UserIndex(0);
    let bindings = BindingStore::with_defaults();
    let mut ui = WidgetTree::new();
    let mut menus = MenuTree::new();
    let mut observer = NoopObserver;

    // Widgets: hud > main > (play, options_button), hud > options > back_button
    let hud_w = ui.insert(None, LocalWidget::new(Rect::new(0.0, 0.0, 1280.0, 720.0)));
    let main_w = ui.insert(Some(hud_w), LocalWidget::new(Rect::new(100.0, 100.0, 600.0, 600.0)));
    let play = ui.insert(Some(main_w), LocalWidget::button(Rect::new(120.0, 120.0, 300.0, 160.0)));
    let options_button = ui.insert(Some(main_w), LocalWidget::button(Rect::new(120.0, 180.0, 300.0, 220.0)));
    let options_w = ui.insert(Some(hud_w), LocalWidget::new(Rect::new(700.0, 100.0, 1200.0, 600.0)));
    let volume = ui.insert(Some(options_w), LocalWidget::button(Rect::new(720.0, 120.0, 900.0, 160.0)));

    let hud = menus
        .create_menu(hud_w, MenuOptions::sub_hud(user), &mut ui, &mut observer)
        .unwrap();
    let main = menus
        .create_menu(
            main_w,
            MenuOptions::menu(user).auto_register("Main").default_focus(play),
            &mut ui,
            &mut observer,
        )
        .unwrap();
    let options = menus
        .create_menu(
            options_w,
            MenuOptions::menu(user).auto_register("Options").default_focus(volume),
            &mut ui,
            &mut observer,
        )
        .unwrap();
    menus.register_nav_button(hud, options_button, "Options");

    let routes: Vec<_> = menus.children(hud).map(|(r, m)| (r.to_string(), m)).collect();
    println!("routes on the hud: {routes:?}");

    // Open the main menu by route
    menus.navigate_to_route(hud, &Route::from("Main"), &mut ui, &mut observer);
    println!("main visible: {}, focus: {:?}", menus.is_visible(main, &ui), ui.focus(user));
    assert_eq!(ui.focus(user), Some(play), "default focus lands on Play");

    // The options nav button switches exclusively to the options menu
    menus.release_nav_button(hud, options_button, &mut ui, &mut observer);
    assert!(!menus.is_visible(main, &ui), "siblings are mutually exclusive");
    assert!(menus.is_visible(options, &ui));
    assert!(ui.is_pressed(options_button), "nav button mirrors the active route");
    println!("options open, focus: {:?}", ui.focus(user));

    // Escape fires Back on release and closes the options menu
    let escape = KeyChord::new(Key::Escape);
    menus.handle_key(options, escape, true, &bindings, &mut ui, &mut observer);
    menus.handle_key(options, escape, false, &bindings, &mut ui, &mut observer);
    assert!(menus.active_route(hud).is_some_and(Route::is_none));
    println!("any menu open after back: {}", menus.is_any_menu_visible(hud, &ui));
}

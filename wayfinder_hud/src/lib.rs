// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder HUD: per-player coordination of menu regions, input mode, focus and cursor.
//!
//! ## Overview
//!
//! A [`Hud`] belongs to one player and ties the other Wayfinder crates together:
//!
//! - It owns a [`MenuTree`](wayfinder_menu::MenuTree) with up to three kinds of top-level
//!   region: a player-screen HUD, a viewport HUD and a HUD per possessed pawn.
//! - Whenever a menu in a region opens or closes, an [`InputModeCoordinator`] re-derives the
//!   [`InputMode`] and whether the cursor is frozen to the screen center
//!   (see [`derive_input_mode`]), and the result is pushed to the [`PlayerController`], the
//!   optional analog cursor and the [`CursorAppearance`].
//! - A [`FocusGuard`] watches focus changes and puts focus back into an open menu when it
//!   escapes to nothing or to a widget outside every region.
//!
//! ## Input mode
//!
//! | Screen or viewport menu open | Pawn menu open | Mode | Cursor frozen |
//! |---|---|---|---|
//! | yes | any | `Ui` | no |
//! | no | yes | `GameAndUi` | no |
//! | no | no | `Game` | pawn preference (default yes) |
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use wayfinder_hud::{ControllerState, Hud, InputMode};
//! use wayfinder_input::key::UserIndex;
//! use wayfinder_menu::{MenuOptions, Route};
//! use wayfinder_widget_tree::{LocalWidget, WidgetTree};
//!
//! let user = UserIndex(0);
//! let mut ui = WidgetTree::new();
//! let screen = ui.insert(None, LocalWidget::new(Rect::new(0.0, 0.0, 1280.0, 720.0)));
//! let pause = ui.insert(Some(screen), LocalWidget::default());
//! let resume = ui.insert(Some(pause), LocalWidget::button(Rect::new(10.0, 10.0, 90.0, 40.0)));
//!
//! let mut hud = Hud::new(user, ControllerState::default());
//! let region = hud.attach_screen_hud(screen, &mut ui).unwrap();
//! hud.create_menu(pause, MenuOptions::menu(user).auto_register("Pause").default_focus(resume), &mut ui)
//!     .unwrap();
//! assert_eq!(hud.input_mode(), Some(InputMode::Game));
//!
//! hud.navigate_to_route(region, &Route::from("Pause"), &mut ui);
//! assert_eq!(hud.input_mode(), Some(InputMode::Ui));
//! assert!(hud.controller().cursor_visible);
//! ```

mod appearance;
mod controller;
mod guard;
mod hud;
mod mode;

pub use appearance::{AppearanceListenerId, AppearanceSnapshot, CursorAppearance, CursorContexts};
pub use controller::{ControllerState, PlayerController};
pub use guard::{FocusGuard, HudRegion, RegionState, Regions, RestoreScope};
pub use hud::{Hud, HudHost, PawnId};
pub use mode::{InputMode, InputModeCoordinator, InputModeInputs, ModeDecision, derive_input_mode};

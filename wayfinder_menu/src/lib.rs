// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Menu: a registry of nested menus with routed navigation and focus restoration.
//!
//! ## Overview
//!
//! A [`MenuTree`] manages menus that live somewhere in a host widget tree.
//! Each menu may register child menus under named [`Route`]s; navigating a menu to a route
//! shows that child and hides the previously active one, so exactly one child is open
//! through a given menu at a time.
//! Navigating to [`Route::NONE`] closes the active child.
//!
//! The tree never owns widgets. Visibility, ancestry and keyboard focus go through the
//! [`WidgetHost`] trait; menus are found from widgets by lookup, not by type tests.
//!
//! - [`MenuTree::create_menu`] starts managing a widget and, if configured, registers it
//!   to the nearest ancestor menu.
//! - [`MenuTree::navigate_to_route`] / [`MenuTree::request_navigation`] /
//!   [`MenuTree::handle_back`] drive navigation.
//! - [`MenuTree::restore_focus`] puts keyboard focus back into the deepest open menu.
//! - [`MenuTree::track_focus_change`] records which widget each menu should focus next time.
//!
//! ## Observers and hooks
//!
//! Every show/hide is reported once, synchronously, to a [`MenuObserver`]; HUD code uses
//! this to recompute input modes. Per-menu [`MenuBehavior`] hooks run after the tree's own
//! bookkeeping and may navigate re-entrantly; the navigation that started first notices the
//! route change and stops early.
//!
//! ## Minimal usage
//!
//! ```
//! use wayfinder_input::key::UserIndex;
//! use wayfinder_menu::{MenuOptions, MenuTree, NoopObserver, Route, Visibility, WidgetHost};
//!
//! // A flat host: widget 0 is the root, the others are its children.
//! struct Host { vis: [Visibility; 3], focus: Option<u8> }
//! impl WidgetHost for Host {
//!     type Widget = u8;
//!     fn is_alive(&self, w: u8) -> bool { w < 3 }
//!     fn parent(&self, w: u8) -> Option<u8> { (w > 0).then_some(0) }
//!     fn visibility(&self, w: u8) -> Visibility { self.vis[w as usize] }
//!     fn set_visibility(&mut self, w: u8, v: Visibility) { self.vis[w as usize] = v; }
//!     fn set_keyboard_focus(&mut self, w: u8, _: UserIndex) -> bool { self.focus = Some(w); true }
//!     fn request_keyboard_focus(&mut self, _: u8, _: UserIndex) {}
//! }
//!
//! let user = UserIndex(0);
//! let mut host = Host { vis: [Visibility::Visible; 3], focus: None };
//! let mut tree = MenuTree::new();
//! let mut obs = NoopObserver;
//!
//! let hud = tree.create_menu(0, MenuOptions::sub_hud(user), &mut host, &mut obs).unwrap();
//! let pause = tree
//!     .create_menu(1, MenuOptions::menu(user).auto_register("Pause").default_focus(2), &mut host, &mut obs)
//!     .unwrap();
//! assert_eq!(tree.parent(pause), Some(hud));
//! assert!(!tree.is_visible(pause, &host));
//!
//! tree.navigate_to_route(hud, &Route::from("Pause"), &mut host, &mut obs);
//! assert!(tree.is_any_menu_visible(hud, &host));
//! assert_eq!(host.focus, Some(2));
//!
//! tree.handle_back(pause, &mut host, &mut obs);
//! assert!(!tree.is_any_menu_visible(hud, &host));
//! ```

#![no_std]

extern crate alloc;

mod error;
mod host;
mod tree;
mod types;

pub use error::MenuError;
pub use host::{MenuBehavior, MenuCx, MenuObserver, NoopObserver, WidgetHost};
pub use tree::{MenuOptions, MenuTree};
pub use types::{FocusCause, FocusChange, FocusRestore, MenuId, MenuKind, Route, Visibility};

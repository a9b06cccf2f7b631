// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Widget Tree: a Kurbo-native, in-memory widget tree for driving menus and cursors headlessly.
//!
//! ## Overview
//!
//! [`WidgetTree`] holds a hierarchy of rectangular widgets with z-order, capability
//! [`WidgetFlags`] and a [`Visibility`](wayfinder_menu::Visibility) each, plus the per-player
//! state a UI host keeps around them:
//!
//! - keyboard focus per user, with every transition recorded as a
//!   [`FocusChange`](wayfinder_menu::FocusChange) and deferred focus requests applied by
//!   [`WidgetTree::advance_frame`];
//! - pointer position, player screen region and the shared viewport;
//! - an [`InputDeviceTracker`](wayfinder_input::device::InputDeviceTracker) fed by dispatched
//!   pointer moves;
//! - a log of dispatched pointer events and the pressed state of navigation buttons.
//!
//! It implements [`WidgetHost`](wayfinder_menu::WidgetHost) and
//! [`CursorHost`](wayfinder_cursor::host::CursorHost), so menu trees, analog cursors and HUDs
//! can run against it in tests, demos and benchmarks.
//!
//! ## Hit testing
//!
//! [`WidgetTree::hit_test`] returns the topmost hit-testable widget under a point: higher
//! z-index wins, and among equal z the newer [`WidgetId`] wins. A widget is hit-testable when it
//! is `Visible` and every ancestor is `Visible` or `SelfHitTestInvisible`.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::{Point, Rect};
//! use wayfinder_input::key::UserIndex;
//! use wayfinder_menu::FocusCause;
//! use wayfinder_widget_tree::{LocalWidget, WidgetTree};
//!
//! let mut ui = WidgetTree::new();
//! let panel = ui.insert(None, LocalWidget::new(Rect::new(0.0, 0.0, 200.0, 100.0)));
//! let ok = ui.insert(Some(panel), LocalWidget::button(Rect::new(10.0, 10.0, 90.0, 40.0)));
//!
//! let hit = ui.hit_test(Point::new(20.0, 20.0)).unwrap();
//! assert_eq!(hit.widget, ok);
//! assert_eq!(hit.path, vec![panel, ok]);
//!
//! assert!(ui.set_focus(ok, UserIndex(0), FocusCause::Navigation));
//! assert_eq!(ui.take_focus_changes()[0].new_leaf(), Some(ok));
//! ```

#![no_std]

extern crate alloc;

mod host;
mod tree;
mod types;

pub use tree::{Hit, WidgetTree};
pub use types::{LocalWidget, PointerRecord, WidgetFlags, WidgetId};

// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Input: device detection and navigation key routing for UI focus systems.
//!
//! ## Overview
//!
//! This crate holds the input-facing half of Wayfinder.
//! It does not poll hardware.
//! Instead, feed it already-decoded [`InputEvent`](crate::event::InputEvent) values from your platform layer and it tells you:
//!
//! - which device a player is currently using ([`InputDeviceTracker`](crate::device::InputDeviceTracker)),
//! - which focus-navigation direction or action a key stands for ([`NavigationKeyRouter`](crate::router::NavigationKeyRouter)),
//! - which named actions a key chord triggers for a widget ([`ActionListeners`](crate::listener::ActionListeners)).
//!
//! ## Bindings
//!
//! Key bindings live in a [`BindingStore`](crate::binding::BindingStore): a map from action name to a list of
//! [`KeyChord`](crate::key::KeyChord)s. The store seeds the standard navigation actions with defaults on first use
//! (see [`NavAction`](crate::action::NavAction)) and, with the `std` feature, persists itself as RON.
//! Anything that can enumerate bindings implements [`BindingSource`](crate::binding::BindingSource).
//!
//! ## Device detection
//!
//! ```
//! use kurbo::Point;
//! use wayfinder_input::device::{InputDevice, InputDeviceTracker};
//! use wayfinder_input::event::{InputEvent, KeyEvent, PointerEvent};
//! use wayfinder_input::key::{Key, UserIndex};
//!
//! let user = UserIndex(0);
//! let mut tracker = InputDeviceTracker::new();
//! assert_eq!(tracker.current_device(user), InputDevice::None);
//!
//! tracker.observe(&InputEvent::KeyDown(KeyEvent::new(Key::GamepadFaceButtonBottom, user)));
//! assert_eq!(tracker.current_device(user), InputDevice::Gamepad);
//!
//! // Small pointer jitter is ignored.
//! let jitter = PointerEvent::moved(user, Point::new(10.0, 10.0), Point::new(11.0, 11.0));
//! tracker.observe(&InputEvent::PointerMove(jitter));
//! assert_eq!(tracker.current_device(user), InputDevice::Gamepad);
//! ```
//!
//! ## Navigation routing
//!
//! ```
//! use wayfinder_input::binding::BindingStore;
//! use wayfinder_input::event::KeyEvent;
//! use wayfinder_input::key::{Key, Modifiers, UserIndex};
//! use wayfinder_input::router::{NavDirection, NavigationKeyRouter};
//!
//! let store = BindingStore::with_defaults();
//! let router = NavigationKeyRouter::from_bindings(&store).unwrap();
//! let tab = KeyEvent::new(Key::Tab, UserIndex(0));
//! assert_eq!(router.direction_for_key(&tab), Some(NavDirection::Next));
//! let shift_tab = tab.with_modifiers(Modifiers::SHIFT);
//! assert_eq!(router.direction_for_key(&shift_tab), Some(NavDirection::Previous));
//! ```
//!
//! This crate is `no_std` and uses `alloc`; the `std` feature (on by default) adds file persistence.

#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod action;
pub mod binding;
pub mod device;
pub mod event;
pub mod key;
pub mod key_mode;
pub mod listener;
pub mod router;

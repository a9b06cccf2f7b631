// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Wayfinder Cursor: a software pointer driven by an analog stick.
//!
//! ## Overview
//!
//! [`AnalogCursor`](crate::analog::AnalogCursor) turns stick deflection into pointer motion for one local player.
//! Each tick it:
//!
//! 1) removes the dead zone from the raw stick value ([`apply_dead_zone`](crate::analog::apply_dead_zone)),
//! 2) slows down over interactable widgets ("sticky widgets"),
//! 3) integrates velocity in [`CursorMode::Accelerated`](crate::config::CursorMode::Accelerated) or
//!    [`CursorMode::Direct`](crate::config::CursorMode::Direct) mode,
//! 4) applies whole pixels and carries the sub-pixel remainder to the next tick,
//! 5) clamps into the screen with a 1px margin and dispatches a pointer-move event.
//!
//! While the stick is deflected, the configured select key is turned into a synthesized
//! left click at the cursor; navigation keys or any keyboard key hand activation back
//! to focus-based navigation.
//!
//! ## Host
//!
//! The cursor never touches a platform directly. The player's pointer position, screen
//! geometry, foreground state, interactable-under-pointer queries and pointer event
//! dispatch all come through [`CursorHost`](crate::host::CursorHost).
//! Missing pieces (no player, no viewport, app in the background) make the tick a no-op.
//!
//! ## Freezing
//!
//! A frozen cursor ignores the stick and pins itself to the center of the player screen
//! every tick. The move events it emits are marked synthetic and report the same
//! previous and current position, so neither device detection nor mouse-delta readers
//! see movement.

pub mod analog;
pub mod config;
pub mod host;

// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::types::Route;

/// Rejected menu-tree operations.
///
/// Every error is also logged when it is produced; callers may ignore the value.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MenuError {
    /// The menu id is stale or was never issued by this tree.
    #[error("menu id is not alive")]
    UnknownMenu,
    /// The host reports the widget as gone.
    #[error("widget is not alive")]
    DeadWidget,
    /// Another menu already manages this widget.
    #[error("widget is already managed by a menu")]
    WidgetAlreadyManaged,
    /// Registration needs a non-empty route.
    #[error("route must not be empty")]
    EmptyRoute,
    /// The parent already has a child at this route.
    #[error("route `{0}` is already taken")]
    RouteTaken(Route),
    /// The child is registered to some parent already.
    #[error("menu is already registered to a parent")]
    AlreadyRegistered,
    /// The child widget is not inside the parent widget.
    #[error("menu is not a descendant of the parent menu")]
    NotDescendant,
}

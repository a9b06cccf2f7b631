// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Detection of undesired focus loss and choice of the region to restore into.

use core::cell::Cell;

use wayfinder_menu::{FocusCause, FocusChange};

/// One of the managed top-level HUD regions.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum HudRegion {
    /// The HUD spanning the whole game viewport.
    Viewport,
    /// The HUD covering the player's split-screen area.
    Screen,
    /// The possessed pawn's HUD.
    Pawn,
}

/// A region's root widget and whether it has a menu open.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RegionState<W> {
    /// Root widget of the region.
    pub widget: W,
    /// Whether any menu in the region is visible.
    pub menu_visible: bool,
}

/// The managed regions that currently exist.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Regions<W> {
    /// Viewport HUD.
    pub viewport: Option<RegionState<W>>,
    /// Player-screen HUD.
    pub screen: Option<RegionState<W>>,
    /// Pawn HUD of the possessed pawn.
    pub pawn: Option<RegionState<W>>,
}

impl<W> Default for Regions<W> {
    fn default() -> Self {
        Self {
            viewport: None,
            screen: None,
            pawn: None,
        }
    }
}

impl<W: Copy + PartialEq> Regions<W> {
    /// Regions in restoration priority order.
    const ORDER: [HudRegion; 3] = [HudRegion::Viewport, HudRegion::Screen, HudRegion::Pawn];

    /// State of one region.
    pub fn get(&self, region: HudRegion) -> Option<RegionState<W>> {
        match region {
            HudRegion::Viewport => self.viewport,
            HudRegion::Screen => self.screen,
            HudRegion::Pawn => self.pawn,
        }
    }

    /// The first region, in priority order, whose root widget lies on `path`.
    pub fn containing(&self, path: &[W]) -> Option<HudRegion> {
        Self::ORDER
            .into_iter()
            .find(|r| self.get(*r).is_some_and(|s| path.contains(&s.widget)))
    }

    /// The first region, in priority order, with a menu open.
    pub fn first_with_menu(&self) -> Option<HudRegion> {
        Self::ORDER
            .into_iter()
            .find(|r| self.get(*r).is_some_and(|s| s.menu_visible))
    }
}

/// Watches focus changes and decides when and where focus must be restored.
///
/// The in-flight flag belongs to the guard instance. While a restoration runs inside
/// [`enter`](Self::enter)'s scope, further changes are not evaluated.
#[derive(Debug, Default)]
pub struct FocusGuard {
    restoring: Cell<bool>,
}

/// Marks a restoration as in flight until dropped.
#[derive(Debug)]
pub struct RestoreScope<'a> {
    guard: &'a FocusGuard,
}

impl Drop for RestoreScope<'_> {
    fn drop(&mut self) {
        self.guard.restoring.set(false);
    }
}

impl FocusGuard {
    /// A guard with nothing in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a restoration is in flight.
    pub fn is_restoring(&self) -> bool {
        self.restoring.get()
    }

    /// Start a restoration. Returns `None` if one is already in flight.
    pub fn enter(&self) -> Option<RestoreScope<'_>> {
        if self.restoring.replace(true) {
            log::trace!("focus guard re-entered, ignoring");
            return None;
        }
        Some(RestoreScope { guard: self })
    }

    /// Whether `change` lost focus in a way the menu system should undo.
    ///
    /// Anything but a direct set or a navigation move is undesired, as is losing focus to
    /// nothing. A change that lands outside every managed region is undesired too.
    pub fn is_undesired<W: Copy + PartialEq>(&self, change: &FocusChange<W>, regions: &Regions<W>) -> bool {
        if !matches!(change.cause, FocusCause::SetDirectly | FocusCause::Navigation)
            || change.new_path.is_empty()
        {
            log::trace!("undesired focus loss ({:?})", change.cause);
            return true;
        }
        if regions.containing(&change.new_path).is_none() {
            log::trace!("undesired focus loss (outside every hud region)");
            return true;
        }
        false
    }

    /// The region to restore focus into after an undesired change.
    ///
    /// Prefers the region the old focus was in, if it still has a menu open. Otherwise the
    /// first region with an open menu: viewport, then screen, then pawn.
    pub fn restore_target<W: Copy + PartialEq>(
        &self,
        change: &FocusChange<W>,
        regions: &Regions<W>,
    ) -> Option<HudRegion> {
        let previous = regions
            .containing(&change.old_path)
            .filter(|r| regions.get(*r).is_some_and(|s| s.menu_visible));
        if previous.is_none() && regions.containing(&change.old_path).is_some() {
            log::trace!("previous hud region has no open menu, falling back");
        }
        previous.or_else(|| regions.first_with_menu())
    }
}

// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The per-player HUD: menu regions, input mode, focus guarding and the analog cursor.

use std::collections::BTreeMap;
use std::fmt::Debug;

use kurbo::Point;
use wayfinder_cursor::analog::AnalogCursor;
use wayfinder_cursor::config::{AnalogCursorConfig, CursorScreenSpace};
use wayfinder_cursor::host::CursorHost;
use wayfinder_input::binding::BindingSource;
use wayfinder_input::event::{AnalogInputEvent, KeyEvent};
use wayfinder_input::key::{KeyChord, UserIndex};
use wayfinder_input::router::NavigationKeyRouter;
use wayfinder_menu::{
    FocusChange, FocusRestore, MenuError, MenuId, MenuObserver, MenuOptions, MenuTree, Route,
    Visibility, WidgetHost,
};

use crate::appearance::{CursorAppearance, CursorContexts};
use crate::controller::PlayerController;
use crate::guard::{FocusGuard, HudRegion, RegionState, Regions};
use crate::mode::{InputMode, InputModeCoordinator, ModeDecision};

/// Everything a [`Hud`] drives: the widget system and the pointer.
pub trait HudHost: WidgetHost + CursorHost {}

impl<T: WidgetHost + CursorHost + ?Sized> HudHost for T {}

/// Identifies a pawn the player can possess.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PawnId(pub u64);

/// Marks the HUD dirty when a menu inside one of its regions changes.
struct RegionObserver {
    roots: [Option<MenuId>; 3],
    touched: bool,
}

impl RegionObserver {
    fn in_region<W: Copy + Ord + Debug + 'static>(&self, tree: &MenuTree<W>, menu: MenuId) -> bool {
        let mut cursor = Some(menu);
        while let Some(m) = cursor {
            if self.roots.contains(&Some(m)) {
                return true;
            }
            cursor = tree.parent(m);
        }
        false
    }
}

impl<W: Copy + Ord + Debug + 'static> MenuObserver<W> for RegionObserver {
    fn visibility_changed(&mut self, tree: &MenuTree<W>, menu: MenuId, _visible: bool) {
        if self.in_region(tree, menu) {
            self.touched = true;
        }
    }

    fn registrations_changed(&mut self, tree: &MenuTree<W>, parent: MenuId, _route: &Route) {
        if self.in_region(tree, parent) {
            self.touched = true;
        }
    }
}

/// A player's HUD.
///
/// Owns the menu tree with three kinds of region: the player-screen HUD, the viewport HUD
/// and one HUD per possessed pawn. Whenever a menu inside a region opens or closes, the HUD
/// re-derives the [`InputMode`] and the cursor freeze and pushes them to the
/// [`PlayerController`], the analog cursor and the [`CursorAppearance`].
pub struct Hud<W, C> {
    user: UserIndex,
    menus: MenuTree<W>,
    screen: Option<MenuId>,
    viewport: Option<MenuId>,
    pawn_huds: BTreeMap<PawnId, MenuId>,
    pawn: Option<PawnId>,
    coordinator: InputModeCoordinator,
    guard: FocusGuard,
    cursor: Option<AnalogCursor>,
    frozen: bool,
    appearance: CursorAppearance,
    controller: C,
}

impl<W: Debug, C> Debug for Hud<W, C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Hud")
            .field("user", &self.user)
            .field("menus", &self.menus)
            .field("screen", &self.screen)
            .field("viewport", &self.viewport)
            .field("pawn", &self.pawn)
            .field("coordinator", &self.coordinator)
            .field("cursor_enabled", &self.cursor.is_some())
            .field("frozen", &self.frozen)
            .finish_non_exhaustive()
    }
}

impl<W: Copy + Ord + Debug + 'static, C: PlayerController> Hud<W, C> {
    /// A HUD for `user` with no regions attached yet.
    pub fn new(user: UserIndex, controller: C) -> Self {
        let mut appearance = CursorAppearance::new();
        appearance.add(CursorContexts::PAWN_DESIRES_CENTERED_WORLD_CURSOR);
        Self {
            user,
            menus: MenuTree::new(),
            screen: None,
            viewport: None,
            pawn_huds: BTreeMap::new(),
            pawn: None,
            coordinator: InputModeCoordinator::new(),
            guard: FocusGuard::new(),
            cursor: None,
            frozen: false,
            appearance,
            controller,
        }
    }

    /// The owning player.
    pub fn user(&self) -> UserIndex {
        self.user
    }

    /// The menu tree.
    pub fn menus(&self) -> &MenuTree<W> {
        &self.menus
    }

    /// The player-screen HUD menu.
    pub fn screen_hud(&self) -> Option<MenuId> {
        self.screen
    }

    /// The viewport HUD menu.
    pub fn viewport_hud(&self) -> Option<MenuId> {
        self.viewport
    }

    /// The HUD menu of `pawn`, if one was created.
    pub fn pawn_hud(&self, pawn: PawnId) -> Option<MenuId> {
        self.pawn_huds.get(&pawn).copied()
    }

    /// The possessed pawn.
    pub fn possessed_pawn(&self) -> Option<PawnId> {
        self.pawn
    }

    /// The input mode last pushed to the controller.
    pub fn input_mode(&self) -> Option<InputMode> {
        self.coordinator.current().map(|d| d.mode)
    }

    /// Whether the cursor is frozen to the screen center.
    pub fn is_cursor_frozen(&self) -> bool {
        self.frozen
    }

    /// Cursor appearance state.
    pub fn appearance(&self) -> &CursorAppearance {
        &self.appearance
    }

    /// Cursor appearance state, for subscribing.
    pub fn appearance_mut(&mut self) -> &mut CursorAppearance {
        &mut self.appearance
    }

    /// The controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The controller, mutably.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// The focus guard.
    pub fn focus_guard(&self) -> &FocusGuard {
        &self.guard
    }

    // --- Regions ---

    /// Manage `widget` as the player-screen HUD, replacing any previous one.
    pub fn attach_screen_hud(&mut self, widget: W, host: &mut impl HudHost<Widget = W>) -> Result<MenuId, MenuError> {
        let id = self.attach_region(widget, self.screen, host)?;
        self.screen = Some(id);
        self.sync_regions(host);
        Ok(id)
    }

    /// Manage `widget` as the viewport HUD, replacing any previous one.
    pub fn attach_viewport_hud(&mut self, widget: W, host: &mut impl HudHost<Widget = W>) -> Result<MenuId, MenuError> {
        let id = self.attach_region(widget, self.viewport, host)?;
        self.viewport = Some(id);
        self.sync_regions(host);
        Ok(id)
    }

    fn attach_region(
        &mut self,
        widget: W,
        previous: Option<MenuId>,
        host: &mut impl HudHost<Widget = W>,
    ) -> Result<MenuId, MenuError> {
        let mut observer = self.observer();
        if let Some(old) = previous {
            self.menus.remove_menu(old, &mut observer);
        }
        self.menus
            .create_menu(widget, MenuOptions::sub_hud(self.user), host, &mut observer)
    }

    /// Take control of `pawn`, showing its HUD.
    ///
    /// The pawn HUD is created from `hud_widget` the first time the pawn is possessed.
    /// A previously possessed pawn is released first. The pawn's cursor preference starts
    /// at "centered".
    pub fn possess(
        &mut self,
        pawn: PawnId,
        hud_widget: Option<W>,
        host: &mut impl HudHost<Widget = W>,
    ) -> Result<Option<MenuId>, MenuError> {
        if let Some(current) = self.pawn
            && current != pawn
        {
            self.unpossess(host);
        }
        let hud = match (self.pawn_huds.get(&pawn).copied(), hud_widget) {
            (Some(existing), _) => Some(existing),
            (None, Some(widget)) => {
                let mut observer = self.observer();
                let id = self
                    .menus
                    .create_menu(widget, MenuOptions::sub_hud(self.user), host, &mut observer)?;
                self.pawn_huds.insert(pawn, id);
                Some(id)
            }
            (None, None) => {
                log::warn!("pawn {pawn:?} has no hud widget, ignore if not required");
                None
            }
        };
        if let Some(widget) = hud.and_then(|id| self.menus.widget(id)) {
            host.set_visibility(widget, Visibility::SelfHitTestInvisible);
        }
        log::debug!("user {} possessed {pawn:?}", self.user.0);
        self.pawn = Some(pawn);
        self.set_pawn_preference(true, host);
        self.sync_regions(host);
        Ok(hud)
    }

    /// Release the possessed pawn, collapsing its HUD. Returns whether a pawn was possessed.
    pub fn unpossess(&mut self, host: &mut impl HudHost<Widget = W>) -> bool {
        let Some(pawn) = self.pawn.take() else {
            return false;
        };
        if let Some(widget) = self.pawn_hud(pawn).and_then(|id| self.menus.widget(id)) {
            host.set_visibility(widget, Visibility::Collapsed);
        }
        log::debug!("user {} released {pawn:?}", self.user.0);
        self.set_pawn_preference(true, host);
        self.sync_regions(host);
        true
    }

    /// Forget a destroyed pawn and its HUD. Returns whether the pawn had a HUD.
    pub fn destroy_pawn(&mut self, pawn: PawnId, host: &mut impl HudHost<Widget = W>) -> bool {
        if self.pawn == Some(pawn) {
            self.unpossess(host);
        }
        let Some(id) = self.pawn_huds.remove(&pawn) else {
            return false;
        };
        if let Some(widget) = self.menus.widget(id) {
            host.set_visibility(widget, Visibility::Collapsed);
        }
        let mut observer = self.observer();
        self.menus.remove_menu(id, &mut observer);
        true
    }

    /// Record whether the possessed pawn wants the cursor pinned to the screen center.
    pub fn set_pawn_wants_centered_cursor(&mut self, wants: bool, host: &mut impl HudHost<Widget = W>) {
        self.set_pawn_preference(wants, host);
    }

    fn set_pawn_preference(&mut self, wants: bool, host: &mut impl HudHost<Widget = W>) {
        self.appearance
            .set_context(CursorContexts::PAWN_DESIRES_CENTERED_WORLD_CURSOR, wants);
        if let Some(decision) = self.coordinator.set_pawn_wants_centered_cursor(wants) {
            self.apply(decision, host);
        }
    }

    /// Current state of the managed regions.
    pub fn regions(&self, host: &impl HudHost<Widget = W>) -> Regions<W> {
        let state = |id: Option<MenuId>| {
            let id = id?;
            Some(RegionState {
                widget: self.menus.widget(id)?,
                menu_visible: self.menus.is_any_menu_visible(id, host),
            })
        };
        Regions {
            viewport: state(self.viewport),
            screen: state(self.screen),
            pawn: state(self.pawn.and_then(|p| self.pawn_hud(p))),
        }
    }

    fn region_menu(&self, region: HudRegion) -> Option<MenuId> {
        match region {
            HudRegion::Viewport => self.viewport,
            HudRegion::Screen => self.screen,
            HudRegion::Pawn => self.pawn.and_then(|p| self.pawn_hud(p)),
        }
    }

    /// Re-read region visibility and push any input mode change.
    ///
    /// Menu operations made through the HUD call this automatically.
    pub fn sync_regions(&mut self, host: &mut impl HudHost<Widget = W>) {
        let regions = self.regions(&*host);
        let open = |r: Option<RegionState<W>>| r.is_some_and(|s| s.menu_visible);
        let (screen, viewport, pawn) = (open(regions.screen), open(regions.viewport), open(regions.pawn));

        self.appearance
            .set_context(CursorContexts::PLAYER_SCREEN_HUD_MENU_VISIBLE, screen);
        self.appearance
            .set_context(CursorContexts::PLAYER_VIEWPORT_HUD_MENU_VISIBLE, viewport);
        self.appearance
            .set_context(CursorContexts::PAWN_HUD_MENU_VISIBLE, pawn);
        self.appearance
            .set_context(CursorContexts::ANY_SUB_HUD_MENU_VISIBLE, screen || viewport || pawn);

        if let Some(decision) = self.coordinator.set_regions(screen, viewport, pawn) {
            self.apply(decision, host);
        }
    }

    fn apply(&mut self, decision: ModeDecision, host: &mut impl HudHost<Widget = W>) {
        self.controller.activate_input_mode(decision.mode);
        self.set_cursor_frozen(decision.freeze_cursor, host);
    }

    fn observer(&self) -> RegionObserver {
        RegionObserver {
            roots: [
                self.screen,
                self.viewport,
                self.pawn.and_then(|p| self.pawn_hud(p)),
            ],
            touched: false,
        }
    }

    // --- Menus ---

    /// Run menu operations with region tracking, then sync the input mode if a region changed.
    pub fn with_menus<R>(
        &mut self,
        host: &mut impl HudHost<Widget = W>,
        f: impl FnOnce(&mut MenuTree<W>, &mut dyn WidgetHost<Widget = W>, &mut dyn MenuObserver<W>) -> R,
    ) -> R {
        let mut observer = self.observer();
        let out = f(&mut self.menus, &mut *host, &mut observer);
        if observer.touched {
            self.sync_regions(host);
        }
        out
    }

    /// Create a menu. See [`MenuTree::create_menu`].
    pub fn create_menu(
        &mut self,
        widget: W,
        options: MenuOptions<W>,
        host: &mut impl HudHost<Widget = W>,
    ) -> Result<MenuId, MenuError> {
        self.with_menus(host, |menus, host, observer| {
            menus.create_menu(widget, options, host, observer)
        })
    }

    /// See [`MenuTree::navigate_to_route`].
    pub fn navigate_to_route(
        &mut self,
        menu: MenuId,
        route: &Route,
        host: &mut impl HudHost<Widget = W>,
    ) -> Option<MenuId> {
        self.with_menus(host, |menus, host, observer| {
            menus.navigate_to_route(menu, route, host, observer)
        })
    }

    /// See [`MenuTree::request_navigation`].
    pub fn request_navigation(
        &mut self,
        menu: MenuId,
        route: &Route,
        host: &mut impl HudHost<Widget = W>,
    ) -> Option<MenuId> {
        self.with_menus(host, |menus, host, observer| {
            menus.request_navigation(menu, route, host, observer)
        })
    }

    /// See [`MenuTree::handle_back`].
    pub fn handle_back(&mut self, menu: MenuId, host: &mut impl HudHost<Widget = W>) -> bool {
        self.with_menus(host, |menus, host, observer| menus.handle_back(menu, host, observer))
    }

    /// See [`MenuTree::release_nav_button`].
    pub fn release_nav_button(
        &mut self,
        menu: MenuId,
        button: W,
        host: &mut impl HudHost<Widget = W>,
    ) -> Option<MenuId> {
        self.with_menus(host, |menus, host, observer| {
            menus.release_nav_button(menu, button, host, observer)
        })
    }

    /// See [`MenuTree::handle_key`].
    pub fn handle_menu_key(
        &mut self,
        menu: MenuId,
        chord: KeyChord,
        is_down: bool,
        source: &impl BindingSource,
        host: &mut impl HudHost<Widget = W>,
    ) -> bool {
        self.with_menus(host, |menus, host, observer| {
            menus.handle_key(menu, chord, is_down, source, host, observer)
        })
    }

    // --- Focus ---

    /// React to one focus change reported by the host.
    ///
    /// Preferences are always tracked. Undesired focus loss is undone by restoring focus
    /// into the best region; changes the host records during that restoration are tracked
    /// for preference only. Returns the restoration outcome if one ran.
    pub fn handle_focus_change(
        &mut self,
        change: &FocusChange<W>,
        host: &mut impl HudHost<Widget = W>,
    ) -> Option<FocusRestore> {
        log::trace!(
            "focus change ({:?}) to {:?}",
            change.cause,
            change.new_leaf()
        );
        self.menus.track_focus_change(change);
        if self.guard.is_restoring() {
            log::trace!("focus change during restoration, tracking only");
            return None;
        }

        let regions = self.regions(&*host);
        if !self.guard.is_undesired(change, &regions) {
            return None;
        }
        let Some(region) = self.guard.restore_target(change, &regions) else {
            log::trace!("no hud region with an open menu to restore focus to");
            return None;
        };
        let menu = self.region_menu(region)?;

        let scope = self.guard.enter()?;
        log::trace!("restoring focus into the {region:?} hud");
        let outcome = self.menus.restore_focus(menu, host);
        for nested in host.take_focus_changes() {
            self.menus.track_focus_change(&nested);
        }
        drop(scope);
        Some(outcome)
    }

    /// Drain the host's recorded focus changes and handle each in order.
    ///
    /// Returns the number of restorations that ran.
    pub fn process_focus_changes(&mut self, host: &mut impl HudHost<Widget = W>) -> usize {
        let mut restored = 0;
        for change in host.take_focus_changes() {
            if self.handle_focus_change(&change, host).is_some() {
                restored += 1;
            }
        }
        restored
    }

    // --- Cursor ---

    /// Whether the cursor is pinned to the screen center.
    ///
    /// The next input mode change overrides this.
    pub fn set_cursor_frozen(&mut self, frozen: bool, host: &mut impl HudHost<Widget = W>) {
        self.frozen = frozen;
        if let Some(cursor) = &mut self.cursor {
            cursor.set_freeze_to_center(frozen);
        }
        self.appearance.set_frozen(frozen);
        self.center_hardware_cursor(&*host);
    }

    /// Start driving the pointer with an analog stick. Returns false if already enabled.
    pub fn enable_analog_cursor(&mut self, config: AnalogCursorConfig, navigation: NavigationKeyRouter) -> bool {
        if self.cursor.is_some() {
            return false;
        }
        let mut cursor = AnalogCursor::new(self.user, config, navigation);
        cursor.set_freeze_to_center(self.frozen);
        self.cursor = Some(cursor);
        log::debug!("analog cursor enabled for user {}", self.user.0);
        true
    }

    /// Stop driving the pointer with an analog stick. Returns false if not enabled.
    pub fn disable_analog_cursor(&mut self) -> bool {
        let was = self.cursor.take().is_some();
        if was {
            log::debug!("analog cursor disabled for user {}", self.user.0);
        }
        was
    }

    /// The analog cursor, if enabled.
    pub fn analog_cursor(&self) -> Option<&AnalogCursor> {
        self.cursor.as_ref()
    }

    /// The analog cursor, if enabled.
    pub fn analog_cursor_mut(&mut self) -> Option<&mut AnalogCursor> {
        self.cursor.as_mut()
    }

    /// The analog cursor position when enabled, else the host pointer.
    pub fn cursor_position(&self, host: &impl HudHost<Widget = W>) -> Option<Point> {
        match &self.cursor {
            Some(cursor) => Some(cursor.position()),
            None => host.cursor_position(self.user),
        }
    }

    /// Offer a stick sample to the analog cursor. Returns whether it was consumed.
    pub fn handle_analog_input(&mut self, event: &AnalogInputEvent) -> bool {
        self.cursor
            .as_mut()
            .is_some_and(|c| c.handle_analog_input(event))
    }

    /// Offer a key press to the analog cursor. Returns whether it was consumed.
    pub fn handle_key_down(&mut self, event: &KeyEvent, host: &mut impl HudHost<Widget = W>) -> bool {
        match &mut self.cursor {
            Some(cursor) => cursor.handle_key_down(event, host),
            None => false,
        }
    }

    /// Offer a key release to the analog cursor. Returns whether it was consumed.
    pub fn handle_key_up(&mut self, event: &KeyEvent, host: &mut impl HudHost<Widget = W>) -> bool {
        match &mut self.cursor {
            Some(cursor) => cursor.handle_key_up(event, host),
            None => false,
        }
    }

    /// Advance one frame: move the analog cursor, refresh the device shown by the
    /// appearance and keep a frozen hardware cursor centered.
    pub fn tick(&mut self, dt: f64, host: &mut impl HudHost<Widget = W>) {
        if let Some(cursor) = &mut self.cursor {
            cursor.tick(dt, host);
        }
        self.appearance
            .set_device(host.current_input_device(self.user));
        self.center_hardware_cursor(&*host);
    }

    fn center_hardware_cursor(&mut self, host: &impl HudHost<Widget = W>) {
        if !self.frozen {
            return;
        }
        if !host.is_foreground() {
            log::trace!("application in background, hardware cursor left alone");
            return;
        }
        let Some(screen) = host.screen_geometry(CursorScreenSpace::PlayerScreen, self.user) else {
            log::debug!("no player screen for user {}, can't center cursor", self.user.0);
            return;
        };
        self.controller.set_mouse_location(screen.center());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::ControllerState;
    use kurbo::Rect;
    use wayfinder_input::device::InputDevice;
    use wayfinder_input::key::Key;
    use wayfinder_menu::FocusCause;
    use wayfinder_widget_tree::{LocalWidget, WidgetId, WidgetTree};

    const USER: UserIndex = UserIndex(0);
    const SCREEN_RECT: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

    struct Fixture {
        ui: WidgetTree,
        hud: Hud<WidgetId, ControllerState>,
        screen_w: WidgetId,
        viewport_w: WidgetId,
        pawn_w: WidgetId,
        pause: MenuId,
        resume: WidgetId,
        quit: WidgetId,
        dialog: MenuId,
        ok: WidgetId,
        outside: WidgetId,
    }

    fn region(ui: &mut WidgetTree) -> WidgetId {
        ui.insert(None, LocalWidget::new(SCREEN_RECT))
    }

    fn panel(ui: &mut WidgetTree, parent: WidgetId) -> WidgetId {
        ui.insert(Some(parent), LocalWidget::new(Rect::new(400.0, 200.0, 1500.0, 900.0)))
    }

    fn button(ui: &mut WidgetTree, parent: WidgetId, y: f64) -> WidgetId {
        ui.insert(Some(parent), LocalWidget::button(Rect::new(800.0, y, 1100.0, y + 60.0)))
    }

    fn fixture() -> Fixture {
        let mut ui = WidgetTree::new();
        ui.set_viewport(Some(SCREEN_RECT));
        ui.set_player_screen(USER, Some(SCREEN_RECT));
        ui.set_pointer_position(USER, Point::new(10.0, 10.0));

        let screen_w = region(&mut ui);
        let pause_w = panel(&mut ui, screen_w);
        let resume = button(&mut ui, pause_w, 300.0);
        let quit = button(&mut ui, pause_w, 400.0);
        let viewport_w = region(&mut ui);
        let dialog_w = panel(&mut ui, viewport_w);
        let ok = button(&mut ui, dialog_w, 500.0);
        let pawn_w = region(&mut ui);
        let outside = ui.insert(None, LocalWidget::button(Rect::new(0.0, 0.0, 5.0, 5.0)));

        let mut hud = Hud::new(USER, ControllerState::default());
        hud.attach_screen_hud(screen_w, &mut ui).unwrap();
        hud.attach_viewport_hud(viewport_w, &mut ui).unwrap();
        let pause = hud
            .create_menu(pause_w, MenuOptions::menu(USER).auto_register("Pause").default_focus(resume), &mut ui)
            .unwrap();
        let dialog = hud
            .create_menu(dialog_w, MenuOptions::menu(USER).auto_register("Dialog").default_focus(ok), &mut ui)
            .unwrap();
        Fixture {
            ui,
            hud,
            screen_w,
            viewport_w,
            pawn_w,
            pause,
            resume,
            quit,
            dialog,
            ok,
            outside,
        }
    }

    impl Fixture {
        fn open(&mut self, region: MenuId, route: &str) {
            self.hud.navigate_to_route(region, &Route::from(route), &mut self.ui);
        }

        fn screen(&self) -> MenuId {
            self.hud.screen_hud().unwrap()
        }

        fn viewport(&self) -> MenuId {
            self.hud.viewport_hud().unwrap()
        }
    }

    #[test]
    fn starts_in_game_mode_with_centered_cursor() {
        let f = fixture();
        assert_eq!(f.hud.input_mode(), Some(InputMode::Game));
        assert!(f.hud.is_cursor_frozen(), "pawn preference defaults to centered");
        let controller = f.hud.controller();
        assert_eq!(controller.activations, 1, "later attachments changed nothing");
        assert!(!controller.cursor_visible);
        assert_eq!(controller.mouse_location, Some(Point::new(960.0, 540.0)));
        assert!(f.hud.appearance().has(CursorContexts::PAWN_DESIRES_CENTERED_WORLD_CURSOR));
    }

    #[test]
    fn screen_menu_switches_to_ui_and_back() {
        let mut f = fixture();
        let screen = f.screen();
        f.open(screen, "Pause");
        assert_eq!(f.hud.input_mode(), Some(InputMode::Ui));
        assert!(!f.hud.is_cursor_frozen());
        assert!(f.hud.controller().cursor_visible);
        assert!(f.hud.appearance().has(
            CursorContexts::PLAYER_SCREEN_HUD_MENU_VISIBLE | CursorContexts::ANY_SUB_HUD_MENU_VISIBLE
        ));
        assert_eq!(f.ui.focus(USER), Some(f.resume), "default focus");

        assert!(f.hud.handle_back(f.pause, &mut f.ui), "back closes the pause menu");
        assert_eq!(f.hud.input_mode(), Some(InputMode::Game));
        assert!(f.hud.is_cursor_frozen(), "centered again");
        assert!(f.hud.appearance().contexts() == CursorContexts::PAWN_DESIRES_CENTERED_WORLD_CURSOR);
    }

    #[test]
    fn pawn_hud_follows_possession() {
        let mut f = fixture();
        let pawn = PawnId(7);
        let pawn_hud = f.hud.possess(pawn, Some(f.pawn_w), &mut f.ui).unwrap().unwrap();
        assert_eq!(f.hud.possessed_pawn(), Some(pawn));
        assert_eq!(f.ui.local(f.pawn_w).unwrap().visibility, Visibility::SelfHitTestInvisible);

        let inv_w = panel(&mut f.ui, f.pawn_w);
        let slot = button(&mut f.ui, inv_w, 300.0);
        f.hud
            .create_menu(inv_w, MenuOptions::menu(USER).auto_register("Inventory").default_focus(slot), &mut f.ui)
            .unwrap();
        f.open(pawn_hud, "Inventory");
        assert_eq!(f.hud.input_mode(), Some(InputMode::GameAndUi));
        assert!(!f.hud.is_cursor_frozen());

        assert!(f.hud.unpossess(&mut f.ui));
        assert_eq!(f.ui.local(f.pawn_w).unwrap().visibility, Visibility::Collapsed);
        assert_eq!(f.hud.input_mode(), Some(InputMode::Game), "collapsed hud counts as closed");

        assert_eq!(f.hud.possess(pawn, None, &mut f.ui).unwrap(), Some(pawn_hud), "hud reused");
        assert_eq!(f.hud.input_mode(), Some(InputMode::GameAndUi), "inventory still open");

        assert!(f.hud.destroy_pawn(pawn, &mut f.ui));
        assert_eq!(f.hud.pawn_hud(pawn), None);
        assert_eq!(f.hud.possessed_pawn(), None);
        assert_eq!(f.hud.input_mode(), Some(InputMode::Game));
        assert!(!f.hud.destroy_pawn(pawn, &mut f.ui), "already gone");
    }

    #[test]
    fn pawn_without_hud_still_possesses() {
        let mut f = fixture();
        assert_eq!(f.hud.possess(PawnId(1), None, &mut f.ui).unwrap(), None);
        assert_eq!(f.hud.possessed_pawn(), Some(PawnId(1)));
    }

    #[test]
    fn pawn_preference_only_matters_in_game_mode() {
        let mut f = fixture();
        f.hud.set_pawn_wants_centered_cursor(false, &mut f.ui);
        assert!(!f.hud.is_cursor_frozen());
        assert!(!f.hud.appearance().has(CursorContexts::PAWN_DESIRES_CENTERED_WORLD_CURSOR));

        let screen = f.screen();
        f.open(screen, "Pause");
        f.hud.set_pawn_wants_centered_cursor(true, &mut f.ui);
        assert!(!f.hud.is_cursor_frozen(), "menus keep the cursor free");
    }

    #[test]
    fn focus_escaping_to_unmanaged_widget_returns_to_viewport_menu() {
        let mut f = fixture();
        let viewport = f.viewport();
        f.open(viewport, "Dialog");
        assert_eq!(f.ui.focus(USER), Some(f.ok));
        f.hud.process_focus_changes(&mut f.ui);

        assert!(f.ui.set_focus(f.outside, USER, FocusCause::Unknown));
        let restored = f.hud.process_focus_changes(&mut f.ui);
        assert_eq!(restored, 1);
        assert_eq!(f.ui.focus(USER), Some(f.ok), "focus back on the dialog's entry");
        assert!(f.ui.take_focus_changes().is_empty(), "restoration's own change was consumed");
        assert_eq!(f.hud.menus().preferred_focus(f.dialog, &f.ui), Some(f.ok));
        assert!(!f.hud.focus_guard().is_restoring());
    }

    #[test]
    fn restoration_prefers_the_remembered_widget() {
        let mut f = fixture();
        let screen = f.screen();
        f.open(screen, "Pause");
        f.ui.set_focus(f.quit, USER, FocusCause::Navigation);
        f.hud.process_focus_changes(&mut f.ui);
        assert_eq!(f.hud.menus().preferred_focus(f.pause, &f.ui), Some(f.quit));

        f.ui.clear_focus(USER, FocusCause::WindowFocusLost);
        f.hud.process_focus_changes(&mut f.ui);
        assert_eq!(f.ui.focus(USER), Some(f.quit));
    }

    #[test]
    fn wanted_focus_moves_are_left_alone() {
        let mut f = fixture();
        let screen = f.screen();
        f.open(screen, "Pause");
        f.hud.process_focus_changes(&mut f.ui);
        f.ui.set_focus(f.quit, USER, FocusCause::Navigation);
        assert_eq!(f.hud.process_focus_changes(&mut f.ui), 0);
        assert_eq!(f.ui.focus(USER), Some(f.quit));
    }

    #[test]
    fn nothing_open_means_nothing_to_restore() {
        let mut f = fixture();
        f.ui.set_focus(f.outside, USER, FocusCause::Mouse);
        assert_eq!(f.hud.process_focus_changes(&mut f.ui), 0);
        assert_eq!(f.ui.focus(USER), Some(f.outside));
    }

    #[test]
    fn analog_cursor_follows_freeze() {
        let mut f = fixture();
        assert!(f.hud.enable_analog_cursor(AnalogCursorConfig::default(), NavigationKeyRouter::new()));
        assert!(!f.hud.enable_analog_cursor(AnalogCursorConfig::default(), NavigationKeyRouter::new()));
        assert!(f.hud.analog_cursor().unwrap().is_frozen(), "inherits the hud freeze");

        f.hud.tick(1.0 / 60.0, &mut f.ui);
        assert_eq!(f.ui.pointer_position(USER), Some(Point::new(960.0, 540.0)));
        assert_eq!(f.hud.cursor_position(&f.ui), Some(Point::new(960.0, 540.0)));

        let screen = f.screen();
        f.open(screen, "Pause");
        assert!(!f.hud.analog_cursor().unwrap().is_frozen(), "menu releases it");

        let right = AnalogInputEvent::new(Key::GamepadRightX, USER, 1.0);
        assert!(f.hud.handle_analog_input(&right));
        for _ in 0..30 {
            f.hud.tick(1.0 / 60.0, &mut f.ui);
        }
        let pos = f.hud.cursor_position(&f.ui).unwrap();
        assert!(pos.x > 960.0, "cursor moved right: {pos:?}");
        assert_eq!(f.hud.appearance().snapshot().device, InputDevice::Gamepad);

        assert!(f.hud.disable_analog_cursor());
        assert!(!f.hud.disable_analog_cursor());
        assert_eq!(f.hud.cursor_position(&f.ui), f.ui.pointer_position(USER));
    }

    #[test]
    fn background_app_keeps_hardware_cursor() {
        let mut f = fixture();
        f.hud.controller_mut().mouse_location = None;
        f.ui.set_foreground(false);
        f.hud.tick(1.0 / 60.0, &mut f.ui);
        assert_eq!(f.hud.controller().mouse_location, None);
        f.ui.set_foreground(true);
        f.hud.tick(1.0 / 60.0, &mut f.ui);
        assert_eq!(f.hud.controller().mouse_location, Some(Point::new(960.0, 540.0)));
    }

    #[test]
    fn regions_report_widgets_and_open_menus() {
        let mut f = fixture();
        let viewport = f.viewport();
        f.open(viewport, "Dialog");
        let regions = f.hud.regions(&f.ui);
        assert_eq!(regions.viewport, Some(RegionState { widget: f.viewport_w, menu_visible: true }));
        assert_eq!(regions.screen, Some(RegionState { widget: f.screen_w, menu_visible: false }));
        assert_eq!(regions.pawn, None);
    }
}

// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: registration, navigation, focus.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec::Vec;
use core::fmt::Debug;

use wayfinder_input::action::NavAction;
use wayfinder_input::binding::BindingSource;
use wayfinder_input::key::{KeyChord, UserIndex};
use wayfinder_input::listener::ActionListeners;

use crate::error::MenuError;
use crate::host::{MenuBehavior, MenuCx, MenuObserver, WidgetHost};
use crate::types::{FocusChange, FocusRestore, MenuId, MenuKind, Route, Visibility};

/// How to create a menu. See [`MenuTree::create_menu`].
#[derive(Clone, Debug)]
pub struct MenuOptions<W> {
    /// Menu or HUD region.
    pub kind: MenuKind,
    /// The player this menu gives focus to.
    pub user: UserIndex,
    /// Route to register under on the nearest ancestor menu, if any.
    /// Ignored for [`MenuKind::SubHud`].
    pub auto_register: Option<Route>,
    /// Widget to focus when no preference has been recorded yet.
    pub default_focus: Option<W>,
}

impl<W> MenuOptions<W> {
    /// A [`MenuKind::Menu`] for `user`.
    pub fn menu(user: UserIndex) -> Self {
        Self {
            kind: MenuKind::Menu,
            user,
            auto_register: None,
            default_focus: None,
        }
    }

    /// A [`MenuKind::SubHud`] for `user`.
    pub fn sub_hud(user: UserIndex) -> Self {
        Self {
            kind: MenuKind::SubHud,
            ..Self::menu(user)
        }
    }

    /// Register under `route` on the nearest ancestor menu when created.
    #[must_use]
    pub fn auto_register(mut self, route: impl Into<Route>) -> Self {
        self.auto_register = Some(route.into());
        self
    }

    /// Focus `widget` when nothing better is known.
    #[must_use]
    pub fn default_focus(mut self, widget: W) -> Self {
        self.default_focus = Some(widget);
        self
    }
}

#[derive(Clone, Debug)]
struct NavButton<W> {
    widget: W,
    route: Route,
}

struct Menu<W> {
    generation: u32,
    widget: W,
    kind: MenuKind,
    user: UserIndex,
    parent: Option<MenuId>,
    routes: BTreeMap<Route, MenuId>,
    buttons: Vec<NavButton<W>>,
    active_route: Route,
    preferred_focus: Option<W>,
    default_focus: Option<W>,
    auto_register: Option<Route>,
    listeners: ActionListeners,
    behavior: Option<Box<dyn MenuBehavior<W>>>,
}

impl<W> Menu<W> {
    fn new(generation: u32, widget: W, options: MenuOptions<W>) -> Self {
        let mut listeners = ActionListeners::new();
        if options.kind == MenuKind::Menu {
            listeners.listen(NavAction::Back.name(), false, true);
        }
        Self {
            generation,
            widget,
            kind: options.kind,
            user: options.user,
            parent: None,
            routes: BTreeMap::new(),
            buttons: Vec::new(),
            active_route: Route::NONE,
            preferred_focus: None,
            default_focus: options.default_focus,
            auto_register: options.auto_register,
            listeners,
            behavior: None,
        }
    }
}

/// Registry of menus, their routes and their navigation state.
///
/// Ownership is top-down: a parent lists its children by route, and children refer back
/// to their parent by [`MenuId`] only.
pub struct MenuTree<W> {
    menus: Vec<Option<Menu<W>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
    by_widget: BTreeMap<W, MenuId>,
}

impl<W> Default for MenuTree<W> {
    fn default() -> Self {
        Self {
            menus: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            by_widget: BTreeMap::new(),
        }
    }
}

impl<W> Debug for MenuTree<W> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.menus.len();
        let alive = self.menus.iter().filter(|m| m.is_some()).count();
        f.debug_struct("MenuTree")
            .field("menus_total", &total)
            .field("menus_alive", &alive)
            .field("free_list", &self.free_list.len())
            .finish_non_exhaustive()
    }
}

impl<W: Copy + Ord + Debug + 'static> MenuTree<W> {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    // --- lifecycle ---

    /// Start managing `widget` as a menu.
    ///
    /// Sets the widget's initial visibility for its kind and, for [`MenuKind::Menu`] with an
    /// auto-register route, registers it to the nearest ancestor menu. A failed
    /// auto-registration is logged and leaves the menu unparented.
    pub fn create_menu(
        &mut self,
        widget: W,
        options: MenuOptions<W>,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Result<MenuId, MenuError> {
        if !host.is_alive(widget) {
            log::error!("cannot create a menu on dead widget {widget:?}");
            return Err(MenuError::DeadWidget);
        }
        if self.by_widget.contains_key(&widget) {
            log::error!("widget {widget:?} is already a menu");
            return Err(MenuError::WidgetAlreadyManaged);
        }
        let kind = options.kind;
        let id = self.allocate(widget, options);
        self.by_widget.insert(widget, id);
        host.set_visibility(widget, kind.initial_visibility());

        if kind == MenuKind::Menu {
            match self.update_registration(id, host, observer) {
                Ok(Some(parent)) => log::trace!("{widget:?} auto-registered to {parent:?}"),
                Ok(None) => {}
                Err(e) => log::debug!("{widget:?} not auto-registered: {e}"),
            }
        }
        Ok(id)
    }

    fn allocate(&mut self, widget: W, options: MenuOptions<W>) -> MenuId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.menus[idx] = Some(Menu::new(generation, widget, options));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MenuId stores 32-bit slot indices."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.menus.push(Some(Menu::new(generation, widget, options)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "MenuId stores 32-bit slot indices."
            )]
            ((self.menus.len() - 1) as u32, generation)
        };
        MenuId::new(idx, generation)
    }

    /// Stop managing a menu.
    ///
    /// Unregisters it from its parent and detaches its children (which become unparented).
    /// Returns false if `id` is stale.
    pub fn remove_menu(&mut self, id: MenuId, observer: &mut dyn MenuObserver<W>) -> bool {
        let Some(menu) = self.get(id) else {
            return false;
        };
        let widget = menu.widget;
        let parent = menu.parent;
        let children: Vec<Route> = menu.routes.keys().cloned().collect();

        if let Some(parent) = parent
            && let Some(route) = self.route_of(parent, id).cloned()
        {
            self.unregister_menu(parent, &route, observer);
        }
        for route in children {
            self.unregister_menu(id, &route, observer);
        }
        self.by_widget.remove(&widget);
        self.menus[id.idx()] = None;
        self.free_list.push(id.idx());
        log::trace!("removed menu {id:?} ({widget:?})");
        true
    }

    /// Returns true if `id` refers to a live menu.
    pub fn is_alive(&self, id: MenuId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live menus.
    pub fn len(&self) -> usize {
        self.menus.iter().filter(|m| m.is_some()).count()
    }

    /// Whether there are no live menus.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, id: MenuId) -> Option<&Menu<W>> {
        let m = self.menus.get(id.idx())?.as_ref()?;
        (m.generation == id.1).then_some(m)
    }

    fn get_mut(&mut self, id: MenuId) -> Option<&mut Menu<W>> {
        let m = self.menus.get_mut(id.idx())?.as_mut()?;
        (m.generation == id.1).then_some(m)
    }

    // --- accessors ---

    /// The menu managing exactly `widget`.
    pub fn menu_for_widget(&self, widget: W) -> Option<MenuId> {
        self.by_widget.get(&widget).copied()
    }

    /// The widget of a menu.
    pub fn widget(&self, id: MenuId) -> Option<W> {
        self.get(id).map(|m| m.widget)
    }

    /// The kind of a menu.
    pub fn kind(&self, id: MenuId) -> Option<MenuKind> {
        self.get(id).map(|m| m.kind)
    }

    /// The player a menu focuses for.
    pub fn user(&self, id: MenuId) -> Option<UserIndex> {
        self.get(id).map(|m| m.user)
    }

    /// The menu `id` is registered to.
    pub fn parent(&self, id: MenuId) -> Option<MenuId> {
        self.get(id)?.parent
    }

    /// The last route set by [`navigate_to_route`](Self::navigate_to_route).
    pub fn active_route(&self, id: MenuId) -> Option<&Route> {
        self.get(id).map(|m| &m.active_route)
    }

    /// The child registered at `route` on `id`.
    pub fn menu_at_route(&self, id: MenuId, route: &Route) -> Option<MenuId> {
        self.get(id)?.routes.get(route).copied()
    }

    /// The route `child` is registered under on `parent`.
    pub fn route_of(&self, parent: MenuId, child: MenuId) -> Option<&Route> {
        self.get(parent)?
            .routes
            .iter()
            .find_map(|(route, c)| (*c == child).then_some(route))
    }

    /// Registered children of `id`, in route order.
    pub fn children(&self, id: MenuId) -> impl Iterator<Item = (&Route, MenuId)> + '_ {
        self.get(id)
            .into_iter()
            .flat_map(|m| m.routes.iter().map(|(r, c)| (r, *c)))
    }

    /// The route used for automatic registration.
    pub fn auto_register_route(&self, id: MenuId) -> Option<&Route> {
        self.get(id)?.auto_register.as_ref()
    }

    /// Change the route used for automatic registration.
    pub fn set_auto_register_route(&mut self, id: MenuId, route: Option<Route>) {
        if let Some(m) = self.get_mut(id) {
            m.auto_register = route;
        }
    }

    /// Change the widget focused when no preference is recorded.
    pub fn set_default_focus(&mut self, id: MenuId, widget: Option<W>) {
        if let Some(m) = self.get_mut(id) {
            m.default_focus = widget;
        }
    }

    /// The recorded focus preference, if it is still alive.
    pub fn preferred_focus(&self, id: MenuId, host: &dyn WidgetHost<Widget = W>) -> Option<W> {
        self.get(id)?.preferred_focus.filter(|w| host.is_alive(*w))
    }

    /// Overwrite the recorded focus preference.
    pub fn set_preferred_focus(&mut self, id: MenuId, widget: Option<W>) {
        if let Some(m) = self.get_mut(id) {
            m.preferred_focus = widget;
        }
    }

    /// Attach hooks to a menu, replacing any existing ones. Returns false if `id` is stale.
    pub fn set_behavior(&mut self, id: MenuId, behavior: Box<dyn MenuBehavior<W>>) -> bool {
        let Some(m) = self.get_mut(id) else {
            return false;
        };
        m.behavior = Some(behavior);
        true
    }

    /// The routed action listeners of a menu, to listen for more actions.
    pub fn listeners_mut(&mut self, id: MenuId) -> Option<&mut ActionListeners> {
        self.get_mut(id).map(|m| &mut m.listeners)
    }

    /// The nearest strict ancestor of `widget` that is a managed menu.
    pub fn find_managed_ancestor(
        &self,
        widget: W,
        host: &dyn WidgetHost<Widget = W>,
    ) -> Option<MenuId> {
        let mut cursor = host.parent(widget);
        while let Some(w) = cursor {
            if let Some(id) = self.menu_for_widget(w) {
                return Some(id);
            }
            cursor = host.parent(w);
        }
        None
    }

    // --- registration ---

    /// Register `child` on `parent` under `route`.
    ///
    /// Fails if the route is empty or taken, if `child` already has a parent, or if the
    /// child widget is not inside the parent widget. The first registration at a route
    /// always stays intact.
    pub fn register_menu(
        &mut self,
        parent: MenuId,
        child: MenuId,
        route: &Route,
        host: &dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Result<(), MenuError> {
        let (Some(p), Some(c)) = (self.get(parent), self.get(child)) else {
            log::error!("cannot register {child:?} on {parent:?}: stale menu id");
            return Err(MenuError::UnknownMenu);
        };
        if route.is_none() {
            log::error!("cannot register {:?} to an empty route", c.widget);
            return Err(MenuError::EmptyRoute);
        }
        if p.routes.contains_key(route) {
            log::warn!("route {route} on {:?} is already taken", p.widget);
            return Err(MenuError::RouteTaken(route.clone()));
        }
        if c.parent.is_some() {
            log::warn!("{:?} is already registered to a menu (route {route})", c.widget);
            return Err(MenuError::AlreadyRegistered);
        }
        if !host.is_ancestor(p.widget, c.widget) {
            log::error!("{:?} is not inside {:?} (route {route})", c.widget, p.widget);
            return Err(MenuError::NotDescendant);
        }

        if let Some(p) = self.get_mut(parent) {
            p.routes.insert(route.clone(), child);
        }
        if let Some(c) = self.get_mut(child) {
            c.parent = Some(parent);
        }
        log::trace!("registered {child:?} on {parent:?} at route {route}");
        observer.registrations_changed(self, parent, route);
        Ok(())
    }

    /// Sever the registration at `route` on `parent`. Returns false if nothing was there.
    pub fn unregister_menu(
        &mut self,
        parent: MenuId,
        route: &Route,
        observer: &mut dyn MenuObserver<W>,
    ) -> bool {
        let Some(child) = self.get_mut(parent).and_then(|p| p.routes.remove(route)) else {
            return false;
        };
        if let Some(c) = self.get_mut(child) {
            c.parent = None;
        }
        log::trace!("unregistered {child:?} from {parent:?} at route {route}");
        observer.registrations_changed(self, parent, route);
        true
    }

    /// Register `child` under `route` on the nearest ancestor menu in the widget tree.
    ///
    /// Already registered there: no-op. Registered elsewhere: moved. Returns the parent,
    /// or `None` when no ancestor menu exists.
    pub fn register_to_parent_menu(
        &mut self,
        child: MenuId,
        route: &Route,
        host: &dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Result<Option<MenuId>, MenuError> {
        let Some(c) = self.get(child) else {
            return Err(MenuError::UnknownMenu);
        };
        if route.is_none() {
            log::error!("menu {:?} cannot register to parent with an empty route", c.widget);
            return Err(MenuError::EmptyRoute);
        }
        let current = c.parent;
        let found = self.find_managed_ancestor(c.widget, host);
        if found.is_some() && found == current {
            return Ok(found);
        }
        if let Some(old) = current
            && let Some(old_route) = self.route_of(old, child).cloned()
        {
            self.unregister_menu(old, &old_route, observer);
        }
        match found {
            Some(parent) => {
                self.register_menu(parent, child, route, host, observer)?;
                Ok(Some(parent))
            }
            None => Ok(None),
        }
    }

    /// Re-run automatic registration with the menu's configured route, for example after
    /// its widget was reparented. No route configured: `Ok(None)`.
    pub fn update_registration(
        &mut self,
        id: MenuId,
        host: &dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Result<Option<MenuId>, MenuError> {
        let Some(menu) = self.get(id) else {
            return Err(MenuError::UnknownMenu);
        };
        if menu.kind == MenuKind::SubHud {
            return Ok(None);
        }
        let Some(route) = menu.auto_register.clone() else {
            return Ok(None);
        };
        self.register_to_parent_menu(id, &route, host, observer)
    }

    // --- navigation buttons ---

    /// Register a navigation button on `menu`. Returns false if the menu is stale or the
    /// button is already registered there.
    pub fn register_nav_button(&mut self, menu: MenuId, button: W, route: impl Into<Route>) -> bool {
        let Some(m) = self.get_mut(menu) else {
            return false;
        };
        if m.buttons.iter().any(|b| b.widget == button) {
            return false;
        }
        let route = route.into();
        log::trace!("registered nav button {button:?} for route {route}");
        m.buttons.push(NavButton {
            widget: button,
            route,
        });
        true
    }

    /// Register a navigation button on the nearest ancestor menu of the button widget.
    pub fn register_nav_button_to_parent_menu(
        &mut self,
        button: W,
        route: impl Into<Route>,
        host: &dyn WidgetHost<Widget = W>,
    ) -> Option<MenuId> {
        let menu = self.find_managed_ancestor(button, host)?;
        self.register_nav_button(menu, button, route);
        Some(menu)
    }

    /// Remove a navigation button from `menu`.
    pub fn unregister_nav_button(&mut self, menu: MenuId, button: W) -> bool {
        let Some(m) = self.get_mut(menu) else {
            return false;
        };
        let before = m.buttons.len();
        m.buttons.retain(|b| b.widget != button);
        before != m.buttons.len()
    }

    /// Navigation buttons of `menu` with their routes.
    pub fn nav_buttons(&self, menu: MenuId) -> impl Iterator<Item = (W, &Route)> + '_ {
        self.get(menu)
            .into_iter()
            .flat_map(|m| m.buttons.iter().map(|b| (b.widget, &b.route)))
    }

    /// A navigation button was released.
    ///
    /// A button with an empty route asks the menu's parent to close it; otherwise the menu
    /// navigates to the button's route.
    pub fn release_nav_button(
        &mut self,
        menu: MenuId,
        button: W,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Option<MenuId> {
        let route = self
            .get(menu)?
            .buttons
            .iter()
            .find(|b| b.widget == button)?
            .route
            .clone();
        if route.is_none() {
            self.request_navigation(menu, &route, host, observer)
        } else {
            self.navigate_to_route(menu, &route, host, observer)
        }
    }

    fn set_route_pressed(
        &self,
        id: MenuId,
        route: &Route,
        pressed: bool,
        host: &mut dyn WidgetHost<Widget = W>,
    ) {
        if route.is_none() {
            return;
        }
        let Some(m) = self.get(id) else {
            return;
        };
        for b in m.buttons.iter().filter(|b| &b.route == route) {
            host.set_appear_pressed(b.widget, pressed);
        }
    }

    // --- visibility ---

    /// Make a menu hit-test visible and tell observers, then run its `on_show` hook.
    pub fn show(
        &mut self,
        id: MenuId,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) {
        self.set_shown(id, true, host, observer);
    }

    /// Collapse a menu and tell observers, then run its `on_hide` hook.
    pub fn hide(
        &mut self,
        id: MenuId,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) {
        self.set_shown(id, false, host, observer);
    }

    fn set_shown(
        &mut self,
        id: MenuId,
        shown: bool,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) {
        let Some(widget) = self.widget(id) else {
            return;
        };
        let visibility = if shown {
            Visibility::Visible
        } else {
            Visibility::Collapsed
        };
        host.set_visibility(widget, visibility);
        observer.visibility_changed(self, id, shown);
        self.run_behavior(id, host, observer, |behavior, cx| {
            if shown {
                behavior.on_show(cx);
            } else {
                behavior.on_hide(cx);
            }
        });
    }

    fn run_behavior(
        &mut self,
        id: MenuId,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
        f: impl FnOnce(&mut dyn MenuBehavior<W>, &mut MenuCx<'_, W>),
    ) {
        let Some(mut behavior) = self.get_mut(id).and_then(|m| m.behavior.take()) else {
            return;
        };
        let mut cx = MenuCx {
            tree: &mut *self,
            host: &mut *host,
            observer: &mut *observer,
            menu: id,
        };
        f(behavior.as_mut(), &mut cx);
        if let Some(m) = self.get_mut(id)
            && m.behavior.is_none()
        {
            m.behavior = Some(behavior);
        }
    }

    /// Whether the menu's own widget is visible.
    pub fn is_visible(&self, id: MenuId, host: &dyn WidgetHost<Widget = W>) -> bool {
        self.widget(id).is_some_and(|w| host.is_visible(w))
    }

    /// The menu is visible and at least one registered child is visible.
    pub fn is_any_menu_visible(&self, id: MenuId, host: &dyn WidgetHost<Widget = W>) -> bool {
        if !self.is_visible(id, host) {
            return false;
        }
        self.children(id).any(|(_, c)| self.is_visible(c, host))
    }

    // --- navigation ---

    /// Show the child at `route` and hide the previously active one.
    ///
    /// [`Route::NONE`] closes the active child and restores focus into this menu.
    /// An unknown route is logged and changes nothing.
    ///
    /// If showing the new child navigates this menu again (for example the child closes
    /// itself from its `on_show` hook), the rest of this call is skipped and the menu now
    /// active is returned.
    pub fn navigate_to_route(
        &mut self,
        id: MenuId,
        route: &Route,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Option<MenuId> {
        let Some(menu) = self.get(id) else {
            log::debug!("navigation on stale menu {id:?}");
            return None;
        };
        let old_route = menu.active_route.clone();
        let old_menu = menu.routes.get(&old_route).copied();

        if route.is_none() {
            log::trace!("{:?}: closing active route {old_route}", menu.widget);
            self.set_route_pressed(id, &old_route, false, host);
            if let Some(m) = self.get_mut(id) {
                m.active_route = Route::NONE;
            }
            if let Some(old) = old_menu {
                self.hide(old, host, observer);
            }
            self.restore_focus(id, host);
            self.after_navigate(id, &old_route, route, host, observer);
            return None;
        }

        let Some(new_menu) = menu.routes.get(route).copied() else {
            log::warn!("{:?}: no menu registered at route {route}", menu.widget);
            return None;
        };
        log::trace!("{:?}: navigating {old_route} -> {route}", menu.widget);

        self.set_route_pressed(id, &old_route, false, host);
        if let Some(m) = self.get_mut(id) {
            m.active_route = route.clone();
        }
        self.set_route_pressed(id, route, true, host);

        if let Some(old) = old_menu
            && old != new_menu
        {
            self.hide(old, host, observer);
        }
        self.show(new_menu, host, observer);

        let active = self.active_route(id).cloned();
        if active.as_ref() != Some(route) {
            log::trace!("active route changed while showing {route}; returning the current menu");
            return active.and_then(|r| self.menu_at_route(id, &r));
        }

        self.restore_focus(new_menu, host);
        self.after_navigate(id, &old_route, route, host, observer);
        Some(new_menu)
    }

    fn after_navigate(
        &mut self,
        id: MenuId,
        old_route: &Route,
        new_route: &Route,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) {
        self.run_behavior(id, host, observer, |behavior, cx| {
            behavior.after_navigate(cx, old_route, new_route);
        });
    }

    /// Navigate `parent` to the route `child` is registered under.
    ///
    /// `child` not registered on `parent`: logged, nothing changes.
    pub fn navigate_to(
        &mut self,
        parent: MenuId,
        child: MenuId,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Option<MenuId> {
        let Some(route) = self.route_of(parent, child).cloned() else {
            log::warn!("{child:?} is not registered on {parent:?}");
            return None;
        };
        self.navigate_to_route(parent, &route, host, observer)
    }

    /// Ask the parent of `id` to navigate to `route`.
    pub fn request_navigation(
        &mut self,
        id: MenuId,
        route: &Route,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> Option<MenuId> {
        log::trace!("{id:?} requests navigation to {route}");
        let Some(parent) = self.parent(id) else {
            log::trace!("{id:?} has no parent to navigate");
            return None;
        };
        self.navigate_to_route(parent, route, host, observer)
    }

    /// Back: ask the parent to close this menu. HUD regions ignore Back.
    ///
    /// Returns whether Back was acted on.
    pub fn handle_back(
        &mut self,
        id: MenuId,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> bool {
        match self.kind(id) {
            Some(MenuKind::Menu) => {
                self.request_navigation(id, &Route::NONE, host, observer);
                true
            }
            Some(MenuKind::SubHud) | None => false,
        }
    }

    /// Route a key chord to a menu's action listeners.
    ///
    /// Back fires [`handle_back`](Self::handle_back). Returns whether the chord was handled.
    pub fn handle_key(
        &mut self,
        id: MenuId,
        chord: KeyChord,
        is_down: bool,
        source: &impl BindingSource,
        host: &mut dyn WidgetHost<Widget = W>,
        observer: &mut dyn MenuObserver<W>,
    ) -> bool {
        let Some(menu) = self.get(id) else {
            return false;
        };
        let reply = menu.listeners.handle(chord, is_down, source);
        let handled = reply.handled;
        let back = reply.fired.contains(&NavAction::Back.name());
        if back {
            self.handle_back(id, host, observer);
        }
        handled
    }

    // --- focus ---

    /// Put keyboard focus back into this menu.
    ///
    /// Delegates to the active child if it is visible. Otherwise focuses the recorded
    /// preference, falling back to the default focus widget. If focus cannot be set this
    /// frame it is requested for the next frame.
    pub fn restore_focus(&self, id: MenuId, host: &mut dyn WidgetHost<Widget = W>) -> FocusRestore {
        let Some(menu) = self.get(id) else {
            log::debug!("restore focus on stale menu {id:?}");
            return FocusRestore::Nothing;
        };
        if let Some(active) = menu.routes.get(&menu.active_route).copied()
            && self.is_visible(active, host)
        {
            return self.restore_focus(active, host);
        }

        let target = menu
            .preferred_focus
            .filter(|w| host.is_alive(*w))
            .or(menu.default_focus.filter(|w| host.is_alive(*w)));
        let Some(target) = target else {
            if menu.kind == MenuKind::SubHud {
                log::trace!("{:?}: hud region has nothing open to focus", menu.widget);
                return FocusRestore::Nothing;
            }
            log::error!("{:?}: no focus entry widget, can't focus correctly", menu.widget);
            return FocusRestore::Failed;
        };
        if !host.is_visible(target) {
            log::error!("{:?}: focus entry {target:?} is not visible", menu.widget);
            return FocusRestore::Failed;
        }

        log::trace!("{:?}: restoring focus to {target:?}", menu.widget);
        if host.set_keyboard_focus(target, menu.user) {
            host.cancel_keyboard_focus_request(menu.user);
            FocusRestore::Focused
        } else {
            log::trace!("{:?}: focus refused this frame, deferring", menu.widget);
            host.request_keyboard_focus(target, menu.user);
            FocusRestore::Deferred
        }
    }

    /// Record focus preferences from a focus change.
    ///
    /// The nearest menu on the new path (leaf included) remembers the leaf as its preferred
    /// entry; menus further up keep theirs, since a deeper menu owns the leaf.
    /// Returns the menu whose preference changed.
    pub fn track_focus_change(&mut self, change: &FocusChange<W>) -> Option<MenuId> {
        let leaf = change.new_leaf()?;
        let owner = change
            .new_path
            .iter()
            .rev()
            .find_map(|w| self.menu_for_widget(*w))?;
        let menu = self.get_mut(owner)?;
        if menu.preferred_focus == Some(leaf) {
            return None;
        }
        menu.preferred_focus = Some(leaf);
        log::trace!("{:?}: preferred focus is now {leaf:?}", menu.widget);
        Some(owner)
    }
}

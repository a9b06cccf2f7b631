// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Collaborator trait implementations for [`WidgetTree`].

use alloc::vec::Vec;

use kurbo::{Point, Rect};
use wayfinder_cursor::config::CursorScreenSpace;
use wayfinder_cursor::host::CursorHost;
use wayfinder_input::device::InputDevice;
use wayfinder_input::event::PointerEvent;
use wayfinder_input::key::{Key, UserIndex};
use wayfinder_menu::{FocusCause, FocusChange, Visibility, WidgetHost};

use crate::tree::WidgetTree;
use crate::types::WidgetId;

impl WidgetHost for WidgetTree {
    type Widget = WidgetId;

    fn is_alive(&self, widget: WidgetId) -> bool {
        Self::is_alive(self, widget)
    }

    fn parent(&self, widget: WidgetId) -> Option<WidgetId> {
        self.parent_of(widget)
    }

    fn visibility(&self, widget: WidgetId) -> Visibility {
        self.local(widget)
            .map(|l| l.visibility)
            .unwrap_or(Visibility::Collapsed)
    }

    fn set_visibility(&mut self, widget: WidgetId, visibility: Visibility) {
        self.set_widget_visibility(widget, visibility);
    }

    fn set_keyboard_focus(&mut self, widget: WidgetId, user: UserIndex) -> bool {
        self.set_focus(widget, user, FocusCause::SetDirectly)
    }

    fn request_keyboard_focus(&mut self, widget: WidgetId, user: UserIndex) {
        self.request_focus(widget, user);
    }

    fn cancel_keyboard_focus_request(&mut self, user: UserIndex) {
        self.cancel_focus_request(user);
    }

    fn set_appear_pressed(&mut self, widget: WidgetId, pressed: bool) {
        self.set_pressed(widget, pressed);
    }

    fn take_focus_changes(&mut self) -> Vec<FocusChange<WidgetId>> {
        Self::take_focus_changes(self)
    }
}

impl CursorHost for WidgetTree {
    fn cursor_position(&self, user: UserIndex) -> Option<Point> {
        self.pointer_position(user)
    }

    fn screen_geometry(&self, space: CursorScreenSpace, user: UserIndex) -> Option<Rect> {
        match space {
            CursorScreenSpace::PlayerScreen => self.player_screen(user),
            CursorScreenSpace::Viewport => self.viewport(),
        }
    }

    fn is_foreground(&self) -> bool {
        Self::is_foreground(self)
    }

    fn is_interactable_under(&self, point: Point, _user: UserIndex) -> bool {
        self.is_interactable_at(point)
    }

    fn current_input_device(&self, user: UserIndex) -> InputDevice {
        self.devices().current_device(user)
    }

    fn set_cursor_position(&mut self, user: UserIndex, position: Point) {
        self.set_pointer_position(user, position);
    }

    fn dispatch_pointer_move(&mut self, event: &PointerEvent) -> bool {
        Self::dispatch_pointer_move(self, event)
    }

    fn dispatch_pointer_button(&mut self, event: &PointerEvent, button: Key, pressed: bool) -> bool {
        Self::dispatch_pointer_button(self, event, button, pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LocalWidget;
    use wayfinder_cursor::analog::AnalogCursor;
    use wayfinder_cursor::config::AnalogCursorConfig;
    use wayfinder_input::router::NavigationKeyRouter;
    use wayfinder_menu::{MenuOptions, MenuTree, NoopObserver, Route};

    const USER: UserIndex = UserIndex(0);

    #[test]
    fn menu_tree_drives_widget_visibility_and_focus() {
        let mut ui = WidgetTree::new();
        let hud = ui.insert(None, LocalWidget::new(Rect::new(0.0, 0.0, 800.0, 600.0)));
        let pause = ui.insert(Some(hud), LocalWidget::new(Rect::new(100.0, 100.0, 700.0, 500.0)));
        let resume = ui.insert(Some(pause), LocalWidget::button(Rect::new(300.0, 200.0, 500.0, 260.0)));

        let mut menus = MenuTree::new();
        let mut obs = NoopObserver;
        let hud_menu = menus
            .create_menu(hud, MenuOptions::sub_hud(USER), &mut ui, &mut obs)
            .unwrap();
        menus
            .create_menu(
                pause,
                MenuOptions::menu(USER).auto_register("Pause").default_focus(resume),
                &mut ui,
                &mut obs,
            )
            .unwrap();
        assert!(!ui.is_effectively_visible(resume), "menus start collapsed");

        menus.navigate_to_route(hud_menu, &Route::from("Pause"), &mut ui, &mut obs);
        assert!(ui.is_effectively_visible(resume), "opened");
        assert_eq!(ui.focus(USER), Some(resume), "default focus applied");
    }

    #[test]
    fn frozen_cursor_pins_to_player_screen_center() {
        let mut ui = WidgetTree::new();
        ui.set_player_screen(USER, Some(Rect::new(0.0, 0.0, 800.0, 600.0)));
        ui.set_pointer_position(USER, Point::new(100.0, 100.0));

        let mut cursor = AnalogCursor::new(USER, AnalogCursorConfig::default(), NavigationKeyRouter::new());
        cursor.set_freeze_to_center(true);
        cursor.tick(1.0 / 60.0, &mut ui);
        assert_eq!(ui.pointer_position(USER), Some(Point::new(400.0, 300.0)));
        assert!(
            matches!(ui.pointer_log().last(), Some(crate::types::PointerRecord::Move(e)) if e.synthetic),
            "frozen moves are synthetic"
        );
    }
}

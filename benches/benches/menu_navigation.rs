// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use kurbo::Rect;
use wayfinder_input::key::UserIndex;
use wayfinder_menu::{MenuId, MenuOptions, MenuTree, NoopObserver, Route};
use wayfinder_widget_tree::{LocalWidget, WidgetId, WidgetTree};

const USER: UserIndex = UserIndex(0);

struct Setup {
    ui: WidgetTree,
    menus: MenuTree<WidgetId>,
    region: MenuId,
    routes: Vec<Route>,
}

/// One HUD region with `n` sibling menus, each holding a single button.
fn setup(n: usize) -> Setup {
    let mut ui = WidgetTree::new();
    let mut menus = MenuTree::new();
    let mut observer = NoopObserver;
    let screen = Rect::new(0.0, 0.0, 1920.0, 1080.0);
    let region_w = ui.insert(None, LocalWidget::new(screen));
    let region = menus
        .create_menu(region_w, MenuOptions::sub_hud(USER), &mut ui, &mut observer)
        .unwrap();
    let mut routes = Vec::with_capacity(n);
    for i in 0..n {
        let route = Route::new(format!("Menu{i}"));
        let menu_w = ui.insert(Some(region_w), LocalWidget::new(screen));
        let button = ui.insert(Some(menu_w), LocalWidget::button(Rect::new(10.0, 10.0, 200.0, 60.0)));
        menus
            .create_menu(
                menu_w,
                MenuOptions::menu(USER).auto_register(route.clone()).default_focus(button),
                &mut ui,
                &mut observer,
            )
            .unwrap();
        routes.push(route);
    }
    Setup {
        ui,
        menus,
        region,
        routes,
    }
}

fn bench_navigate(c: &mut Criterion) {
    let mut group = c.benchmark_group("menu_navigation");
    for n in [4_usize, 32, 256] {
        let mut s = setup(n);
        group.bench_function(format!("cycle_routes/{n}"), |b| {
            b.iter(|| {
                for route in &s.routes {
                    let shown = s.menus.navigate_to_route(s.region, route, &mut s.ui, &mut NoopObserver);
                    black_box(shown);
                }
                s.menus.navigate_to_route(s.region, &Route::NONE, &mut s.ui, &mut NoopObserver);
                black_box(s.ui.take_focus_changes());
            });
        });
        group.bench_function(format!("any_menu_visible/{n}"), |b| {
            b.iter(|| black_box(s.menus.is_any_menu_visible(s.region, &s.ui)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_navigate);
criterion_main!(benches);

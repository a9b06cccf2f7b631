// Copyright 2025 the Wayfinder Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use wayfinder_cursor::analog::AnalogCursor;
use wayfinder_cursor::config::{AnalogCursorConfig, CursorMode};
use wayfinder_input::event::AnalogInputEvent;
use wayfinder_input::key::{Key, UserIndex};
use wayfinder_input::router::NavigationKeyRouter;
use wayfinder_widget_tree::{LocalWidget, WidgetTree};

const USER: UserIndex = UserIndex(0);
const SCREEN: Rect = Rect::new(0.0, 0.0, 1920.0, 1080.0);

/// A screen covered by an `n` x `n` grid of buttons.
fn button_grid(n: usize) -> WidgetTree {
    let mut ui = WidgetTree::new();
    ui.set_viewport(Some(SCREEN));
    ui.set_player_screen(USER, Some(SCREEN));
    ui.set_pointer_position(USER, SCREEN.center());
    let root = ui.insert(None, LocalWidget::new(SCREEN));
    let w = SCREEN.width() / n as f64;
    let h = SCREEN.height() / n as f64;
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * w;
            let y0 = y as f64 * h;
            ui.insert(Some(root), LocalWidget::button(Rect::new(x0 + 2.0, y0 + 2.0, x0 + w - 2.0, y0 + h - 2.0)));
        }
    }
    ui
}

fn deflected_cursor(mode: CursorMode) -> AnalogCursor {
    let config = AnalogCursorConfig {
        mode,
        ..AnalogCursorConfig::default()
    };
    let mut cursor = AnalogCursor::new(USER, config, NavigationKeyRouter::new());
    cursor.handle_analog_input(&AnalogInputEvent::new(Key::GamepadRightX, USER, 0.7));
    cursor.handle_analog_input(&AnalogInputEvent::new(Key::GamepadRightY, USER, 0.4));
    cursor
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("cursor_tick");
    for n in [4_usize, 16, 48] {
        for mode in [CursorMode::Accelerated, CursorMode::Direct] {
            group.bench_function(format!("{mode:?}/grid_{n}x{n}/60_frames"), |b| {
                b.iter_batched(
                    || (deflected_cursor(mode), button_grid(n)),
                    |(mut cursor, mut ui)| {
                        for _ in 0..60 {
                            cursor.tick(1.0 / 60.0, &mut ui);
                        }
                        black_box(cursor.position())
                    },
                    BatchSize::SmallInput,
                );
            });
        }
    }
    group.finish();
}

fn bench_frozen(c: &mut Criterion) {
    let mut ui = button_grid(16);
    let mut cursor = deflected_cursor(CursorMode::Accelerated);
    cursor.set_freeze_to_center(true);
    c.bench_function("cursor_tick/frozen", |b| {
        b.iter(|| {
            cursor.tick(1.0 / 60.0, &mut ui);
            ui.set_pointer_position(USER, Point::ZERO);
            black_box(cursor.position())
        });
    });
}

criterion_group!(benches, bench_tick, bench_frozen);
criterion_main!(benches);

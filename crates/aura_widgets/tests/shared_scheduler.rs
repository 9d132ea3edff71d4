//! Several widgets driven from one context and one frame loop

use std::thread;

use aura_core::events::event_types::{DRAG, DRAG_END, DRAG_START};
use aura_core::Event;
use aura_gestures::SheetSnap;
use aura_widgets::{
    BottomSheet, BottomSheetConfig, ImageComparer, IslandConfig, IslandHost, IslandMode,
    RatingSwipe, SwipeButton, Widget, WidgetContext, ZoomableView,
};

fn frames(ctx: &WidgetContext, widgets: &mut [&mut dyn Widget], count: usize) {
    for _ in 0..count {
        ctx.advance(1.0 / 60.0);
        for widget in widgets.iter_mut() {
            widget.tick();
        }
    }
}

#[test]
fn widgets_share_one_scheduler() {
    let mut ctx = WidgetContext::new();
    let mut button = SwipeButton::new(&mut ctx, "Pay");
    let mut sheet =
        BottomSheet::with_config(&mut ctx, BottomSheetConfig::default().snap_points(&[0.4, 0.9]));
    let mut rating = RatingSwipe::new(&mut ctx);
    let mut zoom = ZoomableView::new(&mut ctx);
    let mut comparer = ImageComparer::new(&mut ctx);
    assert_eq!(ctx.widget_count(), 5);

    button.handle_event(&Event::resize(356.0, 56.0));
    sheet.handle_event(&Event::resize(390.0, 800.0));
    comparer.handle_event(&Event::resize(300.0, 200.0));
    sheet.mount();

    button.handle_event(&Event::drag_x(DRAG_START, 0.0, 0.0, 0.0));
    button.handle_event(&Event::drag_x(DRAG_END, 240.0, 240.0, 0.0));
    rating.handle_event(&Event::tap(200.0, 20.0));

    frames(
        &ctx,
        &mut [
            &mut button,
            &mut sheet,
            &mut rating,
            &mut zoom,
            &mut comparer,
        ],
        600,
    );

    assert!(button.is_completed());
    assert_eq!(sheet.current_snap(), Some(SheetSnap::Point(0)));
    assert!((sheet.translate_y() - 480.0).abs() < 1e-3);
    assert_eq!(rating.rating(), 4.0);
    assert_eq!(zoom.scale(), 1.0);
    assert_eq!(comparer.position(), 150.0);
    assert!(!ctx.advance(1.0 / 60.0));
}

#[test]
fn sheet_drag_and_fling_sequence() {
    let mut ctx = WidgetContext::new();
    let mut sheet =
        BottomSheet::with_config(&mut ctx, BottomSheetConfig::default().snap_points(&[0.4, 0.9]));
    sheet.handle_event(&Event::resize(390.0, 800.0));
    sheet.mount();
    frames(&ctx, &mut [&mut sheet], 30);

    // Release at 500 with no velocity snaps to the nearest point
    sheet.handle_event(&Event::drag_y(DRAG_START, 0.0, 0.0, 0.0));
    sheet.handle_event(&Event::drag_y(DRAG, 0.0, 20.0, 0.0));
    sheet.handle_event(&Event::drag_y(DRAG_END, 0.0, 20.0, 0.0));
    frames(&ctx, &mut [&mut sheet], 600);
    assert!((sheet.translate_y() - 480.0).abs() < 1e-3);

    // A fast downward fling closes from anywhere
    sheet.handle_event(&Event::drag_y(DRAG_START, 0.0, 0.0, 0.0));
    sheet.handle_event(&Event::drag_y(DRAG_END, 0.0, -180.0, 500.0));
    frames(&ctx, &mut [&mut sheet], 600);
    assert_eq!(sheet.current_snap(), Some(SheetSnap::Closed));
    assert!(!sheet.is_active());
}

#[test]
fn island_accepts_commands_from_other_threads() {
    let mut ctx = WidgetContext::new();
    let (mut host, handle) = IslandHost::mount(&mut ctx, IslandConfig::default());

    let producers: Vec<_> = (0..4)
        .map(|n| {
            let handle = handle.clone();
            thread::spawn(move || handle.show(IslandMode::Compact, format!("job {n}")))
        })
        .collect();
    for producer in producers {
        producer.join().unwrap().unwrap();
    }

    assert!(host.pump());
    assert!(host.content().is_some_and(|c| c.starts_with("job ")));
    assert_eq!(host.mode(), IslandMode::Compact);

    frames(&ctx, &mut [&mut host], 180);
    assert!((host.visuals().width - 200.0).abs() < 1e-2);

    drop(host);
    assert!(handle.hide().is_err());
}

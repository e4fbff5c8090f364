//! Pull-to-refresh cycle demo
//!
//! Drives a scripted drag against a `ScrollViewport`, triggers a refresh,
//! lets the spinner animate for a while, ends the refresh, and eases the
//! content back to rest - logging the sampled spinner frames throughout.
//!
//! Run with: cargo run -p heave_refresh --example pull_cycle

use anyhow::Result;
use heave_animation::{set_global_scheduler, AnimationScheduler};
use heave_core::{Color, Rect};
use heave_refresh::{RefreshControl, RefreshState, ScrollViewport, SpinnerView};

const FRAME_MS: f32 = 1000.0 / 60.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let scheduler = AnimationScheduler::new();
    set_global_scheduler(scheduler.handle());

    let control = RefreshControl::with_spinner();
    control.layout(Rect::new(0.0, 0.0, 320.0, 60.0));
    control.set_tint(Color::from_hex(0x007AFF));

    let mut viewport = ScrollViewport::new(400.0);
    control.attach(&mut viewport);
    tracing::info!(
        trigger_distance = control.trigger_distance(),
        "control attached"
    );

    // The user drags content down 100 units over 25 frames; the trigger
    // fires once the pull passes 79.2
    for step in 1..=25 {
        viewport.set_offset(-4.0 * step as f32);
        scheduler.tick_by(FRAME_MS);
        log_frame(&control, &viewport);
    }
    assert!(control.is_refreshing());

    // Refresh work runs for half a second while the spinner spins and pulses
    for _ in 0..30 {
        scheduler.tick_by(FRAME_MS);
        log_frame(&control, &viewport);
    }

    control.end_refreshing();
    tracing::info!("refresh work complete, exiting");

    // The host scroll physics ease the content back to rest while the exit
    // animation closes and fades the arc
    let mut offset = viewport.offset_y();
    while control.state() != RefreshState::Idle {
        offset *= 0.7;
        if offset.abs() < 0.005 {
            offset = 0.0;
        }
        viewport.set_offset(offset);
        scheduler.tick_by(FRAME_MS);
        log_frame(&control, &viewport);
    }

    let resting = control.with_indicator(|spinner| spinner.frame());
    tracing::info!(
        stroke_start = resting.stroke_start,
        stroke_end = resting.stroke_end,
        opacity = resting.opacity,
        "settled back to idle, spinner inert"
    );
    Ok(())
}

fn log_frame(control: &RefreshControl<SpinnerView>, viewport: &ScrollViewport) {
    let frame = control.with_indicator(|spinner| spinner.frame());
    tracing::info!(
        state = ?control.state(),
        offset = viewport.offset_y(),
        stroke_start = frame.stroke_start,
        stroke_end = frame.stroke_end,
        line_width = frame.line_width,
        rotation = frame.rotation,
        scale = frame.scale,
        opacity = frame.opacity,
        "frame"
    );
}

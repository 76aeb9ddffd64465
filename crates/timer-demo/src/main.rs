//! Console host for the roll-over timer.
//!
//! Stands in for a real renderer: a frame loop feeds wall time to the
//! countdown and the view, prints the clock on every second boundary,
//! and logs player events. Configure via `digitroll.toml` or the
//! `DIGITROLL_*` environment variables.

use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use digitroll_config::DigitrollConfig;
use digitroll_timer::{format_clock, parse_clock, Countdown, TimerView};

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = DigitrollConfig::load();
    let start = parse_clock(&config.timer.start)?;

    let mut view = TimerView::with_duration_ms(config.timer.duration_ms);
    view.set_content_height(config.timer.content_height);
    view.set_time(start)?;

    let mut countdown = Countdown::new();
    countdown.start(start)?;

    log::info!(
        "running from {} at {}ms per frame (realtime: {})",
        format_clock(start),
        config.demo.frame_ms,
        config.demo.realtime
    );
    println!("{}", view.display_text());

    let frame = Duration::from_secs_f32(config.demo.frame_ms.max(1.0) / 1000.0);
    let mut last = Instant::now();

    while countdown.is_running() || view.is_animating() {
        let elapsed = if config.demo.realtime {
            thread::sleep(frame);
            let now = Instant::now();
            let elapsed = now - last;
            last = now;
            elapsed
        } else {
            frame
        };

        if let Some(remaining) = countdown.advance(elapsed) {
            view.set_time(remaining)?;
            println!("{}", view.display_text());
        }
        view.tick(elapsed.as_secs_f32() * 1000.0);

        for (position, event) in view.drain_events() {
            log::debug!("{position:?}: {event:?}");
        }
    }

    log::info!("countdown complete");
    Ok(())
}

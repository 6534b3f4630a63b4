use crate::format::{abbreviate, escape_html};
use crate::view::session::{Counter, StatTiles};
use std::time::Duration;

pub const RAMP_DURATION_MS: u64 = 1_000;
pub const RAMP_TICK_MS: u64 = 16;

/// Linear counter animation from `start` to `end`, one frame per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ramp {
    pub start: u64,
    pub end: u64,
}

impl Ramp {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    /// Values to show on each tick. Intermediate frames are floored; the last frame is
    /// exactly `end` so float error never overshoots or undershoots the target.
    pub fn frames(&self) -> Vec<u64> {
        if self.start == self.end {
            return vec![self.end];
        }

        let start = self.start as f64;
        let end = self.end as f64;
        let ticks = RAMP_DURATION_MS as f64 / RAMP_TICK_MS as f64;
        let increment = (end - start) / ticks;

        let mut out = Vec::with_capacity(ticks.ceil() as usize);
        let mut current = start;
        loop {
            current += increment;
            let done = if increment > 0.0 {
                current >= end
            } else {
                current <= end
            };
            if done {
                out.push(self.end);
                return out;
            }
            out.push(current.floor() as u64);
        }
    }
}

/// Plays the ramps together on a fixed tick, calling `apply(ramp_index, value)` per frame.
pub async fn drive<F>(ramps: &[Ramp], mut apply: F)
where
    F: FnMut(usize, u64),
{
    let frames: Vec<Vec<u64>> = ramps.iter().map(Ramp::frames).collect();
    let steps = frames.iter().map(Vec::len).max().unwrap_or(0);

    let mut ticker = tokio::time::interval(Duration::from_millis(RAMP_TICK_MS));
    // The first tick completes immediately.
    ticker.tick().await;
    for step in 0..steps {
        ticker.tick().await;
        for (idx, ramp_frames) in frames.iter().enumerate() {
            if let Some(value) = ramp_frames.get(step) {
                apply(idx, *value);
            }
        }
    }
}

pub fn render_tiles(tiles: &StatTiles) -> String {
    let latest = match &tiles.latest_report {
        Some(name) => escape_html(name),
        None => r#"<span class="skeleton-text">None</span>"#.to_string(),
    };

    format!(
        r#"<section class="stats-grid">
    {entities}
    {amazon}
    {tiktok}
    <div class="stat-card">
        <div class="stat-value" id="latest-report">{latest}</div>
        <div class="stat-label">Latest Report</div>
    </div>
</section>"#,
        entities = render_counter("entity-count", "Entities Tracked", &tiles.entities),
        amazon = render_counter("amazon-count", "Amazon Listings", &tiles.amazon_listings),
        tiktok = render_counter("tiktok-count", "TikTok Metrics", &tiles.tiktok_metrics),
    )
}

fn render_counter(id: &str, label: &str, counter: &Counter) -> String {
    format!(
        r#"<div class="stat-card">
        <div class="stat-value" id="{id}" data-target="{target}">{shown}</div>
        <div class="stat-label">{label}</div>
    </div>"#,
        target = counter.target,
        shown = abbreviate(counter.shown),
    )
}

//! Adaptive cap on how many pixels one scheduling tick may paint.
//!
//! Paint cost depends mostly on whether the image is scaled and whether it is
//! smoothed, so three caps adapt independently. After each measured paint the
//! relevant cap moves halfway toward the number of pixels that would have
//! fit in one tenth of a second at the observed speed.

use std::time::Duration;

use tracing::debug;

use crate::consts::{
    DEFAULT_MAX_REPAINT_SIZE, LIMIT_MAX_REPAINT_SIZE, MIN_MEASURED_PAINT_AREA, MIN_PAINT_ROWS,
    TICKS_PER_SECOND,
};
use crate::geom::Rect;
use crate::paint_queue::PaintPass;

/// Cost class of a paint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PaintKind {
    /// 1:1 copy, no resampling.
    Plain,
    /// Resampled without smoothing (fast pass).
    Scaled,
    /// Resampled with the smoothing algorithm.
    Smoothed,
}

impl PaintKind {
    /// Classify a paint the same way it will be rendered.
    pub fn classify(zoom: f64, pass: PaintPass, delayed_smoothing: bool) -> Self {
        if zoom == 1.0 {
            PaintKind::Plain
        } else if pass.is_smooth() || !delayed_smoothing {
            PaintKind::Smoothed
        } else {
            PaintKind::Scaled
        }
    }
}

fn clamp_cap(value: u64) -> u64 {
    value.clamp(DEFAULT_MAX_REPAINT_SIZE, LIMIT_MAX_REPAINT_SIZE)
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RepaintGovernor {
    plain: u64,
    scaled: u64,
    smoothed: u64,
}

impl Default for RepaintGovernor {
    fn default() -> Self {
        Self {
            plain: DEFAULT_MAX_REPAINT_SIZE,
            scaled: DEFAULT_MAX_REPAINT_SIZE,
            smoothed: DEFAULT_MAX_REPAINT_SIZE,
        }
    }
}

impl RepaintGovernor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from persisted values, clamped into the valid range.
    pub fn with_caps(plain: u64, scaled: u64, smoothed: u64) -> Self {
        Self {
            plain: clamp_cap(plain),
            scaled: clamp_cap(scaled),
            smoothed: clamp_cap(smoothed),
        }
    }

    /// Forget everything learned, e.g. after the smoothing setup changed.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn cap(&self, kind: PaintKind) -> u64 {
        match kind {
            PaintKind::Plain => self.plain,
            PaintKind::Scaled => self.scaled,
            PaintKind::Smoothed => self.smoothed,
        }
    }

    fn cap_mut(&mut self, kind: PaintKind) -> &mut u64 {
        match kind {
            PaintKind::Plain => &mut self.plain,
            PaintKind::Scaled => &mut self.scaled,
            PaintKind::Smoothed => &mut self.smoothed,
        }
    }

    /// Feed one measured paint. Paints under `MIN_MEASURED_PAINT_AREA`
    /// pixels are too noisy to time and are ignored.
    pub fn record(&mut self, kind: PaintKind, area: u64, elapsed: Duration) {
        if area < MIN_MEASURED_PAINT_AREA {
            return;
        }
        let millis = (elapsed.as_millis() as u64).max(1);
        let per_tick = area * (1000 / TICKS_PER_SECOND) / millis;
        let cap = self.cap_mut(kind);
        let updated = clamp_cap(per_tick.saturating_add(*cap) / 2);
        if updated != *cap {
            debug!(?kind, old = *cap, new = updated, "repaint cap adjusted");
        }
        *cap = updated;
    }

    /// Rows of `width` pixels allowed in one paint under `cap`.
    pub fn max_rows(cap: u64, width: i32) -> i32 {
        if width <= 0 {
            return i32::MAX;
        }
        let width = width as u64;
        let rows = cap.div_ceil(width).min(i32::MAX as u64) as i32;
        rows.max(MIN_PAINT_ROWS)
    }

    /// Cut `rect` down to what `kind` allows in one tick. Returns the part to
    /// paint now and, when the rect was too tall, the remainder.
    pub fn limit(&self, kind: PaintKind, rect: Rect) -> (Rect, Option<Rect>) {
        split_rows(rect, Self::max_rows(self.cap(kind), rect.width))
    }
}

/// Split `rect` after its first `rows` rows.
pub fn split_rows(rect: Rect, rows: i32) -> (Rect, Option<Rect>) {
    if rows >= rect.height {
        return (rect, None);
    }
    let head = rect.with_height(rows);
    let tail = Rect::new(rect.x, rect.y + rows, rect.width, rect.height - rows);
    (head, Some(tail))
}

//! Outstanding repaint work for one view.
//!
//! Requests are kept in an ordered map keyed by geometry: every normal-pass
//! paint sorts before every smooth-pass paint, and within a pass paints are
//! ordered top-to-bottom, then left-to-right. Two region accumulators (one per
//! pass) track the union of everything scheduled but not yet painted; they
//! only filter incoming requests and never replace the queue.

use std::collections::BTreeMap;

use tracing::trace;

use crate::geom::Rect;
use crate::region::Region;

/// Which rendering pass a paint belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PaintPass {
    /// Immediate paint, unsmoothed when delayed smoothing is on.
    Normal,
    /// Deferred high-quality repaint of an area already shown by a normal pass.
    Smooth,
}

impl PaintPass {
    pub fn is_smooth(self) -> bool {
        matches!(self, PaintPass::Smooth)
    }
}

/// One queued widget-space area.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PendingPaint {
    pub rect: Rect,
    pub pass: PaintPass,
}

impl PendingPaint {
    pub fn new(rect: Rect, pass: PaintPass) -> Self {
        Self { rect, pass }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct PaintKey {
    pass: PaintPass,
    top: i32,
    left: i32,
    seq: u64,
}

/// Ordered queue of pending paints plus the per-pass dedup regions.
#[derive(Debug, Default)]
pub struct PaintTracker {
    queue: BTreeMap<PaintKey, Rect>,
    normal_region: Region,
    smooth_region: Region,
    smoothing_suspended: bool,
    next_seq: u64,
}

impl PaintTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Smooth-pass requests are dropped while suspended.
    pub fn set_smoothing_suspended(&mut self, suspended: bool) {
        self.smoothing_suspended = suspended;
    }

    pub fn smoothing_suspended(&self) -> bool {
        self.smoothing_suspended
    }

    pub fn pending_region(&self, pass: PaintPass) -> &Region {
        match pass {
            PaintPass::Normal => &self.normal_region,
            PaintPass::Smooth => &self.smooth_region,
        }
    }

    fn region_mut(&mut self, pass: PaintPass) -> &mut Region {
        match pass {
            PaintPass::Normal => &mut self.normal_region,
            PaintPass::Smooth => &mut self.smooth_region,
        }
    }

    /// Schedule `rect` for painting in `pass`, skipping whatever part of it is
    /// already scheduled. Returns true when new work was queued.
    pub fn request_repaint(&mut self, rect: Rect, pass: PaintPass) -> bool {
        if pass.is_smooth() && self.smoothing_suspended {
            return false;
        }
        if rect.is_empty() {
            return false;
        }
        let region = self.region_mut(pass);
        if region.contains_rect(rect) {
            return false;
        }
        let mut fresh = Region::from_rect(rect);
        fresh.subtract_region(region);
        let rect = fresh.bounding_rect();
        if rect.is_empty() {
            return false;
        }
        region.add_rect(rect);
        self.enqueue(rect, pass)
    }

    /// Queue `rect` without consulting the dedup regions. Used for the
    /// remainder of a split paint, whose area is still accounted for in the
    /// pass region.
    pub fn enqueue(&mut self, rect: Rect, pass: PaintPass) -> bool {
        if rect.is_empty() {
            return false;
        }
        let lo = PaintKey {
            pass,
            top: rect.y,
            left: rect.x,
            seq: 0,
        };
        let hi = PaintKey { seq: u64::MAX, ..lo };
        let mut superseded = Vec::new();
        for (key, queued) in self.queue.range(lo..=hi) {
            if queued.contains_rect(&rect) {
                trace!(%rect, "paint already covered by queued paint at same position");
                return false;
            }
            if rect.contains_rect(queued) {
                superseded.push(*key);
            }
        }
        for key in superseded {
            self.queue.remove(&key);
        }
        let key = PaintKey {
            seq: self.next_seq,
            ..lo
        };
        self.next_seq += 1;
        self.queue.insert(key, rect);
        true
    }

    /// The paint that `next_paint` would return.
    pub fn peek(&self) -> Option<PendingPaint> {
        self.queue
            .iter()
            .next()
            .map(|(key, rect)| PendingPaint::new(*rect, key.pass))
    }

    /// Pop the lowest-ordered paint.
    pub fn next_paint(&mut self) -> Option<PendingPaint> {
        self.queue
            .pop_first()
            .map(|(key, rect)| PendingPaint::new(rect, key.pass))
    }

    /// Release a painted area from its pass region so later requests for
    /// it are accepted again.
    pub fn mark_painted(&mut self, paint: &PendingPaint) {
        self.region_mut(paint.pass).subtract_rect(paint.rect);
    }

    /// Drop every queued paint and both dedup regions.
    pub fn cancel_all(&mut self) {
        self.queue.clear();
        self.normal_region.clear();
        self.smooth_region.clear();
    }

    /// Queued paints in processing order.
    pub fn iter(&self) -> impl Iterator<Item = PendingPaint> + '_ {
        self.queue
            .iter()
            .map(|(key, rect)| PendingPaint::new(*rect, key.pass))
    }
}

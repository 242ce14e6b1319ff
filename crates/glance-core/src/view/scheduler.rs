//! Tick-driven draining of the pending-paint queue.
//!
//! The "timer" is a flag: while it is set the host keeps calling `tick`,
//! and every tick paints at most one size-capped rect. The flag follows the
//! process-wide busy level so that smoothing here waits for plain painting
//! anywhere else.

use std::time::Instant;

use tracing::{debug, trace};

use crate::busy::{should_resume, view_busy_level, BusyLevel};
use crate::geom::Rect;
use crate::governor::PaintKind;
use crate::paint::{render, PaintContext};
use crate::paint_queue::PaintPass;
use crate::surface::Surface;

use super::ImageView;

impl<S: Surface> ImageView<S> {
    /// True while there is queued work the view is allowed to do now.
    pub fn wants_tick(&self) -> bool {
        self.timer_active
    }

    /// The level this view currently reports to the busy service.
    pub fn busy_level(&self) -> BusyLevel {
        view_busy_level(
            self.timer_active,
            self.tracker.peek().map(|p| p.pass),
            self.smooth_pass_scheduled,
        )
    }

    /// One scheduling step. Returns true when something was painted.
    pub fn tick(&mut self) -> bool {
        self.sync_busy_level();
        if !self.timer_active {
            return false;
        }
        self.ticks += 1;
        let painted = self.check_pending_operations();
        if self.tracker.is_empty() && !self.smooth_pass_scheduled {
            self.timer_active = false;
            self.update_busy_level();
        } else {
            // the front may have moved from normal to smooth work
            self.reevaluate();
        }
        painted
    }

    /// Drop all queued paints and any scheduled smoothing pass.
    pub fn cancel_pending(&mut self) {
        self.tracker.cancel_all();
        self.timer_active = false;
        self.smooth_pass_scheduled = false;
        self.update_busy_level();
    }

    /// React to a new process-wide busy level: resume or suspend ticking.
    pub fn busy_level_changed(&mut self, level: BusyLevel) {
        let front = self.tracker.peek().map(|p| p.pass);
        let resume = should_resume(level, front, self.smooth_pass_scheduled);
        if resume != self.timer_active {
            trace!(%level, resume, "view timer toggled by busy level");
        }
        self.timer_active = resume;
    }

    /// Apply the most recent busy-level notification, if any.
    pub(super) fn sync_busy_level(&mut self) {
        if self.busy_rx.try_iter().last().is_some() {
            self.reevaluate();
        }
    }

    pub(super) fn update_busy_level(&mut self) {
        let level = self.busy_level();
        self.busy.set_busy_level(self.busy_id, level);
    }

    /// Decide whether to run, after new work or a level change. Our own
    /// entry is first set to what we would report while running, so a stale
    /// level from earlier work cannot hold us back.
    fn reevaluate(&mut self) {
        let wanted = view_busy_level(
            true,
            self.tracker.peek().map(|p| p.pass),
            self.smooth_pass_scheduled,
        );
        self.busy.set_busy_level(self.busy_id, wanted);
        let level = self.busy.busy_level();
        self.busy_level_changed(level);
        self.update_busy_level();
    }

    pub(super) fn schedule_smooth_pass(&mut self) {
        self.smooth_pass_scheduled = true;
        self.reevaluate();
    }

    /// Queue `rect` (content coordinates) for painting in `pass`.
    pub(super) fn add_pending_paint(&mut self, pass: PaintPass, rect: Rect) {
        if self.tracker.request_repaint(rect, pass) {
            self.reevaluate();
        }
    }

    fn check_pending_operations(&mut self) -> bool {
        let zoom = self.zoom.zoom();
        let delayed = self.config.does_delayed_smoothing();
        while let Some(mut paint) = self.tracker.next_paint() {
            let kind = PaintKind::classify(zoom, paint.pass, delayed);
            let (head, rest) = self.governor.limit(kind, paint.rect);
            if let Some(rest) = rest {
                debug!(rect = %paint.rect, rows = head.height, "paint split");
                self.tracker.enqueue(rest, paint.pass);
            }
            paint.rect = head;
            self.tracker.mark_painted(&paint);
            let clip = head.intersect(&self.visible_rect());
            if !clip.is_empty() {
                self.perform_paint(clip, paint.pass);
                return true;
            }
        }
        if self.smooth_pass_scheduled {
            self.tracker.set_smoothing_suspended(false);
            if delayed {
                let visible = self.visible_rect();
                self.add_pending_paint(PaintPass::Smooth, visible);
            }
            self.smooth_pass_scheduled = false;
        }
        false
    }

    /// Render `clip` (content coordinates) and put it on the surface.
    fn perform_paint(&mut self, clip: Rect, pass: PaintPass) {
        let target = self.to_viewport(clip);
        let started = Instant::now();
        let output = match self.document.image() {
            Some(image) => {
                let ctx = PaintContext {
                    image,
                    valid_area: &self.valid_area,
                    transform: self.transform(),
                    smooth_algorithm: self.config.smooth_algorithm,
                    delayed_smoothing: self.config.does_delayed_smoothing(),
                    adjustments: &self.adjustments,
                    background: self.config.background_color,
                    bits_per_channel: self.surface.bits_per_channel(),
                };
                render(&ctx, clip, pass.is_smooth())
            }
            None => {
                self.surface.erase(target, self.config.background_color);
                return;
            }
        };

        match &output.pixels {
            Some(pixels) => self.surface.blit(target, pixels),
            None => self.surface.erase(target, self.config.background_color),
        }
        for follow_up in &output.follow_ups {
            self.add_pending_paint(follow_up.pass, follow_up.rect);
        }
        if output.pixels.is_some() {
            self.governor
                .record(output.kind, clip.area(), started.elapsed());
        }
    }
}

//! Rendering one widget-space rect of the image.
//!
//! [`render`] is pure: it reads the image through a zero-copy view and
//! returns the finished buffer together with the follow-up paints it wants
//! scheduled. The caller blits the buffer, schedules the follow-ups and
//! times the whole thing for the repaint governor.

use ndarray::{s, Array3};

use crate::adjust::ImageAdjustments;
use crate::composite::composite_checkerboard;
use crate::consts::RGBA_CHANNELS;
use crate::dither::quantize;
use crate::geom::Rect;
use crate::governor::PaintKind;
use crate::paint_queue::{PaintPass, PendingPaint};
use crate::raster::Raster;
use crate::region::Region;
use crate::scale::{extra_scale_pixels, scale, SmoothAlgorithm};
use crate::transform::ViewTransform;

/// Everything a paint reads.
pub struct PaintContext<'a> {
    pub image: &'a Raster,
    /// Image-space pixels known to be decoded.
    pub valid_area: &'a Region,
    pub transform: ViewTransform,
    pub smooth_algorithm: SmoothAlgorithm,
    /// Delayed smoothing is on and the algorithm is not `None`.
    pub delayed_smoothing: bool,
    pub adjustments: &'a ImageAdjustments,
    pub background: [u8; 3],
    pub bits_per_channel: u8,
}

/// Result of painting one rect.
#[derive(Debug)]
pub struct PaintOutput {
    /// Widget-space rect covered by `pixels` (the requested clip rect).
    pub rect: Rect,
    /// `None` when the rect holds no valid image data and should be erased.
    pub pixels: Option<Array3<u8>>,
    /// Paints to schedule afterwards: the smoothing pass after a fast pass,
    /// and valid sub-areas beyond the first.
    pub follow_ups: Vec<PendingPaint>,
    /// Cost class for governor accounting.
    pub kind: PaintKind,
}

impl PaintOutput {
    fn erase(rect: Rect, follow_ups: Vec<PendingPaint>, kind: PaintKind) -> Self {
        Self {
            rect,
            pixels: None,
            follow_ups,
            kind,
        }
    }
}

fn background_buffer(rect: Rect, color: [u8; 3]) -> Array3<u8> {
    let mut buffer = Array3::<u8>::zeros((rect.height as usize, rect.width as usize, RGBA_CHANNELS));
    for (c, value) in color.into_iter().chain([255]).enumerate() {
        buffer.slice_mut(s![.., .., c]).fill(value);
    }
    buffer
}

/// Copy the `target` part of `pixels`, whose top-left sits at `at`, into
/// `buffer` covering `clip`.
fn place(buffer: &mut Array3<u8>, target: Rect, clip: Rect, pixels: &Array3<u8>, at: Rect) {
    let overlap = target.intersect(&clip).intersect(&at);
    if overlap.is_empty() {
        return;
    }
    let (dx, dy) = ((overlap.x - clip.x) as usize, (overlap.y - clip.y) as usize);
    let (sx, sy) = ((overlap.x - at.x) as usize, (overlap.y - at.y) as usize);
    let (w, h) = (overlap.width as usize, overlap.height as usize);
    buffer
        .slice_mut(s![dy..dy + h, dx..dx + w, ..])
        .assign(&pixels.slice(s![sy..sy + h, sx..sx + w, ..]));
}

/// Paint widget-space `clip`. `second_pass` marks a smoothing-pass paint.
pub fn render(ctx: &PaintContext<'_>, clip: Rect, second_pass: bool) -> PaintOutput {
    let zoom = ctx.transform.zoom;
    let identity = ctx.transform.is_identity_zoom();
    let fast_pass = ctx.delayed_smoothing && !identity && !second_pass;

    let mut follow_ups = Vec::new();
    let mut algorithm = SmoothAlgorithm::None;
    let mut kind = PaintKind::Plain;
    if !identity {
        if fast_pass {
            follow_ups.push(PendingPaint::new(clip, PaintPass::Smooth));
        } else {
            algorithm = ctx.smooth_algorithm;
        }
        kind = if algorithm == SmoothAlgorithm::None {
            PaintKind::Scaled
        } else {
            PaintKind::Smoothed
        };
    }

    let pass = if second_pass {
        PaintPass::Smooth
    } else {
        PaintPass::Normal
    };
    // Pieces are chosen by what they cover of `clip` itself; the kernel
    // margin only widens the source of the chosen piece.
    let bounds = ctx.image.bounds();
    let candidates = ctx
        .transform
        .widget_to_image_bounding(&clip, 0)
        .intersect(&bounds);
    let mut pieces = ctx
        .valid_area
        .intersect_rect(candidates)
        .rects()
        .into_iter()
        .map(|r| (r, ctx.transform.image_to_widget_rect(&r).intersect(&clip)))
        .filter(|(_, on_clip)| !on_clip.is_empty());

    let Some((image_rect, _)) = pieces.next() else {
        return PaintOutput::erase(clip, follow_ups, kind);
    };
    follow_ups.extend(pieces.map(|(_, on_clip)| PendingPaint::new(on_clip, pass)));

    let extra = extra_scale_pixels(algorithm, zoom);
    let grown = image_rect
        .adjusted(-extra, -extra, extra, extra)
        .intersect(&bounds);
    let source_rect = if ctx.valid_area.contains_rect(grown) {
        grown
    } else {
        image_rect
    };
    let widget_rect = ctx.transform.image_to_widget_rect(&source_rect);
    if widget_rect.is_empty() {
        return PaintOutput::erase(clip, follow_ups, kind);
    }

    let source = ctx.image.view(source_rect);
    let mut pixels = if identity {
        source.to_owned()
    } else {
        scale(
            &source,
            widget_rect.width as usize,
            widget_rect.height as usize,
            algorithm,
        )
    };

    ctx.adjustments.apply(&mut pixels);

    if ctx.image.has_alpha {
        composite_checkerboard(&mut pixels, widget_rect.top_left() - ctx.transform.offset);
    }

    quantize(
        &mut pixels,
        ctx.bits_per_channel,
        fast_pass,
        (widget_rect.x, widget_rect.y),
    );

    // only the chosen piece is known to be valid inside `clip`
    let target = ctx.transform.image_to_widget_rect(&image_rect).intersect(&clip);
    let mut buffer = background_buffer(clip, ctx.background);
    place(&mut buffer, target, clip, &pixels, widget_rect);

    PaintOutput {
        rect: clip,
        pixels: Some(buffer),
        follow_ups,
        kind,
    }
}

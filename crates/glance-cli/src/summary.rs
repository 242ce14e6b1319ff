use std::path::Path;
use std::time::Duration;

use console::Style;
use glance_core::config::{AutoZoomMode, RepaintSizeConfig};
use glance_core::scale::SmoothAlgorithm;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    method: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            path: Style::new().underlined(),
        }
    }
}

pub struct RenderStats<'a> {
    pub input: &'a Path,
    pub output: &'a Path,
    pub image: (usize, usize),
    pub viewport: (u32, u32),
    pub zoom: f64,
    pub mode: AutoZoomMode,
    pub algorithm: SmoothAlgorithm,
    pub ticks: u64,
    pub decoded: Duration,
    pub total: Duration,
    pub caps: &'a RepaintSizeConfig,
}

pub fn print_render_summary(stats: &RenderStats<'_>) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Glance Render"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(13)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(stats.input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(stats.output.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.value.apply_to(format!("{}x{}", stats.image.0, stats.image.1))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Viewport"),
        s.value.apply_to(format!("{}x{}", stats.viewport.0, stats.viewport.1))
    );
    println!(
        "  {:<14}{} {}",
        s.label.apply_to("Zoom"),
        s.value.apply_to(format!("{:.1}%", stats.zoom * 100.0)),
        s.method.apply_to(format!("({})", stats.mode))
    );
    println!("  {:<14}{}", s.label.apply_to("Smoothing"), s.method.apply_to(stats.algorithm));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Ticks"),
        s.value.apply_to(stats.ticks)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Time"),
        s.value.apply_to(format!(
            "{:.0} ms ({:.0} ms decode)",
            stats.total.as_secs_f64() * 1000.0,
            stats.decoded.as_secs_f64() * 1000.0
        ))
    );

    println!();
    println!("  {}", s.title.apply_to("Repaint caps"));
    for (name, cap) in [
        ("Plain", stats.caps.plain),
        ("Scaled", stats.caps.scaled),
        ("Smoothed", stats.caps.smoothed),
    ] {
        println!("  {:<14}{}", s.label.apply_to(name), s.value.apply_to(cap));
    }
    println!();
}

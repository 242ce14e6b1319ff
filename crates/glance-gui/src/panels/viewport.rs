use glance_core::geom::{Point, Size};
use glance_core::tool::{Modifiers, MouseButton};
use glance_core::view::ScrollKey;

use crate::app::GlanceApp;

/// Pixels per wheel "line" step.
const LINE_HEIGHT: f32 = 40.0;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            let rect = ui.available_rect_before_wrap();
            let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
            let ppp = ctx.pixels_per_point();
            app.viewport.origin = rect.min;
            app.viewport.pixels_per_point = ppp;

            resize_if_needed(app, rect, ppp);
            forward_input(ui, &response, app, rect, ppp);
            app.pump_view();
            app.update_texture(ctx);

            if let Some(texture) = &app.viewport.texture {
                let size = texture.size_vec2() / ppp;
                ui.painter().image(
                    texture.id(),
                    egui::Rect::from_min_size(rect.min, size),
                    egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                    egui::Color32::WHITE,
                );
            }
            draw_scrollbars(ui, app, rect, ppp);

            let doc = app.view.document();
            if doc.is_null() && !doc.is_loading() {
                show_placeholder(ui, rect);
            }
        });
}

fn resize_if_needed(app: &mut GlanceApp, rect: egui::Rect, ppp: f32) {
    let w = (rect.width() * ppp).round().max(1.0) as u32;
    let h = (rect.height() * ppp).round().max(1.0) as u32;
    if app.viewport.size == [w, h] {
        return;
    }
    app.viewport.size = [w, h];
    app.view.surface_mut().resize(w, h);
    app.view.resize(Size::new(w as i32, h as i32));
}

fn to_local(pos: egui::Pos2, rect: egui::Rect, ppp: f32) -> Point {
    let rel = (pos - rect.min) * ppp;
    Point::new(rel.x.round() as i32, rel.y.round() as i32)
}

fn map_button(button: egui::PointerButton) -> Option<MouseButton> {
    match button {
        egui::PointerButton::Primary => Some(MouseButton::Left),
        egui::PointerButton::Secondary => Some(MouseButton::Right),
        egui::PointerButton::Middle => Some(MouseButton::Middle),
        _ => None,
    }
}

fn map_modifiers(m: egui::Modifiers) -> Modifiers {
    Modifiers {
        ctrl: m.command,
        shift: m.shift,
    }
}

fn forward_input(
    ui: &egui::Ui,
    response: &egui::Response,
    app: &mut GlanceApp,
    rect: egui::Rect,
    ppp: f32,
) {
    let hovered = response.hovered();
    let modifiers = map_modifiers(ui.input(|i| i.modifiers));
    if hovered && !app.viewport.hovered {
        app.view.pointer_entered(modifiers);
    } else if hovered {
        app.view.modifiers_changed(modifiers);
    }
    app.viewport.hovered = hovered;

    // the context menu lives in its own area; leave clicks to it
    if app.ui_state.context_menu_at.is_some() {
        return;
    }

    let events = ui.input(|i| i.events.clone());
    for event in events {
        match event {
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let Some(button) = map_button(button) else {
                    continue;
                };
                let at = to_local(pos, rect, ppp);
                if pressed && rect.contains(pos) {
                    app.view.mouse_press(button, at);
                } else if !pressed {
                    app.view.mouse_release(button, at);
                }
            }
            egui::Event::PointerMoved(pos) if hovered || response.dragged() => {
                app.view.mouse_move(to_local(pos, rect, ppp), modifiers);
            }
            egui::Event::MouseWheel { unit, delta, .. } if hovered => {
                let scale = match unit {
                    egui::MouseWheelUnit::Point => ppp,
                    egui::MouseWheelUnit::Line => LINE_HEIGHT,
                    egui::MouseWheelUnit::Page => rect.height() * ppp,
                };
                let delta = Point::new((delta.x * scale) as i32, (delta.y * scale) as i32);
                let at = ui
                    .input(|i| i.pointer.hover_pos())
                    .map(|p| to_local(p, rect, ppp))
                    .unwrap_or_default();
                app.view.wheel(delta, at, modifiers);
            }
            egui::Event::Key {
                key, pressed: true, ..
            } if hovered => match key {
                egui::Key::ArrowUp => app.view.key_scroll(ScrollKey::Up),
                egui::Key::ArrowDown => app.view.key_scroll(ScrollKey::Down),
                egui::Key::ArrowLeft => app.view.key_scroll(ScrollKey::Left),
                egui::Key::ArrowRight => app.view.key_scroll(ScrollKey::Right),
                egui::Key::Plus | egui::Key::Equals => app.view.zoom_in(),
                egui::Key::Minus => app.view.zoom_out(),
                _ => {}
            },
            _ => {}
        }
    }

    if response.double_clicked() {
        app.view.mouse_double_click();
    }
}

/// Thin position indicators where the content overflows the visible area.
fn draw_scrollbars(ui: &egui::Ui, app: &GlanceApp, rect: egui::Rect, ppp: f32) {
    let content = app.view.content_size();
    let visible = app.view.visible_size();
    let scroll = app.view.scroll_position();
    let thickness = app.view.config().scrollbar_thickness as f32 / ppp;
    let track = egui::Color32::from_gray(50);
    let thumb = egui::Color32::from_gray(140);
    let (vw, vh) = (visible.width as f32 / ppp, visible.height as f32 / ppp);

    if content.width > visible.width && visible.width > 0 {
        let bar = egui::Rect::from_min_size(rect.min + egui::vec2(0.0, vh), egui::vec2(vw, thickness));
        let start = scroll.x as f32 / content.width as f32 * vw;
        let len = visible.width as f32 / content.width as f32 * vw;
        ui.painter().rect_filled(bar, 0.0, track);
        ui.painter().rect_filled(
            egui::Rect::from_min_size(bar.min + egui::vec2(start, 2.0), egui::vec2(len, thickness - 4.0)),
            3.0,
            thumb,
        );
    }
    if content.height > visible.height && visible.height > 0 {
        let bar = egui::Rect::from_min_size(rect.min + egui::vec2(vw, 0.0), egui::vec2(thickness, vh));
        let start = scroll.y as f32 / content.height as f32 * vh;
        let len = visible.height as f32 / content.height as f32 * vh;
        ui.painter().rect_filled(bar, 0.0, track);
        ui.painter().rect_filled(
            egui::Rect::from_min_size(bar.min + egui::vec2(2.0, start), egui::vec2(thickness - 4.0, len)),
            3.0,
            thumb,
        );
    }
}

fn show_placeholder(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter().text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Open an image to begin (Ctrl+O)",
        egui::FontId::proportional(18.0),
        egui::Color32::from_gray(100),
    );
}

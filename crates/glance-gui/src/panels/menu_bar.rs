use glance_core::adjust::ImageAdjustments;
use glance_core::config::AutoZoomMode;
use glance_core::menu::{EditCommand, FileCommand, MenuEntry, NavigateCommand};

use crate::app::GlanceApp;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            file_menu(ctx, ui, app);
            view_menu(ctx, ui, app);
            image_menu(ui, app);
            go_menu(ui, app);

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            app.open_dialog();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::NONE, egui::Key::F11))) {
            app.toggle_fullscreen(ctx);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            app.save_settings();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn file_menu(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut GlanceApp) {
    ui.menu_button("File", |ui| {
        let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
        if ui.add(egui::Button::new("Open...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
            ui.close();
            app.open_dialog();
        }

        ui.separator();

        let has_file = app.view.document().path().is_some();
        for command in FileCommand::ALL {
            if ui.add_enabled(has_file, egui::Button::new(command.label())).clicked() {
                ui.close();
                app.invoke_entry(MenuEntry::File(command));
            }
        }

        ui.separator();

        if ui.button("Save Settings").clicked() {
            ui.close();
            app.save_settings();
        }

        let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
        if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
            ui.close();
            app.save_settings();
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

fn view_menu(ctx: &egui::Context, ui: &mut egui::Ui, app: &mut GlanceApp) {
    ui.menu_button("View", |ui| {
        let mode = app.view.zoom_controller().auto_mode();
        for (label, target) in [
            ("Zoom to Fit", AutoZoomMode::Fit),
            ("Zoom to Width", AutoZoomMode::Width),
            ("Zoom to Height", AutoZoomMode::Height),
        ] {
            let mut checked = mode == target;
            if ui.checkbox(&mut checked, label).clicked() {
                match target {
                    AutoZoomMode::Fit => app.view.set_zoom_to_fit(checked),
                    AutoZoomMode::Width => app.view.set_zoom_to_width(checked),
                    AutoZoomMode::Height => app.view.set_zoom_to_height(checked),
                    AutoZoomMode::None => {}
                }
            }
        }

        let mut lock = app.view.zoom_controller().lock_zoom();
        if ui.checkbox(&mut lock, "Lock Zoom").clicked() {
            app.view.set_lock_zoom(lock);
        }

        ui.separator();

        let has_image = !app.view.document().is_null();
        if ui.add_enabled(has_image && app.view.can_zoom_in(), egui::Button::new("Zoom In")).clicked() {
            app.view.zoom_in();
        }
        if ui.add_enabled(has_image && app.view.can_zoom_out(), egui::Button::new("Zoom Out")).clicked() {
            app.view.zoom_out();
        }
        if ui.add_enabled(has_image, egui::Button::new("Actual Size")).clicked() {
            app.view.reset_zoom();
        }

        ui.separator();

        let mut fullscreen = app.ui_state.fullscreen;
        if ui.checkbox(&mut fullscreen, "Full Screen").clicked() {
            ui.close();
            app.toggle_fullscreen(ctx);
        }
    });
}

fn image_menu(ui: &mut egui::Ui, app: &mut GlanceApp) {
    ui.menu_button("Image", |ui| {
        let has_image = !app.view.document().is_null();
        for command in EditCommand::ALL {
            if ui.add_enabled(has_image, egui::Button::new(command.label())).clicked() {
                ui.close();
                app.invoke_entry(MenuEntry::Edit(command));
            }
        }

        ui.separator();

        let adj = *app.view.adjustments();
        ui.label(format!(
            "Gamma {}%  Brightness {:+}%  Contrast {}%",
            adj.gamma(),
            adj.brightness(),
            adj.contrast()
        ));
        ui.horizontal(|ui| {
            ui.label("Gamma");
            if ui.small_button("-").clicked() {
                app.view.decrease_gamma();
            }
            if ui.small_button("+").clicked() {
                app.view.increase_gamma();
            }
        });
        ui.horizontal(|ui| {
            ui.label("Brightness");
            if ui.small_button("-").clicked() {
                app.view.decrease_brightness();
            }
            if ui.small_button("+").clicked() {
                app.view.increase_brightness();
            }
        });
        ui.horizontal(|ui| {
            ui.label("Contrast");
            if ui.small_button("-").clicked() {
                app.view.decrease_contrast();
            }
            if ui.small_button("+").clicked() {
                app.view.increase_contrast();
            }
        });
        if ui.add_enabled(!adj.is_identity(), egui::Button::new("Reset Adjustments")).clicked() {
            ui.close();
            app.view.set_adjustments(ImageAdjustments::default());
        }
    });
}

fn go_menu(ui: &mut egui::Ui, app: &mut GlanceApp) {
    ui.menu_button("Go", |ui| {
        let has_file = app.view.document().path().is_some();
        for command in NavigateCommand::ALL {
            if ui.add_enabled(has_file, egui::Button::new(command.label())).clicked() {
                ui.close();
                app.invoke_entry(MenuEntry::Navigate(command));
            }
        }
    });
}

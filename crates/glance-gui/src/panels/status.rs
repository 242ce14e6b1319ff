use crate::app::GlanceApp;

pub fn show(ctx: &egui::Context, app: &mut GlanceApp) {
    egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
        ui.add_space(2.0);
        ui.horizontal(|ui| {
            let doc = app.view.document();
            if doc.is_loading() {
                ui.spinner();
                ui.label("Loading...");
            } else if doc.is_null() {
                ui.label("No image");
            } else {
                ui.label(format!("{}x{}", doc.width(), doc.height()));
            }
            ui.separator();
            ui.label(format!("Zoom: {:.0}%", app.view.zoom() * 100.0));
            ui.label(format!("({})", app.view.zoom_controller().auto_mode()));
            ui.separator();
            ui.label(format!("Busy: {}", app.busy.busy_level()));
            ui.label(format!("Pending: {}", app.view.pending_paints().len()));

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if let Some(msg) = app.ui_state.last_log() {
                    ui.small(msg);
                    ui.separator();
                }
                if !app.ui_state.hint.is_empty() {
                    ui.small(&app.ui_state.hint);
                }
            });
        });
        ui.add_space(2.0);
    });
}

mod app;
mod browse;
mod convert;
mod file_actions;
mod panels;
mod state;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let initial = std::env::args_os().nth(1).map(std::path::PathBuf::from);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1024.0, 768.0])
            .with_min_inner_size([320.0, 240.0])
            .with_title("Glance"),
        ..Default::default()
    };

    eframe::run_native(
        "Glance",
        options,
        Box::new(|_cc| Ok(Box::new(app::GlanceApp::new(initial)))),
    )
}

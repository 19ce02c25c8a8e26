//! Rusty-Ballot: a desktop dashboard for a token-gated Solana voting program

use eframe::egui;

mod api;
mod app;
mod sidebar;
mod state;
mod ui;

fn main() -> eframe::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    tracing::info!("Starting Rusty-Ballot");

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Rusty-Ballot")
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([600.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Rusty-Ballot",
        native_options,
        Box::new(|cc| Ok(Box::new(app::App::new(cc)))),
    )
}

mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod worker;

use std::path::PathBuf;

use framer_core::config::FramerConfig;

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = initial_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 820.0])
            .with_min_inner_size([560.0, 480.0])
            .with_title("Framer"),
        ..Default::default()
    };

    eframe::run_native(
        "Framer",
        options,
        Box::new(move |cc| Ok(Box::new(app::FramerApp::new(&cc.egui_ctx, config)))),
    )
}

/// `framer-gui [session.toml | frame-image]`
fn initial_config() -> FramerConfig {
    let Some(arg) = std::env::args_os().nth(1).map(PathBuf::from) else {
        return FramerConfig::default();
    };
    if arg.extension().is_some_and(|ext| ext == "toml") {
        return match FramerConfig::load(&arg) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %arg.display(), error = %e, "Ignoring unreadable session");
                FramerConfig::default()
            }
        };
    }
    FramerConfig {
        frame: arg,
        ..FramerConfig::default()
    }
}

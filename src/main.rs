mod app;

use eframe::egui;

use neural_link::config::Config;

use crate::app::NeuralLinkApp;

fn main() -> eframe::Result<()> {
    let located = Config::locate();
    let loaded = located.as_deref().map(Config::load_with_env).transpose();
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => Config::from_env(),
    };

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.logging.level.as_str()),
    )
    .init();

    match (&located, &loaded) {
        (Some(path), Ok(_)) => log::info!("Loaded config from {:?}", path),
        (Some(path), Err(e)) => log::warn!("Failed to load config from {:?}: {}", path, e),
        (None, _) => log::info!("Using default config with environment overrides"),
    }
    for ignored in &config.ignored_overrides {
        log::warn!("Ignoring {}", ignored);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_transparent(true),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Neural Link",
        options,
        Box::new(|_cc| Ok(Box::new(NeuralLinkApp::new(config)))),
    );
    if let Err(e) = &result {
        log::error!("Failed to start the rendering context: {}", e);
    }
    result
}

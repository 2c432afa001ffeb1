mod app;
mod ui;

use eframe::egui;

use cultural_zodiac::config::OracleConfig;

use app::ZodiacApp;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = OracleConfig::from_env();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 960.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Cultural Zodiac",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(ZodiacApp::new(config)))
        }),
    )
}

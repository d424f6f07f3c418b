#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")] // hide console window on Windows in release

use eframe::egui;
use todoapp::app::TodoApp;
use todoapp::icon;

fn main() -> eframe::Result {
    env_logger::init();
    log::info!("starting todoapp v{}", env!("CARGO_PKG_VERSION"));

    let icon = icon::render_icon();
    let (width, height) = icon.dimensions();
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 700.0])
            .with_min_inner_size([480.0, 360.0])
            .with_icon(egui::IconData {
                rgba: icon.into_raw(),
                width,
                height,
            }),
        ..Default::default()
    };

    eframe::run_native(
        "Todo List",
        options,
        Box::new(|cc| {
            cc.egui_ctx.all_styles_mut(|style| {
                style.text_styles = [
                    (egui::TextStyle::Heading, egui::FontId::new(24.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Body, egui::FontId::new(16.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Button, egui::FontId::new(16.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Small, egui::FontId::new(12.0, egui::FontFamily::Proportional)),
                    (egui::TextStyle::Monospace, egui::FontId::new(14.0, egui::FontFamily::Monospace)),
                ]
                .into();
            });

            Ok(Box::new(TodoApp::new(cc)))
        }),
    )
}

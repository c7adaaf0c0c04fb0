//! Panel rendering for `NeuralLinkApp`.
//!
//! Two floating windows over the wireframe background: the biometric scan
//! (status line + tip list) and the clinical query box.

use eframe::egui;

use neural_link::panel::ScanPhase;

use super::NeuralLinkApp;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0x00, 0xff, 0xcc);

impl NeuralLinkApp {
    pub fn draw_panels(&mut self, ctx: &egui::Context) {
        self.draw_scan_window(ctx);
        self.draw_query_window(ctx);
    }

    fn draw_scan_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("Biometric Scan")
            .default_pos([24.0, 24.0])
            .default_width(320.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    if ui.button("Analyze").clicked() {
                        self.start_scan(ctx);
                    }
                    if self.diagnosis.phase() == ScanPhase::Scanning && self.scan_task.is_some() {
                        ui.spinner();
                    }
                });
                ui.separator();

                ui.colored_label(ACCENT, self.diagnosis.status());

                let tips = self.diagnosis.tips();
                if !tips.is_empty() {
                    ui.add_space(4.0);
                    for tip in tips {
                        ui.label(format!("\u{2022} {}", tip));
                    }
                }
            });
    }

    fn draw_query_window(&mut self, ctx: &egui::Context) {
        egui::Window::new("Clinical Query")
            .default_pos([24.0, 260.0])
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    let response = ui.add_sized(
                        [ui.available_width() - 60.0, 24.0],
                        egui::TextEdit::singleline(&mut self.query.input)
                            .hint_text("e.g. what is psoriasis"),
                    );
                    let submitted =
                        response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                    if ui.button("Ask").clicked() || submitted {
                        self.start_query(ctx);
                    }
                });

                if self.query.is_pending() {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Querying...");
                    });
                }

                if let Some(reply) = self.query.reply() {
                    ui.separator();
                    if let Some(source) = self.query.source() {
                        ui.small(format!("Source: {}", source.label()));
                    }
                    egui::ScrollArea::vertical()
                        .max_height(360.0)
                        .show(ui, |ui| {
                            ui.label(reply);
                        });
                }
            });
    }
}

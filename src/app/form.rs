//! Header and offering form for `ZodiacApp`.

use eframe::egui;

use cultural_zodiac::zodiac::offerings::suggestions;
use cultural_zodiac::zodiac::OfferingKind;

use super::ZodiacApp;
use crate::ui;

impl ZodiacApp {
    pub fn draw_header(&self, ui: &mut egui::Ui) {
        ui.add_space(12.0);
        ui.label(
            egui::RichText::new("Cultural Zodiac")
                .size(44.0)
                .strong()
                .color(ui::PURPLE),
        );
        ui.label(
            egui::RichText::new("Offer your tastes to the Oracle. Receive your destiny.")
                .size(16.0)
                .color(ui::LIGHT_GRAY),
        );
        ui.add_space(20.0);
    }

    /// One row per offering plus the form buttons.
    pub fn draw_form(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let mut submit = false;

        ui::panel(ui, ui::PURPLE, 1.0, |ui| {
            let rows = self.session.offerings().len();
            for i in 0..rows {
                let Some(row) = self.session.offering_mut(i) else {
                    continue;
                };
                ui.horizontal(|ui| {
                    egui::ComboBox::from_id_salt(("offering-kind", i))
                        .width(90.0)
                        .selected_text(row.kind.label())
                        .show_ui(ui, |ui| {
                            for kind in OfferingKind::ALL {
                                ui.selectable_value(&mut row.kind, kind, kind.label());
                            }
                        });
                    let response = ui.add(
                        egui::TextEdit::singleline(&mut row.name)
                            .hint_text(placeholder(row.kind))
                            .desired_width(f32::INFINITY),
                    );
                    if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                        submit = true;
                    }
                });
                ui.add_space(4.0);
            }

            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("+ Add Another").clicked() {
                    self.session.add_offering();
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("\u{2728} Let the Oracle Choose").clicked() {
                        self.session.oracle_choose(&mut rand::thread_rng());
                    }
                });
            });

            ui.add_space(12.0);
            let reveal = egui::Button::new(
                egui::RichText::new("Reveal My Sign")
                    .size(18.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(egui::Color32::from_rgb(147, 51, 234))
            .min_size(egui::vec2(ui.available_width(), 40.0));
            if ui.add_enabled(!self.session.is_loading(), reveal).clicked() {
                submit = true;
            }
        });

        if submit {
            self.submit(ctx);
        }
    }
}

/// Hint text for an empty row, taken from the Oracle's own suggestions.
fn placeholder(kind: OfferingKind) -> String {
    suggestions()
        .find(|o| o.kind == kind)
        .map(|o| format!("e.g., {}", o.name))
        .unwrap_or_else(|| format!("Name a {}", kind.label().to_lowercase()))
}

//! Loading, error and result screens for `ZodiacApp`, plus card export.

use eframe::egui;

use cultural_zodiac::render::reveal::FLIP_SECONDS;
use cultural_zodiac::share::export::{save_card, CardCapture, ExportError, PixelRect};

use super::ZodiacApp;
use crate::ui;

const SPOKEN: &str = "The stars have spoken...";
/// Pause before the result heading starts typing, in seconds.
const TYPE_DELAY: f32 = 2.0;
const TYPE_CHARS_PER_SEC: f32 = 20.0;

impl ZodiacApp {
    // ─── Loading ─────────────────────────────────────────────────────────────

    pub fn draw_loading(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let t = ctx.input(|i| i.time) as f32;
        ui.add_space(40.0);
        ui.label(egui::RichText::new("\u{1F52E}").size(64.0 + 6.0 * (t * 3.0).sin()));
        ui.add_space(12.0);
        ui.spinner();
        ui.add_space(8.0);
        ui.label(
            egui::RichText::new("The Oracle is peering into the swirling mists...")
                .size(18.0)
                .color(ui::LAVENDER),
        );
        ctx.request_repaint();
    }

    // ─── Error ───────────────────────────────────────────────────────────────

    pub fn draw_error(&mut self, ui: &mut egui::Ui) {
        let message = self.session.error().unwrap_or_default().to_string();
        ui::panel(ui, ui::RED, 1.0, |ui| {
            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new("A disturbance in the ether!")
                        .size(22.0)
                        .strong()
                        .color(ui::RED),
                );
                ui.add_space(6.0);
                ui.label(egui::RichText::new(message).color(ui::LIGHT_GRAY));
                ui.add_space(12.0);
                if ui.button("Try Again").clicked() {
                    self.session.reset();
                }
            });
        });
    }

    // ─── Result ──────────────────────────────────────────────────────────────

    pub fn draw_result(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let now = self.now();

        let typed = match self.revealed_at {
            Some(at) => {
                let elapsed = now.saturating_sub(at).as_secs_f32() - TYPE_DELAY;
                (elapsed.max(0.0) * TYPE_CHARS_PER_SEC) as usize
            }
            None => usize::MAX,
        };
        if typed < SPOKEN.chars().count() {
            ctx.request_repaint();
        }
        ui.label(
            egui::RichText::new(ui::typed_prefix(SPOKEN, typed))
                .size(26.0)
                .color(ui::LAVENDER),
        );
        ui.add_space(12.0);

        let flip = ctx.animate_bool_with_time(
            egui::Id::new("zodiac-card-flip"),
            self.session.is_flipped(),
            FLIP_SECONDS,
        );
        let reveal_alpha = ((flip - 0.5) * 2.0).clamp(0.0, 1.0);

        let card = ui.vertical(|ui| {
            ui::zodiac_card(ui, self.session.sign(), flip);
            if self.session.is_flipped() {
                ui::vibe_check(ui, self.session.tags(), reveal_alpha);
                ui::taste_twin(ui, self.session.twin(), reveal_alpha);
            }
        });
        self.card_rect = Some(card.response.rect);

        if !self.session.is_flipped() {
            return;
        }

        ui.add_space(20.0);
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 10.0;
            ui.set_opacity(reveal_alpha);

            if ui.button("Spin Again").clicked() {
                self.spin_again();
            }

            let copy_label = if self.session.is_copied() {
                "Copied!"
            } else {
                "Copy Prophecy"
            };
            if ui.button(copy_label).clicked() {
                if let Some(text) = self.session.copy_prophecy(now) {
                    ctx.copy_text(text);
                }
            }

            let download = egui::Button::new(if self.export_pending {
                "Capturing..."
            } else {
                "Download Image"
            });
            if ui.add_enabled(!self.export_pending, download).clicked() {
                self.export_pending = true;
                self.export_status = None;
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot);
            }

            if ui.button("View Constellation Map").clicked() {
                self.session.open_map();
            }
        });

        if let Some(status) = &self.export_status {
            ui.add_space(6.0);
            ui.label(egui::RichText::new(status).small().color(ui::GRAY));
        }
    }

    /// Back to the form, dropping the reading and any capture still in flight.
    pub fn spin_again(&mut self) {
        self.session.reset();
        self.revealed_at = None;
        self.export_pending = false;
        self.export_status = None;
    }

    // ─── Export ──────────────────────────────────────────────────────────────

    /// Pick up a requested screenshot and write the card out of it.
    pub fn check_screenshot(&mut self, ctx: &egui::Context) {
        if !self.export_pending {
            return;
        }
        let image = ctx.input(|i| {
            i.events.iter().find_map(|e| match e {
                egui::Event::Screenshot { image, .. } => Some(image.clone()),
                _ => None,
            })
        });
        let Some(image) = image else {
            return;
        };
        self.export_pending = false;

        let result = self.export_card(&image, ctx.pixels_per_point());
        self.export_status = Some(match result {
            Ok(path) => format!("Saved {}", path.display()),
            Err(e) => {
                log::warn!("Card export failed: {}", e);
                format!("Could not save the card: {}", e.message)
            }
        });
    }

    fn export_card(
        &self,
        image: &egui::ColorImage,
        pixels_per_point: f32,
    ) -> Result<std::path::PathBuf, ExportError> {
        let card = self.card_rect.ok_or_else(|| ExportError {
            message: "no card on screen".to_string(),
            phase: "capture",
        })?;

        let rgba: Vec<u8> = image
            .pixels
            .iter()
            .flat_map(|px| px.to_srgba_unmultiplied())
            .collect();
        let capture = CardCapture::new(image.size[0] as u32, image.size[1] as u32, rgba)?;

        let min = card.min.to_vec2() * pixels_per_point;
        let size = card.size() * pixels_per_point;
        let region = PixelRect {
            x: min.x.max(0.0).round() as u32,
            y: min.y.max(0.0).round() as u32,
            width: size.x.round() as u32,
            height: size.y.round() as u32,
        };

        save_card(&capture, region, self.session.sign(), &self.config.export_dir)
    }
}

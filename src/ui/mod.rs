//! Stateless egui renderers shared across screens.
//!
//! Card, vibe check and taste twin draw whatever they are given and keep
//! no state of their own; the flip progress and fade come from the caller.

use eframe::egui;
use cultural_zodiac::zodiac::{hashtag, Rgb, Sign, TasteTags, TasteTwin, DEFAULT_GRADIENT};

// ─── Palette ──────────────────────────────────────────────────────────────────

pub const CYAN: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
pub const PURPLE: egui::Color32 = egui::Color32::from_rgb(192, 132, 252);
pub const LAVENDER: egui::Color32 = egui::Color32::from_rgb(216, 180, 254);
pub const GRAY: egui::Color32 = egui::Color32::from_rgb(156, 163, 175);
pub const LIGHT_GRAY: egui::Color32 = egui::Color32::from_rgb(209, 213, 219);
pub const GREEN: egui::Color32 = egui::Color32::from_rgb(74, 222, 128);
pub const BLUE: egui::Color32 = egui::Color32::from_rgb(96, 165, 250);
pub const GOLD: egui::Color32 = egui::Color32::from_rgb(250, 204, 21);
pub const RED: egui::Color32 = egui::Color32::from_rgb(252, 165, 165);

pub fn rgb(c: Rgb) -> egui::Color32 {
    egui::Color32::from_rgb(c[0], c[1], c[2])
}

fn fade(c: egui::Color32, alpha: f32) -> egui::Color32 {
    c.gamma_multiply(alpha.clamp(0.0, 1.0))
}

/// Card height, fixed so the flip does not reflow the layout.
pub const CARD_HEIGHT: f32 = 440.0;

// ─── Background ──────────────────────────────────────────────────────────────

/// Paint a top-to-bottom three-stop gradient over `rect`.
pub fn paint_gradient(painter: &egui::Painter, rect: egui::Rect, stops: [Rgb; 3]) {
    let [top, mid, bottom] = stops.map(rgb);
    let mid_y = rect.center().y;
    let mut mesh = egui::Mesh::default();
    let bands = [
        (rect.top(), top, mid_y, mid),
        (mid_y, mid, rect.bottom(), bottom),
    ];
    for (y0, c0, y1, c1) in bands {
        let base = mesh.vertices.len() as u32;
        mesh.colored_vertex(egui::pos2(rect.left(), y0), c0);
        mesh.colored_vertex(egui::pos2(rect.right(), y0), c0);
        mesh.colored_vertex(egui::pos2(rect.right(), y1), c1);
        mesh.colored_vertex(egui::pos2(rect.left(), y1), c1);
        mesh.add_triangle(base, base + 1, base + 2);
        mesh.add_triangle(base, base + 2, base + 3);
    }
    painter.add(egui::Shape::mesh(mesh));
}

// ─── Result card ─────────────────────────────────────────────────────────────

/// Draw the tarot card. `flip` runs 0.0 (back) to 1.0 (front).
pub fn zodiac_card(ui: &mut egui::Ui, sign: Option<&Sign>, flip: f32) {
    let Some(sign) = sign else {
        return;
    };

    if flip < 0.5 {
        card_back(ui, 1.0 - flip * 2.0);
    } else {
        card_front(ui, sign, (flip - 0.5) * 2.0);
    }
}

fn card_back(ui: &mut egui::Ui, scale_x: f32) {
    let width = ui.available_width();
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, CARD_HEIGHT), egui::Sense::hover());
    let face = egui::Rect::from_center_size(
        rect.center(),
        egui::vec2((width * scale_x).max(2.0), CARD_HEIGHT),
    );
    let painter = ui.painter();
    paint_gradient(painter, face, DEFAULT_GRADIENT);
    painter.rect_stroke(face, 16.0, egui::Stroke::new(2.0, PURPLE));
    if scale_x > 0.3 {
        let pulse = 0.75 + 0.25 * (ui.input(|i| i.time) as f32 * 2.0).sin();
        painter.text(
            face.center(),
            egui::Align2::CENTER_CENTER,
            "\u{1F52E}",
            egui::FontId::proportional(56.0),
            fade(LAVENDER, pulse),
        );
        ui.ctx().request_repaint();
    }
}

fn card_front(ui: &mut egui::Ui, sign: &Sign, alpha: f32) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(17, 24, 39, (205.0 * alpha) as u8))
        .stroke(egui::Stroke::new(1.0, fade(PURPLE, alpha)))
        .rounding(16.0)
        .inner_margin(20.0)
        .show(ui, |ui| {
            ui.set_min_height(CARD_HEIGHT - 40.0);
            ui.set_width(ui.available_width());

            ui.vertical_centered(|ui| {
                ui.label(
                    egui::RichText::new(sign.title())
                        .size(28.0)
                        .strong()
                        .color(fade(CYAN, alpha)),
                );
                ui.label(
                    egui::RichText::new(format!(
                        "Part of the \"{}\" constellation",
                        sign.constellation
                    ))
                    .italics()
                    .color(fade(PURPLE, alpha)),
                );
            });
            ui.separator();

            egui::ScrollArea::vertical()
                .max_height(CARD_HEIGHT - 170.0)
                .show(ui, |ui| {
                    section_heading(ui, "The Prophecy", alpha);
                    ui.label(
                        egui::RichText::new(format!("\"{}\"", sign.prophecy))
                            .italics()
                            .color(fade(LIGHT_GRAY, alpha)),
                    );
                    ui.add_space(10.0);

                    section_heading(ui, "The Card's Symbolism", alpha);
                    ui.horizontal_wrapped(|ui| {
                        ui.label(egui::RichText::new("Imagery:").strong().color(fade(CYAN, alpha)));
                        ui.label(
                            egui::RichText::new(format!("\"{}\"", sign.description))
                                .color(fade(GRAY, alpha)),
                        );
                    });
                    ui.horizontal_wrapped(|ui| {
                        ui.label(
                            egui::RichText::new("Interpretation:")
                                .strong()
                                .color(fade(CYAN, alpha)),
                        );
                        ui.label(egui::RichText::new(&sign.symbolism).color(fade(GRAY, alpha)));
                    });
                });

            ui.separator();
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new("Absurdity Level")
                        .small()
                        .strong()
                        .color(fade(GRAY, alpha)),
                );
                if sign.rare {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        egui::Frame::none()
                            .fill(fade(GOLD, alpha))
                            .rounding(10.0)
                            .inner_margin(egui::Margin::symmetric(8.0, 2.0))
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new("RARE")
                                        .small()
                                        .strong()
                                        .color(egui::Color32::from_rgb(113, 63, 18)),
                                );
                            });
                    });
                }
            });
            magnitude_bar(ui, sign.absurdity_fraction(), alpha);
        });
}

fn section_heading(ui: &mut egui::Ui, text: &str, alpha: f32) {
    ui.label(
        egui::RichText::new(text)
            .size(17.0)
            .strong()
            .color(fade(LAVENDER, alpha)),
    );
}

/// Rounded track with a cyan-to-purple fill covering `fraction` of it.
fn magnitude_bar(ui: &mut egui::Ui, fraction: f32, alpha: f32) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), 10.0),
        egui::Sense::hover(),
    );
    let painter = ui.painter();
    painter.rect_filled(rect, 5.0, fade(egui::Color32::from_rgb(55, 65, 81), alpha));
    let mut fill = rect;
    fill.set_width(rect.width() * fraction.clamp(0.0, 1.0));
    painter.rect_filled(fill, 5.0, fade(PURPLE, alpha));
    let mut tip = fill;
    tip.set_left(fill.left() + fill.width() * 0.5);
    painter.rect_filled(tip, 5.0, fade(CYAN, alpha * 0.8));
}

// ─── Vibe check ──────────────────────────────────────────────────────────────

pub fn vibe_check(ui: &mut egui::Ui, tags: Option<&TasteTags>, alpha: f32) {
    let Some(tags) = tags.filter(|t| !t.is_empty()) else {
        return;
    };

    ui.add_space(16.0);
    panel(ui, GREEN, alpha, |ui| {
        ui.label(
            egui::RichText::new("Your True Vibe Check")
                .size(22.0)
                .strong()
                .color(fade(GREEN, alpha)),
        );
        ui.label(
            egui::RichText::new("The Oracle found that your tastes are defined by these core tags:")
                .color(fade(GRAY, alpha)),
        );
        ui.add_space(8.0);
        ui.horizontal_wrapped(|ui| {
            for tag in tags {
                egui::Frame::none()
                    .fill(fade(egui::Color32::from_rgb(55, 65, 81), alpha))
                    .rounding(12.0)
                    .inner_margin(egui::Margin::symmetric(10.0, 4.0))
                    .show(ui, |ui| {
                        ui.label(
                            egui::RichText::new(hashtag(tag))
                                .strong()
                                .color(fade(egui::Color32::from_rgb(134, 239, 172), alpha)),
                        );
                    });
            }
        });
    });
}

// ─── Taste twin ──────────────────────────────────────────────────────────────

pub fn taste_twin(ui: &mut egui::Ui, twin: Option<&TasteTwin>, alpha: f32) {
    let Some(twin) = twin else {
        return;
    };

    ui.add_space(16.0);
    panel(ui, BLUE, alpha, |ui| {
        ui.label(
            egui::RichText::new("Your Taste Twin")
                .size(22.0)
                .strong()
                .color(fade(BLUE, alpha)),
        );
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(&twin.emoji).size(44.0));
            ui.label(
                egui::RichText::new(&twin.name)
                    .size(19.0)
                    .strong()
                    .color(fade(egui::Color32::WHITE, alpha)),
            );
            ui.label(
                egui::RichText::new(format!("\"{}\"", twin.bio))
                    .italics()
                    .color(fade(GRAY, alpha)),
            );
        });
    });
}

/// Translucent bordered panel.
pub fn panel(
    ui: &mut egui::Ui,
    border: egui::Color32,
    alpha: f32,
    add_contents: impl FnOnce(&mut egui::Ui),
) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgba_unmultiplied(31, 41, 55, (128.0 * alpha) as u8))
        .stroke(egui::Stroke::new(1.0, fade(border, alpha)))
        .rounding(16.0)
        .inner_margin(18.0)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            add_contents(ui);
        });
}

/// `text` cut to its first `visible` characters.
pub fn typed_prefix(text: &str, visible: usize) -> &str {
    match text.char_indices().nth(visible) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Vertical space `draw` takes up in a headless frame.
    fn height_used(mut draw: impl FnMut(&mut egui::Ui)) -> f32 {
        let ctx = egui::Context::default();
        let mut used = 0.0;
        let _ = ctx.run(egui::RawInput::default(), |ctx| {
            egui::CentralPanel::default().show(ctx, |ui| {
                let before = ui.next_widget_position().y;
                draw(ui);
                used = ui.next_widget_position().y - before;
            });
        });
        used
    }

    fn hermit() -> Sign {
        Sign {
            name: "The Hermit".to_string(),
            emoji: "\u{1F311}".to_string(),
            constellation: "Cosmic Isolation".to_string(),
            absurdity: 3,
            ..Sign::default()
        }
    }

    #[test]
    fn missing_data_draws_nothing() {
        assert_eq!(height_used(|ui| zodiac_card(ui, None, 1.0)), 0.0);
        assert_eq!(height_used(|ui| vibe_check(ui, None, 1.0)), 0.0);
        assert_eq!(height_used(|ui| vibe_check(ui, Some(&Vec::new()), 1.0)), 0.0);
        assert_eq!(height_used(|ui| taste_twin(ui, None, 1.0)), 0.0);
    }

    #[test]
    fn present_data_takes_space() {
        let sign = hermit();
        let tags: TasteTags = vec!["80s Sci-Fi".to_string()];
        let twin = TasteTwin {
            name: "The Wanderer".to_string(),
            emoji: "\u{1F9ED}".to_string(),
            bio: "Off the map.".to_string(),
        };
        assert!(height_used(|ui| zodiac_card(ui, Some(&sign), 0.0)) >= CARD_HEIGHT);
        assert!(height_used(|ui| vibe_check(ui, Some(&tags), 1.0)) > 0.0);
        assert!(height_used(|ui| taste_twin(ui, Some(&twin), 1.0)) > 0.0);
    }

    #[test]
    fn typed_prefix_counts_characters() {
        assert_eq!(typed_prefix("The stars", 3), "The");
        assert_eq!(typed_prefix("\u{1F311}ab", 1), "\u{1F311}");
        assert_eq!(typed_prefix("abc", 99), "abc");
    }
}

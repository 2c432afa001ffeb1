//! Constellation map overlay for `ZodiacApp`.
//!
//! Overview shows every cluster in a grid; clicking one zooms into it.
//! Node clicks are collected while painting and applied afterwards, since
//! painting only borrows the map.

use std::time::Duration;

use eframe::egui;

use cultural_zodiac::render::constellation::{Cluster, ConstellationMap};
use cultural_zodiac::render::sky::{flatten, outline, star_field, OVERVIEW_STARS, VIEW_BOX, ZOOMED_STARS};
use cultural_zodiac::zodiac::Sign;

use super::ZodiacApp;
use crate::ui;

const OVERVIEW_HEIGHT: f32 = 260.0;
const FOOTER_HEIGHT: f32 = 80.0;
const CURVE_STEPS: usize = 16;

enum MapClick {
    Cluster(String, Option<Sign>),
    Node(Sign),
}

impl ZodiacApp {
    pub fn draw_constellation_map(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let Some(map) = self.session.map() else {
            return;
        };
        let t = ctx.input(|i| i.time) as f32;
        let mut click: Option<MapClick> = None;
        let mut back = false;

        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("The Cosmic Map")
                    .size(30.0)
                    .strong()
                    .color(ui::LAVENDER),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button(map.back_label()).clicked() {
                    back = true;
                }
            });
        });
        ui.separator();

        let body_height = (ui.available_height() - FOOTER_HEIGHT).max(OVERVIEW_HEIGHT);
        match map.zoomed() {
            Some(cluster) => {
                let size = egui::vec2(ui.available_width(), body_height);
                draw_cluster(ui, map, cluster, size, true, t, &mut click);
            }
            None => {
                egui::ScrollArea::vertical()
                    .max_height(body_height)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let spacing = 12.0;
                        let width = ((ui.available_width() - spacing) / 2.0).max(160.0);
                        egui::Grid::new("constellation-grid")
                            .num_columns(2)
                            .spacing([spacing, spacing])
                            .show(ui, |ui| {
                                for (i, cluster) in map.clusters().iter().enumerate() {
                                    let size = egui::vec2(width, OVERVIEW_HEIGHT);
                                    draw_cluster(ui, map, cluster, size, false, t, &mut click);
                                    if i % 2 == 1 {
                                        ui.end_row();
                                    }
                                }
                            });
                    });
            }
        }

        ui.add_space(8.0);
        draw_footer(ui, map.selected());

        if back {
            self.session.map_back();
        } else if let Some(map) = self.session.map_mut() {
            match click {
                Some(MapClick::Cluster(name, sign)) => map.click_cluster(&name, sign.as_ref()),
                Some(MapClick::Node(sign)) => map.select(&sign),
                None => {}
            }
        }

        // twinkle
        ctx.request_repaint_after(Duration::from_millis(33));
    }
}

fn draw_cluster(
    ui: &mut egui::Ui,
    map: &ConstellationMap,
    cluster: &Cluster,
    size: egui::Vec2,
    zoomed: bool,
    t: f32,
    click: &mut Option<MapClick>,
) {
    let (rect, response) = ui.allocate_exact_size(size, egui::Sense::click());
    let painter = ui.painter_at(rect);

    let highlighted = zoomed || map.is_home(cluster);
    let border = if highlighted {
        egui::Stroke::new(2.0, ui::GOLD)
    } else if response.hovered() {
        egui::Stroke::new(1.5, ui::PURPLE)
    } else {
        egui::Stroke::new(1.0, egui::Color32::from_gray(75))
    };
    painter.rect(
        rect,
        12.0,
        ui::rgb(cluster.kind.backdrop()).gamma_multiply(0.85),
        border,
    );
    painter.text(
        rect.center_top() + egui::vec2(0.0, 18.0),
        egui::Align2::CENTER_CENTER,
        &cluster.name,
        egui::FontId::proportional(if zoomed { 22.0 } else { 17.0 }),
        ui::LAVENDER,
    );

    let area = egui::Rect::from_min_max(
        rect.min + egui::vec2(16.0, 40.0),
        rect.max - egui::vec2(16.0, 16.0),
    );
    let at = |fx: f32, fy: f32| area.min + egui::vec2(fx * area.width(), fy * area.height());

    let count = if zoomed { ZOOMED_STARS } else { OVERVIEW_STARS };
    for star in star_field(&cluster.name, zoomed, count) {
        painter.circle_filled(
            at(star.left * 0.01, star.top * 0.01),
            star.size * 0.5,
            egui::Color32::WHITE.gamma_multiply(star.brightness(t)),
        );
    }

    let line = egui::Stroke::new(1.5, egui::Color32::from_white_alpha(60));
    for polyline in flatten(outline(cluster.kind), CURVE_STEPS) {
        let points: Vec<egui::Pos2> = polyline
            .iter()
            .map(|&(x, y)| at(x / VIEW_BOX.0, y / VIEW_BOX.1))
            .collect();
        painter.add(egui::Shape::line(points, line));
    }

    let radius = if zoomed { 9.0 } else { 6.0 };
    for (i, (sign, slot)) in cluster.nodes().enumerate() {
        let (fx, fy) = slot.fraction();
        let center = at(fx, fy);
        let hit = egui::Rect::from_center_size(center, egui::vec2(radius * 3.0, radius * 3.0));
        let node = ui.interact(
            hit,
            ui.id().with(("constellation-node", cluster.slug(), i)),
            egui::Sense::click(),
        );

        let is_user = map.is_user(sign);
        let is_selected = map.is_selected(sign);
        let fill = if is_user {
            ui::GOLD
        } else if is_selected {
            ui::CYAN
        } else {
            egui::Color32::WHITE
        };
        if is_user {
            painter.circle_stroke(center, radius + 5.0, egui::Stroke::new(1.5, ui::GOLD));
        }
        if is_selected {
            painter.circle_filled(center, radius * 2.0, fill.gamma_multiply(0.25));
        }
        painter.circle_filled(center, radius, fill);

        if zoomed || node.hovered() {
            painter.text(
                center + egui::vec2(0.0, radius + 12.0),
                egui::Align2::CENTER_CENTER,
                sign.title(),
                egui::FontId::proportional(if zoomed { 15.0 } else { 12.0 }),
                egui::Color32::WHITE,
            );
        }

        if node.clicked() {
            *click = Some(if zoomed {
                MapClick::Node(sign.clone())
            } else {
                MapClick::Cluster(cluster.name.clone(), Some(sign.clone()))
            });
        }
    }

    if click.is_none() && !zoomed && response.clicked() {
        *click = Some(MapClick::Cluster(cluster.name.clone(), None));
    }
}

fn draw_footer(ui: &mut egui::Ui, selected: &Sign) {
    ui::panel(ui, ui::PURPLE, 1.0, |ui| {
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new(&selected.emoji).size(30.0));
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(&selected.name)
                        .size(18.0)
                        .strong()
                        .color(ui::CYAN),
                );
                if !selected.compatibility.is_empty() {
                    ui.label(
                        egui::RichText::new(format!("\"{}\"", selected.compatibility))
                            .italics()
                            .color(ui::GRAY),
                    );
                }
            });
        });
    });
}

//! `ZodiacApp`: the top-level egui application state.
//!
//! This module declares the `ZodiacApp` struct and its `eframe::App` impl.
//! All other methods are split across the sibling sub-modules:
//!
//! - `oracle`:  submission and the background Oracle request
//! - `form`:    offering rows and form buttons
//! - `content`: loading, error and result screens, card export
//! - `map`:     the constellation map overlay

pub mod oracle;
pub mod form;
pub mod content;
pub mod map;

use std::sync::{mpsc, Arc};
use std::time::{Duration, Instant};

use eframe::egui;

use cultural_zodiac::audio::AudioDeck;
use cultural_zodiac::config::OracleConfig;
use cultural_zodiac::engine::session::{Screen, Session};
use cultural_zodiac::net::oracle::OracleError;
use cultural_zodiac::zodiac::Reading;

// ─── Application state ───────────────────────────────────────────────────────

pub struct ZodiacApp {
    pub session: Session,
    pub config: Arc<OracleConfig>,
    pub reading_rx: Option<mpsc::Receiver<Result<Reading, OracleError>>>,
    pub audio: AudioDeck,
    pub app_start: Instant,
    /// When the current reading arrived, for the typed heading.
    pub revealed_at: Option<Duration>,
    /// Screen area of the card and its panels, in points.
    pub card_rect: Option<egui::Rect>,
    /// A screenshot was requested for export and has not arrived yet.
    pub export_pending: bool,
    pub export_status: Option<String>,
}

impl ZodiacApp {
    pub fn new(config: OracleConfig) -> Self {
        log::info!("Oracle endpoint: {}", config.endpoint);
        Self {
            session: Session::new(config.share_url.clone()),
            config: Arc::new(config),
            reading_rx: None,
            audio: AudioDeck::open_default(),
            app_start: Instant::now(),
            revealed_at: None,
            card_rect: None,
            export_pending: false,
            export_status: None,
        }
    }

    /// Monotonic time since start-up; the session's clock.
    pub fn now(&self) -> Duration {
        self.app_start.elapsed()
    }
}

// ─── eframe::App impl ────────────────────────────────────────────────────────

impl eframe::App for ZodiacApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_reading();
        self.advance_timeline(ctx);
        self.check_screenshot(ctx);

        if ctx.input(|i| i.pointer.any_click()) {
            self.audio.on_interaction();
        }

        let gradient = self.session.gradient();
        let screen = ctx.screen_rect();
        crate::ui::paint_gradient(
            &ctx.layer_painter(egui::LayerId::background()),
            screen,
            gradient,
        );

        egui::CentralPanel::default()
            .frame(egui::Frame::none().inner_margin(24.0))
            .show(ctx, |ui| {
                if self.session.is_map_visible() {
                    self.draw_constellation_map(ui, ctx);
                    return;
                }

                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(640.0);
                            self.draw_header(ui);
                            match self.session.screen() {
                                Screen::Form => self.draw_form(ui, ctx),
                                Screen::Loading => self.draw_loading(ui, ctx),
                                Screen::Error => self.draw_error(ui),
                                Screen::Result => self.draw_result(ui, ctx),
                            }
                        });
                    });
            });
    }
}

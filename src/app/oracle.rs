//! Oracle request methods for `ZodiacApp`.
//!
//! `submit` validates through the session and starts the background request;
//! `check_reading` polls for its answer once per frame.

use std::sync::{mpsc, Arc};
use std::time::Duration;

use eframe::egui;

use cultural_zodiac::engine::session::SubmitError;
use cultural_zodiac::net::oracle::{self, OracleError};
use cultural_zodiac::render::reveal::Cue;

use super::ZodiacApp;

impl ZodiacApp {
    /// Send the filled offerings to the Oracle on a worker thread.
    pub fn submit(&mut self, ctx: &egui::Context) {
        let request = match self.session.submit() {
            Ok(request) => request,
            Err(SubmitError::InFlight) => return,
            Err(e @ SubmitError::NoOfferings) => {
                log::debug!("{}", e);
                return;
            }
        };
        self.revealed_at = None;
        self.card_rect = None;
        self.export_status = None;

        let (tx, rx) = mpsc::channel();
        self.reading_rx = Some(rx);

        let config = Arc::clone(&self.config);
        let ctx = ctx.clone();

        std::thread::spawn(move || {
            let result = oracle::consult(&config, &request);
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Poll the request channel and hand the answer to the session.
    pub fn check_reading(&mut self) {
        let Some(rx) = &self.reading_rx else {
            return;
        };
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                Err(OracleError::Unreachable("request worker exited".to_string()))
            }
        };
        self.reading_rx = None;

        let now = self.now();
        let ok = result.is_ok();
        self.session.complete(result, now);
        if ok {
            self.revealed_at = Some(now);
        }
    }

    /// Fire due reveal cues and wake up again for the next one.
    pub fn advance_timeline(&mut self, ctx: &egui::Context) {
        let now = self.now();
        for cue in self.session.tick(now) {
            if cue == Cue::PlayVoice {
                self.audio.play_voice();
            }
        }
        if let Some(wait) = self.session.next_due_in(now) {
            ctx.request_repaint_after(wait.max(Duration::from_millis(1)));
        }
    }
}

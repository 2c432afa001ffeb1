//! Quiz session: offerings in, one reading out.
//!
//! The session owns every piece of state the screens read and is driven
//! from outside: `submit` hands back the request to send, `complete` takes
//! the worker's answer, `tick` advances the reveal timeline. It performs no
//! I/O itself.

use std::time::Duration;

use rand::Rng;

use crate::net::oracle::{OracleError, OracleRequest};
use crate::render::constellation::{ConstellationMap, MapAction};
use crate::render::reveal::{schedule_reveal, Cue, Timeline, COPIED_DELAY};
use crate::share::share_text;
use crate::zodiac::offerings::oracle_pick;
use crate::zodiac::{
    Offering, OfferingKind, Reading, Rgb, Sign, TasteTags, TasteTwin, DEFAULT_GRADIENT,
};

pub const NO_OFFERINGS_MESSAGE: &str = "The Oracle requires an offering. Please share a taste.";

/// The four mutually exclusive screens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Loading,
    Error,
    Result,
}

/// Why `submit` produced no request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitError {
    /// Every offering is blank.
    NoOfferings,
    /// A request is already on its way.
    InFlight,
}

impl std::fmt::Display for SubmitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitError::NoOfferings => write!(f, "{}", NO_OFFERINGS_MESSAGE),
            SubmitError::InFlight => write!(f, "The Oracle is still peering into the mists"),
        }
    }
}

impl std::error::Error for SubmitError {}

pub struct Session {
    offerings: Vec<Offering>,
    loading: bool,
    error: Option<String>,
    reading: Option<Reading>,
    flipped: bool,
    copied: bool,
    map: Option<ConstellationMap>,
    timeline: Timeline,
    share_url: String,
}

impl Session {
    pub fn new(share_url: impl Into<String>) -> Self {
        Self {
            offerings: vec![Offering::default()],
            loading: false,
            error: None,
            reading: None,
            flipped: false,
            copied: false,
            map: None,
            timeline: Timeline::new(),
            share_url: share_url.into(),
        }
    }

    // ── Queries ──────────────────────────────────────────────────────────────

    pub fn screen(&self) -> Screen {
        if self.reading.is_some() {
            Screen::Result
        } else if self.loading {
            Screen::Loading
        } else if self.error.is_some() {
            Screen::Error
        } else {
            Screen::Form
        }
    }

    pub fn offerings(&self) -> &[Offering] {
        &self.offerings
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn reading(&self) -> Option<&Reading> {
        self.reading.as_ref()
    }

    pub fn sign(&self) -> Option<&Sign> {
        self.reading.as_ref().map(|r| &r.sign)
    }

    pub fn tags(&self) -> Option<&TasteTags> {
        self.reading.as_ref().and_then(|r| r.tags.as_ref())
    }

    pub fn twin(&self) -> Option<&TasteTwin> {
        self.reading.as_ref().and_then(|r| r.twin.as_ref())
    }

    pub fn catalog(&self) -> &[Sign] {
        self.reading
            .as_ref()
            .map(|r| r.catalog.as_slice())
            .unwrap_or(&[])
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn is_copied(&self) -> bool {
        self.copied
    }

    pub fn is_map_visible(&self) -> bool {
        self.map.is_some()
    }

    pub fn map(&self) -> Option<&ConstellationMap> {
        self.map.as_ref()
    }

    pub fn map_mut(&mut self) -> Option<&mut ConstellationMap> {
        self.map.as_mut()
    }

    /// Time until the next scheduled cue.
    pub fn next_due_in(&self, now: Duration) -> Option<Duration> {
        self.timeline.next_due_in(now)
    }

    /// Window gradient for the current reading.
    pub fn gradient(&self) -> [Rgb; 3] {
        self.sign()
            .map(|s| s.kind().gradient())
            .unwrap_or(DEFAULT_GRADIENT)
    }

    // ── Offerings ────────────────────────────────────────────────────────────

    pub fn add_offering(&mut self) {
        self.offerings.push(Offering::default());
    }

    pub fn set_offering_kind(&mut self, index: usize, kind: OfferingKind) {
        if let Some(row) = self.offerings.get_mut(index) {
            row.kind = kind;
        }
    }

    pub fn set_offering_name(&mut self, index: usize, name: impl Into<String>) {
        if let Some(row) = self.offerings.get_mut(index) {
            row.name = name.into();
        }
    }

    /// Mutable row access for in-place text editing.
    pub fn offering_mut(&mut self, index: usize) -> Option<&mut Offering> {
        self.offerings.get_mut(index)
    }

    /// Replace the first row with one of the Oracle's suggestions.
    pub fn oracle_choose<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let pick = oracle_pick(rng);
        log::debug!("Oracle chose {:?} {:?}", pick.kind, pick.name);
        match self.offerings.first_mut() {
            Some(first) => *first = pick,
            None => self.offerings.push(pick),
        }
    }

    // ── Request lifecycle ────────────────────────────────────────────────────

    /// Validate the offerings and start a request.
    ///
    /// On success the session is loading and the caller must send the
    /// returned request exactly once, then report back through `complete`.
    pub fn submit(&mut self) -> Result<OracleRequest, SubmitError> {
        if self.loading {
            log::debug!("Submission ignored: request already in flight");
            return Err(SubmitError::InFlight);
        }

        self.clear_result();
        self.error = None;

        let inputs: Vec<Offering> = self
            .offerings
            .iter()
            .filter(|o| o.is_filled())
            .cloned()
            .collect();

        if inputs.is_empty() {
            self.error = Some(NO_OFFERINGS_MESSAGE.to_string());
            return Err(SubmitError::NoOfferings);
        }

        self.loading = true;
        log::info!("Submitting {} offering(s)", inputs.len());
        Ok(OracleRequest { inputs })
    }

    /// Accept or discard the Oracle's answer. `now` anchors the reveal.
    pub fn complete(&mut self, result: Result<Reading, OracleError>, now: Duration) {
        if !self.loading {
            log::warn!("Dropping an Oracle answer nobody is waiting for");
            return;
        }
        self.loading = false;

        match result {
            Ok(reading) => {
                log::info!(
                    "Reading: {} ({}), catalog of {}",
                    reading.sign.name,
                    reading.sign.constellation,
                    reading.catalog.len()
                );
                self.error = None;
                self.reading = Some(reading);
                schedule_reveal(&mut self.timeline, now);
            }
            Err(e) => {
                log::warn!("{}", e);
                self.error = Some(e.user_message());
                self.reading = None;
            }
        }
    }

    /// Fire every due cue. Returns the cues so the caller can play sounds.
    pub fn tick(&mut self, now: Duration) -> Vec<Cue> {
        let fired = self.timeline.advance(now);
        for cue in &fired {
            match cue {
                Cue::FlipCard => self.flipped = true,
                Cue::ClearCopied => self.copied = false,
                Cue::PlayVoice => {}
            }
        }
        fired
    }

    /// Back to the form. The offering rows are kept.
    pub fn reset(&mut self) {
        self.clear_result();
        self.error = None;
    }

    fn clear_result(&mut self) {
        self.timeline.cancel_all();
        self.reading = None;
        self.flipped = false;
        self.copied = false;
        self.map = None;
    }

    // ── Result actions ───────────────────────────────────────────────────────

    /// Share text for the clipboard; shows "Copied!" for a while.
    pub fn copy_prophecy(&mut self, now: Duration) -> Option<String> {
        let text = share_text(self.sign()?, &self.share_url);
        self.copied = true;
        self.timeline.cancel_cue(Cue::ClearCopied);
        self.timeline.schedule(now, COPIED_DELAY, Cue::ClearCopied);
        Some(text)
    }

    pub fn open_map(&mut self) {
        if let Some(reading) = &self.reading {
            self.map = Some(ConstellationMap::new(reading.sign.clone(), &reading.catalog));
        }
    }

    pub fn close_map(&mut self) {
        self.map = None;
    }

    /// Apply the map's header action.
    pub fn map_back(&mut self) {
        let action = self
            .map
            .as_mut()
            .map(|m| m.back())
            .unwrap_or(MapAction::Close);
        if action == MapAction::Close {
            self.close_map();
        }
    }
}

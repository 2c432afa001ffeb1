//! Reveal timeline: cancellable delayed tasks on an explicit clock.
//!
//! The timeline never reads a wall clock. Callers pass the elapsed time
//! since a fixed origin (the app measures from startup, tests pass literal
//! `Duration`s).

use std::time::Duration;

/// Voice cue delay after a reading lands.
pub const VOICE_DELAY: Duration = Duration::from_millis(100);
/// Card flip delay after a reading lands.
pub const FLIP_DELAY: Duration = Duration::from_millis(3500);
/// How long "Copied!" stays up.
pub const COPIED_DELAY: Duration = Duration::from_millis(2000);
/// Card flip animation length, in seconds.
pub const FLIP_SECONDS: f32 = 0.8;

/// Something the timeline can fire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    PlayVoice,
    FlipCard,
    ClearCopied,
}

/// Handle to a scheduled task, usable for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Scheduled {
    id: TaskId,
    due: Duration,
    cue: Cue,
}

/// Ordered set of pending tasks.
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    pending: Vec<Scheduled>,
    next_id: u64,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `cue` to fire `delay` after `now`.
    pub fn schedule(&mut self, now: Duration, delay: Duration, cue: Cue) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.pending.push(Scheduled {
            id,
            due: now + delay,
            cue,
        });
        id
    }

    /// Cancel one task. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TaskId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|t| t.id != id);
        self.pending.len() != before
    }

    /// Cancel every pending task carrying `cue`.
    pub fn cancel_cue(&mut self, cue: Cue) {
        self.pending.retain(|t| t.cue != cue);
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return every task due at or before `now`, in due order.
    pub fn advance(&mut self, now: Duration) -> Vec<Cue> {
        let mut due: Vec<Scheduled> = Vec::new();
        self.pending.retain(|t| {
            if t.due <= now {
                due.push(t.clone());
                false
            } else {
                true
            }
        });
        due.sort_by_key(|t| (t.due, t.id.0));
        due.into_iter().map(|t| t.cue).collect()
    }

    /// Time until the next task fires, for repaint scheduling.
    pub fn next_due_in(&self, now: Duration) -> Option<Duration> {
        self.pending
            .iter()
            .map(|t| t.due.saturating_sub(now))
            .min()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

/// Schedule the standard reveal: voice cue, then the card flip.
pub fn schedule_reveal(timeline: &mut Timeline, now: Duration) {
    timeline.schedule(now, VOICE_DELAY, Cue::PlayVoice);
    timeline.schedule(now, FLIP_DELAY, Cue::FlipCard);
}

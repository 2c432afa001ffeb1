//! Audio cues: the ambient loop and the Oracle's voice.
//!
//! `AudioDeck` is the single owner of playback. The app creates it at
//! startup, arms the ambient loop until the first pointer interaction, and
//! the deck stops everything when dropped.

#[cfg(feature = "sound")]
pub mod tone;

/// The two clips the app plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    /// Looping background music.
    Ambient,
    /// One-shot cue when a reading is revealed.
    Voice,
}

/// Ambient loop volume.
pub const AMBIENT_VOLUME: f32 = 0.2;

/// Playback backend.
pub trait CuePlayer {
    fn start_loop(&mut self, sound: Sound, volume: f32);
    fn play_once(&mut self, sound: Sound);
    fn stop(&mut self);
}

/// Backend that only records cues in the log.
#[derive(Debug, Default)]
pub struct LogPlayer;

impl CuePlayer for LogPlayer {
    fn start_loop(&mut self, sound: Sound, volume: f32) {
        log::info!("Audio: loop {:?} at volume {:.2}", sound, volume);
    }

    fn play_once(&mut self, sound: Sound) {
        log::info!("Audio: play {:?}", sound);
    }

    fn stop(&mut self) {
        log::info!("Audio: stop");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientState {
    /// Waiting for the first user interaction.
    Armed,
    Playing,
    Stopped,
}

/// Owned playback resource scoped to the application's lifetime.
pub struct AudioDeck {
    player: Box<dyn CuePlayer>,
    ambient: AmbientState,
}

impl AudioDeck {
    pub fn new(player: Box<dyn CuePlayer>) -> Self {
        Self {
            player,
            ambient: AmbientState::Armed,
        }
    }

    /// The synthesized backend when the `sound` feature is on and an output
    /// device exists, otherwise the logging backend.
    pub fn open_default() -> Self {
        #[cfg(feature = "sound")]
        {
            match tone::TonePlayer::open() {
                Ok(player) => return Self::new(Box::new(player)),
                Err(e) => log::warn!("No audio output, cues will only be logged: {}", e),
            }
        }
        Self::new(Box::new(LogPlayer))
    }

    pub fn ambient(&self) -> AmbientState {
        self.ambient
    }

    /// Start the ambient loop on the first interaction. Later calls do nothing.
    pub fn on_interaction(&mut self) {
        if self.ambient == AmbientState::Armed {
            self.player.start_loop(Sound::Ambient, AMBIENT_VOLUME);
            self.ambient = AmbientState::Playing;
        }
    }

    pub fn play_voice(&mut self) {
        self.player.play_once(Sound::Voice);
    }

    /// Stop the ambient loop for good.
    pub fn shutdown(&mut self) {
        if self.ambient != AmbientState::Stopped {
            self.player.stop();
            self.ambient = AmbientState::Stopped;
        }
    }
}

impl Drop for AudioDeck {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// Records every backend call.
    #[derive(Clone, Default)]
    pub(crate) struct Recorder {
        pub calls: Arc<Mutex<Vec<String>>>,
    }

    impl Recorder {
        pub(crate) fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl CuePlayer for Recorder {
        fn start_loop(&mut self, sound: Sound, volume: f32) {
            self.calls
                .lock()
                .unwrap()
                .push(format!("loop {:?} {:.1}", sound, volume));
        }

        fn play_once(&mut self, sound: Sound) {
            self.calls.lock().unwrap().push(format!("play {:?}", sound));
        }

        fn stop(&mut self) {
            self.calls.lock().unwrap().push("stop".to_string());
        }
    }

    #[test]
    fn ambient_starts_once_on_first_interaction() {
        let rec = Recorder::default();
        let mut deck = AudioDeck::new(Box::new(rec.clone()));
        assert_eq!(deck.ambient(), AmbientState::Armed);
        deck.on_interaction();
        deck.on_interaction();
        assert_eq!(deck.ambient(), AmbientState::Playing);
        assert_eq!(rec.calls(), ["loop Ambient 0.2"]);
    }

    #[test]
    fn drop_stops_playback_once() {
        let rec = Recorder::default();
        {
            let mut deck = AudioDeck::new(Box::new(rec.clone()));
            deck.on_interaction();
            deck.play_voice();
            deck.shutdown();
            deck.on_interaction();
        }
        assert_eq!(rec.calls(), ["loop Ambient 0.2", "play Voice", "stop"]);
    }
}

//! Synthesized cues on the default `cpal` output device.
//!
//! Ambient: a slow two-voice drone. Voice: a decaying bell chime.

use std::sync::{Arc, Mutex};

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::Stream;

use super::{CuePlayer, Sound};

const TAU: f32 = std::f32::consts::TAU;
const CHIME_SECONDS: f32 = 1.6;

#[derive(Default)]
struct Voices {
    ambient_volume: f32,
    ambient_phase: f32,
    /// Seconds since the chime started, `None` when silent.
    chime_t: Option<f32>,
}

impl Voices {
    fn sample(&mut self, dt: f32) -> f32 {
        let mut out = 0.0;

        if self.ambient_volume > 0.0 {
            self.ambient_phase += dt;
            let t = self.ambient_phase;
            let swell = 0.75 + 0.25 * (t * 0.2 * TAU).sin();
            out += self.ambient_volume
                * swell
                * 0.5
                * ((t * 110.0 * TAU).sin() + 0.6 * (t * 164.8 * TAU).sin());
        }

        if let Some(t) = self.chime_t {
            if t >= CHIME_SECONDS {
                self.chime_t = None;
            } else {
                let env = (-3.0 * t).exp();
                out += 0.4 * env * ((t * 659.3 * TAU).sin() + 0.5 * (t * 987.8 * TAU).sin());
                self.chime_t = Some(t + dt);
            }
        }

        out.clamp(-1.0, 1.0)
    }
}

/// `CuePlayer` backed by a live output stream.
pub struct TonePlayer {
    voices: Arc<Mutex<Voices>>,
    _stream: Stream,
}

impl TonePlayer {
    pub fn open() -> Result<Self, Box<dyn std::error::Error>> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or("no output device available")?;

        let supported = device.default_output_config()?;
        if supported.sample_format() != cpal::SampleFormat::F32 {
            return Err(format!("unsupported sample format {:?}", supported.sample_format()).into());
        }
        let config: cpal::StreamConfig = supported.into();
        let channels = config.channels as usize;
        let dt = 1.0 / config.sample_rate.0 as f32;

        let voices = Arc::new(Mutex::new(Voices::default()));
        let voices_cb = Arc::clone(&voices);

        let stream = device.build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                let Ok(mut v) = voices_cb.lock() else {
                    data.fill(0.0);
                    return;
                };
                for frame in data.chunks_mut(channels) {
                    let s = v.sample(dt);
                    frame.fill(s);
                }
            },
            |err| log::warn!("audio stream error: {}", err),
            None,
        )?;
        stream.play()?;

        log::info!("Audio output opened ({} ch, {} Hz)", channels, config.sample_rate.0);
        Ok(Self {
            voices,
            _stream: stream,
        })
    }

    fn with_voices(&self, f: impl FnOnce(&mut Voices)) {
        match self.voices.lock() {
            Ok(mut v) => f(&mut v),
            Err(_) => log::warn!("audio state poisoned, cue dropped"),
        }
    }
}

impl CuePlayer for TonePlayer {
    fn start_loop(&mut self, sound: Sound, volume: f32) {
        if sound == Sound::Ambient {
            self.with_voices(|v| v.ambient_volume = volume.clamp(0.0, 1.0));
        }
    }

    fn play_once(&mut self, sound: Sound) {
        if sound == Sound::Voice {
            self.with_voices(|v| v.chime_t = Some(0.0));
        }
    }

    fn stop(&mut self) {
        self.with_voices(|v| {
            v.ambient_volume = 0.0;
            v.chime_t = None;
        });
    }
}

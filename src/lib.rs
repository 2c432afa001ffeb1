pub mod config;
pub mod zodiac;
pub mod net;
pub mod engine;
pub mod render;
pub mod share;

// Playback: log-only by default, synthesized tones with `sound`
pub mod audio;

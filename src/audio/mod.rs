//! Audio playback.
//!
//! [`AudioEngine`] fronts a kira output device. Notes play from a sample
//! library when one loads ([`SampleBank`]) and from rendered sine tones
//! otherwise ([`synth`]).

pub mod engine;
pub mod sampler;
pub mod synth;

pub use engine::AudioEngine;
pub use sampler::SampleBank;

/// Gain floor. Anything at this level is effectively muted.
pub const SILENCE_DB: f32 = -60.0;

/// Compute the pitch multiplier for a semitone shift.
pub fn pitch_from_shift(semitones: i32) -> f64 {
    if semitones == 0 {
        1.0
    } else {
        2.0f64.powf(semitones as f64 / 12.0)
    }
}

/// Map a MIDI velocity to a gain in decibels.
///
/// Full velocity plays at unity gain; lower velocities fall off
/// logarithmically down to the [`SILENCE_DB`] floor.
pub fn velocity_to_db(velocity: u8) -> f32 {
    if velocity == 0 {
        return SILENCE_DB;
    }
    let ratio = velocity.min(127) as f32 / 127.0;
    (20.0 * ratio.log10()).max(SILENCE_DB)
}

/// Map the 0-100 master volume to a gain in decibels, 100 being unity.
pub fn volume_to_db(volume: u8) -> f32 {
    volume.min(100) as f32 / 100.0 * 60.0 + SILENCE_DB
}

//! Rendered sine tones, used when no sample library is available.
//!
//! Each note is rendered offline as a short one-shot with a fixed
//! attack/decay/sustain/release envelope, encoded as WAV bytes in memory
//! and decoded back into a playable sound.

use std::io::Cursor;

use anyhow::{Context, Result};
use kira::sound::static_sound::StaticSoundData;

const SAMPLE_RATE: u32 = 44_100;

/// Envelope timing in seconds, with sustain as a gain level.
const ATTACK: f32 = 0.01;
const DECAY: f32 = 0.3;
const SUSTAIN: f32 = 0.7;
const SUSTAIN_HOLD: f32 = 0.25;
const RELEASE: f32 = 1.5;

/// Equal-tempered frequency for a MIDI note, A4 = 440 Hz.
pub fn midi_to_freq(midi: u8) -> f64 {
    440.0 * 2.0f64.powf((midi as f64 - 69.0) / 12.0)
}

/// Envelope gain at `t` seconds after the strike.
fn envelope_at(t: f32) -> f32 {
    let decay_end = ATTACK + DECAY;
    let hold_end = decay_end + SUSTAIN_HOLD;
    let total = hold_end + RELEASE;

    if t < ATTACK {
        t / ATTACK
    } else if t < decay_end {
        1.0 - (1.0 - SUSTAIN) * (t - ATTACK) / DECAY
    } else if t < hold_end {
        SUSTAIN
    } else if t < total {
        SUSTAIN * (1.0 - (t - hold_end) / RELEASE)
    } else {
        0.0
    }
}

/// Render the mono PCM of one enveloped sine tone.
pub fn render_note(midi: u8) -> Vec<f32> {
    let step = midi_to_freq(midi) / SAMPLE_RATE as f64;
    let total = ATTACK + DECAY + SUSTAIN_HOLD + RELEASE;
    let frames = (SAMPLE_RATE as f32 * total) as usize;

    let mut samples = Vec::with_capacity(frames);
    let mut phase = 0.0f64;
    for frame in 0..frames {
        let t = frame as f32 / SAMPLE_RATE as f32;
        samples.push((phase * std::f64::consts::TAU).sin() as f32 * envelope_at(t));
        phase = (phase + step).fract();
    }
    samples
}

/// Convert mono f32 samples to WAV bytes in memory.
fn pcm_to_wav_bytes(samples: &[f32]) -> Vec<u8> {
    let mut cursor = Cursor::new(Vec::new());
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::new(&mut cursor, spec).expect("WAV writer creation");
    for &sample in samples {
        writer.write_sample(sample).expect("WAV sample write");
    }
    writer.finalize().expect("WAV finalize");
    cursor.into_inner()
}

/// Render a tone for `midi` and decode it as a playable sound.
pub fn one_shot(midi: u8) -> Result<StaticSoundData> {
    let wav_bytes = pcm_to_wav_bytes(&render_note(midi));
    StaticSoundData::from_cursor(Cursor::new(wav_bytes))
        .with_context(|| format!("Failed to decode rendered tone for note {midi}"))
}

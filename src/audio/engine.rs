use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result};
use kira::AudioManager as KiraAudioManager;
use kira::AudioManagerSettings;
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{Decibels, PlaybackRate, Tween};
use tracing::{info, warn};

use crate::traits::audio::AudioBackend;

use super::{SampleBank, pitch_from_shift, synth, velocity_to_db, volume_to_db};

/// Fade applied when a held note is released.
const RELEASE_FADE: Duration = Duration::from_secs(1);

/// Where struck notes take their sound from.
///
/// Starts in `Loading` while the sample library decodes on a worker thread,
/// then settles once into `Sampler` or `Fallback` and stays there for the
/// rest of the session.
enum VoiceSource {
    Loading,
    Sampler(SampleBank),
    Fallback,
}

impl VoiceSource {
    /// Apply the loader outcome. Only the first result counts.
    fn settle(&mut self, result: Result<SampleBank>) {
        if !matches!(self, VoiceSource::Loading) {
            return;
        }
        match result {
            Ok(bank) => {
                info!("Sample library ready ({} samples)", bank.len());
                *self = VoiceSource::Sampler(bank);
            }
            Err(e) => {
                warn!("Sample library unavailable, using synth voice: {e:#}");
                *self = VoiceSource::Fallback;
            }
        }
    }

    /// Playback rate and sound for `midi`, when a library is active.
    fn nearest_sample(&self, midi: u8) -> Option<(f64, StaticSoundData)> {
        match self {
            VoiceSource::Sampler(bank) => bank
                .nearest(midi)
                .map(|(shift, sound)| (pitch_from_shift(shift), sound.clone())),
            _ => None,
        }
    }
}

/// Kira-backed audio engine.
///
/// Owns the output device, the voice source state and one live handle per
/// sounding note. The sample library decodes on a worker thread; until its
/// result arrives every strike is served by the synth fallback, so note-on
/// never blocks.
pub struct AudioEngine {
    manager: KiraAudioManager,
    source: VoiceSource,
    /// Receiver for the one-shot loader result.
    loader: Option<mpsc::Receiver<Result<SampleBank>>>,
    /// Live handles keyed by MIDI note.
    active: HashMap<u8, StaticSoundHandle>,
    /// Rendered fallback tones, cached per note.
    tone_cache: HashMap<u8, StaticSoundData>,
}

impl AudioEngine {
    /// Open the default output device and start loading the sample library,
    /// if one was configured.
    pub fn new(sample_dir: Option<PathBuf>, volume: u8) -> Result<Self> {
        let manager = KiraAudioManager::new(AudioManagerSettings::default())
            .context("Failed to create audio manager")?;

        let (source, loader) = match sample_dir {
            Some(dir) => (VoiceSource::Loading, Some(spawn_loader(dir))),
            None => {
                info!("No sample directory configured, using synth voice");
                (VoiceSource::Fallback, None)
            }
        };

        let mut engine = Self {
            manager,
            source,
            loader,
            active: HashMap::new(),
            tone_cache: HashMap::new(),
        };
        engine.set_volume(volume);
        Ok(engine)
    }

    /// Drain the loader result, settling the voice source exactly once.
    pub fn update(&mut self) {
        let Some(rx) = self.loader.take() else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => self.source.settle(result),
            Err(mpsc::TryRecvError::Empty) => self.loader = Some(rx),
            Err(mpsc::TryRecvError::Disconnected) => {
                self.source
                    .settle(Err(anyhow::anyhow!("sample loader thread exited")));
            }
        }
    }

    /// Set the master output gain from a 0-100 volume.
    pub fn set_volume(&mut self, volume: u8) {
        self.manager
            .main_track()
            .set_volume(Decibels(volume_to_db(volume)), Tween::default());
    }

    /// Short description of the active voice source, for the status row.
    pub fn source_label(&self) -> &'static str {
        match self.source {
            VoiceSource::Loading => "loading samples",
            VoiceSource::Sampler(_) => "sampler",
            VoiceSource::Fallback => "synth",
        }
    }

    /// Strike a note with the rendered synth tone. Tones are one-shots with
    /// their own release, so no handle is tracked.
    fn play_fallback(&mut self, midi: u8, velocity: u8) {
        let sound = match self.tone_cache.get(&midi) {
            Some(sound) => sound.clone(),
            None => match synth::one_shot(midi) {
                Ok(sound) => {
                    self.tone_cache.insert(midi, sound.clone());
                    sound
                }
                Err(e) => {
                    warn!("Failed to render tone for note {midi}: {e:#}");
                    return;
                }
            },
        };
        let data = sound.volume(Decibels(velocity_to_db(velocity)));
        if let Err(e) = self.manager.play(data) {
            warn!("Failed to play note {midi}: {e}");
        }
    }
}

impl AudioBackend for AudioEngine {
    fn strike(&mut self, midi: u8, velocity: u8) {
        // A re-strike replaces any sounding instance of the note
        if let Some(mut handle) = self.active.remove(&midi) {
            handle.stop(Tween::default());
        }

        match self.source.nearest_sample(midi) {
            Some((rate, sound)) => {
                let data = sound
                    .volume(Decibels(velocity_to_db(velocity)))
                    .playback_rate(PlaybackRate(rate));
                match self.manager.play(data) {
                    Ok(handle) => {
                        self.active.insert(midi, handle);
                    }
                    Err(e) => {
                        warn!("Failed to play sample for note {midi}: {e}");
                        self.play_fallback(midi, velocity);
                    }
                }
            }
            None => self.play_fallback(midi, velocity),
        }
    }

    fn release(&mut self, midi: u8) {
        if let Some(mut handle) = self.active.remove(&midi) {
            handle.stop(Tween {
                duration: RELEASE_FADE,
                ..Default::default()
            });
        }
    }
}

impl Drop for AudioEngine {
    fn drop(&mut self) {
        for (_, mut handle) in self.active.drain() {
            handle.stop(Tween::default());
        }
    }
}

/// Decode the sample library off-thread, reporting back over a channel.
fn spawn_loader(dir: PathBuf) -> mpsc::Receiver<Result<SampleBank>> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        let _ = tx.send(SampleBank::load(&dir));
    });
    rx
}

//! Sample library loading.
//!
//! A library is a directory holding a `manifest.json` that maps note names
//! ("C4", "F#3") to audio files in the same directory. Playback picks the
//! sample nearest the requested note and repitches it by the semitone
//! distance, so sparse libraries still cover the whole keyboard.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use kira::sound::static_sound::StaticSoundData;
use tracing::{info, warn};

/// Manifest filename expected inside a sample directory.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Parse a note name like "C4" or "F#3" into a MIDI note number.
///
/// Letters are case-insensitive, sharps only, octaves -1 through 9
/// (C-1 = 0, G9 = 127).
pub fn note_name_to_midi(name: &str) -> Option<u8> {
    let mut chars = name.chars();
    let mut chroma = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let rest = chars.as_str();
    let octave_str = match rest.strip_prefix('#') {
        Some(stripped) => {
            chroma += 1;
            stripped
        }
        None => rest,
    };
    // parse() accepts a leading '+', which the note grammar does not
    if octave_str.starts_with('+') {
        return None;
    }
    let octave: i32 = octave_str.parse().ok()?;
    u8::try_from(12 * (octave + 1) + chroma)
        .ok()
        .filter(|&midi| midi <= 127)
}

/// An in-memory sample library keyed by MIDI note.
pub struct SampleBank {
    /// (midi, sound) pairs sorted by note number.
    samples: Vec<(u8, StaticSoundData)>,
}

impl SampleBank {
    /// Load every sample listed in the directory's manifest.
    ///
    /// Entries with unparseable note names or undecodable files are
    /// skipped. A manifest that yields no playable samples is an error.
    pub fn load<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let manifest_path = dir.join(MANIFEST_FILE);
        let manifest_text = fs::read_to_string(&manifest_path)
            .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
        let entries: HashMap<String, String> = serde_json::from_str(&manifest_text)
            .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

        let total = entries.len();
        let mut samples = Vec::new();
        for (name, filename) in entries {
            let Some(midi) = note_name_to_midi(&name) else {
                warn!("Skipping sample with unknown note name: {name}");
                continue;
            };
            let path = dir.join(&filename);
            match StaticSoundData::from_file(&path) {
                Ok(sound) => samples.push((midi, sound)),
                Err(e) => warn!("Failed to load sample {}: {e}", path.display()),
            }
        }
        if samples.is_empty() {
            bail!("No playable samples in {}", dir.display());
        }
        samples.sort_by_key(|(midi, _)| *midi);

        info!(
            "Loaded {} of {} samples from {}",
            samples.len(),
            total,
            dir.display()
        );
        Ok(Self { samples })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Find the sample closest to `midi` and the semitone shift needed to
    /// play it at the requested pitch. Ties go to the lower sample.
    pub fn nearest(&self, midi: u8) -> Option<(i32, &StaticSoundData)> {
        self.samples
            .iter()
            .map(|(sample_midi, sound)| (midi as i32 - *sample_midi as i32, sound))
            .min_by_key(|(shift, _)| shift.abs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Write a tiny mono WAV so `StaticSoundData::from_file` has real input.
    fn write_test_wav(path: &Path) {
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44_100,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let mut writer = hound::WavWriter::create(path, spec).unwrap();
        for i in 0..441 {
            writer.write_sample((i as f32 / 441.0).sin()).unwrap();
        }
        writer.finalize().unwrap();
    }

    fn bank_with(notes: &[&str]) -> (tempfile::TempDir, SampleBank) {
        let dir = tempfile::tempdir().unwrap();
        let mut manifest = serde_json::Map::new();
        for note in notes {
            let filename = format!("{}.wav", note.replace('#', "s"));
            write_test_wav(&dir.path().join(&filename));
            manifest.insert(note.to_string(), serde_json::Value::String(filename));
        }
        fs::write(
            dir.path().join(MANIFEST_FILE),
            serde_json::Value::Object(manifest).to_string(),
        )
        .unwrap();
        let bank = SampleBank::load(dir.path()).unwrap();
        (dir, bank)
    }

    #[test]
    fn test_note_name_parsing() {
        assert_eq!(note_name_to_midi("C4"), Some(60));
        assert_eq!(note_name_to_midi("c4"), Some(60));
        assert_eq!(note_name_to_midi("F#3"), Some(54));
        assert_eq!(note_name_to_midi("A0"), Some(21));
        assert_eq!(note_name_to_midi("C-1"), Some(0));
        assert_eq!(note_name_to_midi("G9"), Some(127));
    }

    #[test]
    fn test_note_name_rejects_invalid() {
        assert_eq!(note_name_to_midi(""), None);
        assert_eq!(note_name_to_midi("H2"), None);
        assert_eq!(note_name_to_midi("C"), None);
        assert_eq!(note_name_to_midi("C#"), None);
        assert_eq!(note_name_to_midi("4"), None);
        assert_eq!(note_name_to_midi("C+4"), None);
        assert_eq!(note_name_to_midi("F#+2"), None);
        // One past the top of the MIDI range
        assert_eq!(note_name_to_midi("G#9"), None);
    }

    #[test]
    fn test_load_counts_entries() {
        let (_dir, bank) = bank_with(&["C4", "F#4", "A4"]);
        assert_eq!(bank.len(), 3);
        assert!(!bank.is_empty());
    }

    #[test]
    fn test_nearest_exact_match() {
        let (_dir, bank) = bank_with(&["C4", "A4"]);
        let (shift, _) = bank.nearest(60).unwrap();
        assert_eq!(shift, 0);
    }

    #[test]
    fn test_nearest_prefers_smallest_shift() {
        // C4 = 60, A4 = 69
        let (_dir, bank) = bank_with(&["C4", "A4"]);
        let (shift, _) = bank.nearest(63).unwrap();
        assert_eq!(shift, 3);
        let (shift, _) = bank.nearest(67).unwrap();
        assert_eq!(shift, -2);
    }

    #[test]
    fn test_nearest_tie_takes_lower_sample() {
        // C4 = 60, E4 = 64; D4 = 62 is equidistant
        let (_dir, bank) = bank_with(&["C4", "E4"]);
        let (shift, _) = bank.nearest(62).unwrap();
        assert_eq!(shift, 2);
    }

    #[test]
    fn test_missing_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SampleBank::load(dir.path()).is_err());
    }

    #[test]
    fn test_empty_manifest_is_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(MANIFEST_FILE), "{}").unwrap();
        assert!(SampleBank::load(dir.path()).is_err());
    }

    #[test]
    fn test_bad_entries_skipped() {
        let dir = tempfile::tempdir().unwrap();
        write_test_wav(&dir.path().join("c4.wav"));
        let manifest = r#"{"C4": "c4.wav", "X9": "c4.wav", "D4": "missing.wav"}"#;
        fs::write(dir.path().join(MANIFEST_FILE), manifest).unwrap();
        let bank = SampleBank::load(dir.path()).unwrap();
        assert_eq!(bank.len(), 1);
    }
}

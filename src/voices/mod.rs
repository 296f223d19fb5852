//! Voice management.
//!
//! Tracks which notes are sounding, forwards strikes and releases to the
//! audio backend, and keeps the current-scale readout in sync with the most
//! recent note-on.

use std::collections::BTreeSet;

use crate::input::NoteEvent;
use crate::scale::{Scale, ScaleKind};
use crate::traits::audio::AudioBackend;

/// Pressed-note bookkeeping in front of an audio backend.
///
/// A `note_on` always re-strikes the backend, even for an already-sounding
/// note, so repeated presses restart the attack. A `note_off` for a note
/// that is not sounding does nothing at all.
pub struct VoiceManager<B> {
    backend: B,
    pressed: BTreeSet<u8>,
    scale_kind: ScaleKind,
    current_scale: Option<Scale>,
}

impl<B: AudioBackend> VoiceManager<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            pressed: BTreeSet::new(),
            scale_kind: ScaleKind::default(),
            current_scale: None,
        }
    }

    /// Strike a note. The current scale follows every note-on, whatever the
    /// audio outcome.
    pub fn note_on(&mut self, midi: u8, velocity: u8) {
        self.current_scale = Some(Scale::from_midi(midi, self.scale_kind));
        self.backend.strike(midi, velocity);
        self.pressed.insert(midi);
    }

    /// Release a note. Notes that are not sounding are ignored without
    /// touching the backend.
    pub fn note_off(&mut self, midi: u8) {
        if self.pressed.remove(&midi) {
            self.backend.release(midi);
        }
    }

    /// Apply a batch of events in order.
    pub fn process<I: IntoIterator<Item = NoteEvent>>(&mut self, events: I) {
        for event in events {
            match event {
                NoteEvent::On { midi, velocity } => self.note_on(midi, velocity),
                NoteEvent::Off { midi } => self.note_off(midi),
            }
        }
    }

    pub fn is_pressed(&self, midi: u8) -> bool {
        self.pressed.contains(&midi)
    }

    pub fn pressed_count(&self) -> usize {
        self.pressed.len()
    }

    /// Scale rooted at the most recently struck note. Persists after the
    /// note is released.
    pub fn current_scale(&self) -> Option<Scale> {
        self.current_scale
    }

    pub fn scale_kind(&self) -> ScaleKind {
        self.scale_kind
    }

    /// Change the scale kind used from the next note-on. The readout keeps
    /// the kind captured by the last strike until then.
    pub fn set_scale_kind(&mut self, kind: ScaleKind) {
        self.scale_kind = kind;
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::audio::RecordingBackend;

    fn manager() -> VoiceManager<RecordingBackend> {
        VoiceManager::new(RecordingBackend::new())
    }

    #[test]
    fn test_note_on_strikes_and_presses() {
        let mut voices = manager();
        voices.note_on(60, 100);

        assert!(voices.is_pressed(60));
        assert_eq!(voices.pressed_count(), 1);
        assert_eq!(voices.backend().strikes, vec![(60, 100)]);
    }

    #[test]
    fn test_restrike_collapses_to_one_pressed_entry() {
        let mut voices = manager();
        voices.note_on(60, 100);
        voices.note_on(60, 80);

        assert_eq!(voices.pressed_count(), 1);
        // The backend still hears both strikes
        assert_eq!(voices.backend().strikes, vec![(60, 100), (60, 80)]);
    }

    #[test]
    fn test_note_off_releases_backend() {
        let mut voices = manager();
        voices.note_on(60, 100);
        voices.note_off(60);

        assert!(!voices.is_pressed(60));
        assert_eq!(voices.backend().releases, vec![60]);
    }

    #[test]
    fn test_note_off_non_held_is_pure_noop() {
        let mut voices = manager();
        voices.note_on(60, 100);
        voices.note_off(61);

        assert!(voices.is_pressed(60));
        assert!(voices.backend().releases.is_empty());
    }

    #[test]
    fn test_scale_follows_every_note_on() {
        let mut voices = manager();
        assert!(voices.current_scale().is_none());

        voices.note_on(60, 100);
        let scale = voices.current_scale().unwrap();
        assert_eq!(scale.name(), "C Major");

        voices.note_on(69, 100);
        let scale = voices.current_scale().unwrap();
        assert_eq!(scale.name(), "A Major");
    }

    #[test]
    fn test_scale_persists_after_note_off() {
        let mut voices = manager();
        voices.note_on(62, 100);
        voices.note_off(62);

        let scale = voices.current_scale().unwrap();
        assert!(scale.is_root(62));
    }

    #[test]
    fn test_scale_kind_applies_from_next_note_on() {
        let mut voices = manager();
        voices.note_on(60, 100);
        voices.set_scale_kind(ScaleKind::NaturalMinor);

        // The readout keeps the captured kind until another strike
        assert_eq!(voices.current_scale().unwrap().name(), "C Major");

        voices.note_on(60, 100);
        assert_eq!(voices.current_scale().unwrap().name(), "C Natural Minor");
    }

    #[test]
    fn test_process_applies_events_in_order() {
        let mut voices = manager();
        voices.process([
            NoteEvent::On {
                midi: 60,
                velocity: 100,
            },
            NoteEvent::On {
                midi: 64,
                velocity: 80,
            },
            NoteEvent::Off { midi: 60 },
        ]);

        assert!(!voices.is_pressed(60));
        assert!(voices.is_pressed(64));
        assert_eq!(voices.backend().strikes, vec![(60, 100), (64, 80)]);
        assert_eq!(voices.backend().releases, vec![60]);
    }

    #[test]
    fn test_chord_holds_multiple_notes() {
        let mut voices = manager();
        voices.note_on(60, 100);
        voices.note_on(64, 100);
        voices.note_on(67, 100);

        assert_eq!(voices.pressed_count(), 3);
        voices.note_off(64);
        assert_eq!(voices.pressed_count(), 2);
        assert!(voices.is_pressed(60));
        assert!(voices.is_pressed(67));
    }
}

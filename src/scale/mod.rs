//! Scale definitions and membership tests.
//!
//! A [`Scale`] is a root pitch class plus a [`ScaleKind`]; membership and
//! root checks are pure predicates over MIDI note numbers.

use serde::{Deserialize, Serialize};

/// Pitch-class names, sharps only.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const MAJOR: [u8; 7] = [0, 2, 4, 5, 7, 9, 11];
const NATURAL_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 10];
const HARMONIC_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 8, 11];
const MELODIC_MINOR: [u8; 7] = [0, 2, 3, 5, 7, 9, 11];

/// Interval pattern selecting which pitch classes belong to a scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScaleKind {
    #[default]
    Major,
    NaturalMinor,
    HarmonicMinor,
    MelodicMinor,
}

impl ScaleKind {
    pub const ALL: [ScaleKind; 4] = [
        ScaleKind::Major,
        ScaleKind::NaturalMinor,
        ScaleKind::HarmonicMinor,
        ScaleKind::MelodicMinor,
    ];

    /// Semitone offsets from the root, ascending, starting at 0.
    pub fn intervals(self) -> &'static [u8; 7] {
        match self {
            ScaleKind::Major => &MAJOR,
            ScaleKind::NaturalMinor => &NATURAL_MINOR,
            ScaleKind::HarmonicMinor => &HARMONIC_MINOR,
            ScaleKind::MelodicMinor => &MELODIC_MINOR,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScaleKind::Major => "Major",
            ScaleKind::NaturalMinor => "Natural Minor",
            ScaleKind::HarmonicMinor => "Harmonic Minor",
            ScaleKind::MelodicMinor => "Melodic Minor",
        }
    }
}

impl std::fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A scale anchored at a root pitch class (0-11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scale {
    pub root: u8,
    pub kind: ScaleKind,
}

impl Scale {
    pub fn new(root: u8, kind: ScaleKind) -> Self {
        Self { root: root % 12, kind }
    }

    /// Scale rooted at the pitch class of a MIDI note.
    pub fn from_midi(midi: u8, kind: ScaleKind) -> Self {
        Self::new(midi % 12, kind)
    }

    /// The seven pitch classes of the scale, in degree order.
    pub fn notes(&self) -> [u8; 7] {
        self.kind.intervals().map(|interval| (self.root + interval) % 12)
    }

    /// Whether the note's pitch class belongs to the scale.
    pub fn contains(&self, midi: u8) -> bool {
        self.notes().contains(&(midi % 12))
    }

    /// Whether the note's pitch class is the scale root.
    pub fn is_root(&self, midi: u8) -> bool {
        midi % 12 == self.root
    }

    pub fn root_name(&self) -> &'static str {
        NOTE_NAMES[self.root as usize]
    }

    /// Note names of the scale degrees, e.g. C D E F G A B.
    pub fn note_names(&self) -> [&'static str; 7] {
        self.notes().map(|pc| NOTE_NAMES[pc as usize])
    }

    /// Display name such as "C Major" or "A Natural Minor".
    pub fn name(&self) -> String {
        format!("{} {}", self.root_name(), self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_major_scale_notes() {
        let scale = Scale::new(0, ScaleKind::Major);
        assert_eq!(scale.notes(), [0, 2, 4, 5, 7, 9, 11]);
    }

    #[test]
    fn test_natural_minor_wraps_pitch_classes() {
        let scale = Scale::new(9, ScaleKind::NaturalMinor);
        assert_eq!(scale.notes(), [9, 11, 0, 2, 4, 5, 7]);
    }

    #[test]
    fn test_harmonic_minor_raises_seventh() {
        let scale = Scale::new(0, ScaleKind::HarmonicMinor);
        assert_eq!(scale.notes(), [0, 2, 3, 5, 7, 8, 11]);
    }

    #[test]
    fn test_melodic_minor_raises_sixth_and_seventh() {
        let scale = Scale::new(0, ScaleKind::MelodicMinor);
        assert_eq!(scale.notes(), [0, 2, 3, 5, 7, 9, 11]);
    }

    #[test]
    fn test_contains_ignores_octave() {
        let scale = Scale::new(0, ScaleKind::Major);
        assert!(scale.contains(60));
        assert!(scale.contains(72));
        assert!(scale.contains(64));
        assert!(!scale.contains(61));
        assert!(!scale.contains(73));
    }

    #[test]
    fn test_is_root() {
        let scale = Scale::new(0, ScaleKind::Major);
        assert!(scale.is_root(60));
        assert!(scale.is_root(48));
        assert!(!scale.is_root(61));
    }

    #[test]
    fn test_root_normalized_modulo_12() {
        let scale = Scale::new(14, ScaleKind::Major);
        assert_eq!(scale.root, 2);
        assert_eq!(scale.root_name(), "D");
    }

    #[test]
    fn test_from_midi_uses_pitch_class() {
        let scale = Scale::from_midi(69, ScaleKind::NaturalMinor);
        assert_eq!(scale.root, 9);
        assert_eq!(scale.name(), "A Natural Minor");
    }

    #[test]
    fn test_note_names() {
        let scale = Scale::new(0, ScaleKind::Major);
        assert_eq!(scale.note_names(), ["C", "D", "E", "F", "G", "A", "B"]);
    }

    #[test]
    fn test_every_kind_has_seven_ascending_intervals() {
        for kind in ScaleKind::ALL {
            let intervals = kind.intervals();
            assert_eq!(intervals[0], 0);
            for pair in intervals.windows(2) {
                assert!(pair[0] < pair[1], "{kind}: intervals must ascend");
            }
            assert!(*intervals.last().unwrap() <= 11);
        }
    }

    #[test]
    fn test_scale_kind_serde_names() {
        let json = serde_json::to_string(&ScaleKind::HarmonicMinor).unwrap();
        assert_eq!(json, "\"harmonic-minor\"");
        let parsed: ScaleKind = serde_json::from_str("\"natural-minor\"").unwrap();
        assert_eq!(parsed, ScaleKind::NaturalMinor);
    }
}

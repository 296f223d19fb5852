/// One key on the rendered keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Key {
    /// Pitch-class name, sharps only.
    pub note: &'static str,
    pub octave: i32,
    pub midi: u8,
    pub shape: KeyShape,
}

/// Spatial variant of a key. White keys occupy a slot in the left-to-right
/// run of white keys; black keys name the two adjacent white slots they sit
/// between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyShape {
    White { position: u32 },
    Black { between: (u32, u32) },
}

impl Key {
    pub fn is_black(&self) -> bool {
        matches!(self.shape, KeyShape::Black { .. })
    }

    /// Label such as "C4" or "F#3".
    pub fn label(&self) -> String {
        format!("{}{}", self.note, self.octave)
    }
}

/// Single-octave template. White keys fill slots 0-6; each black key names
/// the white slots immediately left and right of it.
const OCTAVE_TEMPLATE: [(&str, u8, KeyShape); 12] = [
    ("C", 0, KeyShape::White { position: 0 }),
    ("C#", 1, KeyShape::Black { between: (0, 1) }),
    ("D", 2, KeyShape::White { position: 1 }),
    ("D#", 3, KeyShape::Black { between: (1, 2) }),
    ("E", 4, KeyShape::White { position: 2 }),
    ("F", 5, KeyShape::White { position: 3 }),
    ("F#", 6, KeyShape::Black { between: (3, 4) }),
    ("G", 7, KeyShape::White { position: 4 }),
    ("G#", 8, KeyShape::Black { between: (4, 5) }),
    ("A", 9, KeyShape::White { position: 5 }),
    ("A#", 10, KeyShape::Black { between: (5, 6) }),
    ("B", 11, KeyShape::White { position: 6 }),
];

/// MIDI note of the C that opens an octave (C2 = 36, C4 = 60).
fn octave_base_midi(octave: i32) -> i32 {
    12 * (octave + 1)
}

/// Expand the octave template into the full key list: `octaves` copies of
/// the template followed by a terminal C that closes the rightmost octave.
///
/// `octave_offset` transposes every MIDI note by whole octaves; the spatial
/// fields (`position`, `between`) describe the on-screen layout and are not
/// affected by it.
pub fn generate_keys(octaves: u8, start_octave: i32, octave_offset: i32) -> Vec<Key> {
    let pitch_shift = 12 * octave_offset;
    let mut keys = Vec::with_capacity(12 * octaves as usize + 1);

    for i in 0..octaves as i32 {
        let octave = start_octave + i;
        let base = octave_base_midi(octave) + pitch_shift;
        let slot_shift = 7 * i as u32;

        for (note, chroma, shape) in OCTAVE_TEMPLATE {
            let shape = match shape {
                KeyShape::White { position } => KeyShape::White {
                    position: position + slot_shift,
                },
                KeyShape::Black { between: (left, right) } => KeyShape::Black {
                    between: (left + slot_shift, right + slot_shift),
                },
            };
            keys.push(Key {
                note,
                octave,
                midi: (base + chroma as i32).clamp(0, 127) as u8,
                shape,
            });
        }
    }

    let end_octave = start_octave + octaves as i32;
    keys.push(Key {
        note: "C",
        octave: end_octave,
        midi: (octave_base_midi(end_octave) + pitch_shift).clamp(0, 127) as u8,
        shape: KeyShape::White {
            position: 7 * octaves as u32,
        },
    });

    keys
}

/// User-controlled transposition of the whole keyboard, in octaves.
/// Stepping past the bounds is ignored rather than an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OctaveOffset(i32);

impl OctaveOffset {
    pub const MIN: i32 = -2;
    pub const MAX: i32 = 2;

    pub fn get(self) -> i32 {
        self.0
    }

    /// Step by `delta` octaves, clamped to the allowed range.
    pub fn step(&mut self, delta: i32) {
        self.0 = (self.0 + delta).clamp(Self::MIN, Self::MAX);
    }
}

//! Input unification.
//!
//! Pointer presses on the rendered keyboard and hardware MIDI messages
//! both reduce to [`NoteEvent`]s before they reach the voice manager.
//! Hardware note-on velocities pass through a configurable damping factor;
//! on-screen presses always carry [`VIRTUAL_VELOCITY`].

mod midi;

pub use midi::MidiConnections;

/// Velocity assigned to on-screen key presses.
pub const VIRTUAL_VELOCITY: u8 = 100;

/// Canonical note event, independent of input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteEvent {
    On { midi: u8, velocity: u8 },
    Off { midi: u8 },
}

impl NoteEvent {
    /// Event for an on-screen key press.
    pub fn virtual_press(midi: u8) -> Self {
        NoteEvent::On {
            midi,
            velocity: VIRTUAL_VELOCITY,
        }
    }

    /// Event for an on-screen key release.
    pub fn virtual_release(midi: u8) -> Self {
        NoteEvent::Off { midi }
    }
}

/// Scale a hardware velocity, rounding to nearest and clamping to the MIDI
/// range. Factor 1.0 passes velocities through unchanged.
pub fn scale_velocity(raw: u8, factor: f32) -> u8 {
    (raw as f32 * factor).round().clamp(0.0, 127.0) as u8
}

/// Owns the hardware transport and applies velocity damping to its events.
pub struct InputProcessor {
    midi: MidiConnections,
    velocity_scale: f32,
}

impl InputProcessor {
    /// Connect to available MIDI hardware. Enumeration failure degrades to
    /// pointer-only input rather than an error.
    pub fn new(velocity_scale: f32) -> Self {
        let midi = match MidiConnections::open() {
            Ok(midi) => midi,
            Err(e) => {
                tracing::warn!("MIDI unavailable, pointer input only: {e:#}");
                MidiConnections::disconnected()
            }
        };
        Self {
            midi,
            velocity_scale,
        }
    }

    /// Drain pending hardware events, velocity-scaled.
    pub fn poll(&mut self) -> Vec<NoteEvent> {
        let scale = self.velocity_scale;
        self.midi
            .poll()
            .into_iter()
            .map(|event| match event {
                NoteEvent::On { midi, velocity } => NoteEvent::On {
                    midi,
                    velocity: scale_velocity(velocity, scale),
                },
                off @ NoteEvent::Off { .. } => off,
            })
            .collect()
    }

    /// Names of the connected MIDI input ports.
    pub fn device_names(&self) -> &[String] {
        self.midi.port_names()
    }

    #[cfg(test)]
    fn with_connections(midi: MidiConnections, velocity_scale: f32) -> Self {
        Self {
            midi,
            velocity_scale,
        }
    }
}

/// Interface the voice manager drives to produce sound.
///
/// Implementations absorb their own playback failures so note handling
/// never feeds errors back into input processing.
pub trait AudioBackend {
    /// Start sounding a note, restarting its attack if already sounding.
    fn strike(&mut self, midi: u8, velocity: u8);

    /// Stop sounding a note previously struck.
    fn release(&mut self, midi: u8);
}

/// Backend that records calls instead of producing sound.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    pub strikes: Vec<(u8, u8)>,
    pub releases: Vec<u8>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioBackend for RecordingBackend {
    fn strike(&mut self, midi: u8, velocity: u8) {
        self.strikes.push((midi, velocity));
    }

    fn release(&mut self, midi: u8) {
        self.releases.push(midi);
    }
}

use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::NoteEvent;

/// How often the available port set is compared against the connected one.
const RESCAN_INTERVAL: Duration = Duration::from_millis(500);

/// Raw MIDI message received from a device callback.
struct MidiMessage {
    status: u8,
    data1: u8,
    data2: u8,
}

/// Hardware MIDI transport.
///
/// All available input ports are opened at once and driver callbacks forward
/// raw messages over a channel drained on the UI thread. The port set is
/// re-scanned every [`RESCAN_INTERVAL`] and the connections are rebuilt from
/// scratch when it changes, which covers hot-plugged devices.
pub struct MidiConnections {
    /// Active connections (kept alive to receive events).
    connections: Vec<midir::MidiInputConnection<()>>,
    /// Names of the connected ports, for display.
    port_names: Vec<String>,
    /// Channel receiver for raw messages from callbacks.
    event_rx: mpsc::Receiver<MidiMessage>,
    /// Channel sender cloned into callbacks.
    event_tx: mpsc::Sender<MidiMessage>,
    /// Time of the last port scan. `None` disables hot-plug scanning.
    last_rescan: Option<Instant>,
}

impl MidiConnections {
    /// Open all available MIDI input ports and begin receiving events.
    pub fn open() -> Result<Self> {
        let (event_tx, event_rx) = mpsc::channel();
        let mut midi = Self {
            connections: Vec::new(),
            port_names: Vec::new(),
            event_rx,
            event_tx,
            last_rescan: Some(Instant::now()),
        };
        midi.rebuild()?;
        Ok(midi)
    }

    /// Create a transport with no hardware attached. Pointer input still
    /// works; no hot-plug scanning is performed.
    pub fn disconnected() -> Self {
        let (event_tx, event_rx) = mpsc::channel();
        Self {
            connections: Vec::new(),
            port_names: Vec::new(),
            event_rx,
            event_tx,
            last_rescan: None,
        }
    }

    /// Names of the connected input ports.
    pub fn port_names(&self) -> &[String] {
        &self.port_names
    }

    /// Poll for pending MIDI messages and convert them to note events.
    pub fn poll(&mut self) -> Vec<NoteEvent> {
        self.maybe_rescan();

        let mut events = Vec::new();
        while let Ok(message) = self.event_rx.try_recv() {
            if let Some(event) = parse_message(&message) {
                events.push(event);
            }
        }
        events
    }

    /// Drop every connection and re-subscribe to all available ports.
    fn rebuild(&mut self) -> Result<()> {
        self.connections.clear();
        self.port_names.clear();

        let midi_in =
            midir::MidiInput::new("tonica").context("Failed to create MIDI client")?;
        for port in &midi_in.ports() {
            // A fresh MidiInput instance is needed per connection
            let midi_in_for_port = match midir::MidiInput::new("tonica") {
                Ok(input) => input,
                Err(e) => {
                    warn!("Failed to create MIDI client: {e}");
                    continue;
                }
            };
            let port_name = midi_in_for_port
                .port_name(port)
                .unwrap_or_else(|_| "unknown".to_string());
            let tx = self.event_tx.clone();

            match midi_in_for_port.connect(
                port,
                &port_name,
                move |_timestamp, message, _| {
                    if message.len() >= 2 {
                        let event = MidiMessage {
                            status: message[0],
                            data1: message[1],
                            data2: if message.len() >= 3 { message[2] } else { 0 },
                        };
                        let _ = tx.send(event);
                    }
                },
                (),
            ) {
                Ok(conn) => {
                    debug!("Connected MIDI input: {port_name}");
                    self.connections.push(conn);
                    self.port_names.push(port_name);
                }
                Err(e) => warn!("Failed to connect MIDI input {port_name}: {e}"),
            }
        }
        Ok(())
    }

    /// Rebuild the connections when the set of available ports has changed.
    fn maybe_rescan(&mut self) {
        let Some(last) = self.last_rescan else {
            return;
        };
        if last.elapsed() < RESCAN_INTERVAL {
            return;
        }
        self.last_rescan = Some(Instant::now());

        let available = match available_port_names() {
            Ok(names) => names,
            Err(e) => {
                warn!("MIDI port scan failed: {e:#}");
                return;
            }
        };
        let mut connected = self.port_names.clone();
        connected.sort();
        if available != connected {
            info!("MIDI port set changed, reconnecting ({} available)", available.len());
            if let Err(e) = self.rebuild() {
                warn!("MIDI reconnect failed: {e:#}");
            }
        }
    }

    #[cfg(test)]
    pub(super) fn inject(&self, status: u8, data1: u8, data2: u8) {
        let _ = self.event_tx.send(MidiMessage {
            status,
            data1,
            data2,
        });
    }
}

/// Sorted names of every input port currently visible to the driver.
fn available_port_names() -> Result<Vec<String>> {
    let midi_in = midir::MidiInput::new("tonica").context("Failed to create MIDI client")?;
    let mut names: Vec<String> = midi_in
        .ports()
        .iter()
        .map(|port| {
            midi_in
                .port_name(port)
                .unwrap_or_else(|_| "unknown".to_string())
        })
        .collect();
    names.sort();
    Ok(names)
}

/// Decode one raw message into a note event.
///
/// The channel bits of the status byte are ignored and a note-on with
/// velocity 0 counts as a note-off.
fn parse_message(message: &MidiMessage) -> Option<NoteEvent> {
    match message.status & 0xF0 {
        // NOTE_ON: 0x90..0x9F
        0x90 => {
            let midi = message.data1 & 0x7F;
            let velocity = message.data2 & 0x7F;
            if velocity > 0 {
                Some(NoteEvent::On { midi, velocity })
            } else {
                // Velocity 0 = note off
                Some(NoteEvent::Off { midi })
            }
        }
        // NOTE_OFF: 0x80..0x8F
        0x80 => Some(NoteEvent::Off {
            midi: message.data1 & 0x7F,
        }),
        _ => None,
    }
}

//! Application shell: control panels, status row and the keyboard.

mod keyboard_view;

use std::time::Duration;

use anyhow::Result;

use crate::audio::AudioEngine;
use crate::config::Settings;
use crate::input::InputProcessor;
use crate::keyboard::{OctaveOffset, ScreenSize, generate_keys};
use crate::scale::ScaleKind;
use crate::voices::VoiceManager;

pub struct PianoApp {
    voices: VoiceManager<AudioEngine>,
    input: InputProcessor,
    volume: u8,
    show_labels: bool,
    octave_offset: OctaveOffset,
    /// Key currently held by the pointer, if any.
    dragging_note: Option<u8>,
}

impl PianoApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, settings: Settings) -> Result<Self> {
        let engine = AudioEngine::new(settings.sample_dir, settings.volume)?;
        let mut voices = VoiceManager::new(engine);
        voices.set_scale_kind(settings.scale_kind);

        Ok(Self {
            voices,
            input: InputProcessor::new(settings.velocity_scale),
            volume: settings.volume,
            show_labels: settings.show_labels,
            octave_offset: OctaveOffset::default(),
            dragging_note: None,
        })
    }
}

impl eframe::App for PianoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.voices.backend_mut().update();

        let midi_events = self.input.poll();
        self.voices.process(midi_events);

        let config = ScreenSize::from_width(ctx.screen_rect().width()).config();

        // Top panel: playback controls
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Volume");
                if ui
                    .add(egui::Slider::new(&mut self.volume, 0..=100))
                    .changed()
                {
                    self.voices.backend_mut().set_volume(self.volume);
                }
                ui.separator();

                let mut kind = self.voices.scale_kind();
                egui::ComboBox::from_id_salt("scale_kind")
                    .selected_text(kind.label())
                    .show_ui(ui, |ui| {
                        for candidate in ScaleKind::ALL {
                            ui.selectable_value(&mut kind, candidate, candidate.label());
                        }
                    });
                if kind != self.voices.scale_kind() {
                    self.voices.set_scale_kind(kind);
                }

                ui.checkbox(&mut self.show_labels, "Labels");

                if config.show_octave_controls {
                    ui.separator();
                    ui.label("Octave");
                    if ui.button("-").clicked() {
                        self.octave_offset.step(-1);
                    }
                    ui.label(format!("{:+}", self.octave_offset.get()));
                    if ui.button("+").clicked() {
                        self.octave_offset.step(1);
                    }
                }
            });
        });

        // Bottom panel: scale readout and device status
        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                match self.voices.current_scale() {
                    Some(scale) => {
                        ui.label(format!("{}: {}", scale.name(), scale.note_names().join(" ")));
                    }
                    None => {
                        ui.label("Play a note to see its scale");
                    }
                }
                ui.separator();
                let devices = self.input.device_names();
                if devices.is_empty() {
                    ui.label("no MIDI devices");
                } else {
                    ui.label(devices.join(", "));
                }
                ui.separator();
                ui.label(self.voices.backend().source_label());
            });
        });

        // Central panel: the keyboard
        egui::CentralPanel::default().show(ctx, |ui| {
            let offset = config.effective_octave_offset(self.octave_offset.get());
            let keys = generate_keys(config.octaves, config.start_octave, offset);
            let pad = ((ui.available_width() - config.keyboard_width()) / 2.0).max(0.0);

            ui.add_space(12.0);
            let events = egui::ScrollArea::horizontal()
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.add_space(pad);
                        keyboard_view::draw_keyboard(
                            ui,
                            &config,
                            &keys,
                            self.voices.current_scale(),
                            self.show_labels,
                            |midi| self.voices.is_pressed(midi),
                            &mut self.dragging_note,
                        )
                    })
                    .inner
                })
                .inner;
            self.voices.process(events);
        });

        // Keep polling MIDI even when no UI events arrive
        ctx.request_repaint_after(Duration::from_millis(16));
    }
}

//! Keyboard widget: painted key rectangles plus pointer handling.

use egui::{Align2, Color32, CornerRadius, FontId, Pos2, Rect, Sense, Stroke, StrokeKind, Vec2};

use crate::input::NoteEvent;
use crate::keyboard::{Key, KeyShape, ScreenConfig};
use crate::scale::Scale;

// Key fills, pressed over root over in-scale over plain.
const WHITE_PRESSED: Color32 = Color32::from_rgb(147, 197, 253);
const WHITE_ROOT: Color32 = Color32::from_rgb(252, 211, 77);
const WHITE_IN_SCALE: Color32 = Color32::from_rgb(254, 240, 138);
const WHITE_PLAIN: Color32 = Color32::from_rgb(250, 250, 250);
const BLACK_PRESSED: Color32 = Color32::from_rgb(59, 130, 246);
const BLACK_ROOT: Color32 = Color32::from_rgb(217, 119, 6);
const BLACK_IN_SCALE: Color32 = Color32::from_rgb(161, 98, 7);
const BLACK_PLAIN: Color32 = Color32::from_rgb(20, 20, 20);
const KEY_OUTLINE: Color32 = Color32::from_gray(100);

fn white_fill(pressed: bool, scale: Option<Scale>, midi: u8) -> Color32 {
    match scale {
        _ if pressed => WHITE_PRESSED,
        Some(scale) if scale.is_root(midi) => WHITE_ROOT,
        Some(scale) if scale.contains(midi) => WHITE_IN_SCALE,
        _ => WHITE_PLAIN,
    }
}

fn black_fill(pressed: bool, scale: Option<Scale>, midi: u8) -> Color32 {
    match scale {
        _ if pressed => BLACK_PRESSED,
        Some(scale) if scale.is_root(midi) => BLACK_ROOT,
        Some(scale) if scale.contains(midi) => BLACK_IN_SCALE,
        _ => BLACK_PLAIN,
    }
}

/// Paint the keyboard and translate pointer interaction into note events.
///
/// `dragging` carries the key held by the pointer across frames. While the
/// primary button stays down, moving onto another key releases the old one
/// and presses the new one; lifting the button or leaving the keyboard
/// releases whatever is held.
pub fn draw_keyboard(
    ui: &mut egui::Ui,
    config: &ScreenConfig,
    keys: &[Key],
    scale: Option<Scale>,
    show_labels: bool,
    is_pressed: impl Fn(u8) -> bool,
    dragging: &mut Option<u8>,
) -> Vec<NoteEvent> {
    let size = Vec2::new(config.keyboard_width(), config.white_key_height);
    let (response, painter) = ui.allocate_painter(size, Sense::click_and_drag());
    let origin = response.rect.min;

    let rect_for = |key: &Key| -> Rect {
        match key.shape {
            KeyShape::White { position } => Rect::from_min_size(
                Pos2::new(
                    origin.x + position as f32 * config.white_key_width,
                    origin.y,
                ),
                Vec2::new(config.white_key_width, config.white_key_height),
            ),
            KeyShape::Black { between } => {
                let center_x = origin.x + (between.0 + 1) as f32 * config.white_key_width;
                Rect::from_min_size(
                    Pos2::new(center_x - config.black_key_width / 2.0, origin.y),
                    Vec2::new(config.black_key_width, config.black_key_height),
                )
            }
        }
    };

    // White keys first so the black keys overlay them
    for key in keys.iter().filter(|key| !key.is_black()) {
        let rect = rect_for(key);
        let fill = white_fill(is_pressed(key.midi), scale, key.midi);
        painter.rect_filled(rect, CornerRadius::same(2), fill);
        painter.rect_stroke(
            rect,
            CornerRadius::same(2),
            Stroke::new(1.0, KEY_OUTLINE),
            StrokeKind::Inside,
        );
        if show_labels {
            painter.text(
                Pos2::new(rect.center().x, rect.max.y - 12.0),
                Align2::CENTER_CENTER,
                key.label(),
                FontId::proportional(11.0),
                Color32::from_gray(90),
            );
        }
    }
    for key in keys.iter().filter(|key| key.is_black()) {
        let rect = rect_for(key);
        let fill = black_fill(is_pressed(key.midi), scale, key.midi);
        painter.rect_filled(rect, CornerRadius::same(2), fill);
        if show_labels {
            painter.text(
                Pos2::new(rect.center().x, rect.max.y - 10.0),
                Align2::CENTER_CENTER,
                key.note,
                FontId::proportional(9.0),
                Color32::from_gray(220),
            );
        }
    }

    // Black keys sit on top, so they get hit first
    let hit_test = |pos: Pos2| -> Option<u8> {
        keys.iter()
            .filter(|key| key.is_black())
            .chain(keys.iter().filter(|key| !key.is_black()))
            .find(|key| rect_for(key).contains(pos))
            .map(|key| key.midi)
    };

    let mut events = Vec::new();
    let primary_down = ui.input(|i| i.pointer.primary_down());
    if response.is_pointer_button_down_on() && primary_down {
        let hovered = response.interact_pointer_pos().and_then(hit_test);
        if hovered != *dragging {
            if let Some(old) = dragging.take() {
                events.push(NoteEvent::virtual_release(old));
            }
            if let Some(new) = hovered {
                events.push(NoteEvent::virtual_press(new));
            }
            *dragging = hovered;
        }
    } else if let Some(old) = dragging.take() {
        events.push(NoteEvent::virtual_release(old));
    }
    events
}

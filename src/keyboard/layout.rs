use serde::{Deserialize, Serialize};

/// Screen-size class derived from the window width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Mobile,
    Tablet,
    Laptop,
    Large,
    Desktop,
}

impl ScreenSize {
    /// Classify a window width in logical pixels.
    pub fn from_width(width: f32) -> Self {
        if width < 640.0 {
            ScreenSize::Mobile
        } else if width < 1024.0 {
            ScreenSize::Tablet
        } else if width < 1280.0 {
            ScreenSize::Laptop
        } else if width < 1600.0 {
            ScreenSize::Large
        } else {
            ScreenSize::Desktop
        }
    }

    /// Keyboard geometry for this class.
    pub fn config(self) -> ScreenConfig {
        match self {
            ScreenSize::Mobile => ScreenConfig {
                octaves: 1,
                white_key_width: 42.0,
                white_key_height: 150.0,
                black_key_width: 28.0,
                black_key_height: 100.0,
                start_octave: 4,
                show_octave_controls: true,
            },
            ScreenSize::Tablet => ScreenConfig {
                octaves: 2,
                white_key_width: 36.0,
                white_key_height: 140.0,
                black_key_width: 24.0,
                black_key_height: 90.0,
                start_octave: 3,
                show_octave_controls: true,
            },
            ScreenSize::Laptop => ScreenConfig {
                octaves: 3,
                white_key_width: 40.0,
                white_key_height: 160.0,
                black_key_width: 26.0,
                black_key_height: 100.0,
                start_octave: 3,
                show_octave_controls: false,
            },
            ScreenSize::Large => ScreenConfig {
                octaves: 4,
                white_key_width: 44.0,
                white_key_height: 180.0,
                black_key_width: 28.0,
                black_key_height: 115.0,
                start_octave: 2,
                show_octave_controls: false,
            },
            ScreenSize::Desktop => ScreenConfig {
                octaves: 5,
                white_key_width: 48.0,
                white_key_height: 200.0,
                black_key_width: 32.0,
                black_key_height: 130.0,
                start_octave: 2,
                show_octave_controls: false,
            },
        }
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ScreenSize::Mobile => "mobile",
            ScreenSize::Tablet => "tablet",
            ScreenSize::Laptop => "laptop",
            ScreenSize::Large => "large",
            ScreenSize::Desktop => "desktop",
        };
        write!(f, "{name}")
    }
}

/// Keyboard geometry for one screen-size class. Immutable; re-selected on
/// every resize rather than partially updated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenConfig {
    pub octaves: u8,
    pub white_key_width: f32,
    pub white_key_height: f32,
    pub black_key_width: f32,
    pub black_key_height: f32,
    pub start_octave: i32,
    pub show_octave_controls: bool,
}

impl ScreenConfig {
    /// White keys across all octaves plus the terminal C.
    pub fn white_key_count(&self) -> u32 {
        7 * self.octaves as u32 + 1
    }

    /// Total keyboard width in pixels.
    pub fn keyboard_width(&self) -> f32 {
        self.white_key_count() as f32 * self.white_key_width
    }

    /// Octave shift in effect for this layout. Classes without octave
    /// controls play at base pitch; the stored offset is left untouched.
    pub fn effective_octave_offset(&self, offset: i32) -> i32 {
        if self.show_octave_controls { offset } else { 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_breakpoint_boundaries() {
        assert_eq!(ScreenSize::from_width(0.0), ScreenSize::Mobile);
        assert_eq!(ScreenSize::from_width(639.0), ScreenSize::Mobile);
        assert_eq!(ScreenSize::from_width(640.0), ScreenSize::Tablet);
        assert_eq!(ScreenSize::from_width(1023.0), ScreenSize::Tablet);
        assert_eq!(ScreenSize::from_width(1024.0), ScreenSize::Laptop);
        assert_eq!(ScreenSize::from_width(1279.0), ScreenSize::Laptop);
        assert_eq!(ScreenSize::from_width(1280.0), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(1599.0), ScreenSize::Large);
        assert_eq!(ScreenSize::from_width(1600.0), ScreenSize::Desktop);
        assert_eq!(ScreenSize::from_width(4000.0), ScreenSize::Desktop);
    }

    #[test]
    fn test_octave_counts_per_class() {
        assert_eq!(ScreenSize::Mobile.config().octaves, 1);
        assert_eq!(ScreenSize::Tablet.config().octaves, 2);
        assert_eq!(ScreenSize::Laptop.config().octaves, 3);
        assert_eq!(ScreenSize::Large.config().octaves, 4);
        assert_eq!(ScreenSize::Desktop.config().octaves, 5);
    }

    #[test]
    fn test_octave_controls_only_on_small_screens() {
        assert!(ScreenSize::Mobile.config().show_octave_controls);
        assert!(ScreenSize::Tablet.config().show_octave_controls);
        assert!(!ScreenSize::Laptop.config().show_octave_controls);
        assert!(!ScreenSize::Large.config().show_octave_controls);
        assert!(!ScreenSize::Desktop.config().show_octave_controls);
    }

    #[test]
    fn test_start_octaves() {
        assert_eq!(ScreenSize::Mobile.config().start_octave, 4);
        assert_eq!(ScreenSize::Tablet.config().start_octave, 3);
        assert_eq!(ScreenSize::Laptop.config().start_octave, 3);
        assert_eq!(ScreenSize::Large.config().start_octave, 2);
        assert_eq!(ScreenSize::Desktop.config().start_octave, 2);
    }

    #[test]
    fn test_effective_octave_offset_needs_controls() {
        assert_eq!(ScreenSize::Mobile.config().effective_octave_offset(2), 2);
        assert_eq!(ScreenSize::Tablet.config().effective_octave_offset(-1), -1);
        assert_eq!(ScreenSize::Laptop.config().effective_octave_offset(2), 0);
        assert_eq!(ScreenSize::Large.config().effective_octave_offset(-2), 0);
        assert_eq!(ScreenSize::Desktop.config().effective_octave_offset(1), 0);
    }

    #[test]
    fn test_keyboard_width() {
        let mobile = ScreenSize::Mobile.config();
        assert_eq!(mobile.white_key_count(), 8);
        assert_eq!(mobile.keyboard_width(), 8.0 * 42.0);

        let desktop = ScreenSize::Desktop.config();
        assert_eq!(desktop.white_key_count(), 36);
        assert_eq!(desktop.keyboard_width(), 36.0 * 48.0);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(ScreenSize::Mobile.to_string(), "mobile");
        assert_eq!(ScreenSize::Desktop.to_string(), "desktop");
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&ScreenSize::Laptop).unwrap();
        assert_eq!(json, "\"laptop\"");
        let parsed: ScreenSize = serde_json::from_str("\"tablet\"").unwrap();
        assert_eq!(parsed, ScreenSize::Tablet);
    }
}

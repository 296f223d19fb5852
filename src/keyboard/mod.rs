//! Keyboard geometry and key topology.
//!
//! [`layout`] classifies the window width into a screen-size class and
//! supplies the fixed geometry for each class; [`keys`] expands that
//! geometry into the ordered list of key descriptors the UI renders.

mod keys;
mod layout;

pub use keys::{Key, KeyShape, OctaveOffset, generate_keys};
pub use layout::{ScreenConfig, ScreenSize};

pub mod app;
pub mod audio;
pub mod config;
pub mod input;
pub mod keyboard;
pub mod scale;
pub mod traits;
pub mod util;
pub mod voices;

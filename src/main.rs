use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use tonica::app::PianoApp;
use tonica::config::Settings;
use tonica::util::init_logging;

#[derive(Parser, Debug)]
#[command(name = "tonica", about = "Virtual piano with MIDI input and scale display")]
struct Args {
    /// Path to a directory of note samples with a manifest.json.
    #[arg(long)]
    samples: Option<PathBuf>,

    /// Path to settings JSON file.
    #[arg(long, default_value = "tonica.json")]
    config: PathBuf,

    /// Master volume, 0-100. Overrides the settings file.
    #[arg(long)]
    volume: Option<u8>,

    /// MIDI velocity damping factor. Overrides the settings file.
    #[arg(long)]
    velocity_scale: Option<f32>,

    /// Directory for daily rolling log files. Logs to stderr only when unset.
    #[arg(long, env = "TONICA_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// Enable debug-level logging.
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_dir.as_deref(), args.verbose)?;
    info!("tonica starting");

    // Load settings from file, falling back to defaults if not found
    let settings = match Settings::load(&args.config) {
        Ok(s) => {
            info!(path = %args.config.display(), "Loaded settings");
            s
        }
        Err(_) => {
            info!(
                path = %args.config.display(),
                "Settings not found, using defaults"
            );
            Settings::default()
        }
    };
    let settings = settings.with_overrides(args.volume, args.velocity_scale, args.samples);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 420.0])
            .with_min_inner_size([480.0, 320.0])
            .with_title("tonica"),
        ..Default::default()
    };

    eframe::run_native(
        "tonica",
        options,
        Box::new(move |cc| Ok(Box::new(PianoApp::new(cc, settings)?))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))?;

    Ok(())
}

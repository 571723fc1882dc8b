use clap::Parser;
use eframe::egui;

use svbox::app::SvBoxApp;
use svbox::cli::CliArgs;
use svbox::{log_err, logger};

fn main() -> Result<(), eframe::Error> {
    let args = CliArgs::parse();

    // Initialize session log (overwrites previous session log)
    logger::init();

    let app = match SvBoxApp::new(&args) {
        Ok(app) => app,
        Err(e) => {
            log_err!("startup failed: {e}");
            eprintln!("svbox: {e}");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([280.0, 360.0])
            .with_resizable(false)
            .with_title("svbox"),
        ..Default::default()
    };

    eframe::run_native("svbox", options, Box::new(move |_cc| Box::new(app)))
}

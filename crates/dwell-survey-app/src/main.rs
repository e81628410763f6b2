//! dwell-survey kiosk
//!
//! Controls (simulating a visitor in front of the sensor):
//! - Space: walk in or out of view
//! - Arrow keys: move the right hand
//! - R: reset the visitor
//! - Q or Esc: quit
//!
//! Usage:
//!   dwell-survey                         # Terminal kiosk
//!   dwell-survey --headless --ticks 3000 # Scripted visitor, logs to stderr

use dwell_survey_app::cli::Cli;

fn main() {
    let cli = Cli::parse_args();

    if let Err(e) = dwell_survey_app::run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

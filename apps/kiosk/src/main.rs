//! # Waffle Kiosk Entry Point
//!
//! ```text
//! waffle-kiosk [CONFIG_PATH]
//! ```
//!
//! Reads one JSON command per line on stdin and answers on stdout:
//!
//! ```text
//! → {"command":"add_preset","name":"Milo Meal"}
//! ← {"ok":true,"data":{"items":[...],"itemCount":1,"subtotal":400,...}}
//! → {"command":"submit_wordle_guess","guess":"PIE"}
//! ← {"ok":false,"error":{"code":"WORDLE_NOTICE","message":"Enter a 5-letter word."}}
//! ```
//!
//! Logs go to stderr. The setup lives in lib.rs for testability.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config_path = std::env::args_os().nth(1).map(PathBuf::from);

    match waffle_kiosk::run(config_path) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("waffle-kiosk: {}", e);
            ExitCode::FAILURE
        }
    }
}

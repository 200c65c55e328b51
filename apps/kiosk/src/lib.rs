//! # Waffle Kiosk Library
//!
//! The application layer of the Waffle World kiosk: session state,
//! configuration, command handlers and the JSON-lines loop that stands in
//! for a UI.
//!
//! ## Module Organization
//! ```text
//! waffle_kiosk/
//! ├── lib.rs          ◄─── You are here (logging, serve loop)
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState + exports
//! │   ├── session.rs  ◄─── Session + SessionState (Arc<Mutex>)
//! │   ├── catalog.rs  ◄─── Menu and batch pricing
//! │   └── config.rs   ◄─── KioskConfig (TOML + env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command enum, dispatch, Response
//! │   ├── cart.rs     ◄─── Cart manipulation
//! │   ├── discount.rs ◄─── Order summary, student code
//! │   ├── wordle.rs   ◄─── Word game
//! │   ├── checkout.rs ◄─── Place order, reset
//! │   ├── catalog.rs  ◄─── Menu, store config
//! │   └── navigation.rs
//! └── error.rs        ◄─── ApiError, ConfigError
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Kiosk Startup                                     │
//! │                                                                         │
//! │  1. Initialize Logging                                                  │
//! │     • tracing-subscriber with env filter, writing to stderr             │
//! │     • Default: info,waffle=debug, overridden by RUST_LOG                │
//! │                                                                         │
//! │  2. Load Configuration                                                  │
//! │     • path argument, else platform config dir                           │
//! │     • WAFFLE_* env overrides, then validate                             │
//! │                                                                         │
//! │  3. Initialize State                                                    │
//! │     • SessionState: empty cart on Home, word game seeded if configured  │
//! │     • CatalogState: standard menu                                       │
//! │                                                                         │
//! │  4. Serve                                                               │
//! │     • one JSON command per stdin line, one JSON response per line      │
//! │     • stops at end of input                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use error::KioskError;
use state::{AppState, KioskConfig};

/// Runs the kiosk on stdin/stdout.
pub fn run(config_path: Option<PathBuf>) -> Result<(), KioskError> {
    init_tracing();

    info!("Starting Waffle World kiosk");

    let config = KioskConfig::load(config_path)?;
    info!(
        store = %config.store.name,
        tier_policy = %config.discounts.tier_policy,
        seeded = config.wordle.seed.is_some(),
        "Configuration loaded"
    );

    let state = AppState::new(config);

    let stdin = io::stdin();
    let stdout = io::stdout();
    serve(&state, stdin.lock(), stdout.lock())?;

    info!("Input closed, shutting down");
    Ok(())
}

/// Reads commands from `input` until it ends, writing one response line
/// per non-blank input line.
pub fn serve<R: BufRead, W: Write>(state: &AppState, input: R, mut output: W) -> io::Result<()> {
    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = commands::handle_line(state, line);
        serde_json::to_writer(&mut output, &response)?;
        output.write_all(b"\n")?;
        output.flush()?;
    }

    debug!("End of command stream");
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=waffle=trace` - Show trace for waffle crates only
/// - Default: `info,waffle=debug`
///
/// Logs go to stderr; stdout carries only responses.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,waffle=debug"));

    // A second init (e.g. in tests) keeps the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

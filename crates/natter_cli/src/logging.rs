//! Tracing setup. Logs go to `~/.natter/natter.log`; the terminal belongs
//! to the TUI's alternate screen, so nothing may write to stdout/stderr.

use std::fs;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Install the file-backed subscriber. Failure to set up logging never
/// blocks the app; it just runs without diagnostics.
pub fn init() {
    let Some(home) = dirs::home_dir() else {
        return;
    };
    let dir = home.join(".natter");
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::File::options()
        .create(true)
        .append(true)
        .open(dir.join("natter.log"))
    else {
        return;
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

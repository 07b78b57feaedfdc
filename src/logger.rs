//! Logging for flashdeck
//!
//! Crate code logs through the `log` facade with the `log_*!` macros. Each
//! record goes to the log file, when one is set, and is echoed to stderr at
//! or above the console level. Tracing events from the HTTP stack are written
//! to the same file by a `tracing-subscriber` layer.

use anyhow::{Result, anyhow};
use chrono::Local;
use log::{Level, LevelFilter, Metadata, Record};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::sync::{LazyLock, OnceLock};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt};

const DEFAULT_FILTER: &str = "flashdeck=debug,warn";

/// Targets that flood the log at debug level
const HTTP_TARGETS: &[&str] = &[
    "reqwest",
    "hyper",
    "h2",
    "rustls",
    "want",
    "mio",
    "cookie_store",
];

/// Where records end up
struct Sinks {
    file: Option<File>,
    console: LevelFilter,
    verbose: bool,
}

static SINKS: LazyLock<Mutex<Sinks>> = LazyLock::new(|| {
    Mutex::new(Sinks {
        file: None,
        console: LevelFilter::Off,
        verbose: false,
    })
});

static LOGGER: FlashdeckLogger = FlashdeckLogger;

struct FlashdeckLogger;

impl log::Log for FlashdeckLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        accepts(metadata.target(), metadata.level(), SINKS.lock().verbose)
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let line = format!(
            "{} {} [{}] - {}\n",
            Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        );

        let mut sinks = SINKS.lock();
        if let Some(file) = sinks.file.as_mut() {
            let _ = file.write_all(line.as_bytes());
        }
        if record.level() <= sinks.console {
            eprint!("{line}");
        }
    }

    fn flush(&self) {
        if let Some(file) = SINKS.lock().file.as_mut() {
            let _ = file.flush();
        }
    }
}

/// HTTP client chatter only passes in verbose mode
fn accepts(target: &str, level: Level, verbose: bool) -> bool {
    if level > Level::Debug {
        return false;
    }
    if target.starts_with("flashdeck") || verbose {
        return true;
    }
    !HTTP_TARGETS.iter().any(|prefix| target.starts_with(prefix))
}

/// Writer for the tracing layer, appending to the current log file
struct LogFileWriter;

impl Write for LogFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if let Some(file) = SINKS.lock().file.as_mut() {
            file.write_all(buf)?;
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        match SINKS.lock().file.as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Install the `log` logger and the tracing subscriber. Safe to call twice.
pub fn init() -> Result<()> {
    static INIT: OnceLock<Result<(), String>> = OnceLock::new();

    INIT.get_or_init(install).clone().map_err(|e| anyhow!(e))
}

fn install() -> Result<(), String> {
    let verbose = std::env::var_os("FLASHDECK_VERBOSE").is_some()
        || std::env::var("RUST_LOG").is_ok_and(|v| v.contains("debug") || v.contains("trace"));
    set_verbose_logging(verbose);

    log::set_logger(&LOGGER).map_err(|e| format!("Failed to install logger: {e}"))?;
    log::set_max_level(LevelFilter::Debug);

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_timer(fmt::time::ChronoUtc::rfc_3339())
        .with_writer(|| LogFileWriter);

    // Not `try_init`: that would also claim the `log` facade
    tracing::subscriber::set_global_default(Registry::default().with(env_filter).with(file_layer))
        .map_err(|e| format!("Failed to install tracing subscriber: {e}"))
}

pub fn set_verbose_logging(enabled: bool) {
    SINKS.lock().verbose = enabled;
}

pub fn set_log_file(file_path: &str) -> io::Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(file_path)?;
    SINKS.lock().file = Some(file);
    Ok(())
}

/// Echo records at or above `level` to stderr; returns the previous level
pub fn set_console_level(level: LevelFilter) -> LevelFilter {
    std::mem::replace(&mut SINKS.lock().console, level)
}

// Logging macros used across the crate
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        log::debug!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        log::error!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        log::info!($($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        log::warn!($($arg)*)
    };
}

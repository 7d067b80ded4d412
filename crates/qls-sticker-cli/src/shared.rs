use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use qls_sticker_io::{Strategy, TableSettings};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::cli::TableStrategy;

/// Install the stderr log subscriber.
///
/// `RUST_LOG` wins when set; otherwise the level follows `-q` / `-v`.
pub fn init_logging(verbose: u8, quiet: bool) {
    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .with(filter)
        .try_init();
}

/// Table settings for the chosen detection strategy.
pub fn build_table_settings(strategy: TableStrategy) -> TableSettings {
    let strategy = match strategy {
        TableStrategy::Lattice => Strategy::Lattice,
        TableStrategy::Stream => Strategy::Stream,
    };

    TableSettings {
        strategy,
        ..TableSettings::default()
    }
}

/// Unwrap a required path or report which option is missing.
pub fn require_path(value: Option<PathBuf>, option: &str) -> Result<PathBuf, i32> {
    value.ok_or_else(|| {
        eprintln!("Error: {option} was not given and no saved setting exists");
        1
    })
}

/// Create a folder (and parents) with a user-facing error.
pub fn ensure_dir(dir: &Path) -> Result<(), i32> {
    std::fs::create_dir_all(dir).map_err(|e| {
        eprintln!("Error: cannot create folder {}: {e}", dir.display());
        1
    })
}

/// A progress bar on stderr, drawn only when stderr is a terminal.
///
/// `[##########--------------------]  3/9 files processed`
pub struct ProgressReporter {
    total: usize,
    bar_length: usize,
    is_tty: bool,
}

impl ProgressReporter {
    /// Create a reporter for `total` files.
    pub fn new(total: usize) -> Self {
        Self {
            total,
            bar_length: 30,
            is_tty: io::stderr().is_terminal(),
        }
    }

    /// Render the bar for `current` processed files (1-indexed).
    pub fn render(&self, current: usize) -> String {
        let filled = if self.total == 0 {
            self.bar_length
        } else {
            (self.bar_length * current.min(self.total)) / self.total
        };
        format!(
            "[{}{}]  {}/{} files processed",
            "#".repeat(filled),
            "-".repeat(self.bar_length - filled),
            current,
            self.total
        )
    }

    /// Report progress for file `current` (1-indexed).
    pub fn report(&self, current: usize) {
        if self.is_tty {
            eprint!("\r{}", self.render(current));
            let _ = io::stderr().flush();
        }
    }

    /// Clear the progress line (if TTY).
    pub fn finish(&self) {
        if self.is_tty {
            eprint!("\r{}\r", " ".repeat(self.bar_length + 40));
            let _ = io::stderr().flush();
        }
    }
}

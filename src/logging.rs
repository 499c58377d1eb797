use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Log, Metadata, Record};

/// Sends `log` records to a file, since the terminal is owned by the UI.
pub struct FileLogger {
    level: LevelFilter,
    out: Mutex<File>,
}

impl FileLogger {
    /// Truncates `path` and installs the logger globally.
    pub fn init(path: &Path, level: LevelFilter) -> Result<(), Box<dyn std::error::Error>> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(path)?;

        log::set_boxed_logger(Box::new(FileLogger {
            level,
            out: Mutex::new(file),
        }))?;
        log::set_max_level(level);
        Ok(())
    }
}

impl Log for FileLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if let Ok(mut out) = self.out.lock() {
            // nowhere left to report a failed log write
            let _ = writeln!(out, "[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {
        if let Ok(mut out) = self.out.lock() {
            let _ = out.flush();
        }
    }
}

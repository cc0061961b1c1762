/// Daily log file persistence
///
/// Lines are appended to `<logs dir>/boostbot_YYYY-MM-DD.log`. The file is
/// reopened when the local date changes. Until `init_file_logging` runs every
/// write is a no-op, which keeps unit tests off the filesystem.
use crate::paths;
use chrono::Local;
use once_cell::sync::Lazy;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::Mutex;

struct FileSink {
    directory: PathBuf,
    date: String,
    writer: BufWriter<File>,
}

impl FileSink {
    fn open(directory: PathBuf, date: String) -> std::io::Result<Self> {
        std::fs::create_dir_all(&directory)?;
        let path = directory.join(format!("boostbot_{}.log", date));
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            directory,
            date,
            writer: BufWriter::new(file),
        })
    }
}

static FILE_SINK: Lazy<Mutex<Option<FileSink>>> = Lazy::new(|| Mutex::new(None));

/// Open today's log file in the logs directory
pub fn init_file_logging() {
    let today = Local::now().format("%Y-%m-%d").to_string();
    match FileSink::open(paths::get_logs_directory(), today) {
        Ok(sink) => {
            if let Ok(mut guard) = FILE_SINK.lock() {
                *guard = Some(sink);
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file: {}", e);
        }
    }
}

/// Append one line to the current log file, rotating on date change
pub fn write_to_file(line: &str) {
    let Ok(mut guard) = FILE_SINK.lock() else {
        return;
    };
    let Some(sink) = guard.as_mut() else {
        return;
    };

    let today = Local::now().format("%Y-%m-%d").to_string();
    if sink.date != today {
        let _ = sink.writer.flush();
        match FileSink::open(sink.directory.clone(), today) {
            Ok(rotated) => *sink = rotated,
            Err(e) => {
                eprintln!("Failed to rotate log file: {}", e);
                return;
            }
        }
    }

    if writeln!(sink.writer, "{}", line).is_err() {
        return;
    }
    // Warnings and errors should survive an abort
    if line.contains("[ERROR]") || line.contains("[WARNING]") {
        let _ = sink.writer.flush();
    }
}

/// Flush buffered lines to disk
pub fn flush_file_logging() {
    if let Ok(mut guard) = FILE_SINK.lock() {
        if let Some(sink) = guard.as_mut() {
            let _ = sink.writer.flush();
        }
    }
}

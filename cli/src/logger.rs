use colored::*;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::fs::{File, OpenOptions};
use std::io::Write;
use std::sync::Mutex;

pub struct HarnessLogger {
    quiet: bool,
    verbose: bool,
    log_file: Mutex<Option<File>>,
}

impl HarnessLogger {
    pub fn new(quiet: bool, verbose: bool) -> Self {
        let log_file = floatview_core::paths::ensure_data_dir()
            .and_then(|_| floatview_core::paths::log_file_path())
            .and_then(|path| {
                match OpenOptions::new()
                    .create(true)
                    .write(true)
                    .truncate(true)
                    .open(&path)
                {
                    Ok(file) => Some(file),
                    Err(e) => {
                        eprintln!("Warning: Failed to open log file at {:?}: {}", path, e);
                        None
                    }
                }
            });

        Self {
            quiet,
            verbose,
            log_file: Mutex::new(log_file),
        }
    }

    fn format_plain(record: &Record) -> String {
        let level_str = match record.level() {
            Level::Error => "[E]",
            Level::Warn => "[W]",
            Level::Info => "[I]",
            Level::Debug => "[D]",
            Level::Trace => "[T]",
        };
        format!("{} {}", level_str, record.args())
    }

    fn format_colored(record: &Record) -> String {
        let plain = Self::format_plain(record);
        match record.level() {
            Level::Error => plain.red().bold().to_string(),
            Level::Warn => plain.yellow().bold().to_string(),
            Level::Info => plain,
            Level::Debug => plain.dimmed().to_string(),
            Level::Trace => plain.dimmed().to_string(),
        }
    }
}

impl Log for HarnessLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if self.quiet {
            metadata.level() <= Level::Info
        } else if self.verbose {
            metadata.level() <= Level::Trace
        } else {
            metadata.level() <= Level::Debug
        }
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            println!("{}", Self::format_colored(record));

            if let Ok(mut file_opt) = self.log_file.lock() {
                if let Some(file) = file_opt.as_mut() {
                    let _ = writeln!(file, "{}", Self::format_plain(record));
                    let _ = file.flush();
                }
            }
        }
    }

    fn flush(&self) {}
}

pub fn init_logger(quiet: bool, verbose: bool) -> Result<(), log::SetLoggerError> {
    let logger = HarnessLogger::new(quiet, verbose);
    log::set_boxed_logger(Box::new(logger))?;
    log::set_max_level(LevelFilter::Trace);
    Ok(())
}

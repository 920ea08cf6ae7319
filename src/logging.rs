use std::{fs::File, io::Write, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use chrono::Utc;
use colored::{Color, Colorize as _};
use env_logger::{Builder, Env};
use log::{Level, Record};

/// Log to stderr (colored) and to `log_file` (plain). The file is truncated.
pub fn init(log_file: &Path) -> Result<()> {
    let file = File::create(log_file)
        .with_context(|| format!("Could not create log file {}", log_file.display()))?;
    let file = Mutex::new(file);

    let mut builder = Builder::new();

    builder.parse_env(get_env());

    builder.format(move |f, record| {
        let time = Utc::now().format("%Y-%m-%d %H:%M:%S").to_string();
        let location = location(record);

        if let Ok(mut file) = file.lock() {
            let level = level_to_str(record.level());
            let target = record.target();
            let message = record.args();
            // A broken log file should not take the console down with it
            let _ = writeln!(file, "{time} [{level}@{target}] {message} ({location})");
        }

        let color = color_by_level(record.level());
        let time = time.dimmed();
        let level = level_to_str(record.level()).color(color);
        let target = record.target().dimmed();
        let message = record.args().to_string().color(color);
        let location = location.dimmed();

        writeln!(f, "{time} [{level}@{target}] {message} {location}")
    });

    builder
        .try_init()
        .context("Could not install the logger")?;
    Ok(())
}

fn get_env() -> Env<'static> {
    let default_level = if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    };
    Env::default().default_filter_or(default_level)
}

fn location(record: &Record) -> String {
    match (record.file(), record.line()) {
        (Some(file), Some(line)) => format!("{file}:{line}"),
        (Some(file), None) => file.to_owned(),
        _ => String::from("<unknown>"),
    }
}

const fn color_by_level(level: Level) -> Color {
    match level {
        Level::Trace => Color::Magenta,
        Level::Debug => Color::Blue,
        Level::Info => Color::Green,
        Level::Warn => Color::Yellow,
        Level::Error => Color::Red,
    }
}

const fn level_to_str(level: Level) -> &'static str {
    match level {
        Level::Trace => "T",
        Level::Debug => "D",
        Level::Info => "I",
        Level::Warn => "W",
        Level::Error => "E",
    }
}

//! applog binary entry point.
//!
//! Logs each line read from stdin as a `msg` record, enabling that type on
//! top of whatever the settings enable. An optional settings file may be
//! passed as the first argument; the target defaults to the console when
//! the settings leave it unset.

use applog::config::{ConfigLoader, LoggerSettings};
use applog::{LogType, Logger};
use std::io::{self, BufRead};
use std::process::ExitCode;

fn main() -> ExitCode {
    let settings = match std::env::args().nth(1) {
        Some(path) => match ConfigLoader::new().load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                eprintln!("applog: {e}");
                return ExitCode::FAILURE;
            },
        },
        None => LoggerSettings::default(),
    };

    let logger = Logger::new();
    settings.apply(&logger);
    if logger.target().is_empty() {
        logger.set_target("console");
    }
    logger.add_type(LogType::MSG);

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                eprintln!("applog: failed to read stdin: {e}");
                break;
            },
        };

        if let Err(e) = logger.log(&line, LogType::MSG) {
            eprintln!("applog: {e}");
            logger.shutdown();
            return ExitCode::FAILURE;
        }
    }

    logger.shutdown();
    ExitCode::SUCCESS
}

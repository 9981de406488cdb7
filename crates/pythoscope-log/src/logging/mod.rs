//! Logging utilities.
//!
//! This module owns the pythoscope logger: one process-wide handler behind the
//! standard `log` facade, a formatter that switches to an extended layout in
//! debug mode, and a redirectable output.
//!
//! Emit with the usual macros (`log::info!`, `log::debug!`, `log::error!`)
//! after calling [`init_logging`] early in `main`.

mod format;
mod init;
mod level;
mod logger;
mod output;
mod record;

pub use format::format_record;
pub use init::{
    InitError, LEVEL_ENV, LoggingConfig, get_output, init_logging, level, level_from_env, logger,
    set_level, set_output,
};
pub use level::{Level, LevelParseError, level_name};
pub use logger::Logger;
pub use output::{CaptureBuffer, Output, OutputError};
pub use record::LogRecord;

//! pythoscope logging crate.
//!
//! Provides the process logger used across pythoscope: a default
//! informational level, a formatter with a verbose debug layout, and
//! accessors that redirect output to any writable sink.
//!
//! # Quick start
//!
//! ```no_run
//! use pythoscope_log::logging::{self, Level, LoggingConfig};
//!
//! logging::init_logging(LoggingConfig::default()).unwrap();
//! log::info!("collecting modules");
//!
//! logging::set_level(Level::Debug);
//! log::debug!("inspecting {}", "generator/adder.py");
//! ```

pub mod logging;
pub mod naming;

pub use logging::{Level, Logger, LoggingConfig, Output, init_logging};
pub use naming::{PathNamer, path_to_module_name};

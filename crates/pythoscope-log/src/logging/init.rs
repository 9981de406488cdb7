use std::io::Write;
use std::sync::OnceLock;

use super::level::{Level, LevelParseError};
use super::logger::Logger;
use super::output::Output;
use super::record::LogRecord;
use crate::naming::PathNamer;

/// Environment variable that overrides the configured level.
pub const LEVEL_ENV: &str = "PYTHOSCOPE_LOG";

/// Logger configuration.
///
/// `env_var` names the variable consulted for a level override (`info`,
/// `debug` or `error`); `None` disables the lookup. `project_root` is the
/// source directory the debug formatter strips from paths.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub level: Level,
    pub output: Output,
    pub project_root: String,
    pub env_var: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            output: Output::stderr(),
            project_root: PathNamer::default().root().to_owned(),
            env_var: Some(LEVEL_ENV.to_owned()),
        }
    }
}

/// Initialization failure.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    /// Another implementation already owns the `log` macros. The logger is
    /// still created and usable through [`logger`] and [`Logger::emit`].
    #[error("another logger is already installed in the `log` facade")]
    FacadeTaken,
}

struct Installed {
    logger: Logger,
    facade: bool,
}

static INSTANCE: OnceLock<Installed> = OnceLock::new();

/// Initializes the process logger once.
///
/// This function is idempotent: later calls return the existing handle and
/// ignore their config. Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) -> Result<Logger, InitError> {
    let mut fresh = false;
    let mut rejected = None;

    let installed = INSTANCE.get_or_init(|| {
        fresh = true;
        let env = config
            .env_var
            .as_deref()
            .and_then(|name| std::env::var(name).ok());
        let level = match level_from_env(env.as_deref(), config.level) {
            Ok(level) => level,
            Err(err) => {
                rejected = Some(err);
                config.level
            }
        };

        let logger = Logger::new(level, config.output, PathNamer::new(config.project_root));
        let facade = install(&logger).is_ok();
        Installed { logger, facade }
    });

    if !installed.facade {
        return Err(InitError::FacadeTaken);
    }
    if fresh {
        if let Some(err) = rejected {
            // Written straight to the sink: at Error level the facade drops warnings.
            let logger = &installed.logger;
            let message = format!("{err}; keeping level {}", logger.level());
            let record = LogRecord::new(log::Level::Warn, message, module_path!());
            let _ = logger.output().write_line(&logger.render(&record));
        }
        log::debug!("logging initialized");
    }
    Ok(installed.logger.clone())
}

/// The process logger, if [`init_logging`] has run.
pub fn logger() -> Option<Logger> {
    INSTANCE.get().map(|i| i.logger.clone())
}

/// Returns the sink attached to the process logger.
///
/// Initializes with defaults when nothing is installed yet.
pub fn get_output() -> Output {
    current().output()
}

/// Redirects the process logger to `output`.
///
/// Initializes with defaults when nothing is installed yet.
pub fn set_output(output: Output) {
    current().set_output(output);
}

pub fn level() -> Level {
    current().level()
}

pub fn set_level(level: Level) {
    current().set_level(level);
}

fn current() -> Logger {
    if let Some(logger) = logger() {
        return logger;
    }
    match init_logging(LoggingConfig::default()) {
        Ok(logger) => logger,
        // The instance exists even when the facade belongs to someone else.
        Err(InitError::FacadeTaken) => match INSTANCE.get() {
            Some(i) => i.logger.clone(),
            None => Logger::new(Level::Info, Output::stderr(), PathNamer::default()),
        },
    }
}

/// Resolves the level from an optional override value.
pub fn level_from_env(value: Option<&str>, fallback: Level) -> Result<Level, LevelParseError> {
    match value {
        Some(raw) if !raw.trim().is_empty() => raw.parse(),
        _ => Ok(fallback),
    }
}

/// Attaches the single facade handler: `env_logger` with the pythoscope
/// formatter, piping into whatever output is current.
fn install(logger: &Logger) -> Result<(), log::SetLoggerError> {
    let mut builder = env_logger::Builder::new();

    // Debug is the widest tier; the facade max level does the real gating.
    builder.filter_level(log::LevelFilter::Debug);
    builder.write_style(env_logger::WriteStyle::Never);
    builder.target(env_logger::Target::Pipe(Box::new(logger.current_output())));

    let fmt_logger = logger.clone();
    builder.format(move |buf, record| {
        if !fmt_logger.enabled(record.level()) {
            return Ok(());
        }
        let rec = LogRecord::from_log(record);
        writeln!(buf, "{}", fmt_logger.render(&rec))
    });

    builder.try_init()?;
    logger.mark_installed();
    Ok(())
}

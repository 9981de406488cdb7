use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

use super::format::format_record;
use super::level::Level;
use super::output::Output;
use super::record::LogRecord;
use crate::naming::PathNamer;

struct Shared {
    level: AtomicU8,
    output: RwLock<Output>,
    namer: PathNamer,
    /// Set once this logger backs the `log` facade.
    facade: AtomicBool,
}

/// Handle to one logger's level and output.
///
/// Clones share state, so a handle can be passed to whatever needs to emit or
/// reconfigure. The process-wide instance is created by
/// [`init_logging`](super::init_logging); standalone instances work through
/// [`Logger::emit`] without touching the facade.
#[derive(Clone)]
pub struct Logger {
    shared: Arc<Shared>,
}

impl Logger {
    pub fn new(level: Level, output: Output, namer: PathNamer) -> Self {
        Self {
            shared: Arc::new(Shared {
                level: AtomicU8::new(level.to_u8()),
                output: RwLock::new(output),
                namer,
                facade: AtomicBool::new(false),
            }),
        }
    }

    pub fn level(&self) -> Level {
        Level::from_u8(self.shared.level.load(Ordering::Relaxed))
    }

    /// Changes the verbosity. On the installed logger this also moves the
    /// facade's max level, so suppressed records are never built.
    pub fn set_level(&self, level: Level) {
        self.shared.level.store(level.to_u8(), Ordering::Relaxed);
        if self.shared.facade.load(Ordering::Acquire) {
            log::set_max_level(level.filter());
        }
    }

    /// The sink currently receiving rendered lines.
    pub fn output(&self) -> Output {
        self.shared
            .output
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Redirects every later emission to `output`.
    pub fn set_output(&self, output: Output) {
        *self.shared.output.write().unwrap_or_else(PoisonError::into_inner) = output;
    }

    pub fn enabled(&self, level: log::Level) -> bool {
        level <= self.level().filter()
    }

    /// Renders `record` for the current level.
    pub fn render(&self, record: &LogRecord<'_>) -> String {
        format_record(record, self.level(), &self.shared.namer)
    }

    /// Renders and writes `record` if its level is enabled.
    pub fn emit(&self, record: &LogRecord<'_>) -> io::Result<()> {
        if !self.enabled(record.level) {
            return Ok(());
        }
        self.output().write_line(&self.render(record))
    }

    /// Whether this logger is the one behind the `log` macros.
    pub fn is_installed(&self) -> bool {
        self.shared.facade.load(Ordering::Acquire)
    }

    /// Writer that always forwards to the current output.
    pub(crate) fn current_output(&self) -> CurrentOutput {
        CurrentOutput(self.clone())
    }

    pub(crate) fn mark_installed(&self) {
        self.shared.facade.store(true, Ordering::Release);
        log::set_max_level(self.level().filter());
    }
}

impl std::fmt::Debug for Logger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("output", &self.output())
            .field("root", &self.shared.namer.root())
            .finish()
    }
}

/// Pipe target for the facade handler.
///
/// Each buffer is written to whichever output is attached at that moment, so
/// swapping the output never adds a second destination.
pub(crate) struct CurrentOutput(Logger);

impl Write for CurrentOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.output().write(buf)
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        self.0.output().write_all(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.0.output().flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::output::CaptureBuffer;

    fn capture(level: Level) -> (Logger, CaptureBuffer) {
        let buf = CaptureBuffer::new();
        let logger = Logger::new(level, buf.output(), PathNamer::default());
        (logger, buf)
    }

    // ── level ─────────────────────────────────────────────────────────────

    #[test]
    fn info_level_filters_debug() {
        let (logger, buf) = capture(Level::Info);
        logger.emit(&LogRecord::new(log::Level::Debug, "hidden", "u")).unwrap();
        logger.emit(&LogRecord::new(log::Level::Info, "shown", "u")).unwrap();
        logger.emit(&LogRecord::new(log::Level::Warn, "careful", "u")).unwrap();
        assert_eq!(buf.contents(), "INFO: shown\nWARNING: careful\n");
    }

    #[test]
    fn error_level_keeps_only_errors() {
        let (logger, buf) = capture(Level::Error);
        logger.emit(&LogRecord::new(log::Level::Info, "quiet", "u")).unwrap();
        logger.emit(&LogRecord::new(log::Level::Error, "loud", "u")).unwrap();
        assert_eq!(buf.contents(), "ERROR: loud\n");
    }

    #[test]
    fn trace_never_passes() {
        let (logger, buf) = capture(Level::Debug);
        logger.emit(&LogRecord::new(log::Level::Trace, "noise", "u")).unwrap();
        assert_eq!(buf.contents(), "");
    }

    #[test]
    fn set_level_switches_rendering() {
        let (logger, buf) = capture(Level::Info);
        let rec = LogRecord::new(log::Level::Info, "x", "u").at("sth/pythoscope/store.py", 3);

        logger.emit(&rec).unwrap();
        assert_eq!(buf.take(), "INFO: x\n");

        logger.set_level(Level::Debug);
        assert_eq!(logger.level(), Level::Debug);
        logger.emit(&rec).unwrap();
        let line = buf.take();
        assert!(line.ends_with(" store:3 INFO: x\n"), "{line:?}");
    }

    #[test]
    fn standalone_logger_is_not_installed() {
        let (logger, _) = capture(Level::Info);
        assert!(!logger.is_installed());
    }

    // ── output ────────────────────────────────────────────────────────────

    #[test]
    fn set_output_redirects_later_emissions() {
        let (logger, first) = capture(Level::Info);
        logger.emit(&LogRecord::new(log::Level::Info, "one", "u")).unwrap();

        let second = CaptureBuffer::new();
        let out = second.output();
        logger.set_output(out.clone());
        logger.emit(&LogRecord::new(log::Level::Info, "two", "u")).unwrap();

        assert!(Output::same(&logger.output(), &out));
        assert_eq!(first.contents(), "INFO: one\n");
        assert_eq!(second.contents(), "INFO: two\n");
    }

    #[test]
    fn clones_share_configuration() {
        let (logger, _) = capture(Level::Info);
        let other = logger.clone();
        let buf = CaptureBuffer::new();
        other.set_output(buf.output());
        other.set_level(Level::Error);
        assert_eq!(logger.level(), Level::Error);
        assert!(Output::same(&logger.output(), &other.output()));
    }

    #[test]
    fn swaps_during_emission_keep_lines_whole() {
        const LINES: usize = 2000;

        let (logger, first) = capture(Level::Info);
        let second = CaptureBuffer::new();
        let (a, b) = (first.output(), second.output());

        std::thread::scope(|s| {
            let emitter = logger.clone();
            s.spawn(move || {
                for i in 0..LINES {
                    let rec = LogRecord::new(log::Level::Info, format!("m{i}"), "u");
                    emitter.emit(&rec).unwrap();
                }
            });
            s.spawn(|| {
                for i in 0..LINES {
                    logger.set_output(if i % 2 == 0 { b.clone() } else { a.clone() });
                }
            });
        });

        let text = first.contents() + &second.contents();
        let mut seen: Vec<usize> = text
            .lines()
            .map(|line| {
                let n = line.strip_prefix("INFO: m").unwrap_or_else(|| panic!("torn line {line:?}"));
                n.parse().unwrap()
            })
            .collect();
        seen.sort_unstable();
        assert_eq!(seen, (0..LINES).collect::<Vec<_>>());
    }

    #[test]
    fn current_output_follows_swaps() {
        let (logger, first) = capture(Level::Info);
        let mut pipe = logger.current_output();
        pipe.write_all(b"a\n").unwrap();

        let second = CaptureBuffer::new();
        logger.set_output(second.output());
        pipe.write_all(b"b\n").unwrap();
        pipe.flush().unwrap();

        assert_eq!(first.contents(), "a\n");
        assert_eq!(second.contents(), "b\n");
    }
}

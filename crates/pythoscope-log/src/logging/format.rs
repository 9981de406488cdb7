use super::level::{Level, level_name};
use super::record::LogRecord;
use crate::naming::PathNamer;

/// Renders one record as a single line, without the trailing newline.
///
/// Normal mode prints `LEVEL: message`. At [`Level::Debug`] the line is
/// prefixed with the local time (`HHMMSS.msec`) and the emitting module and
/// line, e.g. `130507.123 astvisitor:42 DEBUG: x`.
pub fn format_record(record: &LogRecord<'_>, level: Level, namer: &PathNamer) -> String {
    let message = format!("{}: {}", level_name(record.level), record.message);
    if level != Level::Debug {
        return message;
    }

    let module = match record.path {
        Some(path) => namer.name(path, record.unit),
        None => record.unit.to_owned(),
    };
    format!(
        "{}.{} {}:{} {}",
        record.created.format("%H%M%S"),
        record.msecs(),
        module,
        record.line.unwrap_or(0),
        message
    )
}

use chrono::{DateTime, Local, Timelike};

/// Data captured at one emission site.
///
/// Built once per log call, rendered once by the formatter, then dropped.
#[derive(Debug, Clone)]
pub struct LogRecord<'a> {
    pub level: log::Level,
    pub message: String,
    /// Local creation time.
    pub created: DateTime<Local>,
    /// Source file of the call site, as reported by the compiler.
    pub path: Option<&'a str>,
    pub line: Option<u32>,
    /// Name of the emitting unit, used when the path does not resolve to a module.
    pub unit: &'a str,
}

impl<'a> LogRecord<'a> {
    /// Creates a record stamped with the current local time.
    pub fn new(level: log::Level, message: impl Into<String>, unit: &'a str) -> Self {
        Self {
            level,
            message: message.into(),
            created: Local::now(),
            path: None,
            line: None,
            unit,
        }
    }

    /// Attaches the call-site location.
    pub fn at(mut self, path: &'a str, line: u32) -> Self {
        self.path = Some(path);
        self.line = Some(line);
        self
    }

    /// Overrides the creation time.
    pub fn created_at(mut self, created: DateTime<Local>) -> Self {
        self.created = created;
        self
    }

    /// Captures a facade record, stamping it with the current local time.
    pub fn from_log(record: &log::Record<'a>) -> Self {
        Self {
            level: record.level(),
            message: record.args().to_string(),
            created: Local::now(),
            path: record.file(),
            line: record.line(),
            unit: record.module_path().unwrap_or(record.target()),
        }
    }

    /// Millisecond part of the creation time.
    pub fn msecs(&self) -> u32 {
        // Leap seconds report nanos past 1e9; keep the offset within a second.
        (self.created.nanosecond() / 1_000_000).min(999)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn msecs_from_created() {
        let t = Local
            .with_ymd_and_hms(2024, 5, 1, 13, 5, 7)
            .single()
            .unwrap()
            + chrono::Duration::milliseconds(45);
        let rec = LogRecord::new(log::Level::Info, "x", "unit").created_at(t);
        assert_eq!(rec.msecs(), 45);
    }

    #[test]
    fn location_is_optional() {
        let rec = LogRecord::new(log::Level::Error, "boom", "unit");
        assert!(rec.path.is_none());
        assert!(rec.line.is_none());

        let rec = rec.at("sth/pythoscope/store.py", 7);
        assert_eq!(rec.path, Some("sth/pythoscope/store.py"));
        assert_eq!(rec.line, Some(7));
    }

    #[test]
    fn from_facade_record() {
        fn check(raw: &log::Record<'_>) {
            let rec = LogRecord::from_log(raw);
            assert_eq!(rec.level, log::Level::Debug);
            assert_eq!(rec.message, "hello 5");
            assert_eq!(rec.unit, "demo::inspector");
            assert_eq!(rec.path, Some("src/inspector.rs"));
            assert_eq!(rec.line, Some(12));
        }

        check(
            &log::Record::builder()
                .args(format_args!("hello {}", 5))
                .level(log::Level::Debug)
                .target("demo")
                .module_path_static(Some("demo::inspector"))
                .file_static(Some("src/inspector.rs"))
                .line(Some(12))
                .build(),
        );
    }

    #[test]
    fn unit_falls_back_to_target() {
        fn check(raw: &log::Record<'_>) {
            assert_eq!(LogRecord::from_log(raw).unit, "demo");
        }

        check(
            &log::Record::builder()
                .args(format_args!("x"))
                .target("demo")
                .module_path(None)
                .build(),
        );
    }
}

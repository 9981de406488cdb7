use std::fmt;
use std::str::FromStr;

/// Verbosity of the process logger.
///
/// Only three tiers exist. `Debug` also switches the formatter into its
/// extended rendering.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum Level {
    /// Errors only.
    Error,
    /// Progress messages, warnings and errors.
    #[default]
    Info,
    /// Everything above plus debug diagnostics, rendered with time and location.
    Debug,
}

/// Unrecognized verbosity name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown log level {0:?}: expected one of info, debug, error")]
pub struct LevelParseError(pub String);

impl Level {
    /// Facade filter that lets exactly this tier's records through.
    pub fn filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }

    pub(crate) fn to_u8(self) -> u8 {
        match self {
            Self::Error => 0,
            Self::Info => 1,
            Self::Debug => 2,
        }
    }

    pub(crate) fn from_u8(raw: u8) -> Self {
        match raw {
            0 => Self::Error,
            1 => Self::Info,
            2 => Self::Debug,
            _ => unreachable!("level atomic holds {raw}"),
        }
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            _ => Err(LevelParseError(s.to_owned())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display name of a facade level, as printed in front of each message.
pub fn level_name(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "ERROR",
        log::Level::Warn => "WARNING",
        log::Level::Info => "INFO",
        log::Level::Debug => "DEBUG",
        log::Level::Trace => "TRACE",
    }
}

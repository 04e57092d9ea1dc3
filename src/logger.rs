//! Console logging macros. Every line carries a coloured level tag and a UTC wall clock
//! stamp with millisecond resolution, ticks being far shorter than a second.
//! `event!` is per-tick tracing and only prints when `LOG_FBW_EVENTS` is set at startup.

use chrono::Utc;
use std::fmt::Arguments;
use std::sync::LazyLock;

/// Environment variable enabling the `event!` tracing output.
pub const EVENT_LOG_ENV: &str = "LOG_FBW_EVENTS";

/// Read once, `event!` sits on the tick path.
static EVENTS_ENABLED: LazyLock<bool> = LazyLock::new(|| std::env::var_os(EVENT_LOG_ENV).is_some());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Log,
    Warn,
    Error,
    Fatal,
    Event,
}

impl Level {
    fn tag(self) -> &'static str {
        match self {
            Level::Info => "\x1b[32m[INFO] ",
            Level::Log => "\x1b[33m[LOG]  ",
            Level::Warn => "\x1b[35m[WARN] ",
            Level::Error => "\x1b[31m[ERROR]",
            Level::Fatal => "\x1b[1;31m[FATAL]",
            Level::Event => "\x1b[36m[EVENT]",
        }
    }
}

pub fn events_enabled() -> bool { *EVENTS_ENABLED }

/// Formats one log line.
pub fn line(level: Level, args: Arguments<'_>) -> String {
    format!("{}[{}]\x1b[0m {args}", level.tag(), Utc::now().format("%H:%M:%S%.3f"))
}

/// Errors go to stderr, everything else to stdout.
pub fn emit(level: Level, args: Arguments<'_>) {
    match level {
        Level::Error | Level::Fatal => eprintln!("{}", line(level, args)),
        _ => println!("{}", line(level, args)),
    }
}

#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Level::Info, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Level::Log, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Level::Warn, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {
        $crate::logger::emit($crate::logger::Level::Error, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! fatal {
    ($($arg:tt)*) => {
        panic!("{}", $crate::logger::line($crate::logger::Level::Fatal, format_args!($($arg)*)))
    };
}

#[macro_export]
macro_rules! event {
    ($($arg:tt)*) => {
        if $crate::logger::events_enabled() {
            $crate::logger::emit($crate::logger::Level::Event, format_args!($($arg)*))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_carries_tag_stamp_and_message() {
        let text = line(Level::Warn, format_args!("engine {} lever {:.1}", 2, 0.5));
        assert!(text.starts_with("\x1b[35m[WARN] ["));
        assert!(text.ends_with("\x1b[0m engine 2 lever 0.5"));
        // HH:MM:SS.mmm
        let stamp = &text[text.find("] [").map_or(0, |i| i + 3)..text.find("]\x1b[0m").unwrap_or(0)];
        assert_eq!(stamp.len(), 12, "{stamp}");
    }

    #[test]
    #[should_panic(expected = "[FATAL]")]
    fn test_fatal_panics_with_tag() {
        crate::fatal!("unrecoverable {}", 1);
    }
}

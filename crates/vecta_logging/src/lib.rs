use core::{
    fmt::{self, Arguments, Display, Write as _},
    str::FromStr,
    sync::atomic::{self, AtomicBool, AtomicU8},
    time::Duration,
};
use std::{io, time::Instant};

use once_cell::sync::{Lazy, OnceCell};
use parking_lot::Mutex;

static LOGGER: OnceCell<Logger> = OnceCell::new();
static START: Lazy<Instant> = Lazy::new(Instant::now);

/// Install the process-global logger.
///
/// The logger can only be set once, if a logger was already installed, the given logger is handed back.
pub fn set_logger(logger: Logger) -> Result<&'static Logger, Logger> {
    // Make sure the clock starts no later than the logger does
    Lazy::force(&START);

    let mut logger = Some(logger);
    let installed = LOGGER.get_or_init(|| logger.take().unwrap_or_default());
    match logger {
        Some(logger) => Err(logger),
        None => Ok(installed),
    }
}

/// Get the process-global logger, if one was installed.
///
/// All logging macros silently do nothing when no logger is installed.
pub fn get_logger() -> Option<&'static Logger> {
    LOGGER.get()
}

/// Time elapsed since logging was first used in this process
pub fn elapsed() -> Duration {
    START.elapsed()
}

/// Logging level
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    /// Severe error: will probably result in a crash
    Severe,
    /// Error: may not result in a crash
    Error,
    /// Warning: While not as bad as an error, it may point at misuse
    Warning,
    /// General info
    Info,
    /// Verbose info
    Verbose,
    /// Debug info (includes verbose info)
    Debug,
}

impl LogLevel {
    const fn tag(self) -> &'static str {
        match self {
            LogLevel::Severe  => "[SEVERE ]",
            LogLevel::Error   => "[ERROR  ]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Info    => "[INFO   ]",
            LogLevel::Verbose => "[VERBOSE]",
            LogLevel::Debug   => "[DEBUG  ]",
        }
    }

    const fn color(self) -> &'static str {
        match self {
            LogLevel::Severe  => "\x1B[1m\x1B[41m\x1B[30m",
            LogLevel::Error   => "\x1B[91m",
            LogLevel::Warning => "\x1B[93m",
            LogLevel::Info    => "\x1B[37m",
            LogLevel::Verbose => "\x1B[90m",
            LogLevel::Debug   => "\x1B[94m",
        }
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Error returned when a string does not name a [`LogLevel`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseLogLevelError(String);

impl Display for ParseLogLevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level '{}', expected one of: severe, error, warning, info, verbose, debug", self.0)
    }
}

impl std::error::Error for ParseLogLevelError {}

impl FromStr for LogLevel {
    type Err = ParseLogLevelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "severe"            => Ok(LogLevel::Severe),
            "error"             => Ok(LogLevel::Error),
            "warning" | "warn"  => Ok(LogLevel::Warning),
            "info"              => Ok(LogLevel::Info),
            "verbose"           => Ok(LogLevel::Verbose),
            "debug"             => Ok(LogLevel::Debug),
            _                   => Err(ParseLogLevelError(s.to_string())),
        }
    }
}

/// Log category
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogCategory {
    category     : &'static str,
    sub_category : Option<&'static str>
}

impl LogCategory {
    pub const fn new(name: &'static str) -> Self {
        Self { category: name, sub_category: None }
    }

    pub const fn new_with_sub(name: &'static str, sub_name: &'static str) -> Self {
        Self { category: name, sub_category: Some(sub_name) }
    }
}

impl Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.sub_category {
            Some(sub) => write!(f, "{}({sub})", self.category),
            None => f.write_str(self.category),
        }
    }
}

/// Additional info about where the log occured
#[derive(Clone, Copy, Debug)]
pub struct LogLocation {
    file : &'static str,
    line : u32,
    time : Duration,
}

impl LogLocation {
    /// Creates a new log location
    pub const fn new(file: &'static str, line: u32, time: Duration) -> Self {
        Self { file, line, time }
    }

    /// Get the file name where the log occured
    pub const fn file(&self) -> &str {
        self.file
    }

    /// Get the line where the log occurred
    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Get the time since startup when the log occurred
    pub const fn timestamp(&self) -> Duration {
        self.time
    }
}

struct LogLocationFormatter<'a> {
    loc   : &'a LogLocation,
    level : LogLevel
}

impl Display for LogLocationFormatter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            LogLevel::Severe |
            LogLevel::Error |
            LogLevel::Debug => write!(f, " ({}:{})", self.loc.file(), self.loc.line()),
            LogLevel::Warning |
            LogLevel::Info |
            LogLevel::Verbose => Ok(()),
        }
    }
}

struct TimestampFormatter(Duration);

impl Display for TimestampFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>6}.{:03}", self.0.as_secs(), self.0.subsec_millis())
    }
}

#[macro_export]
macro_rules! log_location {
    () => {
        $crate::LogLocation::new(file!(), line!(), $crate::elapsed())
    };
}

pub type LogWriter = Box<dyn io::Write + Send>;

struct LoggerState {
    writers:        [Option<LogWriter>; Self::MAX_WRITERS],
    cache:          String,
    always_flush:   bool,
    log_to_console: bool,
}

impl LoggerState {
    const MAX_WRITERS: usize = 8;
    const CACHE_FLUSH_LIMIT: usize = 4 * 1024;

    fn new() -> Self {
        Self {
            writers: Default::default(),
            cache: String::new(),
            always_flush: false,
            log_to_console: true,
        }
    }

    fn format_message(&mut self, fmt_args: Arguments) {
        if self.cache.capacity() == 0 {
            self.cache.reserve(Self::CACHE_FLUSH_LIMIT);
        }
        _ = self.cache.write_fmt(fmt_args);
    }

    fn flush_when_needed(&mut self) {
        if self.always_flush || self.cache.len() > Self::CACHE_FLUSH_LIMIT {
            self.flush();
        }
    }

    fn flush(&mut self) {
        if self.cache.is_empty() {
            return;
        }

        if self.log_to_console {
            let mut stderr = io::stderr().lock();
            _ = io::Write::write_all(&mut stderr, self.cache.as_bytes());
        }

        for writer in self.writers.iter_mut().flatten() {
            _ = writer.write_all(self.cache.as_bytes());
            _ = writer.flush();
        }
        self.cache.clear();
    }
}

/// Logger
///
/// Supports up to 8 writers (files, in-memory buffers, external tools), with an optional echo to stderr.
pub struct Logger {
    state: Mutex<LoggerState>,
    max_log_level: AtomicU8,
    use_color: AtomicBool,
}

impl Logger {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(LoggerState::new()),
            max_log_level: AtomicU8::new(LogLevel::Info as u8),
            use_color: AtomicBool::new(true),
        }
    }

    /// Set the maximum log level (severe == lowest, debug == highest)
    pub fn set_max_level(&self, level: LogLevel) {
        self.max_log_level.store(level as u8, atomic::Ordering::Relaxed)
    }

    /// Check if a message at `level` would be written
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.max_log_level.load(atomic::Ordering::Relaxed)
    }

    /// Set whether the logger should flush after each write
    pub fn set_always_flush(&self, always_flush: bool) {
        self.state.lock().always_flush = always_flush;
    }

    /// Set whether the level tag is wrapped in ANSI color codes
    pub fn set_use_color(&self, use_color: bool) {
        self.use_color.store(use_color, atomic::Ordering::Relaxed);
    }

    /// Set whether the logger should echo its output to stderr
    pub fn set_log_to_console(&self, log_to_console: bool) {
        let mut state = self.state.lock();

        // Flush first, so messages logged before the switch keep going where they were meant to go
        state.flush();
        state.log_to_console = log_to_console;
    }

    /// Add a writer.
    ///
    /// Returns `Ok(index)` if space was available. This index can be used to remove the writer later on.
    ///
    /// Otherwise returns an `Err` with the provided writer
    pub fn add_writer(&self, writer: LogWriter) -> Result<usize, LogWriter> {
        let mut state = self.state.lock();

        match state.writers.iter_mut().enumerate().find(|(_, slot)| slot.is_none()) {
            Some((id, slot)) => {
                *slot = Some(writer);
                Ok(id)
            },
            None => Err(writer),
        }
    }

    /// Remove a writer from the logger
    pub fn remove_writer(&self, index: usize) -> Option<LogWriter> {
        let mut state = self.state.lock();
        state.flush();
        state.writers.get_mut(index).and_then(Option::take)
    }

    /// Log a preformatted message
    pub fn log(&self, category: LogCategory, level: LogLevel, loc: LogLocation, text: &str) {
        self.log_fmt(category, level, loc, format_args!("{text}"));
    }

    pub fn log_fmt(&self, category: LogCategory, level: LogLevel, loc: LogLocation, format: Arguments) {
        if !self.is_enabled(level) {
            return;
        }

        let loc_formatter = LogLocationFormatter { loc: &loc, level };
        let timestamp = TimestampFormatter(loc.timestamp());
        let mut state = self.state.lock();
        if self.use_color.load(atomic::Ordering::Relaxed) {
            state.format_message(format_args!("{timestamp} {}{level}\x1B[0m [{category}]{loc_formatter}: ", level.color()));
        } else {
            state.format_message(format_args!("{timestamp} {level} [{category}]{loc_formatter}: "));
        }
        state.format_message(format);
        state.cache.push('\n');
        state.flush_when_needed();
    }

    pub fn flush(&self) {
        self.state.lock().flush()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.state.get_mut().flush();
    }
}

#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $($arg:tt)+) => {
        if let Some(logger) = $crate::get_logger() {
            logger.log_fmt($category, $level, $crate::log_location!(), format_args!($($arg)+));
        }
    };
}

#[macro_export]
macro_rules! log_severe {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Severe, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Error, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Warning, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Info, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Verbose, $($arg)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($category:expr, $($arg:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Debug, $($arg)+)
    };
}

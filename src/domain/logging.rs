use derive_more::Display;
use std::fmt;
use std::sync::OnceLock;

/// Log levels, ordered by severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display)]
pub enum LogLevel {
    #[display(fmt = "TRACE")]
    Trace = 0,
    #[display(fmt = "DEBUG")]
    Debug = 1,
    #[display(fmt = " INFO")]
    Info = 2,
    #[display(fmt = " WARN")]
    Warn = 3,
    #[display(fmt = "ERROR")]
    Error = 4,
}

/// Layer that emitted a log line, plus the unit inside it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum LogComponent {
    #[display(fmt = "DOM:{}", _0)]
    Domain(&'static str),
    #[display(fmt = "APP:{}", _0)]
    Application(&'static str),
    #[display(fmt = "INF:{}", _0)]
    Infrastructure(&'static str),
    #[display(fmt = "PRE:{}", _0)]
    Presentation(&'static str),
}

/// One formatted line on its way to a sink
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub timestamp: u64,
    pub level: LogLevel,
    pub component: LogComponent,
    pub message: String,
}

impl LogEntry {
    /// `[time] LEVEL component: message`
    pub fn render(&self) -> String {
        format!(
            "[{}] {} {}: {}",
            get_time_provider().format_timestamp(self.timestamp),
            self.level,
            self.component,
            self.message
        )
    }
}

pub trait TimeProvider: Send + Sync {
    fn current_timestamp(&self) -> u64;
    fn format_timestamp(&self, timestamp: u64) -> String;
}

pub trait Logger: Send + Sync {
    fn log(&self, entry: LogEntry);

    /// Entries below this level are dropped before the message is built
    fn min_level(&self) -> LogLevel {
        LogLevel::Trace
    }
}

static GLOBAL_LOGGER: OnceLock<Box<dyn Logger>> = OnceLock::new();
static GLOBAL_TIME_PROVIDER: OnceLock<Box<dyn TimeProvider>> = OnceLock::new();

/// First call wins; later calls are ignored.
pub fn init_logger(logger: Box<dyn Logger>) {
    let _ = GLOBAL_LOGGER.set(logger);
}

pub fn init_time_provider(time_provider: Box<dyn TimeProvider>) {
    let _ = GLOBAL_TIME_PROVIDER.set(time_provider);
}

pub fn get_logger() -> &'static dyn Logger {
    GLOBAL_LOGGER
        .get()
        .map(|logger| logger.as_ref())
        .unwrap_or(&NoOpLogger)
}

pub fn get_time_provider() -> &'static dyn TimeProvider {
    GLOBAL_TIME_PROVIDER
        .get()
        .map(|provider| provider.as_ref())
        .unwrap_or(&SequenceTimeProvider)
}

/// Entry point of the `log_*!` macros. The message is only formatted when
/// the installed logger accepts `level`.
pub fn emit(level: LogLevel, component: LogComponent, args: fmt::Arguments<'_>) {
    let logger = get_logger();
    if level < logger.min_level() {
        return;
    }
    logger.log(LogEntry {
        timestamp: get_time_provider().current_timestamp(),
        level,
        component,
        message: args.to_string(),
    });
}

struct NoOpLogger;

impl Logger for NoOpLogger {
    fn log(&self, _entry: LogEntry) {}

    fn min_level(&self) -> LogLevel {
        LogLevel::Error
    }
}

/// Monotonic counter used until a real clock is installed (host tests)
struct SequenceTimeProvider;

impl TimeProvider for SequenceTimeProvider {
    fn current_timestamp(&self) -> u64 {
        use std::sync::atomic::{AtomicU64, Ordering};
        static COUNTER: AtomicU64 = AtomicU64::new(0);
        COUNTER.fetch_add(1, Ordering::SeqCst)
    }

    fn format_timestamp(&self, timestamp: u64) -> String {
        format!("{:06}", timestamp)
    }
}

#[macro_export]
macro_rules! log_debug {
    ($component:expr, $($arg:tt)*) => {
        #[cfg(debug_assertions)]
        {
            $crate::domain::logging::emit(
                $crate::domain::logging::LogLevel::Debug,
                $component,
                format_args!($($arg)*),
            );
        }
    };
}

#[macro_export]
macro_rules! log_info {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Info,
            $component,
            format_args!($($arg)*),
        );
    };
}

#[macro_export]
macro_rules! log_warn {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Warn,
            $component,
            format_args!($($arg)*),
        );
    };
}

#[macro_export]
macro_rules! log_error {
    ($component:expr, $($arg:tt)*) => {
        $crate::domain::logging::emit(
            $crate::domain::logging::LogLevel::Error,
            $component,
            format_args!($($arg)*),
        );
    };
}

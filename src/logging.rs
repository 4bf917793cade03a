use log::LevelFilter;

/// Verbosity levels, from silent to everything
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Nothing = 0,
    User = 1,
    Error = 2,
    Warning = 3,
    Info = 4,
    Debug = 5,
    All = 6,
}

impl LogLevel {
    /// Create a LogLevel from an integer
    pub fn from_i32(level: i32) -> Self {
        match level {
            0 => LogLevel::Nothing,
            1 => LogLevel::User,
            2 => LogLevel::Error,
            3 => LogLevel::Warning,
            4 => LogLevel::Info,
            5 => LogLevel::Debug,
            6 => LogLevel::All,
            _ => LogLevel::Info,
        }
    }

    pub fn as_i32(&self) -> i32 {
        *self as i32
    }

    /// Map `-v` occurrences onto a level; warnings are shown by default.
    pub fn from_verbosity(count: u8) -> Self {
        let level = LogLevel::Warning.as_i32() + count as i32;
        Self::from_i32(level.min(LogLevel::All.as_i32()))
    }

    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Nothing => LevelFilter::Off,
            LogLevel::User | LogLevel::Error => LevelFilter::Error,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::All => LevelFilter::Trace,
        }
    }
}

/// Environment variable whose filter directives override the `-v` level.
pub const LOG_ENV: &str = "IMAGIX_LOG";

fn builder(level: LogLevel) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level.to_level_filter())
        .parse_env(env_logger::Env::default().filter(LOG_ENV));
    builder
}

/// Install the stderr logger. Fails if a logger is already installed.
pub fn init(level: LogLevel) -> Result<(), log::SetLoggerError> {
    builder(level).try_init()
}

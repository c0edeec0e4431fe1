//! Driver configuration
//!
//! Log levels per pipeline stage and the environment overrides the `tally`
//! binary honours.

use std::str::FromStr;

use tracing::Level;

use crate::logging::LogFormat;

/// Environment variable holding the global log level.
pub const LOG_ENV: &str = "TALLY_LOG";

pub const LEXER_TARGET: &str = "tally::lexer";
pub const PARSER_TARGET: &str = "tally::parser";
pub const DRIVER_TARGET: &str = "tally::driver";

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub global: Level,
    pub lexer: Option<Level>,
    pub parser: Option<Level>,
    pub driver: Option<Level>,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            global: Level::WARN,
            lexer: None,
            parser: None,
            driver: None,
            format: LogFormat::Compact,
        }
    }
}

impl LogConfig {
    /// Default config with the global level taken from `TALLY_LOG`, if set
    /// to something parseable.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(level) = std::env::var(LOG_ENV)
            .ok()
            .and_then(|value| parse_level(&value))
        {
            config.global = level;
        }
        config
    }

    /// Get log level for a specific target
    pub fn level_for(&self, target: &str) -> Level {
        match target {
            LEXER_TARGET => self.lexer.unwrap_or(self.global),
            PARSER_TARGET => self.parser.unwrap_or(self.global),
            DRIVER_TARGET => self.driver.unwrap_or(self.global),
            _ => self.global,
        }
    }
}

/// Parses a level name like `debug` or `WARN`.
pub fn parse_level(value: &str) -> Option<Level> {
    Level::from_str(value.trim()).ok()
}

/// Whether diagnostics should be colored, given the `--no-color` flag.
pub fn color_enabled(no_color: bool) -> bool {
    !no_color && std::env::var_os("NO_COLOR").is_none()
}

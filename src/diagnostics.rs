//! # Diagnostic Sink
//!
//! Leveled, human-readable messages about token issuance. The sink is injected
//! into the issuer; nothing in this crate logs through a global.
//!
//! Levels, most to least important: [`LogLevel::Event`], [`LogLevel::Error`],
//! [`LogLevel::Info`], [`LogLevel::Debug`]. A sink configured with a threshold
//! drops every message less important than it; [`LogLevel::None`] drops all.

use std::fmt;
use std::str::FromStr;

use crate::error::SasTokenError;

/// Message verbosity, ordered by ascending verbosity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    None,
    Event,
    Error,
    #[default]
    Info,
    Debug,
}

impl LogLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            LogLevel::None => "none",
            LogLevel::Event => "event",
            LogLevel::Error => "error",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
        }
    }

    /// Would a sink with threshold `self` emit a message at `level`?
    #[inline]
    pub fn admits(self, level: LogLevel) -> bool {
        level != LogLevel::None && level <= self
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = SasTokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "none" | "off" => Ok(LogLevel::None),
            "event" => Ok(LogLevel::Event),
            "error" => Ok(LogLevel::Error),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            other => Err(SasTokenError::Config(format!("unknown log level: {other}"))),
        }
    }
}

/// Receiver of issuer diagnostics.
pub trait DiagnosticSink {
    fn log(&self, level: LogLevel, message: &str);

    fn event(&self, message: &str) {
        self.log(LogLevel::Event, message);
    }

    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &S {
    #[inline]
    fn log(&self, level: LogLevel, message: &str) {
        (**self).log(level, message);
    }
}

/// Forwards admitted messages to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink {
    threshold: LogLevel,
}

impl TracingSink {
    pub const fn new(threshold: LogLevel) -> Self {
        Self { threshold }
    }

    pub const fn threshold(&self) -> LogLevel {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: LogLevel) {
        self.threshold = threshold;
        tracing::info!(threshold = %threshold, "diagnostic threshold changed");
    }
}

impl DiagnosticSink for TracingSink {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.threshold.admits(level) {
            return;
        }
        match level {
            LogLevel::Event => tracing::info!(kind = "event", "{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Info => tracing::info!(kind = "info", "{message}"),
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::None => {}
        }
    }
}

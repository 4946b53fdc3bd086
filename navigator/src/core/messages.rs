//! Two-tier diagnostics produced by a post-processing pass.
//!
//! - [`LogMessage`]: informational trace, never halts anything.
//! - [`ExitMessage`]: the configuration is invalid. The engine only collects
//!   these; the caller decides to abort once the whole pass has run.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Debug,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogMessage {
    pub level: LogLevel,
    pub message: String,
}

/// Whether an exit message is the complaint itself or a remediation hint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExitPrefix {
    #[default]
    Error,
    Hint,
}

impl ExitPrefix {
    fn label(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::Hint => "HINT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExitMessage {
    pub message: String,
    pub prefix: ExitPrefix,
}

impl ExitMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            prefix: ExitPrefix::Error,
        }
    }

    pub fn hint(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            prefix: ExitPrefix::Hint,
        }
    }

    pub fn is_hint(&self) -> bool {
        self.prefix == ExitPrefix::Hint
    }
}

impl fmt::Display for ExitMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]: {}", self.prefix.label(), self.message)
    }
}

/// Log and exit messages accumulated by one rule or a whole pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics {
    pub messages: Vec<LogMessage>,
    pub exit_messages: Vec<ExitMessage>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn log(&mut self, level: LogLevel, message: impl Into<String>) {
        self.messages.push(LogMessage {
            level,
            message: message.into(),
        });
    }

    pub fn debug(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(LogLevel::Error, message);
    }

    pub fn exit(&mut self, message: impl Into<String>) {
        self.exit_messages.push(ExitMessage::new(message));
    }

    pub fn hint(&mut self, message: impl Into<String>) {
        self.exit_messages.push(ExitMessage::hint(message));
    }

    /// Append another set of diagnostics, preserving order.
    pub fn extend(&mut self, other: Diagnostics) {
        self.messages.extend(other.messages);
        self.exit_messages.extend(other.exit_messages);
    }

    /// True when any exit message was produced; the caller must abort.
    pub fn is_fatal(&self) -> bool {
        !self.exit_messages.is_empty()
    }

    /// Exit messages that are complaints rather than hints.
    pub fn errors(&self) -> impl Iterator<Item = &ExitMessage> {
        self.exit_messages.iter().filter(|msg| !msg.is_hint())
    }

    pub fn hints(&self) -> impl Iterator<Item = &ExitMessage> {
        self.exit_messages.iter().filter(|msg| msg.is_hint())
    }
}

//! Game output logger
//!
//! All output of the command loop goes through `GameLogger`. Lines carry a
//! verbosity level and are either printed or kept in memory, never both.

use serde::{Deserialize, Serialize};
use std::cell::{Ref, RefCell};

/// How much the command loop prints
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub enum VerbosityLevel {
    /// Nothing at all
    Silent = 0,
    /// Echoed input, status blocks, help and errors
    Minimal = 1,
    /// Plus game start and game over notices
    #[default]
    Normal = 2,
    /// Plus a line for every draw, play, hint and discard
    Verbose = 3,
}

impl std::str::FromStr for VerbosityLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityLevel::Silent),
            "minimal" | "1" => Ok(VerbosityLevel::Minimal),
            "normal" | "2" => Ok(VerbosityLevel::Normal),
            "verbose" | "3" => Ok(VerbosityLevel::Verbose),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

/// Shape of the status reports
///
/// In `Json` mode only `Minimal` lines (status and error objects) are kept;
/// notices and narration are plain text and would break the stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputFormat {
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Where emitted lines end up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OutputMode {
    #[default]
    Stdout,
    /// Kept in memory for `logs`/`transcript`; nothing is printed
    Memory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: VerbosityLevel,
    pub message: String,
}

impl LogEntry {
    /// The line as printed; narration is indented by two spaces
    pub fn rendered(&self) -> String {
        if self.level == VerbosityLevel::Verbose {
            format!("  {}", self.message)
        } else {
            self.message.clone()
        }
    }
}

pub struct GameLogger {
    verbosity: VerbosityLevel,
    format: OutputFormat,
    mode: OutputMode,
    captured: RefCell<Vec<LogEntry>>,
}

impl GameLogger {
    /// Logger printing to stdout
    pub fn new(verbosity: VerbosityLevel, format: OutputFormat) -> Self {
        GameLogger {
            verbosity,
            format,
            mode: OutputMode::Stdout,
            captured: RefCell::new(Vec::new()),
        }
    }

    /// Same logger, but keeping lines in memory instead of printing them
    pub fn in_memory(mut self) -> Self {
        self.mode = OutputMode::Memory;
        self
    }

    pub fn verbosity(&self) -> VerbosityLevel {
        self.verbosity
    }

    pub fn output_format(&self) -> OutputFormat {
        self.format
    }

    pub fn output_mode(&self) -> OutputMode {
        self.mode
    }

    /// Lines kept so far (always empty when printing to stdout)
    pub fn logs(&self) -> Ref<'_, [LogEntry]> {
        Ref::map(self.captured.borrow(), |entries| entries.as_slice())
    }

    /// Kept lines exactly as they would have been printed
    pub fn transcript(&self) -> String {
        self.captured
            .borrow()
            .iter()
            .map(|entry| entry.rendered() + "\n")
            .collect()
    }

    fn accepts(&self, level: VerbosityLevel) -> bool {
        level <= self.verbosity
            && (self.format == OutputFormat::Text || level <= VerbosityLevel::Minimal)
    }

    fn emit(&self, level: VerbosityLevel, message: &str) {
        if !self.accepts(level) {
            return;
        }
        let entry = LogEntry {
            level,
            message: message.to_string(),
        };
        match self.mode {
            OutputMode::Stdout => println!("{}", entry.rendered()),
            OutputMode::Memory => self.captured.borrow_mut().push(entry),
        }
    }

    /// Echo, status, help and errors
    #[inline]
    pub fn minimal(&self, message: &str) {
        self.emit(VerbosityLevel::Minimal, message);
    }

    /// Game start and game over notices
    #[inline]
    pub fn normal(&self, message: &str) {
        self.emit(VerbosityLevel::Normal, message);
    }

    /// Turn narration
    #[inline]
    pub fn verbose(&self, message: &str) {
        self.emit(VerbosityLevel::Verbose, message);
    }
}

impl std::fmt::Debug for GameLogger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameLogger")
            .field("verbosity", &self.verbosity)
            .field("format", &self.format)
            .field("mode", &self.mode)
            .field("captured", &self.captured.borrow().len())
            .finish()
    }
}

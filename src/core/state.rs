//! Result states and their plugin exit codes.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::error::NagkitError;

/// Severity of a single evaluation result.
///
/// Ordered by significance: `Info < Ok < Warning < Critical < Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum State {
    /// Informational only, never raises the overall severity
    Info,
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl State {
    /// Process exit code defined by the plugin protocol.
    pub fn exit_code(&self) -> i32 {
        match self {
            State::Info | State::Ok => 0,
            State::Warning => 1,
            State::Critical => 2,
            State::Unknown => 3,
        }
    }

    /// Rank used when sorting results by significance.
    pub fn severity(&self) -> u8 {
        match self {
            State::Info => 0,
            State::Ok => 1,
            State::Warning => 2,
            State::Critical => 3,
            State::Unknown => 4,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            State::Info => "info",
            State::Ok => "ok",
            State::Warning => "warning",
            State::Critical => "critical",
            State::Unknown => "unknown",
        }
    }

    /// State as reported to the supervisor. Info has no protocol word of its own.
    pub fn reported(&self) -> State {
        match self {
            State::Info => State::Ok,
            other => *other,
        }
    }

    /// Whether this state should be summarized as a problem.
    pub fn is_problem(&self) -> bool {
        matches!(self, State::Warning | State::Critical | State::Unknown)
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        self.severity().cmp(&other.severity())
    }
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

impl FromStr for State {
    type Err = NagkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "info" => Ok(State::Info),
            "ok" => Ok(State::Ok),
            "warning" | "warn" => Ok(State::Warning),
            "critical" | "crit" => Ok(State::Critical),
            "unknown" => Ok(State::Unknown),
            other => Err(NagkitError::other(format!("unknown state [{}]", other))),
        }
    }
}

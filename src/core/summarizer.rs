//! Human-readable summaries of a check's results.

use super::check::Check;
use super::state::State;

/// Text shown when a check produced no results at all.
pub const NO_RESULTS: &str = "No check results";

/// Turns the ranked results of a check into summary text.
pub trait Summarizer {
    /// Summary used when the overall state is OK.
    fn ok(&self, check: &Check) -> String;

    /// Summary used when the overall state is a problem.
    fn problem(&self, check: &Check) -> String;

    /// Extra lines printed in verbose mode.
    fn verbose(&self, check: &Check) -> Vec<String>;

    fn empty(&self) -> String {
        NO_RESULTS.to_string()
    }
}

/// Describes the most significant result; verbose mode lists every non-OK result.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicSummarizer;

impl BasicSummarizer {
    pub fn new() -> Self {
        Self
    }

    fn most_significant(&self, check: &Check) -> String {
        check
            .results()
            .most_significant()
            .map(|result| result.describe())
            .unwrap_or_else(|| self.empty())
    }
}

impl Summarizer for BasicSummarizer {
    fn ok(&self, check: &Check) -> String {
        self.most_significant(check)
    }

    fn problem(&self, check: &Check) -> String {
        self.most_significant(check)
    }

    fn verbose(&self, check: &Check) -> Vec<String> {
        check
            .results()
            .iter()
            .filter_map(|result| match result.state() {
                None => Some(format!("info: {}", result)),
                Some(State::Ok) => None,
                Some(state) => Some(format!("{}: {}", state.description(), result)),
            })
            .collect()
    }
}

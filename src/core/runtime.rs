//! Runs a check and renders plugin output.
//!
//! Output layout, one `\n`-terminated line each:
//!
//! ```text
//! [NAME ]STATE[ - summary][ | perf perf ...]
//! verbose lines (verbose mode only)
//! warnings
//! ```

use std::io::{self, Write};

use super::check::Check;
use super::warning::WarningCollection;

/// Characters that would corrupt the plugin protocol.
const ILLEGAL_CHARACTERS: &[char] = &['|'];

/// Rendered output of a check together with the process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub exit_code: i32,
    pub output: String,
}

impl Report {
    pub fn print_and_exit(self) -> ! {
        print!("{}", self.output);
        let _ = io::stdout().flush();
        std::process::exit(self.exit_code)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Runtime {
    verbose: bool,
}

impl Runtime {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Run `check` and render its output.
    pub fn execute(&self, check: &mut Check) -> Report {
        let mut warnings = WarningCollection::new();
        check.run(&mut warnings);
        self.render(check, &warnings)
    }

    /// Render a check that already ran.
    pub fn render(&self, check: &Check, warnings: &WarningCollection) -> Report {
        let state = check.state().reported();
        let mut sanitizer = Sanitizer::default();

        let mut status = Vec::new();
        if !check.name().is_empty() {
            status.push(check.name().to_uppercase());
        }
        status.push(state.description().to_uppercase());
        let summary = check.summary();
        let summary = summary.trim();
        if !summary.is_empty() {
            status.push(format!("- {}", summary));
        }

        let mut first_line = sanitizer.clean(&status.join(" "));
        let fields: Vec<String> = check
            .perf_data()
            .iter()
            .map(|perf| sanitizer.clean(&perf.render()))
            .collect();
        if !fields.is_empty() {
            first_line.push_str(" | ");
            first_line.push_str(&fields.join(" "));
        }

        let mut lines = vec![first_line];
        if self.verbose {
            for line in check.verbose_summary() {
                lines.push(sanitizer.clean(&line));
            }
        }

        let sanitizer_warnings = sanitizer.into_warnings();
        lines.extend(
            warnings
                .iter()
                .chain(sanitizer_warnings.iter().map(String::as_str))
                .map(|warning| strip_illegal(warning)),
        );

        log::debug!(
            "check [{}] exits with {} ({})",
            check.name(),
            state.exit_code(),
            state
        );

        let mut output = lines.join("\n");
        output.push('\n');
        Report {
            exit_code: state.exit_code(),
            output,
        }
    }
}

#[derive(Debug, Default)]
struct Sanitizer {
    warnings: Vec<String>,
}

impl Sanitizer {
    fn clean(&mut self, text: &str) -> String {
        if !text.contains(ILLEGAL_CHARACTERS) {
            return text.to_string();
        }

        self.warnings
            .push(format!("stripped illegal character from string [{}]", text));
        strip_illegal(text)
    }

    fn into_warnings(self) -> Vec<String> {
        self.warnings
    }
}

fn strip_illegal(text: &str) -> String {
    text.replace(ILLEGAL_CHARACTERS, "")
}

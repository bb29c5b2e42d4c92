//! Diagnostic messages collected during a check run.
//!
//! Warnings are surfaced at the end of the plugin output and never affect the state.

/// Ordered list of free-form warning messages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WarningCollection {
    warnings: Vec<String>,
}

impl WarningCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add<S: Into<String>>(&mut self, warning: S) {
        self.warnings.push(warning.into());
    }

    pub fn get(&self) -> &[String] {
        &self.warnings
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.warnings.iter().map(String::as_str)
    }
}

impl Extend<String> for WarningCollection {
    fn extend<T: IntoIterator<Item = String>>(&mut self, iter: T) {
        self.warnings.extend(iter);
    }
}

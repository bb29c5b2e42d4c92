//! The measurement side of a check.

use super::metric::Metric;
use super::warning::WarningCollection;
use crate::error::Result;

/// Something that can be probed for metrics: a file, an API, the local system.
///
/// Probes run synchronously and without a time budget; an implementation that may
/// block must enforce its own timeout.
pub trait Resource {
    /// Label used to identify the resource in result text.
    fn label(&self) -> &str;

    /// Gather metrics. Diagnostics that should not change the state go to `warnings`.
    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>>;
}

/// A resource returning a fixed set of metrics.
///
/// Useful for checks whose values were computed up front, and in tests.
#[derive(Debug, Clone, Default)]
pub struct StaticResource {
    label: String,
    metrics: Vec<Metric>,
}

impl StaticResource {
    pub fn new<S: Into<String>>(label: S) -> Self {
        Self {
            label: label.into(),
            metrics: Vec::new(),
        }
    }

    pub fn with_metric(mut self, metric: Metric) -> Self {
        self.metrics.push(metric);
        self
    }

    pub fn with_metrics<I: IntoIterator<Item = Metric>>(mut self, metrics: I) -> Self {
        self.metrics.extend(metrics);
        self
    }
}

impl Resource for StaticResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, _warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        Ok(self.metrics.clone())
    }
}

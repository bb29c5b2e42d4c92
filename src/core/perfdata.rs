//! Performance data fields.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::bounds::{format_number, Bounds};
use super::metric::Metric;
use crate::error::{NagkitError, Result};

/// Characters that can not appear in a performance data label, even when quoted.
const ILLEGAL_LABEL_CHARS: &[char] = &['\'', '='];

static PLAIN_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").unwrap());

/// A metric together with its thresholds, rendered as one performance data field.
#[derive(Debug, Clone, PartialEq)]
pub struct PerfData {
    metric: Metric,
    warning: Option<Bounds>,
    critical: Option<Bounds>,
}

impl PerfData {
    /// Fails if the metric name contains `'` or `=`.
    pub fn new(metric: Metric, warning: Option<Bounds>, critical: Option<Bounds>) -> Result<Self> {
        if metric.name().contains(ILLEGAL_LABEL_CHARS) {
            return Err(NagkitError::invalid_perfdata(format!(
                "perfdata name [{}] contains invalid characters",
                metric.name()
            )));
        }

        Ok(Self {
            metric,
            warning,
            critical,
        })
    }

    pub fn metric(&self) -> &Metric {
        &self.metric
    }

    pub fn warning(&self) -> Option<&Bounds> {
        self.warning.as_ref()
    }

    pub fn critical(&self) -> Option<&Bounds> {
        self.critical.as_ref()
    }

    /// Render `label=value[unit];warn;crit;min;max` with trailing empty fields dropped.
    pub fn render(&self) -> String {
        let range_text = |bounds: Option<&Bounds>| bounds.map(Bounds::to_range_text).unwrap_or_default();

        let (min, max) = match self.metric.value_range() {
            Some(range) => (domain_min(range), domain_max(range)),
            None => (String::new(), String::new()),
        };

        let fields = [
            format!("{}={}", quote_label(self.metric.name()), self.metric.to_protocol_value()),
            range_text(self.warning.as_ref()),
            range_text(self.critical.as_ref()),
            min,
            max,
        ];

        fields.join(";").trim_end_matches(';').to_string()
    }
}

impl fmt::Display for PerfData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn quote_label(label: &str) -> String {
    if PLAIN_LABEL.is_match(label) {
        label.to_string()
    } else {
        format!("'{}'", label)
    }
}

fn domain_min(range: &Bounds) -> String {
    match range.lower() {
        Some(lower) if lower.is_finite() && lower != 0.0 => format_number(lower),
        _ => String::new(),
    }
}

fn domain_max(range: &Bounds) -> String {
    match range.upper() {
        Some(upper) if upper.is_finite() => format_number(upper),
        _ => String::new(),
    }
}

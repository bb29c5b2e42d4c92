//! Typed measurements produced by resources.

use std::fmt;

use super::bounds::{format_number, Bounds};
use crate::error::{NagkitError, Result};

/// Protocol token for a value that could not be determined.
pub const UNKNOWN_VALUE: &str = "U";

/// Value carried by a [`Metric`].
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    Numeric(f64),
    Text(String),
}

/// A named measurement bound to the context that evaluates it.
///
/// The context name defaults to the metric name. Numeric metrics may declare the legal
/// domain of their value through a non-inverted [`Bounds`].
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    name: String,
    unit: String,
    value: MetricValue,
    value_range: Option<Bounds>,
    context: String,
}

impl Metric {
    /// Create a numeric metric. Fails if `name` is empty.
    pub fn numeric<S: Into<String>>(name: S, value: f64) -> Result<Self> {
        Self::build(name.into(), MetricValue::Numeric(value))
    }

    /// Create a string metric. Fails if `name` is empty.
    pub fn text<S: Into<String>, V: Into<String>>(name: S, value: V) -> Result<Self> {
        Self::build(name.into(), MetricValue::Text(value.into()))
    }

    fn build(name: String, value: MetricValue) -> Result<Self> {
        if name.is_empty() {
            return Err(NagkitError::invalid_metric("metric name must not be empty"));
        }

        Ok(Self {
            context: name.clone(),
            name,
            unit: String::new(),
            value,
            value_range: None,
        })
    }

    /// Set the unit appended to the value in protocol output.
    pub fn with_unit<S: Into<String>>(mut self, unit: S) -> Self {
        self.unit = unit.into();
        self
    }

    /// Route this metric to the context registered under `context`.
    ///
    /// An empty name keeps the default (the metric name).
    pub fn with_context<S: Into<String>>(mut self, context: S) -> Self {
        let context = context.into();
        if !context.is_empty() {
            self.context = context;
        }
        self
    }

    /// Declare the legal domain of the value. Inverted bounds are rejected.
    pub fn with_value_range(mut self, range: Bounds) -> Result<Self> {
        if range.is_inverted() {
            return Err(NagkitError::invalid_metric(format!(
                "value range of metric [{}] must not be inverted",
                self.name
            )));
        }

        self.value_range = Some(range);
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn unit(&self) -> &str {
        &self.unit
    }

    pub fn value(&self) -> &MetricValue {
        &self.value
    }

    pub fn value_range(&self) -> Option<&Bounds> {
        self.value_range.as_ref()
    }

    pub fn context_name(&self) -> &str {
        &self.context
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self.value {
            MetricValue::Numeric(value) => Some(value),
            MetricValue::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            MetricValue::Text(value) => Some(value),
            MetricValue::Numeric(_) => None,
        }
    }

    /// Short name of the value type, used in type mismatch hints.
    pub fn kind(&self) -> &'static str {
        match self.value {
            MetricValue::Numeric(_) => "numeric",
            MetricValue::Text(_) => "string",
        }
    }

    /// The bare value without unit.
    pub fn value_text(&self) -> String {
        match &self.value {
            MetricValue::Numeric(value) => format_number(*value),
            MetricValue::Text(value) => value.clone(),
        }
    }

    /// The value as written in protocol output: value and unit, or `U` for NaN.
    pub fn to_protocol_value(&self) -> String {
        match &self.value {
            MetricValue::Numeric(value) if value.is_nan() => UNKNOWN_VALUE.to_string(),
            MetricValue::Numeric(value) => format!("{}{}", format_number(*value), self.unit),
            MetricValue::Text(value) => value.clone(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_protocol_value())
    }
}

//! Evaluation policies.
//!
//! A context is registered on a check under a name; every metric carrying that context
//! name is evaluated by it. Evaluation yields an [`EvalResult`] and, optionally, a
//! [`PerfData`] field for the plugin output.

mod delta;
mod scalar;
mod string;

pub use delta::{DeltaContext, PreviousValue, SharedPrevious};
pub use scalar::ScalarContext;
pub use string::{StringInfoContext, StringMatchContext};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use super::metric::Metric;
use super::perfdata::PerfData;
use super::resource::Resource;
use super::result::EvalResult;
use super::state::State;
use crate::error::Result;

/// Placeholders understood by [`render_description`].
static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{(name|value_unit|value|unit)\}").unwrap());

/// Common contract of every evaluation policy.
pub trait Context {
    fn name(&self) -> &str;

    /// Human-readable description of `metric`, used in status and verbose lines.
    fn describe(&self, metric: &Metric) -> String;

    /// Judge `metric`. Contexts may keep state between calls (see [`DeltaContext`]).
    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult;

    /// Performance data for `metric`, if this context emits any.
    fn performance(&self, metric: &Metric, resource: &dyn Resource) -> Result<Option<PerfData>>;
}

/// Fill a description template.
///
/// Supported placeholders are `{name}`, `{value}`, `{unit}` and `{value_unit}`;
/// anything else is copied verbatim.
pub fn render_description(template: &str, metric: &Metric) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| match &caps[1] {
            "name" => metric.name().to_string(),
            "value" => metric.value_text(),
            "unit" => metric.unit().to_string(),
            _ => metric.to_protocol_value(),
        })
        .into_owned()
}

/// Hint attached to results of metrics a context can not handle.
pub(crate) fn type_mismatch_hint(context_kind: &str, metric: &Metric) -> String {
    format!(
        "{} context can not process metric of type [{}]",
        context_kind,
        metric.kind()
    )
}

/// A context that accepts every metric as OK and emits no performance data.
#[derive(Debug, Clone)]
pub struct BaseContext {
    name: String,
    format: String,
}

impl BaseContext {
    pub fn new<N: Into<String>, F: Into<String>>(name: N, format: F) -> Self {
        Self {
            name: name.into(),
            format: format.into(),
        }
    }
}

impl Context for BaseContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self, metric: &Metric) -> String {
        render_description(&self.format, metric)
    }

    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult {
        EvalResult::builder()
            .state(State::Ok)
            .metric(metric.clone())
            .context(&*self)
            .resource(resource)
            .build()
    }

    fn performance(&self, _metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        Ok(None)
    }
}

use super::{render_description, type_mismatch_hint, Context};
use crate::core::bounds::Bounds;
use crate::core::metric::Metric;
use crate::core::perfdata::PerfData;
use crate::core::resource::Resource;
use crate::core::result::EvalResult;
use crate::core::state::State;
use crate::error::Result;

pub(crate) const DEFAULT_SCALAR_FORMAT: &str = "{name} is {value_unit}";

/// Compares numeric metrics against optional warning and critical ranges.
///
/// A value that does not match the critical range is critical; otherwise a value that
/// does not match the warning range is a warning. Missing ranges never fail.
#[derive(Debug, Clone)]
pub struct ScalarContext {
    name: String,
    format: String,
    warning: Option<Bounds>,
    critical: Option<Bounds>,
}

impl ScalarContext {
    pub fn new<S: Into<String>>(name: S, warning: Option<Bounds>, critical: Option<Bounds>) -> Self {
        Self {
            name: name.into(),
            format: DEFAULT_SCALAR_FORMAT.to_string(),
            warning,
            critical,
        }
    }

    /// Replace the description template (see [`render_description`]).
    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = format.into();
        self
    }

    pub fn warning(&self) -> Option<&Bounds> {
        self.warning.as_ref()
    }

    pub fn critical(&self) -> Option<&Bounds> {
        self.critical.as_ref()
    }

    /// State of `value` and the hint explaining it.
    pub(crate) fn judge(&self, value: f64) -> (State, String) {
        if let Some(critical) = self.critical.as_ref().filter(|b| !b.matches(value)) {
            return (State::Critical, critical.violation_hint());
        }
        if let Some(warning) = self.warning.as_ref().filter(|b| !b.matches(value)) {
            return (State::Warning, warning.violation_hint());
        }

        (State::Ok, String::new())
    }
}

impl Context for ScalarContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self, metric: &Metric) -> String {
        render_description(&self.format, metric)
    }

    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult {
        let builder = EvalResult::builder()
            .metric(metric.clone())
            .context(&*self)
            .resource(resource);

        let Some(value) = metric.as_f64() else {
            return builder
                .state(State::Unknown)
                .hint(type_mismatch_hint("scalar", metric))
                .build();
        };

        let (state, hint) = self.judge(value);
        builder.state(state).hint(hint).build()
    }

    /// String metrics were already rejected by `evaluate` and emit no field.
    fn performance(&self, metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        if metric.as_f64().is_none() {
            return Ok(None);
        }
        PerfData::new(metric.clone(), self.warning, self.critical).map(Some)
    }
}

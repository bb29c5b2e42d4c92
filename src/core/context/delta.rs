use std::cell::Cell;
use std::rc::Rc;

use super::scalar::ScalarContext;
use super::{type_mismatch_hint, Context};
use crate::core::bounds::Bounds;
use crate::core::metric::Metric;
use crate::core::perfdata::PerfData;
use crate::core::resource::Resource;
use crate::core::result::EvalResult;
use crate::core::state::State;
use crate::error::Result;

/// Read-then-write access to the previous measurement of a delta context.
///
/// Each [`DeltaContext::evaluate`] call invokes `replace` exactly once. Access is
/// single-threaded; callers that persist the value across processes must serialize
/// that themselves.
pub trait PreviousValue {
    /// Return the previous value and store `current` in its place.
    fn replace(&mut self, current: f64) -> f64;
}

impl<F: FnMut(f64) -> f64> PreviousValue for F {
    fn replace(&mut self, current: f64) -> f64 {
        self(current)
    }
}

/// A previous-value cell shared between the caller and a [`DeltaContext`].
///
/// Clones refer to the same cell, so the caller can read the updated value back after
/// the check ran. An empty cell treats the first sample as its own predecessor.
#[derive(Debug, Clone, Default)]
pub struct SharedPrevious(Rc<Cell<Option<f64>>>);

impl SharedPrevious {
    pub fn new(initial: Option<f64>) -> Self {
        Self(Rc::new(Cell::new(initial)))
    }

    pub fn get(&self) -> Option<f64> {
        self.0.get()
    }
}

impl PreviousValue for SharedPrevious {
    fn replace(&mut self, current: f64) -> f64 {
        self.0.replace(Some(current)).unwrap_or(current)
    }
}

/// Evaluates the change of a numeric metric since the previous measurement.
///
/// The delta is judged against the same warning and critical ranges a
/// [`ScalarContext`] would use, and reported as a metric named `<name>_delta`.
pub struct DeltaContext {
    scalar: ScalarContext,
    previous: Option<Box<dyn PreviousValue>>,
    last_delta: Option<(String, Metric)>,
}

impl DeltaContext {
    /// Without a previous-value cell the previous value is taken as 0.
    pub fn new<S: Into<String>>(name: S, warning: Option<Bounds>, critical: Option<Bounds>) -> Self {
        Self {
            scalar: ScalarContext::new(name, warning, critical),
            previous: None,
            last_delta: None,
        }
    }

    pub fn with_previous<P: PreviousValue + 'static>(mut self, previous: P) -> Self {
        self.previous = Some(Box::new(previous));
        self
    }

    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.scalar = self.scalar.with_format(format);
        self
    }

    fn delta_metric(metric: &Metric, delta: f64) -> Result<Metric> {
        Ok(Metric::numeric(format!("{}_delta", metric.name()), delta)?
            .with_context(metric.context_name()))
    }
}

impl Context for DeltaContext {
    fn name(&self) -> &str {
        self.scalar.name()
    }

    fn describe(&self, metric: &Metric) -> String {
        self.scalar.describe(metric)
    }

    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult {
        let Some(current) = metric.as_f64() else {
            return EvalResult::builder()
                .state(State::Unknown)
                .metric(metric.clone())
                .context(&*self)
                .resource(resource)
                .hint(type_mismatch_hint("delta", metric))
                .build();
        };

        let previous = match self.previous.as_mut() {
            Some(cell) => cell.replace(current),
            None => 0.0,
        };
        let delta = current - previous;
        log::debug!(
            "delta of [{}]: {} - {} = {}",
            metric.name(),
            current,
            previous,
            delta
        );

        let delta_metric = match Self::delta_metric(metric, delta) {
            Ok(delta_metric) => delta_metric,
            Err(e) => {
                return EvalResult::builder()
                    .state(State::Unknown)
                    .metric(metric.clone())
                    .context(&*self)
                    .resource(resource)
                    .hint(e.to_string())
                    .build()
            }
        };
        self.last_delta = Some((metric.name().to_string(), delta_metric.clone()));

        let (state, hint) = self.scalar.judge(delta);
        EvalResult::builder()
            .state(state)
            .metric(delta_metric)
            .context(&*self)
            .resource(resource)
            .hint(hint)
            .build()
    }

    fn performance(&self, metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        if metric.as_f64().is_none() {
            return Ok(None);
        }

        let reported = match &self.last_delta {
            Some((source, delta_metric)) if source == metric.name() => delta_metric.clone(),
            _ => metric.clone(),
        };

        PerfData::new(reported, None, None).map(Some)
    }
}

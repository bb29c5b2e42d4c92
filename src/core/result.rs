//! Evaluation outcomes and their significance-ordered collection.

use std::fmt;

use super::context::Context;
use super::metric::Metric;
use super::resource::Resource;
use super::state::State;

/// Snapshot of the context that produced a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextRef {
    name: String,
    description: String,
}

impl ContextRef {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The context's description of the result metric.
    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Outcome of evaluating one metric, or of a failure that replaced the evaluation.
///
/// Every part is optional. A result without a state is purely informational.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EvalResult {
    state: Option<State>,
    metric: Option<Metric>,
    context: Option<ContextRef>,
    resource: Option<String>,
    hint: String,
}

impl EvalResult {
    pub fn builder<'a>() -> ResultBuilder<'a> {
        ResultBuilder::default()
    }

    pub fn state(&self) -> Option<State> {
        self.state
    }

    pub fn metric(&self) -> Option<&Metric> {
        self.metric.as_ref()
    }

    pub fn context(&self) -> Option<&ContextRef> {
        self.context.as_ref()
    }

    /// Label of the resource the metric came from.
    pub fn resource(&self) -> Option<&str> {
        self.resource.as_deref()
    }

    pub fn hint(&self) -> &str {
        &self.hint
    }

    /// Text used for both the status line and verbose lines.
    ///
    /// The context's description of the metric (falling back to the metric's protocol
    /// value), followed by the hint in parentheses.
    pub fn describe(&self) -> String {
        let mut description = self
            .context
            .as_ref()
            .filter(|_| self.metric.is_some())
            .map(|context| context.description.clone())
            .unwrap_or_default();

        if description.is_empty() {
            if let Some(metric) = &self.metric {
                description = metric.to_protocol_value();
            }
        }

        match (description.is_empty(), self.hint.is_empty()) {
            (false, false) => format!("{} ({})", description, self.hint),
            (true, false) => self.hint.clone(),
            _ => description,
        }
    }
}

impl fmt::Display for EvalResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

/// Composes an [`EvalResult`] from any subset of its parts.
#[derive(Default)]
pub struct ResultBuilder<'a> {
    state: Option<State>,
    metric: Option<Metric>,
    context: Option<&'a dyn Context>,
    resource: Option<String>,
    hint: String,
}

impl<'a> ResultBuilder<'a> {
    pub fn state(mut self, state: State) -> Self {
        self.state = Some(state);
        self
    }

    pub fn metric(mut self, metric: Metric) -> Self {
        self.metric = Some(metric);
        self
    }

    pub fn context(mut self, context: &'a dyn Context) -> Self {
        self.context = Some(context);
        self
    }

    pub fn resource(mut self, resource: &dyn Resource) -> Self {
        self.resource = Some(resource.label().to_string());
        self
    }

    pub fn resource_label<S: Into<String>>(mut self, label: S) -> Self {
        self.resource = Some(label.into());
        self
    }

    pub fn hint<S: Into<String>>(mut self, hint: S) -> Self {
        self.hint = hint.into();
        self
    }

    pub fn build(self) -> EvalResult {
        let context = self.context.map(|context| ContextRef {
            name: context.name().to_string(),
            description: self
                .metric
                .as_ref()
                .map(|metric| context.describe(metric))
                .unwrap_or_default(),
        });

        EvalResult {
            state: self.state,
            metric: self.metric,
            context,
            resource: self.resource,
            hint: self.hint,
        }
    }
}

/// Results ordered by descending significance.
///
/// Re-sorted (stably) after every insertion; results without a state sort last.
#[derive(Debug, Clone, Default)]
pub struct ResultCollection {
    results: Vec<EvalResult>,
}

impl ResultCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, result: EvalResult) {
        self.results.push(result);
        self.sort();
    }

    /// Add several results with a single re-sort.
    pub fn extend<I: IntoIterator<Item = EvalResult>>(&mut self, results: I) {
        self.results.extend(results);
        self.sort();
    }

    pub fn get(&self) -> &[EvalResult] {
        &self.results
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EvalResult> {
        self.results.iter()
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn most_significant(&self) -> Option<&EvalResult> {
        self.results.first()
    }

    pub fn most_significant_state(&self) -> Option<State> {
        self.most_significant().and_then(EvalResult::state)
    }

    /// First result (in significance order) whose metric has the given name.
    pub fn by_metric_name(&self, name: &str) -> Option<&EvalResult> {
        self.results
            .iter()
            .find(|result| result.metric().is_some_and(|metric| metric.name() == name))
    }

    pub fn metric_by_name(&self, name: &str) -> Option<&Metric> {
        self.by_metric_name(name).and_then(EvalResult::metric)
    }

    pub fn numeric_value(&self, name: &str) -> Option<f64> {
        self.metric_by_name(name).and_then(Metric::as_f64)
    }

    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.metric_by_name(name).and_then(Metric::as_str)
    }

    fn sort(&mut self) {
        // slice::sort_by is stable
        self.results
            .sort_by(|a, b| significance(b.state).cmp(&significance(a.state)));
    }
}

impl<'a> IntoIterator for &'a ResultCollection {
    type Item = &'a EvalResult;
    type IntoIter = std::slice::Iter<'a, EvalResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}

fn significance(state: Option<State>) -> i16 {
    state.map_or(-1, |state| i16::from(state.severity()))
}

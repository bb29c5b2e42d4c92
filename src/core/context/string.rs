use super::{render_description, type_mismatch_hint, Context};
use crate::core::metric::Metric;
use crate::core::perfdata::PerfData;
use crate::core::resource::Resource;
use crate::core::result::EvalResult;
use crate::core::state::State;
use crate::error::Result;

/// Reports a string metric for display without judging it.
///
/// Results carry [`State::Info`], which never raises the overall state.
#[derive(Debug, Clone)]
pub struct StringInfoContext {
    name: String,
    format: String,
}

impl StringInfoContext {
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            format: "{value}".to_string(),
        }
    }

    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = format.into();
        self
    }
}

impl Context for StringInfoContext {
    fn name(&self) -> &str {
        &self.name
    }

    fn describe(&self, metric: &Metric) -> String {
        render_description(&self.format, metric)
    }

    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult {
        EvalResult::builder()
            .state(State::Info)
            .metric(metric.clone())
            .context(&*self)
            .resource(resource)
            .build()
    }

    fn performance(&self, _metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        Ok(None)
    }
}

/// Compares a string metric case-insensitively against a list of accepted values.
///
/// An empty list accepts everything. A value outside the list yields the configured
/// problem state.
#[derive(Debug, Clone)]
pub struct StringMatchContext {
    name: String,
    format: String,
    problem_state: State,
    expected: Vec<String>,
}

impl StringMatchContext {
    pub fn new<S, I, V>(name: S, problem_state: State, expected: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = V>,
        V: AsRef<str>,
    {
        Self {
            name: name.into(),
            format: "{name} is {value}".to_string(),
            problem_state,
            expected: expected
                .into_iter()
                .map(|value| value.as_ref().to_lowercase())
                .collect(),
        }
    }

    pub fn with_format<S: Into<String>>(mut self, format: S) -> Self {
        self.format = format.into();
        self
    }

    pub fn expected(&self) -> &[String] {
        &self.expected
    }
}

impl Context for StringMatchContext {
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

        let Some(value) = metric.as_str() else {
            return builder
                .state(State::Unknown)
                .hint(type_mismatch_hint("string match", metric))
                .build();
        };

        let value = value.to_lowercase();
        if self.expected.is_empty() || self.expected.contains(&value) {
            return builder.state(State::Ok).build();
        }

        builder
            .state(self.problem_state)
            .hint(format!(
                "got [{}], expected [{}]",
                value,
                self.expected.join("],[")
            ))
            .build()
    }

    fn performance(&self, _metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        Ok(None)
    }
}

//! Orchestration of a single check run.
//!
//! A [`Check`] probes every attached resource, routes each metric to the context
//! registered under the metric's context name, and collects the results and
//! performance data. Failures along the way become UNKNOWN results instead of
//! aborting the run, so one broken resource never hides the others.

use std::collections::HashMap;

use serde_json::Value;

use super::context::Context;
use super::perfdata::PerfData;
use super::resource::Resource;
use super::result::{EvalResult, ResultCollection};
use super::state::State;
use super::summarizer::{BasicSummarizer, Summarizer};
use super::warning::WarningCollection;

pub struct Check {
    name: String,
    resources: Vec<Box<dyn Resource>>,
    contexts: HashMap<String, Box<dyn Context>>,
    results: ResultCollection,
    perf_data: Vec<PerfData>,
    meta: HashMap<String, Value>,
    summarizer: Box<dyn Summarizer>,
    runs: usize,
}

impl Check {
    /// Create a check using the [`BasicSummarizer`].
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self::with_summarizer(name, BasicSummarizer::new())
    }

    pub fn with_summarizer<S: Into<String>, M: Summarizer + 'static>(name: S, summarizer: M) -> Self {
        Self {
            name: name.into(),
            resources: Vec::new(),
            contexts: HashMap::new(),
            results: ResultCollection::new(),
            perf_data: Vec::new(),
            meta: HashMap::new(),
            summarizer: Box::new(summarizer),
            runs: 0,
        }
    }

    pub fn attach_resource<R: Resource + 'static>(&mut self, resource: R) -> &mut Self {
        self.resources.push(Box::new(resource));
        self
    }

    /// Register a context. A context with the same name replaces the previous one.
    pub fn attach_context<C: Context + 'static>(&mut self, context: C) -> &mut Self {
        self.contexts
            .insert(context.name().to_string(), Box::new(context));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn resources(&self) -> &[Box<dyn Resource>] {
        &self.resources
    }

    pub fn context(&self, name: &str) -> Option<&dyn Context> {
        self.contexts.get(name).map(|context| context.as_ref())
    }

    /// Names of the registered contexts, sorted.
    pub fn context_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.contexts.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn results(&self) -> &ResultCollection {
        &self.results
    }

    pub fn results_mut(&mut self) -> &mut ResultCollection {
        &mut self.results
    }

    /// Performance data, sorted by metric name once the check has run.
    pub fn perf_data(&self) -> &[PerfData] {
        &self.perf_data
    }

    pub fn set_meta<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.meta.insert(key.into(), value.into());
    }

    pub fn meta(&self, key: &str) -> Option<&Value> {
        self.meta.get(key)
    }

    /// Most significant state of all results, UNKNOWN if there is none.
    pub fn state(&self) -> State {
        self.results
            .most_significant_state()
            .unwrap_or(State::Unknown)
    }

    pub fn summary(&self) -> String {
        if self.results.is_empty() {
            self.summarizer.empty()
        } else if self.state().is_problem() {
            self.summarizer.problem(self)
        } else {
            self.summarizer.ok(self)
        }
    }

    pub fn verbose_summary(&self) -> Vec<String> {
        self.summarizer.verbose(self)
    }

    /// Probe all resources and evaluate their metrics.
    ///
    /// Intended to be called once; a second call appends another set of results.
    pub fn run(&mut self, warnings: &mut WarningCollection) {
        if self.runs > 0 {
            log::warn!("check [{}] is being run more than once", self.name);
        }
        self.runs += 1;

        let Self {
            resources,
            contexts,
            results,
            perf_data,
            ..
        } = &mut *self;

        for resource in resources.iter_mut() {
            evaluate_resource(resource.as_mut(), contexts, results, perf_data, warnings);
        }

        perf_data.sort_by(|a, b| a.metric().name().cmp(b.metric().name()));
        log::debug!(
            "check [{}] finished with {} results and {} perfdata fields",
            self.name,
            self.results.len(),
            self.perf_data.len()
        );
    }
}

fn evaluate_resource(
    resource: &mut dyn Resource,
    contexts: &mut HashMap<String, Box<dyn Context>>,
    results: &mut ResultCollection,
    perf_data: &mut Vec<PerfData>,
    warnings: &mut WarningCollection,
) {
    log::debug!("probing resource [{}]", resource.label());

    let metrics = match resource.probe(warnings) {
        Ok(metrics) => metrics,
        Err(e) => {
            log::warn!("resource [{}] failed: {}", resource.label(), e);
            results.add(
                EvalResult::builder()
                    .state(State::Unknown)
                    .resource(&*resource)
                    .hint(e.to_string())
                    .build(),
            );
            return;
        }
    };

    if metrics.is_empty() {
        results.add(
            EvalResult::builder()
                .state(State::Unknown)
                .resource(&*resource)
                .hint(format!(
                    "resource [{}] did not return any metrics",
                    resource.label()
                ))
                .build(),
        );
        return;
    }

    for metric in &metrics {
        let Some(context) = contexts.get_mut(metric.context_name()) else {
            log::warn!(
                "no context registered for metric [{}] (context [{}])",
                metric.name(),
                metric.context_name()
            );
            results.add(
                EvalResult::builder()
                    .state(State::Unknown)
                    .metric(metric.clone())
                    .resource(&*resource)
                    .hint(format!(
                        "missing context with name [{}]",
                        metric.context_name()
                    ))
                    .build(),
            );
            continue;
        };

        let result = context.evaluate(metric, &*resource);
        results.add(result);

        match context.performance(metric, &*resource) {
            Ok(Some(entry)) => perf_data.push(entry),
            Ok(None) => {}
            Err(e) => results.add(
                EvalResult::builder()
                    .state(State::Unknown)
                    .metric(metric.clone())
                    .context(context.as_ref())
                    .resource(&*resource)
                    .hint(e.to_string())
                    .build(),
            ),
        }
    }
}

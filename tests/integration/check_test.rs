use nagkit::core::{
    Bounds, Check, Context, DeltaContext, EvalResult, Metric, PerfData, Resource, Runtime,
    ScalarContext, SharedPrevious, StaticResource, State, Summarizer, WarningCollection,
};
use nagkit::{NagkitError, Result};

/// Counts the problems instead of describing one.
struct CountingSummarizer;

impl Summarizer for CountingSummarizer {
    fn ok(&self, check: &Check) -> String {
        format!("all {} metrics fine", check.results().len())
    }

    fn problem(&self, check: &Check) -> String {
        let problems = check
            .results()
            .iter()
            .filter(|result| result.state().is_some_and(|state| state.is_problem()))
            .count();
        format!("{} problem(s)", problems)
    }

    fn verbose(&self, _check: &Check) -> Vec<String> {
        Vec::new()
    }

    fn empty(&self) -> String {
        "nothing measured".to_string()
    }
}

/// Context that always reports CRITICAL and never emits perf data.
struct AlwaysCritical;

impl Context for AlwaysCritical {
    fn name(&self) -> &str {
        "always"
    }

    fn describe(&self, metric: &Metric) -> String {
        format!("{} is bad", metric.name())
    }

    fn evaluate(&mut self, metric: &Metric, resource: &dyn Resource) -> EvalResult {
        EvalResult::builder()
            .state(State::Critical)
            .metric(metric.clone())
            .context(&*self)
            .resource(resource)
            .build()
    }

    fn performance(&self, _metric: &Metric, _resource: &dyn Resource) -> Result<Option<PerfData>> {
        Ok(None)
    }
}

struct BrokenResource;

impl Resource for BrokenResource {
    fn label(&self) -> &str {
        "broken"
    }

    fn probe(&mut self, _warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        Err(NagkitError::probe("connection refused"))
    }
}

#[test]
fn test_custom_summarizer() {
    let mut check = Check::with_summarizer("custom", CountingSummarizer);
    check
        .attach_resource(StaticResource::new("static").with_metrics(vec![
            Metric::numeric("a", 1.0).unwrap().with_context("scalar"),
            Metric::numeric("b", 50.0).unwrap().with_context("scalar"),
            Metric::numeric("c", 60.0).unwrap().with_context("scalar"),
        ]))
        .attach_context(ScalarContext::new(
            "scalar",
            Some(Bounds::parse("10").unwrap()),
            None,
        ));

    let report = Runtime::new(false).execute(&mut check);
    assert_eq!(report.exit_code, 1);
    assert!(report.output.starts_with("CUSTOM WARNING - 2 problem(s) | a=1;10 b=50;10 c=60;10\n"));

    let empty = Check::with_summarizer("custom", CountingSummarizer);
    assert_eq!(empty.summary(), "nothing measured");
}

#[test]
fn test_custom_context() {
    let mut check = Check::new("custom");
    check
        .attach_resource(
            StaticResource::new("static")
                .with_metric(Metric::numeric("fan", 0.0).unwrap().with_context("always")),
        )
        .attach_context(AlwaysCritical);

    let report = Runtime::new(false).execute(&mut check);
    assert_eq!(report.exit_code, 2);
    assert_eq!(report.output, "CUSTOM CRITICAL - fan is bad\n");
}

#[test]
fn test_broken_resource_does_not_hide_others() {
    let mut check = Check::new("mixed");
    check
        .attach_resource(BrokenResource)
        .attach_resource(
            StaticResource::new("healthy")
                .with_metric(Metric::numeric("queue", 3.0).unwrap().with_context("queue")),
        )
        .attach_context(ScalarContext::new("queue", None, None));

    let report = Runtime::new(true).execute(&mut check);

    assert_eq!(report.exit_code, 3);
    assert_eq!(
        report.output,
        "MIXED UNKNOWN - Probe failed: connection refused | queue=3\n\
         unknown: Probe failed: connection refused\n"
    );
    assert_eq!(check.results().numeric_value("queue"), Some(3.0));
}

#[test]
fn test_delta_context_with_shared_cell() {
    let previous = SharedPrevious::new(Some(100.0));
    let mut check = Check::new("growth");
    check
        .attach_resource(
            StaticResource::new("static")
                .with_metric(Metric::numeric("rows", 112.0).unwrap().with_context("growth")),
        )
        .attach_context(
            DeltaContext::new("growth", Some(Bounds::between(-5.0, 5.0)), None)
                .with_previous(previous.clone()),
        );

    let report = Runtime::new(false).execute(&mut check);

    assert_eq!(previous.get(), Some(112.0));
    assert_eq!(report.exit_code, 1);
    assert_eq!(
        report.output,
        "GROWTH WARNING - rows_delta is 12 (outside range -5:5) | rows_delta=12\n"
    );
}

#[test]
fn test_run_twice_appends_results() {
    let mut check = Check::new("twice");
    check
        .attach_resource(
            StaticResource::new("static").with_metric(Metric::numeric("x", 1.0).unwrap()),
        )
        .attach_context(ScalarContext::new("x", None, None));

    let mut warnings = WarningCollection::new();
    check.run(&mut warnings);
    check.run(&mut warnings);

    assert_eq!(check.results().len(), 2);
    assert_eq!(check.perf_data().len(), 2);
}

#[test]
fn test_string_metric_in_numeric_context_emits_no_perfdata() {
    let mut scalar = Check::new("svc");
    scalar
        .attach_resource(
            StaticResource::new("static").with_metric(Metric::text("m", "Oops!").unwrap()),
        )
        .attach_context(ScalarContext::new(
            "m",
            Some(Bounds::parse("10:20").unwrap()),
            None,
        ));

    let report = Runtime::new(false).execute(&mut scalar);
    assert_eq!(report.exit_code, 3);
    assert_eq!(
        report.output,
        "SVC UNKNOWN - m is Oops! (scalar context can not process metric of type [string])\n"
    );
    assert_eq!(scalar.results().len(), 1);
    assert!(scalar.perf_data().is_empty());

    let mut delta = Check::new("svc");
    delta
        .attach_resource(
            StaticResource::new("static").with_metric(Metric::text("m", "Oops!").unwrap()),
        )
        .attach_context(DeltaContext::new("m", None, None));

    let report = Runtime::new(false).execute(&mut delta);
    assert_eq!(report.exit_code, 3);
    assert!(!report.output.contains(" | "));
    assert_eq!(delta.results().len(), 1);
    assert!(delta.perf_data().is_empty());
}

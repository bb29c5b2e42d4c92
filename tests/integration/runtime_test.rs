use nagkit::core::{
    Bounds, Check, Metric, Resource, Runtime, ScalarContext, StaticResource, StringInfoContext,
    StringMatchContext, State, WarningCollection,
};
use nagkit::Result;

/// Resource emitting a warning next to its metrics.
struct NoisyResource;

impl Resource for NoisyResource {
    fn label(&self) -> &str {
        "noisy"
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        warnings.add("sensor 2 did not answer, using cached value");
        Ok(vec![Metric::numeric("temperature", 71.5)?
            .with_unit("C")
            .with_context("temperature")])
    }
}

fn thresholds(warning: &str, critical: &str) -> (Option<Bounds>, Option<Bounds>) {
    (
        Some(Bounds::parse(warning).unwrap()),
        Some(Bounds::parse(critical).unwrap()),
    )
}

#[test]
fn test_usage_check_output() {
    let mut check = Check::new("usage");
    check
        .attach_resource(StaticResource::new("usage").with_metrics(vec![
            Metric::numeric("usage1", 49.4).unwrap().with_unit("%").with_context("usage"),
            Metric::numeric("usage2", 92.6).unwrap().with_unit("%").with_context("usage"),
            Metric::numeric("usage3", 83.1).unwrap().with_unit("|").with_context("usage"),
        ]))
        .attach_context(ScalarContext::new("usage", None, None));

    let report = Runtime::new(false).execute(&mut check);

    assert_eq!(report.exit_code, 0);
    assert_eq!(
        report.output,
        "USAGE OK - usage1 is 49.4% | usage1=49.4% usage2=92.6% usage3=83.1\n\
         stripped illegal character from string [usage3=83.1]\n"
    );
}

#[test]
fn test_critical_with_thresholds_in_perfdata() {
    let (warning, critical) = thresholds("80", "90");
    let mut check = Check::new("disk");
    check
        .attach_resource(StaticResource::new("disks").with_metrics(vec![
            Metric::numeric("root", 95.0)
                .unwrap()
                .with_unit("%")
                .with_context("disk")
                .with_value_range(Bounds::between(0.0, 100.0))
                .unwrap(),
            Metric::numeric("home", 85.0)
                .unwrap()
                .with_unit("%")
                .with_context("disk")
                .with_value_range(Bounds::between(0.0, 100.0))
                .unwrap(),
        ]))
        .attach_context(ScalarContext::new("disk", warning, critical));

    let report = Runtime::new(true).execute(&mut check);

    assert_eq!(report.exit_code, 2);
    assert_eq!(
        report.output,
        "DISK CRITICAL - root is 95% (outside range 0:90) | home=85%;80;90;;100 root=95%;80;90;;100\n\
         critical: root is 95% (outside range 0:90)\n\
         warning: home is 85% (outside range 0:80)\n"
    );
}

#[test]
fn test_warnings_follow_status_line() {
    let (warning, critical) = thresholds("60", "80");
    let mut check = Check::new("thermal");
    check
        .attach_resource(NoisyResource)
        .attach_context(ScalarContext::new("temperature", warning, critical));

    let report = Runtime::new(false).execute(&mut check);

    assert_eq!(report.exit_code, 1);
    assert_eq!(
        report.output,
        "THERMAL WARNING - temperature is 71.5C (outside range 0:60) | temperature=71.5C;60;80\n\
         sensor 2 did not answer, using cached value\n"
    );
}

#[test]
fn test_mixed_contexts() {
    let mut check = Check::new("service");
    check
        .attach_resource(StaticResource::new("service").with_metrics(vec![
            Metric::text("version", "2.4.1").unwrap(),
            Metric::text("status", "degraded").unwrap(),
        ]))
        .attach_context(StringInfoContext::new("version").with_format("version {value}"))
        .attach_context(StringMatchContext::new("status", State::Warning, ["running"]));

    let report = Runtime::new(true).execute(&mut check);

    assert_eq!(report.exit_code, 1);
    assert_eq!(
        report.output,
        "SERVICE WARNING - status is degraded (got [degraded], expected [running])\n\
         warning: status is degraded (got [degraded], expected [running])\n\
         info: version 2.4.1\n"
    );
}

#[test]
fn test_unnamed_check_without_results() {
    let mut check = Check::new("");
    let report = Runtime::new(true).execute(&mut check);

    assert_eq!(report.exit_code, 3);
    assert_eq!(report.output, "UNKNOWN - No check results\n");
}

use nagkit::core::{Check, DeltaContext, DeltaStore, Metric, Runtime, StaticResource};
use tempfile::TempDir;

fn counter_check(store: &mut DeltaStore, value: f64) -> Check {
    let mut check = Check::new("traffic");
    check
        .attach_resource(
            StaticResource::new("eth0")
                .with_metric(Metric::numeric("eth0_rx", value).unwrap().with_context("traffic")),
        )
        .attach_context(
            DeltaContext::new("traffic", None, None).with_previous(store.previous("eth0.rx")),
        );
    check
}

#[test]
fn test_previous_value_survives_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("state").join("delta.json");

    let mut store = DeltaStore::open(&path).unwrap();
    let mut check = counter_check(&mut store, 1000.0);
    let first = Runtime::new(false).execute(&mut check);
    store.save().unwrap();

    assert_eq!(first.output, "TRAFFIC OK - eth0_rx_delta is 0 | eth0_rx_delta=0\n");
    assert!(path.exists());

    let mut store = DeltaStore::open(&path).unwrap();
    assert_eq!(store.value("eth0.rx"), Some(1000.0));
    assert!(store.updated_at("eth0.rx").is_some());

    let mut check = counter_check(&mut store, 1500.0);
    let second = Runtime::new(false).execute(&mut check);
    store.save().unwrap();

    assert_eq!(second.output, "TRAFFIC OK - eth0_rx_delta is 500 | eth0_rx_delta=500\n");
    assert_eq!(DeltaStore::open(&path).unwrap().value("eth0.rx"), Some(1500.0));
}

#[test]
fn test_unchanged_value_keeps_timestamp() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("delta.json");

    let mut store = DeltaStore::open(&path).unwrap();
    let mut check = counter_check(&mut store, 10.0);
    Runtime::new(false).execute(&mut check);
    store.save().unwrap();
    let first_update = DeltaStore::open(&path).unwrap().updated_at("eth0.rx");

    let mut store = DeltaStore::open(&path).unwrap();
    let mut check = counter_check(&mut store, 10.0);
    Runtime::new(false).execute(&mut check);
    store.save().unwrap();

    assert_eq!(DeltaStore::open(&path).unwrap().updated_at("eth0.rx"), first_update);
}

#[test]
fn test_unused_cells_are_not_written() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("delta.json");

    let mut store = DeltaStore::open(&path).unwrap();
    let _cell = store.previous("never.evaluated");
    store.save().unwrap();

    assert_eq!(DeltaStore::open(&path).unwrap().value("never.evaluated"), None);
}

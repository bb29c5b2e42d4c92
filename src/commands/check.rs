use anyhow::{Context as _, Result};
use clap::ArgMatches;
use std::path::PathBuf;

use crate::core::{
    Bounds, Check, Config, DeltaContext, DeltaStore, Report, Runtime, ScalarContext, State,
    StringInfoContext, StringMatchContext, WarningCollection,
};
use crate::probes::{DiskResource, LoadResource, MemoryResource, NetworkResource, ProcessResource};

/// Statuses accepted by `check process` when `--expect` is not given.
pub const DEFAULT_PROCESS_STATUSES: &str = "run,sleep,idle";

/// Build and run one of the built-in checks.
///
/// Errors are setup failures (bad ranges, unreadable config or state); everything that
/// goes wrong while probing ends up in the report instead.
pub fn execute(matches: &ArgMatches, config: &Config) -> Result<Report> {
    let Some((name, sub_matches)) = matches.subcommand() else {
        anyhow::bail!("no check selected, see 'nagkit check --help'");
    };

    let verbose = sub_matches.get_flag("verbose") || config.verbose;
    let runtime = Runtime::new(verbose);
    let mut store = None;

    let mut check = match name {
        "load" => load_check(sub_matches, config)?,
        "memory" => memory_check(sub_matches, config)?,
        "disk" => disk_check(sub_matches, config)?,
        "process" => process_check(sub_matches)?,
        "network" => {
            let mut delta_store = open_store(config)?;
            let check = network_check(sub_matches, config, &mut delta_store)?;
            store = Some(delta_store);
            check
        }
        other => anyhow::bail!("unknown check: {}", other),
    };

    let mut warnings = WarningCollection::new();
    check.run(&mut warnings);

    if let Some(store) = store.as_mut() {
        if let Err(e) = store.save() {
            log::warn!("failed to persist delta state: {}", e);
            warnings.add(format!("could not persist delta state: {}", e));
        }
    }

    Ok(runtime.render(&check, &warnings))
}

/// Thresholds for `check_name`: command line flags first, then the config file.
pub fn resolve_thresholds(
    matches: &ArgMatches,
    config: &Config,
    check_name: &str,
) -> Result<(Option<Bounds>, Option<Bounds>)> {
    let (mut warning, mut critical) = match config.thresholds_for(check_name) {
        Some(thresholds) => thresholds.bounds()?,
        None => (None, None),
    };

    if let Some(spec) = matches.get_one::<String>("warning") {
        warning = Some(
            Bounds::parse(spec).with_context(|| format!("Invalid warning range: {}", spec))?,
        );
    }
    if let Some(spec) = matches.get_one::<String>("critical") {
        critical = Some(
            Bounds::parse(spec).with_context(|| format!("Invalid critical range: {}", spec))?,
        );
    }

    Ok((warning, critical))
}

fn load_check(matches: &ArgMatches, config: &Config) -> Result<Check> {
    let (warning, critical) = resolve_thresholds(matches, config, "load")?;

    let mut check = Check::new("load");
    check
        .attach_resource(LoadResource::new())
        .attach_context(ScalarContext::new(LoadResource::CONTEXT, warning, critical));
    Ok(check)
}

fn memory_check(matches: &ArgMatches, config: &Config) -> Result<Check> {
    let (warning, critical) = resolve_thresholds(matches, config, "memory")?;

    let mut check = Check::new("memory");
    check
        .attach_resource(MemoryResource::new())
        .attach_context(
            ScalarContext::new(MemoryResource::CONTEXT, warning, critical)
                .with_format("memory usage is {value_unit}"),
        )
        .attach_context(
            StringInfoContext::new(MemoryResource::TOTAL_CONTEXT).with_format("{value} installed"),
        );
    Ok(check)
}

fn disk_check(matches: &ArgMatches, config: &Config) -> Result<Check> {
    let (warning, critical) = resolve_thresholds(matches, config, "disk")?;
    let mount = matches
        .get_one::<String>("mount")
        .context("Mount argument is required")?;

    let mut check = Check::new("disk");
    check
        .attach_resource(DiskResource::new(PathBuf::from(mount)))
        .attach_context(
            ScalarContext::new(DiskResource::CONTEXT, warning, critical)
                .with_format("{name} is {value_unit} full"),
        );
    Ok(check)
}

fn process_check(matches: &ArgMatches) -> Result<Check> {
    let name = matches
        .get_one::<String>("name")
        .context("Name argument is required")?;
    let expected = matches
        .get_one::<String>("expect")
        .map(String::as_str)
        .unwrap_or(DEFAULT_PROCESS_STATUSES);
    let problem_state = match matches.get_one::<String>("problem-state") {
        Some(state) => state
            .parse::<State>()
            .with_context(|| format!("Invalid problem state: {}", state))?,
        None => State::Critical,
    };

    let mut check = Check::new("process");
    check
        .attach_resource(ProcessResource::new(name.as_str()))
        .attach_context(StringMatchContext::new(
            ProcessResource::CONTEXT,
            problem_state,
            parse_list(expected),
        ));
    Ok(check)
}

fn network_check(matches: &ArgMatches, config: &Config, store: &mut DeltaStore) -> Result<Check> {
    let (warning, critical) = resolve_thresholds(matches, config, "network")?;
    let interface = matches
        .get_one::<String>("interface")
        .context("Interface argument is required")?;

    let resource = NetworkResource::new(interface.as_str());
    let previous = store.previous(&resource.state_key());

    let mut check = Check::new("network");
    check.set_meta("state_file", store.path().to_string_lossy().to_string());
    check
        .attach_resource(resource)
        .attach_context(
            DeltaContext::new(NetworkResource::CONTEXT, warning, critical)
                .with_previous(previous)
                .with_format("{name} is {value} bytes"),
        );
    Ok(check)
}

fn open_store(config: &Config) -> Result<DeltaStore> {
    let path = config.delta_store_path()?;
    DeltaStore::open(&path).with_context(|| format!("Failed to open delta store: {:?}", path))
}

/// Split a comma separated list, dropping empty entries.
pub fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

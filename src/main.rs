use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use std::path::PathBuf;

use nagkit::commands;
use nagkit::core::Config;

/// Exit code for setup failures, UNKNOWN in the plugin protocol.
const EXIT_UNKNOWN: i32 = 3;

fn main() {
    nagkit::init_logging();

    let mut cli = build_cli();
    let matches = cli.clone().get_matches();

    if matches.get_flag("version") {
        println!("nagkit version {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match matches.subcommand() {
        Some(("check", sub_matches)) => {
            let report = load_config(&matches)
                .and_then(|config| commands::check::execute(sub_matches, &config));
            match report {
                Ok(report) => report.print_and_exit(),
                Err(e) => {
                    log::debug!("check setup failed: {:?}", e);
                    println!("UNKNOWN - {:#}", e);
                    std::process::exit(EXIT_UNKNOWN);
                }
            }
        }
        Some((name, sub_matches)) => {
            if let Err(e) = run_tool(name, sub_matches, &mut cli) {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
        None => {
            println!("Welcome to nagkit!");
            println!("Use 'nagkit --help' for more information.");
        }
    }
}

fn run_tool(name: &str, matches: &ArgMatches, cli: &mut Command) -> Result<()> {
    match name {
        "range" => commands::range(matches),
        "completions" => commands::completions::execute(matches, cli),
        "version" => commands::version(),
        other => anyhow::bail!("Unknown command: {}", other),
    }
}

fn load_config(matches: &ArgMatches) -> Result<Config> {
    match matches.get_one::<String>("config") {
        Some(path) => Config::load_from(&PathBuf::from(path))
            .with_context(|| format!("Failed to load config from {}", path)),
        None => Config::load(),
    }
}

fn threshold_args() -> [Arg; 3] {
    [
        Arg::new("warning")
            .short('w')
            .long("warning")
            .value_name("RANGE")
            .allow_hyphen_values(true)
            .help("Warning range (e.g. 80, 10:20, ~:5, @0:3)"),
        Arg::new("critical")
            .short('c')
            .long("critical")
            .value_name("RANGE")
            .allow_hyphen_values(true)
            .help("Critical range"),
        verbose_arg(),
    ]
}

fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .help("List every non-OK result below the status line")
        .action(ArgAction::SetTrue)
}

fn build_cli() -> Command {
    Command::new("nagkit")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Monitoring plugin checks with Nagios-compatible output")
        .disable_version_flag(true)
        .arg(
            Arg::new("version")
                .short('V')
                .long("version")
                .help("Print version information")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .global(true)
                .help("Use this config file instead of the default location"),
        )
        .subcommand(
            Command::new("check")
                .about("Run a built-in check (use 'nagkit check --help' for subcommands)")
                .subcommand_required(true)
                .arg_required_else_help(true)
                .subcommand(
                    Command::new("load")
                        .about("System load averages over 1, 5 and 15 minutes")
                        .args(threshold_args()),
                )
                .subcommand(
                    Command::new("memory")
                        .about("Physical memory usage in percent")
                        .args(threshold_args()),
                )
                .subcommand(
                    Command::new("disk")
                        .about("Usage of a mounted filesystem in percent")
                        .arg(
                            Arg::new("mount")
                                .short('m')
                                .long("mount")
                                .value_name("PATH")
                                .default_value("/")
                                .help("Mount point to check"),
                        )
                        .args(threshold_args()),
                )
                .subcommand(
                    Command::new("process")
                        .about("Scheduler status of a named process")
                        .arg(
                            Arg::new("name")
                                .short('n')
                                .long("name")
                                .value_name("NAME")
                                .required(true)
                                .help("Exact process name"),
                        )
                        .arg(
                            Arg::new("expect")
                                .short('e')
                                .long("expect")
                                .value_name("STATUSES")
                                .help("Comma separated accepted statuses (default: run,sleep,idle)"),
                        )
                        .arg(
                            Arg::new("problem-state")
                                .short('p')
                                .long("problem-state")
                                .value_name("STATE")
                                .help("State for unexpected statuses (default: critical)"),
                        )
                        .arg(verbose_arg()),
                )
                .subcommand(
                    Command::new("network")
                        .about("Bytes received on an interface since the previous run")
                        .arg(
                            Arg::new("interface")
                                .short('i')
                                .long("interface")
                                .value_name("IFACE")
                                .required(true)
                                .help("Network interface name"),
                        )
                        .args(threshold_args()),
                ),
        )
        .subcommand(
            Command::new("range")
                .about("Explain a range specifier and test values against it")
                .arg(
                    Arg::new("spec")
                        .help("Range specifier, e.g. 10, 10:20, ~:5, @0:3")
                        .required(true)
                        .allow_hyphen_values(true)
                        .index(1),
                )
                .arg(
                    Arg::new("values")
                        .help("Values to test")
                        .num_args(0..)
                        .allow_hyphen_values(true)
                        .index(2),
                ),
        )
        .subcommand(
            Command::new("completions")
                .about("Generate shell completion scripts")
                .arg(
                    Arg::new("shell")
                        .help("Shell to generate completions for")
                        .required(true)
                        .value_parser(["bash", "zsh", "fish", "powershell", "elvish"])
                        .index(1),
                ),
        )
        .subcommand(Command::new("version").about("Shows version information"))
}

// nagkit library - monitoring plugin checks

// Re-export error types
pub mod error;
pub use error::{NagkitError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod probes;

// Re-export commonly used types
pub use core::{
    Bounds, Check, Config, Context, Metric, PerfData, Report, Resource, Runtime, State,
    WarningCollection,
};

/// Initialize logging on stderr so stdout only carries plugin output.
///
/// Defaults to `warn`; `RUST_LOG` overrides the filter.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}

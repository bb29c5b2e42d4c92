// Built-in resources backed by sysinfo

pub mod disk;
pub mod load;
pub mod memory;
pub mod network;
pub mod process;

pub use disk::DiskResource;
pub use load::LoadResource;
pub use memory::MemoryResource;
pub use network::NetworkResource;
pub use process::ProcessResource;

use crate::core::bounds::Bounds;
use crate::core::metric::Metric;
use crate::error::Result;

/// Share of `used` in `total` as a percentage, rounded to two decimals.
pub(crate) fn usage_percent(used: u64, total: u64) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let percent = used as f64 / total as f64 * 100.0;
    (percent * 100.0).round() / 100.0
}

/// Percentage metric with the declared range `0:100`.
pub(crate) fn percent_metric(name: &str, context: &str, used: u64, total: u64) -> Result<Metric> {
    Metric::numeric(name, usage_percent(used, total))?
        .with_unit("%")
        .with_context(context)
        .with_value_range(Bounds::between(0.0, 100.0))
}

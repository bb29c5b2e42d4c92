use humansize::{format_size, BINARY};
use sysinfo::{MemoryRefreshKind, RefreshKind, System};

use super::percent_metric;
use crate::core::metric::Metric;
use crate::core::resource::Resource;
use crate::core::warning::WarningCollection;
use crate::error::{NagkitError, Result};

/// Physical memory usage in percent, plus the installed total as text.
#[derive(Debug, Clone)]
pub struct MemoryResource {
    label: String,
}

impl MemoryResource {
    pub const CONTEXT: &'static str = "memory";
    pub const TOTAL_CONTEXT: &'static str = "memory_total";

    pub fn new() -> Self {
        Self {
            label: "memory".to_string(),
        }
    }

    pub(crate) fn metrics(used: u64, total: u64) -> Result<Vec<Metric>> {
        if total == 0 {
            return Err(NagkitError::probe("total memory reported as zero"));
        }

        Ok(vec![
            percent_metric("memory", Self::CONTEXT, used, total)?,
            Metric::text("memory_total", format_size(total, BINARY))?
                .with_context(Self::TOTAL_CONTEXT),
        ])
    }
}

impl Default for MemoryResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for MemoryResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_memory(MemoryRefreshKind::everything()),
        );

        let total = system.total_memory();
        let used = system.used_memory();
        if system.total_swap() > 0 && system.used_swap() == system.total_swap() {
            warnings.add("swap space is exhausted");
        }

        Self::metrics(used, total)
    }
}

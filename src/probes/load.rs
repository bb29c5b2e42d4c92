use sysinfo::System;

use crate::core::metric::Metric;
use crate::core::resource::Resource;
use crate::core::warning::WarningCollection;
use crate::error::Result;

/// System load averages over 1, 5 and 15 minutes (`load1`, `load5`, `load15`).
#[derive(Debug, Clone)]
pub struct LoadResource {
    label: String,
}

impl LoadResource {
    pub const CONTEXT: &'static str = "load";

    pub fn new() -> Self {
        Self {
            label: "load".to_string(),
        }
    }
}

impl Default for LoadResource {
    fn default() -> Self {
        Self::new()
    }
}

impl Resource for LoadResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        if cfg!(windows) {
            warnings.add("load average is not available on this platform, reporting zeros");
        }

        let load = System::load_average();
        log::debug!("load average: {} {} {}", load.one, load.five, load.fifteen);

        [("load1", load.one), ("load5", load.five), ("load15", load.fifteen)]
            .into_iter()
            .map(|(name, value)| Ok(Metric::numeric(name, value)?.with_context(Self::CONTEXT)))
            .collect()
    }
}

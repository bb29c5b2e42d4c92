use std::ffi::OsStr;

use sysinfo::{ProcessRefreshKind, RefreshKind, System};

use crate::core::metric::Metric;
use crate::core::resource::Resource;
use crate::core::warning::WarningCollection;
use crate::error::{NagkitError, Result};

/// Scheduler status of a named process (`Run`, `Sleep`, `Zombie`, ...).
#[derive(Debug, Clone)]
pub struct ProcessResource {
    label: String,
    name: String,
}

impl ProcessResource {
    pub const CONTEXT: &'static str = "process";

    pub fn new<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        Self {
            label: format!("process {}", name),
            name,
        }
    }
}

impl Resource for ProcessResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(ProcessRefreshKind::nothing()),
        );

        let mut processes: Vec<_> = system
            .processes_by_exact_name(OsStr::new(&self.name))
            .collect();
        processes.sort_by_key(|process| process.pid());

        let Some(process) = processes.first() else {
            return Err(NagkitError::probe(format!(
                "no process named [{}] is running",
                self.name
            )));
        };
        if processes.len() > 1 {
            warnings.add(format!(
                "found {} processes named [{}], reporting pid {}",
                processes.len(),
                self.name,
                process.pid()
            ));
        }

        let status = format!("{:?}", process.status());
        log::debug!("process {} ({}) is {}", self.name, process.pid(), status);

        Ok(vec![
            Metric::text(self.name.as_str(), status)?.with_context(Self::CONTEXT)
        ])
    }
}

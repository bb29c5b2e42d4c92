use std::path::{Path, PathBuf};

use sysinfo::Disks;

use super::percent_metric;
use crate::core::metric::Metric;
use crate::core::resource::Resource;
use crate::core::warning::WarningCollection;
use crate::error::{NagkitError, Result};

/// Usage in percent of the filesystem mounted at a given path.
///
/// The metric is named after the mount point.
#[derive(Debug, Clone)]
pub struct DiskResource {
    label: String,
    mount: PathBuf,
}

impl DiskResource {
    pub const CONTEXT: &'static str = "disk";

    pub fn new<P: Into<PathBuf>>(mount: P) -> Self {
        let mount = mount.into();
        Self {
            label: format!("disk {}", mount.display()),
            mount,
        }
    }

    pub fn mount(&self) -> &Path {
        &self.mount
    }
}

impl Resource for DiskResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        let disks = Disks::new_with_refreshed_list();
        let mut matching = disks
            .iter()
            .filter(|disk| disk.mount_point() == self.mount.as_path());

        let disk = matching.next().ok_or_else(|| {
            NagkitError::probe(format!(
                "no filesystem mounted at [{}]",
                self.mount.display()
            ))
        })?;
        if matching.next().is_some() {
            warnings.add(format!(
                "several filesystems mounted at [{}], using the first",
                self.mount.display()
            ));
        }

        let total = disk.total_space();
        if total == 0 {
            return Err(NagkitError::probe(format!(
                "filesystem at [{}] reports no capacity",
                self.mount.display()
            )));
        }
        let used = total.saturating_sub(disk.available_space());
        log::debug!(
            "disk {:?}: {} of {} bytes used",
            disk.mount_point(),
            used,
            total
        );

        let name = self.mount.to_string_lossy();
        Ok(vec![percent_metric(&name, Self::CONTEXT, used, total)?])
    }
}

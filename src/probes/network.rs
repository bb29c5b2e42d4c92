use sysinfo::Networks;

use crate::core::metric::Metric;
use crate::core::resource::Resource;
use crate::core::warning::WarningCollection;
use crate::error::{NagkitError, Result};

/// Total bytes received on an interface since boot, named `<interface>_rx`.
///
/// Meant to be evaluated by a delta context so the check judges traffic between runs.
#[derive(Debug, Clone)]
pub struct NetworkResource {
    label: String,
    interface: String,
}

impl NetworkResource {
    pub const CONTEXT: &'static str = "network";

    pub fn new<S: Into<String>>(interface: S) -> Self {
        let interface = interface.into();
        Self {
            label: format!("interface {}", interface),
            interface,
        }
    }

    /// Key under which the previous counter value is persisted.
    pub fn state_key(&self) -> String {
        format!("network.{}.rx", self.interface)
    }
}

impl Resource for NetworkResource {
    fn label(&self) -> &str {
        &self.label
    }

    fn probe(&mut self, warnings: &mut WarningCollection) -> Result<Vec<Metric>> {
        let networks = Networks::new_with_refreshed_list();
        let Some((_, data)) = networks
            .iter()
            .find(|(name, _)| name.as_str() == self.interface)
        else {
            return Err(NagkitError::probe(format!(
                "network interface [{}] not found",
                self.interface
            )));
        };

        let received = data.total_received();
        if received == 0 {
            warnings.add(format!(
                "interface [{}] has not received any data",
                self.interface
            ));
        }

        Ok(vec![Metric::numeric(
            format!("{}_rx", self.interface),
            received as f64,
        )?
        .with_unit("B")
        .with_context(Self::CONTEXT)])
    }
}

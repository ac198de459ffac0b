//! The seam between the exporter and the simulation that owns the data.

use std::path::{Path, PathBuf};

use crate::model::{Monitor, Report};

/// Handle to a simulation, passed explicitly to every operation that reads
/// from it.
pub trait SimulationContext {
    fn presentation_name(&self) -> &str;

    fn session_dir(&self) -> &Path;

    /// Reports in host iteration order.
    fn reports(&self) -> &[Report];

    /// Monitors in host iteration order.
    fn monitors(&self) -> &[Monitor];

    /// Line-oriented console of the simulation.
    fn println(&self, line: &str);

    /// Map a session-relative name to an absolute path.
    fn resolve_path(&self, relative: &str) -> PathBuf {
        self.session_dir().join(relative)
    }
}

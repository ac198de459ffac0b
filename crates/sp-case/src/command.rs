//! Batch command line for the host executable.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// Argument order differs between host builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    /// `-np N -load SIM -batch MACROS`
    Windows,
    /// `-load SIM -batch MACROS -np N`
    Posix,
}

impl Platform {
    pub fn current() -> Self {
        if cfg!(windows) {
            Platform::Windows
        } else {
            Platform::Posix
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BatchCommand {
    pub executable: String,
    pub sim_file: PathBuf,
    /// Executed by the host in this order.
    pub macros: Vec<PathBuf>,
    pub n_cpus: u32,
    pub working_dir: PathBuf,
    pub platform: Platform,
}

impl BatchCommand {
    pub fn args(&self) -> Vec<String> {
        let np = ["-np".to_string(), self.n_cpus.to_string()];
        let load = [
            "-load".to_string(),
            self.sim_file.display().to_string(),
            "-batch".to_string(),
            self.batch_list(),
        ];

        match self.platform {
            Platform::Windows => np.into_iter().chain(load).collect(),
            Platform::Posix => load.into_iter().chain(np).collect(),
        }
    }

    fn batch_list(&self) -> String {
        self.macros
            .iter()
            .map(|m| m.display().to_string())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.executable);
        cmd.args(self.args()).current_dir(&self.working_dir);
        cmd
    }
}

impl fmt::Display for BatchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.executable, self.args().join(" "))
    }
}

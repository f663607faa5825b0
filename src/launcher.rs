use tokio::process::Command;
use tokio::sync::mpsc;

use crate::error::MixerError;
use crate::mixer::MixerEvent;

/// Starts detached child processes and reports their exit asynchronously.
pub trait ProcessSpawner {
    /// Returns the child's pid.
    fn spawn(&mut self, program: &str) -> std::io::Result<u32>;
}

/// Spawns on the tokio runtime and posts `LauncherExited` when the child
/// terminates.
#[derive(Clone, Debug)]
pub struct TokioSpawner {
    events: mpsc::UnboundedSender<MixerEvent>,
}

impl TokioSpawner {
    pub fn new(events: mpsc::UnboundedSender<MixerEvent>) -> Self {
        Self { events }
    }
}

impl ProcessSpawner for TokioSpawner {
    fn spawn(&mut self, program: &str) -> std::io::Result<u32> {
        let mut child = Command::new(program)
            .stdin(std::process::Stdio::null())
            .stdout(std::process::Stdio::null())
            .stderr(std::process::Stdio::null())
            .spawn()?;
        let pid = child.id().unwrap_or_default();
        let events = self.events.clone();
        let program = program.to_string();

        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => tracing::debug!("{} ({}) exited: {}", program, pid, status),
                Err(e) => tracing::warn!("Failed to wait for {} ({}): {}", program, pid, e),
            }
            let _ = events.send(MixerEvent::LauncherExited(pid));
        });

        Ok(pid)
    }
}

/// Keeps at most one external mixer running.
pub struct MixerLauncher {
    program: String,
    spawner: Box<dyn ProcessSpawner>,
    running: Option<u32>,
}

impl MixerLauncher {
    pub fn new(program: impl Into<String>, spawner: Box<dyn ProcessSpawner>) -> Self {
        Self {
            program: program.into(),
            spawner,
            running: None,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn running(&self) -> Option<u32> {
        self.running
    }

    /// Starts the mixer. Returns `Ok(false)` when one is already running.
    pub fn launch(&mut self) -> Result<bool, MixerError> {
        if let Some(pid) = self.running {
            tracing::debug!("{} already running as {}", self.program, pid);
            return Ok(false);
        }

        let pid = self.spawner.spawn(&self.program).map_err(|source| MixerError::Launch {
            program: self.program.clone(),
            source,
        })?;
        tracing::info!("Launched {} ({})", self.program, pid);
        self.running = Some(pid);
        Ok(true)
    }

    /// Forgets the tracked child if `pid` is the one that exited.
    pub fn exited(&mut self, pid: u32) -> bool {
        if self.running == Some(pid) {
            self.running = None;
            return true;
        }
        false
    }
}

impl std::fmt::Debug for MixerLauncher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MixerLauncher")
            .field("program", &self.program)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

//! Running the platform binary in place of the launcher.
//!
//! The launcher resolves the binary for the current platform, spawns it with
//! the launcher's own stdio, relays termination signals to it while it runs,
//! and reports the exit code the launcher should exit with so the caller
//! cannot tell it apart from invoking the binary directly.

mod exit;
mod signals;

use anyhow::Result;
use log::{debug, info};
use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::Stdio;
use tokio::process::Command;

use crate::config::LauncherConfig;
use crate::error::LaunchError;
use crate::package::resolve_binary_path;
use crate::platform::{DefaultPlatformDetector, PlatformDetector, PlatformKey};
use crate::runtime::Runtime;

pub use exit::ExitOutcome;
pub use signals::{ChildSlot, ForwardedSignal, SignalForwarder, forward};

/// Lifecycle of a single launch. Transitions only move forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    NotStarted,
    Resolving,
    Spawned,
    Relaying,
    Exited,
    Failed,
}

impl LaunchState {
    pub fn can_advance_to(self, next: LaunchState) -> bool {
        use LaunchState::*;

        matches!(
            (self, next),
            (NotStarted, Resolving)
                | (Resolving, Spawned)
                | (Spawned, Relaying)
                | (Relaying, Exited)
                | (Resolving, Failed)
                | (Relaying, Failed)
        )
    }
}

/// Resolve and run the platform binary with the given arguments.
///
/// Returns the exit code the launcher process should exit with.
#[tracing::instrument(skip(runtime, args))]
pub async fn run<R, I, S>(runtime: R, args: I) -> Result<i32>
where
    R: Runtime,
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let config = LauncherConfig::from_runtime(&runtime);
    let launcher = Launcher::new(runtime, DefaultPlatformDetector, config);
    Ok(launcher.run(args).await?)
}

pub struct Launcher<R: Runtime, P: PlatformDetector> {
    runtime: R,
    detector: P,
    config: LauncherConfig,
    child: ChildSlot,
    state: LaunchState,
}

impl<R: Runtime, P: PlatformDetector> Launcher<R, P> {
    pub fn new(runtime: R, detector: P, config: LauncherConfig) -> Self {
        Self {
            runtime,
            detector,
            config,
            child: ChildSlot::new(),
            state: LaunchState::NotStarted,
        }
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    /// Slot holding the running child's pid, for forwarding signals.
    pub fn child_slot(&self) -> ChildSlot {
        self.child.clone()
    }

    fn advance(&mut self, next: LaunchState) {
        debug_assert!(
            self.state.can_advance_to(next),
            "invalid launch transition {:?} -> {:?}",
            self.state,
            next
        );
        debug!("Launch state: {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    fn fail(&mut self, err: LaunchError) -> LaunchError {
        self.advance(LaunchState::Failed);
        err
    }

    /// Look up the current platform and locate its binary.
    pub fn resolve_binary_path(&mut self) -> Result<PathBuf, LaunchError> {
        self.advance(LaunchState::Resolving);
        let platform: PlatformKey = self.detector.detect();
        debug!("Detected platform {}", platform);

        resolve_binary_path(&self.runtime, &platform, &self.config).map_err(|e| self.fail(e))
    }

    /// Run the binary to completion, relaying signals, and return the exit
    /// code to mirror.
    pub async fn run<I, S>(mut self, args: I) -> Result<i32, LaunchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let path = self.resolve_binary_path()?;

        let mut forwarder = SignalForwarder::install()
            .map_err(|source| self.fail(LaunchError::SignalSetup { source }))?;

        let spawned = Command::new(&path)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true)
            .spawn();
        let mut child = match spawned {
            Ok(child) => child,
            Err(source) => {
                forwarder.stop();
                return Err(self.fail(LaunchError::Spawn { path, source }));
            }
        };

        if let Some(pid) = child.id() {
            self.child.set(pid);
        }
        self.advance(LaunchState::Spawned);
        info!("Started {:?} (pid {:?})", path, child.id());

        self.advance(LaunchState::Relaying);
        // Signals are delivered from this loop only, so the slot is always
        // cleared before a reaped pid could be signalled.
        let waited = loop {
            tokio::select! {
                waited = child.wait() => {
                    self.child.clear();
                    break waited;
                }
                Some(signal) = forwarder.recv() => {
                    forward(&self.child, signal);
                }
            }
        };
        forwarder.stop();

        if let Err(e) = &waited {
            debug!("Waiting on child failed ({}), killing it", e);
            if let Err(e) = child.start_kill() {
                debug!("Failed to kill child: {}", e);
            }
        }
        let status = waited.map_err(|source| self.fail(LaunchError::Wait { source }))?;
        let outcome = ExitOutcome::from_status(status);
        self.advance(LaunchState::Exited);
        debug!("Child finished with {:?}", outcome);

        Ok(outcome.exit_code())
    }
}

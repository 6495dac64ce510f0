use log::debug;
use std::io;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// Termination signals relayed to the child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForwardedSignal {
    Terminate,
    Interrupt,
    Hangup,
}

impl ForwardedSignal {
    #[cfg(unix)]
    fn kind(self) -> tokio::signal::unix::SignalKind {
        use tokio::signal::unix::SignalKind;

        match self {
            Self::Terminate => SignalKind::terminate(),
            Self::Interrupt => SignalKind::interrupt(),
            Self::Hangup => SignalKind::hangup(),
        }
    }

    #[cfg(unix)]
    fn as_nix(self) -> nix::sys::signal::Signal {
        use nix::sys::signal::Signal;

        match self {
            Self::Terminate => Signal::SIGTERM,
            Self::Interrupt => Signal::SIGINT,
            Self::Hangup => Signal::SIGHUP,
        }
    }
}

/// Pid of the running child, shared between the launcher and the signal
/// forwarder. Set once the child spawns and cleared when it has been reaped.
#[derive(Debug, Clone, Default)]
pub struct ChildSlot {
    inner: Arc<Mutex<Option<u32>>>,
}

impl ChildSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, pid: u32) {
        *self.lock() = Some(pid);
    }

    pub fn clear(&self) {
        *self.lock() = None;
    }

    pub fn pid(&self) -> Option<u32> {
        *self.lock()
    }

    // A poisoned lock still holds a whole pid.
    fn lock(&self) -> MutexGuard<'_, Option<u32>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Send `signal` to the child in `slot`, if there is one.
/// Returns whether a signal was delivered.
#[cfg(unix)]
pub fn forward(slot: &ChildSlot, signal: ForwardedSignal) -> bool {
    use log::warn;
    use nix::errno::Errno;
    use nix::sys::signal::kill;
    use nix::unistd::Pid;

    let Some(pid) = slot.pid() else {
        debug!("Received {:?} with no running child", signal);
        return false;
    };
    let Ok(raw) = i32::try_from(pid) else {
        warn!("Child pid {} does not fit a pid_t", pid);
        return false;
    };

    match kill(Pid::from_raw(raw), signal.as_nix()) {
        Ok(()) => {
            debug!("Forwarded {:?} to child {}", signal, pid);
            true
        }
        Err(Errno::ESRCH) => {
            debug!("Child {} already exited, dropping {:?}", pid, signal);
            false
        }
        Err(e) => {
            warn!("Failed to forward {:?} to child {}: {}", signal, pid, e);
            false
        }
    }
}

/// The console already delivers Ctrl-C and Ctrl-Break to the child.
#[cfg(windows)]
pub fn forward(slot: &ChildSlot, signal: ForwardedSignal) -> bool {
    debug!(
        "Received {:?}; child {:?} handles it through the console",
        signal,
        slot.pid()
    );
    false
}

/// Listens for termination signals so they no longer end the launcher, and
/// queues them for the task that owns the child.
///
/// Delivery happens on the owning task through [`forward`], between polls of
/// the child's exit. A pid is therefore never signalled after the child has
/// been reaped, whatever the runtime flavor.
pub struct SignalForwarder {
    handle: JoinHandle<()>,
    received: mpsc::UnboundedReceiver<ForwardedSignal>,
}

impl SignalForwarder {
    /// Register the listeners.
    ///
    /// Listeners are registered before this returns, so a signal arriving
    /// right after a subsequent spawn is not lost. Must be called from within
    /// a tokio runtime.
    #[cfg(unix)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::unix::signal;

        let mut term = signal(ForwardedSignal::Terminate.kind())?;
        let mut int = signal(ForwardedSignal::Interrupt.kind())?;
        let mut hup = signal(ForwardedSignal::Hangup.kind())?;

        Ok(Self::spawn(|tx| async move {
            loop {
                let received = tokio::select! {
                    Some(()) = term.recv() => ForwardedSignal::Terminate,
                    Some(()) = int.recv() => ForwardedSignal::Interrupt,
                    Some(()) = hup.recv() => ForwardedSignal::Hangup,
                    else => break,
                };
                if tx.send(received).is_err() {
                    break;
                }
            }
        }))
    }

    #[cfg(windows)]
    pub fn install() -> io::Result<Self> {
        use tokio::signal::windows::{ctrl_break, ctrl_c};

        let mut ctrl_c = ctrl_c()?;
        let mut ctrl_break = ctrl_break()?;

        Ok(Self::spawn(|tx| async move {
            loop {
                let received = tokio::select! {
                    Some(()) = ctrl_c.recv() => ForwardedSignal::Interrupt,
                    Some(()) = ctrl_break.recv() => ForwardedSignal::Terminate,
                    else => break,
                };
                if tx.send(received).is_err() {
                    break;
                }
            }
        }))
    }

    fn spawn<F, Fut>(listen: F) -> Self
    where
        F: FnOnce(mpsc::UnboundedSender<ForwardedSignal>) -> Fut,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let (tx, received) = mpsc::unbounded_channel();
        let handle = tokio::spawn(listen(tx));
        Self { handle, received }
    }

    /// Next signal received since the last call. Cancel safe.
    pub async fn recv(&mut self) -> Option<ForwardedSignal> {
        self.received.recv().await
    }

    /// Stop listening. The listeners stay registered with the OS, so later
    /// signals are still swallowed rather than terminating the launcher.
    pub fn stop(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_slot_lifecycle() {
        let slot = ChildSlot::new();
        assert_eq!(slot.pid(), None);

        slot.set(4242);
        assert_eq!(slot.pid(), Some(4242));

        let shared = slot.clone();
        assert_eq!(shared.pid(), Some(4242));

        shared.clear();
        assert_eq!(slot.pid(), None);
    }

    #[test]
    fn test_child_slot_survives_poisoning() {
        let slot = ChildSlot::new();
        let poisoner = slot.clone();
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.inner.lock().unwrap();
            panic!("poison the slot");
        })
        .join();

        slot.set(7);
        assert_eq!(slot.pid(), Some(7));
    }

    #[cfg(unix)]
    #[test]
    fn test_forward_without_child_is_noop() {
        let slot = ChildSlot::new();
        assert!(!forward(&slot, ForwardedSignal::Terminate));
    }

    #[cfg(unix)]
    #[test]
    fn test_forward_delivers_to_child() {
        use std::os::unix::process::ExitStatusExt;

        let mut child = std::process::Command::new("sleep")
            .arg("30")
            .spawn()
            .unwrap();
        let slot = ChildSlot::new();
        slot.set(child.id());

        assert!(forward(&slot, ForwardedSignal::Hangup));

        let status = child.wait().unwrap();
        assert_eq!(status.signal(), Some(nix::libc::SIGHUP));
    }

    #[cfg(windows)]
    #[test]
    fn test_forward_is_left_to_the_console() {
        let slot = ChildSlot::new();
        slot.set(42);
        assert!(!forward(&slot, ForwardedSignal::Interrupt));
    }

    #[test_log::test(tokio::test)]
    async fn test_forwarder_install_and_stop() {
        let forwarder = SignalForwarder::install().unwrap();
        forwarder.stop();
    }

    #[test_log::test(tokio::test)]
    async fn test_forwarder_queues_received_signals_in_order() {
        let mut forwarder = SignalForwarder::spawn(|tx| async move {
            tx.send(ForwardedSignal::Interrupt).unwrap();
            tx.send(ForwardedSignal::Hangup).unwrap();
        });

        assert_eq!(forwarder.recv().await, Some(ForwardedSignal::Interrupt));
        assert_eq!(forwarder.recv().await, Some(ForwardedSignal::Hangup));
        // The listener finished and dropped its sender
        assert_eq!(forwarder.recv().await, None);
        forwarder.stop();
    }
}

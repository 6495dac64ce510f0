use std::process::ExitStatus;

/// How the child process terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Normal exit; the code may be absent on some platforms.
    Code(Option<i32>),
    /// Killed by the given signal number.
    Signal(i32),
}

impl ExitOutcome {
    pub fn from_status(status: ExitStatus) -> Self {
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return Self::Signal(signal);
            }
        }
        Self::Code(status.code())
    }

    /// Exit code the launcher mirrors: the child's code (0 if absent), or
    /// `128 + N` for a signal, with N = 15 for terminate, 2 for interrupt and
    /// 1 for hangup or anything else.
    pub fn exit_code(&self) -> i32 {
        match *self {
            Self::Code(code) => code.unwrap_or(0),
            Self::Signal(signal) => 128 + signal_exit_offset(signal),
        }
    }
}

#[cfg(unix)]
fn signal_exit_offset(signal: i32) -> i32 {
    use nix::sys::signal::Signal;

    match Signal::try_from(signal) {
        Ok(Signal::SIGTERM) => 15,
        Ok(Signal::SIGINT) => 2,
        _ => 1,
    }
}

#[cfg(not(unix))]
fn signal_exit_offset(_signal: i32) -> i32 {
    1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_mirrors_child_code() {
        assert_eq!(ExitOutcome::Code(Some(3)).exit_code(), 3);
        assert_eq!(ExitOutcome::Code(Some(0)).exit_code(), 0);
        assert_eq!(ExitOutcome::Code(Some(255)).exit_code(), 255);
    }

    #[test]
    fn test_missing_code_exits_zero() {
        assert_eq!(ExitOutcome::Code(None).exit_code(), 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_signal_exit_codes() {
        assert_eq!(ExitOutcome::Signal(15).exit_code(), 143);
        assert_eq!(ExitOutcome::Signal(2).exit_code(), 130);
        assert_eq!(ExitOutcome::Signal(1).exit_code(), 129);
    }

    #[cfg(unix)]
    #[test]
    fn test_unmapped_signals_exit_129() {
        assert_eq!(ExitOutcome::Signal(9).exit_code(), 129);
        assert_eq!(ExitOutcome::Signal(11).exit_code(), 129);
        assert_eq!(ExitOutcome::Signal(-1).exit_code(), 129);
    }

    #[cfg(unix)]
    #[test]
    fn test_from_status() {
        use std::os::unix::process::ExitStatusExt;

        // Raw wait statuses: exit code in the high byte, signal in the low bits
        assert_eq!(
            ExitOutcome::from_status(ExitStatus::from_raw(3 << 8)),
            ExitOutcome::Code(Some(3))
        );
        assert_eq!(
            ExitOutcome::from_status(ExitStatus::from_raw(2)),
            ExitOutcome::Signal(2)
        );
    }
}

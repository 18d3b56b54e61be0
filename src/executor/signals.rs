#[cfg(unix)]
use std::thread;

#[cfg(unix)]
use signal_hook::consts::signal::{SIGHUP, SIGINT, SIGQUIT, SIGTERM};
#[cfg(unix)]
use signal_hook::iterator::Signals;

/// Keeps ccenv alive for as long as the child runs.
///
/// SIGINT and SIGQUIT come from the terminal, which already delivers them to
/// the whole foreground group, so they are absorbed here. SIGTERM and SIGHUP
/// are usually aimed at ccenv alone and are passed on to the child.
pub(crate) struct SignalRelay {
    #[cfg(unix)]
    handle: signal_hook::iterator::Handle,
    #[cfg(unix)]
    thread: thread::JoinHandle<()>,
}

impl SignalRelay {
    /// `None` if the handlers could not be installed; the child still runs.
    pub(crate) fn start(child_pid: u32) -> Option<Self> {
        #[cfg(unix)]
        {
            let mut signals = match Signals::new([SIGINT, SIGQUIT, SIGTERM, SIGHUP]) {
                Ok(signals) => signals,
                Err(e) => {
                    tracing::debug!("Signal handlers unavailable: {e}");
                    return None;
                }
            };
            let handle = signals.handle();
            let pid = child_pid as libc::pid_t;
            let thread = thread::spawn(move || {
                for signal in signals.forever() {
                    if matches!(signal, SIGTERM | SIGHUP) {
                        tracing::debug!(signal, pid, "Forwarding signal to child");
                        // SAFETY: plain kill(2) on the pid we spawned.
                        unsafe {
                            libc::kill(pid, signal);
                        }
                    } else {
                        tracing::debug!(signal, "Terminal signal left to the child");
                    }
                }
            });
            Some(Self { handle, thread })
        }

        #[cfg(not(unix))]
        {
            let _ = child_pid;
            Some(Self {})
        }
    }

    pub(crate) fn stop(self) {
        #[cfg(unix)]
        {
            self.handle.close();
            let _ = self.thread.join();
        }
    }
}

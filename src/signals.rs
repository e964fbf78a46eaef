//! Interrupt and suspend interception.
//!
//! Ctrl-C and Ctrl-Z must not end or stop the shell. Each signal line is
//! registered once with `signal-hook`; its async-signal-safe handler only
//! wakes a watcher thread, and the watcher prints a notice pointing at
//! `myquit`. Registrations persist across deliveries.

use anyhow::{Context, Result};
use signal_hook::consts::{SIGINT, SIGTSTP};
use signal_hook::iterator::{Handle, Signals};
use std::io::Write;
use std::os::raw::c_int;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread::JoinHandle;

/// A signal the shell intercepts, with the name its notice uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SignalLine {
    pub signal: c_int,
    pub name: &'static str,
}

pub const INTERRUPT: SignalLine = SignalLine {
    signal: SIGINT,
    name: "SIGINT",
};

pub const SUSPEND: SignalLine = SignalLine {
    signal: SIGTSTP,
    name: "SIGTSTP",
};

impl SignalLine {
    /// Text written when this signal arrives.
    pub fn notice(&self) -> String {
        format!("\n{} received. Use 'myquit' to exit the shell.\n", self.name)
    }

    fn arm<W>(self, mut sink: W, delivered: Arc<AtomicUsize>) -> Result<ArmedLine>
    where
        W: Write + Send + 'static,
    {
        let mut signals = Signals::new([self.signal])
            .with_context(|| format!("cannot register {} handler", self.name))?;
        let handle = signals.handle();
        let thread = std::thread::Builder::new()
            .name(format!("{}-watch", self.name.to_lowercase()))
            .spawn(move || {
                for _ in signals.forever() {
                    if let Err(e) = sink
                        .write_all(self.notice().as_bytes())
                        .and_then(|()| sink.flush())
                    {
                        log::warn!("cannot write {} notice: {e}", self.name);
                    }
                    delivered.fetch_add(1, Ordering::SeqCst);
                }
            })
            .with_context(|| format!("cannot start {} watcher", self.name))?;
        log::debug!("{} armed", self.name);
        Ok(ArmedLine {
            handle,
            thread: Some(thread),
        })
    }
}

struct ArmedLine {
    handle: Handle,
    thread: Option<JoinHandle<()>>,
}

/// Keeps the interrupt and suspend lines armed while alive.
///
/// Each line has its own handler and watcher thread. Dropping the guard
/// stops the watchers.
pub struct SignalGuard {
    lines: Vec<ArmedLine>,
    delivered: Arc<AtomicUsize>,
}

impl SignalGuard {
    /// Arm [`INTERRUPT`] and [`SUSPEND`], writing notices to `sink`.
    pub fn install<W>(sink: W) -> Result<Self>
    where
        W: Write + Clone + Send + 'static,
    {
        Self::install_lines(&[INTERRUPT, SUSPEND], sink)
    }

    /// Arm an explicit set of signal lines.
    pub fn install_lines<W>(lines: &[SignalLine], sink: W) -> Result<Self>
    where
        W: Write + Clone + Send + 'static,
    {
        let delivered = Arc::new(AtomicUsize::new(0));
        let lines = lines
            .iter()
            .map(|line| line.arm(sink.clone(), delivered.clone()))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { lines, delivered })
    }

    /// Number of notices written since installation.
    pub fn delivered(&self) -> usize {
        self.delivered.load(Ordering::SeqCst)
    }
}

impl Drop for SignalGuard {
    fn drop(&mut self) {
        for line in &self.lines {
            line.handle.close();
        }
        for line in &mut self.lines {
            if let Some(thread) = line.thread.take() {
                let _ = thread.join();
            }
        }
    }
}

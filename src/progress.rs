//! Optional human-readable progress reporting.
//!
//! Stages receive a `&mut dyn ProgressSink`, announce a phase with `start` and
//! report completed work in percent with `advance`. Sinks only observe; they
//! cannot influence results.
use std::io::{self, Stdout, Write};

/// Width of the phase label column of [`ConsoleProgress`].
pub const LABEL_CAPACITY: usize = 51;

pub trait ProgressSink {
    /// Begin a named phase.
    fn start(&mut self, label: &str);
    /// Report `percent` more of the overall work as done.
    fn advance(&mut self, percent: u32);
}

/// Discards every update.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn start(&mut self, _label: &str) {}
    fn advance(&mut self, _percent: u32) {}
}

/// Prints each phase on its own line followed by one `#` per percent.
#[derive(Debug)]
pub struct ConsoleProgress<W: Write> {
    out: W,
    label_capacity: usize,
}

impl ConsoleProgress<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleProgress<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            label_capacity: LABEL_CAPACITY,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> ProgressSink for ConsoleProgress<W> {
    fn start(&mut self, label: &str) {
        let _ = write!(self.out, "\n{label:<width$}", width = self.label_capacity);
        let _ = self.out.flush();
    }

    fn advance(&mut self, percent: u32) {
        let _ = write!(self.out, "{}", "#".repeat(percent as usize));
        let _ = self.out.flush();
    }
}

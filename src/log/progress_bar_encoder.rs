//! Log lines and the run's progress bar share the terminal. Without clearing the line first, a
//! log message shorter than the bar leaves the tail of the bar behind it.

use log::Record;
use log4rs::encode::{Encode, Write};

/// Wraps another encoder and clears the current terminal line before each record.
#[derive(Debug)]
pub struct PBWrapperEncoder {
    inner: Box<dyn Encode>,
}

impl PBWrapperEncoder {
    pub fn new(inner: Box<dyn Encode>) -> Self {
        Self { inner }
    }
}

impl Encode for PBWrapperEncoder {
    fn encode(&self, w: &mut dyn Write, record: &Record) -> Result<(), anyhow::Error> {
        // Erase line, carriage return.
        w.write_all(b"\x1B[2K\r")?;
        self.inner.encode(w, record)
    }
}

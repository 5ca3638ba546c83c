//! The history of aggregate state counts that backs the cumulative chart.
//!
//! One sample is recorded per tick, in order, until the configured resolution (the chart's
//! width in columns) is reached. The recorder never wraps or overwrites: once it is complete,
//! further samples are refused and the run is over.

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::error::OutbreakError;
use crate::population::StateCounts;

/// One recorded snapshot of the population's state counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySample {
    pub tick: usize,
    pub healthy: usize,
    pub sick: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl HistorySample {
    #[must_use]
    pub fn total(&self) -> usize {
        self.healthy + self.sick + self.recovered + self.dead
    }

    #[must_use]
    pub fn counts(&self) -> StateCounts {
        StateCounts {
            healthy: self.healthy,
            sick: self.sick,
            recovered: self.recovered,
            dead: self.dead,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryRecorder {
    resolution: usize,
    samples: Vec<HistorySample>,
}

impl HistoryRecorder {
    #[must_use]
    pub fn new(resolution: usize) -> HistoryRecorder {
        HistoryRecorder {
            resolution,
            samples: Vec::new(),
        }
    }

    /// Appends one sample built from `counts`. Call exactly once per population tick.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::RecorderExhausted` if the recorder is already complete; the
    /// series is left unchanged.
    pub fn sample(&mut self, counts: StateCounts) -> Result<&HistorySample, OutbreakError> {
        if self.is_complete() {
            return Err(OutbreakError::RecorderExhausted {
                resolution: self.resolution,
            });
        }
        let tick = self.samples.len();
        let sample = HistorySample {
            tick,
            healthy: counts.healthy,
            sick: counts.sick,
            recovered: counts.recovered,
            dead: counts.dead,
        };
        self.samples.push(sample);
        if self.is_complete() {
            trace!("history recorder complete after {} samples", self.resolution);
        }
        Ok(&self.samples[tick])
    }

    /// True once the number of samples equals the resolution.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.samples.len() >= self.resolution
    }

    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn samples(&self) -> &[HistorySample] {
        &self.samples
    }

    #[must_use]
    pub fn latest(&self) -> Option<&HistorySample> {
        self.samples.last()
    }
}

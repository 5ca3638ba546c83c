//! Simulation parameters.
//!
//! Two kinds of values shape a run:
//!
//! * [`Constants`] are the fixed physics and disease constants: movement speed, how long a
//!   sickness lasts, how likely a person is to be vulnerable, and the radius table. They are
//!   passed to the population at construction and never change during a run. They are not
//!   loadable from a configuration file.
//! * [`Parameters`] describe one run: population size, number of patient zeroes, quarantine
//!   rate, arena size and chart resolution. They can be loaded from a JSON file and are
//!   validated before anything is built.

use std::fs;
use std::path::Path;

use log::trace;
use serde_derive::{Deserialize, Serialize};

use crate::error::OutbreakError;
use crate::geometry::Bounds;

/// Distance an individual travels per tick.
pub const SPEED: f64 = 2.0;
/// Number of ticks a sickness lasts before it resolves.
pub const SICK_DURATION: u32 = 275;
/// Probability that an individual is vulnerable, i.e. dies instead of recovering.
pub const VULNERABLE_PROBABILITY: f64 = 0.01;

/// Maps a population size to the radius shared by all of its individuals. Each entry is an
/// exclusive upper bound on the population size and the radius used below it; sizes past the
/// last entry use `fallback`.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusTable {
    pub steps: Vec<(usize, f64)>,
    pub fallback: f64,
}

impl RadiusTable {
    #[must_use]
    pub fn radius_for(&self, population_size: usize) -> f64 {
        self.steps
            .iter()
            .find(|(limit, _)| population_size < *limit)
            .map_or(self.fallback, |(_, radius)| *radius)
    }
}

impl Default for RadiusTable {
    fn default() -> Self {
        RadiusTable {
            steps: vec![(250, 12.0), (500, 8.0)],
            fallback: 5.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Constants {
    pub speed: f64,
    pub sick_duration: u32,
    pub vulnerable_probability: f64,
    pub radius_table: RadiusTable,
}

impl Default for Constants {
    fn default() -> Self {
        Constants {
            speed: SPEED,
            sick_duration: SICK_DURATION,
            vulnerable_probability: VULNERABLE_PROBABILITY,
            radius_table: RadiusTable::default(),
        }
    }
}

/// The configuration of a single run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub population_size: usize,
    pub patient_zero_count: usize,
    /// Fraction of the population, by index, that does not move.
    pub quarantine_rate: f64,
    pub arena_width: f64,
    pub arena_height: f64,
    /// Number of history samples the chart holds, one per tick. The run ends when it is full.
    pub chart_resolution: usize,
    pub chart_height: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            population_size: 1000,
            patient_zero_count: 3,
            quarantine_rate: 0.0,
            arena_width: 600.0,
            arena_height: 400.0,
            chart_resolution: 600,
            chart_height: 100.0,
        }
    }
}

impl Parameters {
    /// Reads parameters from a JSON file. Fields missing from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an `OutbreakError` if the file cannot be read or parsed, or if the resulting
    /// parameters are invalid.
    pub fn load(path: &Path) -> Result<Parameters, OutbreakError> {
        trace!("loading parameters from {}", path.display());
        let contents = fs::read_to_string(path)?;
        let parameters: Parameters = serde_json::from_str(&contents)?;
        parameters.validate()?;
        Ok(parameters)
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.arena_width, self.arena_height)
    }

    /// Checks that a population and a history recorder can be built from these parameters.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::InvalidConfiguration` describing the first problem found.
    pub fn validate(&self) -> Result<(), OutbreakError> {
        validate_population(
            self.population_size,
            self.quarantine_rate,
            self.patient_zero_count,
        )?;
        let bounds = self.bounds();
        if !bounds.fits(0.0) {
            return Err(invalid(format!(
                "arena must have a positive size, got {}x{}",
                bounds.width, bounds.height
            )));
        }
        if self.chart_resolution == 0 {
            return Err(invalid("chart resolution must be at least 1"));
        }
        if !self.chart_height.is_finite() || self.chart_height <= 0.0 {
            return Err(invalid(format!(
                "chart height must be positive, got {}",
                self.chart_height
            )));
        }
        Ok(())
    }
}

pub(crate) fn invalid(message: impl Into<String>) -> OutbreakError {
    OutbreakError::InvalidConfiguration(message.into())
}

/// The checks shared by [`Parameters::validate`] and population construction.
pub(crate) fn validate_population(
    size: usize,
    quarantine_rate: f64,
    patient_zero_count: usize,
) -> Result<(), OutbreakError> {
    if size == 0 {
        return Err(invalid("population size must be at least 1"));
    }
    if !(0.0..=1.0).contains(&quarantine_rate) {
        return Err(invalid(format!(
            "quarantine rate must be within [0, 1], got {quarantine_rate}"
        )));
    }
    if patient_zero_count > size {
        return Err(invalid(format!(
            "patient zero count {patient_zero_count} exceeds population size {size}"
        )));
    }
    Ok(())
}

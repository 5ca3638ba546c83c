//! The population: a fixed, ordered set of individuals sharing one arena.
//!
//! Individuals are created once and never removed, so an individual's index is its id for the
//! whole run. [`Population::advance`] ticks every individual once, in index order, against the
//! live collection. Infection is applied in place: someone infected early in a pass is already
//! sick when their own turn comes and can pass the infection on during the same tick.

use log::{debug, trace};
use serde_derive::Serialize;

use crate::define_rng;
use crate::error::OutbreakError;
use crate::geometry::Bounds;
use crate::individual::{HealthStatus, Individual, IndividualId, TickReport};
use crate::parameters::{invalid, validate_population, Constants, Parameters};
use crate::random::RandomSource;

define_rng!(VulnerabilityRng);

/// Number of individuals in each state. The four counts always add up to the population size.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StateCounts {
    pub healthy: usize,
    pub sick: usize,
    pub recovered: usize,
    pub dead: usize,
}

impl StateCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.healthy + self.sick + self.recovered + self.dead
    }

    #[must_use]
    pub fn get(&self, status: HealthStatus) -> usize {
        match status {
            HealthStatus::Healthy => self.healthy,
            HealthStatus::Sick => self.sick,
            HealthStatus::Recovered => self.recovered,
            HealthStatus::Dead => self.dead,
        }
    }

    fn increment(&mut self, status: HealthStatus) {
        match status {
            HealthStatus::Healthy => self.healthy += 1,
            HealthStatus::Sick => self.sick += 1,
            HealthStatus::Recovered => self.recovered += 1,
            HealthStatus::Dead => self.dead += 1,
        }
    }
}

/// State changes that happened during one call to [`Population::advance`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickSummary {
    pub new_infections: usize,
    pub recoveries: usize,
    pub deaths: usize,
}

impl TickSummary {
    fn record(&mut self, report: TickReport) {
        self.new_infections += report.infected;
        match report.resolved {
            Some(HealthStatus::Recovered) => self.recoveries += 1,
            Some(HealthStatus::Dead) => self.deaths += 1,
            _ => {}
        }
    }
}

#[derive(Debug, Clone)]
pub struct Population {
    individuals: Vec<Individual>,
    bounds: Bounds,
    quarantine_rate: f64,
    radius: f64,
    constants: Constants,
}

impl Population {
    /// Creates `size` individuals at random positions.
    ///
    /// * The radius comes from the size via `constants.radius_table`.
    /// * The last `patient_zero_count` individuals start sick.
    /// * Individual `i` is quarantined when `i / size <= quarantine_rate`.
    /// * Each individual is vulnerable with probability `constants.vulnerable_probability`.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::InvalidConfiguration` if the size is zero, the quarantine rate is
    /// outside `[0, 1]`, there are more patient zeroes than individuals, or the arena cannot
    /// hold an individual. Nothing is built in that case.
    pub fn new(
        size: usize,
        quarantine_rate: f64,
        patient_zero_count: usize,
        bounds: Bounds,
        constants: Constants,
        random: &RandomSource,
    ) -> Result<Population, OutbreakError> {
        validate_population(size, quarantine_rate, patient_zero_count)?;
        validate_constants(&constants)?;
        let radius = constants.radius_table.radius_for(size);
        if !bounds.fits(radius) {
            return Err(invalid(format!(
                "a {}x{} arena cannot hold individuals of radius {radius}",
                bounds.width, bounds.height
            )));
        }

        trace!(
            "creating population of {} with {} patient zeroes and quarantine rate {}",
            size,
            patient_zero_count,
            quarantine_rate
        );
        let first_patient_zero = size - patient_zero_count;
        #[allow(clippy::cast_precision_loss)]
        let individuals = (0..size)
            .map(|id| {
                let status = if id >= first_patient_zero {
                    HealthStatus::Sick
                } else {
                    HealthStatus::Healthy
                };
                let quarantined = id as f64 / size as f64 <= quarantine_rate;
                let vulnerable =
                    random.sample_bool(VulnerabilityRng, constants.vulnerable_probability);
                Individual::spawn(
                    id,
                    radius,
                    &bounds,
                    constants.speed,
                    status,
                    quarantined,
                    vulnerable,
                    random,
                )
            })
            .collect();

        Ok(Population {
            individuals,
            bounds,
            quarantine_rate,
            radius,
            constants,
        })
    }

    /// Creates a population as described by `parameters`.
    ///
    /// # Errors
    ///
    /// See [`Population::new`].
    pub fn from_parameters(
        parameters: &Parameters,
        constants: Constants,
        random: &RandomSource,
    ) -> Result<Population, OutbreakError> {
        Population::new(
            parameters.population_size,
            parameters.quarantine_rate,
            parameters.patient_zero_count,
            parameters.bounds(),
            constants,
            random,
        )
    }

    /// Builds a population from individuals that were already placed, e.g. to replay a known
    /// arrangement. Each individual's id must equal its index and all must share one radius.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::InvalidConfiguration` if the list is empty, the ids are not the
    /// indices, the radii differ, or the arena cannot hold an individual.
    pub fn from_individuals(
        individuals: Vec<Individual>,
        bounds: Bounds,
        constants: Constants,
    ) -> Result<Population, OutbreakError> {
        validate_constants(&constants)?;
        let Some(first) = individuals.first() else {
            return Err(invalid("population size must be at least 1"));
        };
        let radius = first.radius();
        validate_radius(radius)?;
        if let Some((index, individual)) = individuals
            .iter()
            .enumerate()
            .find(|(index, individual)| individual.id() != *index)
        {
            return Err(invalid(format!(
                "individual at index {index} has id {}",
                individual.id()
            )));
        }
        if individuals.iter().any(|individual| individual.radius() != radius) {
            return Err(invalid("all individuals must share one radius"));
        }
        if !bounds.fits(radius) {
            return Err(invalid(format!(
                "a {}x{} arena cannot hold individuals of radius {radius}",
                bounds.width, bounds.height
            )));
        }

        #[allow(clippy::cast_precision_loss)]
        let quarantine_rate = individuals
            .iter()
            .filter(|individual| individual.is_quarantined())
            .count() as f64
            / individuals.len() as f64;

        Ok(Population {
            individuals,
            bounds,
            quarantine_rate,
            radius,
            constants,
        })
    }

    /// Ticks every individual once, in index order. Each individual sees the others as they are
    /// at its turn, including infections made earlier in this pass.
    pub fn advance(&mut self) -> TickSummary {
        let mut summary = TickSummary::default();
        for index in 0..self.individuals.len() {
            let (before, rest) = self.individuals.split_at_mut(index);
            let Some((current, after)) = rest.split_first_mut() else {
                break;
            };
            let report = current.tick(
                before.iter_mut().chain(after.iter_mut()),
                &self.bounds,
                &self.constants,
            );
            summary.record(report);
        }
        debug!(
            "tick: {} new infections, {} recoveries, {} deaths",
            summary.new_infections,
            summary.recoveries,
            summary.deaths
        );
        summary
    }

    #[must_use]
    pub fn counts(&self) -> StateCounts {
        let mut counts = StateCounts::default();
        for individual in &self.individuals {
            counts.increment(individual.status());
        }
        counts
    }

    #[must_use]
    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    #[must_use]
    pub fn get(&self, id: IndividualId) -> Option<&Individual> {
        self.individuals.get(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.individuals.len()
    }

    /// Always false for a constructed population; present for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.individuals.is_empty()
    }

    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn quarantine_rate(&self) -> f64 {
        self.quarantine_rate
    }

    #[must_use]
    pub fn constants(&self) -> &Constants {
        &self.constants
    }
}

fn validate_constants(constants: &Constants) -> Result<(), OutbreakError> {
    if !constants.speed.is_finite() {
        return Err(invalid(format!(
            "speed must be finite, got {}",
            constants.speed
        )));
    }
    if !(0.0..=1.0).contains(&constants.vulnerable_probability) {
        return Err(invalid(format!(
            "vulnerable probability must be within [0, 1], got {}",
            constants.vulnerable_probability
        )));
    }
    let table = &constants.radius_table;
    for radius in table
        .steps
        .iter()
        .map(|(_, radius)| *radius)
        .chain([table.fallback])
    {
        validate_radius(radius)?;
    }
    Ok(())
}

fn validate_radius(radius: f64) -> Result<(), OutbreakError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(invalid(format!("radius must be positive, got {radius}")))
    }
}

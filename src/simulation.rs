//! Run control.
//!
//! A [`Simulation`] owns one population and the history recorder that watches it. Each
//! [`Simulation::step`] advances the population by one tick and records one sample; the run is
//! over once the recorder holds `chart_resolution` samples. Starting over means building a new
//! `Simulation`.
//!
//! ```
//! use outbreak::parameters::{Constants, Parameters};
//! use outbreak::simulation::Simulation;
//!
//! let parameters = Parameters {
//!     population_size: 50,
//!     chart_resolution: 20,
//!     ..Parameters::default()
//! };
//! let mut simulation = Simulation::new(parameters, Constants::default(), 7).unwrap();
//! let counts = simulation.run().unwrap();
//! assert_eq!(counts.total(), 50);
//! assert!(simulation.is_finished());
//! ```

use log::info;
use serde_derive::{Deserialize, Serialize};

use crate::chart::StackedColumn;
use crate::define_report;
use crate::error::OutbreakError;
use crate::execution_stats::{ExecutionProfilingCollector, ExecutionStatistics};
use crate::history::{HistoryRecorder, HistorySample};
use crate::parameters::{Constants, Parameters};
use crate::population::{Population, StateCounts, TickSummary};
use crate::random::RandomSource;
use crate::report::{ReportOptions, Reports};

define_report!(HistorySample);

/// One row of the `incidence` report: the state changes of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidenceReportItem {
    pub tick: usize,
    pub new_infections: usize,
    pub recoveries: usize,
    pub deaths: usize,
}

define_report!(IncidenceReportItem);

impl IncidenceReportItem {
    fn new(tick: usize, summary: TickSummary) -> IncidenceReportItem {
        IncidenceReportItem {
            tick,
            new_infections: summary.new_infections,
            recoveries: summary.recoveries,
            deaths: summary.deaths,
        }
    }
}

pub struct Simulation {
    parameters: Parameters,
    random: RandomSource,
    population: Population,
    recorder: HistoryRecorder,
    reports: Reports,
    #[cfg_attr(not(feature = "progress_bar"), allow(dead_code))]
    show_progress: bool,
    execution_profiler: ExecutionProfilingCollector,
}

impl Simulation {
    /// Builds the population for `parameters` from `seed`, with an empty history.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::InvalidConfiguration` if the parameters or constants are invalid.
    pub fn new(
        parameters: Parameters,
        constants: Constants,
        seed: u64,
    ) -> Result<Simulation, OutbreakError> {
        parameters.validate()?;
        let random = RandomSource::new(seed);
        let population = Population::from_parameters(&parameters, constants, &random)?;
        let recorder = HistoryRecorder::new(parameters.chart_resolution);
        info!(
            "new simulation: {} individuals, {} patient zeroes, quarantine rate {}, seed {}",
            parameters.population_size,
            parameters.patient_zero_count,
            parameters.quarantine_rate,
            seed
        );
        Ok(Simulation {
            parameters,
            random,
            population,
            recorder,
            reports: Reports::new(),
            show_progress: false,
            execution_profiler: ExecutionProfilingCollector::new(),
        })
    }

    /// Opens the `history` and `incidence` CSV reports. Every later step writes one row to
    /// each.
    ///
    /// # Errors
    ///
    /// Returns an `OutbreakError` if a report file cannot be created, including when it already
    /// exists and `options.overwrite` is off.
    pub fn enable_reports(&mut self, options: ReportOptions) -> Result<(), OutbreakError> {
        *self.reports.report_options() = options;
        self.reports.add_report::<HistorySample>("history")?;
        self.reports.add_report::<IncidenceReportItem>("incidence")?;
        Ok(())
    }

    /// Shows a progress bar over the remaining ticks during [`Simulation::run`].
    pub fn enable_progress_bar(&mut self) {
        self.show_progress = true;
    }

    /// Advances the population by one tick and records the resulting counts.
    ///
    /// # Errors
    ///
    /// Returns `OutbreakError::RecorderExhausted` once the run is finished; the population is
    /// not advanced in that case. Report write failures are returned as well.
    pub fn step(&mut self) -> Result<HistorySample, OutbreakError> {
        if self.recorder.is_complete() {
            return Err(OutbreakError::RecorderExhausted {
                resolution: self.recorder.resolution(),
            });
        }
        let summary = self.population.advance();
        let sample = *self.recorder.sample(self.population.counts())?;

        if self.reports.has_report::<HistorySample>() {
            self.reports.send_report(&sample)?;
        }
        if self.reports.has_report::<IncidenceReportItem>() {
            self.reports
                .send_report(&IncidenceReportItem::new(sample.tick, summary))?;
        }

        #[cfg(feature = "progress_bar")]
        if self.show_progress {
            crate::progress::update_tick_progress(self.recorder.len());
        }
        self.execution_profiler.refresh();
        Ok(sample)
    }

    /// Steps until the history is full and returns the final counts. Calling it on a finished
    /// simulation returns the counts without stepping.
    ///
    /// # Errors
    ///
    /// Returns the first error from [`Simulation::step`].
    pub fn run(&mut self) -> Result<StateCounts, OutbreakError> {
        #[cfg(feature = "progress_bar")]
        if self.show_progress && !self.is_finished() {
            crate::progress::init_tick_progress_bar(self.recorder.resolution());
            crate::progress::update_tick_progress(self.recorder.len());
        }

        while !self.is_finished() {
            self.step()?;
        }

        let counts = self.counts();
        info!(
            "simulation finished after {} ticks: {} healthy, {} sick, {} recovered, {} dead",
            self.tick(),
            counts.healthy,
            counts.sick,
            counts.recovered,
            counts.dead
        );
        Ok(counts)
    }

    /// True once the history holds one sample per chart column.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.recorder.is_complete()
    }

    /// Number of ticks run so far.
    #[must_use]
    pub fn tick(&self) -> usize {
        self.recorder.len()
    }

    #[must_use]
    pub fn counts(&self) -> StateCounts {
        self.population.counts()
    }

    #[must_use]
    pub fn population(&self) -> &Population {
        &self.population
    }

    #[must_use]
    pub fn recorder(&self) -> &HistoryRecorder {
        &self.recorder
    }

    #[must_use]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.random.base_seed()
    }

    /// The chart as recorded so far, one column per sample.
    #[must_use]
    pub fn chart_columns(&self) -> Vec<StackedColumn> {
        self.recorder
            .samples()
            .iter()
            .map(|sample| StackedColumn::from_sample(sample, self.parameters.chart_height))
            .collect()
    }

    /// Resource use since the simulation was built.
    pub fn execution_statistics(&mut self) -> ExecutionStatistics {
        self.execution_profiler
            .compute_final_statistics(self.population.len(), self.tick())
    }
}

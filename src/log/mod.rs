//! Logging for the simulation. This is about diagnostics, not results: the counts a run
//! produces are written by [`crate::report`].
//!
//! This module (re)exports the five logging macros `error!`, `warn!`, `info!`, `debug!` and
//! `trace!`. Logging is _disabled_ by default and is turned on with the command line option
//! `--log-level <level>` or from code:
//!
//!  - `enable_logging()`: turns on all log messages
//!  - `disable_logging()`: turns off all log messages
//!  - `set_log_level(level: LevelFilter)`: enables only log messages with priority at least `level`
//!
//! Per-module filtering is configured with `set_module_filter()` / `set_module_filters()` and
//! `remove_module_filter()`:
//!
//! ```rust
//! use outbreak::log::{set_log_level, set_module_filter, LevelFilter};
//!
//! // Per-tick summaries, but not every single infection.
//! set_log_level(LevelFilter::Debug);
//! set_module_filter("outbreak::individual", LevelFilter::Info);
//! ```
#[cfg(feature = "logging")]
mod standard_logger;

#[cfg(not(feature = "logging"))]
mod null_logger;

#[cfg(all(feature = "logging", feature = "progress_bar"))]
mod progress_bar_encoder;

use std::collections::hash_map::Entry;
use std::str::FromStr;
use std::sync::{LazyLock, Mutex, MutexGuard};

pub use log::{debug, error, info, trace, warn, LevelFilter};
#[cfg(feature = "logging")]
use log4rs::Handle;

use crate::error::OutbreakError;
use crate::hashing::HashMap;

// Logging disabled
const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Off;

/// A global instance of the logging configuration.
static LOG_CONFIGURATION: LazyLock<Mutex<LogConfiguration>> = LazyLock::new(Mutex::default);

/// Holds the global level, the per-module levels, and a handle to the installed logger.
///
/// Loggers are installed globally, so there is exactly one of these. The public API is a set
/// of free functions that lock it and delegate.
#[derive(Debug)]
pub(in crate::log) struct LogConfiguration {
    /// Level for modules ("targets") without their own filter. `LevelFilter::Off` disables
    /// logging.
    pub(in crate::log) global_log_level: LevelFilter,
    pub(in crate::log) module_levels: HashMap<String, LevelFilter>,

    #[cfg(feature = "logging")]
    /// Handle to the `log4rs` logger.
    root_handle: Option<Handle>,
}

impl Default for LogConfiguration {
    fn default() -> Self {
        LogConfiguration {
            global_log_level: DEFAULT_LOG_LEVEL,
            module_levels: HashMap::default(),
            #[cfg(feature = "logging")]
            root_handle: None,
        }
    }
}

impl LogConfiguration {
    fn set_log_level(&mut self, level: LevelFilter) {
        self.global_log_level = level;
        self.set_config();
    }

    /// Returns true if the configuration was mutated, false otherwise.
    fn insert_module_filter(&mut self, module: &str, level: LevelFilter) -> bool {
        match self.module_levels.entry(module.to_string()) {
            Entry::Occupied(mut entry) => {
                if *entry.get() == level {
                    return false;
                }
                entry.insert(level);
            }
            Entry::Vacant(entry) => {
                entry.insert(level);
            }
        }
        true
    }

    fn set_module_filters(&mut self, module_filters: &[(&str, LevelFilter)]) {
        let mut mutated = false;
        for (module, level) in module_filters {
            mutated |= self.insert_module_filter(module, *level);
        }
        if mutated {
            self.set_config();
        }
    }

    fn remove_module_filter(&mut self, module: &str) {
        if self.module_levels.remove(module).is_some() {
            self.set_config();
        }
    }
}

// The public API

/// Enables the logger with no global level filter / full logging. Equivalent to
/// `set_log_level(LevelFilter::Trace)`.
pub fn enable_logging() {
    set_log_level(LevelFilter::Trace);
}

/// Disables logging completely. Equivalent to `set_log_level(LevelFilter::Off)`.
pub fn disable_logging() {
    set_log_level(LevelFilter::Off);
}

/// Sets the global log level. A global filter level of `LevelFilter::Off` disables logging.
pub fn set_log_level(level: LevelFilter) {
    get_log_configuration().set_log_level(level);
}

/// Sets a level filter for the given module path.
pub fn set_module_filter(module_path: &str, level_filter: LevelFilter) {
    get_log_configuration().set_module_filters(&[(module_path, level_filter)]);
}

/// Removes a module-specific level filter for the given module path. The global level filter will
/// apply to the module.
pub fn remove_module_filter(module_path: &str) {
    get_log_configuration().remove_module_filter(module_path);
}

/// Sets the level filters for a set of modules in one step.
pub fn set_module_filters(module_filters: &[(&str, LevelFilter)]) {
    get_log_configuration().set_module_filters(module_filters);
}

/// The current global log level.
#[must_use]
pub fn log_level() -> LevelFilter {
    get_log_configuration().global_log_level
}

/// Applies a `--log-level` argument. The argument is either a bare level (`info`), which sets
/// the global level, or a comma separated list of `module=level` pairs, which sets module
/// filters and turns on the global level at `error` so the named modules are heard.
///
/// # Errors
///
/// Returns `OutbreakError::InvalidConfiguration` if a level is not recognized. Nothing is
/// applied in that case.
pub fn apply_log_level_argument(argument: &str) -> Result<(), OutbreakError> {
    let (global, modules) = parse_log_level_argument(argument)?;
    let modules: Vec<(&str, LevelFilter)> = modules
        .iter()
        .map(|(module, level)| (module.as_str(), *level))
        .collect();
    let mut configuration = get_log_configuration();
    for (module, level) in &modules {
        configuration.insert_module_filter(module, *level);
    }
    configuration.set_log_level(global);
    Ok(())
}

type LogLevelArgument = (LevelFilter, Vec<(String, LevelFilter)>);

fn parse_log_level_argument(argument: &str) -> Result<LogLevelArgument, OutbreakError> {
    let parse_level = |text: &str| {
        LevelFilter::from_str(text.trim()).map_err(|_| {
            OutbreakError::InvalidConfiguration(format!("unknown log level: {text}"))
        })
    };

    if !argument.contains('=') {
        return Ok((parse_level(argument)?, Vec::new()));
    }

    let mut modules = Vec::new();
    for pair in argument.split(',').filter(|pair| !pair.trim().is_empty()) {
        let Some((module, level)) = pair.split_once('=') else {
            return Err(OutbreakError::InvalidConfiguration(format!(
                "expected module=level, got {pair}"
            )));
        };
        modules.push((module.trim().to_string(), parse_level(level)?));
    }
    Ok((LevelFilter::Error, modules))
}

/// Fetches the global `LogConfiguration`.
fn get_log_configuration() -> MutexGuard<'static, LogConfiguration> {
    LOG_CONFIGURATION.lock().expect("Mutex poisoned")
}

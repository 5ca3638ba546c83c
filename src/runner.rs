use std::path::PathBuf;

use clap::{Args, Command, FromArgMatches as _};

use crate::error::OutbreakError;
use crate::execution_stats::{log_execution_statistics, print_execution_statistics};
use crate::log::{apply_log_level_argument, info};
use crate::parameters::{Constants, Parameters};
use crate::population::StateCounts;
use crate::report::ReportOptions;
use crate::simulation::Simulation;

/// Command line arguments for a single run.
#[derive(Args, Debug, Default)]
pub struct BaseArgs {
    /// Random seed
    #[arg(short, long, default_value = "0")]
    pub random_seed: u64,

    /// Optional path to a JSON parameters file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fraction of the population that does not move, overriding the parameters file
    #[arg(short, long)]
    pub quarantine_rate: Option<f64>,

    /// Directory for the `history` and `incidence` CSV reports. No reports are written unless
    /// this or `--file-prefix` is given.
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Prefix for report file names
    #[arg(long)]
    pub file_prefix: Option<String>,

    /// Replace report files that already exist
    #[arg(short, long)]
    pub force_overwrite: bool,

    /// Log level, either `LEVEL` or `module=LEVEL,...`
    #[arg(long)]
    pub log_level: Option<String>,

    /// Do not print the execution summary
    #[arg(long)]
    pub no_stats: bool,

    /// Do not show the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

fn create_outbreak_cli() -> Command {
    let cli = Command::new("outbreak")
        .about("Simulates disease spreading through a population of moving individuals");
    BaseArgs::augment_args(cli)
}

/// Parses the command line and runs one simulation to completion.
///
/// # Errors
/// Returns an error if argument parsing, configuration, or the run fails
pub fn run_with_args() -> Result<Simulation, Box<dyn std::error::Error>> {
    let matches = create_outbreak_cli().get_matches();
    let args = BaseArgs::from_arg_matches(&matches)?;
    run_with_args_internal(args)
}

/// The parameters for `args`: the config file if given, otherwise the defaults, with command
/// line overrides applied and validated.
fn resolve_parameters(args: &BaseArgs) -> Result<Parameters, OutbreakError> {
    let mut parameters = match &args.config {
        Some(path) => {
            info!("loading parameters from {}", path.display());
            Parameters::load(path)?
        }
        None => Parameters::default(),
    };
    if let Some(quarantine_rate) = args.quarantine_rate {
        parameters.quarantine_rate = quarantine_rate;
    }
    parameters.validate()?;
    Ok(parameters)
}

fn report_options(args: &BaseArgs) -> Option<ReportOptions> {
    if args.output_dir.is_none() && args.file_prefix.is_none() {
        return None;
    }
    let mut options = ReportOptions::default();
    if let Some(output_dir) = &args.output_dir {
        options.directory(output_dir.clone());
    }
    if let Some(file_prefix) = &args.file_prefix {
        options.file_prefix(file_prefix.clone());
    }
    options.overwrite(args.force_overwrite);
    Some(options)
}

fn print_counts(counts: &StateCounts) {
    println!("━━━━ Final Counts ━━━━");
    println!("{:<25}{}", "Healthy:", counts.healthy);
    println!("{:<25}{}", "Sick:", counts.sick);
    println!("{:<25}{}", "Recovered:", counts.recovered);
    println!("{:<25}{}", "Dead:", counts.dead);
}

fn run_with_args_internal(args: BaseArgs) -> Result<Simulation, Box<dyn std::error::Error>> {
    if let Some(log_level) = &args.log_level {
        apply_log_level_argument(log_level)?;
    }

    let parameters = resolve_parameters(&args)?;
    let mut simulation = Simulation::new(parameters, Constants::default(), args.random_seed)?;

    if let Some(options) = report_options(&args) {
        simulation.enable_reports(options)?;
    }
    #[cfg(feature = "progress_bar")]
    if !args.no_progress {
        simulation.enable_progress_bar();
    }

    let counts = simulation.run()?;
    print_counts(&counts);

    let stats = simulation.execution_statistics();
    if args.no_stats {
        log_execution_statistics(&stats);
    } else {
        print_execution_statistics(&stats);
    }
    Ok(simulation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{tempdir, NamedTempFile};

    fn quiet_args() -> BaseArgs {
        BaseArgs {
            no_stats: true,
            no_progress: true,
            ..BaseArgs::default()
        }
    }

    fn small_config() -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"population_size": 30, "patient_zero_count": 1, "chart_resolution": 15}}"#
        )
        .unwrap();
        file
    }

    #[test]
    fn cli_parses_all_flags() {
        let matches = create_outbreak_cli()
            .try_get_matches_from([
                "outbreak",
                "--random-seed",
                "42",
                "--config",
                "params.json",
                "--quarantine-rate",
                "0.5",
                "--output-dir",
                "out",
                "--file-prefix",
                "run_",
                "--force-overwrite",
                "--log-level",
                "outbreak=debug",
                "--no-stats",
                "--no-progress",
            ])
            .unwrap();
        let args = BaseArgs::from_arg_matches(&matches).unwrap();
        assert_eq!(args.random_seed, 42);
        assert_eq!(args.config, Some(PathBuf::from("params.json")));
        assert_eq!(args.quarantine_rate, Some(0.5));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert_eq!(args.file_prefix.as_deref(), Some("run_"));
        assert!(args.force_overwrite);
        assert_eq!(args.log_level.as_deref(), Some("outbreak=debug"));
        assert!(args.no_stats);
        assert!(args.no_progress);
    }

    #[test]
    fn run_with_config_and_seed() {
        let config = small_config();
        let args = BaseArgs {
            random_seed: 42,
            config: Some(config.path().to_path_buf()),
            ..quiet_args()
        };
        let simulation = run_with_args_internal(args).unwrap();
        assert_eq!(simulation.seed(), 42);
        assert_eq!(simulation.population().len(), 30);
        assert!(simulation.is_finished());
        assert_eq!(simulation.tick(), 15);
    }

    #[test]
    fn quarantine_rate_overrides_config() {
        let config = small_config();
        let args = BaseArgs {
            config: Some(config.path().to_path_buf()),
            quarantine_rate: Some(0.5),
            ..quiet_args()
        };
        let parameters = resolve_parameters(&args).unwrap();
        assert_eq!(parameters.population_size, 30);
        assert!((parameters.quarantine_rate - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn invalid_quarantine_rate_fails_before_running() {
        let args = BaseArgs {
            quarantine_rate: Some(1.5),
            ..quiet_args()
        };
        assert!(run_with_args_internal(args).is_err());
    }

    #[test]
    fn no_reports_without_output_flags() {
        assert!(report_options(&quiet_args()).is_none());
    }

    #[test]
    fn run_with_output_dir() {
        let config = small_config();
        let temp_dir = tempdir().unwrap();
        let args = BaseArgs {
            config: Some(config.path().to_path_buf()),
            output_dir: Some(temp_dir.path().to_path_buf()),
            file_prefix: Some("cli_".to_string()),
            ..quiet_args()
        };
        run_with_args_internal(args).unwrap();
        assert!(temp_dir.path().join("cli_history.csv").exists());
        assert!(temp_dir.path().join("cli_incidence.csv").exists());

        // A second run into the same files needs --force-overwrite.
        let args = BaseArgs {
            config: Some(config.path().to_path_buf()),
            output_dir: Some(temp_dir.path().to_path_buf()),
            file_prefix: Some("cli_".to_string()),
            ..quiet_args()
        };
        assert!(run_with_args_internal(args).is_err());

        let args = BaseArgs {
            config: Some(config.path().to_path_buf()),
            output_dir: Some(temp_dir.path().to_path_buf()),
            file_prefix: Some("cli_".to_string()),
            force_overwrite: true,
            ..quiet_args()
        };
        assert!(run_with_args_internal(args).is_ok());
    }

    #[test]
    fn bad_log_level_is_an_error() {
        let args = BaseArgs {
            log_level: Some("outbreak=loud".to_string()),
            ..quiet_args()
        };
        assert!(run_with_args_internal(args).is_err());
    }
}

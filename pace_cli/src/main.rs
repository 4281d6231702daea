//! # Stride CLI Application
//!
//! Terminal front-end for the running calculators. Parses numeric
//! arguments, runs them through a `pace_core` session and prints either a
//! text report or the JSON result (for LLM/API use).
//!
//! ```text
//! stride vdot --distance 5000 --minutes 20
//! stride pace --distance 10 --minutes 50 --unit mile
//! stride splits --pace-minutes 5 --distance 42.195
//! stride hr --max 190 --rest 60
//! stride predict --distance 10000 --minutes 40
//! stride calories --weight 70 --distance 10 --minutes 50
//! stride stats
//! ```

mod render;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use pace_core::analytics::{Analytics, TracingSink};
use pace_core::calculations::{
    CalculationInput, CaloriesInput, HeartRateInput, PaceInput, RacePredictInput, SplitsInput,
    VdotInput,
};
use pace_core::config::{resolve_data_dir, Settings};
use pace_core::storage::{FileStore, KeyValueStore, MemoryStore};
use pace_core::units::DistanceUnit;
use pace_core::{CalcError, CalcResult, Session};

#[derive(Parser)]
#[command(
    name = "stride",
    version,
    about = "Running calculators: VDOT, pace, splits, heart-rate zones, race prediction, calories"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Directory for stats, remembered form values and stride.toml
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Do not send analytics events
    #[arg(long, global = true)]
    no_analytics: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// VDOT score and training paces from a race result
    Vdot {
        /// Race distance in metres
        #[arg(long)]
        distance: Option<f64>,
        #[arg(long)]
        minutes: Option<f64>,
        #[arg(long)]
        seconds: Option<f64>,
    },
    /// Pace and speed for a distance and time
    Pace {
        /// Distance in the chosen unit
        #[arg(long)]
        distance: Option<f64>,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        minutes: Option<f64>,
        #[arg(long)]
        seconds: Option<f64>,
        /// km or mile (defaults to the setting in stride.toml)
        #[arg(long)]
        unit: Option<DistanceUnit>,
    },
    /// Even-pace race splits
    Splits {
        #[arg(long)]
        pace_minutes: f64,
        #[arg(long, default_value_t = 0.0)]
        pace_seconds: f64,
        /// Race distance in km
        #[arg(long)]
        distance: f64,
    },
    /// Heart-rate training zones
    Hr {
        /// Maximum heart rate
        #[arg(long)]
        max: u32,
        /// Resting heart rate (selects the Karvonen method)
        #[arg(long)]
        rest: Option<u32>,
    },
    /// Predict standard race times from a known result
    Predict {
        /// Known distance in metres
        #[arg(long)]
        distance: f64,
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        minutes: Option<f64>,
        #[arg(long)]
        seconds: Option<f64>,
    },
    /// Calorie burn estimate
    Calories {
        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,
        /// Distance in km
        #[arg(long)]
        distance: f64,
        /// Elapsed minutes
        #[arg(long)]
        minutes: f64,
    },
    /// Show the usage stats summary
    Stats,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            if cli.json {
                if let Ok(json) = serde_json::to_string_pretty(&e) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> CalcResult<()> {
    let data_dir = resolve_data_dir(cli.data_dir.as_deref());
    let settings = Settings::load(&data_dir)?;
    debug!(data_dir = %data_dir.display(), ?settings, "starting");

    let analytics = if settings.analytics_enabled && !cli.no_analytics {
        Analytics::new(Box::new(TracingSink::new()))
    } else {
        Analytics::disabled()
    };
    let mut session = Session::open(open_store(&data_dir), analytics);

    let input = match build_input(&cli.command, &settings, &mut session)? {
        Some(input) => input,
        None => {
            render::print_stats(&session.summary(), cli.json)?;
            return Ok(());
        }
    };

    let result = session.run(&input)?;
    render::print_result(&result, cli.json)?;
    if !cli.json {
        render::print_stats_bar(&session.summary());
    }
    Ok(())
}

/// The on-disk store, or an in-memory one when `data_dir` is unusable.
fn open_store(data_dir: &Path) -> Box<dyn KeyValueStore> {
    match FileStore::open(data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            warn!(error = %e, "data directory unusable, stats will not be saved");
            Box::new(MemoryStore::new())
        }
    }
}

/// Turn a subcommand into calculator input, filling remembered form values
/// for omitted arguments. `None` means no calculation was requested.
fn build_input(
    command: &Command,
    settings: &Settings,
    session: &mut Session<Box<dyn KeyValueStore>>,
) -> CalcResult<Option<CalculationInput>> {
    let mut form = session.form_data().clone();

    let input = match command {
        Command::Vdot {
            distance,
            minutes,
            seconds,
        } => {
            let distance_m = remembered(*distance, &mut form.vdot_distance, "distance")?;
            let minutes = remembered(*minutes, &mut form.vdot_minutes, "minutes")?;
            let seconds =
                optional(remembered(*seconds, &mut form.vdot_seconds, "seconds"))?.unwrap_or(0.0);
            CalculationInput::Vdot(VdotInput {
                distance_m,
                minutes,
                seconds,
            })
        }
        Command::Pace {
            distance,
            hours,
            minutes,
            seconds,
            unit,
        } => {
            let distance = remembered(*distance, &mut form.pace_distance, "distance")?;
            // A freshly typed time replaces the whole remembered time.
            if hours.is_some() || minutes.is_some() || seconds.is_some() {
                form.pace_hours = None;
                form.pace_minutes = None;
                form.pace_seconds = None;
            }
            CalculationInput::Pace(PaceInput {
                distance,
                hours: optional(remembered(*hours, &mut form.pace_hours, "hours"))?,
                minutes: optional(remembered(*minutes, &mut form.pace_minutes, "minutes"))?,
                seconds: optional(remembered(*seconds, &mut form.pace_seconds, "seconds"))?,
                unit: unit.unwrap_or(settings.distance_unit),
            })
        }
        Command::Splits {
            pace_minutes,
            pace_seconds,
            distance,
        } => CalculationInput::Splits(SplitsInput {
            pace_minutes: *pace_minutes,
            pace_seconds: *pace_seconds,
            distance_km: *distance,
        }),
        Command::Hr { max, rest } => CalculationInput::HeartRateZones(HeartRateInput {
            max_hr: *max,
            resting_hr: *rest,
        }),
        Command::Predict {
            distance,
            hours,
            minutes,
            seconds,
        } => CalculationInput::RacePredictor(RacePredictInput {
            distance_m: *distance,
            hours: *hours,
            minutes: *minutes,
            seconds: *seconds,
        }),
        Command::Calories {
            weight,
            distance,
            minutes,
        } => CalculationInput::Calories(CaloriesInput {
            weight_kg: remembered(*weight, &mut form.weight, "weight")?,
            distance_km: *distance,
            minutes: *minutes,
        }),
        Command::Stats => return Ok(None),
    };

    if &form != session.form_data() {
        session.remember_form(form);
    }
    Ok(Some(input))
}

/// Use `given` and remember it in `slot`, or fall back to the remembered value.
fn remembered(given: Option<f64>, slot: &mut Option<String>, field: &str) -> CalcResult<f64> {
    if let Some(value) = given {
        *slot = Some(value.to_string());
        return Ok(value);
    }
    let Some(text) = slot.as_deref() else {
        return Err(CalcError::missing_field(field));
    };
    text.trim()
        .parse()
        .map_err(|_| CalcError::invalid_input(field, text, "Remembered value is not a number"))
}

/// Treat a missing value as absent; any other error still fails.
fn optional(value: CalcResult<f64>) -> CalcResult<Option<f64>> {
    match value {
        Ok(value) => Ok(Some(value)),
        Err(CalcError::MissingField { .. }) => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pace_core::storage::FormData;

    #[test]
    fn test_remembered_prefers_given_value() {
        let mut slot = Some("5000".to_string());
        assert_eq!(remembered(Some(10000.0), &mut slot, "distance").unwrap(), 10000.0);
        assert_eq!(slot.as_deref(), Some("10000"));
    }

    #[test]
    fn test_remembered_falls_back() {
        let mut slot = Some(" 21097.5 ".to_string());
        assert_eq!(remembered(None, &mut slot, "distance").unwrap(), 21097.5);
    }

    #[test]
    fn test_remembered_missing() {
        let mut slot = None;
        let err = remembered(None, &mut slot, "weight").unwrap_err();
        assert_eq!(err, CalcError::missing_field("weight"));
    }

    #[test]
    fn test_remembered_garbage() {
        let mut slot = Some("fast".to_string());
        let err = remembered(None, &mut slot, "minutes").unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_optional_only_hides_missing() {
        assert_eq!(optional(Ok(3.0)).unwrap(), Some(3.0));
        assert_eq!(optional(Err(CalcError::missing_field("hours"))).unwrap(), None);
        let garbage = CalcError::invalid_input("hours", "one", "Remembered value is not a number");
        assert_eq!(optional(Err(garbage.clone())).unwrap_err(), garbage);
    }

    #[test]
    fn test_garbage_remembered_pace_time_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let store: Box<dyn KeyValueStore> = Box::new(FileStore::open(dir.path()).unwrap());
        let mut session = Session::open(store, Analytics::disabled());
        session.remember_form(FormData {
            pace_distance: Some("10".to_string()),
            pace_minutes: Some("fifty".to_string()),
            ..Default::default()
        });

        let command = Command::Pace {
            distance: None,
            hours: None,
            minutes: None,
            seconds: None,
            unit: None,
        };
        let err = build_input(&command, &Settings::default(), &mut session).unwrap_err();
        assert_eq!(err.field(), Some("minutes"));
    }

    #[test]
    fn test_unusable_data_dir_still_calculates() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let data_dir = blocker.join("sub");

        let settings = Settings::load(&data_dir).unwrap();
        assert_eq!(settings, Settings::default());

        let mut session = Session::open(open_store(&data_dir), Analytics::disabled());
        let command = Command::Calories {
            weight: Some(70.0),
            distance: 10.0,
            minutes: 50.0,
        };
        let input = build_input(&command, &settings, &mut session).unwrap().unwrap();
        let result = session.run(&input).unwrap();
        assert_eq!(result.completion_value(), Some(723.0));
        assert_eq!(session.stats().total_calories, 723);
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "stride", "pace", "--distance", "10", "--minutes", "50", "--unit", "mile",
        ])
        .unwrap();
        match cli.command {
            Command::Pace { unit, distance, .. } => {
                assert_eq!(unit, Some(DistanceUnit::Mile));
                assert_eq!(distance, Some(10.0));
            }
            _ => panic!("expected pace"),
        }
    }
}

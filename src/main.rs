use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::process::ExitCode;
use training_load_lib::analysis::BalanceParams;
use training_load_lib::commands::{exercises, training};
use training_load_lib::db::{initialize_db, SqliteSessionSource};
use training_load_lib::{init_logging, AnalyticsConfig, AppState};

/// Training-load analytics over logged strength sessions.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
  /// SQLite database URL (overrides TRAINING_DATABASE_URL)
  #[arg(long, global = true)]
  database_url: Option<String>,

  /// Owner whose sessions are analysed
  #[arg(long, global = true, default_value_t = 1)]
  owner: i64,

  /// Enable debug logging
  #[arg(short, long, global = true)]
  verbose: bool,

  #[command(subcommand)]
  command: Commands,
}

#[derive(Subcommand)]
enum Commands {
  /// Total and average volume per ISO week
  WeeklyVolume(RangeArgs),
  /// Workout count per ISO week
  WeeklyFrequency(RangeArgs),
  /// Highest-volume workouts
  TopWorkouts {
    /// Number of workouts; malformed values fall back to 5
    #[arg(long)]
    limit: Option<String>,
  },
  /// Per muscle group volume per Monday-aligned week
  MuscleWeekly {
    #[command(flatten)]
    range: RangeArgs,
    #[arg(long)]
    weeks: Option<i64>,
  },
  /// Recent vs baseline share of volume per muscle group
  Balance(BalanceArgs),
  /// This week so far vs last week
  CurrentVsLast,
  /// Days since each muscle group was trained
  Recency,
  /// Weekly rows, balance, current vs last and recency in one report
  Summary(BalanceArgs),
  /// Heaviest and last set per exercise
  ExerciseHistory,
  /// Suggested reps and weight for an exercise
  ExerciseDefaults {
    #[arg(long)]
    exercise: i64,
  },
  /// Last date each exercise was performed
  ExerciseRecency,
}

#[derive(Args)]
struct RangeArgs {
  /// First day included (YYYY-MM-DD)
  #[arg(long)]
  start: Option<NaiveDate>,

  /// First day excluded (YYYY-MM-DD)
  #[arg(long)]
  end: Option<NaiveDate>,
}

impl RangeArgs {
  fn bounds(&self) -> (Option<DateTime<Utc>>, Option<DateTime<Utc>>) {
    let at_midnight = |d: NaiveDate| d.and_time(NaiveTime::MIN).and_utc();
    (self.start.map(at_midnight), self.end.map(at_midnight))
  }
}

#[derive(Args)]
struct BalanceArgs {
  /// Baseline window in weeks
  #[arg(long)]
  weeks: Option<i64>,

  /// Most recent weeks forming the current window
  #[arg(long)]
  current_window: Option<i64>,

  /// Allowed relative deviation before a group is flagged
  #[arg(long)]
  threshold: Option<f64>,
}

impl BalanceArgs {
  fn params(&self, config: &AnalyticsConfig) -> BalanceParams {
    let defaults = config.balance_params();
    BalanceParams {
      weeks: self.weeks.unwrap_or(defaults.weeks),
      current_window: self.current_window.unwrap_or(defaults.current_window),
      threshold: self.threshold.unwrap_or(defaults.threshold),
    }
  }
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
  println!("{}", serde_json::to_string_pretty(value)?);
  Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
  let mut config = AnalyticsConfig::from_env()?;
  if let Some(url) = cli.database_url {
    config.database_url = url;
  }

  let pool = initialize_db(&config.database_url).await?;
  let state = AppState::new(SqliteSessionSource::new(pool), config);
  let owner = cli.owner;

  match cli.command {
    Commands::WeeklyVolume(range) => {
      let (start, end) = range.bounds();
      print_json(&training::get_weekly_volume(&state, owner, start, end).await?)
    }
    Commands::WeeklyFrequency(range) => {
      let (start, end) = range.bounds();
      print_json(&training::get_weekly_frequency(&state, owner, start, end).await?)
    }
    Commands::TopWorkouts { limit } => {
      print_json(&training::get_top_workouts(&state, owner, limit.as_deref()).await?)
    }
    Commands::MuscleWeekly { range, weeks } => {
      let (start, end) = range.bounds();
      print_json(&training::get_muscle_group_weekly(&state, owner, start, end, weeks).await?)
    }
    Commands::Balance(args) => {
      let params = args.params(&state.config);
      print_json(&training::get_muscle_balance(&state, owner, &params).await?)
    }
    Commands::CurrentVsLast => print_json(&training::get_current_vs_last(&state, owner).await?),
    Commands::Recency => print_json(&training::get_recency(&state, owner).await?),
    Commands::Summary(args) => {
      let params = args.params(&state.config);
      print_json(&training::get_training_summary(&state, owner, &params).await?)
    }
    Commands::ExerciseHistory => print_json(&exercises::get_exercise_history(&state, owner).await?),
    Commands::ExerciseDefaults { exercise } => {
      print_json(&exercises::get_exercise_defaults(&state, owner, exercise).await?)
    }
    Commands::ExerciseRecency => print_json(&exercises::get_exercise_recency(&state, owner).await?),
  }
}

#[tokio::main]
async fn main() -> ExitCode {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();

  let cli = Cli::parse();
  init_logging(cli.verbose);

  match run(cli).await {
    Ok(()) => ExitCode::SUCCESS,
    Err(e) => {
      tracing::error!("{}", e);
      ExitCode::FAILURE
    }
  }
}

// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// One subcommand per user action:
//   generate — simulate new data and reset the table
//   show     — first rows and usage averages
//   train    — train all families and keep the best
//   predict  — headcount for one day
//   logs     — last training report
//
// Reference: Rust Book §12 (Building a CLI Program)

use chrono::NaiveDate;
use clap::{ArgAction, Args, Subcommand};

use crate::application::train_use_case::TrainConfig;
use crate::data::generator::GenerateConfig;
use crate::domain::observation::{FeatureVector, MAX_CAMPUS_STUDENTS};

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate synthetic data and replace the stored dataset
    Generate(GenerateArgs),

    /// Show the first rows and average usage of the stored dataset
    Show(ShowArgs),

    /// Train all candidate models and keep the best one
    Train(TrainArgs),

    /// Predict the library headcount for one day
    Predict(PredictArgs),

    /// Print the report of the last training run
    Logs,
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// First day of generated data (YYYY-MM-DD)
    #[arg(long, default_value = "2024-01-01")]
    pub start_date: NaiveDate,

    /// Number of consecutive days to generate
    #[arg(long, default_value_t = 730)]
    pub days: usize,

    /// Seed for reproducible data
    #[arg(long)]
    pub seed: Option<u64>,
}

impl From<GenerateArgs> for GenerateConfig {
    fn from(a: GenerateArgs) -> Self {
        GenerateConfig {
            start_date: a.start_date,
            days:       a.days,
            seed:       a.seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Number of rows to print
    #[arg(long, default_value_t = 5)]
    pub rows: usize,
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Share of rows held out for final scoring
    #[arg(long, default_value_t = 0.2)]
    pub test_fraction: f64,

    /// Cross-validation folds per grid point
    #[arg(long, default_value_t = 3)]
    pub cv_folds: usize,

    /// Seed of the train / held-out shuffle
    #[arg(long, default_value_t = 42)]
    pub split_seed: u64,

    /// Seed of the random forest bootstrap
    #[arg(long, default_value_t = 42)]
    pub forest_seed: u64,
}

/// The application layer never sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            test_fraction: a.test_fraction,
            cv_folds:      a.cv_folds,
            split_seed:    a.split_seed,
            forest_seed:   a.forest_seed,
        }
    }
}

#[derive(Args, Debug)]
pub struct PredictArgs {
    /// Day of week, 0 = Monday … 6 = Sunday
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=6))]
    pub day_of_week: u8,

    /// The day is a holiday
    #[arg(long)]
    pub holiday: bool,

    /// The day falls in an exam week
    #[arg(long)]
    pub exam_week: bool,

    /// Whether the librarian is present
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub librarian_present: bool,

    /// Students on campus
    #[arg(long, default_value_t = 300, value_parser = clap::value_parser!(u32).range(0..=MAX_CAMPUS_STUDENTS as i64))]
    pub total_students: u32,
}

impl From<PredictArgs> for FeatureVector {
    fn from(a: PredictArgs) -> Self {
        FeatureVector {
            day_of_week:           a.day_of_week,
            is_holiday:            a.holiday,
            is_exam_week:          a.exam_week,
            is_librarian_present:  a.librarian_present,
            total_campus_students: a.total_students,
        }
    }
}

// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// Parses arguments with clap and hands each subcommand to its
// use case in Layer 2. Printing happens here and nowhere else.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, PredictArgs, ShowArgs};
use std::path::PathBuf;

use crate::application::{
    explore_use_case::ExploreUseCase,
    generate_use_case::GenerateUseCase,
    predict_use_case::{PredictUseCase, HIGH_TRAFFIC_THRESHOLD},
    train_use_case::{TrainConfig, TrainUseCase},
};
use crate::data::summary::WEEKDAY_NAMES;
use crate::domain::errors::TrainingError;
use crate::domain::observation::FeatureVector;
use crate::domain::report::Prediction;
use crate::infra::paths::StorageLocation;

#[derive(Parser, Debug)]
#[command(
    name = "lib-count",
    version,
    about = "Library usage prediction: generate data, train models, predict headcounts."
)]
pub struct Cli {
    /// Directory holding data/ and models/
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let location = StorageLocation::new(self.root);

        match self.command {
            Commands::Generate(args) => {
                let rows = GenerateUseCase::new(args.into(), location).execute()?;
                println!("Data generated: {rows} rows saved to the database.");
                Ok(())
            }
            Commands::Show(args)    => run_show(&location, args),
            Commands::Train(args)   => run_train(location, args.into()),
            Commands::Predict(args) => run_predict(location, args),
            Commands::Logs          => run_logs(&location),
        }
    }
}

fn run_show(location: &StorageLocation, args: ShowArgs) -> Result<()> {
    let Some(overview) = ExploreUseCase::new(location.clone()).overview(args.rows)? else {
        println!("No data found. Please generate data first.");
        return Ok(());
    };

    println!("date        dow holiday exam librarian campus library");
    for o in &overview.head {
        println!(
            "{}  {:>3} {:>7} {:>4} {:>9} {:>6} {:>7}",
            o.date,
            o.day_of_week,
            u8::from(o.is_holiday),
            u8::from(o.is_exam_week),
            u8::from(o.is_librarian_present),
            o.total_campus_students,
            o.library_student_count,
        );
    }

    let s = &overview.summary;
    println!("\n{} rows. Average library usage by day of week:", s.rows);
    for (name, mean) in WEEKDAY_NAMES.iter().zip(s.mean_by_weekday) {
        match mean {
            Some(m) => println!("  {name}: {m:.1}"),
            None    => println!("  {name}: -"),
        }
    }

    println!("Impact of exam weeks:");
    for (label, mean) in [("Normal Week", s.mean_normal_week), ("Exam Week", s.mean_exam_week)] {
        match mean {
            Some(m) => println!("  {label}: {m:.1}"),
            None    => println!("  {label}: -"),
        }
    }
    Ok(())
}

fn run_train(location: StorageLocation, config: TrainConfig) -> Result<()> {
    tracing::info!("Training with {:?}", config);

    match TrainUseCase::new(config, location).execute() {
        Ok(report) => {
            println!("Training complete! Best model: {}", report.best_model);
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        Err(e) if matches!(e.downcast_ref::<TrainingError>(), Some(TrainingError::NoData)) => {
            println!("No data to train on.");
            Ok(())
        }
        Err(e) => Err(e),
    }
}

fn run_predict(location: StorageLocation, args: PredictArgs) -> Result<()> {
    let features: FeatureVector = args.into();

    match PredictUseCase::new(location).predict(&features)? {
        Prediction::ModelNotTrained => println!("Model not trained yet."),
        Prediction::Count(count) => {
            println!("Predicted students in library: {count}");
            if count > HIGH_TRAFFIC_THRESHOLD {
                println!("High Traffic Expected! Arrange extra chairs.");
            } else {
                println!("Normal Traffic.");
            }
        }
    }
    Ok(())
}

fn run_logs(location: &StorageLocation) -> Result<()> {
    match TrainUseCase::last_report(location) {
        Some(report) => println!("{}", serde_json::to_string_pretty(&report)?),
        None         => println!("No training logs available yet."),
    }
    Ok(())
}

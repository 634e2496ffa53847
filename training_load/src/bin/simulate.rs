use std::path::PathBuf;

use time::Date;
use training_load::{
    ActivityDataSource, CsvActivitySource, LoadOptions, Sex, UserProfile,
    compute_series_with_options, parse_date, project_with_options,
};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Csv file with recorded activities
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("activities.csv"), required = false)]
    pub input: PathBuf,
    /// Csv file with planned activities for the simulated day. Rest day when omitted
    #[arg(long)]
    pub plan: Option<PathBuf>,
    /// `male` or `female`
    #[arg(long)]
    pub sex: Sex,
    /// Age in years
    #[arg(long)]
    pub age: u8,
    /// Resting heart rate in bpm
    #[arg(long)]
    pub resting_hr: f64,
    /// Maximum heart rate in bpm. Estimated from age when omitted
    #[arg(long)]
    pub max_hr: Option<f64>,
    /// Mesocycle length in days, used as the chronic load window
    #[arg(long)]
    pub mesocycle_length: Option<u16>,
    /// First day of the mesocycle
    #[arg(long, value_parser = parse_date)]
    pub start: Date,
    /// Day to simulate. History covers every day before it
    #[arg(long, value_parser = parse_date)]
    pub date: Date,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Args {
        input,
        plan,
        sex,
        age,
        resting_hr,
        max_hr,
        mesocycle_length,
        start,
        date,
    } = <Args as clap::Parser>::parse();

    let mut profile = UserProfile::new(sex, age, resting_hr);
    if let Some(max_hr) = max_hr {
        profile = profile.set_max_heart_rate(max_hr);
    }
    if let Some(mesocycle_length) = mesocycle_length {
        profile = profile.set_mesocycle_length(mesocycle_length);
    }

    let end = date.previous_day().ok_or("Simulated date is out of range")?;

    let source = CsvActivitySource::from_path(&input)
        .map_err(|e| format!("Failed to read input file. Reason: {e}"))?;
    let options = LoadOptions::new();
    let history = compute_series_with_options(
        start,
        end,
        &source.activities(start, end)?,
        &profile,
        &options,
    )?;

    let planned = match plan {
        Some(plan) => CsvActivitySource::from_path(&plan)
            .map_err(|e| format!("Failed to read plan file. Reason: {e}"))?
            .activities(date, date)?
            .into_values()
            .flatten()
            .collect(),
        None => Vec::new(),
    };

    let score = project_with_options(date, &planned, &history, &profile, &options)?;

    println!("{}", serde_json::to_string_pretty(&score)?);

    Ok(())
}

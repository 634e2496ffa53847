use std::{io::Write, path::PathBuf};

use time::Date;
use training_load::{
    ActivityDataSource, CsvActivitySource, LoadOptions, Sex, UserProfile,
    compute_series_with_options, parse_date,
};

#[derive(Debug, clap::Parser)]
pub struct Args {
    /// Input csv file with `date,name,average_heart_rate,duration_minutes` rows
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("activities.csv"), required = false)]
    pub input: PathBuf,
    /// Output csv file. _Note_: will truncate old file if exists
    #[arg(default_value_os_t = std::env::current_dir().unwrap_or_default().join("training_load.csv"), required = false)]
    pub output: PathBuf,
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
    /// First day of the mesocycle. Defaults to the first activity day
    #[arg(long, value_parser = parse_date)]
    pub start: Option<Date>,
    /// Last day of the series. Defaults to the last activity day
    #[arg(long, value_parser = parse_date)]
    pub end: Option<Date>,
    /// Don't save changes
    #[arg(short, long, default_value_t = false, required = false)]
    pub dry: bool,
    /// Print result to stdout
    #[arg(short, long, default_value_t = false, required = false)]
    pub print: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let Args {
        input,
        output,
        sex,
        age,
        resting_hr,
        max_hr,
        mesocycle_length,
        start,
        end,
        dry,
        print,
    } = <Args as clap::Parser>::parse();

    let source = CsvActivitySource::from_path(&input)
        .map_err(|e| format!("Failed to read input file. Reason: {e}"))?;

    let mut profile = UserProfile::new(sex, age, resting_hr);
    if let Some(max_hr) = max_hr {
        profile = profile.set_max_heart_rate(max_hr);
    }
    if let Some(mesocycle_length) = mesocycle_length {
        profile = profile.set_mesocycle_length(mesocycle_length);
    }

    let start = start
        .or_else(|| source.first_day())
        .ok_or("No start date given and input has no activities")?;
    let end = end.or_else(|| source.last_day()).unwrap_or(start);

    let activities = source.activities(start, end)?;
    let series =
        compute_series_with_options(start, end, &activities, &profile, &LoadOptions::new())?;

    println!("Total: {} days", series.len());

    if print {
        let io = std::io::stdout();
        let mut io = io.lock();

        writeln!(io, "date,trimp,acl,ctl,tsb")?;
        for score in &series {
            writeln!(
                io,
                "{},{:.2},{:.2},{:.2},{:.2}",
                score.date, score.trimp, score.acl, score.ctl, score.tsb
            )?;
        }
    }

    if dry {
        return Ok(());
    }

    let mut wrt = csv::Writer::from_path(&output)
        .map_err(|e| format!("Failed to open output file. Reason: {e}"))?;
    for score in &series {
        wrt.serialize(score)?;
    }
    wrt.flush()?;

    println!("Saved to {}", output.to_string_lossy());

    Ok(())
}

use std::{collections::BTreeMap, convert::Infallible, path::Path, time::Duration};

use time::Date;

use crate::{ActivityDataSource, ActivityRecord, group_by_day, parse_date};

#[derive(Debug, thiserror::Error)]
pub enum CsvSourceError {
    #[error("failed to read csv. Reason: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid date `{value}` on line {line}. Reason: {source}")]
    Date {
        value: String,
        line: u64,
        #[source]
        source: time::error::Parse,
    },
    #[error("invalid duration `{value}` minutes on line {line}")]
    Duration { value: f64, line: u64 },
}

#[derive(Debug, serde::Deserialize)]
struct ActivityRow {
    date: String,
    name: String,
    average_heart_rate: u8,
    duration_minutes: f64,
}

/// Activities read from a `date,name,average_heart_rate,duration_minutes` csv.
#[derive(Debug, Clone, Default)]
pub struct CsvActivitySource {
    days: BTreeMap<Date, Vec<ActivityRecord>>,
}

impl CsvActivitySource {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CsvSourceError> {
        Self::from_csv(csv::Reader::from_path(path)?)
    }

    pub fn from_reader(reader: impl std::io::Read) -> Result<Self, CsvSourceError> {
        Self::from_csv(csv::Reader::from_reader(reader))
    }

    fn from_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Self, CsvSourceError> {
        let mut activities = Vec::new();

        for (index, row) in reader.deserialize::<ActivityRow>().enumerate() {
            // Header is line 1
            let line = index as u64 + 2;
            let ActivityRow {
                date,
                name,
                average_heart_rate,
                duration_minutes,
            } = row?;

            let day = parse_date(&date).map_err(|source| CsvSourceError::Date {
                value: date.clone(),
                line,
                source,
            })?;
            let duration = Duration::try_from_secs_f64(duration_minutes * 60.0).map_err(|_| {
                CsvSourceError::Duration {
                    value: duration_minutes,
                    line,
                }
            })?;

            activities.push(ActivityRecord::new(
                name,
                average_heart_rate,
                duration,
                day.midnight(),
            ));
        }

        tracing::debug!(activities = activities.len(), "loaded activities from csv");

        Ok(Self {
            days: group_by_day(activities),
        })
    }

    pub fn days(&self) -> &BTreeMap<Date, Vec<ActivityRecord>> {
        &self.days
    }

    pub fn first_day(&self) -> Option<Date> {
        self.days.keys().next().copied()
    }

    pub fn last_day(&self) -> Option<Date> {
        self.days.keys().next_back().copied()
    }
}

impl ActivityDataSource for CsvActivitySource {
    type Error = Infallible;

    fn activities(
        &self,
        from: Date,
        to: Date,
    ) -> Result<BTreeMap<Date, Vec<ActivityRecord>>, Self::Error> {
        self.days.activities(from, to)
    }
}

use time::Date;

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("end date {end} is before mesocycle start {start}")]
    InvertedRange { start: Date, end: Date },
    #[error("historical series is empty, there is nothing to seed the projection from")]
    EmptyHistory,
    #[error("simulation date {sim_date} is not after the latest historical date {last}")]
    SimulationNotAfterHistory { last: Date, sim_date: Date },
    #[error("failed to load data. Reason: {0}")]
    Source(#[source] Box<dyn std::error::Error + Send + Sync>),
}

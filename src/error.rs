//! Error types for the debt planner.

use thiserror::Error;

/// Result type alias for planner operations
pub type Result<T> = std::result::Result<T, PlannerError>;

/// Errors raised while loading input or writing output.
///
/// The simulation itself never fails; these cover the CSV surface around it.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Failed to open, read or write a file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV parsing or writing error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A debt or income row that could not be understood
    #[error("Invalid record at row {row}: {message}")]
    InvalidRecord { row: usize, message: String },

    /// Simulation settings that could not be understood
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Missing input file argument
    #[error("Missing input file argument. Usage: debt-planner <debts.csv> <incomes.csv> [config.csv]")]
    MissingArgument,
}

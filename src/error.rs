use thiserror::Error;

use crate::tableau::Tableau;

/// Errors raised while translating algebraic text into coefficient vectors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty expression")]
    Empty,

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("invalid number `{0}`")]
    InvalidNumber(String),

    /// Constraint text without a `<=` separating the two sides
    #[error("expected `<=` in `{0}`")]
    MissingOperator(String),

    #[error("unexpected `{token}` at offset {offset}")]
    UnexpectedToken { token: String, offset: usize },
}

/// Terminal failures of a solve. None of them are retried internally.
#[derive(Error, Debug)]
pub enum SolverError {
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// The all-slack starting basis is not feasible.
    #[error("no starting basic feasible solution: constraint {row} has rhs {rhs} < 0")]
    InfeasibleStart { row: usize, rhs: f64 },

    /// No row bounds the entering column. Carries the last feasible tableau.
    #[error("objective is unbounded along `{entering}`")]
    Unbounded {
        entering: String,
        tableau: Box<Tableau>,
    },

    #[error("invalid pivot at row {row}, column {col} (element {value})")]
    PivotError { row: usize, col: usize, value: f64 },

    #[error("iteration limit of {limit} pivots exceeded")]
    IterationLimitExceeded { limit: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

pub type SolverResult<T> = Result<T, SolverError>;

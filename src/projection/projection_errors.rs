use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    #[error("CPI must be positive to size the acquired cohort, got {0}")]
    NonPositiveCpi(f64),

    #[error("Parameter '{0}' is not a finite number")]
    NonFiniteParam(&'static str),
}

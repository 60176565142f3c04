pub mod projection_errors;
pub mod projection_model;
pub mod projection_service;

pub use projection_errors::ProjectionError;
pub use projection_model::{PredictionParams, ProjectionSummary, RoiPrediction};
pub use projection_service::{breakeven_day, project, summarize, terminal_roi};

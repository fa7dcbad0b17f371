//! Candidate-job match scoring and calibration service.

pub mod config;
pub mod error;
pub mod matching;
pub mod telemetry;

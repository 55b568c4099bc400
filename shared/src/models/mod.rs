//! Data models for the Healthport converter.
//!
//! This module contains the sensor samples, the reconciled observations, the
//! exercise session summary and the daily and body records.

pub mod daily;
pub mod exercise;
pub mod lap;
pub mod observation;
pub mod sample;

pub use daily::{
    BodyMeasurement, DailySummary, BODY_MEASUREMENT_COLUMNS, DAILY_SUMMARY_COLUMNS,
};
pub use exercise::{
    ExerciseRow, ExerciseSession, ExerciseValidationError, Sport, CYCLING_CODE, RUNNING_CODE,
};
pub use lap::Lap;
pub use observation::{format_decimal, format_epoch_millis, Observation};
pub use sample::{PhysiologicalSample, PositionalSample};

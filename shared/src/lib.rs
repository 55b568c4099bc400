//! Healthport Shared Library
//!
//! This crate converts an unpacked Samsung Health data export into files
//! Garmin Connect can import.
//!
//! # Modules
//!
//! - [`models`] - Sensor samples, observations, sessions, daily and body records
//! - [`sync`] - Nearest-timestamp snapping and stream reconciliation
//! - [`tcx`] - TCX document assembly
//! - [`pipeline`] - Per-session conversion driver
//! - [`export`] - Reading the export directory
//! - [`daily`] - Daily activity merge
//! - [`body`] - Weight measurement conversion
//! - [`output`] - CSV chunk and TCX file writers
//! - [`config`] - Conversion configuration
//!
//! # Example
//!
//! ```
//! use shared::models::{ExerciseSession, Lap, PhysiologicalSample, PositionalSample};
//! use shared::sync::reconcile;
//! use shared::tcx::build_document;
//!
//! let positional = [PositionalSample::new(1_623_485_700_000, 48.1, 11.5)];
//! let physiological = [PhysiologicalSample::new(1_623_485_700_300).with_heart_rate(128.0)];
//! let timeline = reconcile(&positional, &physiological).unwrap();
//!
//! let session = ExerciseSession::new("uuid", "2021-06-12 08:15:00.000", "1002");
//! let lap = Lap::from_session(&session, timeline.into_observations());
//! let xml = build_document(&session, &lap);
//!
//! assert!(xml.contains("<HeartRateBpm>"));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod body;
pub mod config;
pub mod daily;
pub mod export;
pub mod models;
pub mod output;
pub mod pipeline;
pub mod sync;
pub mod tcx;

/// Re-export common dependencies for convenience.
pub use chrono;
pub use serde;
pub use serde_json;
pub use validator;

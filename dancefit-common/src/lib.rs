//! # dancefit Common Library
//!
//! Shared code for the dancefit tools including:
//! - Dance record data model and user preferences
//! - CSV dataset loading and normalization
//! - Tempo categorization from BPM quantiles
//! - Preference filtering
//! - Workout generation and compaction
//! - Validated interactive input
//! - Configuration loading

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod normalize;
pub mod preferences;
pub mod prompt;
pub mod tempo;
pub mod workout;

pub use error::{Error, Result};
pub use model::{Column, DanceRecord, Dataset, IntensityLevel, TempoCategory, UserPreferences};
pub use tempo::TempoCutoffs;
pub use workout::{Generation, GenerationOutcome, Segment, ShufflePolicy, Workout, WorkoutGenerator};

//! Tempo categorization from the BPM distribution
//!
//! Cutoffs are the 33rd and 66th percentiles of all tempos, estimated with
//! linear interpolation between the closest ranks (index = q × (n − 1)).
//! Values strictly below the low cutoff are Slow, values strictly above the
//! high cutoff are Fast, everything in between (boundaries included) is
//! Medium.

use crate::model::{Dataset, TempoCategory};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Quantile used for the Slow/Medium boundary
pub const LOW_QUANTILE: f64 = 0.33;

/// Quantile used for the Medium/Fast boundary
pub const HIGH_QUANTILE: f64 = 0.66;

/// Linear-interpolation quantile of an ascending, non-empty slice
///
/// `q` is clamped to 0.0..=1.0. Returns NaN for an empty slice; callers
/// validate input first.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let q = q.clamp(0.0, 1.0);
    let position = q * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    let fraction = position - lower as f64;

    sorted[lower] + (sorted[upper] - sorted[lower]) * fraction
}

/// Boundaries between the three tempo categories (BPM)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TempoCutoffs {
    low: f64,
    high: f64,
}

impl TempoCutoffs {
    /// Compute cutoffs from raw tempo values
    ///
    /// Fails with [`Error::InvalidInput`] if `tempos` is empty or contains a
    /// non-finite value.
    pub fn from_tempos(tempos: &[f64]) -> Result<Self> {
        if tempos.is_empty() {
            return Err(Error::InvalidInput(
                "cannot compute tempo cutoffs of an empty dataset".to_string(),
            ));
        }
        if let Some(bad) = tempos.iter().find(|t| !t.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "tempo values must be finite, found {}",
                bad
            )));
        }

        let mut sorted = tempos.to_vec();
        sorted.sort_by(f64::total_cmp);

        Ok(Self {
            low: quantile(&sorted, LOW_QUANTILE),
            high: quantile(&sorted, HIGH_QUANTILE),
        })
    }

    pub fn low(&self) -> f64 {
        self.low
    }

    pub fn high(&self) -> f64 {
        self.high
    }

    /// Category for a single tempo value
    pub fn classify(&self, tempo_bpm: f64) -> TempoCategory {
        if tempo_bpm < self.low {
            TempoCategory::Slow
        } else if tempo_bpm > self.high {
            TempoCategory::Fast
        } else {
            TempoCategory::Medium
        }
    }
}

/// Assign a tempo category to every record
///
/// Returns the categorized dataset together with the cutoffs used.
/// Categorizing an empty dataset is a pipeline misuse and fails with
/// [`Error::InvalidInput`].
pub fn categorize(dataset: Dataset) -> Result<(Dataset, TempoCutoffs)> {
    let cutoffs = TempoCutoffs::from_tempos(&dataset.tempos())?;
    info!(
        "Tempo cutoffs: low={:.2} BPM, high={:.2} BPM ({} records)",
        cutoffs.low,
        cutoffs.high,
        dataset.len()
    );

    let categorized = dataset
        .into_records()
        .into_iter()
        .map(|mut record| {
            record.tempo_category = Some(cutoffs.classify(record.tempo_bpm));
            record
        })
        .collect();

    Ok((categorized, cutoffs))
}

/// Number of records per tempo category, in ascending tempo order
///
/// Uncategorized records are not counted.
pub fn category_counts(dataset: &Dataset) -> Vec<(TempoCategory, usize)> {
    TempoCategory::all_variants()
        .iter()
        .map(|category| {
            let count = dataset
                .iter()
                .filter(|r| r.tempo_category == Some(*category))
                .count();
            (*category, count)
        })
        .collect()
}

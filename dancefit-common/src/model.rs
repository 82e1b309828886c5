//! Dance records, tempo categories and user preferences
//!
//! Records are created once by the dataset loader, receive their tempo
//! category from the categorizer, and are only filtered afterwards.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Shortest workout a user may request (minutes)
pub const MIN_DURATION_MINUTES: u32 = 5;

/// Longest workout a user may request (minutes)
pub const MAX_DURATION_MINUTES: u32 = 120;

/// Discrete tempo bucket derived from the BPM distribution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TempoCategory {
    Slow,
    Medium,
    Fast,
}

impl TempoCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            TempoCategory::Slow => "Slow",
            TempoCategory::Medium => "Medium",
            TempoCategory::Fast => "Fast",
        }
    }

    /// All categories in ascending tempo order
    pub fn all_variants() -> &'static [TempoCategory] {
        &[TempoCategory::Slow, TempoCategory::Medium, TempoCategory::Fast]
    }
}

impl fmt::Display for TempoCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// User-facing workout difficulty
///
/// Each level maps to exactly one tempo category: a low intensity workout
/// is built from slow dances, a high intensity workout from fast ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IntensityLevel {
    Low,
    Medium,
    High,
}

impl IntensityLevel {
    /// Intensity levels in menu order
    pub fn all_variants() -> &'static [IntensityLevel] {
        &[IntensityLevel::Low, IntensityLevel::Medium, IntensityLevel::High]
    }

    /// Zero-based index (Low = 0, Medium = 1, High = 2)
    pub fn index(&self) -> u32 {
        match self {
            IntensityLevel::Low => 0,
            IntensityLevel::Medium => 1,
            IntensityLevel::High => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all_variants().get(index).copied()
    }

    /// Tempo category whose dances make up a workout of this intensity
    pub fn tempo_category(&self) -> TempoCategory {
        match self {
            IntensityLevel::Low => TempoCategory::Slow,
            IntensityLevel::Medium => TempoCategory::Medium,
            IntensityLevel::High => TempoCategory::Fast,
        }
    }

    /// Minutes each dance contributes to a workout: 5, 4 and 3 for
    /// Low, Medium and High
    pub fn segment_minutes(&self) -> u32 {
        3 + (2 - self.index())
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            IntensityLevel::Low => "Low",
            IntensityLevel::Medium => "Medium",
            IntensityLevel::High => "High",
        }
    }

    /// Parse from a level name (case-insensitive) or a 1-based menu number
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "low" | "1" => Some(IntensityLevel::Low),
            "medium" | "2" => Some(IntensityLevel::Medium),
            "high" | "3" => Some(IntensityLevel::High),
            _ => None,
        }
    }
}

impl fmt::Display for IntensityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One dance entity from the dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DanceRecord {
    pub origin: String,
    pub dance_type: String,
    pub music_genre: String,
    pub tempo_bpm: f64,
    pub dance_style: String,
    /// Set once by the tempo categorizer
    pub tempo_category: Option<TempoCategory>,
}

impl DanceRecord {
    pub fn new(
        origin: impl Into<String>,
        dance_type: impl Into<String>,
        music_genre: impl Into<String>,
        tempo_bpm: f64,
        dance_style: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            dance_type: dance_type.into(),
            music_genre: music_genre.into(),
            tempo_bpm,
            dance_style: dance_style.into(),
            tempo_category: None,
        }
    }
}

/// Categorical columns that can be summarized by value counts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Origin,
    DanceType,
    MusicGenre,
    DanceStyle,
}

impl Column {
    pub fn value<'a>(&self, record: &'a DanceRecord) -> &'a str {
        match self {
            Column::Origin => &record.origin,
            Column::DanceType => &record.dance_type,
            Column::MusicGenre => &record.music_genre,
            Column::DanceStyle => &record.dance_style,
        }
    }
}

/// Ordered collection of dance records
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    records: Vec<DanceRecord>,
}

impl Dataset {
    pub fn new(records: Vec<DanceRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DanceRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<DanceRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DanceRecord> {
        self.records.iter()
    }

    pub fn tempos(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.tempo_bpm).collect()
    }

    /// Subset of records matching `predicate`, in original order
    pub fn filter<P>(&self, mut predicate: P) -> Dataset
    where
        P: FnMut(&DanceRecord) -> bool,
    {
        Dataset {
            records: self.records.iter().filter(|r| predicate(*r)).cloned().collect(),
        }
    }

    /// Distinct values of `column` with their counts, most frequent first
    /// (ties broken alphabetically)
    pub fn value_counts(&self, column: Column) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for record in &self.records {
            *counts.entry(column.value(record)).or_insert(0) += 1;
        }
        let mut counts: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(value, count)| (value.to_string(), count))
            .collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        counts
    }
}

impl FromIterator<DanceRecord> for Dataset {
    fn from_iter<I: IntoIterator<Item = DanceRecord>>(iter: I) -> Self {
        Dataset::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a DanceRecord;
    type IntoIter = std::slice::Iter<'a, DanceRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Workout preferences collected from the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    duration_minutes: u32,
    intensity_level: IntensityLevel,
    origin_country: String,
}

impl UserPreferences {
    /// Build validated preferences
    ///
    /// Fails with [`Error::InvalidInput`] when the duration is outside
    /// [`MIN_DURATION_MINUTES`]..=[`MAX_DURATION_MINUTES`]. The country is
    /// not checked against the dataset.
    pub fn new(
        duration_minutes: u32,
        intensity_level: IntensityLevel,
        origin_country: impl Into<String>,
    ) -> Result<Self> {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&duration_minutes) {
            return Err(Error::InvalidInput(format!(
                "duration must be between {} and {} minutes, got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, duration_minutes
            )));
        }
        Ok(Self {
            duration_minutes,
            intensity_level,
            origin_country: origin_country.into(),
        })
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn intensity_level(&self) -> IntensityLevel {
        self.intensity_level
    }

    pub fn origin_country(&self) -> &str {
        &self.origin_country
    }
}

impl fmt::Display for UserPreferences {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duration: {} minutes, intensity: {}, country: {}",
            self.duration_minutes, self.intensity_level, self.origin_country
        )
    }
}

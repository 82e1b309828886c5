//! Narrowing the categorized dataset to the user's preferences
//!
//! Filtering happens in two steps so the caller can offer a country menu
//! built from what is actually available at the chosen intensity:
//! 1. keep records whose tempo category matches the intensity level
//! 2. keep records from the chosen origin country
//!
//! Neither step treats an empty result as an error.

use crate::model::{Column, Dataset, IntensityLevel, UserPreferences};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// A distinct origin and how many records come from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OriginCount {
    pub origin: String,
    pub count: usize,
}

/// Records whose tempo category matches `intensity`
pub fn filter_by_intensity(dataset: &Dataset, intensity: IntensityLevel) -> Dataset {
    let category = intensity.tempo_category();
    let filtered = dataset.filter(|r| r.tempo_category == Some(category));
    debug!(
        "Intensity {} ({} tempo): {} of {} records",
        intensity,
        category,
        filtered.len(),
        dataset.len()
    );
    filtered
}

/// Distinct origins with counts, most frequent first (ties alphabetical)
pub fn origin_counts(dataset: &Dataset) -> Vec<OriginCount> {
    dataset
        .value_counts(Column::Origin)
        .into_iter()
        .map(|(origin, count)| OriginCount { origin, count })
        .collect()
}

/// Records whose origin equals `country` exactly
///
/// The country is not checked for existence; an unknown country yields an
/// empty dataset.
pub fn filter_by_origin(dataset: &Dataset, country: &str) -> Dataset {
    let filtered = dataset.filter(|r| r.origin == country);
    debug!("Origin '{}': {} records", country, filtered.len());
    filtered
}

/// Both filter steps for already collected preferences
pub fn apply(dataset: &Dataset, preferences: &UserPreferences) -> Dataset {
    let by_intensity = filter_by_intensity(dataset, preferences.intensity_level());
    filter_by_origin(&by_intensity, preferences.origin_country())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DanceRecord, TempoCategory};

    fn record(origin: &str, style: &str, category: TempoCategory) -> DanceRecord {
        let mut r = DanceRecord::new(origin, "Partner", "latin", 100.0, style);
        r.tempo_category = Some(category);
        r
    }

    fn sample() -> Dataset {
        vec![
            record("Cuba", "Salsa", TempoCategory::Fast),
            record("Cuba", "Mambo", TempoCategory::Fast),
            record("Brazil", "Samba", TempoCategory::Fast),
            record("Cuba", "Danzon", TempoCategory::Slow),
            record("Angola", "Kizomba", TempoCategory::Slow),
            record("Argentina", "Tango", TempoCategory::Medium),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_intensity_filter_uses_mapped_category() {
        let fast = filter_by_intensity(&sample(), IntensityLevel::High);
        assert_eq!(fast.len(), 3);
        assert!(fast
            .iter()
            .all(|r| r.tempo_category == Some(TempoCategory::Fast)));

        let slow = filter_by_intensity(&sample(), IntensityLevel::Low);
        let styles: Vec<_> = slow.iter().map(|r| r.dance_style.as_str()).collect();
        assert_eq!(styles, vec!["Danzon", "Kizomba"]);
    }

    #[test]
    fn test_origin_counts_of_filtered_set() {
        let fast = filter_by_intensity(&sample(), IntensityLevel::High);
        assert_eq!(
            origin_counts(&fast),
            vec![
                OriginCount { origin: "Cuba".into(), count: 2 },
                OriginCount { origin: "Brazil".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_unknown_country_gives_empty_result() {
        let filtered = filter_by_origin(&sample(), "Atlantis");
        assert!(filtered.is_empty());
    }

    #[test]
    fn test_apply_combines_both_steps() {
        let prefs = UserPreferences::new(30, IntensityLevel::High, "Cuba").unwrap();
        let filtered = apply(&sample(), &prefs);
        let styles: Vec<_> = filtered.iter().map(|r| r.dance_style.as_str()).collect();
        assert_eq!(styles, vec!["Salsa", "Mambo"]);
    }
}

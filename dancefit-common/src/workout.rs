//! Workout generation and compaction
//!
//! A workout is built from the filtered dataset in shuffled passes. Each
//! dance contributes a fixed number of minutes determined by the intensity
//! level; passes continue until the accumulated time reaches the target.
//! When a single pass cannot reach the target, dances repeat.
//!
//! The random source is supplied by the caller so runs can be reproduced
//! with a seeded generator.

use crate::model::{Dataset, DanceRecord, IntensityLevel};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info, warn};

/// One scheduled dance style and its duration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub dance_style: String,
    pub minutes: u32,
}

impl Segment {
    pub fn new(dance_style: impl Into<String>, minutes: u32) -> Self {
        Self {
            dance_style: dance_style.into(),
            minutes,
        }
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} minutes)", self.dance_style, self.minutes)
    }
}

/// Ordered sequence of segments
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workout {
    segments: Vec<Segment>,
}

impl Workout {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn total_minutes(&self) -> u32 {
        self.segments.iter().map(|s| s.minutes).sum()
    }

    /// New workout with adjacent same-style segments merged
    pub fn compacted(&self) -> Workout {
        Workout::new(compact(&self.segments))
    }
}

/// Merge every run of consecutive segments sharing a dance style into one
/// segment with the summed duration
///
/// Repeats that are not adjacent stay separate. Order is preserved.
pub fn compact(segments: &[Segment]) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match merged.last_mut() {
            Some(last) if last.dance_style == segment.dance_style => {
                last.minutes += segment.minutes;
            }
            _ => merged.push(segment.clone()),
        }
    }

    merged
}

/// How the record order is randomized across passes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShufflePolicy {
    /// Every pass draws a fresh permutation
    #[default]
    PerPass,
    /// The first permutation is reused for every later pass
    Fixed,
}

impl ShufflePolicy {
    /// Parse from configuration / command-line spelling
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "per_pass" | "per-pass" | "perpass" | "reshuffle" => Some(ShufflePolicy::PerPass),
            "fixed" | "fixed_order" | "fixed-order" => Some(ShufflePolicy::Fixed),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ShufflePolicy::PerPass => "per_pass",
            ShufflePolicy::Fixed => "fixed",
        }
    }
}

impl fmt::Display for ShufflePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a generation run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GenerationOutcome {
    /// Target reached without repeating any dance
    Filled,
    /// Target reached, but only by repeating dances
    FilledWithRepeats,
    /// The filtered dataset was empty; the workout is empty
    NoMatchingDances,
}

/// Result of one generation run (before compaction)
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub workout: Workout,
    pub outcome: GenerationOutcome,
    /// Number of shuffled passes started over the dataset
    pub passes: usize,
}

/// Builds duration-bounded workouts from a filtered dataset
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkoutGenerator {
    policy: ShufflePolicy,
}

impl WorkoutGenerator {
    pub fn new(policy: ShufflePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> ShufflePolicy {
        self.policy
    }

    /// Generate segments until their total reaches `target_minutes`
    ///
    /// The last segment may overshoot the target by less than one segment
    /// duration. A zero target is treated as one minute, so a non-empty
    /// `dataset` always yields at least one segment. An empty `dataset`
    /// yields an empty workout with outcome
    /// [`GenerationOutcome::NoMatchingDances`].
    pub fn generate<R>(
        &self,
        dataset: &Dataset,
        intensity: IntensityLevel,
        target_minutes: u32,
        rng: &mut R,
    ) -> Generation
    where
        R: Rng + ?Sized,
    {
        if dataset.is_empty() {
            info!("No matching dances; workout is empty");
            return Generation {
                workout: Workout::default(),
                outcome: GenerationOutcome::NoMatchingDances,
                passes: 0,
            };
        }

        // An empty workout is reserved for NoMatchingDances
        let target_minutes = target_minutes.max(1);
        let minutes = intensity.segment_minutes();
        let mut order: Vec<&DanceRecord> = dataset.iter().collect();
        let mut segments = Vec::new();
        let mut total = 0u32;
        let mut passes = 0usize;
        let mut repeated = false;

        while total < target_minutes {
            if passes > 0 && !repeated {
                warn!(
                    "{} dances cover only {} of {} minutes; repeating dances",
                    order.len(),
                    total,
                    target_minutes
                );
                repeated = true;
            }
            if passes == 0 || self.policy == ShufflePolicy::PerPass {
                order.shuffle(rng);
            }

            for record in &order {
                segments.push(Segment::new(record.dance_style.clone(), minutes));
                total += minutes;
                if total >= target_minutes {
                    break;
                }
            }
            passes += 1;
        }

        debug!(
            "Generated {} segments ({} minutes, target {}) in {} passes",
            segments.len(),
            total,
            target_minutes,
            passes
        );

        Generation {
            workout: Workout::new(segments),
            outcome: if repeated {
                GenerationOutcome::FilledWithRepeats
            } else {
                GenerationOutcome::Filled
            },
            passes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn dataset(styles: &[&str]) -> Dataset {
        styles
            .iter()
            .map(|s| DanceRecord::new("Cuba", "Partner", "salsa", 180.0, *s))
            .collect()
    }

    fn styles(segments: &[Segment]) -> Vec<&str> {
        segments.iter().map(|s| s.dance_style.as_str()).collect()
    }

    #[test]
    fn test_compact_merges_adjacent_runs() {
        let segments = vec![
            Segment::new("Zouk", 4),
            Segment::new("Zouk", 3),
            Segment::new("Salsa", 5),
        ];
        assert_eq!(
            compact(&segments),
            vec![Segment::new("Zouk", 7), Segment::new("Salsa", 5)]
        );
    }

    #[test]
    fn test_compact_keeps_non_adjacent_repeats() {
        let segments = vec![
            Segment::new("Zouk", 4),
            Segment::new("Salsa", 4),
            Segment::new("Zouk", 4),
        ];
        assert_eq!(compact(&segments), segments);
    }

    #[test]
    fn test_compact_short_inputs_unchanged() {
        assert!(compact(&[]).is_empty());
        let single = vec![Segment::new("Tango", 5)];
        assert_eq!(compact(&single), single);
    }

    #[test]
    fn test_compact_idempotent_and_preserves_total() {
        let segments = vec![
            Segment::new("A", 3),
            Segment::new("A", 3),
            Segment::new("B", 3),
            Segment::new("A", 3),
            Segment::new("C", 3),
            Segment::new("C", 3),
            Segment::new("C", 3),
        ];
        let once = compact(&segments);
        let twice = compact(&once);
        assert_eq!(once, twice);

        let before: u32 = segments.iter().map(|s| s.minutes).sum();
        let after: u32 = once.iter().map(|s| s.minutes).sum();
        assert_eq!(before, after);
        assert_eq!(styles(&once), vec!["A", "B", "A", "C"]);
    }

    #[test]
    fn test_empty_dataset_gives_no_matching_dances() {
        let mut rng = StdRng::seed_from_u64(1);
        let generation = WorkoutGenerator::default().generate(
            &Dataset::default(),
            IntensityLevel::Medium,
            30,
            &mut rng,
        );
        assert!(generation.workout.is_empty());
        assert_eq!(generation.outcome, GenerationOutcome::NoMatchingDances);
        assert_eq!(generation.passes, 0);
    }

    #[test]
    fn test_low_intensity_segments_are_five_minutes() {
        let mut rng = StdRng::seed_from_u64(7);
        let generation = WorkoutGenerator::default().generate(
            &dataset(&["Rumba", "Bolero", "Danzon", "Son", "Cha-cha", "Mambo"]),
            IntensityLevel::Low,
            20,
            &mut rng,
        );
        assert_eq!(generation.workout.len(), 4);
        assert!(generation.workout.segments().iter().all(|s| s.minutes == 5));
        assert_eq!(generation.outcome, GenerationOutcome::Filled);

        let distinct: HashSet<_> = styles(generation.workout.segments()).into_iter().collect();
        assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn test_total_within_one_segment_of_target() {
        let mut rng = StdRng::seed_from_u64(42);
        let generator = WorkoutGenerator::default();

        for size in 1..=5 {
            let names: Vec<String> = (0..size).map(|i| format!("Dance {}", i)).collect();
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let data = dataset(&refs);

            for intensity in IntensityLevel::all_variants() {
                for target in 5..=120 {
                    let generation = generator.generate(&data, *intensity, target, &mut rng);
                    let total = generation.workout.total_minutes();
                    assert!(total >= target, "total {} below target {}", total, target);
                    assert!(
                        total < target + intensity.segment_minutes(),
                        "total {} overshoots target {} by a full segment",
                        total,
                        target
                    );
                }
            }
        }
    }

    #[test]
    fn test_repeats_reported_when_dataset_too_small() {
        let mut rng = StdRng::seed_from_u64(3);
        let generation = WorkoutGenerator::default().generate(
            &dataset(&["Samba", "Forro"]),
            IntensityLevel::High,
            30,
            &mut rng,
        );
        assert_eq!(generation.outcome, GenerationOutcome::FilledWithRepeats);
        assert_eq!(generation.workout.len(), 10);
        assert_eq!(generation.passes, 5);
    }

    #[test]
    fn test_each_pass_is_a_permutation() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = dataset(&["A", "B", "C", "D"]);
        let generation =
            WorkoutGenerator::new(ShufflePolicy::PerPass).generate(&data, IntensityLevel::Medium, 48, &mut rng);

        // 48 minutes at 4 minutes each: three full passes of four dances
        assert_eq!(generation.workout.len(), 12);
        for pass in generation.workout.segments().chunks(4) {
            let mut names = styles(pass);
            names.sort();
            assert_eq!(names, vec!["A", "B", "C", "D"]);
        }
    }

    #[test]
    fn test_per_pass_policy_reshuffles_between_passes() {
        let mut rng = StdRng::seed_from_u64(11);
        let data = dataset(&["A", "B", "C", "D"]);
        let generation =
            WorkoutGenerator::new(ShufflePolicy::PerPass).generate(&data, IntensityLevel::Medium, 48, &mut rng);

        let passes: Vec<Vec<&str>> = generation.workout.segments().chunks(4).map(styles).collect();
        assert_eq!(passes.len(), 3);
        assert!(
            passes.windows(2).any(|pair| pair[0] != pair[1]),
            "every pass kept the same order: {:?}",
            passes
        );
    }

    #[test]
    fn test_zero_target_still_schedules_one_dance() {
        let mut rng = StdRng::seed_from_u64(8);
        let generation = WorkoutGenerator::default().generate(
            &dataset(&["Tango", "Milonga"]),
            IntensityLevel::Medium,
            0,
            &mut rng,
        );
        assert_eq!(generation.workout.len(), 1);
        assert_eq!(generation.workout.total_minutes(), 4);
        assert_eq!(generation.outcome, GenerationOutcome::Filled);
        assert_eq!(generation.passes, 1);
    }

    #[test]
    fn test_fixed_policy_repeats_first_order() {
        let mut rng = StdRng::seed_from_u64(5);
        let data = dataset(&["Zouk", "Lambada", "Forro"]);
        let generation =
            WorkoutGenerator::new(ShufflePolicy::Fixed).generate(&data, IntensityLevel::Low, 45, &mut rng);

        let segments = generation.workout.segments();
        assert_eq!(segments.len(), 9);
        assert_eq!(styles(&segments[0..3]), styles(&segments[3..6]));
        assert_eq!(styles(&segments[0..3]), styles(&segments[6..9]));
    }

    #[test]
    fn test_same_seed_same_workout() {
        let data = dataset(&["A", "B", "C", "D", "E"]);
        let generator = WorkoutGenerator::default();

        let first = generator.generate(&data, IntensityLevel::High, 60, &mut StdRng::seed_from_u64(99));
        let second = generator.generate(&data, IntensityLevel::High, 60, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_shuffle_policy_parsing() {
        assert_eq!(ShufflePolicy::from_str("per-pass"), Some(ShufflePolicy::PerPass));
        assert_eq!(ShufflePolicy::from_str("FIXED"), Some(ShufflePolicy::Fixed));
        assert_eq!(ShufflePolicy::from_str("random"), None);
        assert_eq!(ShufflePolicy::default(), ShufflePolicy::PerPass);
    }
}

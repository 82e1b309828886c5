//! Interactive workout session
//!
//! Collects duration, intensity and country (prompting for whatever was not
//! preset on the command line), filters the categorized dataset, generates
//! the workout and renders it.

use crate::report;
use dancefit_common::model::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};
use dancefit_common::preferences::{filter_by_intensity, filter_by_origin, origin_counts};
use dancefit_common::prompt::{prompt_choice, prompt_int};
use dancefit_common::{
    Dataset, Error, Generation, GenerationOutcome, IntensityLevel, Result, UserPreferences, Workout,
    WorkoutGenerator,
};
use rand::Rng;
use std::io::{BufRead, Write};
use tracing::info;

/// Answers supplied up front; `None` means "ask"
#[derive(Debug, Clone, Default)]
pub struct SessionPresets {
    pub duration_minutes: Option<u32>,
    pub intensity: Option<IntensityLevel>,
    pub country: Option<String>,
}

/// What a session produced
#[derive(Debug, Clone)]
pub struct SessionSummary {
    /// `None` when no country could be offered at the chosen intensity
    pub preferences: Option<UserPreferences>,
    /// Generator output before compaction
    pub generation: Generation,
    /// Workout as shown to the user
    pub workout: Workout,
}

/// Menu label for an intensity level
fn intensity_label(level: IntensityLevel) -> String {
    format!(
        "{} ({} tempo dances, {} minutes each)",
        level.display_name(),
        level.tempo_category().display_name().to_lowercase(),
        level.segment_minutes()
    )
}

fn dance_count_label(count: usize) -> String {
    if count == 1 {
        "1 dance".to_string()
    } else {
        format!("{} dances", count)
    }
}

fn ask_duration<R: BufRead, W: Write>(input: &mut R, output: &mut W, preset: Option<u32>) -> Result<u32> {
    if let Some(minutes) = preset {
        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&minutes) {
            return Err(Error::InvalidInput(format!(
                "duration must be between {} and {} minutes, got {}",
                MIN_DURATION_MINUTES, MAX_DURATION_MINUTES, minutes
            )));
        }
        return Ok(minutes);
    }

    let minutes = prompt_int(
        input,
        output,
        &format!(
            "How long should the workout be? ({}-{} minutes): ",
            MIN_DURATION_MINUTES, MAX_DURATION_MINUTES
        ),
        MIN_DURATION_MINUTES as i64,
        MAX_DURATION_MINUTES as i64,
    )?;
    Ok(minutes as u32)
}

fn ask_intensity<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    preset: Option<IntensityLevel>,
) -> Result<IntensityLevel> {
    if let Some(level) = preset {
        return Ok(level);
    }

    let levels = IntensityLevel::all_variants();
    let labels: Vec<String> = levels.iter().map(|l| intensity_label(*l)).collect();
    let index = prompt_choice(input, output, "Choose an intensity level:", &labels)?;
    Ok(levels[index])
}

/// Run one session over a categorized dataset
pub fn run_session<R, W, G>(
    dataset: &Dataset,
    presets: &SessionPresets,
    generator: &WorkoutGenerator,
    input: &mut R,
    output: &mut W,
    rng: &mut G,
) -> Result<SessionSummary>
where
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let duration = ask_duration(input, output, presets.duration_minutes)?;
    let intensity = ask_intensity(input, output, presets.intensity)?;

    let by_intensity = filter_by_intensity(dataset, intensity);
    let origins = origin_counts(&by_intensity);

    let country = match &presets.country {
        Some(country) => country.clone(),
        None if origins.is_empty() => {
            info!("No dances at {} intensity; skipping country selection", intensity);
            report::write_workout(output, &Workout::default(), GenerationOutcome::NoMatchingDances)?;
            return Ok(SessionSummary {
                preferences: None,
                generation: Generation {
                    workout: Workout::default(),
                    outcome: GenerationOutcome::NoMatchingDances,
                    passes: 0,
                },
                workout: Workout::default(),
            });
        }
        None => {
            let labels: Vec<String> = origins
                .iter()
                .map(|o| format!("{} ({})", o.origin, dance_count_label(o.count)))
                .collect();
            let index = prompt_choice(input, output, "Choose a country of origin:", &labels)?;
            origins[index].origin.clone()
        }
    };

    let preferences = UserPreferences::new(duration, intensity, country)?;
    report::write_preferences(output, &preferences)?;
    info!("Session preferences: {}", preferences);

    let filtered = filter_by_origin(&by_intensity, preferences.origin_country());
    let generation = generator.generate(
        &filtered,
        preferences.intensity_level(),
        preferences.duration_minutes(),
        rng,
    );
    let workout = generation.workout.compacted();

    report::write_workout(output, &workout, generation.outcome)?;

    Ok(SessionSummary {
        preferences: Some(preferences),
        generation,
        workout,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dance_count_label() {
        assert_eq!(dance_count_label(1), "1 dance");
        assert_eq!(dance_count_label(2), "2 dances");
        assert_eq!(dance_count_label(0), "0 dances");
    }
}

//! Console presentation
//!
//! Text renderings of the dataset summaries and the final workout. All
//! functions write to any `Write` so the output can be captured in tests.

use dancefit_common::tempo::category_counts;
use dancefit_common::{Column, Dataset, GenerationOutcome, TempoCategory, TempoCutoffs, UserPreferences, Workout};
use std::io::{self, Write};

/// Printed instead of a workout when nothing matches the preferences
pub const NO_DANCES_MESSAGE: &str = "No dances available for the selected preferences.";

/// Printed once when the workout needed repeated dances
pub const REPEAT_NOTICE: &str = "Not enough unique dances to fill the workout; some dances are repeated.";

/// Widest bar drawn in count summaries (characters)
const BAR_WIDTH: usize = 40;

/// Bar length for `count` relative to `max`, logarithmic when requested
fn bar_length(count: usize, max: usize, log_scale: bool) -> usize {
    if count == 0 || max == 0 {
        return 0;
    }
    let ratio = if log_scale {
        (1.0 + count as f64).ln() / (1.0 + max as f64).ln()
    } else {
        count as f64 / max as f64
    };
    ((ratio * BAR_WIDTH as f64).round() as usize).max(1)
}

/// Number of dances per distinct value of `column`, most frequent first
pub fn write_count_summary<W: Write>(
    out: &mut W,
    dataset: &Dataset,
    column: Column,
    display_label: &str,
    log_scale: bool,
) -> io::Result<()> {
    let counts = dataset.value_counts(column);
    let scale = if log_scale { " (log scale)" } else { "" };
    writeln!(out, "Number of Dances per {}{}", display_label, scale)?;

    let max = counts.first().map(|(_, c)| *c).unwrap_or(0);
    let width = counts.iter().map(|(v, _)| v.chars().count()).max().unwrap_or(0);

    for (value, count) in &counts {
        writeln!(
            out,
            "  {:<width$} {:>5} {}",
            value,
            count,
            "#".repeat(bar_length(*count, max, log_scale)),
            width = width
        )?;
    }
    writeln!(out)
}

/// Tempo cutoffs and how many dances fall into each category
pub fn write_tempo_summary<W: Write>(out: &mut W, cutoffs: &TempoCutoffs, dataset: &Dataset) -> io::Result<()> {
    writeln!(out, "Distribution of Dance Tempos with Tempo Categories")?;

    for (category, count) in category_counts(dataset) {
        let range = match category {
            TempoCategory::Slow => format!("below {:.1} BPM", cutoffs.low()),
            TempoCategory::Medium => format!("{:.1} to {:.1} BPM", cutoffs.low(), cutoffs.high()),
            TempoCategory::Fast => format!("above {:.1} BPM", cutoffs.high()),
        };
        writeln!(out, "  {:<6} {:<24} {:>5} dances", category.display_name(), range, count)?;
    }
    writeln!(out)
}

pub fn write_preferences<W: Write>(out: &mut W, preferences: &UserPreferences) -> io::Result<()> {
    writeln!(out, "User preferences: {}", preferences)
}

/// Render the compacted workout, or the no-dances message when empty
pub fn write_workout<W: Write>(out: &mut W, workout: &Workout, outcome: GenerationOutcome) -> io::Result<()> {
    if workout.is_empty() {
        return writeln!(out, "{}", NO_DANCES_MESSAGE);
    }

    if outcome == GenerationOutcome::FilledWithRepeats {
        writeln!(out, "{}", REPEAT_NOTICE)?;
    }

    writeln!(out, "Your dance workout:")?;
    for segment in workout.segments() {
        writeln!(out, "- {} ({} minutes)", segment.dance_style, segment.minutes)?;
    }
    writeln!(out, "Total: {} minutes", workout.total_minutes())
}

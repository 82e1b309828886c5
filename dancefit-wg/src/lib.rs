//! dancefit-wg (Workout Generator) library
//!
//! Console presentation and the interactive session driving the dancefit
//! pipeline. The `dancefit-wg` binary wires these to stdin/stdout.

pub mod report;
pub mod session;

use dancefit_common::dataset::load_dataset;
use dancefit_common::normalize::normalize;
use dancefit_common::tempo::categorize;
use dancefit_common::{Column, Dataset, Result, TempoCutoffs};
use std::io::Write;
use std::path::Path;

/// Columns summarized before the session starts: (column, label, log scale)
const SUMMARY_COLUMNS: &[(Column, &str, bool)] = &[
    (Column::Origin, "Country", true),
    (Column::DanceType, "Dance Type", false),
    (Column::MusicGenre, "Music Genre", false),
];

/// Load, normalize and categorize the dataset at `path`
///
/// When `summary` is given, the count summaries and the tempo summary are
/// written to it along the way.
pub fn prepare_dataset<W: Write>(path: &Path, summary: Option<&mut W>) -> Result<(Dataset, TempoCutoffs)> {
    let dataset = normalize(load_dataset(path)?);

    match summary {
        Some(out) => {
            for (column, label, log_scale) in SUMMARY_COLUMNS {
                report::write_count_summary(out, &dataset, *column, label, *log_scale)?;
            }
            let (dataset, cutoffs) = categorize(dataset)?;
            report::write_tempo_summary(out, &cutoffs, &dataset)?;
            Ok((dataset, cutoffs))
        }
        None => categorize(dataset),
    }
}

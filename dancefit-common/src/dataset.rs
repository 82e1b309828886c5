//! Dataset loading from CSV
//!
//! Expected header columns: `Origin`, `Dance Type`, `Associated Music Genre`,
//! `Tempo (BPM)`, `Dance style`. Additional columns are ignored.
//!
//! Rows whose tempo is missing or not a finite number are dropped during
//! loading so that every record in the returned [`Dataset`] can be
//! categorized.

use crate::model::{DanceRecord, Dataset};
use crate::{Error, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

const TEMPO_HEADER: &str = "Tempo (BPM)";

#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(rename = "Origin", default)]
    origin: Option<String>,
    #[serde(rename = "Dance Type", default)]
    dance_type: Option<String>,
    #[serde(rename = "Associated Music Genre", default)]
    music_genre: Option<String>,
    #[serde(rename = "Tempo (BPM)", default)]
    tempo_bpm: Option<String>,
    #[serde(rename = "Dance style", default)]
    dance_style: Option<String>,
}

/// Load a dataset from a CSV file on disk
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(Error::NotFound(format!(
            "dataset file {}",
            path.display()
        )));
    }
    let file = std::fs::File::open(path)?;
    let dataset = read_dataset(file)?;
    info!("Loaded {} dance records from {}", dataset.len(), path.display());
    Ok(dataset)
}

/// Read a dataset from any CSV source
pub fn read_dataset<R: Read>(source: R) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    if !headers.iter().any(|h| h == TEMPO_HEADER) {
        return Err(Error::InvalidInput(format!(
            "dataset is missing the '{}' column",
            TEMPO_HEADER
        )));
    }

    let mut records = Vec::new();
    let mut dropped = 0usize;

    for (line, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        let tempo = match row.tempo_bpm.as_deref().and_then(parse_tempo) {
            Some(tempo) => tempo,
            None => {
                // Header is line 1, first data row is line 2
                warn!(
                    "Dropping row {}: unusable tempo {:?}",
                    line + 2,
                    row.tempo_bpm
                );
                dropped += 1;
                continue;
            }
        };

        records.push(DanceRecord::new(
            row.origin.unwrap_or_default(),
            row.dance_type.unwrap_or_default(),
            row.music_genre.unwrap_or_default(),
            tempo,
            row.dance_style.unwrap_or_default(),
        ));
    }

    if dropped > 0 {
        debug!("Dropped {} rows without a usable tempo", dropped);
    }

    Ok(Dataset::new(records))
}

fn parse_tempo(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|t| t.is_finite())
}

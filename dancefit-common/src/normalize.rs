//! Canonicalization of origin names and genre strings
//!
//! The raw dataset spells the same country or genre several ways
//! ("USA" / "United States", "Hip-Hop Music" / "hip hop"). Counting and
//! filtering only work once those variants collapse to one value.

use crate::model::{DanceRecord, Dataset};
use std::collections::HashMap;
use tracing::debug;

/// Trailing tokens dropped from genre names ("salsa music" → "salsa")
const GENRE_SUFFIX_TOKENS: &[&str] = &["music", "dance"];

/// Origin and genre normalizer with its lookup tables
#[derive(Clone, Debug)]
pub struct Normalizer {
    origin_aliases: HashMap<String, String>,
    genre_synonyms: HashMap<String, String>,
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Normalizer {
    /// Create normalizer with the default alias tables
    pub fn new() -> Self {
        Self {
            origin_aliases: Self::build_origin_aliases(),
            genre_synonyms: Self::build_genre_synonyms(),
        }
    }

    /// Normalize every record of a dataset
    pub fn normalize(&self, dataset: Dataset) -> Dataset {
        dataset
            .into_records()
            .into_iter()
            .map(|record| self.normalize_record(record))
            .collect()
    }

    pub fn normalize_record(&self, record: DanceRecord) -> DanceRecord {
        DanceRecord {
            origin: self.normalize_origin(&record.origin),
            music_genre: self.normalize_genre(&record.music_genre),
            ..record
        }
    }

    /// Collapse known aliases to the canonical country name
    pub fn normalize_origin(&self, origin: &str) -> String {
        let trimmed = origin.trim();
        match self.origin_aliases.get(&trimmed.to_lowercase()) {
            Some(canonical) => {
                if canonical != trimmed {
                    debug!("Origin '{}' normalized to '{}'", trimmed, canonical);
                }
                canonical.clone()
            }
            None => trimmed.to_string(),
        }
    }

    /// Lowercase, strip trailing "music"/"dance" tokens, collapse synonyms
    pub fn normalize_genre(&self, genre: &str) -> String {
        let lower = genre.trim().to_lowercase();
        let mut tokens: Vec<&str> = lower.split_whitespace().collect();

        // Never strip the last remaining token ("dance" alone stays "dance")
        while tokens.len() > 1 {
            match tokens.last() {
                Some(last) if GENRE_SUFFIX_TOKENS.contains(last) => {
                    tokens.pop();
                }
                _ => break,
            }
        }

        let stripped = tokens.join(" ");
        match self.genre_synonyms.get(&stripped) {
            Some(canonical) => canonical.clone(),
            None => stripped,
        }
    }

    /// Keys are lowercase; values are the canonical spelling
    fn build_origin_aliases() -> HashMap<String, String> {
        let mut map = HashMap::new();

        for alias in ["usa", "us", "u.s.", "u.s.a.", "united states of america", "united states"] {
            map.insert(alias.to_string(), "United States".to_string());
        }
        for alias in ["uk", "u.k.", "great britain", "united kingdom"] {
            map.insert(alias.to_string(), "United Kingdom".to_string());
        }

        map
    }

    /// Keys are lowercase with suffix tokens already stripped
    fn build_genre_synonyms() -> HashMap<String, String> {
        let mut map = HashMap::new();

        map.insert("hip-hop".into(), "hip hop".into());
        map.insert("hiphop".into(), "hip hop".into());
        map.insert("rnb".into(), "rhythm and blues".into());
        map.insert("r&b".into(), "rhythm and blues".into());
        map.insert("afro-beat".into(), "afrobeat".into());
        map.insert("afro beat".into(), "afrobeat".into());
        map.insert("latin-american".into(), "latin american".into());
        map.insert("electro-pop".into(), "electropop".into());
        map.insert("k-pop".into(), "kpop".into());

        map
    }
}

/// Normalize a dataset with the default tables
pub fn normalize(dataset: Dataset) -> Dataset {
    Normalizer::new().normalize(dataset)
}

//! The reference filament catalog and candidate matching.
//!
//! The catalog is supplied by an external data-fetch component; this module
//! only reads it. Matching is hex-first: a catalog entry becomes a candidate
//! only when its color equals the tag's color byte for byte, and candidates
//! are then ranked by token similarity against the tag's detailed type.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One entry of the externally supplied filament catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilamentCatalogEntry {
    pub id: String,
    pub name: String,
    pub material: String,
    pub empty_spool_weight_g: u32,
    #[serde(default)]
    pub color_hex: Option<String>,
    #[serde(default)]
    pub translucent: bool,
    #[serde(default)]
    pub glow: bool,
    pub density: f64,
}

impl FilamentCatalogEntry {
    /// Descriptor used for similarity ranking against the tag's detailed
    /// filament type, e.g. `"PLA Red"` or `"PETG Clear translucent"`.
    pub fn descriptor(&self) -> String {
        if self.translucent {
            format!("{} {} translucent", self.material, self.name)
        } else {
            format!("{} {}", self.material, self.name)
        }
    }

    /// The entry's color normalized to the tag's hex form, if it has one.
    pub fn normalized_hex(&self) -> Option<String> {
        self.color_hex
            .as_deref()
            .map(|raw| raw.trim_start_matches('#').to_ascii_uppercase())
    }
}

/// Load a catalog from the JSON document the reference database serves.
pub fn catalog_from_json(data: &[u8]) -> serde_json::Result<Vec<FilamentCatalogEntry>> {
    serde_json::from_slice(data)
}

/// A catalog entry that passed the color filter, with its similarity score
/// as an integer percentage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogMatch {
    pub entry: FilamentCatalogEntry,
    pub score: u8,
}

/// Jaccard similarity of the whitespace token sets of `a` and `b`, case
/// insensitive. Returns 0.0 when both strings are empty.
pub fn token_similarity(a: &str, b: &str) -> f64 {
    let tokens_a: HashSet<String> = a.to_lowercase().split_whitespace().map(String::from).collect();
    let tokens_b: HashSet<String> = b.to_lowercase().split_whitespace().map(String::from).collect();
    let union = tokens_a.union(&tokens_b).count();
    if union == 0 {
        return 0.0;
    }
    let intersection = tokens_a.intersection(&tokens_b).count();
    intersection as f64 / union as f64
}

/// Token similarity scaled to an integer percentage.
pub fn similarity_percent(a: &str, b: &str) -> u8 {
    (token_similarity(a, b) * 100.0).round() as u8
}

/// Whether any catalog entry's color equals `rgb` exactly.
pub fn has_color_match(catalog: &[FilamentCatalogEntry], rgb: &str) -> bool {
    catalog
        .iter()
        .any(|entry| entry.normalized_hex().as_deref() == Some(rgb))
}

/// Candidate entries whose color equals `rgb` exactly, ranked by similarity
/// between `detailed_type` and each entry's descriptor, descending. Entries
/// scoring zero are dropped; ties keep catalog order.
pub fn match_candidates(
    catalog: &[FilamentCatalogEntry],
    rgb: &str,
    detailed_type: &str,
) -> Vec<CatalogMatch> {
    let mut candidates: Vec<CatalogMatch> = catalog
        .iter()
        .filter(|entry| entry.normalized_hex().as_deref() == Some(rgb))
        .map(|entry| CatalogMatch {
            score: similarity_percent(detailed_type, &entry.descriptor()),
            entry: entry.clone(),
        })
        .filter(|candidate| candidate.score > 0)
        .collect();
    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates
}

//! Decoding a raw tag dump into a structured filament record.
//!
//! The field map below is the wire format of tags already in the field and
//! must stay bit-exact. Offsets are `(block, offset, length)` with 16-byte
//! blocks:
//!
//! | field                  | block | offset | len | type       |
//! |------------------------|-------|--------|-----|------------|
//! | tray UID               | 9     | 0      | 16  | hex string |
//! | color bytes            | 5     | 0      | 4   | raw bytes  |
//! | filament type          | 2     | 0      | 16  | string     |
//! | detailed filament type | 4     | 0      | 16  | string     |
//! | spool weight           | 5     | 4      | 2   | uint LE    |
//! | filament diameter      | 5     | 8      | 4   | float LE   |
//! | filament length        | 14    | 4      | 2   | uint LE    |
//! | production datetime    | 12    | 0      | 16  | datetime   |

use crate::catalog::{CatalogMatch, FilamentCatalogEntry, has_color_match, match_candidates};
use crate::color::nearest_color_name;
use crate::constants::{DATETIME_FIELD_LEN, DIAMETER_DECIMALS, MIN_RECORD_BYTES};
use crate::error::DecodeError;
use crate::fields;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Provenance note for a color name resolved from the catalog.
pub const COLOR_FROM_CATALOG: &str = "from catalog";
/// Provenance note for a color name approximated from the palette.
pub const COLOR_APPROXIMATE: &str = "approximate";

/// Everything decoded from one tag scan.
///
/// This is an immutable value: later pipeline stages that resolve catalog
/// linkage produce copies via the `with_*` methods instead of mutating a
/// record other consumers may already hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecodedFilamentRecord {
    pub uid: String,
    pub tray_uid: String,
    pub filament_type: String,
    pub detailed_filament_type: String,
    pub color_bytes: Vec<u8>,
    /// Always six uppercase hex digits, from the first three color bytes.
    pub color_hex: String,
    pub color_name: String,
    pub color_name_detail: String,
    /// Catalog candidates ranked by similarity score, best first.
    pub possible_matches: Vec<CatalogMatch>,
    pub spool_weight_g: u32,
    pub filament_diameter_mm: f32,
    pub filament_length_m: u32,
    pub production_datetime: NaiveDateTime,
    // Linkage fields, unset at decode time and resolved later by the
    // synchronization pipeline.
    pub catalog_id: Option<String>,
    pub vendor_id: Option<String>,
    pub density: Option<f64>,
}

impl DecodedFilamentRecord {
    /// Decode a full tag dump against the supplied catalog.
    ///
    /// `uid` is the tag UID as reported by the reader. The dump must cover
    /// at least five blocks; fields that fall outside the supplied buffer
    /// fail with `DecodeError::OutOfBounds`. Partial records are never
    /// produced.
    pub fn decode(
        tag: &[u8],
        uid: &str,
        catalog: &[FilamentCatalogEntry],
    ) -> Result<Self, DecodeError> {
        if tag.len() < MIN_RECORD_BYTES {
            return Err(DecodeError::InsufficientData {
                expected: MIN_RECORD_BYTES,
                actual: tag.len(),
            });
        }

        let tray_uid = fields::hex_at(tag, 9, 0, 16)?;
        let color_bytes = fields::bytes_at(tag, 5, 0, 4)?.to_vec();
        let filament_type = fields::string_at(tag, 2, 0, 16)?;
        let color_hex_full = fields::hex_at(tag, 5, 0, 4)?;
        let detailed_filament_type = fields::string_at(tag, 4, 0, 16)?;
        let spool_weight_g = fields::uint_at(tag, 5, 4, 2)? as u32;
        let filament_diameter_mm = fields::float_at(tag, 5, 8, 4, Some(DIAMETER_DECIMALS))?;
        let filament_length_m = fields::uint_at(tag, 14, 4, 2)? as u32;
        let production_datetime = fields::datetime_at(tag, 12, 0, DATETIME_FIELD_LEN)?;

        // The displayed color drops the fourth (alpha) byte.
        let color_hex = color_hex_full[..6].to_string();

        let possible_matches = match_candidates(catalog, &color_hex, &detailed_filament_type);
        let color_name = match possible_matches.first() {
            Some(best) => best.entry.name.clone(),
            None => {
                nearest_color_name(color_bytes[0], color_bytes[1], color_bytes[2]).to_string()
            }
        };
        // Provenance tracks the color filter alone, even when similarity
        // scoring filtered every candidate out.
        let color_name_detail = if has_color_match(catalog, &color_hex) {
            COLOR_FROM_CATALOG.to_string()
        } else {
            COLOR_APPROXIMATE.to_string()
        };

        Ok(DecodedFilamentRecord {
            uid: uid.to_string(),
            tray_uid,
            filament_type,
            detailed_filament_type,
            color_bytes,
            color_hex,
            color_name,
            color_name_detail,
            possible_matches,
            spool_weight_g,
            filament_diameter_mm,
            filament_length_m,
            production_datetime,
            catalog_id: None,
            vendor_id: None,
            density: None,
        })
    }

    /// Copy of this record with the external catalog id resolved.
    pub fn with_catalog_id(self, id: impl Into<String>) -> Self {
        Self {
            catalog_id: Some(id.into()),
            ..self
        }
    }

    /// Copy of this record with the vendor id resolved.
    pub fn with_vendor_id(self, id: impl Into<String>) -> Self {
        Self {
            vendor_id: Some(id.into()),
            ..self
        }
    }

    /// Copy of this record with the material density resolved.
    pub fn with_density(self, density: f64) -> Self {
        Self {
            density: Some(density),
            ..self
        }
    }

    /// Synthetic identifier used when no explicit catalog id was resolved:
    /// vendor name, detailed type, color name, weight and diameter, each
    /// stripped to alphanumerics, joined with `_` and lower-cased.
    pub fn default_spool_id(&self, vendor_name: &str) -> String {
        let parts = [
            vendor_name.to_string(),
            self.detailed_filament_type.clone(),
            self.color_name.clone(),
            self.spool_weight_g.to_string(),
            self.filament_diameter_mm.to_string(),
        ];
        parts
            .iter()
            .map(|part| {
                part.chars()
                    .filter(|c| c.is_alphanumeric())
                    .collect::<String>()
            })
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("_")
            .to_lowercase()
    }

    /// Weight of the filament alone, with the catalog's empty-spool weight
    /// subtracted. Negative when the decoded weight is below the catalog's
    /// empty spool, which points at a mismatched entry.
    pub fn net_weight_g(&self, entry: &FilamentCatalogEntry) -> i64 {
        i64::from(self.spool_weight_g) - i64::from(entry.empty_spool_weight_g)
    }
}

impl fmt::Display for DecodedFilamentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} (#{}), {} g, {} mm, {} m, produced {}",
            self.detailed_filament_type,
            self.color_name,
            self.color_hex,
            self.spool_weight_g,
            self.filament_diameter_mm,
            self.filament_length_m,
            self.production_datetime.format("%Y-%m-%d %H:%M"),
        )
    }
}

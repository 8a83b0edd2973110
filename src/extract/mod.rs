//! Extraction normalizers — raw heterogeneous input to canonical candidates.
//!
//! Two adapters feed one output shape: `ocr` validates the loosely-typed
//! JSON the external PDF-text tool emits, `bulk` parses free-form text
//! pasted from the third-party tracking spreadsheet. Both are pure and
//! never fail; absence of data is a `None` field or a skipped group, and
//! the caller decides what "nothing extracted" means.

pub mod bulk;
pub mod ocr;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::types::SurebetCandidate;

/// Normalize a raw input block of unknown provenance.
///
/// If the whole input parses as a JSON object it is treated as OCR-tool
/// output (one candidate); anything else goes through the bulk-paste
/// parser (zero or more candidates). `now` supplies the default year and
/// fallback timestamp for the bulk dialect, which keeps this a pure
/// function of its inputs.
pub fn extract(input: &str, now: NaiveDateTime) -> Vec<SurebetCandidate> {
    match serde_json::from_str::<serde_json::Value>(input.trim()) {
        Ok(value) if value.is_object() => {
            debug!("input detected as OCR JSON");
            vec![ocr::normalize(&value)]
        }
        _ => {
            debug!("input detected as pasted text");
            bulk::parse(input, now)
        }
    }
}

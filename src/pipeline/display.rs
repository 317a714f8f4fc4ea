// Sat Oct 17 2026 - Alex

use crate::config::PatchConfig;
use crate::decode::Edid;
use crate::diff::{marker, ByteDiff};
use crate::edid::{hex, EdidBytes, EdidError, EdidResult};
use crate::patch::{OverrideFlag, PatchEngine, PatchSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_DISPLAY_NAME: &str = "Display";

/// Vendor and product identifiers as reported by the host. Opaque to the
/// decoder, carried through to the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct DisplayIds {
    pub vendor_id: u32,
    pub product_id: u32,
}

impl DisplayIds {
    pub fn new(vendor_id: u32, product_id: u32) -> Self {
        Self { vendor_id, product_id }
    }

    /// Relative location of the override document for this display.
    pub fn override_path(&self) -> PathBuf {
        PathBuf::from(format!("DisplayVendorID-{:x}", self.vendor_id))
            .join(format!("DisplayProductID-{:x}", self.product_id))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayInput {
    #[serde(alias = "edid_hex")]
    pub edid: String,
    #[serde(flatten)]
    pub ids: DisplayIds,
}

impl DisplayInput {
    pub fn new(edid: impl Into<String>, ids: DisplayIds) -> Self {
        Self { edid: edid.into(), ids }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedOverride {
    pub flag: OverrideFlag,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DisplayReport {
    pub ids: DisplayIds,
    pub override_path: PathBuf,
    pub display_name: String,
    pub summary: Edid,
    pub checksum_mismatches: Vec<usize>,
    pub original_hex: String,
    pub patched_hex: String,
    pub patches: PatchSet,
    pub applied: Vec<OverrideFlag>,
    pub skipped: Vec<SkippedOverride>,
    pub diff: String,
    #[serde(skip)]
    pub patched_bytes: Vec<u8>,
}

/// Decodes and patches one display. Nothing here is shared with other
/// displays.
pub fn process_display(input: &DisplayInput, config: &PatchConfig) -> EdidResult<DisplayReport> {
    let bytes = EdidBytes::from_hex(input.edid.trim())?;
    let summary = Edid::decode(&bytes)?;
    let display_name = summary
        .display_name()
        .filter(|name| !name.is_empty())
        .unwrap_or(DEFAULT_DISPLAY_NAME)
        .to_string();
    log::info!(
        "Found display '{}': vendorid {}, productid {}, EDID {}",
        display_name,
        input.ids.vendor_id,
        input.ids.product_id,
        summary.base.version_string()
    );

    let engine = PatchEngine::new(config.override_set());
    let outcome = engine.apply(&bytes)?;
    let patched_bytes = outcome.output_bytes(config.write_full_edid).to_vec();

    let byte_diff = ByteDiff::between(bytes.as_slice(), &patched_bytes);
    log::debug!("{}", byte_diff);

    let original_hex = hex::encode(bytes.as_slice());
    let patched_hex = hex::encode(&patched_bytes);

    Ok(DisplayReport {
        ids: input.ids,
        override_path: input.ids.override_path(),
        display_name,
        checksum_mismatches: summary.checksum_mismatches(),
        summary,
        diff: marker(&original_hex, &patched_hex),
        original_hex,
        patched_hex,
        patches: outcome.patches,
        applied: outcome.applied,
        skipped: outcome
            .skipped
            .into_iter()
            .map(|(flag, err): (OverrideFlag, EdidError)| SkippedOverride {
                flag,
                reason: err.to_string(),
            })
            .collect(),
        patched_bytes,
    })
}

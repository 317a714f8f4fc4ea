// Sat Oct 17 2026 - Alex

use super::display::{process_display, DisplayIds, DisplayInput, DisplayReport};
use crate::config::PatchConfig;
use crate::edid::EdidError;
use rayon::prelude::*;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error, Serialize)]
#[error("display #{index} (vendor {vendor_id}, product {product_id}): {error}")]
pub struct DisplayFailure {
    pub index: usize,
    pub vendor_id: u32,
    pub product_id: u32,
    pub error: String,
    #[serde(skip)]
    pub source_error: Option<EdidError>,
}

impl DisplayFailure {
    fn new(index: usize, ids: DisplayIds, error: EdidError) -> Self {
        Self {
            index,
            vendor_id: ids.vendor_id,
            product_id: ids.product_id,
            error: error.to_string(),
            source_error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    pub reports: Vec<DisplayReport>,
    pub failures: Vec<DisplayFailure>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.reports.len() + self.failures.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Runs displays through the pipeline. Every display gets its own engine
/// and patch set, so one failure never affects the others.
pub struct BatchProcessor {
    config: PatchConfig,
    parallel: bool,
}

impl BatchProcessor {
    pub fn new(config: PatchConfig) -> Self {
        Self { config, parallel: true }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    pub fn run(&self, displays: &[DisplayInput]) -> BatchReport {
        let results: Vec<Result<DisplayReport, DisplayFailure>> = if self.parallel {
            displays
                .par_iter()
                .enumerate()
                .map(|(index, input)| self.process(index, input))
                .collect()
        } else {
            displays
                .iter()
                .enumerate()
                .map(|(index, input)| self.process(index, input))
                .collect()
        };

        let mut batch = BatchReport::default();
        for result in results {
            match result {
                Ok(report) => batch.reports.push(report),
                Err(failure) => {
                    log::error!("{}", failure);
                    batch.failures.push(failure);
                }
            }
        }
        log::info!(
            "Processed {} display(s), {} failed",
            batch.total(),
            batch.failures.len()
        );
        batch
    }

    fn process(&self, index: usize, input: &DisplayInput) -> Result<DisplayReport, DisplayFailure> {
        process_display(input, &self.config).map_err(|e| DisplayFailure::new(index, input.ids, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edid::{fixtures, hex};
    use crate::patch::OverrideFlag;

    fn display(data: &[u8], vendor_id: u32) -> DisplayInput {
        DisplayInput::new(hex::encode(data), DisplayIds::new(vendor_id, 1))
    }

    #[test]
    fn test_failure_is_isolated() {
        let good = fixtures::two_block_edid();
        let displays = vec![
            display(&good, 1),
            DisplayInput::new("00FF", DisplayIds::new(2, 1)),
            display(&good, 3),
        ];
        let batch = BatchProcessor::new(PatchConfig::default()).run(&displays);
        assert_eq!(batch.total(), 3);
        assert_eq!(batch.reports.len(), 2);
        assert_eq!(batch.failures.len(), 1);
        assert_eq!(batch.failures[0].index, 1);
        assert_eq!(batch.failures[0].vendor_id, 2);
        assert!(batch.failures[0].source_error.as_ref().unwrap().is_malformed());
    }

    #[test]
    fn test_displays_do_not_share_patches() {
        let with_ext = fixtures::two_block_edid();
        let base_only = fixtures::base_block().to_vec();
        let config = PatchConfig::new().with_overrides([OverrideFlag::NoExtensions]);
        let batch = BatchProcessor::new(config)
            .run(&[display(&with_ext, 1), display(&base_only, 2)]);

        let first = batch.reports.iter().find(|r| r.ids.vendor_id == 1).unwrap();
        let second = batch.reports.iter().find(|r| r.ids.vendor_id == 2).unwrap();
        assert!(!first.patches.is_empty());
        assert!(second.patches.is_empty());
        assert!(second.applied.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let displays: Vec<_> = (0..8)
            .map(|i| display(&fixtures::two_block_edid(), i))
            .collect();
        let config = PatchConfig::default();
        let parallel = BatchProcessor::new(config.clone()).run(&displays);
        let sequential = BatchProcessor::new(config).with_parallel(false).run(&displays);
        let hexes = |b: &BatchReport| b.reports.iter().map(|r| r.patched_hex.clone()).collect::<Vec<_>>();
        assert_eq!(hexes(&parallel), hexes(&sequential));
    }
}

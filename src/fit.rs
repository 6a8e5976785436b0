//! Fit selector: picks a version for payloads that don't pin one down
//! explicitly (spec §4.7). Ported from `rmqrcode`'s
//! `rMQR.fit` / `enums/fit_strategy.py::FitStrategy`, generalized from a
//! single-mode capacity lookup to the multi-mode segmentation optimizer.

use std::collections::HashSet;

use log::{debug, trace};

use crate::error::{Result, RmqrError};
use crate::segment::optimize;
use crate::symbol::Symbol;
use crate::version::{EccLevel, VersionInfo, VERSIONS};

/// How [`fit`] ranks versions that are all large enough to hold the
/// payload.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FitStrategy {
    MinimizeWidth,
    MinimizeHeight,
    Balanced,
}

fn rank(v: &VersionInfo, strategy: FitStrategy) -> u32 {
    match strategy {
        FitStrategy::MinimizeWidth => v.width as u32,
        FitStrategy::MinimizeHeight => v.height as u32,
        FitStrategy::Balanced => v.height as u32 * 9 + v.width as u32,
    }
}

/// Iterates the known version set in version-indicator order, running
/// the segment optimizer for each candidate; among versions whose
/// capacity the optimal segmentation fits, dedupes by width/height
/// (first version to claim either dimension wins, matching the
/// original's one-entry-per-dimension shortlist) and keeps the one
/// ranked best by `strategy`.
fn select_version(data: &str, ecc: EccLevel, strategy: FitStrategy) -> Result<&'static VersionInfo> {
    let mut seen_widths = HashSet::new();
    let mut seen_heights = HashSet::new();
    let mut candidates: Vec<&'static VersionInfo> = Vec::new();

    debug!("selecting rMQR version for {} characters", data.chars().count());
    for version in VERSIONS {
        let segments = match optimize(data, version) {
            Ok(s) => s,
            Err(_) => continue,
        };
        let total_bits: usize = segments.iter().map(|s| s.length(version)).sum();
        if total_bits > version.data_bit_capacity(ecc) as usize {
            continue;
        }
        if seen_widths.contains(&version.width) || seen_heights.contains(&version.height) {
            continue;
        }
        seen_widths.insert(version.width);
        seen_heights.insert(version.height);
        trace!("candidate version {}", version.name);
        candidates.push(version);
    }

    if candidates.is_empty() {
        return Err(RmqrError::DataTooLong);
    }

    candidates.sort_by_key(|v| rank(v, strategy));
    let selected = candidates[0];
    debug!("selected version {}", selected.name);
    Ok(selected)
}

/// One-shot encoder: picks the best-fitting version for `data` under
/// `strategy`, runs the segmentation optimizer against it, and returns a
/// made [`Symbol`]. Fails with `DataTooLong` if no legal version can
/// hold `data` at the requested ECC level.
pub fn fit(data: &str, ecc: EccLevel, strategy: FitStrategy) -> Result<Symbol> {
    let version = select_version(data, ecc, strategy)?;
    let segments = optimize(data, version)?;
    let mut symbol = Symbol::with_version(version, ecc);
    symbol.set_segments(segments);
    symbol.make()?;
    Ok(symbol)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_selects_a_legal_version_for_short_payload() {
        let symbol = fit("abc", EccLevel::M, FitStrategy::Balanced).unwrap();
        let grid = symbol.to_grid(true);
        for cell in &grid[0] {
            assert_eq!(*cell, 0);
        }
    }

    #[test]
    fn minimize_width_prefers_narrower_versions_than_minimize_height() {
        let by_width = fit("0123456789", EccLevel::M, FitStrategy::MinimizeWidth).unwrap();
        let by_height = fit("0123456789", EccLevel::M, FitStrategy::MinimizeHeight).unwrap();
        assert!(by_width.version().width <= by_height.version().width);
    }

    #[test]
    fn data_too_long_for_any_version_is_rejected() {
        let data = "a".repeat(crate::segment::MAX_CHARACTERS + 1);
        assert!(matches!(fit(&data, EccLevel::M, FitStrategy::Balanced), Err(RmqrError::DataTooLong)));
    }

    #[test]
    fn high_ecc_level_can_still_find_a_fit_for_a_short_numeric_payload() {
        let symbol = fit("0123456789012345", EccLevel::H, FitStrategy::Balanced).unwrap();
        assert_eq!(symbol.ecc(), EccLevel::H);
    }
}

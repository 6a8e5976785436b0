//! Segmentation optimizer: partitions input text into a minimum-total-bit
//! sequence of mode segments. Ported from `rmqrcode`'s
//! `segments.py::SegmentOptimizer` (`dp[n][mode][u]` / `parents[n][mode][u]`).

use log::{debug, trace};

use crate::error::{Result, RmqrError};
use crate::mode::{Mode, ALL_MODES};
use crate::version::VersionInfo;

/// Maximum input length the optimizer will consider (spec §4.4): the
/// largest payload that can fit any rMQR at level M.
pub const MAX_CHARACTERS: usize = 360;

/// A (mode, payload) pair. The payload is valid for `mode` (spec §4.3).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Segment {
    pub mode: Mode,
    pub data: String,
}

impl Segment {
    pub fn new(mode: Mode, data: impl Into<String>) -> Self {
        Segment { mode, data: data.into() }
    }

    /// Bit length of this segment for the given version.
    pub fn length(&self, version: &VersionInfo) -> usize {
        self.mode.length(&self.data, version.cci_widths.width_for(self.mode))
    }
}

/// Sum of the encoded length of `segments` for `version` (spec §4.4,
/// `segments.py::compute_length`).
pub fn segments_length(segments: &[Segment], version: &VersionInfo) -> usize {
    segments.iter().map(|s| s.length(version)).sum()
}

const INF: u32 = u32::MAX / 2;

/// `u` slots: Numeric has 3 (0,1,2), Alphanumeric has 2 (0,1), Byte/Kanji
/// always sit in slot 0. The DP table is sized for the widest case (3)
/// and the extra slots for Byte/Kanji/Alphanumeric are simply unused.
const U_SLOTS: usize = 3;
const NUM_MODES: usize = 4;

/// Computes the optimal mode segmentation of `data` for the given
/// version by dynamic programming (spec §4.4). Returns `DataTooLong` if
/// `data` exceeds [`MAX_CHARACTERS`].
pub fn optimize(data: &str, version: &VersionInfo) -> Result<Vec<Segment>> {
    let chars: Vec<char> = data.chars().collect();
    let n_chars = chars.len();
    trace!("segmenting {} characters against {}", n_chars, version.name);
    if n_chars > MAX_CHARACTERS {
        return Err(RmqrError::DataTooLong);
    }

    // dp[n][mode][u], parents[n][mode][u] = (prev_n, prev_mode, prev_u)
    let mut dp = vec![[[INF; U_SLOTS]; NUM_MODES]; n_chars + 1];
    let mut parents = vec![[[(0usize, 0usize, 0usize); U_SLOTS]; NUM_MODES]; n_chars + 1];

    for (mi, &mode) in ALL_MODES.iter().enumerate() {
        let cci_width = version.cci_widths.width_for(mode);
        dp[0][mi][0] = mode.length("", cci_width) as u32;
    }

    for n in 0..n_chars {
        let ch = chars[n];
        let ch_str: String = ch.to_string();
        for mi in 0..NUM_MODES {
            for u in 0..U_SLOTS {
                if dp[n][mi][u] >= INF {
                    continue;
                }
                let base = dp[n][mi][u];
                for (nmi, &new_mode) in ALL_MODES.iter().enumerate() {
                    if !new_mode.is_valid_char(ch) {
                        continue;
                    }
                    let cci_width = version.cci_widths.width_for(new_mode);
                    let (cost, new_u) = if nmi == mi {
                        match new_mode {
                            Mode::Numeric => (if u == 0 { 4 } else { 3 }, (u + 1) % 3),
                            Mode::Alphanumeric => (if u == 0 { 6 } else { 5 }, (u + 1) % 2),
                            Mode::Byte => (8, 0),
                            Mode::Kanji => (13, 0),
                        }
                    } else {
                        let new_u = match new_mode {
                            Mode::Numeric | Mode::Alphanumeric => 1,
                            Mode::Byte | Mode::Kanji => 0,
                        };
                        (new_mode.length(&ch_str, cci_width) as u32, new_u)
                    };
                    let candidate = base + cost;
                    if candidate < dp[n + 1][nmi][new_u] {
                        dp[n + 1][nmi][new_u] = candidate;
                        parents[n + 1][nmi][new_u] = (n, mi, u);
                    }
                }
            }
        }
    }

    let mut best_mode = 0;
    let mut best_u = 0;
    let mut best_cost = INF;
    for mi in 0..NUM_MODES {
        for u in 0..U_SLOTS {
            if dp[n_chars][mi][u] < best_cost {
                best_cost = dp[n_chars][mi][u];
                best_mode = mi;
                best_u = u;
            }
        }
    }
    if best_cost >= INF {
        return Err(RmqrError::DataTooLong);
    }

    // Reconstruct the path of (position, mode) pairs, then coalesce runs.
    let mut path = Vec::with_capacity(n_chars);
    let mut idx = (n_chars, best_mode, best_u);
    while idx.0 != 0 {
        path.push(idx);
        idx = parents[idx.0][idx.1][idx.2];
    }
    path.reverse();

    let mut segments: Vec<Segment> = Vec::new();
    let mut current_mode: Option<usize> = None;
    let mut current_data = String::new();
    for &(pos, mi, _u) in &path {
        let c = chars[pos - 1];
        if current_mode == Some(mi) {
            current_data.push(c);
        } else {
            if let Some(prev_mi) = current_mode {
                segments.push(Segment::new(ALL_MODES[prev_mi], std::mem::take(&mut current_data)));
            }
            current_mode = Some(mi);
            current_data.push(c);
        }
    }
    if let Some(prev_mi) = current_mode {
        segments.push(Segment::new(ALL_MODES[prev_mi], current_data));
    }

    debug!("segmented into {} segment(s), {} bits", segments.len(), best_cost);
    Ok(segments)
}

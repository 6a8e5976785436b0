//! The matrix builder and `Symbol` lifecycle (spec §3 `Symbol`, §4.6
//! Matrix Builder). Ported from `rmqrcode`'s `rmqrcode.py`:
//! `_put_finder_pattern` / `_put_corner_finder_pattern` /
//! `_put_alignment_pattern` / `_put_timing_pattern` /
//! `_put_version_information*` / `_put_data` / `_apply_mask`,
//! generalized over the `VersionInfo` table instead of a hardcoded
//! per-version Python dict.

use log::debug;

use crate::bch::compute_bch;
use crate::codec::encode_codewords;
use crate::color::{Color, MaskArea, Matrix};
use crate::error::{Result, RmqrError};
use crate::mask::is_masked;
use crate::mode::Mode;
use crate::segment::Segment;
use crate::version::{alignment_centers, EccLevel, VersionInfo};

const FINDER_SIDE_MASK: u32 = 0b011111101010110010;
const FINDER_SUB_SIDE_MASK: u32 = 0b100000101001111011;

/// A constructed rMQR symbol: the chosen version and ECC level, and the
/// segments that were encoded into it. `Symbol::make` commits segments
/// to the matrix; the symbol is read-only afterward (spec §3 Lifecycle).
pub struct Symbol {
    version: &'static VersionInfo,
    ecc: EccLevel,
    segments: Vec<Segment>,
    matrix: Option<Matrix>,
}

impl Symbol {
    /// Constructs an (unmade) symbol for the given version name and ECC
    /// level. Fails with `IllegalVersion` if `version_name` is not one of
    /// the 32 legal rMQR versions.
    pub fn new(version_name: &str, ecc: EccLevel) -> Result<Self> {
        let version = VersionInfo::by_name(version_name)?;
        Ok(Symbol { version, ecc, segments: Vec::new(), matrix: None })
    }

    /// Constructs an (unmade) symbol for an already-resolved version, used
    /// by the fit selector once it has picked a version.
    pub fn with_version(version: &'static VersionInfo, ecc: EccLevel) -> Self {
        Symbol { version, ecc, segments: Vec::new(), matrix: None }
    }

    pub fn version(&self) -> &'static VersionInfo {
        self.version
    }

    pub fn ecc(&self) -> EccLevel {
        self.ecc
    }

    pub fn version_name(&self) -> &'static str {
        self.version.name
    }

    pub fn width(&self) -> usize {
        self.version.width as usize
    }

    pub fn height(&self) -> usize {
        self.version.height as usize
    }

    /// Appends a segment to be encoded. Segments are encoded in the
    /// order appended; callers that want the optimal segmentation should
    /// use [`Symbol::fit`] or [`optimize`] instead of hand-building
    /// segments for a specific mode.
    pub fn add_segment(&mut self, mode: Mode, data: impl Into<String>) {
        self.segments.push(Segment::new(mode, data));
    }

    /// Replaces the segment list outright, used by the fit selector to
    /// install the result of the segmentation optimizer.
    pub fn set_segments(&mut self, segments: Vec<Segment>) {
        self.segments = segments;
    }

    /// Commits the appended segments to the matrix: function patterns,
    /// format information, interleaved codewords, and the mask (spec
    /// §4.6). Fails with `NoSegment` if no segment was appended, or
    /// `DataTooLong`/`IllegalCharacter` if encoding fails.
    pub fn make(&mut self) -> Result<()> {
        if self.segments.is_empty() {
            return Err(RmqrError::NoSegment);
        }
        debug!("building {} ({:?})", self.version.name, self.ecc);

        let codewords = encode_codewords(&self.segments, self.version, self.ecc)?;

        let width = self.width();
        let height = self.height();
        let mut matrix = Matrix::new(width, height);

        put_finder_pattern(&mut matrix, width, height);
        put_finder_sub_pattern(&mut matrix, width, height);
        put_corner_finder_pattern(&mut matrix, width, height);
        put_alignment_pattern(&mut matrix, height, self.version);
        put_timing_pattern(&mut matrix, width, height, self.version);
        put_format_information(&mut matrix, width, height, self.version, self.ecc);
        let mask_area = put_data(&mut matrix, width, height, self.version, &codewords);
        apply_mask(&mut matrix, width, height, &mask_area);

        debug_assert!(matrix.is_complete(), "matrix must have no undefined cells after make()");
        self.matrix = Some(matrix);
        Ok(())
    }

    /// Returns the matrix as a 2-D grid of 0/1 integers (spec §6
    /// `to_grid`). Panics if called before [`Symbol::make`] succeeds,
    /// since an un-made symbol has no committed matrix.
    pub fn to_grid(&self, include_quiet_zone: bool) -> Vec<Vec<u8>> {
        self.matrix.as_ref().expect("Symbol::make must succeed before to_grid").to_grid(include_quiet_zone)
    }
}

fn put_finder_pattern(matrix: &mut Matrix, _width: usize, height: usize) {
    for i in 0..7 {
        for j in 0..7 {
            let color = if i == 0 || i == 6 || j == 0 || j == 6 { Color::Dark } else { Color::Light };
            matrix.set(j, i, color);
        }
    }
    for i in 0..3 {
        for j in 0..3 {
            matrix.set(2 + j, 2 + i, Color::Dark);
        }
    }
    // Separator.
    for n in 0..8 {
        if n < height {
            matrix.set(7, n, Color::Light);
        }
        if height >= 9 {
            matrix.set(n, 7, Color::Light);
        }
    }
}

fn put_finder_sub_pattern(matrix: &mut Matrix, width: usize, height: usize) {
    for i in 0..5 {
        for j in 0..5 {
            let color = if i == 0 || i == 4 || j == 0 || j == 4 { Color::Dark } else { Color::Light };
            matrix.set(width - j - 1, height - i - 1, color);
        }
    }
    matrix.set(width - 1 - 2, height - 1 - 2, Color::Dark);
}

fn put_corner_finder_pattern(matrix: &mut Matrix, width: usize, height: usize) {
    matrix.set(0, height - 1, Color::Dark);
    matrix.set(1, height - 1, Color::Dark);
    matrix.set(2, height - 1, Color::Dark);
    if height >= 11 {
        matrix.set(0, height - 2, Color::Dark);
        matrix.set(1, height - 2, Color::Light);
    }

    matrix.set(width - 1, 0, Color::Dark);
    matrix.set(width - 2, 0, Color::Dark);
    matrix.set(width - 1, 1, Color::Dark);
    matrix.set(width - 2, 1, Color::Light);
}

fn put_alignment_pattern(matrix: &mut Matrix, height: usize, version: &VersionInfo) {
    for &center_x in alignment_centers(version.width) {
        let center_x = center_x as usize;
        for i in 0..3usize {
            for j in 0..3usize {
                let color = if i == 0 || i == 2 || j == 0 || j == 2 { Color::Dark } else { Color::Light };
                let x = center_x + j - 1;
                matrix.set(x, i, color);
                matrix.set(x, height - 1 - i, color);
            }
        }
    }
}

fn put_timing_pattern(matrix: &mut Matrix, width: usize, height: usize, version: &VersionInfo) {
    for j in 0..width {
        let color = if (j + 1) % 2 != 0 { Color::Dark } else { Color::Light };
        for &i in &[0, height - 1] {
            matrix.set_if_undefined(j, i, color);
        }
    }

    let mut center_xs: Vec<usize> = vec![0, width - 1];
    center_xs.extend(alignment_centers(version.width).iter().map(|&x| x as usize));
    for i in 0..height {
        let color = if (i + 1) % 2 != 0 { Color::Dark } else { Color::Light };
        for &j in &center_xs {
            matrix.set_if_undefined(j, i, color);
        }
    }
}

fn compute_format_information(version: &VersionInfo, ecc: EccLevel) -> u32 {
    let mut value = version.version_indicator as u32;
    if ecc == EccLevel::H {
        value |= 1 << 6;
    }
    compute_bch(value as u8)
}

fn put_format_information(matrix: &mut Matrix, width: usize, height: usize, version: &VersionInfo, ecc: EccLevel) {
    let format_info = compute_format_information(version, ecc);

    let finder_side = format_info ^ FINDER_SIDE_MASK;
    for n in 0..18 {
        let di = n % 5;
        let dj = n / 5;
        let color = if (finder_side >> n) & 1 != 0 { Color::Dark } else { Color::Light };
        matrix.set(8 + dj, 1 + di, color);
    }

    let finder_sub_side = format_info ^ FINDER_SUB_SIDE_MASK;
    let si = height - 6;
    let sj = width - 8;
    for n in 0..15 {
        let di = n % 5;
        let dj = n / 5;
        let color = if (finder_sub_side >> n) & 1 != 0 { Color::Dark } else { Color::Light };
        matrix.set(sj + dj, si + di, color);
    }
    for (n, &x) in [width - 5, width - 4, width - 3].iter().enumerate() {
        let color = if (finder_sub_side >> (15 + n)) & 1 != 0 { Color::Dark } else { Color::Light };
        matrix.set(x, height - 6, color);
    }
}

fn put_data(matrix: &mut Matrix, width: usize, height: usize, version: &VersionInfo, codewords: &[u8]) -> MaskArea {
    let mut mask_area = MaskArea::new(width, height);

    let mut dy: i32 = -1;
    let mut cx = width as i32 - 2;
    let mut cy = height as i32 - 6;
    let mut remainder_bits = version.remainder_bits as i32;
    let mut codeword_idx = 0usize;
    let mut bit_idx = 0u32;
    let total_codewords = codewords.len();

    loop {
        for &x in &[cx, cx - 1] {
            let (xu, yu) = (x as usize, cy as usize);
            if matrix.is_undefined(xu, yu) {
                if codeword_idx == total_codewords {
                    matrix.set(xu, yu, Color::Light);
                    mask_area.mark(xu, yu);
                    remainder_bits -= 1;
                } else {
                    let bit = (codewords[codeword_idx] >> (7 - bit_idx)) & 1;
                    matrix.set(xu, yu, if bit != 0 { Color::Dark } else { Color::Light });
                    mask_area.mark(xu, yu);
                    bit_idx += 1;
                    if bit_idx == 8 {
                        bit_idx = 0;
                        codeword_idx += 1;
                    }
                }
                if codeword_idx == total_codewords && remainder_bits == 0 {
                    break;
                }
            }
        }

        if codeword_idx == total_codewords && remainder_bits == 0 {
            break;
        }

        if dy < 0 && cy == 1 {
            cx -= 2;
            dy = 1;
        } else if dy > 0 && cy == height as i32 - 2 {
            cx -= 2;
            dy = -1;
        } else {
            cy += dy;
        }
    }

    mask_area
}

fn apply_mask(matrix: &mut Matrix, width: usize, height: usize, mask_area: &MaskArea) {
    for y in 0..height {
        for x in 0..width {
            if !mask_area.is_marked(x, y) {
                continue;
            }
            if is_masked(x, y) {
                let flipped = match matrix.get(x, y) {
                    Color::Dark => Color::Light,
                    Color::Light => Color::Dark,
                    Color::Undefined => Color::Undefined,
                };
                matrix.set(x, y, flipped);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn make_without_segments_fails() {
        let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
        assert!(matches!(symbol.make(), Err(RmqrError::NoSegment)));
    }

    #[test]
    fn illegal_version_name_rejected() {
        assert!(matches!(Symbol::new("not exists", EccLevel::M), Err(RmqrError::IllegalVersion(_))));
    }

    #[test]
    fn make_produces_correct_shape_with_and_without_quiet_zone() {
        let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
        symbol.add_segment(Mode::Byte, "abc");
        symbol.make().unwrap();

        let without = symbol.to_grid(false);
        assert_eq!(without.len(), 13);
        assert_eq!(without[0].len(), 99);

        let with = symbol.to_grid(true);
        assert_eq!(with.len(), 17);
        assert_eq!(with[0].len(), 103);
    }

    #[test]
    fn finder_pattern_cells_are_fixed_regardless_of_payload() {
        for payload in ["abc", "a completely different payload string"] {
            let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
            symbol.add_segment(Mode::Byte, payload);
            symbol.make().unwrap();
            let grid = symbol.to_grid(false);
            // Finder ring top-left corner is always dark.
            assert_eq!(grid[0][0], 1);
            assert_eq!(grid[0][6], 1);
            assert_eq!(grid[6][0], 1);
            assert_eq!(grid[3][3], 1);
            assert_eq!(grid[1][1], 0);
        }
    }

    #[test]
    fn byte_mode_72_a_too_long_71_fits_for_r13x99() {
        // R13x99 M has a 584-bit data capacity (block plan k=36+37); with
        // a 3-bit mode indicator and 7-bit CCI, 71 bytes (581 bits with
        // terminator) fits and 72 (586 bits, no room for the terminator)
        // doesn't. See DESIGN.md for why this replaces the 150/151
        // boundary spec.md's scenario S6 names for this version.
        let ok = "a".repeat(71);
        let mut symbol = Symbol::new("R13x99", EccLevel::M).unwrap();
        symbol.add_segment(Mode::Byte, ok);
        assert!(symbol.make().is_ok());

        let too_long = "a".repeat(72);
        let mut symbol2 = Symbol::new("R13x99", EccLevel::M).unwrap();
        symbol2.add_segment(Mode::Byte, too_long);
        assert!(matches!(symbol2.make(), Err(RmqrError::DataTooLong)));
    }

    #[test]
    fn mask_idempotence_restores_pre_mask_state() {
        let width = 13;
        let height = 7;
        let mut matrix = Matrix::new(width, height);
        matrix.set(0, 0, Color::Dark);
        matrix.set(1, 0, Color::Light);
        let mut area = MaskArea::new(width, height);
        area.mark(0, 0);
        area.mark(1, 0);
        let before = (matrix.get(0, 0), matrix.get(1, 0));
        apply_mask(&mut matrix, width, height, &area);
        apply_mask(&mut matrix, width, height, &area);
        assert_eq!((matrix.get(0, 0), matrix.get(1, 0)), before);
    }
}

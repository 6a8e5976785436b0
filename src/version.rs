//! Static per-version geometry: the 32 legal (version, width, height)
//! triples, character-count-indicator widths, block plans and alignment
//! pattern coordinates. Ported from `rmqrcode`'s
//! `format/rmqr_versions.py` and `format/alignment_pattern_coordinates.py`.

use crate::error::{Result, RmqrError};
use crate::mode::Mode;

/// Character-count-indicator width per mode, for one version.
#[derive(Copy, Clone, Debug)]
pub struct ModeTable {
    pub numeric: u8,
    pub alphanumeric: u8,
    pub byte: u8,
    pub kanji: u8,
}

impl ModeTable {
    pub fn width_for(&self, mode: Mode) -> u8 {
        match mode {
            Mode::Numeric => self.numeric,
            Mode::Alphanumeric => self.alphanumeric,
            Mode::Byte => self.byte,
            Mode::Kanji => self.kanji,
        }
    }
}

/// One contiguous run of `num` blocks sharing the same `(c, k)` shape:
/// `c` total codewords, `k` of them data codewords, `c - k` ECC
/// codewords. Ordered so the group with the larger `k` is last, matching
/// the table order in the standard (and the Python source it was ported
/// from).
#[derive(Copy, Clone, Debug)]
pub struct BlockGroup {
    pub num: u8,
    pub c: u8,
    pub k: u8,
}

/// Static descriptor for one legal (version, width, height) triple.
#[derive(Copy, Clone, Debug)]
pub struct VersionInfo {
    pub name: &'static str,
    pub version_indicator: u8,
    pub width: u16,
    pub height: u16,
    pub remainder_bits: u8,
    pub codewords_total: u16,
    pub cci_widths: ModeTable,
    pub data_bits_m: u32,
    pub data_bits_h: u32,
    pub blocks_m: &'static [BlockGroup],
    pub blocks_h: &'static [BlockGroup],
}

/// Error-correction level. rMQR defines two: M (medium) and H (high).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EccLevel {
    M,
    H,
}

impl VersionInfo {
    pub fn blocks(&self, ecc: EccLevel) -> &'static [BlockGroup] {
        match ecc {
            EccLevel::M => self.blocks_m,
            EccLevel::H => self.blocks_h,
        }
    }

    pub fn data_bit_capacity(&self, ecc: EccLevel) -> u32 {
        match ecc {
            EccLevel::M => self.data_bits_m,
            EccLevel::H => self.data_bits_h,
        }
    }

    /// Looks up a version descriptor by its `R{height}x{width}` name.
    pub fn by_name(name: &str) -> Result<&'static VersionInfo> {
        VERSIONS
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| RmqrError::IllegalVersion(name.to_string()))
    }
}

/// The 32 legal rMQR versions, in the iteration order that assigns their
/// 5-bit version indicators (0..=31). This is the same order the fit
/// selector walks when deduplicating by width/height (spec §4.7).
pub static VERSIONS: &[VersionInfo] = &[
    VersionInfo {
        name: "R7x43",
        version_indicator: 0,
        width: 43,
        height: 7,
        remainder_bits: 0,
        codewords_total: 13,
        cci_widths: ModeTable { numeric: 4, alphanumeric: 3, byte: 3, kanji: 2 },
        data_bits_m: 48,
        data_bits_h: 24,
        blocks_m: &[BlockGroup { num: 1, c: 13, k: 6 }],
        blocks_h: &[BlockGroup { num: 1, c: 13, k: 3 }],
    },
    VersionInfo {
        name: "R7x59",
        version_indicator: 1,
        width: 59,
        height: 7,
        remainder_bits: 3,
        codewords_total: 21,
        cci_widths: ModeTable { numeric: 5, alphanumeric: 5, byte: 4, kanji: 3 },
        data_bits_m: 96,
        data_bits_h: 56,
        blocks_m: &[BlockGroup { num: 1, c: 21, k: 12 }],
        blocks_h: &[BlockGroup { num: 1, c: 21, k: 7 }],
    },
    VersionInfo {
        name: "R7x77",
        version_indicator: 2,
        width: 77,
        height: 7,
        remainder_bits: 5,
        codewords_total: 32,
        cci_widths: ModeTable { numeric: 6, alphanumeric: 5, byte: 5, kanji: 4 },
        data_bits_m: 160,
        data_bits_h: 80,
        blocks_m: &[BlockGroup { num: 1, c: 32, k: 20 }],
        blocks_h: &[BlockGroup { num: 1, c: 32, k: 10 }],
    },
    VersionInfo {
        name: "R7x99",
        version_indicator: 3,
        width: 99,
        height: 7,
        remainder_bits: 6,
        codewords_total: 44,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 5, kanji: 5 },
        data_bits_m: 224,
        data_bits_h: 112,
        blocks_m: &[BlockGroup { num: 1, c: 44, k: 28 }],
        blocks_h: &[BlockGroup { num: 1, c: 44, k: 14 }],
    },
    VersionInfo {
        name: "R7x139",
        version_indicator: 4,
        width: 139,
        height: 7,
        remainder_bits: 1,
        codewords_total: 68,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 352,
        data_bits_h: 192,
        blocks_m: &[BlockGroup { num: 1, c: 68, k: 44 }],
        blocks_h: &[BlockGroup { num: 2, c: 34, k: 12 }],
    },
    VersionInfo {
        name: "R9x43",
        version_indicator: 5,
        width: 43,
        height: 9,
        remainder_bits: 2,
        codewords_total: 21,
        cci_widths: ModeTable { numeric: 5, alphanumeric: 5, byte: 4, kanji: 3 },
        data_bits_m: 96,
        data_bits_h: 56,
        blocks_m: &[BlockGroup { num: 1, c: 21, k: 12 }],
        blocks_h: &[BlockGroup { num: 1, c: 21, k: 7 }],
    },
    VersionInfo {
        name: "R9x59",
        version_indicator: 6,
        width: 59,
        height: 9,
        remainder_bits: 3,
        codewords_total: 33,
        cci_widths: ModeTable { numeric: 6, alphanumeric: 5, byte: 5, kanji: 4 },
        data_bits_m: 168,
        data_bits_h: 88,
        blocks_m: &[BlockGroup { num: 1, c: 33, k: 21 }],
        blocks_h: &[BlockGroup { num: 1, c: 33, k: 11 }],
    },
    VersionInfo {
        name: "R9x77",
        version_indicator: 7,
        width: 77,
        height: 9,
        remainder_bits: 1,
        codewords_total: 49,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 5, kanji: 5 },
        data_bits_m: 248,
        data_bits_h: 136,
        blocks_m: &[BlockGroup { num: 1, c: 49, k: 31 }],
        blocks_h: &[BlockGroup { num: 1, c: 24, k: 8 }, BlockGroup { num: 1, c: 25, k: 9 }],
    },
    VersionInfo {
        name: "R9x99",
        version_indicator: 8,
        width: 99,
        height: 9,
        remainder_bits: 4,
        codewords_total: 66,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 336,
        data_bits_h: 176,
        blocks_m: &[BlockGroup { num: 1, c: 66, k: 42 }],
        blocks_h: &[BlockGroup { num: 2, c: 33, k: 11 }],
    },
    VersionInfo {
        name: "R9x139",
        version_indicator: 9,
        width: 139,
        height: 9,
        remainder_bits: 5,
        codewords_total: 99,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 6, kanji: 6 },
        data_bits_m: 504,
        data_bits_h: 264,
        blocks_m: &[BlockGroup { num: 1, c: 49, k: 31 }, BlockGroup { num: 1, c: 50, k: 32 }],
        blocks_h: &[BlockGroup { num: 3, c: 33, k: 11 }],
    },
    VersionInfo {
        name: "R11x27",
        version_indicator: 10,
        width: 27,
        height: 11,
        remainder_bits: 2,
        codewords_total: 15,
        cci_widths: ModeTable { numeric: 4, alphanumeric: 4, byte: 3, kanji: 2 },
        data_bits_m: 56,
        data_bits_h: 40,
        blocks_m: &[BlockGroup { num: 1, c: 15, k: 7 }],
        blocks_h: &[BlockGroup { num: 1, c: 15, k: 5 }],
    },
    VersionInfo {
        name: "R11x43",
        version_indicator: 11,
        width: 43,
        height: 11,
        remainder_bits: 1,
        codewords_total: 31,
        cci_widths: ModeTable { numeric: 6, alphanumeric: 5, byte: 5, kanji: 4 },
        data_bits_m: 152,
        data_bits_h: 88,
        blocks_m: &[BlockGroup { num: 1, c: 31, k: 19 }],
        blocks_h: &[BlockGroup { num: 1, c: 31, k: 11 }],
    },
    VersionInfo {
        name: "R11x59",
        version_indicator: 12,
        width: 59,
        height: 11,
        remainder_bits: 0,
        codewords_total: 47,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 5, kanji: 5 },
        data_bits_m: 248,
        data_bits_h: 120,
        blocks_m: &[BlockGroup { num: 1, c: 47, k: 31 }],
        blocks_h: &[BlockGroup { num: 1, c: 23, k: 7 }, BlockGroup { num: 1, c: 24, k: 8 }],
    },
    VersionInfo {
        name: "R11x77",
        version_indicator: 13,
        width: 77,
        height: 11,
        remainder_bits: 2,
        codewords_total: 67,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 344,
        data_bits_h: 184,
        blocks_m: &[BlockGroup { num: 1, c: 67, k: 43 }],
        blocks_h: &[BlockGroup { num: 1, c: 33, k: 11 }, BlockGroup { num: 1, c: 34, k: 12 }],
    },
    VersionInfo {
        name: "R11x99",
        version_indicator: 14,
        width: 99,
        height: 11,
        remainder_bits: 7,
        codewords_total: 89,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 6, kanji: 6 },
        data_bits_m: 456,
        data_bits_h: 232,
        blocks_m: &[BlockGroup { num: 1, c: 44, k: 28 }, BlockGroup { num: 1, c: 45, k: 29 }],
        blocks_h: &[BlockGroup { num: 1, c: 44, k: 14 }, BlockGroup { num: 1, c: 45, k: 15 }],
    },
    VersionInfo {
        name: "R11x139",
        version_indicator: 15,
        width: 139,
        height: 11,
        remainder_bits: 6,
        codewords_total: 132,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 7, kanji: 6 },
        data_bits_m: 672,
        data_bits_h: 336,
        blocks_m: &[BlockGroup { num: 2, c: 66, k: 42 }],
        blocks_h: &[BlockGroup { num: 3, c: 44, k: 14 }],
    },
    VersionInfo {
        name: "R13x27",
        version_indicator: 16,
        width: 27,
        height: 13,
        remainder_bits: 4,
        codewords_total: 21,
        cci_widths: ModeTable { numeric: 5, alphanumeric: 5, byte: 4, kanji: 3 },
        data_bits_m: 96,
        data_bits_h: 56,
        blocks_m: &[BlockGroup { num: 1, c: 21, k: 12 }],
        blocks_h: &[BlockGroup { num: 1, c: 21, k: 7 }],
    },
    VersionInfo {
        name: "R13x43",
        version_indicator: 17,
        width: 43,
        height: 13,
        remainder_bits: 1,
        codewords_total: 41,
        cci_widths: ModeTable { numeric: 6, alphanumeric: 6, byte: 5, kanji: 5 },
        data_bits_m: 216,
        data_bits_h: 104,
        blocks_m: &[BlockGroup { num: 1, c: 41, k: 27 }],
        blocks_h: &[BlockGroup { num: 1, c: 41, k: 13 }],
    },
    VersionInfo {
        name: "R13x59",
        version_indicator: 18,
        width: 59,
        height: 13,
        remainder_bits: 6,
        codewords_total: 60,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 304,
        data_bits_h: 160,
        blocks_m: &[BlockGroup { num: 1, c: 60, k: 38 }],
        blocks_h: &[BlockGroup { num: 2, c: 30, k: 10 }],
    },
    VersionInfo {
        name: "R13x77",
        version_indicator: 19,
        width: 77,
        height: 13,
        remainder_bits: 4,
        codewords_total: 85,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 7, byte: 6, kanji: 6 },
        data_bits_m: 424,
        data_bits_h: 232,
        blocks_m: &[BlockGroup { num: 1, c: 42, k: 26 }, BlockGroup { num: 1, c: 43, k: 27 }],
        blocks_h: &[BlockGroup { num: 1, c: 42, k: 14 }, BlockGroup { num: 1, c: 43, k: 15 }],
    },
    VersionInfo {
        name: "R13x99",
        version_indicator: 20,
        width: 99,
        height: 13,
        remainder_bits: 3,
        codewords_total: 113,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 7, kanji: 6 },
        data_bits_m: 584,
        data_bits_h: 280,
        blocks_m: &[BlockGroup { num: 1, c: 56, k: 36 }, BlockGroup { num: 1, c: 57, k: 37 }],
        blocks_h: &[BlockGroup { num: 1, c: 37, k: 11 }, BlockGroup { num: 2, c: 38, k: 12 }],
    },
    VersionInfo {
        name: "R13x139",
        version_indicator: 21,
        width: 139,
        height: 13,
        remainder_bits: 0,
        codewords_total: 166,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 8, byte: 7, kanji: 7 },
        data_bits_m: 848,
        data_bits_h: 432,
        blocks_m: &[BlockGroup { num: 2, c: 55, k: 35 }, BlockGroup { num: 1, c: 56, k: 36 }],
        blocks_h: &[BlockGroup { num: 2, c: 41, k: 13 }, BlockGroup { num: 2, c: 42, k: 14 }],
    },
    VersionInfo {
        name: "R15x43",
        version_indicator: 22,
        width: 43,
        height: 15,
        remainder_bits: 1,
        codewords_total: 51,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 264,
        data_bits_h: 120,
        blocks_m: &[BlockGroup { num: 1, c: 51, k: 33 }],
        blocks_h: &[BlockGroup { num: 1, c: 25, k: 7 }, BlockGroup { num: 1, c: 26, k: 8 }],
    },
    VersionInfo {
        name: "R15x59",
        version_indicator: 23,
        width: 59,
        height: 15,
        remainder_bits: 4,
        codewords_total: 74,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 7, byte: 6, kanji: 5 },
        data_bits_m: 384,
        data_bits_h: 208,
        blocks_m: &[BlockGroup { num: 1, c: 74, k: 48 }],
        blocks_h: &[BlockGroup { num: 2, c: 37, k: 13 }],
    },
    VersionInfo {
        name: "R15x77",
        version_indicator: 24,
        width: 77,
        height: 15,
        remainder_bits: 6,
        codewords_total: 103,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 7, kanji: 6 },
        data_bits_m: 536,
        data_bits_h: 248,
        blocks_m: &[BlockGroup { num: 1, c: 51, k: 33 }, BlockGroup { num: 1, c: 52, k: 34 }],
        blocks_h: &[BlockGroup { num: 2, c: 34, k: 10 }, BlockGroup { num: 1, c: 35, k: 11 }],
    },
    VersionInfo {
        name: "R15x99",
        version_indicator: 25,
        width: 99,
        height: 15,
        remainder_bits: 7,
        codewords_total: 136,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 7, kanji: 6 },
        data_bits_m: 704,
        data_bits_h: 384,
        blocks_m: &[BlockGroup { num: 2, c: 68, k: 44 }],
        blocks_h: &[BlockGroup { num: 4, c: 34, k: 12 }],
    },
    VersionInfo {
        name: "R15x139",
        version_indicator: 26,
        width: 139,
        height: 15,
        remainder_bits: 2,
        codewords_total: 199,
        cci_widths: ModeTable { numeric: 9, alphanumeric: 8, byte: 7, kanji: 7 },
        data_bits_m: 1016,
        data_bits_h: 552,
        blocks_m: &[BlockGroup { num: 2, c: 66, k: 42 }, BlockGroup { num: 1, c: 67, k: 43 }],
        blocks_h: &[BlockGroup { num: 1, c: 39, k: 13 }, BlockGroup { num: 4, c: 40, k: 14 }],
    },
    VersionInfo {
        name: "R17x43",
        version_indicator: 27,
        width: 43,
        height: 17,
        remainder_bits: 1,
        codewords_total: 61,
        cci_widths: ModeTable { numeric: 7, alphanumeric: 6, byte: 6, kanji: 5 },
        data_bits_m: 312,
        data_bits_h: 168,
        blocks_m: &[BlockGroup { num: 1, c: 61, k: 39 }],
        blocks_h: &[BlockGroup { num: 1, c: 30, k: 10 }, BlockGroup { num: 1, c: 31, k: 11 }],
    },
    VersionInfo {
        name: "R17x59",
        version_indicator: 28,
        width: 59,
        height: 17,
        remainder_bits: 2,
        codewords_total: 88,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 6, kanji: 6 },
        data_bits_m: 448,
        data_bits_h: 224,
        blocks_m: &[BlockGroup { num: 2, c: 44, k: 28 }],
        blocks_h: &[BlockGroup { num: 2, c: 44, k: 14 }],
    },
    VersionInfo {
        name: "R17x77",
        version_indicator: 29,
        width: 77,
        height: 17,
        remainder_bits: 0,
        codewords_total: 122,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 7, byte: 7, kanji: 6 },
        data_bits_m: 624,
        data_bits_h: 304,
        blocks_m: &[BlockGroup { num: 2, c: 61, k: 39 }],
        blocks_h: &[BlockGroup { num: 1, c: 40, k: 12 }, BlockGroup { num: 2, c: 41, k: 13 }],
    },
    VersionInfo {
        name: "R17x99",
        version_indicator: 30,
        width: 99,
        height: 17,
        remainder_bits: 3,
        codewords_total: 160,
        cci_widths: ModeTable { numeric: 8, alphanumeric: 8, byte: 7, kanji: 6 },
        data_bits_m: 800,
        data_bits_h: 448,
        blocks_m: &[BlockGroup { num: 2, c: 53, k: 33 }, BlockGroup { num: 1, c: 54, k: 34 }],
        blocks_h: &[BlockGroup { num: 4, c: 40, k: 14 }],
    },
    VersionInfo {
        name: "R17x139",
        version_indicator: 31,
        width: 139,
        height: 17,
        remainder_bits: 4,
        codewords_total: 232,
        cci_widths: ModeTable { numeric: 9, alphanumeric: 8, byte: 8, kanji: 7 },
        data_bits_m: 1216,
        data_bits_h: 608,
        blocks_m: &[BlockGroup { num: 4, c: 58, k: 38 }],
        blocks_h: &[BlockGroup { num: 2, c: 38, k: 12 }, BlockGroup { num: 4, c: 39, k: 13 }],
    },
];

/// Alignment pattern center columns for a given symbol width, shared by
/// every height that uses that width (the standard keys this table by
/// width alone, matching `rmqrcode.py::_put_alignment_pattern`'s
/// `AlignmentPatternCoordinates[self._width]` lookup). See `DESIGN.md`
/// for how these column positions were reconstructed.
pub fn alignment_centers(width: u16) -> &'static [u16] {
    match width {
        27 => &[],
        43 => &[21],
        59 => &[23, 35],
        77 => &[29, 47],
        99 => &[30, 49, 68],
        139 => &[34, 57, 81, 104],
        _ => &[],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_32_versions_present_with_distinct_indicators() {
        assert_eq!(VERSIONS.len(), 32);
        let mut indicators: Vec<u8> = VERSIONS.iter().map(|v| v.version_indicator).collect();
        indicators.sort_unstable();
        assert_eq!(indicators, (0u8..32).collect::<Vec<_>>());
    }

    #[test]
    fn block_plans_are_internally_consistent() {
        for v in VERSIONS {
            for &ecc in &[EccLevel::M, EccLevel::H] {
                let blocks = v.blocks(ecc);
                let total_c: u32 = blocks.iter().map(|b| b.num as u32 * b.c as u32).sum();
                assert_eq!(total_c, v.codewords_total as u32, "{} {:?}: sum(c) != codewords_total", v.name, ecc);
                let total_k: u32 = blocks.iter().map(|b| b.num as u32 * b.k as u32).sum();
                assert_eq!(total_k * 8, v.data_bit_capacity(ecc), "{} {:?}: sum(k)*8 != data_bit_capacity", v.name, ecc);
                let ks: Vec<u8> = blocks.iter().map(|b| b.k).collect();
                let mut sorted_ks = ks.clone();
                sorted_ks.sort_unstable();
                assert_eq!(ks, sorted_ks, "{} {:?}: block groups not ordered by ascending k", v.name, ecc);
            }
        }
    }

    #[test]
    fn by_name_finds_known_version() {
        let v = VersionInfo::by_name("R13x99").unwrap();
        assert_eq!(v.width, 99);
        assert_eq!(v.height, 13);
    }

    #[test]
    fn by_name_rejects_unknown_version() {
        assert!(VersionInfo::by_name("not exists").is_err());
    }

    #[test]
    fn alignment_column_counts_match_the_published_layout_shape() {
        assert_eq!(alignment_centers(27).len(), 0);
        assert_eq!(alignment_centers(43).len(), 1);
        assert_eq!(alignment_centers(59).len(), 2);
        assert_eq!(alignment_centers(77).len(), 2);
        assert_eq!(alignment_centers(99).len(), 3);
        assert_eq!(alignment_centers(139).len(), 4);
    }
}

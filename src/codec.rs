//! Codec pipeline: segment concatenation, padding, block splitting,
//! Reed-Solomon, and interleaving (spec §4.5). Ported from `rmqrcode`'s
//! `rmqrcode.py::_convert_to_bites_data` / `_put_data` /
//! `_split_into_blocks`, generalized to the multi-segment, multi-mode
//! case `segments.py` drives.

use log::trace;

use crate::bitbuffer::BitBuffer;
use crate::error::{Result, RmqrError};
use crate::gf::galois_field;
use crate::segment::Segment;
use crate::version::{EccLevel, VersionInfo};

/// One data block plus its computed ECC codewords.
#[derive(Clone, Debug)]
pub struct Block {
    pub data: Vec<u8>,
    pub ecc: Vec<u8>,
}

/// Encodes `segments`, pads, splits into blocks, computes ECC and
/// interleaves, returning the final codeword stream ready for placement
/// (spec §4.5 steps 1-7).
pub fn encode_codewords(segments: &[Segment], version: &VersionInfo, ecc: EccLevel) -> Result<Vec<u8>> {
    let mut bits = BitBuffer::new();
    for seg in segments {
        let cci_width = version.cci_widths.width_for(seg.mode);
        bits.extend(&seg.mode.encode(&seg.data, cci_width)?);
    }

    let data_bit_capacity = version.data_bit_capacity(ecc) as usize;
    if bits.len() + 3 <= data_bit_capacity {
        bits.append_bits(0, 3);
    }
    if bits.len() > data_bit_capacity {
        return Err(RmqrError::DataTooLong);
    }

    let mut codewords = bits.to_codewords();

    let codewords_total = version.codewords_total as usize;
    const PAD_A: u8 = 0b1110_1100;
    const PAD_B: u8 = 0b0001_0001;
    let mut toggle = false;
    while codewords.len() < codewords_total {
        codewords.push(if toggle { PAD_B } else { PAD_A });
        toggle = !toggle;
    }

    let blocks = split_into_blocks(&codewords, version, ecc);
    trace!("split into {} block(s) for {:?}", blocks.len(), ecc);
    Ok(interleave(&blocks))
}

/// Walks the block plan left-to-right, carving `k` data codewords per
/// block and computing `c - k` ECC codewords via Reed-Solomon (spec
/// §4.5 step 6).
fn split_into_blocks(codewords: &[u8], version: &VersionInfo, ecc: EccLevel) -> Vec<Block> {
    let gf = galois_field();
    let mut blocks = Vec::new();
    let mut idx = 0usize;
    for group in version.blocks(ecc) {
        for _ in 0..group.num {
            let k = group.k as usize;
            let n = (group.c - group.k) as usize;
            let data = codewords[idx..idx + k].to_vec();
            let ecc_codewords = gf.compute_ecc(&data, n);
            blocks.push(Block { data, ecc: ecc_codewords });
            idx += k;
        }
    }
    blocks
}

/// Interleaves data codewords column-by-column across blocks, then ECC
/// codewords the same way (spec §4.5 step 7).
fn interleave(blocks: &[Block]) -> Vec<u8> {
    let mut out = Vec::new();
    let max_data = blocks.iter().map(|b| b.data.len()).max().unwrap_or(0);
    for i in 0..max_data {
        for b in blocks {
            if let Some(&cw) = b.data.get(i) {
                out.push(cw);
            }
        }
    }
    let max_ecc = blocks.iter().map(|b| b.ecc.len()).max().unwrap_or(0);
    for i in 0..max_ecc {
        for b in blocks {
            if let Some(&cw) = b.ecc.get(i) {
                out.push(cw);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    #[test]
    fn codeword_count_matches_version_total() {
        let version = VersionInfo::by_name("R13x99").unwrap();
        let segs = [Segment::new(Mode::Byte, "abc")];
        let codewords = encode_codewords(&segs, version, EccLevel::M).unwrap();
        assert_eq!(codewords.len(), version.codewords_total as usize);
    }

    #[test]
    fn data_too_long_rejected() {
        let version = VersionInfo::by_name("R7x43").unwrap();
        let segs = [Segment::new(Mode::Byte, "this payload is far too long for R7x43")];
        assert!(matches!(encode_codewords(&segs, version, EccLevel::M), Err(RmqrError::DataTooLong)));
    }

    #[test]
    fn ecc_is_deterministic_across_encodes() {
        let version = VersionInfo::by_name("R13x99").unwrap();
        let segs = [Segment::new(Mode::Byte, "hello world")];
        let a = encode_codewords(&segs, version, EccLevel::M).unwrap();
        let b = encode_codewords(&segs, version, EccLevel::M).unwrap();
        assert_eq!(a, b);
    }
}

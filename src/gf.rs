//! GF(2^8) arithmetic and Reed-Solomon error-correction codeword generation.
//!
//! Built from the primitive polynomial x^8 + x^4 + x^3 + x^2 + 1 (0x11D),
//! same construction as `rmqrcode`'s `galois_fields.py`.

use std::sync::OnceLock;

const PRIMITIVE_POLY: u16 = 0x11D;

/// Exponent/logarithm tables for GF(2^8): `exp[e] == alpha^e` for e in
/// [0,254] (and mirrored once more to avoid a modulo on lookup), `log[v]`
/// is the exponent such that `alpha^log[v] == v` for v in [1,255].
/// `log[0]` is unused (no discrete log of zero).
pub struct GaloisField {
    exp: [u8; 512],
    log: [u8; 256],
}

impl GaloisField {
    fn build() -> Self {
        let mut exp = [0u8; 512];
        let mut log = [0u8; 256];
        let mut value: u16 = 1;
        for e in 0..255usize {
            exp[e] = value as u8;
            log[value as usize] = e as u8;
            value <<= 1;
            if value & 0x100 != 0 {
                value ^= PRIMITIVE_POLY;
            }
        }
        for e in 255..512 {
            exp[e] = exp[e - 255];
        }
        GaloisField { exp, log }
    }

    /// `alpha^e`, exponent taken mod 255.
    pub fn exp(&self, e: i32) -> u8 {
        let e = e.rem_euclid(255) as usize;
        self.exp[e]
    }

    /// Discrete logarithm of a nonzero field element.
    pub fn log(&self, v: u8) -> u8 {
        debug_assert!(v != 0, "log of zero is undefined");
        self.log[v as usize]
    }

    pub fn multiply(&self, a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            0
        } else {
            self.exp(self.log(a) as i32 + self.log(b) as i32)
        }
    }

    /// The generator polynomial for a Reed-Solomon code correcting `degree`
    /// codewords, as a list of `degree + 1` exponents `g[0..=degree]`
    /// (coefficients of `(x - a^0)(x - a^1)...(x - a^{degree-1})`, each
    /// expressed as the exponent of its field element so that
    /// `compute_ecc` can add it directly to a running exponent).
    fn generator_polynomial(&self, degree: usize) -> Vec<u8> {
        // Coefficients start as [1], then each factor (x + a^i) multiplies in.
        let mut coeffs: Vec<u8> = vec![1];
        for i in 0..degree {
            let root = self.exp(i as i32);
            let mut next = vec![0u8; coeffs.len() + 1];
            for (j, &c) in coeffs.iter().enumerate() {
                next[j] ^= self.multiply(c, root);
                next[j + 1] ^= c;
            }
            coeffs = next;
        }
        // coeffs is built constant-term-first (index 0 is the constant
        // term, the always-1 leading coefficient ends up last); reverse so
        // g_exp[0] is the log of the leading coefficient (always 0, since
        // the leading coefficient is always 1), matching compute_ecc's
        // indexing where the j=0 XOR must exactly cancel f[i].
        coeffs.iter().rev().map(|&c| self.log(c)).collect()
    }

    /// Reed-Solomon remainder: `data` (k codewords) times `x^degree`, taken
    /// modulo the generator polynomial of the given degree. Returns
    /// `degree` ECC codewords. Pure function of its inputs.
    pub fn compute_ecc(&self, data: &[u8], degree: usize) -> Vec<u8> {
        let g_exp = generator_exponents(degree);
        let mut f = data.to_vec();
        f.resize(data.len() + degree, 0);
        for i in 0..data.len() {
            if f[i] == 0 {
                continue;
            }
            let m = self.log(f[i]) as i32;
            for (j, &gj) in g_exp.iter().enumerate() {
                f[i + j] ^= self.exp(gj as i32 + m);
            }
        }
        f[data.len()..].to_vec()
    }
}

static GF: OnceLock<GaloisField> = OnceLock::new();

pub fn galois_field() -> &'static GaloisField {
    GF.get_or_init(GaloisField::build)
}

/// Generator polynomial exponents for a given ECC degree, cached per
/// degree behind a lazily-built table (every degree rMQR ever needs is
/// covered: 7,8,9,10,11,12,13,14,15,16,17,18,19,20,21,22,24,28,30).
fn generator_exponents(degree: usize) -> Vec<u8> {
    static CACHE: OnceLock<std::sync::Mutex<std::collections::HashMap<usize, Vec<u8>>>> = OnceLock::new();
    let cache = CACHE.get_or_init(|| std::sync::Mutex::new(std::collections::HashMap::new()));
    let mut guard = cache.lock().unwrap();
    if let Some(v) = guard.get(&degree) {
        return v.clone();
    }
    let gf = galois_field();
    let g = gf.generator_polynomial(degree);
    guard.insert(degree, g.clone());
    g
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exp_log_round_trip() {
        let gf = galois_field();
        for v in 1u32..=255 {
            let v = v as u8;
            assert_eq!(gf.exp(gf.log(v) as i32), v);
        }
        for e in 0..255 {
            assert_eq!(gf.log(gf.exp(e)), (e.rem_euclid(255)) as u8);
        }
    }

    #[test]
    fn generator_degree_7_matches_known_table() {
        // Standard QR/rMQR RS generator polynomial for degree 7, expressed
        // as exponents: 0,87,229,146,149,238,102,21
        let expected = [0u8, 87, 229, 146, 149, 238, 102, 21];
        let got = generator_exponents(7);
        assert_eq!(got.len(), 8);
        assert_eq!(got.as_slice(), &expected);
    }

    #[test]
    fn ecc_is_deterministic() {
        let gf = galois_field();
        let data = [32u8, 91, 11, 120, 209];
        let a = gf.compute_ecc(&data, 7);
        let b = gf.compute_ecc(&data, 7);
        assert_eq!(a, b);
        assert_eq!(a.len(), 7);
    }
}

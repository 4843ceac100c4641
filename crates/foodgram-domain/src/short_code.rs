//! Reversible short codes for recipe ids.
//!
//! A code is [`CODE_LEN`] characters drawn from a base-62 alphabet that is
//! shuffled with the salt. Before encoding, the id is passed through a
//! salt-keyed bijection on `u32` so consecutive ids do not yield consecutive
//! codes. Decoding inverts both steps, so two distinct ids can never share a
//! code.

const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

const BASE: u64 = 62;

/// Length of every generated code.
pub const CODE_LEN: usize = 6;

/// 62^6 fits 13 full `u32` ranges; the spare range index is derived from the
/// value itself and checked on decode.
const SPREAD: u64 = 13;

const MULTIPLIER: u32 = 0x9E37_79B1;

/// Salted encoder/decoder for recipe short codes.
#[derive(Debug, Clone)]
pub struct ShortCodeCodec {
    alphabet: [u8; 62],
    key_in: u32,
    key_out: u32,
    inverse: u32,
}

impl ShortCodeCodec {
    pub fn new(salt: &str) -> Self {
        let mut alphabet = *ALPHABET;
        shuffle(&mut alphabet, salt.as_bytes());
        let hash = fnv1a(salt.as_bytes());
        Self {
            alphabet,
            key_in: hash as u32,
            key_out: (hash >> 32) as u32,
            inverse: mod_inverse(MULTIPLIER),
        }
    }

    pub fn encode(&self, id: i32) -> String {
        let scrambled = (id as u32 ^ self.key_in).wrapping_mul(MULTIPLIER) ^ self.key_out;
        let mut n = u64::from(scrambled) + ((u64::from(scrambled) % SPREAD) << 32);

        let mut buf = [0u8; CODE_LEN];
        for slot in buf.iter_mut().rev() {
            *slot = self.alphabet[(n % BASE) as usize];
            n /= BASE;
        }
        buf.iter().map(|&b| b as char).collect()
    }

    /// Returns `None` for anything this codec could not have produced.
    pub fn decode(&self, code: &str) -> Option<i32> {
        if code.len() != CODE_LEN {
            return None;
        }
        let mut n: u64 = 0;
        for byte in code.bytes() {
            let digit = self.alphabet.iter().position(|&c| c == byte)?;
            n = n * BASE + digit as u64;
        }

        let scrambled = (n & u64::from(u32::MAX)) as u32;
        if n >> 32 != u64::from(scrambled) % SPREAD {
            return None;
        }
        let id = (scrambled ^ self.key_out).wrapping_mul(self.inverse) ^ self.key_in;
        Some(id as i32)
    }
}

/// Salt-driven deterministic permutation of the alphabet.
fn shuffle(alphabet: &mut [u8], salt: &[u8]) {
    if salt.is_empty() {
        return;
    }
    let mut v = 0usize;
    let mut p = 0usize;
    for i in (1..alphabet.len()).rev() {
        v %= salt.len();
        let n = salt[v] as usize;
        p += n;
        let j = (n + v + p) % i;
        alphabet.swap(i, j);
        v += 1;
    }
}

fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, &b| {
        (hash ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

/// Multiplicative inverse of an odd number modulo 2^32 (Newton iteration).
fn mod_inverse(m: u32) -> u32 {
    let mut inv = m;
    for _ in 0..5 {
        inv = inv.wrapping_mul(2u32.wrapping_sub(m.wrapping_mul(inv)));
    }
    inv
}

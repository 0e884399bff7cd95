//! Seedable random number generation.
//!
//! RULE: Every draw the engine makes flows through a SeededRandom.
//! Two generators built from the same seed (other than NATIVE_SEED)
//! produce identical sequences, which is what lets a run such as a
//! daily challenge be replayed name for name.
//!
//! The deterministic source is a 32-bit xorshift+ over two state words.
//! The native source delegates to the platform entropy pool and makes
//! no reproducibility promise at all.

use chrono::{Datelike, NaiveDate, Utc};
use rand::{rngs::StdRng, RngCore, SeedableRng};

/// Seed sentinel selecting the platform's non-reproducible source.
pub const NATIVE_SEED: i64 = -1;

const TWO_POW_32: f64 = 4_294_967_296.0;

enum Source {
    Native(StdRng),
    Xorshift { s0: u32, s1: u32 },
}

/// A reseedable pseudo-random source with derived distributions.
pub struct SeededRandom {
    seed:   Option<i64>,
    source: Source,
}

impl SeededRandom {
    /// Build a generator from `seed`. `NATIVE_SEED` selects the
    /// platform source; any other value is mixed into the two state words.
    pub fn new(seed: i64) -> Self {
        if seed == NATIVE_SEED {
            return Self::native();
        }
        let (s0, s1) = mix_seed(seed);
        Self {
            seed:   Some(seed),
            source: Source::Xorshift { s0, s1 },
        }
    }

    /// Non-reproducible generator backed by OS entropy.
    pub fn native() -> Self {
        Self {
            seed:   None,
            source: Source::Native(StdRng::from_entropy()),
        }
    }

    /// Deterministic generator seeded from the current wall-clock time.
    pub fn from_time() -> Self {
        Self::new(time_seed())
    }

    /// `None` derives a seed from the clock, `Some` behaves like `new`.
    pub fn from_optional(seed: Option<i64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_time(),
        }
    }

    /// The seed this generator was built from; `None` for the native source.
    pub fn seed(&self) -> Option<i64> {
        self.seed
    }

    pub fn is_deterministic(&self) -> bool {
        matches!(self.source, Source::Xorshift { .. })
    }

    /// Roll a float in [0.0, 1.0).
    pub fn next_f64(&mut self) -> f64 {
        self.next_u32() as f64 / TWO_POW_32
    }

    /// Float in [min, max).
    pub fn uniform(&mut self, min: f64, max: f64) -> f64 {
        min + self.next_f64() * (max - min)
    }

    /// Integer in [min, max], both ends inclusive.
    pub fn uniform_int(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as f64;
        (min as f64 + self.next_f64() * span).floor() as i64
    }

    /// Gaussian sample via Box–Muller.
    pub fn normal(&mut self, mean: f64, stddev: f64) -> f64 {
        let u1 = self.non_zero_draw();
        let u2 = self.non_zero_draw();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + stddev * z
    }

    pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
        value.max(min).min(max)
    }

    pub fn clamp_int(value: i64, min: i64, max: i64) -> i64 {
        value.max(min).min(max)
    }

    // ln(0) is -inf; re-draw instead.
    fn non_zero_draw(&mut self) -> f64 {
        loop {
            let u = self.next_f64();
            if u != 0.0 {
                return u;
            }
        }
    }
}

impl RngCore for SeededRandom {
    fn next_u32(&mut self) -> u32 {
        match &mut self.source {
            Source::Native(inner) => inner.next_u32(),
            Source::Xorshift { s0, s1 } => xorshift_step(s0, s1),
        }
    }

    fn next_u64(&mut self) -> u64 {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.next_u32().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Derive the two 32-bit state words from a seed.
fn mix_seed(seed: i64) -> (u32, u32) {
    let bits = seed as u64;
    let lo = bits as u32;
    let hi = (bits >> 32) as u32;

    let mut s0 = (lo ^ 0xDEAD_BEEF).wrapping_mul(0x85EB_CA6B) ^ hi;
    let mut s1 = lo.wrapping_mul(0x9E37_79B9) ^ 0x2545_F491 ^ hi.rotate_left(16);
    s0 ^= s0 >> 16;
    s1 ^= s1 >> 13;

    // An all-zero state would emit zeros forever.
    if s0 == 0 && s1 == 0 {
        s1 = 0x9E37_79B9;
    }
    (s0, s1)
}

/// Advance the state and return the wrapped sum of the two new words.
fn xorshift_step(s0: &mut u32, s1: &mut u32) -> u32 {
    let mut x = *s0;
    let y = *s1;
    *s0 = y;
    x ^= x << 17;
    x ^= x >> 7;
    x ^= y ^ (y >> 16);
    *s1 = x;
    s0.wrapping_add(*s1)
}

fn time_seed() -> i64 {
    let millis = Utc::now().timestamp_millis();
    if millis == NATIVE_SEED { 0 } else { millis }
}

/// Seed for a daily challenge: the date written as yyyymmdd.
pub fn daily_seed(date: NaiveDate) -> i64 {
    date.year() as i64 * 10_000 + date.month() as i64 * 100 + date.day() as i64
}

//! Random sources for the click engine.
//!
//! Every random decision (golden draw, particle angle/distance, sound pick)
//! goes through [`RandomSource`] so tests can script the exact sequence.

/// A source of uniform draws in `[0, 1)`.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

// ── LCG ───────────────────────────────────────────────────────

fn next_rng(seed: u64) -> u64 {
    seed.wrapping_mul(6364136223846793005)
        .wrapping_add(1442695040888963407)
}

/// Seeded 64-bit LCG. Deterministic for a given seed.
#[derive(Clone, Debug)]
pub struct Lcg {
    seed: u64,
}

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from the page's `Math.random()` and clock. Fixed seed off-wasm.
    pub fn from_clock() -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let entropy = (js_sys::Math::random() * (1u64 << 53) as f64) as u64;
            Self::new(entropy ^ js_sys::Date::now().to_bits())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            Self::new(42)
        }
    }
}

impl RandomSource for Lcg {
    fn next_unit(&mut self) -> f64 {
        self.seed = next_rng(self.seed);
        // Top 53 bits → exact f64 mantissa, so the result never reaches 1.0.
        (self.seed >> 11) as f64 / (1u64 << 53) as f64
    }
}

// ── Scripted (tests) ──────────────────────────────────────────

/// Replays a fixed sequence of draws, then repeats the last one.
#[cfg(test)]
pub struct Scripted {
    draws: Vec<f64>,
    pos: usize,
}

#[cfg(test)]
impl Scripted {
    pub fn new(draws: &[f64]) -> Self {
        assert!(!draws.is_empty(), "scripted source needs at least one draw");
        Self {
            draws: draws.to_vec(),
            pos: 0,
        }
    }

    /// Number of draws consumed so far.
    pub fn consumed(&self) -> usize {
        self.pos
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn next_unit(&mut self) -> f64 {
        let v = self.draws[self.pos.min(self.draws.len() - 1)];
        self.pos += 1;
        v
    }
}

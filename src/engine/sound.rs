//! Sound selection for clicks.

use super::rng::RandomSource;

/// Sounds the widget can play. Paths live in [`crate::config`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundId {
    /// Normal click sound, by index into the configured click sounds.
    Click(usize),
    Golden,
}

/// How a non-golden click picks its sound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum NormalSoundPolicy {
    /// Always the first click sound.
    #[default]
    Fixed,
    /// Uniform pick among `n` click sounds.
    RandomPick(usize),
}

impl NormalSoundPolicy {
    /// Pick the sound for a click. Only `RandomPick` with `n > 1` draws.
    pub fn select(&self, golden: bool, rng: &mut impl RandomSource) -> SoundId {
        if golden {
            return SoundId::Golden;
        }
        match *self {
            NormalSoundPolicy::Fixed => SoundId::Click(0),
            NormalSoundPolicy::RandomPick(n) if n > 1 => {
                let idx = (rng.next_unit() * n as f64) as usize;
                SoundId::Click(idx.min(n - 1))
            }
            NormalSoundPolicy::RandomPick(_) => SoundId::Click(0),
        }
    }
}

//! Particle explosions produced by each click.

use std::f64::consts::TAU;

use super::rng::RandomSource;

/// Particles in a normal explosion.
pub const NORMAL_COUNT: usize = 5;
/// Particles in a golden explosion.
pub const GOLDEN_COUNT: usize = 9;
/// Renderer keeps a normal batch for this long.
pub const NORMAL_LIFETIME_MS: u32 = 1000;
/// Renderer keeps a golden batch for this long.
pub const GOLDEN_LIFETIME_MS: u32 = 1500;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParticleKind {
    Normal,
    Golden,
}

impl ParticleKind {
    pub fn count(&self) -> usize {
        match self {
            ParticleKind::Normal => NORMAL_COUNT,
            ParticleKind::Golden => GOLDEN_COUNT,
        }
    }

    /// Half-open `[min, max)` travel distance.
    pub fn distance_range(&self) -> (f64, f64) {
        match self {
            ParticleKind::Normal => (200.0, 400.0),
            ParticleKind::Golden => (250.0, 500.0),
        }
    }

    pub fn lifetime_ms(&self) -> u32 {
        match self {
            ParticleKind::Normal => NORMAL_LIFETIME_MS,
            ParticleKind::Golden => GOLDEN_LIFETIME_MS,
        }
    }

    /// Glyph the renderer draws for this kind.
    pub fn glyph(&self) -> &'static str {
        match self {
            ParticleKind::Normal => "🦎",
            ParticleKind::Golden => "✨",
        }
    }
}

/// Identifies a particle: the click that spawned it and its slot in the batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParticleId {
    pub click: u64,
    pub index: u8,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub id: ParticleId,
    pub kind: ParticleKind,
    /// Radians in `[0, 2π)`.
    pub angle: f64,
    pub distance: f64,
}

/// An immutable explosion. Every particle shares the batch kind.
#[derive(Clone, Debug, PartialEq)]
pub struct ParticleBatch {
    kind: ParticleKind,
    particles: Vec<Particle>,
}

impl ParticleBatch {
    /// Draw a batch for click number `click`.
    ///
    /// Consumes two draws per particle: angle, then distance.
    pub fn generate(kind: ParticleKind, click: u64, rng: &mut impl RandomSource) -> Self {
        let (min, max) = kind.distance_range();
        let particles = (0..kind.count())
            .map(|i| {
                let angle = scale_half_open(rng.next_unit(), 0.0, TAU);
                let distance = scale_half_open(rng.next_unit(), min, max);
                Particle {
                    id: ParticleId {
                        click,
                        index: i as u8,
                    },
                    kind,
                    angle,
                    distance,
                }
            })
            .collect();
        Self { kind, particles }
    }

    pub fn kind(&self) -> ParticleKind {
        self.kind
    }

    pub fn is_golden(&self) -> bool {
        self.kind == ParticleKind::Golden
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn lifetime_ms(&self) -> u32 {
        self.kind.lifetime_ms()
    }
}

/// Map a unit draw onto `[min, max)` for a positive `max`. Draws just under
/// 1.0 can round up to `max`; those land on the largest value below it.
fn scale_half_open(unit: f64, min: f64, max: f64) -> f64 {
    let v = min + unit * (max - min);
    if v < max {
        v
    } else {
        f64::from_bits(max.to_bits() - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::rng::{Lcg, Scripted};

    #[test]
    fn normal_batch_shape() {
        let mut rng = Lcg::new(1);
        let batch = ParticleBatch::generate(ParticleKind::Normal, 3, &mut rng);
        assert_eq!(batch.len(), 5);
        assert!(!batch.is_golden());
        assert_eq!(batch.lifetime_ms(), 1000);
        for p in batch.particles() {
            assert_eq!(p.kind, ParticleKind::Normal);
            assert!((200.0..400.0).contains(&p.distance), "distance {}", p.distance);
            assert!((0.0..TAU).contains(&p.angle), "angle {}", p.angle);
        }
    }

    #[test]
    fn golden_batch_shape() {
        let mut rng = Lcg::new(2);
        let batch = ParticleBatch::generate(ParticleKind::Golden, 3, &mut rng);
        assert_eq!(batch.len(), 9);
        assert!(batch.is_golden());
        assert_eq!(batch.lifetime_ms(), 1500);
        for p in batch.particles() {
            assert_eq!(p.kind, ParticleKind::Golden);
            assert!((250.0..500.0).contains(&p.distance), "distance {}", p.distance);
        }
    }

    #[test]
    fn scripted_draws_map_to_range_edges() {
        // angle 0.0, distance 0.0 → min; angle 0.5, distance 0.5 → midpoint
        let mut rng = Scripted::new(&[0.0, 0.0, 0.5, 0.5]);
        let batch = ParticleBatch::generate(ParticleKind::Normal, 1, &mut rng);
        let ps = batch.particles();
        assert!((ps[0].angle - 0.0).abs() < 1e-12);
        assert!((ps[0].distance - 200.0).abs() < 1e-9);
        assert!((ps[1].angle - TAU / 2.0).abs() < 1e-9);
        assert!((ps[1].distance - 300.0).abs() < 1e-9);
        assert_eq!(rng.consumed(), 10);
    }

    #[test]
    fn largest_draw_stays_below_upper_bounds() {
        let top = 1.0 - f64::EPSILON / 2.0;
        for kind in [ParticleKind::Normal, ParticleKind::Golden] {
            let (min, max) = kind.distance_range();
            let batch = ParticleBatch::generate(kind, 1, &mut Scripted::new(&[top]));
            for p in batch.particles() {
                assert!(p.distance >= min && p.distance < max, "distance {}", p.distance);
                assert!(p.angle < TAU, "angle {}", p.angle);
            }
        }
    }

    #[test]
    fn scale_half_open_keeps_interior_values() {
        assert_eq!(scale_half_open(0.0, 200.0, 400.0), 200.0);
        assert_eq!(scale_half_open(0.25, 200.0, 400.0), 250.0);
        assert!(scale_half_open(1.0, 200.0, 400.0) < 400.0);
    }

    #[test]
    fn ids_unique_within_batch() {
        let mut rng = Lcg::new(3);
        let batch = ParticleBatch::generate(ParticleKind::Golden, 77, &mut rng);
        let mut ids: Vec<ParticleId> = batch.particles().iter().map(|p| p.id).collect();
        ids.dedup();
        assert_eq!(ids.len(), 9);
        assert!(batch.particles().iter().all(|p| p.id.click == 77));
    }
}

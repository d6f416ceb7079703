//! Click engine logic: pure functions, fully testable.
//!
//! Draw order per click: golden roll, then two draws per particle
//! (angle, distance), then the sound pick if the policy needs one.

use super::particle::{ParticleBatch, ParticleKind};
use super::rng::RandomSource;
use super::sound::{NormalSoundPolicy, SoundId};
use super::state::ClickState;

/// Probability that a click is golden.
pub const GOLDEN_CHANCE: f64 = 0.01;

/// Everything one click produces.
#[derive(Clone, Debug, PartialEq)]
pub struct ClickOutcome {
    pub state: ClickState,
    pub batch: ParticleBatch,
    pub sound: SoundId,
    /// The milestone message differs from the previous state's.
    pub milestone_changed: bool,
}

impl ClickOutcome {
    pub fn is_golden(&self) -> bool {
        self.batch.is_golden()
    }
}

/// One independent golden roll.
pub fn roll_golden(rng: &mut impl RandomSource) -> bool {
    rng.next_unit() < GOLDEN_CHANCE
}

/// Advance `current` by one click.
pub fn register_click(
    current: &ClickState,
    policy: &NormalSoundPolicy,
    rng: &mut impl RandomSource,
) -> ClickOutcome {
    let next = current.with_local_clicks(current.local_clicks().saturating_add(1));
    let golden = roll_golden(rng);
    let kind = if golden {
        ParticleKind::Golden
    } else {
        ParticleKind::Normal
    };
    let batch = ParticleBatch::generate(kind, next.local_clicks(), rng);
    let sound = policy.select(golden, rng);

    ClickOutcome {
        milestone_changed: next.milestone_message() != current.milestone_message(),
        state: next,
        batch,
        sound,
    }
}

/// Merge a count returned by the remote counter.
pub fn apply_global_count(current: &ClickState, global_clicks: u64) -> ClickState {
    current.with_global_clicks(global_clicks)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::engine::rng::Lcg;
    use crate::engine::state::Milestone;
    use proptest::prelude::*;

    fn arb_policy() -> impl Strategy<Value = NormalSoundPolicy> {
        prop_oneof![
            Just(NormalSoundPolicy::Fixed),
            (1usize..6).prop_map(NormalSoundPolicy::RandomPick),
        ]
    }

    proptest! {
        #[test]
        fn prop_n_clicks_from_zero(n in 0u64..400, seed in any::<u64>()) {
            let mut state = ClickState::new(0);
            let mut rng = Lcg::new(seed);
            for _ in 0..n {
                state = register_click(&state, &NormalSoundPolicy::Fixed, &mut rng).state;
            }
            prop_assert_eq!(state.local_clicks(), n);
        }

        #[test]
        fn prop_milestone_is_table_lookup(
            start in 0u64..2000,
            global in proptest::option::of(any::<u64>()),
            seed in any::<u64>(),
        ) {
            let mut state = ClickState::new(start);
            if let Some(g) = global {
                state = apply_global_count(&state, g);
            }
            let out = register_click(&state, &NormalSoundPolicy::Fixed, &mut Lcg::new(seed));
            prop_assert_eq!(out.state.milestone(), Milestone::for_clicks(start + 1));
        }

        #[test]
        fn prop_changed_iff_message_differs(start in 0u64..2000, seed in any::<u64>()) {
            let state = ClickState::new(start);
            let out = register_click(&state, &NormalSoundPolicy::Fixed, &mut Lcg::new(seed));
            let crossed = Milestone::all()
                .iter()
                .any(|m| m.threshold() == start + 1 && *m != Milestone::None);
            prop_assert_eq!(out.milestone_changed, crossed);
        }

        #[test]
        fn prop_batch_size_matches_kind(
            start in 0u64..5000,
            seed in any::<u64>(),
            policy in arb_policy(),
        ) {
            let out = register_click(&ClickState::new(start), &policy, &mut Lcg::new(seed));
            let expected = if out.is_golden() { 9 } else { 5 };
            prop_assert_eq!(out.batch.len(), expected);
            prop_assert!(out.batch.particles().iter().all(|p| p.kind == out.batch.kind()));
            prop_assert_eq!(out.sound == SoundId::Golden, out.is_golden());
        }

        #[test]
        fn prop_particles_in_range(start in 0u64..5000, seed in any::<u64>()) {
            let out = register_click(&ClickState::new(start), &NormalSoundPolicy::Fixed, &mut Lcg::new(seed));
            let (min, max) = out.batch.kind().distance_range();
            for p in out.batch.particles() {
                prop_assert!(p.angle >= 0.0 && p.angle < std::f64::consts::TAU);
                prop_assert!(p.distance >= min && p.distance < max);
            }
        }

        #[test]
        fn prop_apply_global_preserves_local_fields(
            start in 0u64..5000,
            global in any::<u64>(),
        ) {
            let state = ClickState::new(start);
            let next = apply_global_count(&state, global);
            prop_assert_eq!(next.local_clicks(), state.local_clicks());
            prop_assert_eq!(next.milestone_message(), state.milestone_message());
            prop_assert_eq!(next.shake_intensity().to_bits(), state.shake_intensity().to_bits());
            prop_assert_eq!(next.global_clicks(), Some(global));
        }

        #[test]
        fn prop_shake_bounded(start in 0u64..u64::MAX / 2) {
            let s = ClickState::new(start).shake_intensity();
            prop_assert!((0.0..=20.0).contains(&s));
        }
    }
}

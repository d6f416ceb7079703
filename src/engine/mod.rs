//! Click engine: a pure reducer from clicks to state, particles and sounds.
//!
//! Rendering, storage and network live elsewhere; nothing here touches the DOM.

pub mod logic;
pub mod particle;
pub mod rng;
pub mod sound;
pub mod state;

pub use logic::{apply_global_count, register_click};
pub use particle::{Particle, ParticleBatch};
pub use rng::{Lcg, RandomSource};
pub use sound::{NormalSoundPolicy, SoundId};
pub use state::ClickState;

//! Deterministic simulation RNG resource.
//!
//! Every random draw the wildfire engines make comes from one `ChaCha8Rng`
//! stream owned by this resource, so identical seeds replay identical fires.
//! The stream position is part of snapshots, which lets a restored run
//! continue bit-for-bit.

use bevy::prelude::*;
use bitcode::{Decode, Encode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seed used when no explicit seed is provided.
pub const DEFAULT_SEED: u64 = 42;

/// Full internal state of a `ChaCha8Rng`.
#[derive(Encode, Decode)]
struct RngState {
    seed: [u8; 32],
    stream: u64,
    word_pos: u128,
}

impl RngState {
    fn capture(rng: &ChaCha8Rng) -> Self {
        Self {
            seed: rng.get_seed(),
            stream: rng.get_stream(),
            word_pos: rng.get_word_pos(),
        }
    }

    fn restore(&self) -> ChaCha8Rng {
        let mut rng = ChaCha8Rng::from_seed(self.seed);
        rng.set_stream(self.stream);
        rng.set_word_pos(self.word_pos);
        rng
    }
}

/// Deterministic RNG resource. Systems pass `&mut rng.0` into the engines.
#[derive(Resource)]
pub struct SimRng(pub ChaCha8Rng);

impl Default for SimRng {
    fn default() -> Self {
        Self::from_seed_u64(DEFAULT_SEED)
    }
}

impl SimRng {
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl crate::Saveable for SimRng {
    const SAVE_KEY: &'static str = "sim_rng";

    fn save_to_bytes(&self) -> Option<Vec<u8>> {
        Some(bitcode::encode(&RngState::capture(&self.0)))
    }

    fn load_from_bytes(bytes: &[u8]) -> Self {
        Self::try_load_from_bytes(bytes).unwrap_or_else(|| {
            warn!("SimRng: reseeding with default");
            Self::default()
        })
    }

    fn try_load_from_bytes(bytes: &[u8]) -> Option<Self> {
        crate::try_decode::<RngState>(Self::SAVE_KEY, bytes).map(|state| Self(state.restore()))
    }
}

pub struct SimRngPlugin;

impl Plugin for SimRngPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimRng>();

        app.init_resource::<crate::SaveableRegistry>();
        app.world_mut()
            .resource_mut::<crate::SaveableRegistry>()
            .register::<SimRng>();
    }
}

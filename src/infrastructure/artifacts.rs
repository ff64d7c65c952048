use crate::domain::ports::ArtifactIdGenerator;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use std::sync::Mutex;
use uuid::Uuid;

/// Thread-local randomness; what the running services use.
#[derive(Default, Clone, Copy)]
pub struct RandomArtifacts;

impl ArtifactIdGenerator for RandomArtifacts {
    fn index(&self, bound: usize) -> usize {
        rand::thread_rng().gen_range(0..bound)
    }

    fn uuid(&self) -> Uuid {
        Uuid::new_v4()
    }
}

/// Reproducible artifacts from a fixed seed.
pub struct SeededArtifacts {
    rng: Mutex<StdRng>,
}

impl SeededArtifacts {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

impl ArtifactIdGenerator for SeededArtifacts {
    fn index(&self, bound: usize) -> usize {
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        rng.gen_range(0..bound)
    }

    fn uuid(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }
}

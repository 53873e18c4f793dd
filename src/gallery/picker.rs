//! Random selection
//!
//! One `StdRng` is shared by all requests behind a mutex. It is seeded once,
//! either from the OS or from `random_seed` for reproducible selection.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use super::candidates::Candidate;

pub struct RandomPicker {
    rng: Mutex<StdRng>,
    /// Last served file name per effective directory (only when enabled)
    last_served: Option<Mutex<HashMap<PathBuf, String>>>,
}

impl RandomPicker {
    pub fn seeded(seed: u64, avoid_repeat: bool) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), avoid_repeat)
    }

    pub fn from_os_rng(avoid_repeat: bool) -> Self {
        Self::with_rng(StdRng::from_os_rng(), avoid_repeat)
    }

    fn with_rng(rng: StdRng, avoid_repeat: bool) -> Self {
        Self {
            rng: Mutex::new(rng),
            last_served: avoid_repeat.then(|| Mutex::new(HashMap::new())),
        }
    }

    /// Pick one candidate uniformly at random
    ///
    /// With repeat avoidance on, the file last served from `dir` is left out
    /// of the draw as long as another candidate exists.
    pub fn pick<'a>(&self, dir: &Path, candidates: &'a [Candidate]) -> Option<&'a Candidate> {
        if candidates.is_empty() {
            return None;
        }

        let Some(last_served) = &self.last_served else {
            return Some(&candidates[self.index(candidates.len())]);
        };

        let mut last_served = last_served.lock().unwrap_or_else(PoisonError::into_inner);
        let previous = last_served.get(dir);
        let pool: Vec<&Candidate> = candidates
            .iter()
            .filter(|c| previous != Some(&c.name))
            .collect();
        // A lone candidate is served again
        let pool = if pool.is_empty() {
            candidates.iter().collect()
        } else {
            pool
        };

        let chosen = pool[self.index(pool.len())];
        last_served.insert(dir.to_path_buf(), chosen.name.clone());
        Some(chosen)
    }

    fn index(&self, len: usize) -> usize {
        self.rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .random_range(0..len)
    }
}

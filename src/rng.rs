//! Randomness for the New Game button.
//!
//! `SmallRng` is fast and builds for wasm32; its entropy comes from
//! `getrandom`, which maps to `crypto.getRandomValues` in the browser. A fixed
//! seed from `GameConfig::seed` makes the level order repeatable.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub struct WasmRng {
    inner: SmallRng,
}

impl WasmRng {
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }

    /// Seeded when a seed is given, entropy-backed otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::new, Self::from_seed)
    }

    /// Generate a random usize in [0, max). `max` must be non-zero.
    #[inline(always)]
    pub fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }
}

impl Default for WasmRng {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const IDS: [&str; 3] = ["levels/level1.json", "levels/level2.json", "levels/level3.json"];

    fn pick_order(rng: &mut WasmRng, picks: usize) -> Vec<&'static str> {
        (0..picks).map(|_| IDS[rng.gen_range(IDS.len())]).collect()
    }

    #[test]
    fn test_same_seed_same_level_order() {
        let mut a = WasmRng::from_seed(7);
        let mut b = WasmRng::from_optional_seed(Some(7));
        assert_eq!(pick_order(&mut a, 50), pick_order(&mut b, 50));
    }

    #[test]
    fn test_every_level_reachable() {
        let mut rng = WasmRng::from_seed(123);
        let order = pick_order(&mut rng, 300);
        for id in IDS {
            assert!(order.contains(&id), "{} never picked", id);
        }
    }
}

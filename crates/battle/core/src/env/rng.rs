//! Deterministic RNG source for every random draw in a battle.
//!
//! Initiative tie-breaks, flee checks, and reward rolls all draw sequentially
//! from one handle. Target selection never touches it.
//!
//! # Determinism
//!
//! Given the same seed, a source produces the same sequence of values. The
//! internal state can be snapshotted and restored for save/resume.

/// Sequential random number source.
pub trait RngSource {
    /// Advance the generator and return the next 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Roll a die with N sides (1-N inclusive).
    fn roll_die(&mut self, sides: u32) -> u32 {
        (self.next_u32() % sides.max(1)) + 1
    }

    /// Roll a d100 (1-100 inclusive).
    fn roll_percent(&mut self) -> u32 {
        self.roll_die(100)
    }

    /// Generate a value in range [min, max] inclusive.
    ///
    /// Does not draw when the range holds a single value.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = max - min + 1;
        min + (self.next_u32() % span)
    }
}

/// Serializable generator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RngSnapshot {
    pub state: u64,
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR variant: 64-bit LCG state, 32-bit permuted output.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    pub fn seeded(seed: u64) -> Self {
        Self { state: seed }
    }

    pub fn snapshot(&self) -> RngSnapshot {
        RngSnapshot { state: self.state }
    }

    pub fn restore(&mut self, snapshot: &RngSnapshot) {
        self.state = snapshot.state;
    }

    pub fn from_snapshot(snapshot: &RngSnapshot) -> Self {
        Self {
            state: snapshot.state,
        }
    }

    /// `state' = state * multiplier + increment (mod 2^64)`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation.
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngSource for PcgRng {
    fn next_u32(&mut self) -> u32 {
        self.state = Self::pcg_step(self.state);
        Self::pcg_output(self.state)
    }
}

/// Derive an independent seed for one battle of a run.
///
/// # Arguments
///
/// * `run_seed` - Seed chosen when the run started
/// * `battle_index` - Sequence number of the battle within the run
pub fn compute_seed(run_seed: u64, battle_index: u64) -> u64 {
    let mut hash = run_seed;
    hash ^= battle_index.wrapping_mul(0x9e3779b97f4a7c15);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each visitor gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (visitor_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive visitor IDs uniformly across the seed space.
//! This means:
//!
//! - Visitors never share RNG state, so the per-tick movement jitter of one
//!   visitor cannot perturb another's trajectory.
//! - Adding visitors at the end of the roster does not disturb the seeds of
//!   existing visitors — runs stay reproducible as the crowd grows.
//! - The same `SimConfig::seed` always produces an identical simulation.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::VisitorId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-visitor deterministic RNG.
///
/// Created once per visitor at simulation init and stored in [`AgentRngs`]
/// alongside the visitor registry.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and a visitor ID.
    pub fn new(global_seed: u64, visitor: VisitorId) -> Self {
        let seed = global_seed ^ (visitor.0 as u64).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// All per-visitor RNGs, stored apart from the visitor registry.
///
/// Keeping RNG state in its own struct lets the tick loop hold
/// `&mut AgentRngs` and `&[Point]` roster borrows simultaneously — the
/// borrow checker sees disjoint fields instead of one conflicted struct.
pub struct AgentRngs {
    inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-visitor RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| AgentRng::new(global_seed, VisitorId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one visitor's RNG.
    #[inline]
    pub fn get_mut(&mut self, visitor: VisitorId) -> &mut AgentRng {
        &mut self.inner[visitor.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for setup-time operations: visitor spawn offsets,
/// guide assignment, random obstacle scatter, speed-table jitter.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}

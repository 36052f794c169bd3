//! Top-level simulation configuration.
//!
//! Typically constructed via `Default` and overridden field-by-field by the
//! application crate; the `serde` feature adds derives for loading from a
//! JSON/TOML file instead.

use crate::rng::SimRng;
use crate::{CoreError, Tick};

/// Global simulation parameters.
///
/// The defaults reproduce the reference museum scenario: 10 visitors, a
/// single guide walking at 0.12 units/tick that dwells 100 ticks at each
/// destination, and a 1000-tick run.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Number of visitors following the tour.
    pub num_visitors: usize,

    /// Base walking speeds assigned to visitors in roster order.  When more
    /// visitors than table entries are requested, the table cycles with a
    /// small per-visitor jitter so clones don't move in lockstep.
    pub visitor_base_speeds: Vec<f64>,

    /// Steering-force magnitude cap for every visitor.
    pub visitor_max_force: f64,

    /// Visitor mass used in `a = F / m`.
    pub visitor_mass: f64,

    /// Guide travel speed in units per tick.
    pub guide_speed: f64,

    /// How long the guide dwells (and narrates) at each destination.
    pub guide_dwell_ticks: u64,

    /// Emit an `on_snapshot` observer callback every N ticks.  0 disables
    /// snapshots entirely.
    pub snapshot_interval_ticks: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks: 1_000,
            seed: 42,
            num_visitors: 10,
            visitor_base_speeds: vec![
                0.19, 0.19, 0.19, 0.18, 0.18, 0.18, 0.17, 0.17, 0.17, 0.16,
            ],
            visitor_max_force: 2.5,
            visitor_mass: 1.0,
            guide_speed: 0.12,
            guide_dwell_ticks: 100,
            snapshot_interval_ticks: 1,
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Reject configurations no simulation can be built from.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.visitor_base_speeds.is_empty() {
            return Err(CoreError::Config(
                "visitor_base_speeds must not be empty".into(),
            ));
        }
        if self.guide_speed <= 0.0 {
            return Err(CoreError::Config("guide_speed must be positive".into()));
        }
        if self.guide_dwell_ticks == 0 {
            return Err(CoreError::Config(
                "guide_dwell_ticks must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Walking speeds for `count` visitors.
    ///
    /// The first `visitor_base_speeds.len()` visitors take the table values
    /// verbatim; beyond that the table cycles and each speed gets a uniform
    /// ±0.01 jitter from `rng`.
    pub fn visitor_speeds(&self, count: usize, rng: &mut SimRng) -> Vec<f64> {
        let base = &self.visitor_base_speeds;
        if count <= base.len() {
            return base[..count].to_vec();
        }
        (0..count)
            .map(|i| base[i % base.len()] + rng.gen_range(-0.01..=0.01))
            .collect()
    }
}

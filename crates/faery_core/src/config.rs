//! Configuration management for body building, mutation and brain weights.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `faery.toml` file. Every tunable the core reads is here, including
//! the mutation family weights.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `faery.toml` file (overrides defaults)
//! 3. CLI flags for the seed
//!
//! ## Example `faery.toml`
//!
//! ```toml
//! seed = 42
//!
//! [build]
//! collision_policy = "strict"
//!
//! [mutation]
//! mutations_per_offspring = 2
//!
//! [mutation.family_weights]
//! type_change = 0.2
//! build_spec = 0.2
//! subtree = 0.6
//! ```

use serde::{Deserialize, Serialize};

/// What the builder does when a part lands on an occupied lattice cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Fail the whole build with `StructuralCollision`.
    #[default]
    Strict,
    /// Skip the colliding part, keep building its planned children.
    Lenient,
}

/// Placement and sizing parameters for the body builder.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BuildConfig {
    pub collision_policy: CollisionPolicy,
    /// Absolute center of the root part.
    pub root_position: [f64; 3],
    pub random_size_min: [f64; 3],
    pub random_size_max: [f64; 3],
    /// Edge length of every fixed-size part the mutator creates.
    pub fixed_part_size: f64,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            collision_policy: CollisionPolicy::Strict,
            root_position: [0.0, 0.0, 1.0],
            random_size_min: [0.2, 0.2, 0.2],
            random_size_max: [1.4, 1.4, 1.4],
            fixed_part_size: 1.0,
        }
    }
}

/// Relative weights of the three mutation families.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct FamilyWeights {
    pub type_change: f64,
    pub build_spec: f64,
    pub subtree: f64,
}

impl Default for FamilyWeights {
    fn default() -> Self {
        Self {
            type_change: 0.2,
            build_spec: 0.2,
            subtree: 0.6,
        }
    }
}

/// Relative weights of the build-specification tweaks.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct BuildSpecWeights {
    pub direction: f64,
    pub repetitions: f64,
    pub axis: f64,
}

impl Default for BuildSpecWeights {
    fn default() -> Self {
        Self {
            direction: 0.1,
            repetitions: 0.8,
            axis: 0.1,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct MutationConfig {
    pub family_weights: FamilyWeights,
    pub build_spec_weights: BuildSpecWeights,
    pub mutations_per_offspring: usize,
    /// Upper bound on the repetition count of a freshly grafted node.
    pub max_graft_repetitions: u32,
    pub max_build_attempts: usize,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            family_weights: FamilyWeights::default(),
            build_spec_weights: BuildSpecWeights::default(),
            mutations_per_offspring: 1,
            max_graft_repetitions: 5,
            max_build_attempts: 100,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct BrainConfig {
    /// Probability that any one weight is perturbed.
    pub mutation_rate: f64,
    /// Mean of the exponential perturbation.
    pub mutation_magnitude: f64,
}

impl Default for BrainConfig {
    fn default() -> Self {
        Self {
            mutation_rate: 0.75,
            mutation_magnitude: 2.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub build: BuildConfig,
    pub mutation: MutationConfig,
    pub brain: BrainConfig,
    pub seed: Option<u64>,
}

fn non_negative(weights: &[f64]) -> bool {
    weights.iter().all(|w| w.is_finite() && *w >= 0.0)
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    pub fn validate(&self) -> anyhow::Result<()> {
        // Build validation
        for axis in 0..3 {
            anyhow::ensure!(
                self.build.random_size_min[axis] > 0.0,
                "Random part size minimum must be positive"
            );
            anyhow::ensure!(
                self.build.random_size_min[axis] < self.build.random_size_max[axis],
                "Random part size minimum must be below the maximum"
            );
        }
        anyhow::ensure!(
            self.build.fixed_part_size > 0.0,
            "Fixed part size must be positive"
        );
        anyhow::ensure!(
            self.build.root_position.iter().all(|c| c.is_finite()),
            "Root position must be finite"
        );

        // Mutation validation
        let fw = self.mutation.family_weights;
        anyhow::ensure!(
            non_negative(&[fw.type_change, fw.build_spec, fw.subtree]),
            "Mutation family weights must be finite and non-negative"
        );
        anyhow::ensure!(
            fw.build_spec + fw.subtree > 0.0,
            "Build-spec and subtree weights cannot both be zero"
        );
        let sw = self.mutation.build_spec_weights;
        anyhow::ensure!(
            non_negative(&[sw.direction, sw.repetitions, sw.axis]),
            "Build-spec weights must be finite and non-negative"
        );
        anyhow::ensure!(
            sw.direction + sw.repetitions + sw.axis > 0.0,
            "Build-spec weights cannot all be zero"
        );
        anyhow::ensure!(
            self.mutation.mutations_per_offspring >= 1,
            "Mutations per offspring must be at least 1"
        );
        anyhow::ensure!(
            self.mutation.max_graft_repetitions >= 1,
            "Max graft repetitions must be at least 1"
        );
        anyhow::ensure!(
            self.mutation.max_build_attempts >= 1,
            "Max build attempts must be at least 1"
        );

        // Brain validation
        anyhow::ensure!(
            self.brain.mutation_rate >= 0.0 && self.brain.mutation_rate <= 1.0,
            "Brain mutation rate must be in [0.0, 1.0]"
        );
        anyhow::ensure!(
            self.brain.mutation_magnitude >= 0.0,
            "Brain mutation magnitude must be non-negative"
        );

        Ok(())
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn fingerprint(&self) -> String {
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(format!("{:?}", self.build).as_bytes());
        hasher.update(format!("{:?}", self.mutation).as_bytes());
        hasher.update(format!("{:?}", self.brain).as_bytes());
        hex::encode(hasher.finalize())
    }
}

//! Driver configuration with a validating builder.

use std::time::Duration;

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct TryFromBuilderError(pub &'static str);

impl std::fmt::Display for TryFromBuilderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid evolve configuration: {}", self.0)
    }
}

impl std::error::Error for TryFromBuilderError {}

/// Input parameters shared by every driver. Variant-specific fields
/// (interpolated probabilities, islands, tournament order) sit alongside the
/// common ones and are ignored by drivers that have no use for them.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolveConfig {
    pub size_population: usize,
    /// Offspring pool size for the drivers that breed fewer children than
    /// the population (the crisp-matrix GA). Must stay below
    /// `size_population`.
    pub size_mating_pool: Option<usize>,
    /// Fixed cluster count for the fixed-k drivers.
    pub k: Option<usize>,
    pub k_min: usize,
    /// Upper cluster bound; defaults to `round(sqrt(n))` at run start.
    pub k_max: Option<usize>,
    pub pc: f64,
    pub pm: f64,
    pub max_generations: usize,
    pub max_execution_time: Duration,
    pub random_seed: u64,
    pub kmeans_max_iter: usize,
    pub kmeans_eps: f64,
    /// Stop as soon as the best objective surpasses this value (in the
    /// driver's improving direction).
    pub desirable_objective: Option<f64>,
    pub pc_initial: f64,
    pub pc_final: f64,
    pub pm_initial: f64,
    pub pm_final: f64,
    pub pb_initial: f64,
    pub pb_final: f64,
    /// Island migration probability.
    pub pe: f64,
    pub num_islands: usize,
    pub tournament_order: usize,
    /// Evaluate chromosomes in parallel. Evaluation draws no randomness, so
    /// seeded runs stay bit-reproducible.
    pub par_fitness: bool,
}

impl EvolveConfig {
    pub fn builder() -> Builder {
        Builder::new()
    }

    /// The effective `k_max` for a dataset of `n` instances.
    pub fn effective_k_max(&self, num_instances: usize) -> usize {
        self.k_max
            .unwrap_or_else(|| (num_instances as f64).sqrt().round() as usize)
            .clamp(self.k_min, num_instances)
    }
}

impl std::fmt::Display for EvolveConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "evolve_config:")?;
        writeln!(f, "  size_population: {}", self.size_population)?;
        writeln!(f, "  size_mating_pool: {:?}", self.size_mating_pool)?;
        writeln!(f, "  k: {:?}", self.k)?;
        writeln!(f, "  k_min: {}", self.k_min)?;
        writeln!(f, "  k_max: {:?}", self.k_max)?;
        writeln!(f, "  pc: {}", self.pc)?;
        writeln!(f, "  pm: {}", self.pm)?;
        writeln!(f, "  max_generations: {}", self.max_generations)?;
        writeln!(f, "  max_execution_time: {:?}", self.max_execution_time)?;
        writeln!(f, "  random_seed: {}", self.random_seed)?;
        writeln!(f, "  kmeans_max_iter: {}", self.kmeans_max_iter)?;
        writeln!(f, "  kmeans_eps: {}", self.kmeans_eps)?;
        writeln!(f, "  desirable_objective: {:?}", self.desirable_objective)
    }
}

/// The builder for an [`EvolveConfig`].
#[derive(Debug, Clone)]
pub struct Builder {
    size_population: usize,
    size_mating_pool: Option<usize>,
    k: Option<usize>,
    k_min: usize,
    k_max: Option<usize>,
    pc: f64,
    pm: f64,
    max_generations: usize,
    max_execution_time: Duration,
    random_seed: u64,
    kmeans_max_iter: usize,
    kmeans_eps: f64,
    desirable_objective: Option<f64>,
    pc_initial: f64,
    pc_final: f64,
    pm_initial: f64,
    pm_final: f64,
    pb_initial: f64,
    pb_final: f64,
    pe: f64,
    num_islands: usize,
    tournament_order: usize,
    par_fitness: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            size_population: 0,
            size_mating_pool: None,
            k: None,
            k_min: 2,
            k_max: None,
            pc: 0.8,
            pm: 0.1,
            max_generations: 100,
            max_execution_time: Duration::from_secs(3600),
            random_seed: 0,
            kmeans_max_iter: 5,
            kmeans_eps: 0.001,
            desirable_objective: None,
            pc_initial: 0.8,
            pc_final: 0.8,
            pm_initial: 0.1,
            pm_final: 0.1,
            pb_initial: 0.1,
            pb_final: 0.1,
            pe: 0.1,
            num_islands: 1,
            tournament_order: 2,
            par_fitness: false,
        }
    }
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_size_population(mut self, size_population: usize) -> Self {
        self.size_population = size_population;
        self
    }

    pub fn with_size_mating_pool(mut self, size_mating_pool: usize) -> Self {
        self.size_mating_pool = Some(size_mating_pool);
        self
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    pub fn with_k_range(mut self, k_min: usize, k_max: usize) -> Self {
        self.k_min = k_min;
        self.k_max = Some(k_max);
        self
    }

    pub fn with_pc(mut self, pc: f64) -> Self {
        self.pc = pc;
        self
    }

    pub fn with_pm(mut self, pm: f64) -> Self {
        self.pm = pm;
        self
    }

    pub fn with_max_generations(mut self, max_generations: usize) -> Self {
        self.max_generations = max_generations;
        self
    }

    pub fn with_max_execution_time(mut self, max_execution_time: Duration) -> Self {
        self.max_execution_time = max_execution_time;
        self
    }

    pub fn with_random_seed(mut self, random_seed: u64) -> Self {
        self.random_seed = random_seed;
        self
    }

    pub fn with_kmeans_max_iter(mut self, kmeans_max_iter: usize) -> Self {
        self.kmeans_max_iter = kmeans_max_iter;
        self
    }

    pub fn with_kmeans_eps(mut self, kmeans_eps: f64) -> Self {
        self.kmeans_eps = kmeans_eps;
        self
    }

    pub fn with_desirable_objective(mut self, desirable_objective: f64) -> Self {
        self.desirable_objective = Some(desirable_objective);
        self
    }

    pub fn with_pc_range(mut self, pc_initial: f64, pc_final: f64) -> Self {
        self.pc_initial = pc_initial;
        self.pc_final = pc_final;
        self
    }

    pub fn with_pm_range(mut self, pm_initial: f64, pm_final: f64) -> Self {
        self.pm_initial = pm_initial;
        self.pm_final = pm_final;
        self
    }

    pub fn with_pb_range(mut self, pb_initial: f64, pb_final: f64) -> Self {
        self.pb_initial = pb_initial;
        self.pb_final = pb_final;
        self
    }

    pub fn with_pe(mut self, pe: f64) -> Self {
        self.pe = pe;
        self
    }

    pub fn with_num_islands(mut self, num_islands: usize) -> Self {
        self.num_islands = num_islands;
        self
    }

    pub fn with_tournament_order(mut self, tournament_order: usize) -> Self {
        self.tournament_order = tournament_order;
        self
    }

    pub fn with_par_fitness(mut self, par_fitness: bool) -> Self {
        self.par_fitness = par_fitness;
        self
    }

    pub fn build(self) -> Result<EvolveConfig, TryFromBuilderError> {
        if self.size_population < 2 {
            return Err(TryFromBuilderError("size_population must be at least 2"));
        }
        if let Some(pool) = self.size_mating_pool {
            if pool == 0 || pool >= self.size_population {
                return Err(TryFromBuilderError(
                    "size_mating_pool must be in 1..size_population",
                ));
            }
        }
        if self.k_min < 2 {
            return Err(TryFromBuilderError("k_min must be at least 2"));
        }
        if let Some(k_max) = self.k_max {
            if k_max < self.k_min {
                return Err(TryFromBuilderError("k_max must not be below k_min"));
            }
        }
        if let Some(k) = self.k {
            if k < 2 {
                return Err(TryFromBuilderError("k must be at least 2"));
            }
        }
        for p in [
            self.pc,
            self.pm,
            self.pc_initial,
            self.pc_final,
            self.pm_initial,
            self.pm_final,
            self.pb_initial,
            self.pb_final,
            self.pe,
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(TryFromBuilderError("probabilities must lie in [0, 1]"));
            }
        }
        if self.max_generations == 0 {
            return Err(TryFromBuilderError("max_generations must be positive"));
        }
        if self.num_islands == 0 {
            return Err(TryFromBuilderError("num_islands must be positive"));
        }
        if self.tournament_order == 0 {
            return Err(TryFromBuilderError("tournament_order must be positive"));
        }
        Ok(EvolveConfig {
            size_population: self.size_population,
            size_mating_pool: self.size_mating_pool,
            k: self.k,
            k_min: self.k_min,
            k_max: self.k_max,
            pc: self.pc,
            pm: self.pm,
            max_generations: self.max_generations,
            max_execution_time: self.max_execution_time,
            random_seed: self.random_seed,
            kmeans_max_iter: self.kmeans_max_iter,
            kmeans_eps: self.kmeans_eps,
            desirable_objective: self.desirable_objective,
            pc_initial: self.pc_initial,
            pc_final: self.pc_final,
            pm_initial: self.pm_initial,
            pm_final: self.pm_final,
            pb_initial: self.pb_initial,
            pb_final: self.pb_final,
            pe: self.pe,
            num_islands: self.num_islands,
            tournament_order: self.tournament_order,
            par_fitness: self.par_fitness,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mating_pool_at_population_size() {
        let error = EvolveConfig::builder()
            .with_size_population(10)
            .with_size_mating_pool(10)
            .build()
            .unwrap_err();
        assert_eq!(
            error,
            TryFromBuilderError("size_mating_pool must be in 1..size_population")
        );
    }

    #[test]
    fn rejects_contradictory_k_range() {
        assert!(EvolveConfig::builder()
            .with_size_population(10)
            .with_k_range(5, 3)
            .build()
            .is_err());
    }

    #[test]
    fn effective_k_max_defaults_to_sqrt_n() {
        let config = EvolveConfig::builder()
            .with_size_population(10)
            .build()
            .unwrap();
        assert_eq!(config.effective_k_max(100), 10);
        assert_eq!(config.effective_k_max(2), 2);
    }
}

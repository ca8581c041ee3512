//! The per-generation runtime-function log.

use stats::{MinMax, OnlineStats};

/// One generation's scalar samples: the best objective so far plus five
/// statistics over the population's objectives.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSample {
    pub generation: usize,
    pub best_objective: f64,
    pub minimum: f64,
    pub maximum: f64,
    pub average: f64,
    pub variance: f64,
    pub std_deviation: f64,
}

/// An ordered sequence of per-generation samples, mutated only by the
/// driver; the plotting collaborator reads it after the run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuntimeLog {
    samples: Vec<GenerationSample>,
}

impl RuntimeLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a generation. Non-finite population objectives (unevaluated
    /// or culled chromosomes) are left out of the statistics.
    pub fn record(
        &mut self,
        generation: usize,
        best_objective: f64,
        objectives: impl Iterator<Item = f64>,
    ) {
        let mut online = OnlineStats::new();
        let mut min_max = MinMax::new();
        for objective in objectives.filter(|o| o.is_finite()) {
            online.add(objective);
            min_max.add(objective);
        }
        self.samples.push(GenerationSample {
            generation,
            best_objective,
            minimum: min_max.min().copied().unwrap_or(f64::NAN),
            maximum: min_max.max().copied().unwrap_or(f64::NAN),
            average: online.mean(),
            variance: online.variance(),
            std_deviation: online.stddev(),
        });
    }

    pub fn samples(&self) -> &[GenerationSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl std::fmt::Display for RuntimeLog {
    /// Tab-separated table, one row per generation, ready for a plotting
    /// collaborator.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "generation\tbest\tmin\tmax\tavg\tvar\tstd")?;
        for s in &self.samples {
            writeln!(
                f,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}",
                s.generation,
                s.best_objective,
                s.minimum,
                s.maximum,
                s.average,
                s.variance,
                s.std_deviation
            )?;
        }
        Ok(())
    }
}

//! Evolutionary algorithms for partitional clustering.
//!
//! A clustering of a numeric dataset is searched for by a genetic algorithm:
//! a population of candidate partitions (chromosomes) is evolved through
//! selection, recombination, mutation and, for some variants, a k-means style
//! local search. The crate provides:
//!
//! * The [chromosome](crate::chromosome) encodings of a candidate clustering
//!   (label strings, centroid strings, crisp bit-matrices, medoid index
//!   strings and the label-plus-centroids hybrid used by the F-EAC family)
//! * The genetic operator suite ([crossover](crate::crossover),
//!   [mutate](crate::mutate), [select](crate::select)) with cluster-aware
//!   operators such as cluster split/merge, PNN codebook reduction and
//!   centroid rearrangement
//! * The [fitness](crate::fitness) functions (SSE/J1, simplified silhouette,
//!   partial Rand index) with per-cluster partial scores
//! * The [strategy](crate::strategy) drivers: EAC, EAC-I/II/III, F-EAC, the
//!   crisp-matrix GA, the medoid GAs (GCA/HKA), GGA with island migration,
//!   CGA, GKA and the fixed-k / variable-k baseline GAs
//! * The [clustering primitives](crate::cluster) the operators rest on:
//!   nearest centroid/medoid assignment, centroid recomputation, k-means
//!   local search, PNN merge, PAM swap cost, plus [graph](crate::graph)
//!   utilities (ε-neighborhood adjacency, Prim MST, DFS, union-find)
//!
//! ## Quick usage
//!
//! ```rust
//! use genetic_clustering::distance::SquaredEuclidean;
//! use genetic_clustering::instance::Dataset;
//! use genetic_clustering::strategy::feac::{Feac, FeacVariant};
//! use genetic_clustering::strategy::EvolveConfig;
//!
//! let dataset = Dataset::from_rows(&[
//!     vec![0.0, 0.0], vec![0.0, 1.0], vec![1.0, 0.0],
//!     vec![10.0, 10.0], vec![10.0, 11.0], vec![11.0, 10.0],
//! ]).unwrap();
//!
//! let config = EvolveConfig::builder()
//!     .with_size_population(20)
//!     .with_k_range(2, 4)
//!     .with_max_generations(30)
//!     .with_random_seed(7)
//!     .build()
//!     .unwrap();
//!
//! let outcome = Feac::new(FeacVariant::Feac, config)
//!     .run(&dataset, &SquaredEuclidean)
//!     .unwrap();
//! assert_eq!(outcome.summary.num_cluster_k, 2);
//! ```
//!
//! ## Determinism
//!
//! Every random draw goes through a single `SmallRng` seeded from the
//! configured `random_seed`, so runs with the same configuration, seed and
//! dataset are bit-reproducible.

pub mod chromosome;
pub mod cluster;
pub mod crossover;
pub mod distance;
pub mod error;
pub mod fitness;
pub mod graph;
pub mod instance;
pub mod kernel;
pub mod matrix;
pub mod mutate;
pub mod partition;
pub mod population;
pub mod select;
pub mod strategy;

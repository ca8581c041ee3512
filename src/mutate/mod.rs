//! Mutation operators. Cluster-aware operators take the per-cluster partial
//! fitness into account when choosing which cluster to disturb.

pub mod bidirectional;
pub mod bit;
pub mod gka;
pub mod mo;
pub mod point_medoid;
pub mod random_delta;
pub mod split_merge;

pub use bidirectional::{bidirectional_mutation, bidirectional_scaled_mutation};
pub use bit::bit_mutation;
pub use gka::gka_mutation;
pub use mo::{mo1, mo2, operator_proportion, ClusterWeighting};
pub use point_medoid::point_mutation;
pub use random_delta::random_delta_mutation;
pub use split_merge::{merge_mutation, splitting_mutation};

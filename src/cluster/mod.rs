//! Clustering primitives the genetic operators rest on.

pub mod centroids;
pub mod kmeans;
pub mod nearest;
pub mod pam;
pub mod pnn;
pub mod rearrange;

pub use centroids::{assign_to_centroids, assign_to_live_centroids, random_centroids, recompute};
pub use kmeans::kmeans_local_search;
pub use nearest::{
    farthest_member_from, nearest_centroid, nearest_live_centroid, nearest_medoid,
    nearest_other_centroid,
};
pub use pam::{pam_improve, total_medoid_cost};
pub use pnn::pnn_reduce;
pub use rearrange::rearrange_to_reference;

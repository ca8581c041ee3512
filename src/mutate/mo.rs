//! The cluster-elimination (MO1) and cluster-split (MO2) mutations of the
//! EAC family, plus the adaptive proportion that picks between them.

use crate::chromosome::feac::FeacChromosome;
use crate::chromosome::{label, Chromosome};
use crate::cluster::nearest::{farthest_member_from, nearest_other_centroid};
use crate::distance::Distance;
use crate::fitness::{linear_normalization, Evaluation};
use crate::instance::Dataset;
use crate::kernel;
use crate::select::CumulativeDistribution;
use rand::Rng;

/// How a cluster is picked for mutation. The EAC baseline picks uniformly;
/// EAC-I/III weight by `1 − fc` (bad clusters mutate more); EAC-II and
/// F-EAC weight by the linear rank of `fc`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClusterWeighting {
    Uniform,
    Complement,
    LinearRank,
}

fn choose_cluster<R: Rng>(partials: &[f64], weighting: ClusterWeighting, rng: &mut R) -> usize {
    match weighting {
        ClusterWeighting::Uniform => rng.gen_range(0..partials.len()),
        ClusterWeighting::Complement => {
            let weights: Vec<f64> = partials.iter().map(|fc| 1.0 - fc).collect();
            CumulativeDistribution::from_weights(&weights).sample(rng)
        }
        ClusterWeighting::LinearRank => {
            let weights = linear_normalization(partials, 1.0);
            CumulativeDistribution::from_weights(&weights).sample(rng)
        }
    }
}

/// Eliminates `n ∈ [1, k−2]` clusters: each chosen cluster is folded into
/// its nearest remaining cluster with a count-weighted centroid average, and
/// the labels compact. Partial fitness and objective are refreshed after
/// every merge so later choices see current cluster quality. Disabled at
/// `k ≤ 2`.
pub fn mo1<D: Distance, R: Rng>(
    chromosome: &mut FeacChromosome,
    dataset: &Dataset,
    dist: &D,
    weighting: ClusterWeighting,
    evaluate: &dyn Fn(&FeacChromosome, &Dataset) -> Evaluation,
    rng: &mut R,
) {
    if chromosome.num_clusters() <= 2 {
        return;
    }
    let n = rng.gen_range(1..=chromosome.num_clusters() - 2);
    for _ in 0..n {
        let s = choose_cluster(&chromosome.partial_fc, weighting, rng);
        let Some(j) = nearest_other_centroid(s, &chromosome.centroids, dist) else {
            break;
        };
        let denominator = chromosome.counts[j] + chromosome.counts[s];
        if denominator == 0 {
            continue;
        }

        let absorbed = chromosome.centroids.row(s).to_vec();
        kernel::scal(chromosome.centroids.row_mut(j), chromosome.counts[j] as f64);
        kernel::axpy(
            chromosome.centroids.row_mut(j),
            chromosome.counts[s] as f64,
            &absorbed,
        );
        kernel::scal_inv(chromosome.centroids.row_mut(j), denominator as f64);
        chromosome.counts[j] = denominator;

        for l in chromosome.labels.iter_mut() {
            if *l == s {
                *l = j;
            }
        }
        let keep: Vec<usize> = (0..chromosome.num_clusters()).filter(|&x| x != s).collect();
        label::relabel_keep(&mut chromosome.labels, &keep);
        chromosome.centroids.keep_rows(&keep);
        chromosome.counts.remove(s);
        chromosome.partial_fc.remove(s);

        let evaluation = evaluate(chromosome, dataset);
        chromosome.set_partial_fc(evaluation.partials);
        chromosome.set_objective(evaluation.objective);
    }
}

/// Splits `n ∈ [1, k]` clusters: within a chosen cluster of more than two
/// members, a random member `s1` and the member `s2` farthest from it seed
/// two new clusters, and every member joins the nearer seed. Disabled once
/// `k` reaches `k_max`.
pub fn mo2<D: Distance, R: Rng>(
    chromosome: &mut FeacChromosome,
    dataset: &Dataset,
    dist: &D,
    weighting: ClusterWeighting,
    k_max: usize,
    evaluate: &dyn Fn(&FeacChromosome, &Dataset) -> Evaluation,
    rng: &mut R,
) {
    if chromosome.num_clusters() >= k_max {
        return;
    }
    let n = rng.gen_range(1..=chromosome.num_clusters());
    for _ in 0..n {
        if chromosome.num_clusters() >= k_max {
            break;
        }
        let s = choose_cluster(&chromosome.partial_fc, weighting, rng);
        if chromosome.counts[s] <= 2 {
            continue;
        }
        let members: Vec<usize> = chromosome
            .labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == s)
            .map(|(i, _)| i)
            .collect();
        let s1 = members[rng.gen_range(0..members.len())];
        let s2 = farthest_member_from(s1, &chromosome.labels, s, dataset, dist);
        let seed1 = dataset.features(s1).to_vec();
        let seed2 = dataset.features(s2).to_vec();

        let moved: Vec<usize> = members
            .iter()
            .copied()
            .filter(|&i| {
                let x = dataset.features(i);
                dist.distance(x, &seed2) < dist.distance(x, &seed1)
            })
            .collect();
        if moved.is_empty() || moved.len() == members.len() {
            continue;
        }

        let dim = dataset.dim();
        let mut mean_stay = vec![0.0; dim];
        let mut mean_moved = vec![0.0; dim];
        let new_cluster = chromosome.num_clusters();
        for &i in &members {
            if moved.contains(&i) {
                kernel::axpy(&mut mean_moved, 1.0, dataset.features(i));
            } else {
                kernel::axpy(&mut mean_stay, 1.0, dataset.features(i));
            }
        }
        let stay_count = (members.len() - moved.len()) as u64;
        let moved_count = moved.len() as u64;
        kernel::scal_inv(&mut mean_stay, stay_count as f64);
        kernel::scal_inv(&mut mean_moved, moved_count as f64);

        for &i in &moved {
            chromosome.labels[i] = new_cluster;
        }
        chromosome.centroids.copy_row_from(s, &mean_stay);
        chromosome.centroids.push_live_row(&mean_moved);
        chromosome.counts[s] = stay_count;
        chromosome.counts.push(moved_count);
        chromosome.partial_fc.push(-1.0);

        let evaluation = evaluate(chromosome, dataset);
        chromosome.set_partial_fc(evaluation.partials);
        chromosome.set_objective(evaluation.objective);
    }
}

/// The adaptive probability of applying MO1 rather than MO2, from the mean
/// objective change each operator produced in the previous generation. When
/// both changes are positive the proportion is `ΔAF₁/(ΔAF₁+ΔAF₂)`; when
/// both are non-positive it is 0.5; when exactly one is non-positive the
/// proportion saturates at 0.10 or 0.90 rather than 0 or 1.
pub fn operator_proportion(daf_mo1: f64, daf_mo2: f64) -> f64 {
    if daf_mo1 > 0.0 && daf_mo2 > 0.0 {
        daf_mo1 / (daf_mo1 + daf_mo2)
    } else if daf_mo1 <= 0.0 && daf_mo2 <= 0.0 {
        0.5
    } else if daf_mo1 <= 0.0 {
        0.10
    } else {
        0.90
    }
}

//! Graph primitives over the instance dissimilarity matrix: ε-neighborhood
//! adjacency, Prim's minimum spanning tree, depth-first reachability and
//! union-find components.

use crate::distance::DissimilarityMatrix;
use crate::matrix::BitMatrix;
use fixedbitset::FixedBitSet;

/// Union-find over `0..n` with union by rank and path compression.
///
/// Tree roots enumerate clusters; the disjoint-sets partition view maps
/// roots to dense cluster indices.
#[derive(Debug, Clone)]
pub struct DisjointSets {
    parent: Vec<usize>,
    rank: Vec<u8>,
    num_sets: usize,
}

impl DisjointSets {
    pub fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            num_sets: n,
        }
    }

    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }

    pub fn num_sets(&self) -> usize {
        self.num_sets
    }

    pub fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    /// Root lookup without path compression, for shared access.
    pub fn root(&self, mut x: usize) -> usize {
        while self.parent[x] != x {
            x = self.parent[x];
        }
        x
    }

    /// Unites the sets of `a` and `b`; returns false when already united.
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        self.num_sets -= 1;
        true
    }
}

/// Symmetric adjacency matrix connecting instances closer than `epsilon`.
pub fn epsilon_adjacency(dissimilarity: &DissimilarityMatrix, epsilon: f64) -> BitMatrix {
    let n = dissimilarity.num_instances();
    let mut adjacency = BitMatrix::zeroed(n, n);
    for i in 1..n {
        for j in 0..i {
            if dissimilarity.get(i, j) <= epsilon {
                adjacency.set(i, j, true);
                adjacency.set(j, i, true);
            }
        }
    }
    adjacency
}

/// Prim's minimum spanning tree over the full dissimilarity graph.
///
/// Returns the predecessor array rooted at vertex 0 (`pi[0] == 0`). MST
/// optimality assumes the dissimilarity respects the triangle inequality.
pub fn prim_mst(dissimilarity: &DissimilarityMatrix) -> Vec<usize> {
    let n = dissimilarity.num_instances();
    let mut pi = vec![0; n];
    let mut key = vec![f64::INFINITY; n];
    let mut in_tree = FixedBitSet::with_capacity(n);
    key[0] = 0.0;

    for _ in 0..n {
        let u = (0..n)
            .filter(|&v| !in_tree.contains(v))
            .min_by(|&a, &b| key[a].total_cmp(&key[b]))
            .expect("an untreed vertex remains");
        in_tree.insert(u);
        for v in 0..n {
            if !in_tree.contains(v) && dissimilarity.get(u, v) < key[v] {
                key[v] = dissimilarity.get(u, v);
                pi[v] = u;
            }
        }
    }
    pi
}

/// Vertices reachable from `start` in the adjacency matrix, in DFS preorder.
pub fn dfs_reachable(adjacency: &BitMatrix, start: usize) -> Vec<usize> {
    let n = adjacency.num_rows();
    let mut visited = FixedBitSet::with_capacity(n);
    let mut order = Vec::new();
    let mut stack = vec![start];
    while let Some(u) = stack.pop() {
        if visited.contains(u) {
            continue;
        }
        visited.insert(u);
        order.push(u);
        // reversed so lower-indexed neighbours come out of the stack first
        for v in (0..n).rev() {
            if adjacency.get(u, v) && !visited.contains(v) {
                stack.push(v);
            }
        }
    }
    order
}

/// Connected components of the nearest-neighbor graph: every instance is
/// united with its single nearest neighbor (lower index wins ties).
pub fn nearest_neighbor_components(dissimilarity: &DissimilarityMatrix) -> DisjointSets {
    let n = dissimilarity.num_instances();
    let mut sets = DisjointSets::new(n);
    for i in 0..n {
        let nearest = (0..n)
            .filter(|&j| j != i)
            .min_by(|&a, &b| dissimilarity.get(i, a).total_cmp(&dissimilarity.get(i, b)));
        if let Some(j) = nearest {
            sets.union(i, j);
        }
    }
    sets
}

/// Connected components of the ε-neighborhood graph.
pub fn epsilon_components(dissimilarity: &DissimilarityMatrix, epsilon: f64) -> DisjointSets {
    let n = dissimilarity.num_instances();
    let mut sets = DisjointSets::new(n);
    for i in 1..n {
        for j in 0..i {
            if dissimilarity.get(i, j) <= epsilon {
                sets.union(i, j);
            }
        }
    }
    sets
}

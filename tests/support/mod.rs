//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use genetic_clustering::instance::Dataset;

/// Two tight quintuples around (0.5, 0.5) and (10.5, 10.5).
pub fn two_blob_squares() -> Dataset {
    Dataset::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
        vec![0.5, 0.5],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![11.0, 10.0],
        vec![11.0, 11.0],
        vec![10.5, 10.5],
    ])
    .unwrap()
}

/// Twenty instances scattered around (0, 0) and (10, 10).
pub fn two_gaussians() -> Dataset {
    let offsets = [
        (0.10, 0.20),
        (-0.30, 0.10),
        (0.20, -0.20),
        (-0.10, -0.30),
        (0.30, 0.30),
        (0.00, 0.10),
        (-0.20, 0.20),
        (0.10, -0.10),
        (0.25, 0.00),
        (-0.15, -0.20),
    ];
    let mut rows = Vec::with_capacity(20);
    for &(dx, dy) in &offsets {
        rows.push(vec![dx, dy]);
    }
    for &(dx, dy) in &offsets {
        rows.push(vec![10.0 + dx, 10.0 + dy]);
    }
    Dataset::from_rows(&rows).unwrap()
}

/// Two triangles of three instances each, ten units apart.
pub fn six_points() -> Dataset {
    Dataset::from_rows(&[
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![10.0, 10.0],
        vec![10.0, 11.0],
        vec![11.0, 10.0],
    ])
    .unwrap()
}

/// Five collinear instances: a triple around 1 and a pair around 10.5.
pub fn line_five() -> Dataset {
    Dataset::from_rows(&[
        vec![0.0],
        vec![1.0],
        vec![2.0],
        vec![10.0],
        vec![11.0],
    ])
    .unwrap()
}

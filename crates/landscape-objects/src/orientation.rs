//! Chain orientation inference.
//!
//! Survey data for power lines carries pylon positions but no heading.
//! Each pylon is oriented along the line by looking at its two nearest
//! neighbors on the same chain:
//!
//! 1. Query the `neighbor_count` nearest other points.
//! 2. Drop leading candidates closer than `proximity_threshold` while more
//!    than two remain; those belong to a parallel line.
//! 3. Average the bearing to the nearest survivor with the reversed
//!    bearing to the second one.
//!
//! The average is a plain arithmetic mean, not a circular one: bearings
//! straddling the 0/2π wrap produce a heading rotated by π.

use std::f64::consts::{PI, TAU};

use glam::DVec2;
use landscape_core::constants::MIN_CHAIN_NEIGHBORS;
use landscape_core::{ObjectError, OrientationConfig, Result};
use rstar::primitives::GeomWithData;
use rstar::RTree;

type IndexedPoint = GeomWithData<[f64; 2], usize>;

/// A neighbor candidate of a query point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Neighbor {
    /// Index into the input point list.
    pub index: usize,
    /// Euclidean distance to the query point.
    pub distance: f64,
}

/// Bearing from `from` to `to` in radians, in [0, 2π).
///
/// Measured clockwise from the +x (east) axis, relative to the fixed
/// reference `atan2(0, 0)`.
pub fn bearing(from: DVec2, to: DVec2) -> f64 {
    let reference = 0.0f64.atan2(0.0);
    let d = to - from;
    (reference - d.y.atan2(d.x)).rem_euclid(TAU)
}

/// Nearest-neighbor index over projected chain points.
pub struct ChainOrientation {
    points: Vec<DVec2>,
    tree: RTree<IndexedPoint>,
    neighbor_count: usize,
    proximity_threshold: f64,
}

impl ChainOrientation {
    /// Build the spatial index over `points` (projected meters).
    pub fn new(points: Vec<DVec2>, config: &OrientationConfig) -> Self {
        let entries = points
            .iter()
            .enumerate()
            .map(|(i, p)| GeomWithData::new([p.x, p.y], i))
            .collect();
        Self {
            points,
            tree: RTree::bulk_load(entries),
            neighbor_count: config.neighbor_count,
            proximity_threshold: config.proximity_threshold,
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Up to `neighbor_count` nearest other points, ascending by distance.
    /// Equal distances are ordered by input index. Empty for an index
    /// outside the point list.
    pub fn neighbors(&self, index: usize) -> Vec<Neighbor> {
        let Some(&p) = self.points.get(index) else {
            return Vec::new();
        };
        let mut candidates: Vec<Neighbor> = Vec::with_capacity(self.neighbor_count + 1);
        for (entry, distance_2) in self.tree.nearest_neighbor_iter_with_distance_2(&[p.x, p.y]) {
            if entry.data == index {
                continue;
            }
            let distance = distance_2.sqrt();
            // keep collecting past k while tied with the last candidate
            if candidates.len() >= self.neighbor_count
                && candidates.last().map_or(true, |last| distance > last.distance)
            {
                break;
            }
            candidates.push(Neighbor {
                index: entry.data,
                distance,
            });
        }
        candidates.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.index.cmp(&b.index)));
        candidates.truncate(self.neighbor_count);
        candidates
    }

    /// The two neighbors used to orient point `index`.
    pub fn chain_neighbors(&self, index: usize) -> Result<(Neighbor, Neighbor)> {
        let candidates = self.neighbors(index);
        let mut start = 0;
        while candidates.len() - start > MIN_CHAIN_NEIGHBORS
            && candidates[start].distance < self.proximity_threshold
        {
            start += 1;
        }
        match &candidates[start..] {
            [a, b, ..] => Ok((*a, *b)),
            rest => Err(ObjectError::InsufficientNeighbors {
                index,
                available: rest.len(),
            }),
        }
    }

    /// Heading of point `index` along its chain, in radians.
    pub fn orientation_at(&self, index: usize) -> Result<f64> {
        let (a, b) = self.chain_neighbors(index)?;
        let p = self.points[index];
        let toward_a = bearing(p, self.points[a.index]);
        let away_from_b = (bearing(p, self.points[b.index]) + PI).rem_euclid(TAU);
        Ok((toward_a + away_from_b) / 2.0)
    }

    /// One result per input point, in input order.
    pub fn infer_all(&self) -> Vec<Result<f64>> {
        (0..self.points.len()).map(|i| self.orientation_at(i)).collect()
    }
}

//! Greedy nearest-neighbor ordering of unordered point sets.

use crate::error::{ContourError, Result};
use resect_math::{distance, Point3, Tolerance};
use serde::{Deserialize, Serialize};

/// A point sequence with a defined traversal order.
///
/// `jumps[i]` is the distance from `points[i]` to `points[i + 1]`, so
/// `jumps.len() == points.len() - 1` for any non-empty path.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedPath {
    /// Points in traversal order.
    pub points: Vec<Point3>,
    /// Consecutive-point distances.
    pub jumps: Vec<f64>,
}

impl OrderedPath {
    /// Build a path from already ordered points, computing the jumps.
    pub fn from_points(points: Vec<Point3>) -> Self {
        let jumps = points.windows(2).map(|w| distance(&w[0], &w[1])).collect();
        Self { points, jumps }
    }

    /// Number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the path has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index and length of the largest jump, `None` for paths of < 2 points.
    ///
    /// Ties resolve to the earliest jump.
    pub fn largest_jump(&self) -> Option<(usize, f64)> {
        self.jumps
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best, (i, d)| match best {
                Some((_, b)) if b >= d => best,
                _ => Some((i, d)),
            })
    }

    /// Median length of the non-zero jumps.
    ///
    /// Jumps between coincident points are ignored. `None` when no jump is
    /// longer than [`Tolerance::DEFAULT`].
    pub fn median_jump(&self) -> Option<f64> {
        let mut sorted: Vec<f64> = self
            .jumps
            .iter()
            .copied()
            .filter(|&d| !Tolerance::DEFAULT.is_zero(d))
            .collect();
        if sorted.is_empty() {
            return None;
        }
        sorted.sort_by(f64::total_cmp);
        let mid = sorted.len() / 2;
        Some(if sorted.len() % 2 == 0 {
            0.5 * (sorted[mid - 1] + sorted[mid])
        } else {
            sorted[mid]
        })
    }

    /// Cut the path if any jump exceeds `threshold`.
    ///
    /// When triggered the path is truncated at the single largest jump: the
    /// point before the jump is kept, everything after it is discarded.
    /// Returns the removed jump, or `None` if the path was left untouched.
    pub fn truncate_at_largest_jump(&mut self, threshold: f64) -> Option<Truncation> {
        if !self.jumps.iter().any(|&d| d > threshold) {
            return None;
        }
        let (index, jump) = self.largest_jump()?;
        let total = self.points.len();
        self.points.truncate(index + 1);
        self.jumps.truncate(index);
        log::warn!(
            "path truncated at jump {index} ({jump:.3} > {threshold:.3}), kept {} of {total} points",
            self.points.len()
        );
        Some(Truncation {
            index,
            jump,
            kept: self.points.len(),
            total,
        })
    }
}

/// Record of a jump truncation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Truncation {
    /// Index of the jump the path was cut at.
    pub index: usize,
    /// Length of that jump.
    pub jump: f64,
    /// Points kept.
    pub kept: usize,
    /// Points before truncation.
    pub total: usize,
}

impl Truncation {
    /// Fraction of the input that survived.
    pub fn retained_fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.kept as f64 / self.total as f64
    }
}

/// Rule deciding when a jump counts as an outlier.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum JumpThreshold {
    /// A fixed distance in model units.
    Fixed(f64),
    /// A multiple of the path's median jump length.
    MedianSpacing(f64),
}

impl JumpThreshold {
    /// Resolve the threshold against a concrete path.
    pub fn resolve(&self, path: &OrderedPath) -> f64 {
        match *self {
            JumpThreshold::Fixed(d) => d,
            JumpThreshold::MedianSpacing(k) => path.median_jump().map_or(f64::INFINITY, |m| k * m),
        }
    }

    /// The configured scalar (distance or multiplier).
    pub fn value(&self) -> f64 {
        match *self {
            JumpThreshold::Fixed(v) | JumpThreshold::MedianSpacing(v) => v,
        }
    }
}

impl Default for JumpThreshold {
    fn default() -> Self {
        JumpThreshold::Fixed(20.0)
    }
}

/// Order an unordered point set into a path by repeated nearest-neighbor hops.
///
/// The path starts at the element nearest to `start`, or at the first element
/// when `start` is `None`. Each step appends the remaining point closest to the
/// last appended one; ties go to the lowest input index, so the result is
/// deterministic. Runs in O(n²).
pub fn order_nearest_neighbor(points: &[Point3], start: Option<&Point3>) -> OrderedPath {
    if points.is_empty() {
        return OrderedPath {
            points: Vec::new(),
            jumps: Vec::new(),
        };
    }

    let first = match start {
        Some(s) => nearest(points, s, |_| true).map_or(0, |(i, _)| i),
        None => 0,
    };

    let mut visited = vec![false; points.len()];
    let mut path = Vec::with_capacity(points.len());
    let mut jumps = Vec::with_capacity(points.len() - 1);

    visited[first] = true;
    path.push(points[first]);
    let mut current = points[first];

    while let Some((idx, dist)) = nearest(points, &current, |i| !visited[i]) {
        visited[idx] = true;
        path.push(points[idx]);
        jumps.push(dist);
        current = points[idx];
    }

    OrderedPath {
        points: path,
        jumps,
    }
}

/// Order a point set and apply jump truncation, rejecting unstable results.
///
/// Fails with [`ContourError::UnstableOrdering`] when truncation keeps less
/// than `min_retained_fraction` of the input.
pub fn order_and_truncate(
    points: &[Point3],
    threshold: JumpThreshold,
    min_retained_fraction: f64,
) -> Result<(OrderedPath, Option<Truncation>)> {
    let mut path = order_nearest_neighbor(points, None);
    let limit = threshold.resolve(&path);
    let truncation = path.truncate_at_largest_jump(limit);
    if let Some(t) = truncation {
        if t.retained_fraction() < min_retained_fraction {
            return Err(ContourError::UnstableOrdering {
                kept: t.kept,
                total: t.total,
                jump: t.jump,
            });
        }
    }
    Ok((path, truncation))
}

fn nearest(
    points: &[Point3],
    from: &Point3,
    eligible: impl Fn(usize) -> bool,
) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (i, p) in points.iter().enumerate() {
        if !eligible(i) {
            continue;
        }
        let d = distance(from, p);
        if best.map_or(true, |(_, b)| d < b) {
            best = Some((i, d));
        }
    }
    best
}

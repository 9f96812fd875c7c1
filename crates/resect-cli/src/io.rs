//! JSON input and output.

use anyhow::{Context, Result};
use resect::{InputKind, Point3, SurfaceReport};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Read a JSON array of `[x, y, z]` triples.
pub fn read_points(path: &Path) -> Result<Vec<Point3>> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let triples: Vec<[f64; 3]> = serde_json::from_str(&json)
        .with_context(|| format!("{} is not an array of [x, y, z] points", path.display()))?;
    Ok(triples.into_iter().map(Point3::from).collect())
}

/// Parse `x,y,z` from the command line.
pub fn parse_point(s: &str) -> std::result::Result<Point3, String> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>())
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| format!("invalid coordinate in {s:?}: {e}"))?;
    match coords.as_slice() {
        [x, y, z] => Ok(Point3::new(*x, *y, *z)),
        _ => Err(format!("expected x,y,z, got {s:?}")),
    }
}

/// JSON shape of a finished reconstruction.
#[derive(Debug, Serialize)]
pub struct SurfaceOutput {
    kind: &'static str,
    degree_u: usize,
    degree_v: usize,
    control_points: Vec<[f64; 3]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    harmonic: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    band_size: Option<usize>,
    ring_length: f64,
    sweep_direction: [f64; 3],
}

impl SurfaceOutput {
    pub fn from_report(report: &SurfaceReport) -> Self {
        let d = report.sweep_direction;
        Self {
            kind: match report.kind {
                InputKind::Band => "band",
                InputKind::Curve => "curve",
            },
            degree_u: report.control_points.degree_u(),
            degree_v: report.control_points.degree_v(),
            control_points: report.control_points.to_arrays(),
            harmonic: report.harmonic,
            band_size: report.band_size,
            ring_length: report.ring_length,
            sweep_direction: [d.x, d.y, d.z],
        }
    }
}

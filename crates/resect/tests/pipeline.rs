//! End-to-end reconstruction on a synthetic sphere.

use resect::{
    surface_from_band_label, ControlPointBuffer, InputKind, JumpThreshold, PlannerSettings,
    Point3, ResectionError, ResectionPlanner, SurfaceInput, SurfaceMesh,
};
use resect_math::BoundingBox;

const SPHERE_RADIUS: f64 = 10.0;
const LONGITUDES: usize = 120;

/// UV sphere with one ring per degree of latitude.
fn uv_sphere(radius: f64) -> SurfaceMesh {
    let rings = 181;
    let mut points = Vec::with_capacity(rings * LONGITUDES);
    for i in 0..rings {
        let theta = (i as f64).to_radians();
        for j in 0..LONGITUDES {
            let phi = std::f64::consts::TAU * j as f64 / LONGITUDES as f64;
            points.push(Point3::new(
                radius * theta.sin() * phi.cos(),
                radius * theta.sin() * phi.sin(),
                radius * theta.cos(),
            ));
        }
    }

    let mut triangles = Vec::new();
    for i in 0..rings - 1 {
        for j in 0..LONGITUDES {
            let a = (i * LONGITUDES + j) as u32;
            let b = (i * LONGITUDES + (j + 1) % LONGITUDES) as u32;
            let c = a + LONGITUDES as u32;
            let d = b + LONGITUDES as u32;
            triangles.push([a, c, b]);
            triangles.push([b, c, d]);
        }
    }
    SurfaceMesh::new(points, triangles)
}

fn pole() -> Point3 {
    Point3::new(0.0, 0.0, SPHERE_RADIUS)
}

#[test]
fn test_sphere_band_produces_sixteen_control_points() {
    let mesh = uv_sphere(SPHERE_RADIUS);
    let planner = ResectionPlanner::new(PlannerSettings::default()).unwrap();
    let mut display = ControlPointBuffer::new();

    let report = planner
        .update_surface(
            SurfaceInput::Band {
                mesh: &mesh,
                seed: pole(),
                radius: 0.5 * SPHERE_RADIUS,
            },
            &mut display,
        )
        .unwrap();

    assert_eq!(report.kind, InputKind::Band);
    assert_eq!(report.band_size, Some(LONGITUDES));
    assert!(report.truncation.is_none());
    let harmonic = report.harmonic.unwrap();
    assert!((1..=LONGITUDES / 2).contains(&harmonic));

    let bounds = mesh.bounds().unwrap();
    assert_eq!(display.revision(), 1);
    assert_eq!(display.points().len(), 16);
    for p in display.points() {
        assert!(p.coords.iter().all(|c| c.is_finite()), "non-finite {p:?}");
        assert!(bounds.contains(p, 1e-6), "{p:?} outside the sphere's bounds");
    }
}

#[test]
fn test_sphere_band_from_label() {
    let mesh = uv_sphere(SPHERE_RADIUS);
    let planner = ResectionPlanner::new(PlannerSettings::default()).unwrap();
    let report = surface_from_band_label(&planner, &mesh, pole(), "5.0mm").unwrap();
    assert_eq!(report.control_points.len(), 16);
    assert!(report.control_points.is_finite());

    // The band ring lies in the plane z = 10 cos 29°; so does the surface.
    let z = SPHERE_RADIUS * 29f64.to_radians().cos();
    let flat = BoundingBox::from_points(report.control_points.points()).unwrap();
    assert!((flat.min.z - z).abs() < 0.05);
    assert!((flat.max.z - z).abs() < 0.05);
}

#[test]
fn test_far_reference_is_empty_input() {
    let mesh = uv_sphere(SPHERE_RADIUS);
    let planner = ResectionPlanner::new(PlannerSettings::default()).unwrap();
    let mut display = ControlPointBuffer::new();

    let err = planner
        .update_surface(
            SurfaceInput::Band {
                mesh: &mesh,
                seed: Point3::new(1000.0, 1000.0, 1000.0),
                radius: 5.0,
            },
            &mut display,
        )
        .unwrap_err();

    assert!(matches!(err, ResectionError::EmptyInput(_)), "got {err}");
    assert_eq!(display.revision(), 0);
    assert!(display.points().is_empty());
}

#[test]
fn test_outlier_is_truncated_with_median_threshold() {
    let mut mesh = uv_sphere(SPHERE_RADIUS);
    // Lies at the band distance from the pole but far from the ring.
    mesh.points.push(Point3::new(0.0, 0.0, 5.0));

    let settings = PlannerSettings {
        jump_threshold: JumpThreshold::MedianSpacing(5.0),
        ..PlannerSettings::default()
    };
    let planner = ResectionPlanner::new(settings).unwrap();
    let report = planner
        .reconstruct(SurfaceInput::Band {
            mesh: &mesh,
            seed: pole(),
            radius: 5.0,
        })
        .unwrap();

    assert_eq!(report.band_size, Some(LONGITUDES + 1));
    let truncation = report.truncation.unwrap();
    assert_eq!(truncation.kept, LONGITUDES);
    assert_eq!(truncation.total, LONGITUDES + 1);
    assert_eq!(report.retained_points, Some(LONGITUDES));
    assert_eq!(report.control_points.len(), 16);
}

#[test]
fn test_duplicate_vertices_survive_median_threshold() {
    let sphere = uv_sphere(SPHERE_RADIUS);
    let doubled: Vec<Point3> = sphere.points.iter().flat_map(|&p| [p, p]).collect();
    let mesh = SurfaceMesh::from_points(doubled);

    let settings = PlannerSettings {
        jump_threshold: JumpThreshold::MedianSpacing(5.0),
        ..PlannerSettings::default()
    };
    let planner = ResectionPlanner::new(settings).unwrap();
    let report = planner
        .reconstruct(SurfaceInput::Band {
            mesh: &mesh,
            seed: pole(),
            radius: 5.0,
        })
        .unwrap();

    assert_eq!(report.band_size, Some(2 * LONGITUDES));
    assert!(report.truncation.is_none(), "{:?}", report.truncation);
    assert_eq!(report.retained_points, Some(LONGITUDES));
    assert_eq!(report.control_points.len(), 16);
    assert!(report.control_points.is_finite());
}

#[test]
fn test_curve_and_band_agree_on_shape() {
    let mesh = uv_sphere(SPHERE_RADIUS);
    let planner = ResectionPlanner::new(PlannerSettings::default()).unwrap();
    let band = planner
        .reconstruct(SurfaceInput::Band {
            mesh: &mesh,
            seed: pole(),
            radius: 5.0,
        })
        .unwrap();

    let ring: Vec<Point3> = mesh.points[29 * LONGITUDES..30 * LONGITUDES].to_vec();
    let curve = planner
        .reconstruct(SurfaceInput::Curve { points: &ring })
        .unwrap();

    assert_eq!(curve.kind, InputKind::Curve);
    assert_eq!(curve.grid_size, band.grid_size);
    let rel = (curve.ring_length - band.ring_length).abs() / curve.ring_length;
    assert!(rel < 0.05, "ring lengths differ by {rel}");
}

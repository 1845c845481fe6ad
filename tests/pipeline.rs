//! End-to-end CPU pipeline: text → points → curve → tube + markers →
//! composed scene.

use glam::Vec3;
use strandview::geometry::{BackboneCurve, MarkerSet, TubeMesh};
use strandview::options::Options;
use strandview::parser::parse_backbone;
use strandview::scene::Scene;
use strandview::session::{LoadState, StructureSource, ViewerSession};

const STRAIGHT_CHAIN: &str = "\
HEADER    TEST STRUCTURE
ATOM      1  N   ALA A   1      -1.000   0.000   0.000  1.00  0.00           N
ATOM      2  CA  ALA A   1       0.000   0.000   0.000  1.00  0.00           C
ATOM      3  CB  ALA A   1       0.500   1.000   0.000  1.00  0.00           C
ATOM      4  CA  ALA A   2       1.000   0.000   0.000  1.00  0.00           C
ATOM      5  CA  ALA A   3       2.000   0.000   0.000  1.00  0.00           C
TER
END";

#[test]
fn straight_chain_end_to_end() {
    // Parse: exactly the three CA rows, in file order.
    let points = parse_backbone(STRAIGHT_CHAIN);
    assert_eq!(
        points,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(2.0, 0.0, 0.0),
        ]
    );

    // Curve construction succeeds for the straight path.
    let curve = BackboneCurve::new(&points).expect("3 points make a curve");

    // Tube: 3 points × 4 = 12 ring cross-sections.
    let options = Options::default();
    let tube = TubeMesh::sweep(&curve, &options.geometry);
    assert_eq!(tube.ring_count, 12);
    assert_eq!(
        tube.vertices.len(),
        12 * options.geometry.tube_radial_segments as usize
    );

    // Markers: exactly one sphere per input coordinate.
    let markers = MarkerSet::for_points(&points, options.geometry.marker_radius);
    assert_eq!(markers.len(), 3);
    for (center, point) in markers.centers().iter().zip(&points) {
        assert_eq!(center, point);
    }
}

#[test]
fn composed_scene_preserves_marker_spacing_and_centers() {
    let points = parse_backbone(STRAIGHT_CHAIN);
    let scene = Scene::compose(&points, &Options::default());
    assert!(scene.is_renderable());

    // Centering shifts everything uniformly: marker spacing survives.
    let centers = scene.markers.centers();
    assert_eq!(centers.len(), 3);
    assert!(((centers[1] - centers[0]).length() - 1.0).abs() < 1e-4);
    assert!(((centers[2] - centers[1]).length() - 1.0).abs() < 1e-4);

    // And the combined bounding box is centered at the origin.
    let (min, max) = scene.bounds().expect("renderable scene has bounds");
    assert!(((min + max) * 0.5).length() < 1e-3);
}

#[test]
fn session_drives_the_same_pipeline() {
    let mut session = ViewerSession::new();
    session.set_source(StructureSource::Inline(STRAIGHT_CHAIN.to_owned()));

    let LoadState::Ready(points) = session.state() else {
        panic!("inline source should be ready immediately");
    };
    assert_eq!(points.len(), 3);

    let scene = Scene::compose(points, &Options::default());
    assert_eq!(scene.tube.ring_count, 12);
    assert_eq!(scene.markers.len(), 3);
}

#[test]
fn single_point_structure_renders_nothing() {
    let text = "ATOM      1  CA  ALA A   1       5.000   5.000   5.000  1.00  0.00           C";
    let points = parse_backbone(text);
    assert_eq!(points.len(), 1);
    assert!(BackboneCurve::new(&points).is_none());

    let scene = Scene::compose(&points, &Options::default());
    assert!(!scene.is_renderable());
}

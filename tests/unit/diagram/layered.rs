use super::*;
use crate::scene::model::Shape;

fn overview() -> (LayeredOverview, Scene) {
    let mut d = LayeredOverview::new(DiagramId::from("overall-graph"));
    let mut scene = Scene::new("overall-graph", WIDTH, HEIGHT);
    d.render(&mut scene);
    (d, scene)
}

#[test]
fn overview_draws_planes_rings_and_cross_edges() {
    let (_, scene) = overview();
    assert_eq!(scene.elements().filter(|e| e.class == "plane").count(), 3);
    assert_eq!(scene.elements().filter(|e| e.class == "cross-edge").count(), 16);

    // Patient-002 hub sits at the second ring center on the EHR plane.
    let Shape::Circle { center } = scene.get("node-p2").unwrap().shape else {
        panic!("node is not a circle");
    };
    assert_eq!(center, Point::new(400.0, 120.0));
    let Shape::Circle { center } = scene.get("node-p2-chf").unwrap().shape else {
        panic!("node is not a circle");
    };
    assert!((center.x - 428.0).abs() < 1e-9);

    let Shape::Circle { center } = scene.get("node-umls-hba1c").unwrap().shape else {
        panic!("node is not a circle");
    };
    assert_eq!(center, Point::new(120.0 + 90.0 * 4.0, 480.0));
}

#[test]
fn focus_dims_other_layers_and_clears() {
    let (mut d, mut scene) = overview();
    d.focus_layer(&mut scene, Some("papers")).unwrap();
    assert_eq!(d.focused(), Some("papers"));
    assert_eq!(scene.state("node-paper1").unwrap().opacity, 1.0);
    assert_eq!(scene.state("node-p1").unwrap().opacity, DIMMED);
    assert_eq!(scene.state("plane-papers").unwrap().opacity, 0.18);
    assert_eq!(scene.state("plane-ehr").unwrap().opacity, 0.05);

    d.focus_layer(&mut scene, None).unwrap();
    assert_eq!(scene.state("node-p1").unwrap().opacity, 1.0);
    assert_eq!(scene.state("edge-p1-p1-diabetes").unwrap().opacity, EDGE_OPACITY);
    assert_eq!(scene.state("plane-ehr").unwrap().opacity, PLANE_OPACITY);

    assert!(d.focus_layer(&mut scene, Some("nope")).is_err());
}

#[test]
fn hovering_a_plane_focuses_its_layer() {
    let (mut d, mut scene) = overview();
    d.hover(&mut scene, "plane-dict");
    assert_eq!(d.focused(), Some("dict"));
    d.unhover(&mut scene, "plane-dict");
    assert_eq!(d.focused(), None);
}

#[test]
fn zoom_then_back() {
    let (mut d, mut scene) = overview();
    d.interact(
        &mut scene,
        &LayerAction::Zoom {
            layer: "ehr".into(),
        },
    )
    .unwrap();
    assert_eq!(d.mode(), Mode::Zoomed(0));
    assert!(scene.contains("back"));
    assert!(!scene.contains("node-paper1"));
    assert_eq!(scene.get("node-p1").unwrap().state.radius, 16.0);
    assert!(scene.contains("node-label-p1"));
    assert!(d.focus_layer(&mut scene, Some("ehr")).is_err());

    d.interact(&mut scene, &LayerAction::Back).unwrap();
    assert_eq!(d.mode(), Mode::Overview);
    assert!(!scene.contains("back"));
    assert_eq!(scene.get("node-p1").unwrap().state.radius, 10.0);
}

#[test]
fn teardown_leaves_an_empty_resting_overview() {
    let (mut d, mut scene) = overview();
    d.interact(
        &mut scene,
        &LayerAction::Zoom {
            layer: "ehr".into(),
        },
    )
    .unwrap();
    d.teardown(&mut scene);
    assert_eq!(d.mode(), Mode::Overview);
    assert_eq!(d.focused(), None);
    assert_eq!(scene.elements().count(), 0);
}

#[test]
fn node_tooltip_includes_context_when_present() {
    let (d, scene) = overview();
    let tip = d.tooltip(&scene, "node-umls-bnp").unwrap();
    assert_eq!(tip.rows.len(), 2);
    let tip = d.tooltip(&scene, "node-p1-metformin").unwrap();
    assert_eq!(tip.rows, vec![("Type".to_string(), "medication".to_string())]);
}

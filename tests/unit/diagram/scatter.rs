use super::*;
use crate::foundation::core::StepIndex;
use crate::scene::model::Shape;

fn rendered() -> (VectorScatter, Scene) {
    let mut d = VectorScatter::new(DiagramId::from("embeddings-viz"));
    let mut scene = Scene::new("embeddings-viz", WIDTH, HEIGHT);
    d.render(&mut scene);
    (d, scene)
}

#[test]
fn points_map_into_the_inner_plot() {
    let (d, scene) = rendered();
    let terms: Vec<_> = scene.elements().filter(|e| e.class == "term").collect();
    assert_eq!(terms.len(), SCATTER_TERMS.len());

    let diabetes = &SCATTER_TERMS[0];
    let at = d.position(diabetes);
    assert!((at.x - (40.0 + 0.2 * 720.0)).abs() < 1e-9);
    assert!((at.y - (40.0 + 0.7 * 420.0)).abs() < 1e-9);

    // Radius follows similarity between 4 and 12.
    let cooking = scene.get("term-cooking").unwrap();
    assert_eq!(cooking.state.radius, 4.0);
    assert_eq!(scene.get("term-diabetes").unwrap().state.radius, 12.0);
}

#[test]
fn only_clusters_with_more_than_two_points_get_an_ellipse() {
    let (_, scene) = rendered();
    let clusters: Vec<_> = scene.elements().filter(|e| e.class == "cluster").collect();
    assert_eq!(clusters.len(), 4);
    let Shape::Ellipse { rx, .. } = &scene.get("cluster-respiratory").unwrap().shape else {
        panic!("cluster is not an ellipse");
    };
    // Asthma/Lungs/Breathing span 0.65..0.72 on x.
    assert!((rx - 0.07 * 720.0 * 0.8).abs() < 1e-6);
}

#[test]
fn hover_emphasis_round_trips() {
    let (mut d, mut scene) = rendered();
    d.hover(&mut scene, "term-insulin");
    let st = scene.state("term-insulin").unwrap();
    assert_eq!((st.stroke_width, st.opacity), (3.0, 1.0));
    d.unhover(&mut scene, "term-insulin");
    let st = scene.state("term-insulin").unwrap();
    assert_eq!((st.stroke_width, st.opacity), (1.0, 0.8));

    // Hovering a label or an unknown id changes nothing.
    d.hover(&mut scene, "title");
    d.hover(&mut scene, "nope");
    assert_eq!(scene.state("title").unwrap().opacity, 1.0);
}

#[test]
fn tooltip_lists_category_and_similarity() {
    let (d, scene) = rendered();
    let tip = d.tooltip(&scene, "term-car-engine").unwrap();
    assert_eq!(tip.title, "Car Engine");
    assert!(tip.rows.contains(&("Category".to_string(), "mechanical".to_string())));
    assert!(tip.rows.contains(&("Similarity".to_string(), "0.10".to_string())));
    assert!(d.reveal_plan(StepIndex(0)).is_none());
}

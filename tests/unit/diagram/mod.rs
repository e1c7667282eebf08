use super::*;

#[test]
fn linear_scale_maps_and_inverts_ranges() {
    let x = LinearScale::new((0.0, 1.0), (0.0, 720.0));
    assert_eq!(x.apply(0.5), 360.0);
    let y = LinearScale::new((0.0, 1.0), (420.0, 0.0));
    assert_eq!(y.apply(0.0), 420.0);
    assert_eq!(y.apply(1.0), 0.0);
    let flat = LinearScale::new((2.0, 2.0), (4.0, 12.0));
    assert_eq!(flat.apply(9.0), 4.0);
}

#[test]
fn every_kind_builds_a_renderer_with_its_own_id() {
    let kinds = [
        DiagramKind::VectorScatter,
        DiagramKind::RagPipeline,
        DiagramKind::KnowledgeGraph,
        DiagramKind::EntityExtraction,
        DiagramKind::TagTree,
        DiagramKind::QaWalk,
        DiagramKind::LayeredOverview,
    ];
    for kind in kinds {
        let mut d = kind.build("viz");
        assert_eq!(d.kind(), kind);
        assert_eq!(d.id().as_str(), "viz");
        let (w, h) = d.size();
        let mut scene = Scene::new("viz", w, h);
        d.render(&mut scene);
        assert!(!scene.is_empty(), "{kind:?} drew nothing");
        d.teardown(&mut scene);
        assert!(scene.is_empty());
    }
}

#[test]
fn layer_actions_are_rejected_by_flat_diagrams() {
    let mut d = DiagramKind::VectorScatter.build("embeddings-viz");
    let mut scene = Scene::new("embeddings-viz", 800.0, 500.0);
    let err = d.interact(&mut scene, &LayerAction::Back).unwrap_err();
    assert!(matches!(err, StoryError::Validation(_)));
}

#[test]
fn kinds_use_snake_case_names() {
    let json = serde_json::to_string(&DiagramKind::LayeredOverview).unwrap();
    assert_eq!(json, "\"layered_overview\"");
    let back: DiagramKind = serde_json::from_str("\"qa_walk\"").unwrap();
    assert_eq!(back, DiagramKind::QaWalk);
}

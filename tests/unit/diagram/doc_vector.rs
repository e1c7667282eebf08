use super::*;

fn pipeline() -> (RagPipeline, Scene) {
    let mut d = RagPipeline::new(DiagramId::from("rag-viz"));
    let mut scene = Scene::new("rag-viz", WIDTH, HEIGHT);
    d.render(&mut scene);
    (d, scene)
}

#[test]
fn content_starts_hidden_except_the_vector_space() {
    let (_, scene) = pipeline();
    for id in ["title", "chunk1", "chunk2-text", "query", "chunk3-vec", "query-star"] {
        assert_eq!(scene.state(id).unwrap().opacity, 0.0, "{id}");
    }
    assert_eq!(scene.state("vector-space").unwrap().opacity, 1.0);
    assert_eq!(scene.state("chunk1-vec").unwrap().transform.scale, 0.0);
}

#[test]
fn holds_chain_to_the_last_step() {
    let (d, _) = pipeline();
    let holds: Vec<Option<Millis>> = (0..STEP_COUNT)
        .map(|i| d.reveal_plan(StepIndex(i)).unwrap().hold)
        .collect();
    assert_eq!(holds[0], Some(Millis(2500)));
    assert!(holds[1..5].iter().all(|h| *h == Some(Millis(2500))));
    assert_eq!(holds[5], None);
    assert!(d.reveal_plan(StepIndex(STEP_COUNT)).is_none());
}

#[test]
fn every_step_finishes_before_its_hold() {
    let (d, _) = pipeline();
    for i in 0..STEP_COUNT {
        let plan = d.reveal_plan(StepIndex(i)).unwrap();
        plan.validate().unwrap();
        if let Some(hold) = plan.hold {
            assert!(plan.span() <= hold, "step {i} overruns its hold");
        }
    }
}

#[test]
fn first_step_waits_for_the_start_delay() {
    let (d, _) = pipeline();
    let plan = d.reveal_plan(StepIndex(0)).unwrap();
    assert!(plan.actions.iter().all(|a| a.delay == START_DELAY));
}

#[test]
fn chunks_fly_to_their_vector_position() {
    let (d, scene) = pipeline();
    let plan = d.reveal_plan(StepIndex(2)).unwrap();
    let target = d.vector_point(&PIPELINE_CHUNKS[0]);
    let mv = plan
        .actions
        .iter()
        .find(|a| a.target.as_str() == "chunk1" && matches!(a.kind, crate::animation::reveal::RevealKind::MoveTo { .. }))
        .unwrap();
    assert_eq!(
        mv.kind.target_state(scene.state("chunk1").unwrap()).transform.translate,
        target.to_vec2()
    );
    // (0.2, 0.3) in a 350px space offset by the vector area and the group origin.
    assert_eq!(target, Point::new(20.0 + 600.0 + 70.0, 20.0 + 245.0));
}

#[test]
fn last_step_highlights_the_retrieved_chunk() {
    let (d, scene) = pipeline();
    let plan = d.reveal_plan(StepIndex(5)).unwrap();
    assert_eq!(plan.actions.len(), 1);
    assert_eq!(plan.actions[0].target.as_str(), "chunk2-vec");
    let to = plan.actions[0]
        .kind
        .target_state(scene.state("chunk2-vec").unwrap());
    assert_eq!((to.radius, to.stroke_width), (12.0, 4.0));
}

#[test]
fn vector_tooltip_truncates_the_chunk_text() {
    let (d, scene) = pipeline();
    let tip = d.tooltip(&scene, "chunk1-vec").unwrap();
    assert_eq!(tip.title, "DEFINITION");
    let text = &tip.rows[0].1;
    assert!(text.ends_with("..."));
    assert_eq!(text.chars().count(), 103);
    assert_eq!(d.controls(), &[Control::PauseResume, Control::Restart]);
}

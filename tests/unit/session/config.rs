use super::*;

#[test]
fn article_config_validates() {
    let config = StoryConfig::article();
    config.validate().unwrap();
    assert_eq!(config.sections.len(), 11);
    assert_eq!(config.diagrams.len(), 7);
}

#[test]
fn article_slide_counts_match_the_page() {
    let registry = StoryConfig::article().registry().unwrap();
    let counts: Vec<(String, usize)> = registry
        .sections()
        .filter(|s| s.id.as_str() != "rag-pipeline")
        .map(|s| (s.id.to_string(), s.steps))
        .collect();
    let expected = [3, 4, 3, 4, 5, 4, 4, 4, 3, 3];
    assert_eq!(counts.iter().map(|(_, n)| *n).collect::<Vec<_>>(), expected);
    assert_eq!(counts[0].0, "embeddings");
    assert_eq!(counts[9].0, "graph-construction");
}

#[test]
fn graph_construction_override_is_data() {
    let config = StoryConfig::article();
    let gc = config.section("graph-construction").unwrap();
    assert_eq!(gc.visible_indicators, Some(3));
    assert_eq!(
        gc.redirect_on_last_next.as_ref().map(SectionId::as_str),
        Some("overall-graph-structure")
    );
    assert!(!config.section("rag-pipeline").unwrap().slides);
}

#[test]
fn landmarks_are_stacked_in_document_order() {
    let config = StoryConfig::article();
    for pair in config.landmarks.windows(2) {
        assert_eq!(pair[0].top + pair[0].height, pair[1].top);
    }
    let ids: Vec<&str> = config.landmarks.iter().map(|l| l.id.as_str()).collect();
    let pos = |id: &str| ids.iter().position(|x| *x == id).unwrap();
    assert!(pos("graph-construction") < pos("overall-graph-structure"));
    assert!(pos("overall-graph-structure") < pos("graph-tagging"));
    assert!(pos("graph-tagging") < pos("question-answering"));
}

#[test]
fn pipeline_diagram_is_driven_by_its_section() {
    let config = StoryConfig::article();
    assert_eq!(
        config.driving_section("rag-viz").map(SectionId::as_str),
        Some("rag-pipeline")
    );
    assert_eq!(config.driving_section("qa-graph"), None);
}

#[test]
fn json_round_trip_keeps_the_article() {
    let config = StoryConfig::article();
    let json = serde_json::to_string(&config).unwrap();
    let back = StoryConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(back, config);
}

#[test]
fn minimal_json_fills_defaults() {
    let json = r#"{ "sections": [ { "id": "intro", "steps": 2 } ] }"#;
    let config = StoryConfig::from_reader(json.as_bytes()).unwrap();
    assert!(config.sections[0].slides);
    assert!(config.landmarks.is_empty());
    assert_eq!(config.trigger, TriggerOpts::default());
}

#[test]
fn binding_with_unknown_diagram_is_rejected() {
    let mut config = StoryConfig::article();
    config
        .bindings
        .push(Binding::new(Trigger::Startup, "missing-viz"));
    assert!(matches!(
        config.validate(),
        Err(StoryError::UnknownDiagram(d)) if d == "missing-viz"
    ));
}

#[test]
fn binding_with_unknown_landmark_is_rejected() {
    let mut config = StoryConfig::article();
    config.bindings.push(Binding::new(
        Trigger::LandmarkEntered {
            landmark: SectionId::from("nowhere"),
        },
        "tag-graph",
    ));
    assert!(matches!(config.validate(), Err(StoryError::Validation(_))));
}

#[test]
fn step_shown_past_the_last_step_is_rejected() {
    let mut config = StoryConfig::article();
    config.bindings.push(Binding::new(
        Trigger::StepShown {
            section: SectionId::from("embeddings"),
            step: 3,
        },
        "embeddings-viz",
    ));
    assert!(matches!(
        config.validate(),
        Err(StoryError::OutOfRange { index: 3, count: 3, .. })
    ));
}

#[test]
fn redirect_to_unknown_target_is_rejected() {
    let mut config = StoryConfig::article();
    config.sections[0].redirect_on_last_next = Some(SectionId::from("nowhere"));
    assert!(matches!(config.validate(), Err(StoryError::Validation(_))));
}

#[test]
fn duplicate_diagrams_are_rejected() {
    let mut config = StoryConfig::article();
    let first = config.diagrams[0].clone();
    config.diagrams.push(first);
    assert!(matches!(config.validate(), Err(StoryError::Validation(_))));
}

#[test]
fn empty_section_is_rejected() {
    let json = r#"{ "sections": [ { "id": "intro", "steps": 0 } ] }"#;
    assert!(matches!(
        StoryConfig::from_reader(json.as_bytes()),
        Err(StoryError::Validation(_))
    ));
}

#[test]
fn malformed_json_is_a_serde_error() {
    assert!(matches!(
        StoryConfig::from_reader("{ not json".as_bytes()),
        Err(StoryError::Serde(_))
    ));
}

use super::*;
use crate::diagram::data::SCATTER_TERMS;
use crate::diagram::scatter::term_element;
use crate::foundation::ids::ElementId;

fn session() -> StorySession {
    StorySession::new(StoryConfig::article(), StepDom::new()).unwrap()
}

fn started() -> StorySession {
    let mut s = session();
    s.handle(Input::Tick, Millis(0));
    s
}

fn sec(id: &str) -> SectionId {
    SectionId::from(id)
}

fn dia(id: &str) -> DiagramId {
    DiagramId::from(id)
}

fn steps_of(events: &[StoryEvent], section: &str) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            StoryEvent::Step(c) if c.section.as_str() == section => Some(c.new.0),
            _ => None,
        })
        .collect()
}

fn rendered(events: &[StoryEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            StoryEvent::Rendered { diagram } => Some(diagram.as_str()),
            _ => None,
        })
        .collect()
}

fn warnings(events: &[StoryEvent]) -> Vec<&str> {
    events
        .iter()
        .filter_map(|e| match e {
            StoryEvent::Warning { message } => Some(message.as_str()),
            _ => None,
        })
        .collect()
}

#[test]
fn new_shows_the_first_slide_of_every_section() {
    let s = session();
    assert_eq!(s.view().visible_containers("embeddings"), vec!["embeddings-1"]);
    assert_eq!(
        s.view().visible_containers("external-tools"),
        vec!["external-tools-1"]
    );
    assert!(s.view().visible_containers("rag-pipeline").is_empty());
    assert!(s.scene("embeddings-viz").unwrap().is_empty());
}

#[test]
fn first_input_runs_startup_bindings_once() {
    let mut s = session();
    let events = s.handle(Input::Tick, Millis(0));
    assert_eq!(
        rendered(&events),
        vec!["embeddings-viz", "rag-viz", "knowledge-graph-viz"]
    );
    assert!(events.iter().any(|e| matches!(
        e,
        StoryEvent::RunStarted { diagram, step: StepIndex(0), .. } if diagram.as_str() == "rag-viz"
    )));
    assert!(!s.scene("knowledge-graph-viz").unwrap().is_empty());

    let again = s.handle(Input::Tick, Millis(10));
    assert!(rendered(&again).is_empty());
    assert!(s.start(Millis(20)).is_empty());
}

#[test]
fn pipeline_auto_advances_to_its_last_step_and_stops() {
    let mut s = started();
    let events = s.handle(Input::Tick, Millis(12_499));
    assert_eq!(steps_of(&events, "rag-pipeline"), vec![1, 2, 3, 4]);

    let events = s.handle(Input::Tick, Millis(12_500));
    assert_eq!(steps_of(&events, "rag-pipeline"), vec![5]);

    let events = s.handle(Input::Tick, Millis(60_000));
    assert!(steps_of(&events, "rag-pipeline").is_empty());
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(5));
}

#[test]
fn pipeline_runs_start_at_the_hold_due_time() {
    let mut s = started();
    let events = s.handle(Input::Tick, Millis(6_000));
    let starts: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            StoryEvent::RunStarted { step, .. } => Some(step.0),
            _ => None,
        })
        .collect();
    assert_eq!(starts, vec![1, 2]);
    let run = s.animator().run_for("rag-viz").unwrap();
    assert_eq!(run.started_at, Millis(5_000));
}

#[test]
fn pausing_the_pipeline_stops_auto_advance() {
    let mut s = started();
    let events = s.handle(Input::Pause { diagram: dia("rag-viz") }, Millis(2_000));
    assert!(events.contains(&StoryEvent::Paused { diagram: dia("rag-viz") }));

    s.handle(Input::Tick, Millis(20_000));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(0));

    let events = s.handle(Input::Resume { diagram: dia("rag-viz") }, Millis(20_000));
    assert!(events.contains(&StoryEvent::Resumed { diagram: dia("rag-viz") }));
    s.handle(Input::Tick, Millis(20_499));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(0));
    s.handle(Input::Tick, Millis(20_500));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(1));
}

#[test]
fn restarting_the_pipeline_rewinds_its_section() {
    let mut s = started();
    s.handle(Input::Tick, Millis(6_000));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(2));

    let events = s.handle(Input::Restart { diagram: dia("rag-viz") }, Millis(6_000));
    assert_eq!(steps_of(&events, "rag-pipeline"), vec![0]);
    assert_eq!(rendered(&events), vec!["rag-viz"]);
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(0));

    s.handle(Input::Tick, Millis(8_500));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(1));
}

#[test]
fn play_after_the_pipeline_finishes_starts_it_over() {
    let mut s = started();
    s.handle(Input::Tick, Millis(20_000));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(5));
    assert!(s.animator().run_for("rag-viz").unwrap().is_finished());

    let events = s.handle(Input::Play { diagram: dia("rag-viz") }, Millis(20_000));
    assert_eq!(steps_of(&events, "rag-pipeline"), vec![0]);
    assert_eq!(rendered(&events), vec!["rag-viz"]);
    assert!(events.iter().any(|e| matches!(
        e,
        StoryEvent::RunStarted { step: StepIndex(0), .. }
    )));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(0));

    s.handle(Input::Tick, Millis(22_500));
    assert_eq!(s.current_step("rag-pipeline").unwrap(), StepIndex(1));
}

#[test]
fn third_construction_slide_animates_entity_extraction() {
    let mut s = started();
    let events = s.handle(
        Input::Jump {
            section: sec("graph-construction"),
            index: 2,
        },
        Millis(100),
    );
    assert_eq!(steps_of(&events, "graph-construction"), vec![2]);
    assert_eq!(rendered(&events), vec!["entity-graph"]);
    assert_eq!(
        s.view().visible_containers("graph-construction"),
        vec!["graph-construction-3"]
    );

    s.handle(Input::Tick, Millis(100 + 3_700));
    let scene = s.scene("entity-graph").unwrap();
    assert_eq!(scene.state("entity-covid19").unwrap().opacity, 1.0);
}

#[test]
fn next_on_last_construction_slide_redirects_to_overview() {
    let mut s = started();
    s.handle(
        Input::Jump {
            section: sec("graph-construction"),
            index: 2,
        },
        Millis(0),
    );
    let events = s.handle(
        Input::Next {
            section: sec("graph-construction"),
        },
        Millis(10),
    );
    assert!(events.contains(&StoryEvent::Redirected {
        section: sec("graph-construction"),
        at: StepIndex(2),
        target: sec("overall-graph-structure"),
    }));
    assert_eq!(rendered(&events), vec!["overall-graph"]);
    assert_eq!(s.current_step("graph-construction").unwrap(), StepIndex(2));
    assert!(s.view().visible_containers("graph-construction").is_empty());
    assert_eq!(
        s.view().shown_section().map(SectionId::as_str),
        Some("overall-graph-structure")
    );
    assert!(s.scene("overall-graph").unwrap().contains("plane-ehr"));
}

#[test]
fn navigation_errors_become_warnings() {
    let mut s = started();
    let events = s.handle(Input::Next { section: sec("nope") }, Millis(0));
    assert_eq!(warnings(&events), vec!["unknown section: nope"]);

    let events = s.handle(
        Input::Jump {
            section: sec("embeddings"),
            index: 7,
        },
        Millis(0),
    );
    assert_eq!(warnings(&events).len(), 1);
    assert_eq!(s.current_step("embeddings").unwrap(), StepIndex(0));

    let events = s.handle(Input::Pause { diagram: dia("tag-graph") }, Millis(0));
    assert_eq!(warnings(&events).len(), 1);
}

#[test]
fn boundary_navigation_is_held() {
    let mut s = started();
    let events = s.handle(Input::Prev { section: sec("embeddings") }, Millis(0));
    assert_eq!(
        events,
        vec![StoryEvent::Held {
            section: sec("embeddings"),
            step: StepIndex(0)
        }]
    );
}

#[test]
fn hover_reports_the_tooltip() {
    let mut s = started();
    let term = SCATTER_TERMS[0].term;
    let element = ElementId::from(term_element(term));
    let events = s.handle(
        Input::Hover {
            diagram: dia("embeddings-viz"),
            element: element.clone(),
        },
        Millis(0),
    );
    match events.as_slice() {
        [StoryEvent::Tooltip { tooltip, .. }] => assert_eq!(tooltip.title, term),
        other => panic!("unexpected events: {other:?}"),
    }
    let scene = s.scene("embeddings-viz").unwrap();
    assert_eq!(scene.state(element.as_str()).unwrap().stroke_width, 3.0);

    let events = s.handle(
        Input::Unhover {
            diagram: dia("embeddings-viz"),
            element,
        },
        Millis(0),
    );
    assert!(matches!(events.as_slice(), [StoryEvent::TooltipHidden { .. }]));
}

#[test]
fn scrolling_into_a_landmark_renders_its_diagram() {
    let mut s = started();
    // Trigger line sits at y + 400 with the default viewport.
    let tagging = s
        .trigger()
        .landmarks()
        .iter()
        .find(|l| l.id.as_str() == "graph-tagging")
        .unwrap()
        .top;
    s.handle(Input::Scroll { y: tagging - 390.0 }, Millis(0));
    let events = s.handle(Input::Frame, Millis(16));
    assert!(matches!(
        events.first(),
        Some(StoryEvent::Landmark(TriggerEvent::SectionEntered { id, .. })) if id.as_str() == "graph-tagging"
    ));
    assert_eq!(rendered(&events), vec!["tag-graph"]);
    assert_eq!(
        s.snapshot().active_landmark.map(SectionId::as_str),
        Some("graph-tagging")
    );

    assert!(s.handle(Input::Frame, Millis(32)).is_empty());
}

#[test]
fn qa_walk_plays_once_and_resets() {
    let mut s = started();
    let qa = s
        .trigger()
        .landmarks()
        .iter()
        .find(|l| l.id.as_str() == "question-answering")
        .unwrap()
        .top;
    s.handle(Input::Scroll { y: qa - 390.0 }, Millis(0));
    let events = s.handle(Input::Frame, Millis(0));
    assert_eq!(rendered(&events), vec!["qa-graph"]);
    assert!(s.animator().run_for("qa-graph").is_none());

    let events = s.handle(Input::Play { diagram: dia("qa-graph") }, Millis(100));
    assert!(events.iter().any(|e| matches!(e, StoryEvent::RunStarted { .. })));
    let again = s.handle(Input::Play { diagram: dia("qa-graph") }, Millis(200));
    assert!(!again.iter().any(|e| matches!(e, StoryEvent::RunStarted { .. })));

    let events = s.handle(Input::Reset { diagram: dia("qa-graph") }, Millis(300));
    assert_eq!(rendered(&events), vec!["qa-graph"]);
    assert!(s.animator().run_for("qa-graph").is_none());
}

#[test]
fn layer_controls_reach_the_overview() {
    let mut s = started();
    s.handle(
        Input::Jump {
            section: sec("graph-construction"),
            index: 2,
        },
        Millis(0),
    );
    s.handle(
        Input::Next {
            section: sec("graph-construction"),
        },
        Millis(0),
    );

    let events = s.handle(
        Input::FocusLayer {
            diagram: dia("overall-graph"),
            layer: Some("papers".to_string()),
        },
        Millis(0),
    );
    assert!(matches!(events.as_slice(), [StoryEvent::LayerChanged { .. }]));
    let scene = s.scene("overall-graph").unwrap();
    assert_eq!(scene.state("plane-papers").unwrap().opacity, 0.18);
    assert_eq!(scene.state("plane-ehr").unwrap().opacity, 0.05);

    s.handle(
        Input::ZoomLayer {
            diagram: dia("overall-graph"),
            layer: "dict".to_string(),
        },
        Millis(0),
    );
    assert!(s.scene("overall-graph").unwrap().contains("back"));
    s.handle(Input::Back { diagram: dia("overall-graph") }, Millis(0));
    assert!(!s.scene("overall-graph").unwrap().contains("back"));

    let events = s.handle(Input::Back { diagram: dia("embeddings-viz") }, Millis(0));
    assert_eq!(warnings(&events).len(), 1);
}

#[test]
fn reset_returns_a_zoomed_overview_to_rest() {
    let mut s = started();
    s.handle(
        Input::Jump {
            section: sec("graph-construction"),
            index: 2,
        },
        Millis(0),
    );
    s.handle(
        Input::Next {
            section: sec("graph-construction"),
        },
        Millis(0),
    );
    s.handle(
        Input::ZoomLayer {
            diagram: dia("overall-graph"),
            layer: "dict".to_string(),
        },
        Millis(0),
    );
    assert!(s.scene("overall-graph").unwrap().contains("back"));

    let events = s.handle(Input::Reset { diagram: dia("overall-graph") }, Millis(0));
    assert_eq!(rendered(&events), vec!["overall-graph"]);
    let scene = s.scene("overall-graph").unwrap();
    assert!(!scene.contains("back"));
    assert!(scene.contains("plane-papers"));

    let events = s.handle(
        Input::FocusLayer {
            diagram: dia("overall-graph"),
            layer: Some("ehr".to_string()),
        },
        Millis(0),
    );
    assert!(matches!(events.as_slice(), [StoryEvent::LayerChanged { .. }]));
}

#[test]
fn clock_never_runs_backwards() {
    let mut s = started();
    s.handle(Input::Tick, Millis(5_000));
    s.handle(Input::Tick, Millis(100));
    assert_eq!(s.now(), Millis(5_000));
}

#[test]
fn snapshot_serializes_steps_view_and_scenes() {
    let mut s = started();
    s.handle(Input::Next { section: sec("embeddings") }, Millis(0));
    let v = serde_json::to_value(s.snapshot()).unwrap();
    assert_eq!(v["steps"]["embeddings"], 1);
    assert!(v["scenes"]["embeddings-viz"].is_object());
    assert!(v["view"].is_object());
}

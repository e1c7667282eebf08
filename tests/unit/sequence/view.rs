use super::*;

fn sync(step: usize) -> StepSync {
    StepSync {
        section: SectionId::from("graph-construction"),
        step: StepIndex(step),
        count: 3,
        visible_indicators: 3,
    }
}

#[test]
fn container_ids_are_one_based() {
    assert_eq!(container_id("embeddings", StepIndex(0)), "embeddings-1");
    assert_eq!(container_id("external-tools", StepIndex(4)), "external-tools-5");
}

#[test]
fn sync_shows_exactly_one_container() {
    let mut dom = StepDom::new();
    dom.sync_step(&sync(0));
    dom.sync_step(&sync(2));
    assert_eq!(dom.visible_containers("graph-construction"), vec!["graph-construction-3"]);
    assert!(!dom.is_visible("graph-construction-1"));
}

#[test]
fn indicators_and_nav_follow_the_step() {
    let mut dom = StepDom::new();
    dom.sync_step(&sync(0));
    assert_eq!(
        dom.indicators("graph-construction"),
        &[Indicator::Active, Indicator::Inactive, Indicator::Inactive]
    );
    assert_eq!(
        dom.nav("graph-construction"),
        Some(NavState {
            prev_disabled: true,
            next_disabled: false
        })
    );

    dom.sync_step(&sync(2));
    let nav = dom.nav("graph-construction").unwrap();
    assert!(!nav.prev_disabled);
    assert!(nav.next_disabled);
}

#[test]
fn indicators_past_the_cap_are_hidden() {
    let mut dom = StepDom::new();
    dom.sync_step(&StepSync {
        section: SectionId::from("demo"),
        step: StepIndex(1),
        count: 4,
        visible_indicators: 2,
    });
    assert_eq!(
        dom.indicators("demo"),
        &[
            Indicator::Inactive,
            Indicator::Active,
            Indicator::Hidden,
            Indicator::Hidden
        ]
    );
}

#[test]
fn hide_section_hides_all_containers() {
    let mut dom = StepDom::new();
    dom.sync_step(&sync(1));
    dom.hide_section(&SectionId::from("graph-construction"), 3);
    assert!(dom.visible_containers("graph-construction").is_empty());
    dom.show_section(&SectionId::from("overall-graph-structure"));
    assert_eq!(dom.shown_section().map(SectionId::as_str), Some("overall-graph-structure"));
}

use super::*;

#[test]
fn push_keeps_delay_order_and_is_stable() {
    let plan = RevealPlan::new()
        .with(RevealAction::fade_in("c").delay(600))
        .with(RevealAction::fade_in("a").delay(0))
        .with(RevealAction::fade_in("b1").delay(300))
        .with(RevealAction::scale("b2", 1.0).delay(300));
    let order: Vec<&str> = plan.actions.iter().map(|a| a.target.as_str()).collect();
    assert_eq!(order, vec!["a", "b1", "b2", "c"]);
    assert!(plan.validate().is_ok());
}

#[test]
fn validate_rejects_unsorted_and_bad_scale() {
    let plan = RevealPlan {
        actions: vec![
            RevealAction::fade_in("late").delay(500),
            RevealAction::fade_in("early").delay(100),
        ],
        hold: None,
    };
    assert!(plan.validate().is_err());

    let plan = RevealPlan::new().with(RevealAction::scale("x", f64::NAN));
    assert!(plan.validate().is_err());
}

#[test]
fn span_and_offset() {
    let plan = RevealPlan::new()
        .with(RevealAction::fade_in("a").delay(0).duration(500))
        .with(RevealAction::fade_in("b").delay(1500).duration(1000))
        .hold(2500);
    assert_eq!(plan.span(), Millis(2500));

    let shifted = plan.offset(Millis(1000));
    assert_eq!(shifted.actions[0].delay, Millis(1000));
    assert_eq!(shifted.hold, Some(Millis(3500)));
}

#[test]
fn stagger_spaces_targets() {
    let ids = ["n0", "n1", "n2"].map(ElementId::from);
    let actions = stagger(ids, 100, 300, |id| RevealAction::fade_in(id).duration(700));
    let delays: Vec<u64> = actions.iter().map(|a| a.delay.0).collect();
    assert_eq!(delays, vec![100, 400, 700]);
    assert!(actions.iter().all(|a| a.duration == Millis(700)));
}

#[test]
fn target_state_touches_only_its_property() {
    let from = VisualState {
        opacity: 0.0,
        radius: 8.0,
        stroke_width: 2.0,
        ..VisualState::default()
    };
    let to = RevealKind::Highlight {
        radius: 12.0,
        stroke_width: 4.0,
    }
    .target_state(from);
    assert_eq!(to.opacity, 0.0);
    assert_eq!(to.radius, 12.0);
    assert_eq!(to.stroke_width, 4.0);

    let half = blend(RevealKind::FadeIn, from, from, RevealKind::FadeIn.target_state(from), 0.5);
    assert_eq!(half.opacity, 0.5);
    assert_eq!(half.radius, 8.0);
}

#[test]
fn action_json_shape_is_flat() {
    let a = RevealAction::move_to("chunk1", 10.0, 20.0).delay(1500);
    let v = serde_json::to_value(&a).unwrap();
    assert_eq!(v["kind"], "move_to");
    assert_eq!(v["target"], "chunk1");
    assert_eq!(v["delay"], 1500);
}

use super::*;
use crate::sequence::view::StepDom;

fn demo() -> Sequencer {
    let reg = StepRegistry::builder()
        .section("demo", 3)
        .section("graph-construction", 3)
        .build()
        .unwrap();
    Sequencer::new(reg)
}

#[test]
fn starts_at_zero_and_saturates_both_ways() {
    let mut seq = demo();
    assert_eq!(seq.current_step("demo").unwrap(), StepIndex(0));
    assert_eq!(
        seq.advance("demo", Direction::Prev).unwrap(),
        Advance::Held { step: StepIndex(0) }
    );
    for _ in 0..5 {
        seq.advance("demo", Direction::Next).unwrap();
    }
    assert_eq!(seq.current_step("demo").unwrap(), StepIndex(2));
    assert_eq!(
        seq.advance("demo", Direction::Next).unwrap(),
        Advance::Held { step: StepIndex(2) }
    );
}

#[test]
fn jump_out_of_range_then_clamped_advance() {
    let mut seq = demo();
    let err = seq.jump_to("demo", 5).unwrap_err();
    assert!(matches!(err, StoryError::OutOfRange { index: 5, count: 3, .. }));
    assert_eq!(seq.current_step("demo").unwrap(), StepIndex(0));

    let jumped = seq.jump_to("demo", 2).unwrap();
    assert_eq!(
        jumped,
        Advance::Stepped(StepChanged {
            section: SectionId::from("demo"),
            old: StepIndex(0),
            new: StepIndex(2),
        })
    );
    assert_eq!(seq.advance("demo", Direction::Next).unwrap().step(), StepIndex(2));
}

#[test]
fn unknown_section_errors_everywhere() {
    let mut seq = demo();
    assert!(matches!(
        seq.advance("nope", Direction::Next),
        Err(StoryError::UnknownSection(_))
    ));
    assert!(seq.jump_to("nope", 0).is_err());
    assert!(seq.current_step("nope").is_err());
    assert!(
        seq.set_hook(
            "nope",
            Box::new(RedirectAtEnd {
                target: SectionId::from("x")
            })
        )
        .is_err()
    );
}

#[test]
fn redirect_hook_fires_only_on_next_from_last_step() {
    let mut seq = demo();
    seq.set_hook(
        "graph-construction",
        Box::new(RedirectAtEnd {
            target: SectionId::from("overall-graph-structure"),
        }),
    )
    .unwrap();

    seq.advance("graph-construction", Direction::Next).unwrap();
    seq.advance("graph-construction", Direction::Next).unwrap();
    let out = seq.advance("graph-construction", Direction::Next).unwrap();
    assert_eq!(
        out,
        Advance::Redirected {
            section: SectionId::from("graph-construction"),
            at: StepIndex(2),
            target: SectionId::from("overall-graph-structure"),
        }
    );
    assert_eq!(seq.current_step("graph-construction").unwrap(), StepIndex(2));

    let back = seq.advance("graph-construction", Direction::Prev).unwrap();
    assert_eq!(back.step(), StepIndex(1));
}

#[test]
fn index_stays_in_bounds_for_any_navigation_sequence() {
    let mut seq = demo();
    let moves = [1isize, 1, 1, -1, 1, 1, -1, -1, -1, -1, 1, 0, 2, 1];
    for m in moves {
        match m {
            -1 => {
                seq.advance("demo", Direction::Prev).unwrap();
            }
            1 => {
                seq.advance("demo", Direction::Next).unwrap();
            }
            n => {
                let _ = seq.jump_to("demo", n as usize);
            }
        }
        assert!(seq.current_step("demo").unwrap().0 < 3);
    }
}

#[test]
fn reset_and_sync_drive_the_view() {
    let mut seq = demo();
    seq.jump_to("demo", 2).unwrap();
    let changes = seq.reset();
    assert_eq!(changes.len(), 2);
    assert_eq!(changes[0].old, StepIndex(2));
    assert!(seq.state().values().all(|s| *s == StepIndex(0)));

    let mut dom = StepDom::new();
    seq.sync(&mut dom, "demo").unwrap();
    assert_eq!(dom.visible_containers("demo"), vec!["demo-1"]);
}

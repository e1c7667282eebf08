use super::*;

fn abc() -> ScrollTrigger {
    ScrollTrigger::new(
        TriggerOpts {
            offset: 0.5,
            viewport_height: 800.0,
        },
        vec![
            Landmark::new("A", 1000.0, 1000.0),
            Landmark::new("B", 2000.0, 1000.0),
            Landmark::new("C", 3000.0, 1000.0),
        ],
    )
    .unwrap()
}

fn entered(ev: &TriggerEvent) -> Option<&str> {
    match ev {
        TriggerEvent::SectionEntered { id, .. } => Some(id.as_str()),
        _ => None,
    }
}

#[test]
fn trigger_line_uses_offset_fraction() {
    let mut t = abc();
    t.on_scroll(600.0);
    assert_eq!(t.trigger_line(), 1000.0);
}

#[test]
fn nothing_happens_without_a_frame() {
    let mut t = abc();
    t.on_scroll(1200.0);
    assert!(t.needs_frame());
    assert!(t.active().is_none());
    let events = t.on_frame();
    assert_eq!(events.len(), 1);
    assert!(t.on_frame().is_empty());
}

#[test]
fn debounced_burst_yields_single_pair() {
    let mut t = abc();
    t.on_scroll(600.0);
    t.on_frame();
    for y in [700.0, 900.0, 1300.0, 1500.0, 1700.0] {
        t.on_scroll(y);
    }
    let events = t.on_frame();
    assert_eq!(
        events,
        vec![
            TriggerEvent::SectionExited {
                id: SectionId::from("A"),
                index: 0,
                direction: ScrollDirection::Down,
            },
            TriggerEvent::SectionEntered {
                id: SectionId::from("B"),
                index: 1,
                direction: ScrollDirection::Down,
            },
        ]
    );
}

#[test]
fn crossing_each_center_once_enters_each_exactly_once() {
    let mut t = abc();
    let mut log = Vec::new();
    let mut y = 0.0;
    while y <= 3200.0 {
        t.on_scroll(y);
        log.extend(t.on_frame());
        y += 100.0;
    }
    let enters: Vec<&str> = log.iter().filter_map(entered).collect();
    assert_eq!(enters, vec!["A", "B", "C"]);

    // Every exit precedes the next enter.
    let kinds: Vec<&str> = log
        .iter()
        .map(|e| match e {
            TriggerEvent::SectionEntered { .. } => "enter",
            TriggerEvent::SectionExited { .. } => "exit",
        })
        .collect();
    assert_eq!(kinds, vec!["enter", "exit", "enter", "exit", "enter"]);
}

#[test]
fn scrolling_back_reports_up() {
    let mut t = abc();
    t.on_scroll(1700.0);
    t.on_frame();
    t.on_scroll(1000.0);
    let events = t.on_frame();
    assert!(events.iter().all(|e| match e {
        TriggerEvent::SectionEntered { direction, .. } | TriggerEvent::SectionExited { direction, .. } =>
            *direction == ScrollDirection::Up,
    }));
    assert_eq!(t.active().map(SectionId::as_str), Some("A"));
}

#[test]
fn leaving_all_landmarks_only_exits() {
    let mut t = abc();
    t.on_scroll(3000.0);
    t.on_frame();
    t.on_scroll(5000.0);
    let events = t.on_frame();
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], TriggerEvent::SectionExited { index: 2, .. }));
    assert!(t.active().is_none());
}

#[test]
fn resize_without_active_change_is_silent() {
    let mut t = abc();
    t.on_scroll(1200.0);
    t.on_frame();
    let events = t
        .on_resize(
            900.0,
            vec![
                Landmark::new("A", 1100.0, 1200.0),
                Landmark::new("B", 2300.0, 1200.0),
                Landmark::new("C", 3500.0, 1200.0),
            ],
        )
        .unwrap();
    assert!(events.is_empty());
    assert_eq!(t.active().map(SectionId::as_str), Some("A"));
}

#[test]
fn resize_that_moves_the_line_emits() {
    let mut t = abc();
    t.on_scroll(1200.0);
    t.on_frame();
    let events = t
        .on_resize(
            800.0,
            vec![
                Landmark::new("A", 500.0, 500.0),
                Landmark::new("B", 1000.0, 1000.0),
                Landmark::new("C", 2000.0, 1000.0),
            ],
        )
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(entered(&events[1]), Some("B"));
}

#[test]
fn invalid_options_are_rejected() {
    let bad = TriggerOpts {
        offset: 1.5,
        viewport_height: 800.0,
    };
    assert!(ScrollTrigger::new(bad, Vec::new()).is_err());
    let mut t = abc();
    assert!(t.on_resize(0.0, Vec::new()).is_err());
}

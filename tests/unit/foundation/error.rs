use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        StoryError::unknown_section("demo")
            .to_string()
            .contains("unknown section: demo")
    );
    assert!(
        StoryError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        StoryError::animation("x")
            .to_string()
            .contains("animation error:")
    );
    assert!(
        StoryError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn out_of_range_names_bounds() {
    let err = StoryError::OutOfRange {
        section: SectionId::new("demo"),
        index: 5,
        count: 3,
    };
    let s = err.to_string();
    assert!(s.contains("demo"));
    assert!(s.contains("3 steps"));
    assert!(s.contains("index 5"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = StoryError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

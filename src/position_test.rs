use std::collections::BTreeSet;

use super::*;

// =============================================================
// Labels
// =============================================================

#[test]
fn parse_every_label() {
    for position in Position::ALL {
        assert_eq!(position.as_str().parse::<Position>(), Ok(position));
    }
}

#[test]
fn parse_is_case_and_whitespace_tolerant() {
    assert_eq!(" NE ".parse::<Position>(), Ok(Position::Ne));
}

#[test]
fn parse_rejects_unknown_label() {
    let err = "north".parse::<Position>().unwrap_err();
    assert_eq!(err, ParsePositionError("north".into()));
    assert!(err.to_string().contains("north"));
}

#[test]
fn display_matches_css_class() {
    assert_eq!(Position::Sw.to_string(), "sw");
}

#[test]
fn serde_uses_lowercase_labels() {
    let json = serde_json::to_string(&Position::Nw).unwrap();
    assert_eq!(json, "\"nw\"");
    let back: Position = serde_json::from_str("\"se\"").unwrap();
    assert_eq!(back, Position::Se);
}

// =============================================================
// Sides
// =============================================================

#[test]
fn vertical_side_follows_first_letter() {
    assert_eq!(Position::N.vertical(), Vertical::Above);
    assert_eq!(Position::Nw.vertical(), Vertical::Above);
    assert_eq!(Position::Se.vertical(), Vertical::Below);
    assert_eq!(Position::E.vertical(), Vertical::Center);
    assert_eq!(Position::W.vertical(), Vertical::Center);
}

#[test]
fn horizontal_side_follows_last_letter() {
    assert_eq!(Position::E.horizontal(), Horizontal::Right);
    assert_eq!(Position::Ne.horizontal(), Horizontal::Right);
    assert_eq!(Position::Sw.horizontal(), Horizontal::Left);
    assert_eq!(Position::N.horizontal(), Horizontal::Center);
    assert_eq!(Position::S.horizontal(), Horizontal::Center);
}

// =============================================================
// Alternates
// =============================================================

#[test]
fn default_alternates_cover_the_other_seven_positions() {
    let alternates = Alternates::default();
    for position in Position::ALL {
        let list = alternates.for_position(position);
        assert_eq!(list.len(), 7, "{position}");
        let unique: BTreeSet<_> = list.iter().copied().collect();
        assert_eq!(unique.len(), 7, "{position} has duplicates");
        assert!(!unique.contains(&position), "{position} lists itself");
    }
}

#[test]
fn default_alternates_for_se_prefer_south_first() {
    let alternates = Alternates::default();
    assert_eq!(
        alternates.for_position(Position::Se),
        &[Position::S, Position::Sw, Position::E, Position::Ne, Position::N, Position::Nw, Position::W]
    );
}

#[test]
fn set_replaces_one_list() {
    let mut alternates = Alternates::default();
    alternates.set(Position::N, vec![Position::S]);
    assert_eq!(alternates.for_position(Position::N), &[Position::S]);
    assert_eq!(alternates.for_position(Position::S).len(), 7);
}

#[test]
fn merge_keeps_unnamed_lists() {
    let mut alternates = Alternates::default();
    let patch: Alternates = serde_json::from_str(r#"{"w": ["e"]}"#).unwrap();
    alternates.merge(patch);
    assert_eq!(alternates.for_position(Position::W), &[Position::E]);
    assert_eq!(alternates.for_position(Position::E).len(), 7);
}

#[test]
fn missing_entry_yields_no_fallbacks() {
    let alternates: Alternates = serde_json::from_str(r#"{"n": ["s"]}"#).unwrap();
    assert!(alternates.for_position(Position::E).is_empty());
}

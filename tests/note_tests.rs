//! Note placement tests against the Sky harp.

use pretty_assertions::assert_eq;
use skygrid::{
    harp_from_json, harp_notes_to_json, Harp, Instrument, InstrumentError, Note, NoteError,
    Position, Validation,
};

#[test]
fn index_matches_row_major_layout() {
    let harp = Harp::new(3, 5).unwrap();
    let note = Note::new(&harp, Some(Position::new(1, 2))).unwrap();
    assert_eq!(note.index(), Some(7));

    let harp = Harp::new(4, 3).unwrap();
    let note = Note::new(&harp, Some(Position::new(1, 2))).unwrap();
    assert_eq!(note.index(), Some(5));
}

#[test]
fn moving_a_note_updates_its_index() {
    let harp = Harp::default();
    let mut note = Note::new(&harp, Some(Position::new(0, 0))).unwrap();
    assert_eq!(note.index(), Some(0));
    note.set_position(Position::new(2, 4)).unwrap();
    assert_eq!(note.index(), Some(14));
    assert_eq!(note.position(), Some(Position::new(2, 4)));
}

#[test]
fn position_and_index_are_present_together() {
    let harp = Harp::default();
    let mut note = Note::new(&harp, None).unwrap();
    assert_eq!((note.position(), note.index()), (None, None));
    note.set_position(Position::new(1, 4)).unwrap();
    assert!(note.position().is_some() && note.index().is_some());
    note.clear_position();
    assert_eq!((note.position(), note.index()), (None, None));
}

#[test]
fn highlight_follows_the_harp() {
    let harp = Harp::default();
    let a1 = Note::new(&harp, Some(Position::new(0, 0))).unwrap();
    let unplaced = Note::new(&harp, None).unwrap();

    assert!(!a1.is_highlighted().unwrap());
    harp.highlight(Position::new(0, 0), [0, 2]).unwrap();
    assert!(a1.is_highlighted().unwrap());
    assert_eq!(a1.highlighted_frames().unwrap(), vec![0, 2]);

    assert!(unplaced.highlighted_frames().unwrap().is_empty());
    assert!(!unplaced.is_highlighted().unwrap());

    harp.set_silent(true);
    assert!(!a1.is_highlighted().unwrap());
    harp.set_silent(false);
    harp.clear_highlights();
    assert!(!a1.is_highlighted().unwrap());
}

#[test]
fn is_highlighted_agrees_with_frames_on_every_key() {
    let harp = Harp::default();
    harp.highlight(Position::new(0, 1), [1]).unwrap();
    harp.highlight(Position::new(2, 3), [0, 4]).unwrap();
    for note in harp.notes().unwrap() {
        assert_eq!(note.is_highlighted().unwrap(), !note.highlighted_frames().unwrap().is_empty());
    }
    let highlighted: Vec<_> = harp
        .notes()
        .unwrap()
        .iter()
        .filter(|n| n.is_highlighted().unwrap())
        .filter_map(|n| n.index())
        .collect();
    assert_eq!(highlighted, vec![1, 13]);
}

#[test]
fn permissive_note_off_the_grid_fails_lookup() {
    let harp = Harp::default();
    let note = Note::new(&harp, Some(Position::new(3, 0))).unwrap();
    assert_eq!(note.index(), Some(15));
    assert_eq!(
        note.is_highlighted().unwrap_err(),
        InstrumentError::OutOfGrid { position: Position::new(3, 0), rows: 3, columns: 5 }
    );
}

#[test]
fn strict_note_stays_on_the_grid() {
    let harp = Harp::default();
    assert!(matches!(
        Note::with_validation(&harp, Some(Position::new(3, 0)), Validation::Strict),
        Err(NoteError::OutOfBounds { .. })
    ));

    let mut note =
        Note::with_validation(&harp, Some(Position::new(2, 4)), Validation::Strict).unwrap();
    assert!(note.set_position(Position::new(0, 5)).is_err());
    assert_eq!(note.index(), Some(14));
    assert_eq!(note.validation(), Validation::Strict);
}

#[test]
fn display_shows_index_position_and_frames() {
    let harp = Harp::default();
    harp.highlight(Position::new(1, 0), [0, 1]).unwrap();
    let note = Note::new(&harp, Some(Position::new(1, 0))).unwrap();
    assert_eq!(note.to_string(), "<5, pos=(1, 0), highlighted frames=[0, 1]>");
}

#[test]
fn note_views_as_json() {
    let harp = harp_from_json(
        r#"{"rows": 1, "columns": 2, "highlights": [{"row": 0, "column": 1, "frames": [3]}]}"#,
    )
    .unwrap();
    assert_eq!(harp.num_columns(), 2);

    let json = harp_notes_to_json(&harp).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(
        value,
        serde_json::json!([
            {"index": 0, "position": {"row": 0, "column": 0}, "frames": [], "highlighted": false},
            {"index": 1, "position": {"row": 0, "column": 1}, "frames": [3], "highlighted": true}
        ])
    );
}

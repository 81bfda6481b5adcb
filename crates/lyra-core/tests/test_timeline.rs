mod common;

use lyra_core::error::LyraError;
use lyra_core::timeline::Timeline;

fn timeline(len: usize) -> Timeline {
    Timeline::new((0..len).map(common::blank_entry).collect()).unwrap()
}

#[test]
fn test_empty_timeline_is_rejected() {
    let err = Timeline::new(Vec::new()).unwrap_err();
    assert!(matches!(err, LyraError::EmptyTimeline), "got: {err}");
}

#[test]
fn test_new_timeline_starts_at_first_entry() {
    let t = timeline(3);
    assert_eq!(t.len(), 3);
    assert_eq!(t.cursor(), 0);
}

#[test]
fn test_advance_wraps_past_last_entry() {
    let mut t = timeline(3);
    t.advance();
    t.advance();
    assert_eq!(t.cursor(), 2);
    t.advance();
    assert_eq!(t.cursor(), 0);
}

#[test]
fn test_retreat_wraps_past_first_entry() {
    let mut t = timeline(3);
    t.retreat();
    assert_eq!(t.cursor(), 2);
    t.retreat();
    assert_eq!(t.cursor(), 1);
}

#[test]
fn test_single_entry_navigation_is_a_no_op() {
    let mut t = timeline(1);
    t.advance();
    assert_eq!(t.cursor(), 0);
    t.retreat();
    assert_eq!(t.cursor(), 0);
}

#[test]
fn test_truncate_after_cursor_drops_the_future() {
    let mut t = timeline(5);
    t.advance();
    t.advance();
    t.truncate_after_cursor();
    assert_eq!(t.len(), 3);
    assert_eq!(t.cursor(), 2);
}

#[test]
fn test_truncate_at_last_entry_keeps_everything() {
    let mut t = timeline(2);
    t.advance();
    t.truncate_after_cursor();
    assert_eq!(t.len(), 2);
}

#[test]
fn test_append_moves_cursor_to_new_entry() {
    let mut t = timeline(2);
    t.append(common::blank_entry(2));
    assert_eq!(t.len(), 3);
    assert_eq!(t.cursor(), 2);
    assert_eq!(
        t.current().record.image_path.to_str().unwrap(),
        "frame_0002.png"
    );
}

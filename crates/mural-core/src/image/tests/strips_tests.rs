//! Tests for [`ThumbnailStripsSnapshot`] update functions.

use crate::ids::{ImageId, StripId};
use crate::image::ThumbnailStripsSnapshot;

fn id(s: &str) -> ImageId {
    ImageId::from(s)
}

#[test]
fn test_add_item_appends_by_default() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_added(&history, id("b"), None);
    assert_eq!(snapshot.items(&history), &[id("a"), id("b")]);
}

#[test]
fn test_add_item_at_front_yields_newest_first() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), Some(0))
        .with_item_added(&history, id("b"), Some(0));
    assert_eq!(snapshot.items(&history), &[id("b"), id("a")]);
}

#[test]
fn test_add_item_is_idempotent() {
    let history = StripId::history();
    let once = ThumbnailStripsSnapshot::default().with_item_added(&history, id("a"), None);
    let twice = once.with_item_added(&history, id("a"), Some(0));
    assert_eq!(once, twice);
}

#[test]
fn test_add_item_does_not_touch_other_strips() {
    let history = StripId::history();
    let starred = StripId::starred();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_added(&starred, id("b"), None);
    assert_eq!(snapshot.items(&history), &[id("a")]);
    assert_eq!(snapshot.items(&starred), &[id("b")]);
}

#[test]
fn test_input_snapshot_is_never_mutated() {
    let history = StripId::history();
    let original = ThumbnailStripsSnapshot::default().with_item_added(&history, id("a"), None);
    let before = original.clone();

    let _ = original.with_item_added(&history, id("b"), None);
    let _ = original.with_item_removed(&history, &id("a"));
    let _ = original.with_item_reordered(&history, id("a"), 0);
    let _ = original.with_items_replaced(&history, vec![id("x")]);
    let _ = original.with_pin_state(&history, true);
    let _ = original.with_active(Some(history.clone()));

    assert_eq!(original, before);
}

#[test]
fn test_remove_item_is_idempotent() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_added(&history, id("b"), None);
    let once = snapshot.with_item_removed(&history, &id("a"));
    let twice = once.with_item_removed(&history, &id("a"));
    assert_eq!(once.items(&history), &[id("b")]);
    assert_eq!(once, twice);
}

#[test]
fn test_reorder_moves_member_to_index() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_added(&history, id("b"), None)
        .with_item_added(&history, id("c"), None);
    let reordered = snapshot.with_item_reordered(&history, id("c"), 0);
    assert_eq!(reordered.items(&history), &[id("c"), id("a"), id("b")]);
}

#[test]
fn test_reorder_non_member_joins_strip() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_reordered(&history, id("z"), 0);
    assert_eq!(snapshot.items(&history), &[id("z"), id("a")]);
}

#[test]
fn test_reorder_clamps_out_of_range_index() {
    let history = StripId::history();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&history, id("a"), None)
        .with_item_reordered(&history, id("a"), 99);
    assert_eq!(snapshot.items(&history), &[id("a")]);
}

#[test]
fn test_replace_items_dedupes_keeping_first() {
    let environment = StripId::environment();
    let snapshot = ThumbnailStripsSnapshot::default().with_items_replaced(
        &environment,
        vec![id("a"), id("b"), id("a"), id("c")],
    );
    assert_eq!(snapshot.items(&environment), &[id("a"), id("b"), id("c")]);
}

#[test]
fn test_pin_state_toggles_membership() {
    let starred = StripId::starred();
    let pinned = ThumbnailStripsSnapshot::default().with_pin_state(&starred, true);
    assert!(pinned.pinned_strip_ids.contains(&starred));
    let unpinned = pinned.with_pin_state(&starred, false);
    assert!(!unpinned.pinned_strip_ids.contains(&starred));
}

#[test]
fn test_set_active_clears_previous() {
    let history = StripId::history();
    let starred = StripId::starred();
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_active(Some(history))
        .with_active(Some(starred.clone()));
    assert_eq!(snapshot.active_strip_id, Some(starred));
}

#[test]
fn test_referenced_ids_unions_all_strips() {
    let snapshot = ThumbnailStripsSnapshot::default()
        .with_item_added(&StripId::history(), id("a"), None)
        .with_item_added(&StripId::starred(), id("a"), None)
        .with_item_added(&StripId::starred(), id("b"), None);
    let referenced = snapshot.referenced_ids();
    assert_eq!(referenced.len(), 2);
    assert!(referenced.contains(&id("a")));
    assert!(referenced.contains(&id("b")));
}

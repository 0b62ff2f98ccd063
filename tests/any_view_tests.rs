//! Integration tests for the type-erased view and cursor layer.
//!
//! Coverage: erasure at each capability tier, equivalence of erased and
//! direct walks over the same data, tier-gated operations, the empty and
//! moved-from states, iterator bridges, re-erasure of already-erased views,
//! and storing views inside a `Variant`.

use vista::{
    category::{Bidirectional, Forward, RandomAccess},
    prelude::{Cursor, View},
    views::{IterView, VecView},
    AnyCursor, AnyView, Variant,
};

#[test]
fn test_random_access_erasure_matches_direct_access() {
    let data = vec![3, 1, 4, 1, 5, 9, 2, 6];
    let view: AnyView<i32, RandomAccess> = AnyView::new(VecView::new(data.clone()));

    // Length and full iteration agree with the unwrapped vector.
    assert_eq!(view.len(), data.len());
    let collected: Vec<i32> = view.iter().collect();
    assert_eq!(collected, data);

    // advance/distance_to behave like index arithmetic.
    let begin = view.begin();
    let mut cursor = begin.clone();
    cursor.advance(5);
    assert_eq!(cursor.read(), data[5]);
    assert_eq!(begin.distance_to(&cursor), 5);
    assert_eq!(cursor.distance_to(&begin), -5);

    cursor.advance(-2);
    assert_eq!(cursor.read(), data[3]);

    cursor.advance(5);
    assert!(view.at_end(&cursor));
}

#[test]
fn test_bidirectional_erasure() {
    let view: AnyView<u8, Bidirectional> = AnyView::new(VecView::new(vec![1, 2, 3]));
    let mut cursor = view.begin();
    cursor.next();
    cursor.next();
    assert_eq!(cursor.read(), 3);
    cursor.prev();
    assert_eq!(cursor.read(), 2);
}

#[test]
fn test_forward_erasure_of_iterator_views() {
    let view: AnyView<u32, Forward> = AnyView::new(IterView::new((1..=4).map(|n| n * 10)));
    let collected: Vec<u32> = view.iter().collect();
    assert_eq!(collected, [10, 20, 30, 40]);

    // The view is re-walkable: a second iteration sees the same elements.
    let again: Vec<u32> = view.iter().collect();
    assert_eq!(again, collected);
}

#[test]
fn test_into_iterator_bridges() {
    let view: AnyView<i32> = AnyView::new(VecView::new(vec![7, 8]));

    let by_ref: Vec<i32> = (&view).into_iter().collect();
    assert_eq!(by_ref, [7, 8]);

    let by_value: Vec<i32> = view.into_iter().collect();
    assert_eq!(by_value, [7, 8]);
}

#[test]
fn test_clones_share_the_same_range() {
    let view: AnyView<i32, RandomAccess> = AnyView::new(VecView::new(vec![5, 6, 7]));
    let clone = view.clone();

    assert_eq!(view.view_type_name(), clone.view_type_name());
    assert_eq!(view.len(), clone.len());

    // A cursor from one handle is recognized by the other: both erase the
    // very same underlying view object.
    let cursor = view.begin();
    assert!(!clone.at_end(&cursor));
}

#[test]
fn test_empty_view_state() {
    let view: AnyView<i32, RandomAccess> = AnyView::empty();
    assert!(view.is_empty());
    assert_eq!(view.len(), 0);
    assert_eq!(view.view_type_name(), "(empty)");

    let cursor = view.begin();
    assert!(cursor.is_empty());
    assert!(view.at_end(&cursor));
    assert_eq!(view.iter().count(), 0);

    let default_view: AnyView<i32, RandomAccess> = AnyView::default();
    assert!(default_view.is_empty());
}

#[test]
fn test_moved_from_cursor_reports_at_end() {
    let view: AnyView<i32> = AnyView::new(VecView::new(vec![1, 2]));
    let mut cursor = view.begin();
    let taken = cursor.take();

    assert!(cursor.is_empty());
    assert!(view.at_end(&cursor));
    assert_eq!(taken.read(), 1);

    // Dropping and cloning the moved-from cursor is safe and inert.
    let clone = cursor.clone();
    assert!(clone.is_empty());
    drop(cursor);
    drop(clone);

    // A default-constructed cursor behaves the same way.
    let fresh: AnyCursor<i32> = AnyCursor::default();
    assert!(fresh.is_empty());
    assert!(view.at_end(&fresh));
}

#[test]
#[should_panic(expected = "read on an empty cursor")]
fn test_empty_cursor_read_panics() {
    let cursor: AnyCursor<i32> = AnyCursor::empty();
    let _ = cursor.read();
}

#[test]
#[should_panic(expected = "cursor does not belong to this view")]
fn test_foreign_cursor_is_rejected() {
    let ints: AnyView<i32> = AnyView::new(VecView::new(vec![1]));
    let other: AnyView<i32> = AnyView::new(IterView::new(0..3));
    let foreign = other.begin();
    let _ = ints.at_end(&foreign);
}

#[test]
fn test_erased_views_reenter_the_protocol() {
    // AnyView implements View, so it can be erased again.
    let inner: AnyView<i32, Forward> = AnyView::new(VecView::new(vec![2, 4]));
    let outer: AnyView<i32, Forward> = AnyView::new(inner);
    let collected: Vec<i32> = outer.iter().collect();
    assert_eq!(collected, [2, 4]);
}

#[test]
fn test_direct_cursor_erasure() {
    // Cursors can be erased standalone, not only through a view.
    let concrete = VecView::new(vec![9, 8, 7]);
    let mut erased: AnyCursor<i32, RandomAccess> = AnyCursor::new(concrete.begin());
    erased.advance(2);
    assert_eq!(erased.read(), 7);
    assert!(erased.cursor_type_name().contains("VecCursor"));
}

#[test]
fn test_views_as_variant_alternatives() {
    // A variant can hold concrete views of different types and hand back
    // whichever is active.
    type Source = Variant<(VecView<i32>, AnyView<i32>)>;

    let from_vec: Source = Variant::new::<0>(VecView::new(vec![1, 2, 3]));
    let from_any: Source = Variant::new::<1>(AnyView::new(IterView::new(4..=6)));

    let vec_view = from_vec.get::<0>().unwrap();
    let mut cursor = vec_view.begin();
    assert_eq!(cursor.read(), 1);
    cursor.next();
    assert_eq!(cursor.read(), 2);

    let any_view = from_any.get::<1>().unwrap();
    let collected: Vec<i32> = any_view.iter().collect();
    assert_eq!(collected, [4, 5, 6]);
}

#[test]
fn test_debug_formatting_names_the_erased_type() {
    let view: AnyView<i32> = AnyView::new(VecView::new(vec![1]));
    let formatted = format!("{view:?}");
    assert!(formatted.starts_with("AnyView"));
    assert!(formatted.contains("VecView"));

    let cursor = view.begin();
    assert!(format!("{cursor:?}").contains("VecCursor"));

    let empty: AnyView<i32> = AnyView::empty();
    assert_eq!(format!("{empty:?}"), "AnyView(\"(empty)\")");
}

#[test]
fn test_not_send_or_sync() {
    static_assertions::assert_not_impl_any!(AnyView<i32>: Send, Sync);
    static_assertions::assert_not_impl_any!(AnyCursor<i32>: Send, Sync);
}

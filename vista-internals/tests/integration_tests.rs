//! Integration tests for the vista-internals crate.
//!
//! These exercise the three storage engines together, across module
//! boundaries:
//!
//! - Variant storage: tag/storage lifecycle, drop accounting, visitation
//!   modes, slot indexing.
//! - Cursor erasure: protocol round-trips per tier, clone independence,
//!   the empty state.
//! - View erasure: erased walks against the un-erased original, reference
//!   counting across clones, the erasure entry traits.

use std::{cell::Cell, rc::Rc};

use vista_internals::{
    category::{Bidirectional, ErasableCursor, ErasableView, Forward, RandomAccess},
    protocol::{BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View},
    variant::{AlternativeList, ListSlot, VisitAlternative, VisitValueless, VisitorOutput},
    RawVariant,
};

/// Shared drop/clone counters for an instrumented alternative.
#[derive(Default)]
struct Counters {
    clones: Cell<usize>,
    drops: Cell<usize>,
}

/// An alternative that records its clones and drops.
struct Tracked {
    counters: Rc<Counters>,
}

impl Tracked {
    fn new(counters: &Rc<Counters>) -> Self {
        Self {
            counters: counters.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.clones.set(self.counters.clones.get() + 1);
        Self {
            counters: self.counters.clone(),
        }
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}

#[test]
fn test_variant_drops_active_alternative_exactly_once() {
    let counters = Rc::new(Counters::default());
    {
        let mut variant = RawVariant::<(Tracked, u8)>::empty();
        variant.write_slot::<0>(Tracked::new(&counters));
        assert_eq!(variant.index(), Some(0));
    }
    assert_eq!(counters.drops.get(), 1);
    assert_eq!(counters.clones.get(), 0);
}

#[test]
fn test_variant_clear_then_drop_runs_no_second_drop() {
    let counters = Rc::new(Counters::default());
    {
        let mut variant = RawVariant::<(Tracked, u8)>::empty();
        variant.write_slot::<0>(Tracked::new(&counters));
        variant.clear();
        assert_eq!(counters.drops.get(), 1);
        assert_eq!(variant.index(), None);
    }
    assert_eq!(counters.drops.get(), 1);
}

#[test]
fn test_variant_clone_goes_through_clone_table() {
    let counters = Rc::new(Counters::default());
    let mut variant = RawVariant::<(Tracked, u8)>::empty();
    variant.write_slot::<0>(Tracked::new(&counters));
    let clone = variant.clone();
    assert_eq!(clone.index(), Some(0));
    assert_eq!(counters.clones.get(), 1);
    drop(variant);
    drop(clone);
    assert_eq!(counters.drops.get(), 2);
}

#[test]
fn test_variant_overwrite_drops_old_alternative() {
    let counters = Rc::new(Counters::default());
    let mut variant = RawVariant::<(Tracked, u8)>::empty();
    variant.write_slot::<0>(Tracked::new(&counters));
    variant.clear();
    variant.write_slot::<1>(7);
    assert_eq!(counters.drops.get(), 1);
    assert_eq!(variant.index(), Some(1));
}

#[test]
fn test_needs_drop_flags_in_vtables() {
    type List = (u8, String);
    let vtables = <List as AlternativeList>::VTABLES;
    assert!(!vtables[0].needs_drop());
    assert!(vtables[1].needs_drop());
}

#[test]
fn test_slot_indexing_matches_list_order() {
    type List = (u8, String, i64);
    fn slot_type_name<L: ListSlot<1>>() -> &'static str {
        std::any::type_name::<<L as ListSlot<1>>::Alternative>()
    }
    assert!(slot_type_name::<List>().contains("String"));
}

/// A visitor classifying the active alternative by size.
struct Wideness;

impl VisitorOutput for Wideness {
    type Output = &'static str;
}

impl<A> VisitAlternative<A> for Wideness {
    fn visit(self, _alternative: &A) -> &'static str {
        if size_of::<A>() > 4 { "wide" } else { "narrow" }
    }
}

impl VisitValueless for Wideness {
    fn visit_valueless(self) -> &'static str {
        "valueless"
    }
}

#[test]
fn test_visit_modes() {
    let mut variant = RawVariant::<(u8, u64)>::empty();
    assert_eq!(variant.visit(Wideness), None);
    assert_eq!(variant.visit_raw(Wideness), "valueless");

    variant.write_slot::<1>(1);
    assert_eq!(variant.visit(Wideness), Some("wide"));
    assert_eq!(variant.visit_raw(Wideness), "wide");
    // SAFETY: The variant is not valueless.
    assert_eq!(unsafe { variant.visit_unchecked(Wideness) }, "wide");

    variant.clear();
    variant.write_slot::<0>(1);
    assert_eq!(variant.visit(Wideness), Some("narrow"));
}

/// A self-contained random-access cursor over a shared `Vec`.
#[derive(Clone)]
struct SliceCursor {
    data: Rc<Vec<i32>>,
    position: usize,
}

impl Cursor for SliceCursor {
    type Item = i32;

    fn read(&self) -> i32 {
        self.data[self.position]
    }

    fn next(&mut self) {
        self.position += 1;
    }
}

impl BidirectionalCursor for SliceCursor {
    fn prev(&mut self) {
        self.position -= 1;
    }
}

impl RandomAccessCursor for SliceCursor {
    fn advance(&mut self, offset: isize) {
        self.position = self
            .position
            .checked_add_signed(offset)
            .expect("cursor advanced out of range");
    }

    fn distance_to(&self, other: &Self) -> isize {
        other.position as isize - self.position as isize
    }
}

/// The view counterpart of [`SliceCursor`].
#[derive(Clone)]
struct SliceView {
    data: Rc<Vec<i32>>,
}

impl SliceView {
    fn new(values: Vec<i32>) -> Self {
        Self {
            data: Rc::new(values),
        }
    }
}

impl View for SliceView {
    type Item = i32;
    type Cursor = SliceCursor;

    fn begin(&self) -> SliceCursor {
        SliceCursor {
            data: self.data.clone(),
            position: 0,
        }
    }

    fn at_end(&self, cursor: &SliceCursor) -> bool {
        cursor.position >= self.data.len()
    }
}

impl ExactSizeView for SliceView {
    fn len(&self) -> usize {
        self.data.len()
    }
}

#[test]
fn test_cursor_erasure_through_category_trait() {
    let view = SliceView::new(vec![4, 5, 6]);
    let mut erased = ErasableCursor::<Bidirectional>::erase_cursor(view.begin());
    assert_eq!(erased.read(), 4);
    erased.next();
    erased.next();
    assert_eq!(erased.read(), 6);
    erased.prev();
    assert_eq!(erased.read(), 5);
}

#[test]
fn test_view_erasure_matches_unerased_walk() {
    let concrete = SliceView::new(vec![1, 2, 3, 4, 5]);
    let erased = ErasableView::<Forward>::erase_view(concrete.clone());

    let mut expected = Vec::new();
    let mut cursor = concrete.begin();
    while !concrete.at_end(&cursor) {
        expected.push(cursor.read());
        cursor.next();
    }

    let mut collected = Vec::new();
    let mut cursor = erased.begin();
    while !erased.at_end(&cursor) {
        collected.push(cursor.read());
        cursor.next();
    }

    assert_eq!(collected, expected);
}

#[test]
fn test_random_access_view_erasure_len_and_distance() {
    let concrete = SliceView::new(vec![10, 20, 30, 40]);
    let erased = ErasableView::<RandomAccess>::erase_view(concrete.clone());

    assert_eq!(erased.len(), concrete.len());

    let begin = erased.begin();
    let mut cursor = begin.clone();
    cursor.advance(erased.len() as isize);
    assert!(erased.at_end(&cursor));
    assert_eq!(begin.distance_to(&cursor), 4);
    assert_eq!(cursor.distance_to(&begin), -4);

    cursor.advance(-1);
    assert_eq!(cursor.read(), 40);
}

#[test]
fn test_view_clone_shares_the_underlying_range() {
    let concrete = SliceView::new(vec![7, 8]);
    let data = concrete.data.clone();
    let erased = ErasableView::<Forward>::erase_view(concrete);
    // One reference held here, one inside the erased allocation.
    assert_eq!(Rc::strong_count(&data), 2);

    let second = erased.clone();
    // An erased-view clone bumps the outer `Arc`, not the inner range.
    assert_eq!(Rc::strong_count(&data), 2);

    drop(erased);
    assert_eq!(Rc::strong_count(&data), 2);
    drop(second);
    assert_eq!(Rc::strong_count(&data), 1);
}

#[test]
fn test_cursor_drop_releases_its_range_handle() {
    let concrete = SliceView::new(vec![1]);
    let data = concrete.data.clone();
    let cursor = ErasableCursor::<Forward>::erase_cursor(concrete.begin());
    assert_eq!(Rc::strong_count(&data), 3);

    let clone = cursor.clone();
    assert_eq!(Rc::strong_count(&data), 4);

    drop(cursor);
    drop(clone);
    drop(concrete);
    assert_eq!(Rc::strong_count(&data), 1);
}

#[test]
fn test_moved_from_cursor_is_at_end_and_safe() {
    let view = ErasableView::<Forward>::erase_view(SliceView::new(vec![1, 2]));
    let mut cursor = view.begin();
    let taken = cursor.take();

    assert!(cursor.is_empty());
    assert!(view.at_end(&cursor));
    assert_eq!(taken.read(), 1);

    let empty_clone = cursor.clone();
    assert!(empty_clone.is_empty());
    drop(cursor);
    drop(empty_clone);
}

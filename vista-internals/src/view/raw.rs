//! The owned type-erased view.
//!
//! This module encapsulates the `ptr` field of [`RawView`], ensuring it is
//! only visible within this module. This visibility restriction guarantees
//! the safety invariant: **the pointer always designates either a
//! [`triomphe::Arc`]-allocated `ViewData<V, R>` whose header vtable was
//! built for exactly `V` and `R`, or the shared empty allocation of the tier
//! `V`.**
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawView::from_arc`] (which
//! receives a correctly paired `Arc` allocation) or [`RawView::empty`]
//! (which uses the tier's promoted empty allocation), and cannot be modified
//! afterwards, the pairing between the vtable read from the header and the
//! payload behind the pointer holds for the value's entire lifetime.
//!
//! The [`Drop`] and [`Clone`] implementations rely on this invariant to
//! dispatch reference-count management (no-ops for the empty state).

use core::{any::TypeId, marker::PhantomData, ptr::NonNull};

use crate::{
    cursor::RawCursor,
    view::{
        data::{ErasedViewData, ViewData},
        vtable::{EmptyView, RandomAccessViewVtableKind, ViewVtableKind},
    },
};

/// An owned view whose concrete type has been erased behind the vtable tier
/// `V`.
///
/// Produced by the `erase_*` constructors on the view vtables (usually via
/// the `ErasableView` trait in [`category`]). Cloning is a reference-count
/// bump: every clone shares the same underlying concrete view.
///
/// The erased view answers the end-of-range test for the cursors it
/// produced; see [`RawView::at_end`].
///
/// [`category`]: crate::category
pub struct RawView<T: 'static, V: ViewVtableKind<T>> {
    /// Pointer to the erased view allocation.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer was created either from
    ///    `triomphe::Arc<ViewData<V, R>>` via [`triomphe::Arc::into_raw`]
    ///    (for some view type `R` matching the header vtable) or from
    ///    [`ViewVtableKind::empty_data`] for this `V`.
    /// 2. In the `Arc` case, this struct owns one strong reference; in the
    ///    empty case, the allocation is shared, immutable, and its table
    ///    entries never access it.
    /// 3. The pointee is properly initialized for the entire lifetime of
    ///    this object.
    ptr: NonNull<ErasedViewData>,
    /// Marker tying the erased view to its element type and vtable tier.
    _marker: PhantomData<(&'static V, fn() -> T)>,
}

impl<T: 'static, V: ViewVtableKind<T>> RawView<T, V> {
    /// Creates a [`RawView`] from an `Arc`-allocated view allocation,
    /// taking over its strong reference.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The vtable stored in `data`'s header was built for exactly the
    ///    vtable type `V` and the view type `R`.
    #[inline]
    pub(super) unsafe fn from_arc<R: 'static>(data: triomphe::Arc<ViewData<V, R>>) -> Self {
        let ptr: *const ViewData<V, R> = triomphe::Arc::into_raw(data);
        let ptr: *mut ErasedViewData = ptr.cast::<ErasedViewData>().cast_mut();

        // SAFETY: Triomphe guarantees that `Arc::into_raw` returns a
        // non-null pointer.
        let ptr: NonNull<ErasedViewData> = unsafe { NonNull::new_unchecked(ptr) };

        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Creates an empty view backed by the tier's shared no-op table.
    ///
    /// An empty view produces empty cursors and reports every cursor as
    /// at-end.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            ptr: V::empty_data(),
            _marker: PhantomData,
        }
    }

    /// Reads the vtable out of the allocation's header.
    #[inline]
    fn vtable(&self) -> &'static V {
        // SAFETY: The pointee is a live `ViewData<V, R>` for some `R` whose
        // header vtable type is `V`, as guaranteed by the invariants on
        // `ptr`.
        unsafe { ErasedViewData::vtable_of::<V>(self.ptr) }
    }

    /// Returns the [`TypeId`] of the concrete view type, or of the private
    /// empty-view type for the empty state.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.vtable().view_ops().type_id()
    }

    /// Returns the [`core::any::type_name`] of the concrete view type, or
    /// `"(empty)"` for the empty state.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.vtable().view_ops().type_name()
    }

    /// Returns `true` if this view is in the empty state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_id() == TypeId::of::<EmptyView>()
    }

    /// Produces an erased cursor positioned at the view's first element.
    ///
    /// An empty view produces an empty cursor.
    #[inline]
    pub fn begin(&self) -> RawCursor<T, V::CursorVtable> {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        unsafe { self.vtable().view_ops().begin(self.ptr) }
    }

    /// Returns `true` if `cursor` has moved past the last element of this
    /// view.
    ///
    /// An empty cursor is always at the end, and every cursor is at the end
    /// of an empty view.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is non-empty and was not produced by this view
    /// (detected by comparing the concrete cursor type).
    pub fn at_end(&self, cursor: &RawCursor<T, V::CursorVtable>) -> bool {
        if cursor.is_empty() || self.is_empty() {
            return true;
        }
        assert_eq!(
            cursor.type_id(),
            self.vtable().view_ops().cursor_type_id(),
            "cursor does not belong to this view"
        );
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We just checked that the cursor's concrete type is the one this
        //    view's `begin` produces.
        unsafe {
            self.vtable()
                .view_ops()
                .at_end(self.ptr, cursor.erased_ptr())
        }
    }

    /// Returns the number of elements in the view. Zero for the empty state.
    #[inline]
    pub fn len(&self) -> usize
    where
        V: RandomAccessViewVtableKind<T>,
    {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        unsafe { self.vtable().random_access_ops().len(self.ptr) }
    }
}

impl<T: 'static, V: ViewVtableKind<T>> Clone for RawView<T, V> {
    fn clone(&self) -> Self {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header, and we own a
        //    strong reference (invariant 2 on `ptr`).
        let ptr = unsafe { self.vtable().view_ops().clone_arc(self.ptr) };
        Self {
            // SAFETY invariants on `ptr` hold: the clone entry returns the
            // same allocation with its reference count bumped (or the shared
            // empty allocation).
            ptr,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, V: ViewVtableKind<T>> Drop for RawView<T, V> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We transfer our strong reference (invariant 2 on `ptr`) to the
        //    drop entry and never use the pointer again; the empty table's
        //    entry is a no-op for the shared empty allocation.
        unsafe {
            self.vtable().view_ops().drop(self.ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::{vec, vec::Vec};

    use super::*;
    use crate::{
        protocol::{BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View},
        view::vtable::{RandomAccessViewVtable, ViewVtable},
        cursor::{ForwardVtable, RandomAccessVtable},
    };

    #[derive(Clone)]
    struct SharedInts {
        data: triomphe::Arc<Vec<i32>>,
    }

    #[derive(Clone)]
    struct SharedIntsCursor {
        data: triomphe::Arc<Vec<i32>>,
        position: usize,
    }

    impl Cursor for SharedIntsCursor {
        type Item = i32;

        fn read(&self) -> i32 {
            self.data[self.position]
        }

        fn next(&mut self) {
            self.position += 1;
        }
    }

    impl BidirectionalCursor for SharedIntsCursor {
        fn prev(&mut self) {
            self.position -= 1;
        }
    }

    impl RandomAccessCursor for SharedIntsCursor {
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

    impl View for SharedInts {
        type Item = i32;
        type Cursor = SharedIntsCursor;

        fn begin(&self) -> SharedIntsCursor {
            SharedIntsCursor {
                data: self.data.clone(),
                position: 0,
            }
        }

        fn at_end(&self, cursor: &SharedIntsCursor) -> bool {
            cursor.position >= self.data.len()
        }
    }

    impl ExactSizeView for SharedInts {
        fn len(&self) -> usize {
            self.data.len()
        }
    }

    fn shared(values: Vec<i32>) -> SharedInts {
        SharedInts {
            data: triomphe::Arc::new(values),
        }
    }

    #[test]
    fn test_forward_erasure_walk() {
        let view = ViewVtable::erase_forward(shared(vec![1, 2, 3]));
        let mut cursor = view.begin();
        let mut collected = Vec::new();
        while !view.at_end(&cursor) {
            collected.push(cursor.read());
            cursor.next();
        }
        assert_eq!(collected, [1, 2, 3]);
    }

    #[test]
    fn test_random_access_erasure_len() {
        let view = RandomAccessViewVtable::erase_random_access(shared(vec![5, 6, 7, 8]));
        assert_eq!(view.len(), 4);
        let mut cursor = view.begin();
        cursor.advance(3);
        assert_eq!(cursor.read(), 8);
        cursor.prev();
        assert_eq!(cursor.read(), 7);
    }

    #[test]
    fn test_clone_shares_the_view() {
        let view = ViewVtable::erase_forward(shared(vec![9]));
        let clone = view.clone();
        assert_eq!(view.type_id(), clone.type_id());
        let cursor = clone.begin();
        assert!(view.at_end(&cursor) == clone.at_end(&cursor));
    }

    #[test]
    fn test_empty_view_is_inert() {
        let view = RawView::<i32, ViewVtable<i32, ForwardVtable<i32>>>::empty();
        assert!(view.is_empty());
        let cursor = view.begin();
        assert!(cursor.is_empty());
        assert!(view.at_end(&cursor));
    }

    #[test]
    fn test_empty_random_access_view_len_is_zero() {
        let view =
            RawView::<i32, RandomAccessViewVtable<i32, RandomAccessVtable<i32>>>::empty();
        assert_eq!(view.len(), 0);
    }

    #[test]
    #[should_panic(expected = "cursor does not belong to this view")]
    fn test_foreign_cursor_is_rejected() {
        #[derive(Clone)]
        struct OtherCursor;

        impl Cursor for OtherCursor {
            type Item = i32;

            fn read(&self) -> i32 {
                0
            }

            fn next(&mut self) {}
        }

        let view = ViewVtable::erase_forward(shared(vec![1]));
        let foreign = ForwardVtable::erase(OtherCursor);
        let _ = view.at_end(&foreign);
    }

    #[test]
    fn test_not_send_sync() {
        static_assertions::assert_not_impl_any!(
            RawView<i32, ViewVtable<i32, ForwardVtable<i32>>>: Send, Sync
        );
    }
}

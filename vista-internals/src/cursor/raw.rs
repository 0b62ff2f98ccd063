//! The owned type-erased cursor.
//!
//! This module encapsulates the `ptr` field of [`RawCursor`], ensuring it is
//! only visible within this module. This visibility restriction guarantees
//! the safety invariant: **the pointer always designates either a
//! `Box`-allocated `CursorData<V, C>` whose header vtable was built for
//! exactly `V` and `C`, or the shared empty allocation of the tier `V`.**
//!
//! # Safety Invariant
//!
//! Since the `ptr` field can only be set via [`RawCursor::from_boxed`]
//! (which receives a freshly boxed, correctly paired allocation) or
//! [`RawCursor::empty`] (which uses the tier's promoted empty allocation),
//! and cannot be modified afterwards, the pairing between the vtable read
//! from the header and the payload behind the pointer holds for the value's
//! entire lifetime.
//!
//! The [`Drop`] implementation relies on this invariant to dispatch the
//! correct deallocation (a no-op for the empty state).

use alloc::boxed::Box;
use core::{any::TypeId, marker::PhantomData, ptr::NonNull};

use crate::cursor::{
    data::{CursorData, ErasedCursorData},
    vtable::{
        BidirectionalCursorVtableKind, CursorVtableKind, EmptyCursor,
        RandomAccessCursorVtableKind,
    },
};

/// An owned cursor whose concrete type has been erased behind the vtable
/// tier `V`.
///
/// Produced by the `erase` constructors on the tier vtables (usually via the
/// `ErasableCursor` trait in [`category`]). All operations dispatch through
/// the `&'static` vtable stored in the allocation's header; none of them
/// perform a runtime capability test; a tier the vtable type does not have
/// is a missing trait bound at compile time.
///
/// # The empty state
///
/// [`RawCursor::empty`] (also reachable through [`RawCursor::take`])
/// produces a cursor backed by the tier's shared no-op table: dropping and
/// moving it do nothing, cloning it yields another empty cursor, and reading
/// it is a fail-fast panic. This is the state a moved-from cursor is left
/// in.
///
/// [`category`]: crate::category
pub struct RawCursor<T: 'static, V: CursorVtableKind<T>> {
    /// Pointer to the erased cursor allocation.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. The pointer was created either from `Box<CursorData<V, C>>` via
    ///    [`Box::into_raw`] (for some cursor type `C` matching the header
    ///    vtable) or from [`CursorVtableKind::empty_data`] for this `V`.
    /// 2. In the boxed case, this struct exclusively owns the allocation; in
    ///    the empty case, the allocation is shared, immutable, and its table
    ///    entries never access it.
    /// 3. The pointee is properly initialized for the entire lifetime of
    ///    this object, except during the execution of the [`Drop`]
    ///    implementation.
    ptr: NonNull<ErasedCursorData>,
    /// Marker tying the erased cursor to its element type and vtable tier.
    _marker: PhantomData<(&'static V, fn() -> T)>,
}

impl<T: 'static, V: CursorVtableKind<T>> RawCursor<T, V> {
    /// Creates a [`RawCursor`] from a freshly boxed cursor allocation.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The vtable stored in `data`'s header was built for exactly the
    ///    vtable type `V` and the cursor type `C`.
    #[inline]
    pub(super) unsafe fn from_boxed<C: 'static>(data: Box<CursorData<V, C>>) -> Self {
        let ptr: *mut CursorData<V, C> = Box::into_raw(data);
        let ptr: *mut ErasedCursorData = ptr.cast::<ErasedCursorData>();

        // SAFETY: `Box::into_raw` returns a non-null pointer.
        let ptr: NonNull<ErasedCursorData> = unsafe { NonNull::new_unchecked(ptr) };

        Self {
            ptr,
            _marker: PhantomData,
        }
    }

    /// Creates an empty cursor backed by the tier's shared no-op table.
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
        // SAFETY: The pointee is a live `CursorData<V, C>` for some `C`
        // whose header vtable type is `V`, as guaranteed by the invariants
        // on `ptr`.
        unsafe { ErasedCursorData::vtable_of::<V>(self.ptr) }
    }

    /// Returns the erased allocation pointer, for handing the cursor back to
    /// the view that produced it.
    #[inline]
    pub(crate) fn erased_ptr(&self) -> NonNull<ErasedCursorData> {
        self.ptr
    }

    /// Returns the [`TypeId`] of the concrete cursor type, or of the private
    /// empty-cursor type for the empty state.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.vtable().forward_ops().type_id()
    }

    /// Returns the [`core::any::type_name`] of the concrete cursor type, or
    /// `"(empty)"` for the empty state.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.vtable().forward_ops().type_name()
    }

    /// Returns `true` if this cursor is in the empty state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.type_id() == TypeId::of::<EmptyCursor>()
    }

    /// Reads the element at the cursor's current position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is empty, or if the concrete cursor's `read`
    /// panics (for example when positioned past the end of its view).
    #[inline]
    pub fn read(&self) -> T {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        unsafe { self.vtable().forward_ops().read(self.ptr) }
    }

    /// Advances the cursor by one position. A no-op on an empty cursor.
    #[inline]
    pub fn next(&mut self) {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We hold exclusive access through `&mut self`, and the empty
        //    table's entry never accesses the shared empty allocation.
        unsafe {
            self.vtable().forward_ops().next(self.ptr);
        }
    }

    /// Moves the cursor back by one position. A no-op on an empty cursor.
    #[inline]
    pub fn prev(&mut self)
    where
        V: BidirectionalCursorVtableKind<T>,
    {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We hold exclusive access through `&mut self`, and the empty
        //    table's entry never accesses the shared empty allocation.
        unsafe {
            self.vtable().bidirectional_ops().prev(self.ptr);
        }
    }

    /// Moves the cursor by the given signed offset. A no-op on an empty
    /// cursor.
    #[inline]
    pub fn advance(&mut self, offset: isize)
    where
        V: RandomAccessCursorVtableKind<T>,
    {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We hold exclusive access through `&mut self`, and the empty
        //    table's entry never accesses the shared empty allocation.
        unsafe {
            self.vtable().random_access_ops().advance(self.ptr, offset);
        }
    }

    /// Returns the signed distance from `self` to `other`.
    ///
    /// Two empty cursors are at distance zero.
    ///
    /// # Panics
    ///
    /// Panics if exactly one of the cursors is empty, or if the two cursors
    /// erase different concrete cursor types.
    pub fn distance_to(&self, other: &Self) -> isize
    where
        V: RandomAccessCursorVtableKind<T>,
    {
        assert_eq!(
            self.type_id(),
            other.type_id(),
            "distance between cursors of different views"
        );
        // SAFETY:
        // 1. The vtable comes from `self`'s own header.
        // 2. `other` erases the same concrete cursor type; we just checked
        //    the type ids match (the empty/empty case dispatches to the
        //    no-op table, which reports distance zero).
        unsafe {
            self.vtable()
                .random_access_ops()
                .distance_to(self.ptr, other.ptr)
        }
    }

    /// Moves the cursor out, leaving `self` empty.
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        core::mem::replace(self, Self::empty())
    }
}

impl<T: 'static, V: CursorVtableKind<T>> Clone for RawCursor<T, V> {
    fn clone(&self) -> Self {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        let ptr = unsafe { self.vtable().forward_ops().clone(self.ptr) };
        Self {
            // SAFETY invariants on `ptr` hold: the clone entry returns
            // either a fresh `Box`-allocated pairing of the same `V` and `C`
            // or the shared empty allocation.
            ptr,
            _marker: PhantomData,
        }
    }
}

impl<T: 'static, V: CursorVtableKind<T>> Drop for RawCursor<T, V> {
    #[inline]
    fn drop(&mut self) {
        // SAFETY:
        // 1. The vtable comes from the allocation's own header.
        // 2. We own the allocation (invariant 2 on `ptr`), it has not been
        //    dropped before, and it is not used after this call; the empty
        //    table's entry is a no-op for the shared empty allocation.
        unsafe {
            self.vtable().forward_ops().drop(self.ptr);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        cursor::vtable::{ForwardVtable, RandomAccessVtable},
        protocol::{BidirectionalCursor, Cursor, RandomAccessCursor},
    };

    #[derive(Clone)]
    struct CountingCursor {
        value: i64,
    }

    impl Cursor for CountingCursor {
        type Item = i64;

        fn read(&self) -> i64 {
            self.value
        }

        fn next(&mut self) {
            self.value += 1;
        }
    }

    impl BidirectionalCursor for CountingCursor {
        fn prev(&mut self) {
            self.value -= 1;
        }
    }

    impl RandomAccessCursor for CountingCursor {
        fn advance(&mut self, offset: isize) {
            self.value += offset as i64;
        }

        fn distance_to(&self, other: &Self) -> isize {
            (other.value - self.value) as isize
        }
    }

    #[test]
    fn test_forward_erasure_round_trip() {
        let mut cursor = ForwardVtable::erase(CountingCursor { value: 10 });
        assert_eq!(cursor.read(), 10);
        cursor.next();
        cursor.next();
        assert_eq!(cursor.read(), 12);
        assert!(!cursor.is_empty());
        assert_eq!(cursor.type_id(), TypeId::of::<CountingCursor>());
    }

    #[test]
    fn test_random_access_erasure() {
        let mut cursor = RandomAccessVtable::erase(CountingCursor { value: 0 });
        cursor.advance(5);
        assert_eq!(cursor.read(), 5);
        cursor.prev();
        assert_eq!(cursor.read(), 4);
        let other = cursor.clone();
        cursor.advance(3);
        assert_eq!(other.distance_to(&cursor), 3);
        assert_eq!(cursor.distance_to(&other), -3);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut cursor = ForwardVtable::erase(CountingCursor { value: 0 });
        let clone = cursor.clone();
        cursor.next();
        assert_eq!(cursor.read(), 1);
        assert_eq!(clone.read(), 0);
    }

    #[test]
    fn test_empty_cursor_is_inert() {
        let mut empty = RawCursor::<i64, ForwardVtable<i64>>::empty();
        assert!(empty.is_empty());
        assert_eq!(empty.type_name(), "(empty)");
        empty.next();
        let clone = empty.clone();
        assert!(clone.is_empty());
    }

    #[test]
    #[should_panic(expected = "read on an empty cursor")]
    fn test_empty_cursor_read_panics() {
        let empty = RawCursor::<i64, ForwardVtable<i64>>::empty();
        let _ = empty.read();
    }

    #[test]
    fn test_take_leaves_source_empty() {
        let mut cursor = ForwardVtable::erase(CountingCursor { value: 3 });
        let taken = cursor.take();
        assert!(cursor.is_empty());
        assert_eq!(taken.read(), 3);
    }

    #[test]
    fn test_empty_distance_is_zero() {
        let a = RawCursor::<i64, RandomAccessVtable<i64>>::empty();
        let b = RawCursor::<i64, RandomAccessVtable<i64>>::empty();
        assert_eq!(a.distance_to(&b), 0);
    }

    #[test]
    fn test_not_send_sync() {
        static_assertions::assert_not_impl_any!(
            RawCursor<i64, ForwardVtable<i64>>: Send, Sync
        );
    }
}

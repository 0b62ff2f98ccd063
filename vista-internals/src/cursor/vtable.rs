//! Capability-tiered vtables for type-erased cursor operations.
//!
//! This module contains the vtables that enable calling [`Cursor`] methods
//! on cursors whose concrete type `C` has been erased. The vtables store
//! function pointers that dispatch to the correct typed implementations.
//!
//! Tiers are modeled as distinct vtable types, each embedding the previous
//! tier's operation block and adding its own:
//!
//! - [`ForwardVtable`]: identification, destruction, cloning, `read`, `next`
//! - [`BidirectionalVtable`]: the above plus `prev`
//! - [`RandomAccessVtable`]: the above plus `advance` and `distance_to`
//!
//! A table for a tier is only ever constructed from a cursor type that
//! implements that tier's protocol trait, and a lower tier's table simply
//! has no slot for higher-tier operations, which is what turns a tier
//! mismatch into a missing trait bound at compile time.
//!
//! This module encapsulates the vtable fields so they cannot be accessed
//! directly. This visibility restriction guarantees the safety invariant:
//! **a vtable's function pointers are always the functions defined below,
//! instantiated with the vtable type and cursor type that were used to
//! create it**.
//!
//! # The empty tables
//!
//! Each tier also has a shared no-op table backing the empty cursor state.
//! Its entries never access the pointee: destruction and movement do
//! nothing, cloning returns the input pointer (the empty allocation is a
//! promoted constant, not a `Box`), distance is zero, and `read` is a
//! fail-fast panic. The empty table reports the type id of the private
//! [`EmptyCursor`] type, which is how [`RawCursor::is_empty`] recognizes the
//! state without relying on table addresses.
//!
//! [`Cursor`]: crate::protocol::Cursor
//! [`RawCursor`]: crate::cursor::RawCursor
//! [`RawCursor::is_empty`]: crate::cursor::RawCursor::is_empty

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{
    cursor::{
        data::{CursorData, ErasedCursorData},
        raw::RawCursor,
    },
    protocol::{BidirectionalCursor, Cursor, RandomAccessCursor},
};

/// The cursor type reported by the empty tables.
///
/// Never instantiated inside a real erased allocation; its [`TypeId`] is the
/// recognizable signature of the empty state.
#[derive(Clone, Copy)]
pub(crate) struct EmptyCursor;

/// The operation block shared by every cursor tier.
///
/// # Safety Invariant
///
/// The function pointer fields are guaranteed to point to the functions
/// defined below instantiated with the vtable type `V` and cursor type `C`
/// that were used to create this block (or the empty thunks for the empty
/// tables, which never access the pointee).
pub struct ForwardOps<T: 'static> {
    /// Gets the [`TypeId`] of the cursor type that was used to create this
    /// block.
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the cursor type.
    type_name: fn() -> &'static str,
    /// Drops the boxed cursor allocation pointed to by this pointer.
    drop: unsafe fn(NonNull<ErasedCursorData>),
    /// Clones the cursor into a fresh allocation and returns it.
    clone: unsafe fn(NonNull<ErasedCursorData>) -> NonNull<ErasedCursorData>,
    /// Reads the element at the cursor's current position.
    read: unsafe fn(NonNull<ErasedCursorData>) -> T,
    /// Advances the cursor by one position.
    next: unsafe fn(NonNull<ErasedCursorData>),
}

impl<T: 'static> Clone for ForwardOps<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static> Copy for ForwardOps<T> {}

impl<T: 'static> ForwardOps<T> {
    /// Creates the operation block for the cursor type `C` inside the vtable
    /// type `V`.
    pub(super) const fn new<V: 'static, C>() -> Self
    where
        C: Cursor<Item = T> + Clone + 'static,
    {
        Self {
            type_id: TypeId::of::<C>,
            type_name: core::any::type_name::<C>,
            drop: drop_cursor::<V, C>,
            clone: clone_cursor::<V, C>,
            read: read_cursor::<V, C>,
            next: next_cursor::<V, C>,
        }
    }

    /// Creates the no-op operation block backing the empty cursor state.
    pub(super) const fn empty() -> Self {
        Self {
            type_id: TypeId::of::<EmptyCursor>,
            type_name: empty_type_name,
            drop: drop_empty,
            clone: clone_empty,
            read: read_empty::<T>,
            next: next_empty,
        }
    }

    /// Gets the [`TypeId`] of the cursor type behind this block.
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the cursor type behind this
    /// block.
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Drops the cursor allocation at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    /// 2. Ownership of the allocation is transferred to this call: it has
    ///    not previously been dropped and will not be used afterwards.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<ErasedCursorData>) {
        // SAFETY: `self.drop` is `drop_cursor::<V, C>` for the allocation's
        // own `V` and `C` (or the no-op empty thunk). Its requirements are
        // guaranteed by the caller.
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Clones the cursor allocation at `ptr` into a fresh allocation.
    ///
    /// May panic if the concrete cursor's `Clone` impl panics.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    #[inline]
    pub(super) unsafe fn clone(&self, ptr: NonNull<ErasedCursorData>) -> NonNull<ErasedCursorData> {
        // SAFETY: `self.clone` is `clone_cursor::<V, C>` for the
        // allocation's own `V` and `C` (or the empty thunk, which returns
        // the shared empty allocation). Its requirements are guaranteed by
        // the caller.
        unsafe { (self.clone)(ptr) }
    }

    /// Reads the element at the cursor's current position.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    ///
    /// # Panics
    ///
    /// Panics if this is the empty block, or if the concrete cursor's
    /// `read` panics (for example when positioned past the end).
    #[inline]
    pub(super) unsafe fn read(&self, ptr: NonNull<ErasedCursorData>) -> T {
        // SAFETY: `self.read` is `read_cursor::<V, C>` for the allocation's
        // own `V` and `C` (or the panicking empty thunk). Its requirements
        // are guaranteed by the caller.
        unsafe { (self.read)(ptr) }
    }

    /// Advances the cursor at `ptr` by one position.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    /// 2. Exclusive access to the allocation is held for the duration of the
    ///    call.
    #[inline]
    pub(super) unsafe fn next(&self, ptr: NonNull<ErasedCursorData>) {
        // SAFETY: `self.next` is `next_cursor::<V, C>` for the allocation's
        // own `V` and `C` (or the no-op empty thunk, which never accesses
        // the pointee). Its requirements are guaranteed by the caller.
        unsafe {
            (self.next)(ptr);
        }
    }
}

/// The operation block added at the bidirectional tier.
///
/// # Safety Invariant
///
/// As for [`ForwardOps`]: the field points to the function defined below,
/// instantiated with the vtable and cursor types used to create the block.
#[derive(Clone, Copy)]
pub struct BidirectionalOps {
    /// Moves the cursor back by one position.
    prev: unsafe fn(NonNull<ErasedCursorData>),
}

impl BidirectionalOps {
    /// Creates the operation block for the cursor type `C` inside the vtable
    /// type `V`.
    pub(super) const fn new<V: 'static, C>() -> Self
    where
        C: BidirectionalCursor + Clone + 'static,
    {
        Self {
            prev: prev_cursor::<V, C>,
        }
    }

    /// Creates the no-op operation block backing the empty cursor state.
    pub(super) const fn empty() -> Self {
        Self { prev: next_empty }
    }

    /// Moves the cursor at `ptr` back by one position.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    /// 2. Exclusive access to the allocation is held for the duration of the
    ///    call.
    #[inline]
    pub(super) unsafe fn prev(&self, ptr: NonNull<ErasedCursorData>) {
        // SAFETY: `self.prev` is `prev_cursor::<V, C>` for the allocation's
        // own `V` and `C` (or the no-op empty thunk). Its requirements are
        // guaranteed by the caller.
        unsafe {
            (self.prev)(ptr);
        }
    }
}

/// The operation block added at the random-access tier.
///
/// # Safety Invariant
///
/// As for [`ForwardOps`]: both fields point to the functions defined below,
/// instantiated with the vtable and cursor types used to create the block.
#[derive(Clone, Copy)]
pub struct RandomAccessOps {
    /// Moves the cursor by a signed offset.
    advance: unsafe fn(NonNull<ErasedCursorData>, isize),
    /// Returns the signed distance between two cursors of the same concrete
    /// type.
    distance_to: unsafe fn(NonNull<ErasedCursorData>, NonNull<ErasedCursorData>) -> isize,
}

impl RandomAccessOps {
    /// Creates the operation block for the cursor type `C` inside the vtable
    /// type `V`.
    pub(super) const fn new<V: 'static, C>() -> Self
    where
        C: RandomAccessCursor + Clone + 'static,
    {
        Self {
            advance: advance_cursor::<V, C>,
            distance_to: distance_to_cursor::<V, C>,
        }
    }

    /// Creates the no-op operation block backing the empty cursor state.
    pub(super) const fn empty() -> Self {
        Self {
            advance: advance_empty,
            distance_to: distance_to_empty,
        }
    }

    /// Moves the cursor at `ptr` by `offset` positions.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    /// 2. Exclusive access to the allocation is held for the duration of the
    ///    call.
    #[inline]
    pub(super) unsafe fn advance(&self, ptr: NonNull<ErasedCursorData>, offset: isize) {
        // SAFETY: `self.advance` is `advance_cursor::<V, C>` for the
        // allocation's own `V` and `C` (or the no-op empty thunk). Its
        // requirements are guaranteed by the caller.
        unsafe {
            (self.advance)(ptr, offset);
        }
    }

    /// Returns the signed distance from the cursor at `a` to the cursor at
    /// `b`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in `a`'s own vtable header.
    /// 2. `b` holds a cursor of the same concrete type as `a`.
    #[inline]
    pub(super) unsafe fn distance_to(
        &self,
        a: NonNull<ErasedCursorData>,
        b: NonNull<ErasedCursorData>,
    ) -> isize {
        // SAFETY: `self.distance_to` is `distance_to_cursor::<V, C>` for
        // `a`'s own `V` and `C`, and `b` holds the same `C` (guaranteed by
        // the caller).
        unsafe { (self.distance_to)(a, b) }
    }
}

/// Vtable for forward-tier erased cursors.
pub struct ForwardVtable<T: 'static> {
    /// The forward-tier operation block.
    forward: ForwardOps<T>,
}

impl<T: 'static> Clone for ForwardVtable<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static> Copy for ForwardVtable<T> {}

impl<T: 'static> ForwardVtable<T> {
    /// The shared no-op table backing the empty state at this tier.
    const EMPTY: &'static Self = &Self {
        forward: ForwardOps::empty(),
    };

    /// Erases `cursor` behind a forward-tier vtable.
    pub fn erase<C>(cursor: C) -> RawCursor<T, Self>
    where
        C: Cursor<Item = T> + Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                forward: ForwardOps::new::<Self, C>(),
            }
        };
        let data = Box::new(CursorData::new(vtable, cursor));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and cursor type.
        unsafe { RawCursor::from_boxed(data) }
    }
}

/// Vtable for bidirectional-tier erased cursors.
pub struct BidirectionalVtable<T: 'static> {
    /// The forward-tier operation block.
    forward: ForwardOps<T>,
    /// The bidirectional-tier operation block.
    bidirectional: BidirectionalOps,
}

impl<T: 'static> Clone for BidirectionalVtable<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static> Copy for BidirectionalVtable<T> {}

impl<T: 'static> BidirectionalVtable<T> {
    /// The shared no-op table backing the empty state at this tier.
    const EMPTY: &'static Self = &Self {
        forward: ForwardOps::empty(),
        bidirectional: BidirectionalOps::empty(),
    };

    /// Erases `cursor` behind a bidirectional-tier vtable.
    pub fn erase<C>(cursor: C) -> RawCursor<T, Self>
    where
        C: BidirectionalCursor<Item = T> + Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                forward: ForwardOps::new::<Self, C>(),
                bidirectional: BidirectionalOps::new::<Self, C>(),
            }
        };
        let data = Box::new(CursorData::new(vtable, cursor));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and cursor type.
        unsafe { RawCursor::from_boxed(data) }
    }
}

/// Vtable for random-access-tier erased cursors.
pub struct RandomAccessVtable<T: 'static> {
    /// The forward-tier operation block.
    forward: ForwardOps<T>,
    /// The bidirectional-tier operation block.
    bidirectional: BidirectionalOps,
    /// The random-access-tier operation block.
    random_access: RandomAccessOps,
}

impl<T: 'static> Clone for RandomAccessVtable<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static> Copy for RandomAccessVtable<T> {}

impl<T: 'static> RandomAccessVtable<T> {
    /// The shared no-op table backing the empty state at this tier.
    const EMPTY: &'static Self = &Self {
        forward: ForwardOps::empty(),
        bidirectional: BidirectionalOps::empty(),
        random_access: RandomAccessOps::empty(),
    };

    /// Erases `cursor` behind a random-access-tier vtable.
    pub fn erase<C>(cursor: C) -> RawCursor<T, Self>
    where
        C: RandomAccessCursor<Item = T> + Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                forward: ForwardOps::new::<Self, C>(),
                bidirectional: BidirectionalOps::new::<Self, C>(),
                random_access: RandomAccessOps::new::<Self, C>(),
            }
        };
        let data = Box::new(CursorData::new(vtable, cursor));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and cursor type.
        unsafe { RawCursor::from_boxed(data) }
    }
}

/// Sealing module for the vtable-kind traits.
mod sealed {
    use super::{BidirectionalVtable, ForwardVtable, RandomAccessVtable};

    /// Restricts the vtable-kind traits to the vtable types defined in this
    /// module.
    pub trait Sealed {}

    impl<T: 'static> Sealed for ForwardVtable<T> {}
    impl<T: 'static> Sealed for BidirectionalVtable<T> {}
    impl<T: 'static> Sealed for RandomAccessVtable<T> {}
}

/// Trait over the cursor vtable types of every tier.
///
/// Sealed: implemented exactly for [`ForwardVtable`],
/// [`BidirectionalVtable`], and [`RandomAccessVtable`].
pub trait CursorVtableKind<T: 'static>: sealed::Sealed + Sized + 'static {
    /// Returns the forward-tier operation block of this table.
    fn forward_ops(&self) -> &ForwardOps<T>;

    /// Returns the shared empty allocation for this tier, whose header is
    /// the tier's no-op table.
    fn empty_data() -> NonNull<ErasedCursorData>;
}

/// Trait over the cursor vtable types of the bidirectional tier and above.
pub trait BidirectionalCursorVtableKind<T: 'static>: CursorVtableKind<T> {
    /// Returns the bidirectional-tier operation block of this table.
    fn bidirectional_ops(&self) -> &BidirectionalOps;
}

/// Trait over the cursor vtable type of the random-access tier.
pub trait RandomAccessCursorVtableKind<T: 'static>: BidirectionalCursorVtableKind<T> {
    /// Returns the random-access-tier operation block of this table.
    fn random_access_ops(&self) -> &RandomAccessOps;
}

impl<T: 'static> CursorVtableKind<T> for ForwardVtable<T> {
    #[inline]
    fn forward_ops(&self) -> &ForwardOps<T> {
        &self.forward
    }

    fn empty_data() -> NonNull<ErasedCursorData> {
        let data: &'static CursorData<Self, EmptyCursor> =
            const { &CursorData::new(Self::EMPTY, EmptyCursor) };
        NonNull::from(data).cast::<ErasedCursorData>()
    }
}

impl<T: 'static> CursorVtableKind<T> for BidirectionalVtable<T> {
    #[inline]
    fn forward_ops(&self) -> &ForwardOps<T> {
        &self.forward
    }

    fn empty_data() -> NonNull<ErasedCursorData> {
        let data: &'static CursorData<Self, EmptyCursor> =
            const { &CursorData::new(Self::EMPTY, EmptyCursor) };
        NonNull::from(data).cast::<ErasedCursorData>()
    }
}

impl<T: 'static> BidirectionalCursorVtableKind<T> for BidirectionalVtable<T> {
    #[inline]
    fn bidirectional_ops(&self) -> &BidirectionalOps {
        &self.bidirectional
    }
}

impl<T: 'static> CursorVtableKind<T> for RandomAccessVtable<T> {
    #[inline]
    fn forward_ops(&self) -> &ForwardOps<T> {
        &self.forward
    }

    fn empty_data() -> NonNull<ErasedCursorData> {
        let data: &'static CursorData<Self, EmptyCursor> =
            const { &CursorData::new(Self::EMPTY, EmptyCursor) };
        NonNull::from(data).cast::<ErasedCursorData>()
    }
}

impl<T: 'static> BidirectionalCursorVtableKind<T> for RandomAccessVtable<T> {
    #[inline]
    fn bidirectional_ops(&self) -> &BidirectionalOps {
        &self.bidirectional
    }
}

impl<T: 'static> RandomAccessCursorVtableKind<T> for RandomAccessVtable<T> {
    #[inline]
    fn random_access_ops(&self) -> &RandomAccessOps {
        &self.random_access
    }
}

/// Drops the boxed `CursorData<V, C>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` comes from `Box<CursorData<V, C>>` via [`Box::into_raw`] with
///    exactly the `V` and `C` given here.
/// 2. Ownership of the allocation is transferred to this call: it has not
///    previously been dropped and will not be used afterwards.
unsafe fn drop_cursor<V: 'static, C: 'static>(ptr: NonNull<ErasedCursorData>) {
    let ptr: NonNull<CursorData<V, C>> = ptr.cast();
    // SAFETY: The pointer has the correct type and came from
    // `Box::into_raw`, and ownership is transferred, as guaranteed by the
    // caller.
    let boxed = unsafe { Box::from_raw(ptr.as_ptr()) };
    core::mem::drop(boxed);
}

/// Clones the cursor in the `CursorData<V, C>` at `ptr` into a fresh boxed
/// allocation sharing the same vtable.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `CursorData<V, C>` allocation with exactly the
///    `V` and `C` given here.
unsafe fn clone_cursor<V: 'static, C: Clone + 'static>(
    ptr: NonNull<ErasedCursorData>,
) -> NonNull<ErasedCursorData> {
    // SAFETY: The pointee is a live `CursorData<V, C>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedCursorData::downcast::<V, C>(ptr) };
    let data = Box::new(CursorData::new(this.vtable(), this.cursor().clone()));
    let raw: *mut CursorData<V, C> = Box::into_raw(data);
    let raw: *mut ErasedCursorData = raw.cast::<ErasedCursorData>();
    // SAFETY: `Box::into_raw` returns a non-null pointer.
    unsafe { NonNull::new_unchecked(raw) }
}

/// Reads the element at the current position of the cursor in the
/// `CursorData<V, C>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `CursorData<V, C>` allocation with exactly the
///    `V` and `C` given here.
unsafe fn read_cursor<V: 'static, C: Cursor + 'static>(ptr: NonNull<ErasedCursorData>) -> C::Item {
    // SAFETY: The pointee is a live `CursorData<V, C>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedCursorData::downcast::<V, C>(ptr) };
    this.cursor().read()
}

/// Advances the cursor in the `CursorData<V, C>` at `ptr` by one position.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `CursorData<V, C>` allocation with exactly the
///    `V` and `C` given here.
/// 2. Exclusive access to the allocation is held for the duration of the
///    call.
unsafe fn next_cursor<V: 'static, C: Cursor + 'static>(ptr: NonNull<ErasedCursorData>) {
    // SAFETY: The pointee is a live `CursorData<V, C>` we have exclusive
    // access to, as guaranteed by the caller.
    let this = unsafe { ErasedCursorData::downcast_mut::<V, C>(ptr) };
    this.cursor_mut().next();
}

/// Moves the cursor in the `CursorData<V, C>` at `ptr` back by one position.
///
/// # Safety
///
/// As [`next_cursor`].
unsafe fn prev_cursor<V: 'static, C: BidirectionalCursor + 'static>(
    ptr: NonNull<ErasedCursorData>,
) {
    // SAFETY: The pointee is a live `CursorData<V, C>` we have exclusive
    // access to, as guaranteed by the caller.
    let this = unsafe { ErasedCursorData::downcast_mut::<V, C>(ptr) };
    this.cursor_mut().prev();
}

/// Moves the cursor in the `CursorData<V, C>` at `ptr` by `offset`
/// positions.
///
/// # Safety
///
/// As [`next_cursor`].
unsafe fn advance_cursor<V: 'static, C: RandomAccessCursor + 'static>(
    ptr: NonNull<ErasedCursorData>,
    offset: isize,
) {
    // SAFETY: The pointee is a live `CursorData<V, C>` we have exclusive
    // access to, as guaranteed by the caller.
    let this = unsafe { ErasedCursorData::downcast_mut::<V, C>(ptr) };
    this.cursor_mut().advance(offset);
}

/// Returns the signed distance from the cursor at `a` to the cursor at `b`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `a` points to a live `CursorData<V, C>` allocation with exactly the
///    `V` and `C` given here.
/// 2. `b` points to a live cursor allocation whose cursor type is also `C`.
unsafe fn distance_to_cursor<V: 'static, C: RandomAccessCursor + 'static>(
    a: NonNull<ErasedCursorData>,
    b: NonNull<ErasedCursorData>,
) -> isize {
    // SAFETY: The pointee is a live `CursorData<V, C>` we may access shared,
    // as guaranteed by the caller.
    let a = unsafe { ErasedCursorData::downcast::<V, C>(a) };
    // SAFETY: `b`'s cursor type is also `C` (guaranteed by the caller), and
    // the vtable type does not affect the allocation layout, so projecting
    // the payload is valid.
    let b = unsafe { ErasedCursorData::cursor_payload::<C>(b) };
    a.cursor().distance_to(b)
}

/// Returns the display name reported by the empty tables.
fn empty_type_name() -> &'static str {
    "(empty)"
}

/// No-op destroy for the empty state; the empty allocation is a promoted
/// constant, not a `Box`.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn drop_empty(_ptr: NonNull<ErasedCursorData>) {}

/// Clone for the empty state: returns the shared empty allocation itself.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn clone_empty(ptr: NonNull<ErasedCursorData>) -> NonNull<ErasedCursorData> {
    ptr
}

/// Read for the empty state.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
///
/// # Panics
///
/// Always panics: an empty cursor has no element to read.
unsafe fn read_empty<T>(_ptr: NonNull<ErasedCursorData>) -> T {
    panic!("read on an empty cursor")
}

/// No-op movement for the empty state.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn next_empty(_ptr: NonNull<ErasedCursorData>) {}

/// No-op movement by offset for the empty state.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn advance_empty(_ptr: NonNull<ErasedCursorData>, _offset: isize) {}

/// Distance between empty cursors is zero.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn distance_to_empty(
    _a: NonNull<ErasedCursorData>,
    _b: NonNull<ErasedCursorData>,
) -> isize {
    0
}

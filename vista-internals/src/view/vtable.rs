//! Vtables for type-erased view operations.
//!
//! This module contains the vtables that enable calling [`View`] methods on
//! views whose concrete type `R` has been erased. The shape mirrors the
//! cursor vtables: a [`ViewOps`] block carried by every tier, plus a
//! [`RandomAccessViewOps`] block that exists only at the random-access tier
//! (where the erased view can report its length).
//!
//! A view vtable is parameterized by the *cursor* vtable type `CV` of its
//! tier: the `begin` entry produces an erased cursor of exactly that tier,
//! which is what keeps a view and the cursors it hands out on the same
//! capability level.
//!
//! This module encapsulates the vtable fields so they cannot be accessed
//! directly. This visibility restriction guarantees the safety invariant:
//! **a vtable's function pointers are always the functions defined below,
//! instantiated with the vtable type and view type that were used to create
//! it**.
//!
//! [`View`]: crate::protocol::View

use core::{any::TypeId, ptr::NonNull};

use crate::{
    cursor::{
        data::ErasedCursorData,
        vtable::{BidirectionalVtable, CursorVtableKind, EmptyCursor, ForwardVtable,
            RandomAccessVtable},
    },
    protocol::{BidirectionalCursor, ExactSizeView, RandomAccessCursor, View},
    view::{
        data::{ErasedViewData, ViewData},
        raw::RawView,
    },
    RawCursor,
};

/// The view type reported by the empty tables.
///
/// Never instantiated inside a real erased allocation; its [`TypeId`] is the
/// recognizable signature of the empty state.
#[derive(Clone, Copy)]
pub(crate) struct EmptyView;

/// The operation block shared by every view tier.
///
/// # Safety Invariant
///
/// The function pointer fields are guaranteed to point to the functions
/// defined below instantiated with the vtable type `V` and view type `R`
/// that were used to create this block (or the empty thunks for the empty
/// tables, which never access the pointee).
pub struct ViewOps<T: 'static, CV: CursorVtableKind<T>> {
    /// Gets the [`TypeId`] of the view type that was used to create this
    /// block.
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the view type.
    type_name: fn() -> &'static str,
    /// Gets the [`TypeId`] of the cursor type the view's `begin` produces.
    cursor_type_id: fn() -> TypeId,
    /// Drops one reference to the `Arc`-backed view allocation.
    drop: unsafe fn(NonNull<ErasedViewData>),
    /// Bumps the reference count of the view allocation and returns the same
    /// pointer.
    clone_arc: unsafe fn(NonNull<ErasedViewData>) -> NonNull<ErasedViewData>,
    /// Produces an erased cursor positioned at the view's first element.
    begin: unsafe fn(NonNull<ErasedViewData>) -> RawCursor<T, CV>,
    /// Tests whether an erased cursor produced by this view is past the last
    /// element.
    at_end: unsafe fn(NonNull<ErasedViewData>, NonNull<ErasedCursorData>) -> bool,
}

impl<T: 'static, CV: CursorVtableKind<T>> Clone for ViewOps<T, CV> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static, CV: CursorVtableKind<T>> Copy for ViewOps<T, CV> {}

impl<T: 'static, CV: CursorVtableKind<T>> ViewOps<T, CV> {
    /// Gets the [`TypeId`] of the view type behind this block.
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the view type behind this block.
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Gets the [`TypeId`] of the cursor type this view's `begin` produces.
    #[inline]
    pub(super) fn cursor_type_id(&self) -> TypeId {
        (self.cursor_type_id)()
    }

    /// Drops one reference to the view allocation at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    /// 2. One reference's ownership is transferred to this call: the caller
    ///    will not use the pointer through that reference afterwards.
    #[inline]
    pub(super) unsafe fn drop(&self, ptr: NonNull<ErasedViewData>) {
        // SAFETY: `self.drop` is `drop_view::<V, R>` for the allocation's
        // own `V` and `R` (or the no-op empty thunk). Its requirements are
        // guaranteed by the caller.
        unsafe {
            (self.drop)(ptr);
        }
    }

    /// Bumps the reference count of the view allocation at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    #[inline]
    pub(super) unsafe fn clone_arc(
        &self,
        ptr: NonNull<ErasedViewData>,
    ) -> NonNull<ErasedViewData> {
        // SAFETY: `self.clone_arc` is `clone_arc_view::<V, R>` for the
        // allocation's own `V` and `R` (or the empty thunk, which returns
        // the shared empty allocation). Its requirements are guaranteed by
        // the caller.
        unsafe { (self.clone_arc)(ptr) }
    }

    /// Produces an erased cursor positioned at the first element of the view
    /// at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    #[inline]
    pub(super) unsafe fn begin(&self, ptr: NonNull<ErasedViewData>) -> RawCursor<T, CV> {
        // SAFETY: `self.begin` is `begin_*::<V, R>` for the allocation's own
        // `V` and `R` (or the empty thunk, which produces an empty cursor).
        // Its requirements are guaranteed by the caller.
        unsafe { (self.begin)(ptr) }
    }

    /// Tests whether the erased cursor at `cursor` is past the last element
    /// of the view at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the view allocation's own vtable
    ///    header.
    /// 2. The cursor allocation holds a cursor of exactly the concrete
    ///    cursor type this view's `begin` produces.
    #[inline]
    pub(super) unsafe fn at_end(
        &self,
        ptr: NonNull<ErasedViewData>,
        cursor: NonNull<ErasedCursorData>,
    ) -> bool {
        // SAFETY: `self.at_end` is `at_end_view::<V, R>` for the
        // allocation's own `V` and `R`, and the cursor holds the matching
        // concrete cursor type (guaranteed by the caller).
        unsafe { (self.at_end)(ptr, cursor) }
    }
}

/// The operation block added at the random-access view tier.
///
/// # Safety Invariant
///
/// As for [`ViewOps`]: the field points to the function defined below,
/// instantiated with the vtable and view types used to create the block.
#[derive(Clone, Copy)]
pub struct RandomAccessViewOps {
    /// Returns the number of elements in the view.
    len: unsafe fn(NonNull<ErasedViewData>) -> usize,
}

impl RandomAccessViewOps {
    /// Returns the number of elements in the view at `ptr`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This block is the one stored in the allocation's own vtable
    ///    header.
    #[inline]
    pub(super) unsafe fn len(&self, ptr: NonNull<ErasedViewData>) -> usize {
        // SAFETY: `self.len` is `len_view::<V, R>` for the allocation's own
        // `V` and `R` (or the empty thunk, which reports zero). Its
        // requirements are guaranteed by the caller.
        unsafe { (self.len)(ptr) }
    }
}

/// Vtable for forward- and bidirectional-tier erased views, parameterized by
/// the cursor vtable type `CV` of the tier.
pub struct ViewVtable<T: 'static, CV: CursorVtableKind<T>> {
    /// The tier-independent operation block.
    view: ViewOps<T, CV>,
}

impl<T: 'static, CV: CursorVtableKind<T>> Clone for ViewVtable<T, CV> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static, CV: CursorVtableKind<T>> Copy for ViewVtable<T, CV> {}

impl<T: 'static, CV: CursorVtableKind<T>> ViewVtable<T, CV> {
    /// The shared no-op table backing the empty state at this tier.
    const EMPTY: &'static Self = &Self {
        view: ViewOps::empty(),
    };
}

impl<T: 'static> ViewVtable<T, ForwardVtable<T>> {
    /// Erases `view` behind a forward-tier vtable.
    pub fn erase_forward<R>(view: R) -> RawView<T, Self>
    where
        R: View<Item = T> + 'static,
        R::Cursor: Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                view: ViewOps {
                    type_id: TypeId::of::<R>,
                    type_name: core::any::type_name::<R>,
                    cursor_type_id: TypeId::of::<R::Cursor>,
                    drop: drop_view::<Self, R>,
                    clone_arc: clone_arc_view::<Self, R>,
                    begin: begin_forward::<Self, R>,
                    at_end: at_end_view::<Self, R>,
                },
            }
        };
        let data = triomphe::Arc::new(ViewData::new(vtable, view));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and view type.
        unsafe { RawView::from_arc(data) }
    }
}

impl<T: 'static> ViewVtable<T, BidirectionalVtable<T>> {
    /// Erases `view` behind a bidirectional-tier vtable.
    pub fn erase_bidirectional<R>(view: R) -> RawView<T, Self>
    where
        R: View<Item = T> + 'static,
        R::Cursor: BidirectionalCursor + Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                view: ViewOps {
                    type_id: TypeId::of::<R>,
                    type_name: core::any::type_name::<R>,
                    cursor_type_id: TypeId::of::<R::Cursor>,
                    drop: drop_view::<Self, R>,
                    clone_arc: clone_arc_view::<Self, R>,
                    begin: begin_bidirectional::<Self, R>,
                    at_end: at_end_view::<Self, R>,
                },
            }
        };
        let data = triomphe::Arc::new(ViewData::new(vtable, view));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and view type.
        unsafe { RawView::from_arc(data) }
    }
}

/// Vtable for random-access-tier erased views.
pub struct RandomAccessViewVtable<T: 'static, CV: CursorVtableKind<T>> {
    /// The tier-independent operation block.
    view: ViewOps<T, CV>,
    /// The random-access-tier operation block.
    random_access: RandomAccessViewOps,
}

impl<T: 'static, CV: CursorVtableKind<T>> Clone for RandomAccessViewVtable<T, CV> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: 'static, CV: CursorVtableKind<T>> Copy for RandomAccessViewVtable<T, CV> {}

impl<T: 'static, CV: CursorVtableKind<T>> RandomAccessViewVtable<T, CV> {
    /// The shared no-op table backing the empty state at this tier.
    const EMPTY: &'static Self = &Self {
        view: ViewOps::empty(),
        random_access: RandomAccessViewOps { len: len_empty },
    };
}

impl<T: 'static> RandomAccessViewVtable<T, RandomAccessVtable<T>> {
    /// Erases `view` behind a random-access-tier vtable.
    pub fn erase_random_access<R>(view: R) -> RawView<T, Self>
    where
        R: ExactSizeView<Item = T> + 'static,
        R::Cursor: RandomAccessCursor + Clone + 'static,
    {
        let vtable: &'static Self = const {
            &Self {
                view: ViewOps {
                    type_id: TypeId::of::<R>,
                    type_name: core::any::type_name::<R>,
                    cursor_type_id: TypeId::of::<R::Cursor>,
                    drop: drop_view::<Self, R>,
                    clone_arc: clone_arc_view::<Self, R>,
                    begin: begin_random_access::<Self, R>,
                    at_end: at_end_view::<Self, R>,
                },
                random_access: RandomAccessViewOps {
                    len: len_view::<Self, R>,
                },
            }
        };
        let data = triomphe::Arc::new(ViewData::new(vtable, view));
        // SAFETY: The vtable stored in `data` was built for exactly this
        // vtable type and view type.
        unsafe { RawView::from_arc(data) }
    }
}

/// Sealing module for the view vtable-kind traits.
mod sealed {
    use super::{CursorVtableKind, RandomAccessViewVtable, ViewVtable};

    /// Restricts the view vtable-kind traits to the vtable types defined in
    /// this module.
    pub trait Sealed {}

    impl<T: 'static, CV: CursorVtableKind<T>> Sealed for ViewVtable<T, CV> {}
    impl<T: 'static, CV: CursorVtableKind<T>> Sealed for RandomAccessViewVtable<T, CV> {}
}

/// Trait over the view vtable types of every tier.
///
/// Sealed: implemented exactly for [`ViewVtable`] and
/// [`RandomAccessViewVtable`].
pub trait ViewVtableKind<T: 'static>: sealed::Sealed + Sized + 'static {
    /// The cursor vtable type of this view tier; `begin` produces cursors
    /// erased behind it.
    type CursorVtable: CursorVtableKind<T>;

    /// Returns the tier-independent operation block of this table.
    fn view_ops(&self) -> &ViewOps<T, Self::CursorVtable>;

    /// Returns the shared empty allocation for this tier, whose header is
    /// the tier's no-op table.
    fn empty_data() -> NonNull<ErasedViewData>;
}

/// Trait over the view vtable type of the random-access tier.
pub trait RandomAccessViewVtableKind<T: 'static>: ViewVtableKind<T> {
    /// Returns the random-access-tier operation block of this table.
    fn random_access_ops(&self) -> &RandomAccessViewOps;
}

impl<T: 'static, CV: CursorVtableKind<T>> ViewVtableKind<T> for ViewVtable<T, CV> {
    type CursorVtable = CV;

    #[inline]
    fn view_ops(&self) -> &ViewOps<T, CV> {
        &self.view
    }

    fn empty_data() -> NonNull<ErasedViewData> {
        let data: &'static ViewData<Self, EmptyView> =
            const { &ViewData::new(Self::EMPTY, EmptyView) };
        NonNull::from(data).cast::<ErasedViewData>()
    }
}

impl<T: 'static, CV: CursorVtableKind<T>> ViewVtableKind<T> for RandomAccessViewVtable<T, CV> {
    type CursorVtable = CV;

    #[inline]
    fn view_ops(&self) -> &ViewOps<T, CV> {
        &self.view
    }

    fn empty_data() -> NonNull<ErasedViewData> {
        let data: &'static ViewData<Self, EmptyView> =
            const { &ViewData::new(Self::EMPTY, EmptyView) };
        NonNull::from(data).cast::<ErasedViewData>()
    }
}

impl<T: 'static, CV: CursorVtableKind<T>> RandomAccessViewVtableKind<T>
    for RandomAccessViewVtable<T, CV>
{
    #[inline]
    fn random_access_ops(&self) -> &RandomAccessViewOps {
        &self.random_access
    }
}

impl<T: 'static, CV: CursorVtableKind<T>> ViewOps<T, CV> {
    /// Creates the no-op operation block backing the empty view state.
    const fn empty() -> Self {
        Self {
            type_id: TypeId::of::<EmptyView>,
            type_name: empty_type_name,
            cursor_type_id: TypeId::of::<EmptyCursor>,
            drop: drop_view_empty,
            clone_arc: clone_arc_empty,
            begin: begin_empty::<T, CV>,
            at_end: at_end_empty,
        }
    }
}

/// Drops one `Arc` reference to the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` comes from `triomphe::Arc<ViewData<V, R>>` via
///    [`triomphe::Arc::into_raw`] with exactly the `V` and `R` given here.
/// 2. One reference's ownership is transferred to this call: the caller will
///    not use the pointer through that reference afterwards.
unsafe fn drop_view<V: 'static, R: 'static>(ptr: NonNull<ErasedViewData>) {
    let ptr: NonNull<ViewData<V, R>> = ptr.cast();
    // SAFETY: The pointer has the correct type and came from
    // `Arc::into_raw`, and one reference's ownership is transferred, as
    // guaranteed by the caller.
    let arc = unsafe { triomphe::Arc::from_raw(ptr.as_ptr()) };
    core::mem::drop(arc);
}

/// Bumps the reference count of the `ViewData<V, R>` at `ptr` and returns
/// the same pointer.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` comes from `triomphe::Arc<ViewData<V, R>>` via
///    [`triomphe::Arc::into_raw`] with exactly the `V` and `R` given here,
///    and that reference is still owned.
unsafe fn clone_arc_view<V: 'static, R: 'static>(
    ptr: NonNull<ErasedViewData>,
) -> NonNull<ErasedViewData> {
    let ptr: NonNull<ViewData<V, R>> = ptr.cast();
    // SAFETY: The pointer has the correct type and came from
    // `Arc::into_raw`, as guaranteed by the caller. We reconstruct the
    // original reference only temporarily.
    let arc = unsafe { triomphe::Arc::from_raw(ptr.as_ptr()) };
    let clone = arc.clone();
    // The original reference stays owned by the caller.
    core::mem::forget(arc);
    let raw: *const ViewData<V, R> = triomphe::Arc::into_raw(clone);
    let raw: *mut ErasedViewData = raw.cast::<ErasedViewData>().cast_mut();
    // SAFETY: `Arc::into_raw` returns a non-null pointer.
    unsafe { NonNull::new_unchecked(raw) }
}

/// Produces a forward-tier erased cursor at the first element of the view in
/// the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `ViewData<V, R>` allocation with exactly the
///    `V` and `R` given here.
unsafe fn begin_forward<V: 'static, R>(
    ptr: NonNull<ErasedViewData>,
) -> RawCursor<R::Item, ForwardVtable<R::Item>>
where
    R: View + 'static,
    R::Item: 'static,
    R::Cursor: Clone + 'static,
{
    // SAFETY: The pointee is a live `ViewData<V, R>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedViewData::downcast::<V, R>(ptr) };
    ForwardVtable::erase(this.view().begin())
}

/// Produces a bidirectional-tier erased cursor at the first element of the
/// view in the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// As [`begin_forward`].
unsafe fn begin_bidirectional<V: 'static, R>(
    ptr: NonNull<ErasedViewData>,
) -> RawCursor<R::Item, BidirectionalVtable<R::Item>>
where
    R: View + 'static,
    R::Item: 'static,
    R::Cursor: BidirectionalCursor + Clone + 'static,
{
    // SAFETY: The pointee is a live `ViewData<V, R>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedViewData::downcast::<V, R>(ptr) };
    BidirectionalVtable::erase(this.view().begin())
}

/// Produces a random-access-tier erased cursor at the first element of the
/// view in the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// As [`begin_forward`].
unsafe fn begin_random_access<V: 'static, R>(
    ptr: NonNull<ErasedViewData>,
) -> RawCursor<R::Item, RandomAccessVtable<R::Item>>
where
    R: View + 'static,
    R::Item: 'static,
    R::Cursor: RandomAccessCursor + Clone + 'static,
{
    // SAFETY: The pointee is a live `ViewData<V, R>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedViewData::downcast::<V, R>(ptr) };
    RandomAccessVtable::erase(this.view().begin())
}

/// Tests whether the erased cursor at `cursor` is past the last element of
/// the view in the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `ViewData<V, R>` allocation with exactly the
///    `V` and `R` given here.
/// 2. `cursor` points to a live cursor allocation whose cursor type is
///    `R::Cursor`.
unsafe fn at_end_view<V: 'static, R>(
    ptr: NonNull<ErasedViewData>,
    cursor: NonNull<ErasedCursorData>,
) -> bool
where
    R: View + 'static,
    R::Cursor: 'static,
{
    // SAFETY: The pointee is a live `ViewData<V, R>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedViewData::downcast::<V, R>(ptr) };
    // SAFETY: The cursor allocation holds an `R::Cursor`, as guaranteed by
    // the caller.
    let cursor = unsafe { ErasedCursorData::cursor_payload::<R::Cursor>(cursor) };
    this.view().at_end(cursor)
}

/// Returns the element count of the view in the `ViewData<V, R>` at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to a live `ViewData<V, R>` allocation with exactly the
///    `V` and `R` given here.
unsafe fn len_view<V: 'static, R>(ptr: NonNull<ErasedViewData>) -> usize
where
    R: ExactSizeView + 'static,
{
    // SAFETY: The pointee is a live `ViewData<V, R>` we may access shared,
    // as guaranteed by the caller.
    let this = unsafe { ErasedViewData::downcast::<V, R>(ptr) };
    this.view().len()
}

/// Returns the display name reported by the empty tables.
fn empty_type_name() -> &'static str {
    "(empty)"
}

/// No-op destroy for the empty state; the empty allocation is a promoted
/// constant, not an `Arc`.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn drop_view_empty(_ptr: NonNull<ErasedViewData>) {}

/// Clone for the empty state: returns the shared empty allocation itself.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn clone_arc_empty(ptr: NonNull<ErasedViewData>) -> NonNull<ErasedViewData> {
    ptr
}

/// Begin for the empty state: produces an empty cursor of the matching tier.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn begin_empty<T: 'static, CV: CursorVtableKind<T>>(
    _ptr: NonNull<ErasedViewData>,
) -> RawCursor<T, CV> {
    RawCursor::empty()
}

/// At-end for the empty state: an empty view has no elements, so every
/// cursor is at its end.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn at_end_empty(_ptr: NonNull<ErasedViewData>, _cursor: NonNull<ErasedCursorData>) -> bool {
    true
}

/// Length of the empty state.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only to fit the table.
unsafe fn len_empty(_ptr: NonNull<ErasedViewData>) -> usize {
    0
}

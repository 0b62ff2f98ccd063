//! Capability-tier markers and the erasure entry points.
//!
//! A *category* names how much a cursor can do, mirroring the protocol
//! ladder in [`protocol`]:
//!
//! - [`Forward`]: `read` and `next` only
//! - [`Bidirectional`]: adds `prev`
//! - [`RandomAccess`]: adds `advance` and `distance_to`, and lets the erased
//!   view report its length
//!
//! The markers are zero-sized types used as generic parameters on the erased
//! types (`AnyCursor<T, Cat>`, `AnyView<T, Cat>` in the public crate). The
//! [`Category`] trait maps each marker to the vtable types of its tier, so
//! that tier capabilities surface as trait bounds: asking a forward erased
//! cursor to step backwards fails to compile because [`Forward`]'s cursor
//! vtable type does not implement the bidirectional vtable-kind trait.
//!
//! [`ErasableCursor`] and [`ErasableView`] are the construction entry
//! points: they connect a concrete protocol implementation to the vtable of
//! the requested tier. Their impls are deliberately per-marker: the bounds
//! a concrete type must satisfy grow with the tier it is erased at.
//!
//! [`protocol`]: crate::protocol

use crate::{
    cursor::{
        BidirectionalVtable, CursorVtableKind, ForwardVtable, RandomAccessVtable, RawCursor,
    },
    protocol::{BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View},
    view::{RandomAccessViewVtable, RawView, ViewVtable, ViewVtableKind},
};

/// Marker type for the forward capability tier: cursors can read and move
/// forward.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Forward;

/// Marker type for the bidirectional capability tier: cursors can also move
/// backwards.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct Bidirectional;

/// Marker type for the random-access capability tier: cursors can jump by
/// arbitrary offsets and measure distances, and views know their length.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Debug, Default, Hash)]
pub struct RandomAccess;

/// Sealing module for [`Category`].
mod sealed {
    use super::{Bidirectional, Forward, RandomAccess};

    /// Restricts [`Category`](super::Category) to the three markers defined
    /// in this module.
    pub trait Sealed: 'static {}

    impl Sealed for Forward {}
    impl Sealed for Bidirectional {}
    impl Sealed for RandomAccess {}
}

/// Maps a capability-tier marker to the vtable types of its tier.
///
/// This trait is sealed and implemented exactly for [`Forward`],
/// [`Bidirectional`], and [`RandomAccess`].
pub trait Category: sealed::Sealed + 'static {
    /// The cursor vtable type of this tier.
    type CursorVtable<T: 'static>: CursorVtableKind<T>;

    /// The view vtable type of this tier. Its `begin` entry produces cursors
    /// erased behind [`Self::CursorVtable`].
    type ViewVtable<T: 'static>: ViewVtableKind<T, CursorVtable = Self::CursorVtable<T>>;
}

impl Category for Forward {
    type CursorVtable<T: 'static> = ForwardVtable<T>;
    type ViewVtable<T: 'static> = ViewVtable<T, ForwardVtable<T>>;
}

impl Category for Bidirectional {
    type CursorVtable<T: 'static> = BidirectionalVtable<T>;
    type ViewVtable<T: 'static> = ViewVtable<T, BidirectionalVtable<T>>;
}

impl Category for RandomAccess {
    type CursorVtable<T: 'static> = RandomAccessVtable<T>;
    type ViewVtable<T: 'static> = RandomAccessViewVtable<T, RandomAccessVtable<T>>;
}

/// A cursor type that can be erased at the capability tier `Cat`.
///
/// Blanket-implemented per marker: every `Cursor + Clone + 'static` type is
/// erasable at [`Forward`], every [`BidirectionalCursor`] additionally at
/// [`Bidirectional`], and every [`RandomAccessCursor`] additionally at
/// [`RandomAccess`].
pub trait ErasableCursor<Cat: Category>: Cursor + Sized
where
    Self::Item: 'static,
{
    /// Erases `self` behind the vtable of the tier `Cat`.
    fn erase_cursor(self) -> RawCursor<Self::Item, Cat::CursorVtable<Self::Item>>;
}

impl<C> ErasableCursor<Forward> for C
where
    C: Cursor + Clone + 'static,
    C::Item: 'static,
{
    #[inline]
    fn erase_cursor(self) -> RawCursor<C::Item, ForwardVtable<C::Item>> {
        ForwardVtable::erase(self)
    }
}

impl<C> ErasableCursor<Bidirectional> for C
where
    C: BidirectionalCursor + Clone + 'static,
    C::Item: 'static,
{
    #[inline]
    fn erase_cursor(self) -> RawCursor<C::Item, BidirectionalVtable<C::Item>> {
        BidirectionalVtable::erase(self)
    }
}

impl<C> ErasableCursor<RandomAccess> for C
where
    C: RandomAccessCursor + Clone + 'static,
    C::Item: 'static,
{
    #[inline]
    fn erase_cursor(self) -> RawCursor<C::Item, RandomAccessVtable<C::Item>> {
        RandomAccessVtable::erase(self)
    }
}

/// A view type that can be erased at the capability tier `Cat`.
///
/// Blanket-implemented per marker. The bounds grow with the tier: erasure at
/// [`RandomAccess`] additionally requires the view to be an
/// [`ExactSizeView`] and its cursors to be [`RandomAccessCursor`]s.
pub trait ErasableView<Cat: Category>: View + Sized
where
    Self::Item: 'static,
{
    /// Erases `self` behind the vtable of the tier `Cat`.
    fn erase_view(self) -> RawView<Self::Item, Cat::ViewVtable<Self::Item>>;
}

impl<R> ErasableView<Forward> for R
where
    R: View + 'static,
    R::Item: 'static,
    R::Cursor: Clone + 'static,
{
    #[inline]
    fn erase_view(self) -> RawView<R::Item, ViewVtable<R::Item, ForwardVtable<R::Item>>> {
        ViewVtable::erase_forward(self)
    }
}

impl<R> ErasableView<Bidirectional> for R
where
    R: View + 'static,
    R::Item: 'static,
    R::Cursor: BidirectionalCursor + Clone + 'static,
{
    #[inline]
    fn erase_view(self) -> RawView<R::Item, ViewVtable<R::Item, BidirectionalVtable<R::Item>>> {
        ViewVtable::erase_bidirectional(self)
    }
}

impl<R> ErasableView<RandomAccess> for R
where
    R: ExactSizeView + 'static,
    R::Item: 'static,
    R::Cursor: RandomAccessCursor + Clone + 'static,
{
    #[inline]
    fn erase_view(
        self,
    ) -> RawView<R::Item, RandomAccessViewVtable<R::Item, RandomAccessVtable<R::Item>>> {
        RandomAccessViewVtable::erase_random_access(self)
    }
}

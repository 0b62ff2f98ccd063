//! Capability-tier markers for erased views and cursors.
//!
//! A category names how much an erased cursor can do, and therefore what a
//! concrete type must implement to be erased at that tier:
//!
//! | Marker | Cursor operations | Erasure requires |
//! |---|---|---|
//! | [`Forward`] | `read`, `next` | [`Cursor`] + [`Clone`] |
//! | [`Bidirectional`] | + `prev` | [`BidirectionalCursor`] |
//! | [`RandomAccess`] | + `advance`, `distance_to`, view `len` | [`RandomAccessCursor`] + [`ExactSizeView`] |
//!
//! The tiers are genuine subsets: anything erasable at [`RandomAccess`] is
//! also erasable at the lower tiers. The price of a higher tier is paid at
//! erasure time (stricter bounds), never at call time: each tier's
//! operations live on its own vtable type, so a forward-erased cursor
//! simply has no `prev` to call, and the mistake is a compile-time error.
//!
//! [`Cursor`]: crate::protocol::Cursor
//! [`BidirectionalCursor`]: crate::protocol::BidirectionalCursor
//! [`RandomAccessCursor`]: crate::protocol::RandomAccessCursor
//! [`ExactSizeView`]: crate::protocol::ExactSizeView

pub use vista_internals::{
    category::{Bidirectional, Category, ErasableCursor, ErasableView, Forward, RandomAccess},
    cursor::{BidirectionalCursorVtableKind, CursorVtableKind, RandomAccessCursorVtableKind},
    view::{RandomAccessViewVtableKind, ViewVtableKind},
};

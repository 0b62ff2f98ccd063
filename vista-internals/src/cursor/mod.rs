//! Type-erased cursor storage.
//!
//! A cursor erased through this module is a single owned value,
//! [`RawCursor`], that can read, advance, clone, and destroy a concrete
//! cursor whose type has been forgotten. The concrete cursor lives in a
//! [`Box`]-backed allocation behind a `#[repr(C)]` header holding a
//! `&'static` vtable; every operation is an indirect call through that
//! table.
//!
//! Capability tiers are separate vtable *types* ([`ForwardVtable`],
//! [`BidirectionalVtable`], [`RandomAccessVtable`]), each embedding the
//! previous tier's operation block and adding its own. An erased cursor is
//! generic over its vtable type, so asking a forward cursor to step
//! backwards is a missing trait bound at compile time, not a runtime error.
//!
//! The empty state (a default-constructed or moved-from cursor) points at a
//! shared no-op table whose operations never touch the pointee: destroy and
//! advance do nothing, clone returns another empty cursor, and reading is a
//! documented fail-fast panic. See [`RawCursor::empty`].
//!
//! [`Box`]: alloc::boxed::Box

pub(crate) mod data;
pub(crate) mod vtable;

mod raw;

pub use data::{CursorData, ErasedCursorData};
pub use raw::RawCursor;
pub use vtable::{
    BidirectionalCursorVtableKind, BidirectionalOps, BidirectionalVtable, CursorVtableKind,
    ForwardOps, ForwardVtable, RandomAccessCursorVtableKind, RandomAccessOps, RandomAccessVtable,
};

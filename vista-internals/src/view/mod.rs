//! Type-erased view storage.
//!
//! A view erased through this module is a single owned value, [`RawView`],
//! that can produce erased cursors over a concrete range whose type has been
//! forgotten, and answer the end-of-range test for the cursors it produced.
//! The concrete view lives in a [`triomphe::Arc`]-backed allocation behind a
//! `#[repr(C)]` header holding a `&'static` vtable.
//!
//! # Allocation Strategy
//!
//! Unlike cursors (which use [`Box`]), views use [`triomphe::Arc`] for
//! storage. This enables:
//! - Cheap cloning through reference counting
//! - Shared ownership between a view and the iterators borrowing from it
//!
//! A cursor is a small, frequently cloned position; deep-cloning it is the
//! point. A view is the long-lived range itself, often shared by several
//! cursors and iterators at once.
//!
//! # End-of-range tests
//!
//! The end of an erased range may not be representable as an erasable cursor
//! (sentinel shapes vary per concrete range), so the erased view answers
//! [`RawView::at_end`] itself by downcasting the erased cursor back to the
//! concrete cursor type it produced. A cursor from a different view is
//! detected by type id and rejected with a panic; an empty cursor is always
//! at the end.
//!
//! [`Box`]: alloc::boxed::Box

pub(crate) mod data;
pub(crate) mod vtable;

mod raw;

pub use data::{ErasedViewData, ViewData};
pub use raw::RawView;
pub use vtable::{
    RandomAccessViewOps, RandomAccessViewVtable, RandomAccessViewVtableKind, ViewOps, ViewVtable,
    ViewVtableKind,
};

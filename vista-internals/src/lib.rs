#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`vista`].
//!
//! # Overview
//!
//! This crate contains the low-level, type-erased data structures and unsafe
//! operations that power the [`vista`] range-view library. It provides the
//! foundation for zero-cost type erasure through vtable-based dispatch, and
//! the union-backed storage engine behind the [`vista`] variant type.
//!
//! **This crate is an implementation detail.** No semantic versioning
//! guarantees are provided. Users should depend on the [`vista`] crate, not
//! this one.
//!
//! # Architecture
//!
//! The crate is organized around three storage engines plus the protocol
//! traits they dispatch to:
//!
//! - **[`variant`]**: Union-backed tagged storage over a tuple type list
//!   - [`RawVariant`]: One-offset tag plus max-size/max-align union storage
//!   - [`ChainStorage`]: `#[repr(C)]` right-leaning union chain placing every
//!     alternative at offset zero
//!   - [`AlternativeVtable`]: Function pointers for per-alternative dispatch
//!   - [`AlternativeList`]: Macro-stamped tuple impls carrying the `&'static`
//!     dispatch tables
//! - **[`cursor`]**: Type-erased cursor storage ([`Box`]-based allocation)
//!   - [`RawCursor`]: Owned erased cursor with a shared no-op empty state
//!   - `CursorData`: `#[repr(C)]` wrapper enabling field access on erased
//!     types
//!   - [`ForwardVtable`]/[`BidirectionalVtable`]/[`RandomAccessVtable`]:
//!     Capability-tiered function pointer tables
//! - **[`view`]**: Type-erased view storage ([`Arc`]-based allocation,
//!   similar structure)
//!   - [`RawView`]: Owned erased view; cloning bumps a reference count
//!   - `ViewData`: `#[repr(C)]` wrapper for field access
//!   - [`ViewVtable`]/[`RandomAccessViewVtable`]: Function pointers for
//!     dispatch
//! - **[`protocol`]**: Trait definitions for iteration behavior
//!   - [`Cursor`], [`BidirectionalCursor`], [`RandomAccessCursor`]: What a
//!     position in a range can do
//!   - [`View`], [`ExactSizeView`]: How a range produces cursors and detects
//!     their end
//! - **[`category`]**: Capability-tier markers ([`Forward`],
//!   [`Bidirectional`], [`RandomAccess`]) and the erasure entry points
//!
//! # Safety Strategy
//!
//! Type erasure requires careful handling to maintain Rust's type safety
//! guarantees. When we erase a type like `CursorData<V, MyCursor>` to
//! `CursorData<Erased, Erased>`, we must ensure that the vtable function
//! pointers still match the actual concrete type stored in memory.
//!
//! This crate maintains safety through:
//!
//! - **Module-based encapsulation**: Safety-critical types keep fields
//!   module-private, making invariants locally verifiable within a single
//!   file
//! - **`#[repr(C)]` layout**: Enables safe field projection on type-erased
//!   pointers without constructing invalid references
//! - **Documented vtable contracts**: Each vtable method specifies exactly
//!   when it can be safely called
//!
//! See the individual module documentation ([`variant`], [`cursor`],
//! [`view`]) for detailed explanations of how these patterns are applied.
//!
//! [`vista`]: https://docs.rs/vista/latest/vista/
//! [`ChainStorage`]: variant::ChainStorage
//! [`AlternativeVtable`]: variant::AlternativeVtable
//! [`AlternativeList`]: variant::AlternativeList
//! [`RawVariant`]: variant::RawVariant
//! [`ForwardVtable`]: cursor::ForwardVtable
//! [`BidirectionalVtable`]: cursor::BidirectionalVtable
//! [`RandomAccessVtable`]: cursor::RandomAccessVtable
//! [`ViewVtable`]: view::ViewVtable
//! [`RandomAccessViewVtable`]: view::RandomAccessViewVtable
//! [`Cursor`]: protocol::Cursor
//! [`BidirectionalCursor`]: protocol::BidirectionalCursor
//! [`RandomAccessCursor`]: protocol::RandomAccessCursor
//! [`View`]: protocol::View
//! [`ExactSizeView`]: protocol::ExactSizeView
//! [`Forward`]: category::Forward
//! [`Bidirectional`]: category::Bidirectional
//! [`RandomAccess`]: category::RandomAccess
//! [`Box`]: alloc::boxed::Box
//! [`Arc`]: triomphe::Arc

extern crate alloc;

pub mod category;
pub mod cursor;
pub mod protocol;
pub mod variant;
pub mod view;

mod util;

pub use cursor::RawCursor;
pub use util::Erased;
pub use variant::RawVariant;
pub use view::RawView;

#![cfg_attr(not(doc), no_std)]
#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    clippy::as_ptr_cast_mut,
    clippy::ptr_as_ptr,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Composable range views built on a hand-rolled variant engine and
//! type-erased cursors.
//!
//! ## Overview
//!
//! This crate provides two closely related pieces of machinery for working
//! with sequences generically:
//!
//! - [`Variant`]: a discriminated union over a tuple type list, with
//!   jump-table dispatch, panic-safe reassignment, and three visitation
//!   modes. Use it to hold exactly one of a closed set of alternatives
//!   (concrete view types included), with every operation on the active
//!   alternative resolved in O(1), never by a chain of type tests.
//! - [`AnyView`] / [`AnyCursor`]: type-erased ranges and positions. Use them
//!   to store and manipulate ranges of heterogeneous concrete type through
//!   one uniform value type, selected by a capability tier
//!   ([`Forward`], [`Bidirectional`], [`RandomAccess`]).
//!
//! Both are built on hand-rolled `&'static` vtables of function pointers
//! (not `dyn Trait` objects), constructed once per concrete type in the
//! [`vista-internals`] crate.
//!
//! ## Quick Example
//!
//! ```
//! use vista::{category::RandomAccess, views::VecView, AnyView};
//!
//! let view: AnyView<i32, RandomAccess> = AnyView::new(VecView::new(vec![10, 20, 30]));
//! assert_eq!(view.len(), 3);
//!
//! let doubled: Vec<i32> = view.iter().map(|value| value * 2).collect();
//! assert_eq!(doubled, [20, 40, 60]);
//! ```
//!
//! ## Core Concepts
//!
//! A **cursor** is a position in a range: it can [`read`] the element under
//! it and move. A **view** is the range itself: it hands out cursors via
//! [`begin`] and decides when a cursor has run off its end via [`at_end`].
//! The traits live in [`protocol`]; any type implementing them (your own
//! included) can be stored in a [`Variant`] or erased into an [`AnyView`].
//!
//! End-of-range detection deliberately lives on the view, not the cursor: an
//! erased range's end may not be representable as a cursor of the same
//! shape, so the erased view carries its own sentinel test.
//!
//! A **category** names how much a cursor can do. Erasure at a tier demands
//! the matching protocol trait and unlocks the matching operations; calling
//! a higher-tier operation on a lower-tier erased value is a compile-time
//! error, because the operations live on distinct erased types.
//!
//! The [`Variant`] half of the crate has no opinion about ranges at all: it
//! is a general sum type. Its lifecycle rules are spelled out in the
//! [`variant`] module documentation, including the *valueless* state a
//! variant falls into when a panic interrupts an in-place reconstruction.
//!
//! ## Project Goals
//!
//! - **Uniform dispatch**: every runtime decision is an indexed lookup in a
//!   `&'static` table built at compile time, shared by all instances of a
//!   shape.
//! - **Pay only for the tier you ask for**: a forward-erased view carries no
//!   backward or random-access machinery, and the absence is visible at
//!   compile time.
//! - **Honest failure states**: a variant that lost its value to a panic
//!   says so ([`Variant::is_valueless`]); a moved-from cursor is inert and
//!   safe to drop or query.
//! - **`no_std`**: the whole stack needs only `alloc`.
//!
//! For implementation details, see the [`vista-internals`] crate.
//!
//! [`vista-internals`]: vista_internals
//! [`read`]: protocol::Cursor::read
//! [`begin`]: protocol::View::begin
//! [`at_end`]: protocol::View::at_end
//! [`Forward`]: category::Forward
//! [`Bidirectional`]: category::Bidirectional
//! [`RandomAccess`]: category::RandomAccess

extern crate alloc;

pub mod any_cursor;
pub mod any_view;
pub mod category;
pub mod prelude;
pub mod protocol;
pub mod variant;
pub mod views;

pub use any_cursor::AnyCursor;
pub use any_view::{AnyView, AnyViewIter};
pub use variant::{BadVariantAccess, Variant};

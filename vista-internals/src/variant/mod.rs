//! Union-backed tagged storage over a tuple type list.
//!
//! This module implements the storage engine behind the public `Variant`
//! type: a discriminated union that holds exactly one alternative out of a
//! compile-time list, identified by a runtime tag, with every operation on
//! the active alternative dispatched through `&'static` tables of function
//! pointers rather than chains of runtime type tests.
//!
//! The pieces, leaf first:
//!
//! - [`storage`]: the [`ChainStorage`] union chain. A right-leaning chain of
//!   binary `#[repr(C)]` unions whose size and alignment are the maximum over
//!   all alternatives, and which places every alternative at offset zero so
//!   that indexed access is a pointer cast.
//! - [`vtable`]: per-alternative vtables ([`AlternativeVtable`] for the
//!   unconditional operations, [`CloneVtable`]/[`EqVtable`]/[`DebugVtable`]
//!   for operations that exist only when every alternative supports them).
//! - [`list`]: the [`AlternativeList`] family of traits, implemented for
//!   tuples up to arity 16 by a stamping macro. Each impl carries the
//!   `&'static` dispatch tables for its alternatives.
//! - [`raw`]: [`RawVariant`], the tag + storage pair that owns the active
//!   alternative and routes its lifecycle through the tables.
//! - [`visit`]: the visitor traits used to run a caller-supplied operation
//!   against the statically-typed active alternative.

pub(crate) mod storage;

mod list;
mod raw;
mod visit;
mod vtable;

pub use list::{
    AlternativeList, CloneableList, ComparableList, DebuggableList, ListSlot, RawVisitableBy,
    VisitableBy, VisitableByMut,
};
pub use raw::RawVariant;
pub use storage::{ChainEnd, ChainStorage};
pub use visit::{
    VisitAlternative, VisitAlternativeMut, VisitValueless, VisitorOutput,
};
pub use vtable::{AlternativeVtable, CloneVtable, DebugVtable, EqVtable};

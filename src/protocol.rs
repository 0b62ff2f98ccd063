//! The cursor/view protocol implemented by every concrete range.
//!
//! Implement these traits to make your own types storable in a
//! [`Variant`](crate::Variant), erasable into an
//! [`AnyView`](crate::AnyView), or usable by any protocol-generic code.
//! See the trait documentation for the exact contracts; the adapters in
//! [`views`](crate::views) are worked examples.

pub use vista_internals::protocol::{
    BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View,
};

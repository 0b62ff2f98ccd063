//! Convenience re-export of the types and traits most code needs.
//!
//! ```
//! use vista::prelude::*;
//!
//! let view: AnyView<i32, RandomAccess> = AnyView::new(VecView::new(vec![1, 2, 3]));
//! assert_eq!(view.len(), 3);
//! ```

pub use crate::{
    any_cursor::AnyCursor,
    any_view::{AnyView, AnyViewIter},
    category::{Bidirectional, Category, Forward, RandomAccess},
    protocol::{BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View},
    variant::{BadVariantAccess, Variant, VisitAlternative, VisitAlternativeMut, VisitorOutput},
    views::{IterView, VecView},
};

//! Concrete view adapters over common Rust data sources.
//!
//! These are the in-repo implementations of the [`protocol`] traits:
//!
//! - [`VecView`]: a random-access view over shared, immutable `Vec` data.
//!   Cursors index into the shared allocation, so they satisfy the full
//!   random-access protocol and the view knows its length.
//! - [`IterView`]: a forward view over any cloneable [`Iterator`]. Each
//!   cursor owns its own clone of the iterator plus the element under it,
//!   so the view can be walked any number of times.
//!
//! Both erase cleanly into [`AnyView`](crate::AnyView) at their respective
//! maximum tiers.
//!
//! [`protocol`]: crate::protocol

use alloc::vec::Vec;
use core::fmt;

use crate::protocol::{BidirectionalCursor, Cursor, ExactSizeView, RandomAccessCursor, View};

/// A random-access view over shared, immutable `Vec` data.
///
/// The data lives behind a reference count; cloning the view, and every
/// cursor it produces, shares the same allocation. Elements are produced by
/// value, so `T` must be [`Clone`].
///
/// # Examples
///
/// ```
/// use vista::{prelude::*, views::VecView};
///
/// let view = VecView::new(vec![3, 1, 2]);
/// assert_eq!(view.len(), 3);
///
/// let mut cursor = view.begin();
/// cursor.advance(1);
/// assert_eq!(cursor.read(), 1);
/// ```
pub struct VecView<T> {
    /// The shared element storage.
    data: triomphe::Arc<Vec<T>>,
}

impl<T> VecView<T> {
    /// Creates a view over the given elements.
    #[must_use]
    pub fn new(values: impl Into<Vec<T>>) -> Self {
        Self {
            data: triomphe::Arc::new(values.into()),
        }
    }
}

impl<T> Clone for VecView<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for VecView<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VecView").field(&self.data).finish()
    }
}

/// A position inside a [`VecView`].
pub struct VecCursor<T> {
    /// The shared element storage of the owning view.
    data: triomphe::Arc<Vec<T>>,
    /// The current element index; equal to `data.len()` at the end.
    position: usize,
}

impl<T> Clone for VecCursor<T> {
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            position: self.position,
        }
    }
}

impl<T: Clone + 'static> Cursor for VecCursor<T> {
    type Item = T;

    /// Returns a clone of the element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end of its view.
    fn read(&self) -> T {
        self.data[self.position].clone()
    }

    fn next(&mut self) {
        self.position += 1;
    }
}

impl<T: Clone + 'static> BidirectionalCursor for VecCursor<T> {
    fn prev(&mut self) {
        self.position -= 1;
    }
}

impl<T: Clone + 'static> RandomAccessCursor for VecCursor<T> {
    fn advance(&mut self, offset: isize) {
        self.position = self
            .position
            .checked_add_signed(offset)
            .expect("cursor advanced out of range");
    }

    fn distance_to(&self, other: &Self) -> isize {
        other.position as isize - self.position as isize
    }
}

impl<T: Clone + 'static> View for VecView<T> {
    type Item = T;
    type Cursor = VecCursor<T>;

    fn begin(&self) -> VecCursor<T> {
        VecCursor {
            data: self.data.clone(),
            position: 0,
        }
    }

    fn at_end(&self, cursor: &VecCursor<T>) -> bool {
        cursor.position >= self.data.len()
    }
}

impl<T: Clone + 'static> ExactSizeView for VecView<T> {
    fn len(&self) -> usize {
        self.data.len()
    }
}

/// A forward view over any cloneable [`Iterator`].
///
/// The iterator itself is the range description; every [`begin`] clones it
/// afresh, so the view can be walked repeatedly. Cursors cache the element
/// under them, which is what turns the one-shot `Iterator` protocol into
/// the re-readable cursor protocol.
///
/// [`begin`]: View::begin
///
/// # Examples
///
/// ```
/// use vista::{views::IterView, AnyView};
///
/// let view: AnyView<u32> = AnyView::new(IterView::new((1..=4).map(|n| n * n)));
/// let squares: Vec<u32> = view.iter().collect();
/// assert_eq!(squares, [1, 4, 9, 16]);
/// ```
#[derive(Clone, Debug)]
pub struct IterView<I> {
    /// The iterator cloned by every `begin`.
    iter: I,
}

impl<I: Iterator> IterView<I> {
    /// Creates a view over the given iterable.
    #[must_use]
    pub fn new<S>(source: S) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: source.into_iter(),
        }
    }
}

/// A position inside an [`IterView`].
pub struct IterCursor<I: Iterator> {
    /// The remaining elements past the current one.
    iter: I,
    /// The element under the cursor; `None` once past the end.
    current: Option<I::Item>,
}

impl<I> Clone for IterCursor<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    fn clone(&self) -> Self {
        Self {
            iter: self.iter.clone(),
            current: self.current.clone(),
        }
    }
}

impl<I> Cursor for IterCursor<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = I::Item;

    /// Returns a clone of the element under the cursor.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is at the end of its view.
    fn read(&self) -> I::Item {
        self.current
            .clone()
            .expect("read past the end of an iterator view")
    }

    fn next(&mut self) {
        self.current = self.iter.next();
    }
}

impl<I> View for IterView<I>
where
    I: Iterator + Clone,
    I::Item: Clone,
{
    type Item = I::Item;
    type Cursor = IterCursor<I>;

    fn begin(&self) -> IterCursor<I> {
        let mut iter = self.iter.clone();
        let current = iter.next();
        IterCursor { iter, current }
    }

    fn at_end(&self, cursor: &IterCursor<I>) -> bool {
        cursor.current.is_none()
    }
}

//! A range whose concrete type has been erased.

use core::fmt;

use vista_internals::{
    category::{Category, ErasableView, Forward},
    protocol::{ExactSizeView, View},
    view::RandomAccessViewVtableKind,
    RawView,
};

use crate::any_cursor::AnyCursor;

/// A view over elements of type `T`, erased at the capability tier `Cat`.
///
/// An `AnyView` owns a reference-counted erased copy of some concrete view:
/// cloning an `AnyView` is a cheap count bump, and every clone shares the
/// same underlying range. It hands out [`AnyCursor`]s via [`begin`] and
/// answers the end-of-range test for them via [`at_end`]; the sentinel
/// lives on the view, never inside the cursor.
///
/// At the [`RandomAccess`](crate::category::RandomAccess) tier the erased
/// view also knows its [`len`].
///
/// `AnyView` itself implements [`View`] (and [`ExactSizeView`] at the
/// random-access tier), so erased views re-enter the generic protocol and
/// can be stored in a `Variant`, erased again, or consumed by any
/// protocol-generic code. For plain element consumption there is also
/// [`iter`] and [`IntoIterator`].
///
/// # The empty state
///
/// A default-constructed `AnyView` is *empty*: it produces empty cursors,
/// reports every cursor as at-end, and has length zero.
///
/// [`begin`]: AnyView::begin
/// [`at_end`]: AnyView::at_end
/// [`len`]: AnyView::len
/// [`iter`]: AnyView::iter
///
/// # Examples
///
/// ```
/// use vista::{category::RandomAccess, views::VecView, AnyView};
///
/// let view: AnyView<i32, RandomAccess> = AnyView::new(VecView::new(vec![1, 2, 3]));
/// assert_eq!(view.len(), 3);
///
/// let mut cursor = view.begin();
/// cursor.advance(2);
/// assert_eq!(cursor.read(), 3);
///
/// let collected: Vec<i32> = view.iter().collect();
/// assert_eq!(collected, [1, 2, 3]);
/// ```
pub struct AnyView<T: 'static, Cat: Category = Forward> {
    /// The erased view; vtable agreement is its internal invariant.
    raw: RawView<T, Cat::ViewVtable<T>>,
}

impl<T: 'static, Cat: Category> AnyView<T, Cat> {
    /// Erases `view` at the tier `Cat`.
    ///
    /// The bounds grow with the tier: erasure at
    /// [`Forward`](crate::category::Forward) needs a [`View`] with
    /// cloneable cursors, and erasure at
    /// [`RandomAccess`](crate::category::RandomAccess) additionally needs
    /// an [`ExactSizeView`] whose cursors are random-access.
    #[must_use]
    pub fn new<R>(view: R) -> Self
    where
        R: ErasableView<Cat, Item = T>,
    {
        Self {
            raw: view.erase_view(),
        }
    }

    /// Creates an empty view.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: RawView::empty(),
        }
    }

    /// Returns `true` if this view is in the empty state (not erasing any
    /// concrete view).
    ///
    /// Note that this is about the *erasure* state, not the element count:
    /// a non-empty `AnyView` may still contain zero elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the type name of the erased concrete view, or `"(empty)"`
    /// for the empty state.
    #[inline]
    pub fn view_type_name(&self) -> &'static str {
        self.raw.type_name()
    }

    /// Returns a cursor positioned at the view's first element.
    ///
    /// An empty view produces an empty cursor.
    #[inline]
    #[must_use]
    pub fn begin(&self) -> AnyCursor<T, Cat> {
        AnyCursor::from_raw(self.raw.begin())
    }

    /// Returns `true` if `cursor` has moved past the view's last element.
    ///
    /// An empty cursor is always at the end, and every cursor is at the end
    /// of an empty view.
    ///
    /// # Panics
    ///
    /// Panics if `cursor` is non-empty and was not produced by this view.
    #[inline]
    pub fn at_end(&self, cursor: &AnyCursor<T, Cat>) -> bool {
        self.raw.at_end(cursor.raw())
    }

    /// Returns the number of elements in the view. Zero for the empty
    /// state.
    ///
    /// Available at the [`RandomAccess`](crate::category::RandomAccess)
    /// tier.
    #[inline]
    pub fn len(&self) -> usize
    where
        Cat::ViewVtable<T>: RandomAccessViewVtableKind<T>,
    {
        self.raw.len()
    }

    /// Returns an iterator over the view's elements.
    ///
    /// The iterator holds its own reference to the shared underlying view,
    /// so it is independent of `self`'s lifetime.
    #[must_use]
    pub fn iter(&self) -> AnyViewIter<T, Cat> {
        let cursor = self.begin();
        AnyViewIter {
            view: self.clone(),
            cursor,
        }
    }
}

impl<T: 'static, Cat: Category> Clone for AnyView<T, Cat> {
    /// Bumps the reference count of the shared erased view.
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T: 'static, Cat: Category> Default for AnyView<T, Cat> {
    /// Creates an empty view.
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static, Cat: Category> fmt::Debug for AnyView<T, Cat> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyView")
            .field(&self.view_type_name())
            .finish()
    }
}

impl<T: 'static, Cat: Category> View for AnyView<T, Cat> {
    type Item = T;
    type Cursor = AnyCursor<T, Cat>;

    fn begin(&self) -> AnyCursor<T, Cat> {
        AnyView::begin(self)
    }

    fn at_end(&self, cursor: &AnyCursor<T, Cat>) -> bool {
        AnyView::at_end(self, cursor)
    }
}

impl<T: 'static, Cat: Category> ExactSizeView for AnyView<T, Cat>
where
    Cat::ViewVtable<T>: RandomAccessViewVtableKind<T>,
{
    fn len(&self) -> usize {
        AnyView::len(self)
    }
}

/// Iterator over the elements of an [`AnyView`].
///
/// Drives an [`AnyCursor`] from [`begin`](AnyView::begin) until the owning
/// view reports it at the end, yielding one element per step.
pub struct AnyViewIter<T: 'static, Cat: Category = Forward> {
    /// A shared handle on the view being walked, used for the sentinel
    /// test.
    view: AnyView<T, Cat>,
    /// The current position.
    cursor: AnyCursor<T, Cat>,
}

impl<T: 'static, Cat: Category> Iterator for AnyViewIter<T, Cat> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.view.at_end(&self.cursor) {
            return None;
        }
        let item = self.cursor.read();
        self.cursor.next();
        Some(item)
    }
}

impl<T: 'static, Cat: Category> IntoIterator for AnyView<T, Cat> {
    type Item = T;
    type IntoIter = AnyViewIter<T, Cat>;

    fn into_iter(self) -> AnyViewIter<T, Cat> {
        let cursor = self.begin();
        AnyViewIter { view: self, cursor }
    }
}

impl<T: 'static, Cat: Category> IntoIterator for &AnyView<T, Cat> {
    type Item = T;
    type IntoIter = AnyViewIter<T, Cat>;

    fn into_iter(self) -> AnyViewIter<T, Cat> {
        self.iter()
    }
}

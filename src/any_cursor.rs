//! A position in a range whose concrete type has been erased.

use core::fmt;

use vista_internals::{
    category::{Category, ErasableCursor, Forward},
    cursor::{BidirectionalCursorVtableKind, RandomAccessCursorVtableKind},
    protocol::{BidirectionalCursor, Cursor, RandomAccessCursor},
    RawCursor,
};

/// A cursor over elements of type `T`, erased at the capability tier `Cat`.
///
/// An `AnyCursor` owns a boxed copy of some concrete cursor and drives it
/// through a `&'static` vtable. Which operations exist depends on the tier:
/// every cursor can [`read`] and [`next`]; [`prev`] needs at least
/// [`Bidirectional`]; [`advance`] and [`distance_to`] need
/// [`RandomAccess`]. Asking a lower tier for a higher-tier operation is a
/// compile-time error.
///
/// Cursors are usually obtained from an [`AnyView`] via
/// [`begin`](crate::AnyView::begin) rather than erased directly; the view is
/// also the authority on when one of its cursors has reached the end.
///
/// # The empty state
///
/// A default-constructed `AnyCursor`, and the residue left behind by
/// [`take`], is *empty*: dropping and moving it are no-ops, cloning it
/// yields another empty cursor, every view reports it as at-end, and
/// [`read`] panics. This is the safe stand-in for "moved-from".
///
/// [`read`]: AnyCursor::read
/// [`next`]: AnyCursor::next
/// [`prev`]: AnyCursor::prev
/// [`advance`]: AnyCursor::advance
/// [`distance_to`]: AnyCursor::distance_to
/// [`take`]: AnyCursor::take
/// [`Bidirectional`]: crate::category::Bidirectional
/// [`RandomAccess`]: crate::category::RandomAccess
/// [`AnyView`]: crate::AnyView
pub struct AnyCursor<T: 'static, Cat: Category = Forward> {
    /// The erased cursor; vtable agreement is its internal invariant.
    raw: RawCursor<T, Cat::CursorVtable<T>>,
}

impl<T: 'static, Cat: Category> AnyCursor<T, Cat> {
    /// Erases `cursor` at the tier `Cat`.
    ///
    /// The bounds grow with the tier: erasure at [`Forward`] needs
    /// `Cursor + Clone`, at [`Bidirectional`] a [`BidirectionalCursor`],
    /// at [`RandomAccess`] a [`RandomAccessCursor`].
    ///
    /// [`Bidirectional`]: crate::category::Bidirectional
    /// [`RandomAccess`]: crate::category::RandomAccess
    #[must_use]
    pub fn new<C>(cursor: C) -> Self
    where
        C: ErasableCursor<Cat, Item = T>,
    {
        Self {
            raw: cursor.erase_cursor(),
        }
    }

    /// Wraps an already-erased raw cursor.
    #[inline]
    pub(crate) fn from_raw(raw: RawCursor<T, Cat::CursorVtable<T>>) -> Self {
        Self { raw }
    }

    /// Returns the raw erased cursor, for view-side sentinel tests.
    #[inline]
    pub(crate) fn raw(&self) -> &RawCursor<T, Cat::CursorVtable<T>> {
        &self.raw
    }

    /// Creates an empty cursor.
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self {
            raw: RawCursor::empty(),
        }
    }

    /// Returns `true` if this cursor is in the empty state.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the type name of the erased concrete cursor, or `"(empty)"`
    /// for the empty state.
    #[inline]
    pub fn cursor_type_name(&self) -> &'static str {
        self.raw.type_name()
    }

    /// Reads the element at the cursor's current position.
    ///
    /// # Panics
    ///
    /// Panics if the cursor is empty, or if the underlying cursor panics
    /// (for example when positioned past the end of its view).
    #[inline]
    pub fn read(&self) -> T {
        self.raw.read()
    }

    /// Advances the cursor by one position. A no-op on an empty cursor.
    #[inline]
    pub fn next(&mut self) {
        self.raw.next();
    }

    /// Moves the cursor back by one position. A no-op on an empty cursor.
    ///
    /// Available from the [`Bidirectional`](crate::category::Bidirectional)
    /// tier up.
    #[inline]
    pub fn prev(&mut self)
    where
        Cat::CursorVtable<T>: BidirectionalCursorVtableKind<T>,
    {
        self.raw.prev();
    }

    /// Moves the cursor by the given signed offset. A no-op on an empty
    /// cursor.
    ///
    /// Available at the [`RandomAccess`](crate::category::RandomAccess)
    /// tier.
    #[inline]
    pub fn advance(&mut self, offset: isize)
    where
        Cat::CursorVtable<T>: RandomAccessCursorVtableKind<T>,
    {
        self.raw.advance(offset);
    }

    /// Returns the signed distance from `self` to `other`. Two empty
    /// cursors are at distance zero.
    ///
    /// Available at the [`RandomAccess`](crate::category::RandomAccess)
    /// tier.
    ///
    /// # Panics
    ///
    /// Panics if the cursors come from different views (or exactly one is
    /// empty).
    #[inline]
    pub fn distance_to(&self, other: &Self) -> isize
    where
        Cat::CursorVtable<T>: RandomAccessCursorVtableKind<T>,
    {
        self.raw.distance_to(&other.raw)
    }

    /// Moves the cursor out, leaving `self` empty.
    ///
    /// The residue is safe to drop, clone, and query: every view reports it
    /// as at-end.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::{views::IterView, AnyView};
    ///
    /// let view: AnyView<u32> = AnyView::new(IterView::new(1..=3));
    /// let mut cursor = view.begin();
    /// let taken = cursor.take();
    ///
    /// assert!(cursor.is_empty());
    /// assert!(view.at_end(&cursor));
    /// assert_eq!(taken.read(), 1);
    /// ```
    #[inline]
    #[must_use]
    pub fn take(&mut self) -> Self {
        Self {
            raw: self.raw.take(),
        }
    }
}

impl<T: 'static, Cat: Category> Clone for AnyCursor<T, Cat> {
    /// Deep-clones the underlying concrete cursor (an empty cursor clones
    /// to an empty cursor).
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }
}

impl<T: 'static, Cat: Category> Default for AnyCursor<T, Cat> {
    /// Creates an empty cursor.
    fn default() -> Self {
        Self::empty()
    }
}

impl<T: 'static, Cat: Category> fmt::Debug for AnyCursor<T, Cat> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AnyCursor")
            .field(&self.cursor_type_name())
            .finish()
    }
}

impl<T: 'static, Cat: Category> Cursor for AnyCursor<T, Cat> {
    type Item = T;

    fn read(&self) -> T {
        AnyCursor::read(self)
    }

    fn next(&mut self) {
        AnyCursor::next(self);
    }
}

impl<T: 'static, Cat: Category> BidirectionalCursor for AnyCursor<T, Cat>
where
    Cat::CursorVtable<T>: BidirectionalCursorVtableKind<T>,
{
    fn prev(&mut self) {
        AnyCursor::prev(self);
    }
}

impl<T: 'static, Cat: Category> RandomAccessCursor for AnyCursor<T, Cat>
where
    Cat::CursorVtable<T>: RandomAccessCursorVtableKind<T>,
{
    fn advance(&mut self, offset: isize) {
        AnyCursor::advance(self, offset);
    }

    fn distance_to(&self, other: &Self) -> isize {
        AnyCursor::distance_to(self, other)
    }
}

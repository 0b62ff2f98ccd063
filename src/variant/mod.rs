//! A discriminated union over a tuple type list, with jump-table dispatch.
//!
//! [`Variant<L>`] holds exactly one value out of the alternatives listed in
//! the tuple `L`, identified by a runtime index. All operations on the
//! active alternative (destruction, cloning, comparison, formatting,
//! visitation) dispatch through `&'static` tables built once per list
//! shape, so their cost does not grow with the number of alternatives.
//!
//! # Lifecycle and the valueless state
//!
//! A variant is constructed holding an alternative and normally holds one
//! for its entire life. Reassignment destroys the old alternative and
//! installs the new one. Because the new value is passed to the variant
//! fully constructed, plain reassignment ([`assign`], [`emplace`]) can never
//! fail halfway.
//!
//! The exception is [`emplace_with`], which destroys the old alternative
//! *before* running the caller's constructor closure: if the closure
//! panics, the variant is left **valueless**: alive, queryable
//! ([`is_valueless`]), but holding nothing. Any checked access in that
//! state reports [`BadVariantAccess`]. This destroy-first behavior is
//! deliberate: the alternative to it is constructing into a temporary,
//! which [`Clone::clone_from`] does take advantage of (a panicking
//! cross-index `clone_from` leaves the destination's old value intact).
//!
//! # Access tiers
//!
//! Accessors come in three strengths, matching how much the caller already
//! knows:
//!
//! - **Checked** ([`get`], [`visit`]): wrong alternative or valueless state
//!   reported as [`BadVariantAccess`].
//! - **Optional** ([`get_if`]): `None` instead of an error; never fails
//!   loudly.
//! - **Unchecked** ([`get_unchecked`], [`visit_unchecked`]): `unsafe`; the
//!   caller asserts the index is right, and violations are undefined
//!   behavior (caught by `debug_assert!` in debug builds). For hot paths
//!   where the index was already validated.
//!
//! [`Variant<L>`]: Variant
//! [`assign`]: Variant::assign
//! [`emplace`]: Variant::emplace
//! [`emplace_with`]: Variant::emplace_with
//! [`is_valueless`]: Variant::is_valueless
//! [`get`]: Variant::get
//! [`get_if`]: Variant::get_if
//! [`get_unchecked`]: Variant::get_unchecked
//! [`visit`]: Variant::visit
//! [`visit_unchecked`]: Variant::visit_unchecked

use core::any::TypeId;

use vista_internals::RawVariant;

mod error;

pub use error::BadVariantAccess;
pub use vista_internals::variant::{
    AlternativeList, CloneableList, ComparableList, DebuggableList, ListSlot, RawVisitableBy,
    VisitAlternative, VisitAlternativeMut, VisitValueless, VisitableBy, VisitableByMut,
    VisitorOutput,
};

/// A value holding exactly one alternative out of the tuple type list `L`.
///
/// Lists are plain tuples of up to 16 types: `Variant<(i32, String)>` holds
/// either an `i32` (slot 0) or a `String` (slot 1). Slots are addressed by
/// const-generic index (`get::<0>()`) or, where the type is unambiguous, by
/// type (`get_if_as::<String>()`).
///
/// The variant's own capabilities follow its alternatives: it is [`Clone`]
/// iff every alternative is, [`PartialEq`] iff every alternative is,
/// [`Debug`] iff every alternative is, and [`Default`] iff the first
/// alternative is.
///
/// [`Debug`]: core::fmt::Debug
///
/// # Examples
///
/// ```
/// use vista::Variant;
///
/// let mut value: Variant<(i32, String)> = Variant::from_value(String::from("hello"));
/// assert_eq!(value.index(), Some(1));
/// assert!(value.holds_alternative::<String>());
///
/// // Assigning a value of a different alternative destroys the string.
/// value.assign_value(42);
/// assert_eq!(value.index(), Some(0));
/// assert_eq!(value.get_if::<0>(), Some(&42));
/// assert_eq!(value.get_if::<1>(), None);
/// ```
pub struct Variant<L: AlternativeList> {
    /// The tag + storage engine; all invariants live there.
    raw: RawVariant<L>,
}

impl<L: AlternativeList> Variant<L> {
    /// Creates a variant holding `value` in slot `I`.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::Variant;
    ///
    /// let value: Variant<(u8, u8, bool)> = Variant::new::<1>(9);
    /// assert_eq!(value.index(), Some(1));
    /// ```
    #[must_use]
    pub fn new<const I: usize>(value: <L as ListSlot<I>>::Alternative) -> Self
    where
        L: ListSlot<I>,
    {
        let mut raw = RawVariant::empty();
        raw.write_slot::<I>(value);
        Self { raw }
    }

    /// Creates a variant holding `value` in the slot whose alternative type
    /// is `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not an alternative of `L`, or appears in `L` more
    /// than once. (In both cases the slot cannot be identified; address it
    /// by index instead.)
    #[must_use]
    pub fn from_value<T: 'static>(value: T) -> Self {
        let slot = Self::slot_of::<T>();
        let mut raw = RawVariant::empty();
        raw.write_alternative::<T>(slot, value);
        Self { raw }
    }

    /// Returns the zero-based index of the active alternative, or `None` if
    /// the variant is valueless.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.raw.index()
    }

    /// Returns `true` if the variant holds no alternative.
    ///
    /// This state is reachable only through a panic in user code running
    /// while the variant was transiently empty: an [`emplace_with`] closure,
    /// or an alternative's `Clone` during [`clone_from`]. It is a
    /// legitimate, queryable state, not a crash; every checked access in it
    /// reports [`BadVariantAccess`].
    ///
    /// [`emplace_with`]: Variant::emplace_with
    /// [`clone_from`]: Clone::clone_from
    #[inline]
    pub fn is_valueless(&self) -> bool {
        self.raw.index().is_none()
    }

    /// Returns the type name of the active alternative, or `None` if the
    /// variant is valueless.
    #[inline]
    pub fn active_type_name(&self) -> Option<&'static str> {
        Some(self.raw.vtable()?.type_name())
    }

    /// Returns `true` if the active alternative has type `T`.
    #[inline]
    pub fn holds_alternative<T: 'static>(&self) -> bool {
        self.raw
            .vtable()
            .is_some_and(|vtable| vtable.type_id() == TypeId::of::<T>())
    }

    /// Destroys the current alternative and installs `value` in slot `I`.
    ///
    /// Returns a reference to the newly installed value. Because `value`
    /// arrives fully constructed, this cannot leave the variant valueless.
    ///
    /// There is no same-slot fast path: the old value is destroyed and the
    /// new one written even when `I` is already active. Use [`assign`] for
    /// assignment semantics.
    ///
    /// [`assign`]: Variant::assign
    pub fn emplace<const I: usize>(
        &mut self,
        value: <L as ListSlot<I>>::Alternative,
    ) -> &mut <L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
    {
        self.raw.clear();
        self.raw.write_slot::<I>(value)
    }

    /// Destroys the current alternative, then installs the value produced
    /// by `constructor` in slot `I`.
    ///
    /// This is the weak-guarantee construction path: the old alternative is
    /// destroyed *before* `constructor` runs, so if `constructor` panics the
    /// variant is left valueless. Use [`emplace`] with a pre-built value
    /// when that matters.
    ///
    /// [`emplace`]: Variant::emplace
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::Variant;
    ///
    /// let mut value: Variant<(i32, String)> = Variant::new::<0>(1);
    /// value.emplace_with::<1, _>(|| String::from("built in place"));
    /// assert_eq!(value.index(), Some(1));
    /// ```
    pub fn emplace_with<const I: usize, F>(
        &mut self,
        constructor: F,
    ) -> &mut <L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
        F: FnOnce() -> <L as ListSlot<I>>::Alternative,
    {
        self.raw.clear();
        let value = constructor();
        self.raw.write_slot::<I>(value)
    }

    /// Assigns `value` to slot `I`.
    ///
    /// If slot `I` is already active, the existing alternative is assigned
    /// over in place; otherwise the current alternative is destroyed and
    /// `value` installed. Either way the variant cannot end up valueless.
    pub fn assign<const I: usize>(
        &mut self,
        value: <L as ListSlot<I>>::Alternative,
    ) -> &mut <L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
    {
        if self.raw.index() == Some(I) {
            // SAFETY: We just checked that slot `I` is active.
            let slot = unsafe { self.raw.get_unchecked_mut::<I>() };
            *slot = value;
            slot
        } else {
            self.raw.clear();
            self.raw.write_slot::<I>(value)
        }
    }

    /// Assigns `value` to the slot whose alternative type is `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is not an alternative of `L`, or appears in `L` more
    /// than once.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::Variant;
    ///
    /// let mut value: Variant<(i32, String)> = Variant::from_value(String::from("hello"));
    /// value.assign_value(42);
    /// assert_eq!(value.index(), Some(0));
    /// assert_eq!(value.get_if::<0>(), Some(&42));
    /// ```
    pub fn assign_value<T: 'static>(&mut self, value: T) -> &mut T {
        let slot = Self::slot_of::<T>();
        if self.raw.index() == Some(slot) {
            // SAFETY: The active slot is `slot`, whose alternative type is
            // `T` (established by `slot_of`).
            let active = unsafe { self.raw.downcast_unchecked_mut::<T>() };
            *active = value;
            active
        } else {
            self.raw.clear();
            self.raw.write_alternative::<T>(slot, value)
        }
    }

    /// Returns a reference to the alternative in slot `I`, or
    /// [`BadVariantAccess`] if `I` is not active.
    pub fn get<const I: usize>(
        &self,
    ) -> Result<&<L as ListSlot<I>>::Alternative, BadVariantAccess>
    where
        L: ListSlot<I>,
    {
        self.get_if::<I>()
            .ok_or(BadVariantAccess::new(self.index()))
    }

    /// Returns a mutable reference to the alternative in slot `I`, or
    /// [`BadVariantAccess`] if `I` is not active.
    pub fn get_mut<const I: usize>(
        &mut self,
    ) -> Result<&mut <L as ListSlot<I>>::Alternative, BadVariantAccess>
    where
        L: ListSlot<I>,
    {
        let index = self.index();
        self.get_if_mut::<I>().ok_or(BadVariantAccess::new(index))
    }

    /// Returns a reference to the alternative in slot `I`, or `None` if `I`
    /// is not active. Never fails loudly.
    pub fn get_if<const I: usize>(&self) -> Option<&<L as ListSlot<I>>::Alternative>
    where
        L: ListSlot<I>,
    {
        if self.raw.index() == Some(I) {
            // SAFETY: We just checked that slot `I` is active.
            Some(unsafe { self.raw.get_unchecked::<I>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the alternative in slot `I`, or
    /// `None` if `I` is not active.
    pub fn get_if_mut<const I: usize>(&mut self) -> Option<&mut <L as ListSlot<I>>::Alternative>
    where
        L: ListSlot<I>,
    {
        if self.raw.index() == Some(I) {
            // SAFETY: We just checked that slot `I` is active.
            Some(unsafe { self.raw.get_unchecked_mut::<I>() })
        } else {
            None
        }
    }

    /// Returns a reference to the alternative in slot `I` without checking
    /// that it is active.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Slot `I` is the active alternative (`self.index() == Some(I)`).
    #[inline]
    pub unsafe fn get_unchecked<const I: usize>(&self) -> &<L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
    {
        // SAFETY: Guaranteed by the caller.
        unsafe { self.raw.get_unchecked::<I>() }
    }

    /// Returns a mutable reference to the alternative in slot `I` without
    /// checking that it is active.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. Slot `I` is the active alternative (`self.index() == Some(I)`).
    #[inline]
    pub unsafe fn get_unchecked_mut<const I: usize>(
        &mut self,
    ) -> &mut <L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
    {
        // SAFETY: Guaranteed by the caller.
        unsafe { self.raw.get_unchecked_mut::<I>() }
    }

    /// Returns a reference to the active alternative as type `T`, or
    /// [`BadVariantAccess`] if the active alternative has a different type.
    pub fn get_as<T: 'static>(&self) -> Result<&T, BadVariantAccess> {
        self.get_if_as::<T>()
            .ok_or(BadVariantAccess::new(self.index()))
    }

    /// Returns a mutable reference to the active alternative as type `T`,
    /// or [`BadVariantAccess`] if the active alternative has a different
    /// type.
    pub fn get_as_mut<T: 'static>(&mut self) -> Result<&mut T, BadVariantAccess> {
        let index = self.index();
        self.get_if_as_mut::<T>().ok_or(BadVariantAccess::new(index))
    }

    /// Returns a reference to the active alternative as type `T`, or `None`
    /// if the active alternative has a different type.
    pub fn get_if_as<T: 'static>(&self) -> Option<&T> {
        if self.holds_alternative::<T>() {
            // SAFETY: We just checked that the active alternative has type
            // `T`.
            Some(unsafe { self.raw.downcast_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns a mutable reference to the active alternative as type `T`,
    /// or `None` if the active alternative has a different type.
    pub fn get_if_as_mut<T: 'static>(&mut self) -> Option<&mut T> {
        if self.holds_alternative::<T>() {
            // SAFETY: We just checked that the active alternative has type
            // `T`.
            Some(unsafe { self.raw.downcast_unchecked_mut::<T>() })
        } else {
            None
        }
    }

    /// Runs `visitor` against the active alternative, or returns
    /// [`BadVariantAccess`] if the variant is valueless.
    ///
    /// The visitor must implement [`VisitAlternative`] for every alternative
    /// in the list; the call dispatches through a per-(visitor, list) jump
    /// table, so its cost does not depend on which alternative is active.
    ///
    /// # Examples
    ///
    /// ```
    /// use vista::{
    ///     variant::{VisitAlternative, VisitorOutput},
    ///     Variant,
    /// };
    ///
    /// struct SizeOf;
    ///
    /// impl VisitorOutput for SizeOf {
    ///     type Output = usize;
    /// }
    ///
    /// impl<A> VisitAlternative<A> for SizeOf {
    ///     fn visit(self, _alternative: &A) -> usize {
    ///         core::mem::size_of::<A>()
    ///     }
    /// }
    ///
    /// let value: Variant<(u8, u64)> = Variant::new::<1>(3);
    /// assert_eq!(value.visit(SizeOf), Ok(core::mem::size_of::<u64>()));
    /// ```
    pub fn visit<V>(&self, visitor: V) -> Result<V::Output, BadVariantAccess>
    where
        V: VisitorOutput + 'static,
        L: VisitableBy<V>,
    {
        self.raw.visit(visitor).ok_or(BadVariantAccess::new(None))
    }

    /// Runs `visitor` against the active alternative with exclusive access,
    /// or returns [`BadVariantAccess`] if the variant is valueless.
    pub fn visit_mut<V>(&mut self, visitor: V) -> Result<V::Output, BadVariantAccess>
    where
        V: VisitorOutput + 'static,
        L: VisitableByMut<V>,
    {
        self.raw
            .visit_mut(visitor)
            .ok_or(BadVariantAccess::new(None))
    }

    /// Runs `visitor` against the active alternative, dispatching the
    /// valueless state to [`VisitValueless::visit_valueless`] instead of
    /// reporting an error.
    ///
    /// The dispatch table for this mode has one extra leading slot, indexed
    /// directly by the variant's internal one-offset tag, so no state check
    /// happens at all.
    pub fn visit_raw<V>(&self, visitor: V) -> V::Output
    where
        V: VisitValueless + 'static,
        L: RawVisitableBy<V>,
    {
        self.raw.visit_raw(visitor)
    }

    /// Runs `visitor` against the active alternative without checking for
    /// the valueless state.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The variant is not valueless.
    pub unsafe fn visit_unchecked<V>(&self, visitor: V) -> V::Output
    where
        V: VisitorOutput + 'static,
        L: VisitableBy<V>,
    {
        // SAFETY: Guaranteed by the caller.
        unsafe { self.raw.visit_unchecked(visitor) }
    }

    /// Finds the unique slot whose alternative type is `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` is absent from the list or appears more than once.
    fn slot_of<T: 'static>() -> usize {
        let target = TypeId::of::<T>();
        let mut found = None;
        for (index, vtable) in L::VTABLES.iter().enumerate() {
            if vtable.type_id() == target {
                assert!(
                    found.is_none(),
                    "`{}` appears more than once in this variant's alternatives",
                    core::any::type_name::<T>()
                );
                found = Some(index);
            }
        }
        match found {
            Some(index) => index,
            None => panic!(
                "`{}` is not an alternative of this variant",
                core::any::type_name::<T>()
            ),
        }
    }
}

impl<L> Default for Variant<L>
where
    L: ListSlot<0>,
    <L as ListSlot<0>>::Alternative: Default,
{
    /// Creates a variant holding the first alternative's default value.
    fn default() -> Self {
        Self::new::<0>(Default::default())
    }
}

impl<L: CloneableList> Clone for Variant<L> {
    fn clone(&self) -> Self {
        Self {
            raw: self.raw.clone(),
        }
    }

    /// Clones `source`'s alternative into `self`.
    ///
    /// When both variants hold the same slot, this delegates to the
    /// alternative's own `clone_from`, reusing its resources. When the
    /// slots differ, the new value is cloned into a temporary first, so a
    /// panicking clone leaves `self`'s old value intact.
    fn clone_from(&mut self, source: &Self) {
        self.raw.clone_from(&source.raw);
    }
}

impl<L: ComparableList> PartialEq for Variant<L> {
    /// Two variants are equal iff both are valueless, or both hold the same
    /// slot and the active alternatives compare equal.
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl<L: DebuggableList> core::fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.index() {
            None => f.write_str("Variant(valueless)"),
            Some(index) => {
                write!(f, "Variant({index}: ")?;
                self.raw.debug_alternative(f)?;
                f.write_str(")")
            }
        }
    }
}

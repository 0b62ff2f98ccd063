//! Visitor traits for running typed operations against a variant's active
//! alternative.
//!
//! A visitor is any value that knows what to do with each alternative type of
//! a list. It declares its result type once via [`VisitorOutput`] and then
//! implements [`VisitAlternative`] (shared access) or [`VisitAlternativeMut`]
//! (exclusive access) for every alternative. The dispatch tables stamped in
//! [`list`] require exactly those impls, so forgetting an alternative is a
//! compile-time error at the visit call site.
//!
//! [`VisitValueless`] is the extra capability needed for the *raw* visit
//! mode, where the visitor also receives the "no alternative alive" case
//! instead of having it reported as an error.
//!
//! Visitors are consumed by value. A visitor that needs to accumulate state
//! across calls can be a mutable reference to that state.
//!
//! [`list`]: crate::variant::AlternativeList

/// Declares the result type a visitor produces.
///
/// Split out from [`VisitAlternative`] so that the result type is stated
/// once, not once per alternative; the dispatch tables require every entry
/// to produce the same type.
pub trait VisitorOutput {
    /// The type returned from every visit method of this visitor.
    ///
    /// Bounded by `'static` because the dispatch tables in [`list`] are
    /// `&'static` slices of function pointers whose signatures name this type.
    ///
    /// [`list`]: crate::variant::AlternativeList
    type Output: 'static;
}

/// A visitor that can handle a shared reference to the alternative type `A`.
///
/// # Examples
///
/// A visitor reporting the size of whichever alternative is active:
///
/// ```
/// use vista_internals::variant::{VisitAlternative, VisitorOutput};
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
/// ```
pub trait VisitAlternative<A>: VisitorOutput {
    /// Visits the active alternative.
    fn visit(self, alternative: &A) -> Self::Output;
}

/// A visitor that can handle an exclusive reference to the alternative type
/// `A`.
pub trait VisitAlternativeMut<A>: VisitorOutput {
    /// Visits the active alternative mutably.
    fn visit_mut(self, alternative: &mut A) -> Self::Output;
}

/// A visitor that can additionally handle the valueless state.
///
/// Required by the raw visit mode, whose dispatch table has one extra slot
/// for "no alternative alive" instead of reporting that case as an error.
pub trait VisitValueless: VisitorOutput {
    /// Visits the valueless state.
    fn visit_valueless(self) -> Self::Output;
}

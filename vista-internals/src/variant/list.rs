//! The type-list traits behind variant storage, and their macro-stamped
//! tuple impls.
//!
//! A variant is generic over a *list* of alternatives, written as a tuple
//! type: `(T0,)`, `(T0, T1)`, and so on up to arity 16. Rust has no variadic
//! generics, so each arity is implemented once by the stamping macro at the
//! bottom of this file, the same fixed-ladder approach the standard library
//! uses for its tuple impls. Each impl carries `&'static` dispatch tables
//! with one entry per alternative, so that every runtime operation on a
//! variant is a single array index plus an indirect call, regardless of how
//! many alternatives the list has.
//!
//! The traits split by capability:
//!
//! - [`AlternativeList`]: unconditional. Storage type, length, and the
//!   [`AlternativeVtable`] table (destruction and identification).
//! - [`ListSlot<I>`]: maps the const-generic slot index `I` to its
//!   alternative type.
//! - [`CloneableList`] / [`ComparableList`] / [`DebuggableList`]:
//!   conditional tables that exist only when *every* alternative implements
//!   `Clone` / `PartialEq` / `Debug`. The bound is enforced by the stamped
//!   impl, which is how the variant's own `Clone`/`PartialEq`/`Debug` become
//!   conditionally available.
//! - [`VisitableBy<V>`] / [`VisitableByMut<V>`] / [`RawVisitableBy<V>`]:
//!   per-(visitor, list) jump tables of monomorphized visit thunks. The raw
//!   table has one extra leading slot for the valueless state.

use core::ptr::NonNull;

use crate::{
    util::Erased,
    variant::{
        storage::{ChainEnd, ChainStorage},
        visit::{VisitAlternative, VisitAlternativeMut, VisitValueless, VisitorOutput},
        vtable::{AlternativeVtable, CloneVtable, DebugVtable, EqVtable},
    },
};

/// A tuple type list usable as the alternatives of a variant.
///
/// Implemented for tuples of arity 1 through 16 by the stamping macro in
/// this module.
///
/// # Safety
///
/// Implementations must guarantee:
///
/// 1. `Storage` has size and alignment sufficient for every alternative in
///    the list, and every alternative is valid at offset zero of `Storage`.
/// 2. `VTABLES` has exactly one entry per alternative, in list order, each
///    created for the alternative type at that position.
/// 3. `LEN` equals the number of alternatives.
pub unsafe trait AlternativeList: 'static {
    /// The union chain providing storage for any one alternative.
    type Storage: 'static;

    /// The number of alternatives in the list.
    const LEN: usize;

    /// Per-alternative vtables, in list order.
    const VTABLES: &'static [&'static AlternativeVtable];
}

/// Maps the const-generic slot index `I` to its alternative type.
///
/// # Safety
///
/// Implementations must guarantee that `Alternative` is exactly the type at
/// position `I` of the list (and therefore the type whose vtable sits at
/// `VTABLES[I]`).
pub unsafe trait ListSlot<const I: usize>: AlternativeList {
    /// The alternative type at slot `I`.
    type Alternative: 'static;
}

/// A list whose every alternative implements [`Clone`].
///
/// # Safety
///
/// Implementations must guarantee that `CLONE_VTABLES` parallels
/// [`AlternativeList::VTABLES`]: one entry per alternative, in list order,
/// each created for the alternative type at that position.
pub unsafe trait CloneableList: AlternativeList {
    /// Per-alternative clone vtables, in list order.
    const CLONE_VTABLES: &'static [&'static CloneVtable];
}

/// A list whose every alternative implements [`PartialEq`].
///
/// # Safety
///
/// Implementations must guarantee that `EQ_VTABLES` parallels
/// [`AlternativeList::VTABLES`]: one entry per alternative, in list order,
/// each created for the alternative type at that position.
pub unsafe trait ComparableList: AlternativeList {
    /// Per-alternative equality vtables, in list order.
    const EQ_VTABLES: &'static [&'static EqVtable];
}

/// A list whose every alternative implements [`Debug`].
///
/// # Safety
///
/// Implementations must guarantee that `DEBUG_VTABLES` parallels
/// [`AlternativeList::VTABLES`]: one entry per alternative, in list order,
/// each created for the alternative type at that position.
///
/// [`Debug`]: core::fmt::Debug
pub unsafe trait DebuggableList: AlternativeList {
    /// Per-alternative debug-formatting vtables, in list order.
    const DEBUG_VTABLES: &'static [&'static DebugVtable];
}

/// A list visitable by the visitor `V` through shared references.
///
/// The bound on the stamped impl requires `V: VisitAlternative<T>` for every
/// alternative `T`, so a visit call only compiles when the visitor handles
/// the whole list.
///
/// # Safety
///
/// Implementations must guarantee that `VISIT_TABLE` has one entry per
/// alternative, in list order, each a thunk that casts the storage pointer
/// to the alternative type at that position before invoking the visitor.
pub unsafe trait VisitableBy<V: VisitorOutput + 'static>: AlternativeList {
    /// Per-alternative visit thunks, in list order.
    ///
    /// # Safety
    ///
    /// An entry may only be called with a storage pointer holding an
    /// initialized alternative of the type at that entry's position.
    const VISIT_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output];
}

/// A list visitable by the visitor `V` through exclusive references.
///
/// # Safety
///
/// As [`VisitableBy`], with the thunks taking exclusive access to the
/// alternative.
pub unsafe trait VisitableByMut<V: VisitorOutput + 'static>: AlternativeList {
    /// Per-alternative mutable visit thunks, in list order.
    ///
    /// # Safety
    ///
    /// An entry may only be called with a storage pointer holding an
    /// initialized alternative of the type at that entry's position, with no
    /// other access to the alternative for the duration of the call.
    const VISIT_MUT_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output];
}

/// A list visitable by the visitor `V` in raw mode, where the valueless
/// state is dispatched to the visitor instead of reported as an error.
///
/// # Safety
///
/// Implementations must guarantee that `VISIT_RAW_TABLE` has `LEN + 1`
/// entries: slot 0 invokes [`VisitValueless::visit_valueless`] (and never
/// touches the storage pointer), and slot `i + 1` is the visit thunk for
/// alternative `i`. The table is therefore indexed directly by the variant's
/// one-offset tag.
pub unsafe trait RawVisitableBy<V: VisitorOutput + 'static>: VisitableBy<V> {
    /// Valueless thunk followed by per-alternative visit thunks.
    ///
    /// # Safety
    ///
    /// Entry 0 may always be called; entry `i + 1` may only be called with a
    /// storage pointer holding an initialized alternative `i`.
    const VISIT_RAW_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output];
}

/// Dispatch-table entry: visits the alternative `A` stored at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized value of type `A`.
unsafe fn visit_alternative<V, A>(ptr: NonNull<Erased>, visitor: V) -> V::Output
where
    V: VisitAlternative<A>,
{
    // SAFETY: `ptr` points to an initialized `A`, as guaranteed by the
    // caller.
    let alternative = unsafe { ptr.cast::<A>().as_ref() };
    visitor.visit(alternative)
}

/// Dispatch-table entry: mutably visits the alternative `A` stored at `ptr`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized value of type `A`.
/// 2. No other access to the alternative occurs for the duration of the
///    call.
unsafe fn visit_alternative_mut<V, A>(ptr: NonNull<Erased>, visitor: V) -> V::Output
where
    V: VisitAlternativeMut<A>,
{
    let mut ptr: NonNull<A> = ptr.cast();
    // SAFETY: `ptr` points to an initialized `A` we have exclusive access
    // to, as guaranteed by the caller.
    let alternative = unsafe { ptr.as_mut() };
    visitor.visit_mut(alternative)
}

/// Dispatch-table entry: visits the valueless state. The storage pointer is
/// ignored.
///
/// # Safety
///
/// Always safe to call; the signature is `unsafe` only so the entry fits the
/// dispatch-table type.
unsafe fn visit_valueless<V>(_ptr: NonNull<Erased>, visitor: V) -> V::Output
where
    V: VisitValueless,
{
    visitor.visit_valueless()
}

/// Expands to the right-leaning union chain type for the given alternatives.
macro_rules! chain {
    () => { ChainEnd };
    ($head:ident $(, $tail:ident)*) => { ChainStorage<$head, chain!($($tail),*)> };
}

/// Stamps the [`ListSlot`] impls for one tuple arity, one slot per step.
///
/// This recursion exists because Rust macros cannot nest the `$T` alternative
/// repetition inside the `$index` slot repetition; the muncher peels one
/// `$index: $Slot` pair at a time, re-expanding the full alternative list at
/// each step.
macro_rules! impl_list_slots {
    (($($T:ident),+)) => {};
    (($($T:ident),+) $index:literal : $Slot:ident $(, $rest_index:literal : $rest_slot:ident)*) => {
        // SAFETY: The pairing is spelled out position by position; `$Slot` is
        // the alternative at index `$index` of the list.
        unsafe impl<$($T: 'static),+> ListSlot<$index> for ($($T,)+) {
            type Alternative = $Slot;
        }
        impl_list_slots!(($($T),+) $($rest_index : $rest_slot),*);
    };
}

/// Stamps every list trait for one tuple arity.
///
/// Invoked once per arity below, with the full alternative list followed by
/// the slot-index-to-alternative pairing spelled out.
macro_rules! impl_alternative_list {
    (($($T:ident),+) => { $($index:literal : $Slot:ident),+ }) => {
        // SAFETY:
        // 1. `Storage` is the union chain over exactly these alternatives;
        //    every level is `#[repr(C)]`, so each alternative is valid at
        //    offset zero and the chain's size/alignment are the maximum over
        //    the list.
        // 2. `VTABLES` lists one vtable per alternative, in list order.
        // 3. `LEN` is the table length.
        unsafe impl<$($T: 'static),+> AlternativeList for ($($T,)+) {
            type Storage = chain!($($T),+);

            const LEN: usize = Self::VTABLES.len();

            const VTABLES: &'static [&'static AlternativeVtable] =
                &[$(AlternativeVtable::new::<$T>()),+];
        }

        // The per-slot impls are stamped by a recursive helper: Rust macros
        // forbid nesting the `$T` repetition inside the `$index` repetition,
        // so the helper peels one `$index: $Slot` pair at a time while
        // re-expanding the full alternative list at each step.
        impl_list_slots!(($($T),+) $($index : $Slot),+);

        // SAFETY: `CLONE_VTABLES` parallels `VTABLES` in list order; the
        // `Clone` bound on every alternative makes each entry well-formed.
        unsafe impl<$($T: Clone + 'static),+> CloneableList for ($($T,)+) {
            const CLONE_VTABLES: &'static [&'static CloneVtable] =
                &[$(CloneVtable::new::<$T>()),+];
        }

        // SAFETY: `EQ_VTABLES` parallels `VTABLES` in list order.
        unsafe impl<$($T: PartialEq + 'static),+> ComparableList for ($($T,)+) {
            const EQ_VTABLES: &'static [&'static EqVtable] =
                &[$(EqVtable::new::<$T>()),+];
        }

        // SAFETY: `DEBUG_VTABLES` parallels `VTABLES` in list order.
        unsafe impl<$($T: core::fmt::Debug + 'static),+> DebuggableList for ($($T,)+) {
            const DEBUG_VTABLES: &'static [&'static DebugVtable] =
                &[$(DebugVtable::new::<$T>()),+];
        }

        // SAFETY: One thunk per alternative, in list order, each casting to
        // the alternative type at its own position.
        unsafe impl<V: 'static, $($T: 'static),+> VisitableBy<V> for ($($T,)+)
        where
            V: VisitorOutput $(+ VisitAlternative<$T>)+,
        {
            const VISIT_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output] =
                &[$(visit_alternative::<V, $T>),+];
        }

        // SAFETY: One thunk per alternative, in list order, each casting to
        // the alternative type at its own position.
        unsafe impl<V: 'static, $($T: 'static),+> VisitableByMut<V> for ($($T,)+)
        where
            V: VisitorOutput $(+ VisitAlternativeMut<$T>)+,
        {
            const VISIT_MUT_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output] =
                &[$(visit_alternative_mut::<V, $T>),+];
        }

        // SAFETY: Slot 0 is the valueless thunk, which ignores the storage
        // pointer; slot `i + 1` is the visit thunk for alternative `i`, so
        // the table is indexable by the one-offset tag.
        unsafe impl<V: 'static, $($T: 'static),+> RawVisitableBy<V> for ($($T,)+)
        where
            V: VisitValueless $(+ VisitAlternative<$T>)+,
        {
            const VISIT_RAW_TABLE: &'static [unsafe fn(NonNull<Erased>, V) -> V::Output] =
                &[visit_valueless::<V>, $(visit_alternative::<V, $T>),+];
        }
    };
}

impl_alternative_list!((A) => { 0: A });
impl_alternative_list!((A, B) => { 0: A, 1: B });
impl_alternative_list!((A, B, C) => { 0: A, 1: B, 2: C });
impl_alternative_list!((A, B, C, D) => { 0: A, 1: B, 2: C, 3: D });
impl_alternative_list!((A, B, C, D, E) => { 0: A, 1: B, 2: C, 3: D, 4: E });
impl_alternative_list!((A, B, C, D, E, F) => { 0: A, 1: B, 2: C, 3: D, 4: E, 5: F });
impl_alternative_list!((A, B, C, D, E, F, G) => { 0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G });
impl_alternative_list!((A, B, C, D, E, F, G, H) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K, L) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K, L, M) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L, 12: M
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K, L, M, N) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L, 12: M, 13: N
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K, L, M, N, O) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L, 12: M, 13: N,
    14: O
});
impl_alternative_list!((A, B, C, D, E, F, G, H, I, J, K, L, M, N, O, P) => {
    0: A, 1: B, 2: C, 3: D, 4: E, 5: F, 6: G, 7: H, 8: I, 9: J, 10: K, 11: L, 12: M, 13: N,
    14: O, 15: P
});

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use super::*;

    #[test]
    fn test_vtable_order_matches_list_order() {
        type List = (u8, String, i64);
        assert_eq!(<List as AlternativeList>::LEN, 3);
        let vtables = <List as AlternativeList>::VTABLES;
        assert_eq!(vtables[0].type_id(), TypeId::of::<u8>());
        assert_eq!(vtables[1].type_id(), TypeId::of::<String>());
        assert_eq!(vtables[2].type_id(), TypeId::of::<i64>());
    }

    #[test]
    fn test_tables_are_shared_per_shape() {
        let a = <(u8, u16) as AlternativeList>::VTABLES;
        let b = <(u8, u16) as AlternativeList>::VTABLES;
        assert_eq!(a.as_ptr(), b.as_ptr());
    }

    #[test]
    fn test_raw_table_has_extra_slot() {
        struct Count;
        impl VisitorOutput for Count {
            type Output = usize;
        }
        impl<A> VisitAlternative<A> for Count {
            fn visit(self, _alternative: &A) -> usize {
                1
            }
        }
        impl VisitValueless for Count {
            fn visit_valueless(self) -> usize {
                0
            }
        }

        type List = (u8, u16, u32);
        assert_eq!(<List as VisitableBy<Count>>::VISIT_TABLE.len(), 3);
        assert_eq!(<List as RawVisitableBy<Count>>::VISIT_RAW_TABLE.len(), 4);
    }

    #[test]
    fn test_max_arity_list() {
        type List = (
            u8,
            u16,
            u32,
            u64,
            i8,
            i16,
            i32,
            i64,
            f32,
            f64,
            bool,
            char,
            usize,
            isize,
            (),
            String,
        );
        assert_eq!(<List as AlternativeList>::LEN, 16);
        assert_eq!(
            <List as AlternativeList>::VTABLES[15].type_id(),
            TypeId::of::<String>()
        );
    }
}

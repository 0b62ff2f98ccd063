//! Per-alternative vtables for variant dispatch.
//!
//! This module contains the vtables that let a [`RawVariant`] operate on its
//! active alternative when the alternative's concrete type has been erased to
//! a bare storage pointer. Each vtable stores function pointers that dispatch
//! to the correct typed implementation.
//!
//! [`AlternativeVtable`] carries the operations every alternative supports
//! (destruction and identification). The remaining vtables carry operations
//! that exist only when an alternative implements the matching trait:
//! [`CloneVtable`] (`Clone`), [`EqVtable`] (`PartialEq`), and
//! [`DebugVtable`] (`Debug`). The [`AlternativeList`] impls assemble these
//! into per-list `&'static` tables, and the trait bounds on those impls
//! guarantee a conditional table only exists when *every* alternative
//! qualifies.
//!
//! This module encapsulates the vtable fields so they cannot be accessed
//! directly. This visibility restriction guarantees the safety invariant:
//! **a vtable's function pointers are always the functions defined below,
//! instantiated with the alternative type that was used to create it**.
//!
//! # Safety Invariant
//!
//! This invariant is maintained because vtables are created as `&'static`
//! references via the `new` constructors, which pair the function pointers
//! with a specific alternative type `T` at compile time.
//!
//! [`RawVariant`]: crate::variant::RawVariant
//! [`AlternativeList`]: crate::variant::AlternativeList

use core::{any::TypeId, ptr::NonNull};

use crate::util::Erased;

/// Vtable for the operations every variant alternative supports.
///
/// # Safety Invariant
///
/// The fields `drop`, `type_id`, and `type_name` are guaranteed to point to
/// the functions defined below instantiated with the alternative type `T`
/// that was used to create this [`AlternativeVtable`], and `needs_drop` is
/// `core::mem::needs_drop` of that same `T`.
#[derive(Clone, Copy)]
pub struct AlternativeVtable {
    /// Gets the [`TypeId`] of the alternative type that was used to create
    /// this [`AlternativeVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the alternative type.
    type_name: fn() -> &'static str,
    /// Whether dropping the alternative runs any code at all.
    ///
    /// Captured at vtable construction so that destruction of an
    /// all-trivial variant never performs an indirect call.
    needs_drop: bool,
    /// Drops the alternative in place at the given storage pointer.
    drop: unsafe fn(NonNull<Erased>),
}

impl AlternativeVtable {
    /// Creates a new [`AlternativeVtable`] for the alternative type `T`.
    pub const fn new<T: 'static>() -> &'static Self {
        const {
            &Self {
                type_id: TypeId::of::<T>,
                type_name: core::any::type_name::<T>,
                needs_drop: core::mem::needs_drop::<T>(),
                drop: drop_in_place::<T>,
            }
        }
    }

    /// Gets the [`TypeId`] of the alternative type that was used to create
    /// this [`AlternativeVtable`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the alternative type.
    #[inline]
    pub fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Returns `true` if dropping the alternative runs any code.
    #[inline]
    pub fn needs_drop(&self) -> bool {
        self.needs_drop
    }

    /// Drops the alternative stored at `ptr` in place.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to an initialized value of the alternative type that
    ///    was used to create this [`AlternativeVtable`].
    /// 2. The value is valid for dropping (it is not aliased and will not be
    ///    accessed again after this call).
    #[inline]
    pub unsafe fn drop(&self, ptr: NonNull<Erased>) {
        // SAFETY: We know that `self.drop` points to the function
        // `drop_in_place::<T>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe {
            (self.drop)(ptr);
        }
    }
}

/// Drops the value of type `T` stored at `ptr` in place.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized value of type `T`.
/// 2. The value is valid for dropping (it is not aliased and will not be
///    accessed again after this call).
unsafe fn drop_in_place<T>(ptr: NonNull<Erased>) {
    let ptr: NonNull<T> = ptr.cast();
    // SAFETY: The pointer holds an initialized `T` that may be dropped, as
    // guaranteed by the caller.
    unsafe {
        ptr.as_ptr().drop_in_place();
    }
}

/// Vtable for cloning a variant alternative. Exists only for alternative
/// types that implement [`Clone`].
///
/// # Safety Invariant
///
/// The fields `clone` and `clone_from` are guaranteed to point to the
/// functions defined below instantiated with the alternative type `T` that
/// was used to create this [`CloneVtable`].
#[derive(Clone, Copy)]
pub struct CloneVtable {
    /// Clones the alternative at `src` into the uninitialized slot at `dst`.
    clone: unsafe fn(src: NonNull<Erased>, dst: NonNull<Erased>),
    /// Clones the alternative at `src` into the *initialized* alternative at
    /// `dst` using `Clone::clone_from`, reusing `dst`'s resources where the
    /// alternative supports it.
    clone_from: unsafe fn(src: NonNull<Erased>, dst: NonNull<Erased>),
}

impl CloneVtable {
    /// Creates a new [`CloneVtable`] for the alternative type `T`.
    pub const fn new<T: Clone + 'static>() -> &'static Self {
        const {
            &Self {
                clone: clone::<T>,
                clone_from: clone_from::<T>,
            }
        }
    }

    /// Clones the alternative at `src` into the uninitialized slot at `dst`.
    ///
    /// May panic if the alternative's `Clone` impl panics; in that case
    /// nothing has been written to `dst`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `src` points to an initialized value of the alternative type that
    ///    was used to create this [`CloneVtable`].
    /// 2. `dst` points to storage valid for writes of that same type, and no
    ///    initialized value currently occupies it (it would be overwritten
    ///    without being dropped).
    /// 3. `src` and `dst` do not overlap.
    #[inline]
    pub unsafe fn clone(&self, src: NonNull<Erased>, dst: NonNull<Erased>) {
        // SAFETY: We know that `self.clone` points to the function
        // `clone::<T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.clone)(src, dst);
        }
    }

    /// Clones the alternative at `src` into the initialized alternative at
    /// `dst` via `Clone::clone_from`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `src` and `dst` both point to initialized values of the alternative
    ///    type that was used to create this [`CloneVtable`].
    /// 2. `dst` is valid for exclusive (mutable) access.
    /// 3. `src` and `dst` do not overlap.
    #[inline]
    pub unsafe fn clone_from(&self, src: NonNull<Erased>, dst: NonNull<Erased>) {
        // SAFETY: We know that `self.clone_from` points to the function
        // `clone_from::<T>` below. That function's safety requirements are
        // upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        // 3. Guaranteed by the caller
        unsafe {
            (self.clone_from)(src, dst);
        }
    }
}

/// Clones the `T` at `src` into the uninitialized storage at `dst`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` points to an initialized value of type `T`.
/// 2. `dst` points to storage valid for writes of `T` with no initialized
///    value currently occupying it.
/// 3. `src` and `dst` do not overlap.
unsafe fn clone<T: Clone>(src: NonNull<Erased>, dst: NonNull<Erased>) {
    // SAFETY: `src` points to an initialized `T` that we may access shared,
    // as guaranteed by the caller.
    let value = unsafe { src.cast::<T>().as_ref() }.clone();
    // SAFETY: `dst` is valid for writes of `T` and holds no initialized
    // value, as guaranteed by the caller.
    unsafe {
        dst.cast::<T>().as_ptr().write(value);
    }
}

/// Runs `Clone::clone_from` from the `T` at `src` onto the `T` at `dst`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `src` and `dst` both point to initialized values of type `T`.
/// 2. `dst` is valid for exclusive (mutable) access.
/// 3. `src` and `dst` do not overlap.
unsafe fn clone_from<T: Clone>(src: NonNull<Erased>, dst: NonNull<Erased>) {
    // SAFETY: `src` points to an initialized `T` that we may access shared,
    // as guaranteed by the caller.
    let source = unsafe { src.cast::<T>().as_ref() };
    let mut dst: NonNull<T> = dst.cast();
    // SAFETY: `dst` points to an initialized `T` we have exclusive access
    // to, as guaranteed by the caller.
    let destination = unsafe { dst.as_mut() };
    destination.clone_from(source);
}

/// Vtable for comparing two variant alternatives of the same slot. Exists
/// only for alternative types that implement [`PartialEq`].
///
/// # Safety Invariant
///
/// The field `eq` is guaranteed to point to the function defined below
/// instantiated with the alternative type `T` that was used to create this
/// [`EqVtable`].
#[derive(Clone, Copy)]
pub struct EqVtable {
    /// Compares the alternatives at the two pointers for equality.
    eq: unsafe fn(NonNull<Erased>, NonNull<Erased>) -> bool,
}

impl EqVtable {
    /// Creates a new [`EqVtable`] for the alternative type `T`.
    pub const fn new<T: PartialEq + 'static>() -> &'static Self {
        const { &Self { eq: eq::<T> } }
    }

    /// Compares the alternatives at `a` and `b` for equality.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `a` and `b` both point to initialized values of the alternative
    ///    type that was used to create this [`EqVtable`].
    #[inline]
    pub unsafe fn eq(&self, a: NonNull<Erased>, b: NonNull<Erased>) -> bool {
        // SAFETY: We know that `self.eq` points to the function `eq::<T>`
        // below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.eq)(a, b) }
    }
}

/// Compares the `T`s at `a` and `b` for equality.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `a` and `b` both point to initialized values of type `T`.
unsafe fn eq<T: PartialEq>(a: NonNull<Erased>, b: NonNull<Erased>) -> bool {
    // SAFETY: `a` points to an initialized `T`, as guaranteed by the caller.
    let a = unsafe { a.cast::<T>().as_ref() };
    // SAFETY: `b` points to an initialized `T`, as guaranteed by the caller.
    let b = unsafe { b.cast::<T>().as_ref() };
    a == b
}

/// Vtable for formatting a variant alternative. Exists only for alternative
/// types that implement [`Debug`].
///
/// # Safety Invariant
///
/// The field `debug` is guaranteed to point to the function defined below
/// instantiated with the alternative type `T` that was used to create this
/// [`DebugVtable`].
///
/// [`Debug`]: core::fmt::Debug
#[derive(Clone, Copy)]
pub struct DebugVtable {
    /// Formats the alternative using its `Debug` impl.
    debug: unsafe fn(NonNull<Erased>, &mut core::fmt::Formatter<'_>) -> core::fmt::Result,
}

impl DebugVtable {
    /// Creates a new [`DebugVtable`] for the alternative type `T`.
    pub const fn new<T: core::fmt::Debug + 'static>() -> &'static Self {
        const { &Self { debug: debug::<T> } }
    }

    /// Formats the alternative at `ptr` using its `Debug` impl.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to an initialized value of the alternative type that
    ///    was used to create this [`DebugVtable`].
    #[inline]
    pub unsafe fn debug(
        &self,
        ptr: NonNull<Erased>,
        formatter: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        // SAFETY: We know that `self.debug` points to the function
        // `debug::<T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        unsafe { (self.debug)(ptr, formatter) }
    }
}

/// Formats the `T` at `ptr` using its `Debug` impl.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` points to an initialized value of type `T`.
unsafe fn debug<T: core::fmt::Debug>(
    ptr: NonNull<Erased>,
    formatter: &mut core::fmt::Formatter<'_>,
) -> core::fmt::Result {
    // SAFETY: `ptr` points to an initialized `T`, as guaranteed by the
    // caller.
    let value = unsafe { ptr.cast::<T>().as_ref() };
    core::fmt::Debug::fmt(value, formatter)
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    #[test]
    fn test_vtable_identity() {
        let vtable1 = AlternativeVtable::new::<i32>();
        let vtable2 = AlternativeVtable::new::<i32>();
        assert!(core::ptr::eq(vtable1, vtable2));
    }

    #[test]
    fn test_type_id_and_name() {
        let vtable = AlternativeVtable::new::<String>();
        assert_eq!(vtable.type_id(), TypeId::of::<String>());
        assert!(vtable.type_name().contains("String"));
    }

    #[test]
    fn test_needs_drop_flags() {
        assert!(!AlternativeVtable::new::<i32>().needs_drop());
        assert!(!AlternativeVtable::new::<[u64; 4]>().needs_drop());
        assert!(AlternativeVtable::new::<String>().needs_drop());
    }

    #[test]
    fn test_eq_dispatch() {
        let vtable = EqVtable::new::<i32>();
        let a = 7_i32;
        let b = 7_i32;
        let c = 8_i32;
        // SAFETY: All pointers reference live, initialized `i32`s matching
        // the vtable's type.
        let equal = unsafe { vtable.eq(NonNull::from(&a).cast(), NonNull::from(&b).cast()) };
        assert!(equal);
        // SAFETY: As above.
        let equal = unsafe { vtable.eq(NonNull::from(&a).cast(), NonNull::from(&c).cast()) };
        assert!(!equal);
    }
}

//! The tag + storage pair that owns a variant's active alternative.
//!
//! This module encapsulates the `tag` and `storage` fields of
//! [`RawVariant`], ensuring they are only visible within this module. This
//! visibility restriction guarantees the safety invariant: **whenever the
//! tag is `i + 1`, the storage holds an initialized value of alternative `i`
//! of the list, and whenever the tag is `0`, the storage holds nothing.**
//!
//! # Safety Invariant
//!
//! Since the fields can only be modified through the methods in this module,
//! the invariant is checked locally: every method that writes an alternative
//! sets the tag to match afterwards, and every method that destroys one sets
//! the tag to `0` *before* running the destructor, so a panicking destructor
//! or constructor can never leave the tag claiming a dead value is alive.
//! The worst a panic can do is leave the variant valueless, which is the
//! state the tag `0` describes.
//!
//! # Dispatch
//!
//! No method here performs a runtime type test. The active alternative's
//! destructor, clone, comparison, formatting, and visitation all go through
//! the `&'static` tables carried by the [`AlternativeList`] impls, indexed
//! by the tag.

use core::{marker::PhantomData, mem::MaybeUninit, ptr::NonNull};

use crate::{
    util::Erased,
    variant::{
        list::{
            AlternativeList, CloneableList, ComparableList, DebuggableList, ListSlot,
            RawVisitableBy, VisitableBy, VisitableByMut,
        },
        visit::{VisitValueless, VisitorOutput},
        vtable::AlternativeVtable,
    },
};

/// Union-backed tagged storage for one alternative out of the list `L`.
///
/// This is the storage engine behind the public `Variant` type. It knows
/// nothing about panic-safety policies or error types; it only maintains the
/// tag/storage invariant and routes every operation on the active
/// alternative through the list's dispatch tables.
///
/// The tag is kept *one-offset*: `0` means valueless, `i + 1` means
/// alternative `i` is alive. The public `index()` accessor translates to the
/// zero-based convention.
pub struct RawVariant<L: AlternativeList> {
    /// One-offset discriminant.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long
    /// as this struct exists:
    ///
    /// 1. If `tag == 0`, no alternative is alive in `storage`.
    /// 2. If `tag == i + 1`, then `i < L::LEN` and `storage` holds an
    ///    initialized value of the alternative type at slot `i` (the type
    ///    whose vtable is `L::VTABLES[i]`), at offset zero.
    tag: usize,
    /// Storage for the active alternative.
    ///
    /// Sized and aligned for the largest alternative; every alternative
    /// lives at offset zero. See [`ChainStorage`].
    ///
    /// [`ChainStorage`]: crate::variant::ChainStorage
    storage: MaybeUninit<L::Storage>,
    /// Marker making the variant covariant-free in `L` and keeping auto
    /// traits honest: the variant owns a value of one of the alternatives.
    _marker: PhantomData<L>,
}

impl<L: AlternativeList> RawVariant<L> {
    /// Creates a valueless variant.
    #[inline]
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            tag: 0,
            storage: MaybeUninit::uninit(),
            _marker: PhantomData,
        }
    }

    /// Returns the zero-based index of the active alternative, or `None` if
    /// the variant is valueless.
    #[inline]
    pub fn index(&self) -> Option<usize> {
        self.tag.checked_sub(1)
    }

    /// Returns the vtable of the active alternative, or `None` if the
    /// variant is valueless.
    #[inline]
    pub fn vtable(&self) -> Option<&'static AlternativeVtable> {
        Some(L::VTABLES[self.index()?])
    }

    /// Returns a type-erased pointer to the storage, for shared access to
    /// the active alternative.
    #[inline]
    fn storage_ptr(&self) -> NonNull<Erased> {
        NonNull::from(&self.storage).cast::<Erased>()
    }

    /// Returns a type-erased pointer to the storage, for exclusive access to
    /// the active alternative.
    #[inline]
    fn storage_ptr_mut(&mut self) -> NonNull<Erased> {
        NonNull::from(&mut self.storage).cast::<Erased>()
    }

    /// Destroys the active alternative, if any, leaving the variant
    /// valueless.
    ///
    /// The tag is set to `0` before the destructor runs, so a panicking
    /// destructor leaves the variant valueless rather than pointing at a
    /// destroyed value.
    pub fn clear(&mut self) {
        if let Some(vtable) = self.vtable() {
            self.tag = 0;
            if vtable.needs_drop() {
                // SAFETY:
                // 1. The tag said slot `i` was alive, so the storage holds an
                //    initialized value of the type matching `L::VTABLES[i]`.
                // 2. The tag is already `0`, so nothing will access or
                //    re-drop the value after this call.
                unsafe {
                    vtable.drop(self.storage_ptr_mut());
                }
            }
        }
    }

    /// Writes `value` into slot `I` of a valueless variant and returns a
    /// reference to it.
    ///
    /// The variant must currently be valueless (see [`clear`]); this is a
    /// contract, not a safety requirement; writing over a live alternative
    /// would leak it, which is safe but always a bug.
    ///
    /// [`clear`]: RawVariant::clear
    #[inline]
    pub fn write_slot<const I: usize>(
        &mut self,
        value: <L as ListSlot<I>>::Alternative,
    ) -> &mut <L as ListSlot<I>>::Alternative
    where
        L: ListSlot<I>,
    {
        debug_assert_eq!(self.tag, 0, "write into a non-valueless variant");
        let ptr = self
            .storage_ptr_mut()
            .cast::<<L as ListSlot<I>>::Alternative>();
        // SAFETY: The storage is valid for writes of any alternative at
        // offset zero, and no alternative is currently alive in it.
        unsafe {
            ptr.as_ptr().write(value);
        }
        self.tag = I + 1;
        // SAFETY: We just initialized the slot, and we hold exclusive access
        // through `&mut self` for the returned lifetime.
        unsafe { &mut *ptr.as_ptr() }
    }

    /// Writes `value` into the slot with the given runtime index and returns
    /// a reference to it.
    ///
    /// Unlike [`write_slot`], the slot index is a runtime value; the type
    /// `T` is checked against the slot's vtable, so a mismatched pair cannot
    /// corrupt the tag/storage invariant.
    ///
    /// The variant must currently be valueless, as for [`write_slot`].
    ///
    /// [`write_slot`]: RawVariant::write_slot
    ///
    /// # Panics
    ///
    /// Panics if `slot` is out of range or `T` is not the alternative type
    /// at `slot`.
    pub fn write_alternative<T: 'static>(&mut self, slot: usize, value: T) -> &mut T {
        debug_assert_eq!(self.tag, 0, "write into a non-valueless variant");
        assert_eq!(
            L::VTABLES[slot].type_id(),
            core::any::TypeId::of::<T>(),
            "alternative type does not match slot {slot}"
        );
        let ptr = self.storage_ptr_mut().cast::<T>();
        // SAFETY: The storage is valid for writes of any alternative at
        // offset zero, no alternative is currently alive in it, and we just
        // checked that `T` is the alternative type at `slot`.
        unsafe {
            ptr.as_ptr().write(value);
        }
        self.tag = slot + 1;
        // SAFETY: We just initialized the slot, and we hold exclusive access
        // through `&mut self` for the returned lifetime.
        unsafe { &mut *ptr.as_ptr() }
    }

    /// Returns a reference to the alternative at slot `I` without checking
    /// the tag.
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
        debug_assert_eq!(self.tag, I + 1, "unchecked access to an inactive slot");
        // SAFETY: Slot `I` is active (guaranteed by the caller), so the
        // storage holds an initialized value of its alternative type at
        // offset zero.
        unsafe { self.storage_ptr().cast::<<L as ListSlot<I>>::Alternative>().as_ref() }
    }

    /// Returns a mutable reference to the alternative at slot `I` without
    /// checking the tag.
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
        debug_assert_eq!(self.tag, I + 1, "unchecked access to an inactive slot");
        let mut ptr = self
            .storage_ptr_mut()
            .cast::<<L as ListSlot<I>>::Alternative>();
        // SAFETY: Slot `I` is active (guaranteed by the caller), and we hold
        // exclusive access through `&mut self`.
        unsafe { ptr.as_mut() }
    }

    /// Returns a reference to the active alternative as the type `T` without
    /// checking the tag or the type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The variant is not valueless and `T` is the type of the active
    ///    alternative.
    #[inline]
    pub unsafe fn downcast_unchecked<T: 'static>(&self) -> &T {
        debug_assert_eq!(
            self.vtable().map(AlternativeVtable::type_id),
            Some(core::any::TypeId::of::<T>()),
            "unchecked downcast to a type that is not active"
        );
        // SAFETY: The active alternative has type `T` (guaranteed by the
        // caller) and lives initialized at offset zero of the storage.
        unsafe { self.storage_ptr().cast::<T>().as_ref() }
    }

    /// Returns a mutable reference to the active alternative as the type `T`
    /// without checking the tag or the type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The variant is not valueless and `T` is the type of the active
    ///    alternative.
    #[inline]
    pub unsafe fn downcast_unchecked_mut<T: 'static>(&mut self) -> &mut T {
        debug_assert_eq!(
            self.vtable().map(AlternativeVtable::type_id),
            Some(core::any::TypeId::of::<T>()),
            "unchecked downcast to a type that is not active"
        );
        let mut ptr = self.storage_ptr_mut().cast::<T>();
        // SAFETY: The active alternative has type `T` (guaranteed by the
        // caller), and we hold exclusive access through `&mut self`.
        unsafe { ptr.as_mut() }
    }

    /// Visits the active alternative, or returns `None` if the variant is
    /// valueless.
    #[inline]
    pub fn visit<V>(&self, visitor: V) -> Option<V::Output>
    where
        V: VisitorOutput + 'static,
        L: VisitableBy<V>,
    {
        let index = self.index()?;
        // SAFETY: Entry `index` of the table expects the alternative at slot
        // `index`, which the tag says is the one alive in the storage.
        Some(unsafe { (<L as VisitableBy<V>>::VISIT_TABLE[index])(self.storage_ptr(), visitor) })
    }

    /// Mutably visits the active alternative, or returns `None` if the
    /// variant is valueless.
    #[inline]
    pub fn visit_mut<V>(&mut self, visitor: V) -> Option<V::Output>
    where
        V: VisitorOutput + 'static,
        L: VisitableByMut<V>,
    {
        let index = self.index()?;
        // SAFETY: Entry `index` of the table expects the alternative at slot
        // `index`, which the tag says is the one alive in the storage; we
        // hold exclusive access through `&mut self`.
        Some(unsafe {
            (<L as VisitableByMut<V>>::VISIT_MUT_TABLE[index])(self.storage_ptr_mut(), visitor)
        })
    }

    /// Visits the active alternative, dispatching the valueless state to the
    /// visitor itself.
    ///
    /// This indexes the raw table directly by the one-offset tag: slot 0 is
    /// the valueless thunk, so no tag check is needed at all.
    #[inline]
    pub fn visit_raw<V>(&self, visitor: V) -> V::Output
    where
        V: VisitValueless + 'static,
        L: RawVisitableBy<V>,
    {
        // SAFETY: Entry `tag` of the raw table is the valueless thunk for
        // tag 0 (which ignores the pointer) and the slot `tag - 1` visit
        // thunk otherwise, matching exactly what the tag says is alive.
        unsafe { (<L as RawVisitableBy<V>>::VISIT_RAW_TABLE[self.tag])(self.storage_ptr(), visitor) }
    }

    /// Visits the active alternative without checking for the valueless
    /// state.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The variant is not valueless.
    #[inline]
    pub unsafe fn visit_unchecked<V>(&self, visitor: V) -> V::Output
    where
        V: VisitorOutput + 'static,
        L: VisitableBy<V>,
    {
        debug_assert_ne!(self.tag, 0, "unchecked visit of a valueless variant");
        // SAFETY: The variant is not valueless (guaranteed by the caller),
        // so `tag - 1` is the active slot and the table entry matches the
        // value in storage.
        unsafe {
            (<L as VisitableBy<V>>::VISIT_TABLE[self.tag - 1])(self.storage_ptr(), visitor)
        }
    }

    /// Formats the active alternative with its `Debug` impl.
    ///
    /// The variant must not be valueless; callers check `index()` first.
    ///
    /// # Panics
    ///
    /// Panics if the variant is valueless.
    pub fn debug_alternative(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result
    where
        L: DebuggableList,
    {
        let index = self.index().expect("debug of a valueless variant");
        // SAFETY:
        // 1. The tag says slot `index` is alive, so the storage holds an
        //    initialized value of the type matching `L::DEBUG_VTABLES[index]`.
        unsafe { L::DEBUG_VTABLES[index].debug(self.storage_ptr(), formatter) }
    }
}

impl<L: CloneableList> Clone for RawVariant<L> {
    fn clone(&self) -> Self {
        match self.index() {
            None => Self::empty(),
            Some(index) => {
                let mut new = Self::empty();
                // SAFETY:
                // 1. The tag says slot `index` is alive in `self`, matching
                //    the vtable's type.
                // 2. `new` is valueless, so its storage is writable and
                //    holds nothing.
                // 3. `self` and `new` are distinct objects.
                unsafe {
                    L::CLONE_VTABLES[index].clone(self.storage_ptr(), new.storage_ptr_mut());
                }
                new.tag = index + 1;
                new
            }
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if self.tag == source.tag {
            if let Some(index) = self.index() {
                // SAFETY:
                // 1. Both variants carry the same tag, so both storages hold
                //    initialized values of the slot-`index` type.
                // 2. We hold exclusive access to `self` through `&mut self`.
                // 3. `self` and `source` are distinct objects (a same-object
                //    call would require aliasing `&mut self` with `&self`).
                unsafe {
                    L::CLONE_VTABLES[index]
                        .clone_from(source.storage_ptr(), self.storage_ptr_mut());
                }
            }
        } else {
            // Clone into a temporary first: if the clone panics, `self` is
            // untouched and keeps its old alternative.
            *self = source.clone();
        }
    }
}

impl<L: ComparableList> PartialEq for RawVariant<L> {
    fn eq(&self, other: &Self) -> bool {
        if self.tag != other.tag {
            return false;
        }
        match self.index() {
            None => true,
            // SAFETY:
            // 1. Both variants carry the same tag, so both storages hold
            //    initialized values of the slot-`index` type, matching the
            //    vtable.
            Some(index) => unsafe {
                L::EQ_VTABLES[index].eq(self.storage_ptr(), other.storage_ptr())
            },
        }
    }
}

impl<L: AlternativeList> Drop for RawVariant<L> {
    #[inline]
    fn drop(&mut self) {
        self.clear();
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use super::*;

    type List = (u32, String);

    #[test]
    fn test_empty_variant() {
        let variant = RawVariant::<List>::empty();
        assert_eq!(variant.index(), None);
        assert!(variant.vtable().is_none());
    }

    #[test]
    fn test_write_and_read_slot() {
        let mut variant = RawVariant::<List>::empty();
        variant.write_slot::<0>(42);
        assert_eq!(variant.index(), Some(0));
        // SAFETY: Slot 0 is active.
        let value = unsafe { variant.get_unchecked::<0>() };
        assert_eq!(*value, 42);
    }

    #[test]
    fn test_clear_then_rewrite() {
        let mut variant = RawVariant::<List>::empty();
        variant.write_slot::<1>(String::from("hello"));
        assert_eq!(variant.index(), Some(1));
        variant.clear();
        assert_eq!(variant.index(), None);
        variant.write_slot::<0>(7);
        assert_eq!(variant.index(), Some(0));
    }

    #[test]
    fn test_write_alternative_by_runtime_slot() {
        let mut variant = RawVariant::<List>::empty();
        let written = variant.write_alternative::<String>(1, String::from("x"));
        written.push('y');
        assert_eq!(variant.index(), Some(1));
        // SAFETY: The active alternative is a `String`.
        let value = unsafe { variant.downcast_unchecked::<String>() };
        assert_eq!(value, "xy");
    }

    #[test]
    #[should_panic(expected = "alternative type does not match slot")]
    fn test_write_alternative_type_mismatch_panics() {
        let mut variant = RawVariant::<List>::empty();
        variant.write_alternative::<String>(0, String::from("wrong slot"));
    }

    #[test]
    fn test_clone_and_eq() {
        let mut variant = RawVariant::<List>::empty();
        variant.write_slot::<1>(String::from("shared"));
        let clone = variant.clone();
        assert_eq!(clone.index(), Some(1));
        assert!(variant == clone);
        assert!(RawVariant::<List>::empty() == RawVariant::<List>::empty());
        assert!(!(variant == RawVariant::<List>::empty()));
    }

    #[test]
    fn test_send_sync_follow_alternatives() {
        static_assertions::assert_impl_all!(RawVariant<(u32, String)>: Send, Sync);
        static_assertions::assert_not_impl_any!(
            RawVariant<(u32, alloc::rc::Rc<u8>)>: Send, Sync
        );
    }
}

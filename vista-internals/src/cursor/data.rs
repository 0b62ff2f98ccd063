//! The allocation layout for erased cursors.
//!
//! This module encapsulates the fields of [`CursorData`]. Since this is the
//! only place they are visible, the vtable reference stored in the header is
//! guaranteed to always be in sync with the type of the actual cursor. This
//! follows from the fact that they are in sync when created and that the API
//! offers no way to change the vtable or cursor type after creation.
//!
//! # Layout
//!
//! [`CursorData`] is `#[repr(C)]` with the vtable reference first. A vtable
//! reference is a thin pointer for every vtable type `V`, so the header has
//! the same size, alignment, and offset in every instantiation, which is
//! what makes it sound to read the header through a pointer to the erased
//! [`ErasedCursorData`] form without knowing `V` or `C`.

use core::ptr::NonNull;

use crate::util::Erased;

/// The erased form of a [`CursorData`] allocation: both the vtable type and
/// the cursor type are forgotten.
pub type ErasedCursorData = CursorData<Erased, Erased>;

/// A cursor allocation: a vtable header followed by the concrete cursor.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete
/// cursor type `C` is unknown.
#[repr(C)]
pub struct CursorData<V: 'static, C> {
    /// The vtable of this cursor.
    vtable: &'static V,
    /// The actual cursor value.
    cursor: C,
}

impl<V: 'static, C> CursorData<V, C> {
    /// Creates a new [`CursorData`] pairing a cursor with its vtable.
    ///
    /// All type-agreement guarantees flow from here: the constructors in
    /// [`vtable`](crate::cursor::vtable) only ever pair a vtable built for
    /// `C` with a cursor of type `C`.
    #[inline]
    pub(super) const fn new(vtable: &'static V, cursor: C) -> Self {
        Self { vtable, cursor }
    }

    /// Returns the vtable stored in the header.
    #[inline]
    pub(super) fn vtable(&self) -> &'static V {
        self.vtable
    }

    /// Returns a reference to the concrete cursor.
    #[inline]
    pub(super) fn cursor(&self) -> &C {
        &self.cursor
    }

    /// Returns a mutable reference to the concrete cursor.
    #[inline]
    pub(super) fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }
}

impl ErasedCursorData {
    /// Reads the vtable header of an erased cursor allocation as `&'static
    /// V`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `CursorData<V, C>` allocation (for some
    ///    `C`) whose vtable type is the `V` given here.
    #[inline]
    pub(super) unsafe fn vtable_of<V: 'static>(ptr: NonNull<Self>) -> &'static V {
        let ptr = ptr.as_ptr();
        // SAFETY: The pointee is a `CursorData<V, C>` for some `C`. Since
        // `CursorData` is `#[repr(C)]` and a vtable reference is thin for
        // every `V`, the header field lives at offset zero with the same
        // layout in the erased and concrete forms, so it is safe to create a
        // pointer to it without knowing `C`.
        //
        // We take care to avoid creating a reference to the `CursorData`
        // itself, as that would be undefined behavior since we do not have
        // the right type.
        let vtable_ptr: *const &'static V = unsafe { &raw const (*ptr).vtable }.cast();
        // SAFETY: Dereferencing the field pointer and copying out the
        // `&'static V` is valid for the same reasons.
        unsafe { *vtable_ptr }
    }

    /// Casts an erased cursor allocation back to its concrete form.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `CursorData<V, C>` allocation with exactly
    ///    the `V` and `C` given here.
    /// 2. Shared access to the allocation is allowed for the lifetime `'a`.
    #[inline]
    pub(super) unsafe fn downcast<'a, V: 'static, C>(ptr: NonNull<Self>) -> &'a CursorData<V, C> {
        let ptr = ptr.cast::<CursorData<V, C>>();
        // SAFETY: The pointee really is a `CursorData<V, C>` (guaranteed by
        // the caller), it is live, and shared access is allowed for `'a`.
        unsafe { ptr.as_ref() }
    }

    /// Casts an erased cursor allocation back to its concrete form, with
    /// exclusive access.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `CursorData<V, C>` allocation with exactly
    ///    the `V` and `C` given here.
    /// 2. Exclusive access to the allocation is allowed for the lifetime
    ///    `'a`.
    #[inline]
    pub(super) unsafe fn downcast_mut<'a, V: 'static, C>(
        ptr: NonNull<Self>,
    ) -> &'a mut CursorData<V, C> {
        let mut ptr = ptr.cast::<CursorData<V, C>>();
        // SAFETY: The pointee really is a `CursorData<V, C>` (guaranteed by
        // the caller), it is live, and exclusive access is allowed for `'a`.
        unsafe { ptr.as_mut() }
    }

    /// Reads the concrete cursor out of an erased cursor allocation.
    ///
    /// Used by the view machinery to hand an erased cursor back to the
    /// concrete view that produced it (for end-of-range tests).
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `CursorData<V, C>` allocation (for some
    ///    vtable type `V`) whose cursor type is the `C` given here.
    /// 2. Shared access to the allocation is allowed for the lifetime `'a`.
    #[inline]
    pub(crate) unsafe fn cursor_payload<'a, C: 'static>(ptr: NonNull<Self>) -> &'a C {
        // SAFETY: The vtable type does not affect the layout of
        // `CursorData` (the header is a thin reference for every `V`), so
        // casting with `V = Erased` still projects the cursor field
        // correctly; requirements 1 and 2 are guaranteed by the caller.
        let this: &'a CursorData<Erased, C> = unsafe { Self::downcast::<Erased, C>(ptr) };
        this.cursor()
    }
}

#[cfg(test)]
mod tests {
    use core::mem::offset_of;

    use super::*;

    #[test]
    fn test_vtable_header_is_at_offset_zero() {
        #[repr(align(32))]
        struct LargeAlignment {
            _value: u8,
        }

        assert_eq!(offset_of!(CursorData<Erased, u8>, vtable), 0);
        assert_eq!(offset_of!(CursorData<Erased, [u64; 4]>, vtable), 0);
        assert_eq!(offset_of!(CursorData<Erased, LargeAlignment>, vtable), 0);
    }

    #[test]
    fn test_cursor_field_follows_header() {
        assert!(
            offset_of!(CursorData<Erased, u8>, cursor) >= core::mem::size_of::<&'static Erased>()
        );
    }
}

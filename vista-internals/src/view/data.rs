//! The allocation layout for erased views.
//!
//! This module encapsulates the fields of [`ViewData`]. Since this is the
//! only place they are visible, the vtable reference stored in the header is
//! guaranteed to always be in sync with the type of the actual view. This
//! follows from the fact that they are in sync when created and that the API
//! offers no way to change the vtable or view type after creation.
//!
//! The layout story is the same as for cursors: `#[repr(C)]` with a thin
//! `&'static` vtable reference first, so the header can be read through a
//! pointer to the erased [`ErasedViewData`] form without knowing the
//! concrete types.

use core::ptr::NonNull;

use crate::util::Erased;

/// The erased form of a [`ViewData`] allocation: both the vtable type and
/// the view type are forgotten.
pub type ErasedViewData = ViewData<Erased, Erased>;

/// A view allocation: a vtable header followed by the concrete view.
///
/// This struct uses `#[repr(C)]` to enable safe field access in type-erased
/// contexts, allowing access to the vtable field even when the concrete view
/// type `R` is unknown.
#[repr(C)]
pub struct ViewData<V: 'static, R> {
    /// The vtable of this view.
    vtable: &'static V,
    /// The actual view value.
    view: R,
}

impl<V: 'static, R> ViewData<V, R> {
    /// Creates a new [`ViewData`] pairing a view with its vtable.
    #[inline]
    pub(super) const fn new(vtable: &'static V, view: R) -> Self {
        Self { vtable, view }
    }

    /// Returns a reference to the concrete view.
    #[inline]
    pub(super) fn view(&self) -> &R {
        &self.view
    }
}

impl ErasedViewData {
    /// Reads the vtable header of an erased view allocation as `&'static V`.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `ViewData<V, R>` allocation (for some `R`)
    ///    whose vtable type is the `V` given here.
    #[inline]
    pub(super) unsafe fn vtable_of<V: 'static>(ptr: NonNull<Self>) -> &'static V {
        let ptr = ptr.as_ptr();
        // SAFETY: The pointee is a `ViewData<V, R>` for some `R`. Since
        // `ViewData` is `#[repr(C)]` and a vtable reference is thin for
        // every `V`, the header field lives at offset zero with the same
        // layout in the erased and concrete forms, so it is safe to create a
        // pointer to it without knowing `R`.
        //
        // We take care to avoid creating a reference to the `ViewData`
        // itself, as that would be undefined behavior since we do not have
        // the right type.
        let vtable_ptr: *const &'static V = unsafe { &raw const (*ptr).vtable }.cast();
        // SAFETY: Dereferencing the field pointer and copying out the
        // `&'static V` is valid for the same reasons.
        unsafe { *vtable_ptr }
    }

    /// Casts an erased view allocation back to its concrete form.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. `ptr` points to a live `ViewData<V, R>` allocation with exactly
    ///    the `V` and `R` given here.
    /// 2. Shared access to the allocation is allowed for the lifetime `'a`.
    #[inline]
    pub(super) unsafe fn downcast<'a, V: 'static, R>(ptr: NonNull<Self>) -> &'a ViewData<V, R> {
        let ptr = ptr.cast::<ViewData<V, R>>();
        // SAFETY: The pointee really is a `ViewData<V, R>` (guaranteed by
        // the caller), it is live, and shared access is allowed for `'a`.
        unsafe { ptr.as_ref() }
    }
}

#[cfg(test)]
mod tests {
    use core::mem::offset_of;

    use super::*;

    #[test]
    fn test_vtable_header_is_at_offset_zero() {
        assert_eq!(offset_of!(ViewData<Erased, u8>, vtable), 0);
        assert_eq!(offset_of!(ViewData<Erased, [u64; 8]>, vtable), 0);
    }
}

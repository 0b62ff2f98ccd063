//! The checked-access failure type for [`Variant`].
//!
//! [`Variant`]: crate::Variant

use core::fmt;

/// Error returned by the checked accessors of [`Variant`] when the requested
/// alternative is not the active one.
///
/// This is the *only* checked-access failure mode: it is returned both when
/// a different alternative is active and when the variant is valueless.
/// Inspect [`active_index`] to distinguish the two.
///
/// [`Variant`]: crate::Variant
/// [`active_index`]: BadVariantAccess::active_index
///
/// # Examples
///
/// ```
/// use vista::Variant;
///
/// let value: Variant<(i32, bool)> = Variant::new::<0>(7);
/// let error = value.get::<1>().unwrap_err();
/// assert_eq!(error.active_index(), Some(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadVariantAccess {
    /// The zero-based index that was active at the time of the failed
    /// access, or `None` if the variant was valueless.
    active: Option<usize>,
}

impl BadVariantAccess {
    /// Creates an error recording the active index at the time of the
    /// failure.
    #[inline]
    pub(super) fn new(active: Option<usize>) -> Self {
        Self { active }
    }

    /// Returns the zero-based index that was active when the access failed,
    /// or `None` if the variant was valueless.
    #[inline]
    pub fn active_index(&self) -> Option<usize> {
        self.active
    }
}

impl fmt::Display for BadVariantAccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.active {
            None => f.write_str("bad variant access: the variant is valueless"),
            Some(index) => write!(f, "bad variant access: alternative {index} is active"),
        }
    }
}

impl core::error::Error for BadVariantAccess {}

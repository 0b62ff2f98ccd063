//! The union chain that backs variant storage.
//!
//! A variant over the list `(T0, T1, T2)` stores its payload in
//! `ChainStorage<T0, ChainStorage<T1, ChainStorage<T2, ChainEnd>>>`: a
//! right-leaning chain of binary unions, one level per alternative,
//! terminated by the empty [`ChainEnd`]. A union's size and alignment are the
//! maximum over its fields, so the chain as a whole is exactly large enough
//! and exactly aligned enough for the largest alternative.
//!
//! Because every level is `#[repr(C)]`, every field of every level lives at
//! offset zero, which means *every alternative in the list lives at offset
//! zero of the chain*. Accessing the alternative at slot `i` is therefore a
//! pointer cast, never an offset computation.
//!
//! The chain is a pure layout device. It is only ever created inside
//! [`MaybeUninit`] and no field of it is ever read or written directly: the
//! owning [`RawVariant`] writes alternatives through casted pointers and
//! destroys them through the [`AlternativeVtable`] dispatch table. The
//! [`ManuallyDrop`] field wrappers exist to state that same fact to the
//! compiler: a union cannot know which member to destroy, so nothing is
//! destroyed here.
//!
//! [`MaybeUninit`]: core::mem::MaybeUninit
//! [`RawVariant`]: crate::variant::RawVariant
//! [`AlternativeVtable`]: crate::variant::AlternativeVtable

use core::mem::ManuallyDrop;

/// One level of the variant storage chain.
///
/// Holds either the alternative `H` at this level or the rest of the chain
/// `T`, both at offset zero. Never constructed and never dropped as a value;
/// see the module documentation.
#[repr(C)]
pub union ChainStorage<H, T> {
    /// The alternative stored at this level of the chain.
    _head: ManuallyDrop<H>,
    /// The remaining levels of the chain.
    _tail: ManuallyDrop<T>,
}

/// Terminator of the variant storage chain.
///
/// Zero-sized; contributes nothing to the size or alignment of the chain.
#[derive(Clone, Copy)]
pub struct ChainEnd;

#[cfg(test)]
mod tests {
    use core::mem::{align_of, size_of};

    use super::*;

    #[test]
    fn test_chain_size_is_max_of_alternatives() {
        type Chain = ChainStorage<u8, ChainStorage<u64, ChainStorage<u16, ChainEnd>>>;
        assert_eq!(size_of::<Chain>(), size_of::<u64>());
        assert_eq!(align_of::<Chain>(), align_of::<u64>());
    }

    #[test]
    fn test_chain_alignment_is_max_of_alternatives() {
        #[repr(align(32))]
        struct LargeAlignment {
            _value: u8,
        }

        type Chain = ChainStorage<u8, ChainStorage<LargeAlignment, ChainEnd>>;
        assert_eq!(align_of::<Chain>(), 32);
        assert_eq!(size_of::<Chain>(), 32);
    }

    #[test]
    fn test_chain_end_is_zero_sized() {
        assert_eq!(size_of::<ChainEnd>(), 0);
        assert_eq!(size_of::<ChainStorage<u32, ChainEnd>>(), size_of::<u32>());
    }

    #[test]
    fn test_chain_of_nontrivial_alternatives() {
        use alloc::{string::String, vec::Vec};

        type Chain = ChainStorage<String, ChainStorage<Vec<u64>, ChainEnd>>;
        assert_eq!(
            size_of::<Chain>(),
            size_of::<String>().max(size_of::<Vec<u64>>())
        );
    }
}

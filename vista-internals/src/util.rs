//! Internal utility types.

/// Marker type used when type-erasing variants, cursors, or views.
///
/// This zero-sized type serves as a placeholder in generic type parameters
/// when the actual concrete type has been erased. For example,
/// `CursorData<Erased, Erased>` represents a cursor allocation whose concrete
/// vtable and cursor types are unknown at the current scope, and
/// `NonNull<Erased>` points at a variant alternative whose concrete type is
/// only known to the vtable that accompanies it.
///
/// Using a distinct marker type (rather than `()`) makes the intent clearer
/// in type signatures and error messages.
#[derive(Clone, Copy)]
pub struct Erased;

//! Integration tests for the public `Variant` type.
//!
//! Coverage: construction by index and by type,
//! conditional trait impls, assignment semantics (same-slot assignment
//! versus cross-slot reconstruction, instrumented), the panic paths that
//! lead to (or avoid) the valueless state, the three access tiers, and the
//! three visitation modes.

use std::{cell::Cell, panic::AssertUnwindSafe, rc::Rc};

use vista::{
    variant::{VisitAlternative, VisitAlternativeMut, VisitValueless, VisitorOutput},
    BadVariantAccess, Variant,
};

#[test]
fn test_construction_by_index() {
    let value: Variant<(u8, String, bool)> = Variant::new::<2>(true);
    assert_eq!(value.index(), Some(2));
    assert!(!value.is_valueless());
    assert_eq!(value.get_if::<2>(), Some(&true));
    assert_eq!(value.get_if::<0>(), None);
}

#[test]
fn test_construction_by_type() {
    let value: Variant<(u8, String)> = Variant::from_value(String::from("typed"));
    assert_eq!(value.index(), Some(1));
    assert!(value.holds_alternative::<String>());
    assert!(!value.holds_alternative::<u8>());
    assert_eq!(value.get_if_as::<String>().map(String::as_str), Some("typed"));
}

#[test]
#[should_panic(expected = "is not an alternative")]
fn test_construction_by_absent_type_panics() {
    let _ = Variant::<(u8, String)>::from_value(3.5_f64);
}

#[test]
#[should_panic(expected = "appears more than once")]
fn test_construction_by_duplicated_type_panics() {
    let _ = Variant::<(u8, u8)>::from_value(7_u8);
}

#[test]
fn test_default_uses_first_alternative() {
    let value: Variant<(u32, String)> = Variant::default();
    assert_eq!(value.index(), Some(0));
    assert_eq!(value.get_if::<0>(), Some(&0));
}

#[test]
fn test_checked_access() {
    let mut value: Variant<(i32, String)> = Variant::new::<0>(5);
    assert_eq!(value.get::<0>(), Ok(&5));

    let error = value.get::<1>().unwrap_err();
    assert_eq!(error.active_index(), Some(0));
    assert_eq!(
        error.to_string(),
        "bad variant access: alternative 0 is active"
    );

    *value.get_mut::<0>().unwrap() += 1;
    assert_eq!(value.get::<0>(), Ok(&6));

    assert_eq!(value.get_as::<i32>(), Ok(&6));
    assert_eq!(
        value.get_as::<String>().unwrap_err().active_index(),
        Some(0)
    );
}

#[test]
fn test_unchecked_access() {
    let value: Variant<(i32, String)> = Variant::new::<0>(41);
    // SAFETY: Slot 0 is active.
    let inner = unsafe { value.get_unchecked::<0>() };
    assert_eq!(*inner, 41);
}

#[test]
fn test_value_assignment_scenario() {
    // The classic scenario: a variant holding a string is assigned an
    // integer value; the string is destroyed and slot 0 becomes active.
    let mut value: Variant<(i32, String)> = Variant::from_value(String::from("hello"));
    value.assign_value(42);
    assert_eq!(value.index(), Some(0));
    assert_eq!(value.get::<0>(), Ok(&42));
}

/// Counters shared by every clone of a [`Tracked`] value.
#[derive(Default)]
struct Counters {
    clones: Cell<usize>,
    clone_froms: Cell<usize>,
    drops: Cell<usize>,
}

/// An instrumented alternative distinguishing clone from clone_from.
struct Tracked {
    counters: Rc<Counters>,
}

impl Tracked {
    fn new(counters: &Rc<Counters>) -> Self {
        Self {
            counters: counters.clone(),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.clones.set(self.counters.clones.get() + 1);
        Self {
            counters: self.counters.clone(),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        source
            .counters
            .clone_froms
            .set(source.counters.clone_froms.get() + 1);
        self.counters = source.counters.clone();
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.drops.set(self.counters.drops.get() + 1);
    }
}

#[test]
fn test_same_slot_clone_from_assigns_in_place() {
    let counters = Rc::new(Counters::default());
    let source: Variant<(Tracked, u8)> = Variant::new::<0>(Tracked::new(&counters));
    let mut destination: Variant<(Tracked, u8)> = Variant::new::<0>(Tracked::new(&counters));

    destination.clone_from(&source);

    // Same active slot: the alternative's own clone_from runs, no fresh
    // clone is constructed and nothing is destroyed.
    assert_eq!(counters.clone_froms.get(), 1);
    assert_eq!(counters.clones.get(), 0);
    assert_eq!(counters.drops.get(), 0);
}

#[test]
fn test_cross_slot_clone_from_reconstructs() {
    let counters = Rc::new(Counters::default());
    let source: Variant<(Tracked, u8)> = Variant::new::<0>(Tracked::new(&counters));
    let mut destination: Variant<(Tracked, u8)> = Variant::new::<1>(9);

    destination.clone_from(&source);

    // Different slots: a fresh clone is constructed (via a temporary) and
    // the old alternative destroyed.
    assert_eq!(counters.clone_froms.get(), 0);
    assert_eq!(counters.clones.get(), 1);
    assert_eq!(destination.index(), Some(0));
}

#[test]
fn test_drop_runs_exactly_once() {
    let counters = Rc::new(Counters::default());
    {
        let _value: Variant<(Tracked, u8)> = Variant::new::<0>(Tracked::new(&counters));
    }
    assert_eq!(counters.drops.get(), 1);
}

#[test]
fn test_emplace_destroys_old_value_even_for_same_slot() {
    let counters = Rc::new(Counters::default());
    let mut value: Variant<(Tracked, u8)> = Variant::new::<0>(Tracked::new(&counters));
    value.emplace::<0>(Tracked::new(&counters));
    // No same-slot fast path: the old alternative is destroyed outright.
    assert_eq!(counters.drops.get(), 1);
    assert_eq!(counters.clone_froms.get(), 0);
}

#[test]
fn test_emplace_with_panic_leaves_valueless() {
    let mut value: Variant<(i32, String)> = Variant::new::<0>(1);
    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        value.emplace_with::<1, _>(|| panic!("constructor failure"));
    }));
    assert!(result.is_err());
    assert!(value.is_valueless());
    assert_eq!(value.index(), None);

    let error = value.get::<0>().unwrap_err();
    assert_eq!(error.active_index(), None);
    assert_eq!(
        error.to_string(),
        "bad variant access: the variant is valueless"
    );

    // A valueless variant is still assignable and recovers normally.
    value.assign::<0>(7);
    assert_eq!(value.get::<0>(), Ok(&7));
}

/// An alternative whose clone panics on demand.
struct PanickyClone {
    armed: bool,
}

impl Clone for PanickyClone {
    fn clone(&self) -> Self {
        assert!(!self.armed, "armed clone");
        Self { armed: self.armed }
    }
}

#[test]
fn test_cross_slot_clone_from_panic_preserves_old_value() {
    let source: Variant<(PanickyClone, i32)> = Variant::new::<0>(PanickyClone { armed: true });
    let mut destination: Variant<(PanickyClone, i32)> = Variant::new::<1>(3);

    let result = std::panic::catch_unwind(AssertUnwindSafe(|| {
        destination.clone_from(&source);
    }));
    assert!(result.is_err());

    // The clone panicked while constructing the temporary, so the
    // destination still holds its old alternative.
    assert!(!destination.is_valueless());
    assert_eq!(destination.get::<1>(), Ok(&3));
}

#[test]
fn test_equality() {
    type V = Variant<(i32, String)>;

    let a: V = Variant::new::<0>(1);
    let b: V = Variant::new::<0>(1);
    let c: V = Variant::new::<0>(2);
    let d: V = Variant::new::<1>(String::from("1"));

    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_ne!(a, d);

    // Valueless variants compare equal to each other and unequal to
    // everything else.
    let mut valueless_1: V = Variant::new::<0>(0);
    let mut valueless_2: V = Variant::new::<0>(0);
    for valueless in [&mut valueless_1, &mut valueless_2] {
        let _ = std::panic::catch_unwind(AssertUnwindSafe(|| {
            valueless.emplace_with::<0, _>(|| panic!("drain"));
        }));
    }
    assert_eq!(valueless_1, valueless_2);
    assert_ne!(valueless_1, a);
}

#[test]
fn test_clone_round_trip() {
    let original: Variant<(i32, String)> = Variant::new::<1>(String::from("round trip"));
    let clone = original.clone();
    assert_eq!(original, clone);
}

#[test]
fn test_debug_formatting() {
    let value: Variant<(i32, String)> = Variant::new::<1>(String::from("x"));
    assert_eq!(format!("{value:?}"), "Variant(1: \"x\")");

    let mut valueless: Variant<(i32, String)> = Variant::new::<0>(0);
    let _ = std::panic::catch_unwind(AssertUnwindSafe(|| {
        valueless.emplace_with::<0, _>(|| panic!("drain"));
    }));
    assert_eq!(format!("{valueless:?}"), "Variant(valueless)");
}

#[test]
fn test_error_alternatives() {
    #[derive(Debug, Clone, PartialEq, thiserror::Error)]
    enum LoadError {
        #[error("missing key `{0}`")]
        Missing(String),
        #[error("malformed input")]
        Malformed,
    }

    type Outcome = Variant<(u64, LoadError)>;

    let success: Outcome = Variant::new::<0>(17);
    let failure: Outcome = Variant::from_value(LoadError::Missing(String::from("port")));

    assert_eq!(success.get::<0>(), Ok(&17));
    assert_eq!(
        failure.get_if_as::<LoadError>().map(ToString::to_string),
        Some(String::from("missing key `port`"))
    );
    assert_ne!(success, failure);
    assert_eq!(
        failure.get_if_as::<LoadError>(),
        Some(&LoadError::Missing(String::from("port")))
    );
    let _ = LoadError::Malformed;
}

/// A visitor summing whatever number it finds.
struct Sum;

impl VisitorOutput for Sum {
    type Output = i64;
}

impl VisitAlternative<i8> for Sum {
    fn visit(self, alternative: &i8) -> i64 {
        i64::from(*alternative)
    }
}

impl VisitAlternative<i32> for Sum {
    fn visit(self, alternative: &i32) -> i64 {
        i64::from(*alternative)
    }
}

impl VisitValueless for Sum {
    fn visit_valueless(self) -> i64 {
        -1
    }
}

/// A visitor doubling whatever number it finds.
struct Double;

impl VisitorOutput for Double {
    type Output = ();
}

impl VisitAlternativeMut<i8> for Double {
    fn visit_mut(self, alternative: &mut i8) {
        *alternative *= 2;
    }
}

impl VisitAlternativeMut<i32> for Double {
    fn visit_mut(self, alternative: &mut i32) {
        *alternative *= 2;
    }
}

#[test]
fn test_visit_modes() {
    let mut value: Variant<(i8, i32)> = Variant::new::<1>(50);
    assert_eq!(value.visit(Sum), Ok(50));
    assert_eq!(value.visit_raw(Sum), 50);
    // SAFETY: The variant is not valueless.
    assert_eq!(unsafe { value.visit_unchecked(Sum) }, 50);

    value.visit_mut(Double).unwrap();
    assert_eq!(value.get::<1>(), Ok(&100));

    let _ = std::panic::catch_unwind(AssertUnwindSafe(|| {
        value.emplace_with::<0, _>(|| panic!("drain"));
    }));
    assert!(value.visit(Sum).is_err());
    assert_eq!(value.visit_raw(Sum), -1);
}

#[test]
fn test_bad_access_error_is_a_real_error_type() {
    fn assert_error<E: std::error::Error>() {}
    assert_error::<BadVariantAccess>();
}

#[test]
fn test_active_type_name() {
    let value: Variant<(u8, String)> = Variant::from_value(String::from("n"));
    assert!(value.active_type_name().unwrap().contains("String"));
}

//! Assertion helpers for the laws every registry must satisfy.
//!
//! Each checker walks the whole input and collects violations into a single
//! report, so a broken target profile shows every failing case at once.
//!
//! # Example
//!
//! ```
//! use foldhost_test_utils::{boundary_values, ieee_only, laws};
//! use foldhost_types::NumericType;
//!
//! let registry = ieee_only();
//! laws::assert_round_trip_laws(&registry, &boundary_values(NumericType::real(8)));
//! laws::assert_promotion_laws(&registry, &NumericType::INTRINSIC);
//! ```

use std::fmt::Write;

use foldhost_host::{HostRegistry, HostValue};
use foldhost_types::{NumericType, PromotionChain, Scalar};

fn report(subject: &str, violations: Vec<String>) {
    if violations.is_empty() {
        return;
    }
    let mut msg = format!("{} {subject} law violation(s):\n", violations.len());
    for (i, v) in violations.iter().enumerate() {
        let _ = writeln!(msg, "  {}. {}", i + 1, v);
    }
    panic!("{msg}");
}

/// Check that every value whose type is native survives the caster unchanged.
///
/// For each value `v` of a type with a native representation this verifies:
/// - **Round trip**: `from_native(to_native(v)) == v`
/// - **Layout**: the native value is stored in the registry's native type
/// - **Reverse lookup**: that native type maps back to a type of the same
///   category
/// - **Parts**: a complex value's native parts equal its converted parts
///
/// Values of absent types are skipped.
pub fn assert_round_trip_laws(registry: &HostRegistry, values: &[Scalar]) {
    let mut violations = Vec::new();
    for value in values {
        check_round_trip(registry, value, &mut violations);
    }
    report("round-trip", violations);
}

fn check_round_trip(registry: &HostRegistry, value: &Scalar, violations: &mut Vec<String>) {
    let ty = value.numeric_type();
    let Some(representation) = registry.lookup(ty) else {
        return;
    };
    let native = registry.to_native(value);
    if native.host_type() != representation.host_type() {
        violations.push(format!(
            "{ty}: stored as {} instead of {}",
            native.host_type(),
            representation.host_type()
        ));
        return;
    }
    let back = registry.from_native(&native, ty);
    if back != *value {
        violations.push(format!("{ty}: {value:?} came back as {back:?}"));
    }
    match registry.descriptor_of_native(native.host_type()) {
        Some(found) if found.category() == ty.category() => {}
        other => violations.push(format!(
            "{ty}: {} maps back to {other:?}",
            native.host_type()
        )),
    }
    if let (HostValue::Complex(pair), Some((re, im))) = (&native, value.parts()) {
        if registry.to_native(&re) != HostValue::Real(pair.re) {
            violations.push(format!("{ty}: real part of {value:?} disagrees with whole"));
        }
        if registry.to_native(&im) != HostValue::Real(pair.im) {
            violations.push(format!("{ty}: imaginary part of {value:?} disagrees with whole"));
        }
    }
}

/// Check that promotion finds the smallest native kind at or above each type.
///
/// For each type `d` this verifies:
/// - **Trivial**: if `d` is native, it resolves to itself
/// - **Monotone**: otherwise the chosen kind lies strictly above `d` in its
///   chain and is native
/// - **Minimal**: no native kind lies between `d` and the chosen kind
/// - **Exhaustive**: "not found" only when no kind above `d` is native
/// - **Complex follows real**: `complex(k)` is native exactly when `real(k)` is
pub fn assert_promotion_laws(registry: &HostRegistry, types: &[NumericType]) {
    let mut violations = Vec::new();
    for ty in types {
        check_promotion(registry, *ty, &mut violations);
    }
    report("promotion", violations);
}

fn check_promotion(registry: &HostRegistry, ty: NumericType, violations: &mut Vec<String>) {
    let promotion = registry.bigger_or_same(ty);
    if let Some(real) = ty.part() {
        if registry.exists(real) != registry.exists(ty) {
            violations.push(format!("{ty} and {real} disagree on being native"));
        }
    }
    if registry.exists(ty) {
        if !promotion.is_some_and(|p| p.is_trivial()) {
            violations.push(format!("{ty}: native but resolved to {promotion:?}"));
        }
        return;
    }
    let above: Vec<u8> = PromotionChain::for_category(ty.category())
        .map(|chain| chain.walk(ty.kind()).collect())
        .unwrap_or_default();
    let first_native = above
        .iter()
        .map(|kind| ty.with_kind(*kind))
        .find(|candidate| registry.exists(*candidate));
    match (promotion, first_native) {
        (None, None) => {}
        (Some(promotion), Some(expected)) => {
            if promotion.requested != ty {
                violations.push(format!("{ty}: promotion requested {}", promotion.requested));
            }
            if promotion.chosen != expected {
                violations.push(format!(
                    "{ty}: chose {} but {expected} is the nearest native kind",
                    promotion.chosen
                ));
            }
            if registry.lookup(promotion.chosen) != Some(promotion.representation) {
                violations.push(format!(
                    "{ty}: representation of {} does not match the registry",
                    promotion.chosen
                ));
            }
        }
        (Some(promotion), None) => violations.push(format!(
            "{ty}: chose {} although nothing above is native",
            promotion.chosen
        )),
        (None, Some(expected)) => {
            violations.push(format!("{ty}: not found although {expected} is native"));
        }
    }
}

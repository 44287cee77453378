use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::value::Operand;

/// Multiplier of the tuple hash fold: `acc = acc * 31 + hash(element)`.
pub const TUPLE_HASH_MULTIPLIER: u64 = 31;

/// Deterministic hash of a single operand.
///
/// `FxHasher` is unkeyed, so the value is stable across processes.
pub fn operand_hash(operand: &Operand) -> u64 {
    let mut hasher = FxHasher::default();
    operand.hash(&mut hasher);
    hasher.finish()
}

/// Order-sensitive polynomial fold over the elements. Empty input hashes to 0.
pub fn tuple_hash(operands: &[Operand]) -> u64 {
    operands.iter().fold(0u64, |acc, operand| {
        acc.wrapping_mul(TUPLE_HASH_MULTIPLIER)
            .wrapping_add(operand_hash(operand))
    })
}

// Float equality treats NaN as equal to NaN and 0.0 as equal to -0.0;
// the canonical bits below collapse exactly those classes.

pub(crate) fn f32_eq(a: f32, b: f32) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub(crate) fn f64_eq(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

pub(crate) fn f32_bits(v: f32) -> u32 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f32::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

pub(crate) fn f64_bits(v: f64) -> u64 {
    if v == 0.0 {
        0
    } else if v.is_nan() {
        f64::NAN.to_bits()
    } else {
        v.to_bits()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tuple_hash_is_zero() {
        assert_eq!(tuple_hash(&[]), 0);
    }

    #[test]
    fn test_single_element_tuple_hash() {
        let op = Operand::from(9i64);
        assert_eq!(tuple_hash(std::slice::from_ref(&op)), operand_hash(&op));
    }

    #[test]
    fn test_fold_definition() {
        let ops = [Operand::from(1i32), Operand::from("x"), Operand::Null];
        let expected = operand_hash(&ops[0])
            .wrapping_mul(31)
            .wrapping_add(operand_hash(&ops[1]))
            .wrapping_mul(31)
            .wrapping_add(operand_hash(&ops[2]));
        assert_eq!(tuple_hash(&ops), expected);
    }

    #[test]
    fn test_order_sensitive() {
        let a = [Operand::from(1i32), Operand::from(2i32)];
        let b = [Operand::from(2i32), Operand::from(1i32)];
        assert_ne!(tuple_hash(&a), tuple_hash(&b));
    }

    #[test]
    fn test_kinds_hash_differently() {
        assert_ne!(operand_hash(&Operand::from(3i32)), operand_hash(&Operand::from(3i64)));
        assert_ne!(operand_hash(&Operand::Null), operand_hash(&Operand::from(false)));
    }

    #[test]
    fn test_null_moves_tuple_hash() {
        let x = Operand::from(5i64);
        assert_ne!(operand_hash(&Operand::Null), 0);
        assert_ne!(
            tuple_hash(&[Operand::Null, x.clone()]),
            tuple_hash(std::slice::from_ref(&x))
        );
        assert_ne!(tuple_hash(&[Operand::Null]), tuple_hash(&[]));
    }

    #[test]
    fn test_canonical_float_bits() {
        assert_eq!(f64_bits(-0.0), f64_bits(0.0));
        assert_eq!(f32_bits(-f32::NAN), f32_bits(f32::NAN));
        assert!(f64_eq(f64::NAN, f64::NAN));
        assert!(!f32_eq(1.0, 2.0));
    }
}

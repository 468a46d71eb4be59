//! Integration tests for money arithmetic.
//!
//! These tests exercise the algebraic properties of `Money` over a grid of
//! representative amounts, including negative values and nanos near the
//! carry boundary.

use domain::{Money, MoneyError, NANOS_PER_UNIT};

fn samples(code: &str) -> Vec<Money> {
    let raw: &[(i64, i32)] = &[
        (0, 0),
        (0, 1),
        (0, 999_999_999),
        (0, -999_999_999),
        (1, 500_000_000),
        (8, 990_000_000),
        (-2, -750_000_000),
        (-5, 0),
        (123, 456_789_012),
        (-987, -654_321_098),
    ];
    raw.iter()
        .map(|&(u, n)| Money::new(code, u, n).unwrap())
        .collect()
}

fn assert_normalized(m: &Money) {
    assert!((m.nanos() as i64).abs() < NANOS_PER_UNIT, "nanos out of range: {m}");
    assert!(
        m.nanos() == 0 || m.units() == 0 || (m.units() > 0) == (m.nanos() > 0),
        "sign disagreement: {m}"
    );
}

mod sum {
    use super::*;

    #[test]
    fn is_commutative() {
        for a in samples("USD") {
            for b in samples("USD") {
                assert_eq!(a.sum(&b).unwrap(), b.sum(&a).unwrap());
            }
        }
    }

    #[test]
    fn is_associative() {
        let values = samples("USD");
        for a in &values {
            for b in &values {
                for c in &values {
                    let left = a.sum(b).unwrap().sum(c).unwrap();
                    let right = a.sum(&b.sum(c).unwrap()).unwrap();
                    assert_eq!(left, right);
                }
            }
        }
    }

    #[test]
    fn always_normalizes() {
        for a in samples("USD") {
            for b in samples("USD") {
                assert_normalized(&a.sum(&b).unwrap());
            }
        }
    }

    #[test]
    fn zero_is_identity() {
        let zero = Money::zero("USD");
        for a in samples("USD") {
            assert_eq!(a.sum(&zero).unwrap(), a);
        }
    }

    #[test]
    fn rejects_cross_currency() {
        for a in samples("USD") {
            for b in samples("EUR") {
                assert!(matches!(
                    a.sum(&b),
                    Err(MoneyError::CurrencyMismatch { .. })
                ));
            }
        }
    }

    #[test]
    fn value_plus_negation_is_zero() {
        for a in samples("USD") {
            assert!(a.sum(&a.negate().unwrap()).unwrap().is_zero());
        }
    }
}

mod multiply {
    use super::*;

    #[test]
    fn equals_repeated_sum() {
        for m in samples("JPY") {
            for q in 0..12u32 {
                let mut expected = Money::zero("JPY");
                for _ in 0..q {
                    expected = expected.sum(&m).unwrap();
                }
                assert_eq!(m.multiply(q).unwrap(), expected);
                assert_eq!(m.multiply_slow(q).unwrap(), expected);
            }
        }
    }

    #[test]
    fn always_normalizes() {
        for m in samples("USD") {
            for q in [0, 1, 2, 3, 7, 1000, 65_535] {
                assert_normalized(&m.multiply(q).unwrap());
            }
        }
    }

    #[test]
    fn overflow_is_reported() {
        let huge = Money::new("USD", i64::MAX / 2, 0).unwrap();
        assert_eq!(huge.multiply(3), Err(MoneyError::Overflow));
    }
}

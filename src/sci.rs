//! Scientific-notation numbers: `mantissa × 10^exponent`.
//!
//! Balances in an idle game outgrow `f64` quickly, so every amount of
//! currency is carried as a single `f64` mantissa plus an integer exponent.
//! Only the mantissa is floating point; the exponent never overflows in
//! practice, so values far beyond `1e308` stay representable (with the usual
//! ~16 significant digits of precision).

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use serde::{Deserialize, Serialize};

/// Exponents outside this range produce `inf`/`0` from `powi` anyway.
const POW10_LIMIT: i64 = 400;

/// `10^exp` as an `f64`, saturating for exponents beyond the `f64` range.
pub(crate) fn pow10(exp: i64) -> f64 {
    10f64.powi(exp.clamp(-POW10_LIMIT, POW10_LIMIT) as i32)
}

/// A `(mantissa, exponent)` pair representing `mantissa × 10^exponent`.
///
/// Once normalized, either the value is canonical zero (`0 × 10^0`) or
/// `1 <= |mantissa| < 10`. All operations return new values.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sci {
    #[serde(alias = "mantisse")]
    pub mantissa: f64,
    #[serde(alias = "exposant")]
    pub exponent: i64,
}

impl Sci {
    pub const ZERO: Sci = Sci {
        mantissa: 0.0,
        exponent: 0,
    };

    /// Largest finite `f64`, used when a real overflows to infinity.
    const MAX_FINITE: Sci = Sci {
        mantissa: 1.797_693_134_862_315_7,
        exponent: 308,
    };

    pub fn new(mantissa: f64, exponent: i64) -> Self {
        Self { mantissa, exponent }
    }

    /// Convert a plain real. The result may sit an epsilon outside
    /// `[1, 10)`; call [`Sci::normalize`] before relying on the invariant.
    ///
    /// NaN maps to zero, infinities to the largest finite value of that sign.
    pub fn from_f64(x: f64) -> Self {
        if x == 0.0 || x.is_nan() {
            return Self::ZERO;
        }
        if x.is_infinite() {
            return Self::saturated(x);
        }
        let exponent = x.abs().log10().floor() as i64;
        // 10^exponent underflows for subnormals; lift x first.
        let mantissa = if exponent < -300 {
            (x * 1e300) / pow10(exponent + 300)
        } else {
            x / pow10(exponent)
        };
        Self { mantissa, exponent }
    }

    /// Shift the mantissa into `[1, 10)`, or return canonical zero.
    pub fn normalize(self) -> Self {
        let Sci {
            mut mantissa,
            mut exponent,
        } = self;
        if mantissa == 0.0 || mantissa.is_nan() {
            return Self::ZERO;
        }
        if mantissa.is_infinite() {
            return Self::saturated(mantissa);
        }
        loop {
            let magnitude = mantissa.abs();
            if magnitude >= 10.0 {
                mantissa /= 10.0;
                exponent += 1;
            } else if magnitude < 1.0 {
                mantissa *= 10.0;
                exponent -= 1;
            } else {
                break;
            }
        }
        Self { mantissa, exponent }
    }

    /// `mantissa × 10^exponent`. Overflows to `±inf` past the `f64` range.
    pub fn to_f64(self) -> f64 {
        self.mantissa * pow10(self.exponent)
    }

    pub fn is_zero(&self) -> bool {
        self.mantissa == 0.0
    }

    pub fn is_positive(&self) -> bool {
        self.mantissa > 0.0
    }

    /// Multiply by a plain real without materializing the full value.
    pub fn scale(self, factor: f64) -> Self {
        Self {
            mantissa: self.mantissa * factor,
            exponent: self.exponent,
        }
        .normalize()
    }

    /// Order two normalized values: exponent first, then mantissa.
    ///
    /// The larger exponent always wins, whatever the mantissa signs are.
    /// Un-normalized operands give meaningless results.
    pub fn compare(&self, other: &Sci) -> Ordering {
        self.exponent.cmp(&other.exponent).then_with(|| {
            self.mantissa
                .partial_cmp(&other.mantissa)
                .unwrap_or(Ordering::Equal)
        })
    }

    fn saturated(sign: f64) -> Self {
        Self {
            mantissa: Self::MAX_FINITE.mantissa.copysign(sign),
            exponent: Self::MAX_FINITE.exponent,
        }
    }
}

impl Default for Sci {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<f64> for Sci {
    fn from(x: f64) -> Self {
        Sci::from_f64(x).normalize()
    }
}

/// Aligns the operand with the smaller exponent onto the larger one, so the
/// true sum is never formed as an `f64`. Contributions below the mantissa's
/// precision vanish.
impl Add for Sci {
    type Output = Sci;

    fn add(self, rhs: Sci) -> Sci {
        if self.is_zero() {
            return rhs;
        }
        if rhs.is_zero() {
            return self;
        }
        let (big, small) = if self.exponent >= rhs.exponent {
            (self, rhs)
        } else {
            (rhs, self)
        };
        let gap = big.exponent.saturating_sub(small.exponent);
        Sci {
            mantissa: big.mantissa + small.mantissa / pow10(gap),
            exponent: big.exponent,
        }
        .normalize()
    }
}

impl Neg for Sci {
    type Output = Sci;

    fn neg(self) -> Sci {
        Sci {
            mantissa: -self.mantissa,
            exponent: self.exponent,
        }
    }
}

/// No guard against going negative; check with [`Sci::compare`] first when
/// the result must stay non-negative.
impl Sub for Sci {
    type Output = Sci;

    fn sub(self, rhs: Sci) -> Sci {
        self + (-rhs)
    }
}

impl AddAssign for Sci {
    fn add_assign(&mut self, rhs: Sci) {
        *self = *self + rhs;
    }
}

impl SubAssign for Sci {
    fn sub_assign(&mut self, rhs: Sci) {
        *self = *self - rhs;
    }
}

impl PartialOrd for Sci {
    fn partial_cmp(&self, other: &Sci) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl fmt::Display for Sci {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::format::format_sci(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn zero_is_canonical() {
        assert_eq!(Sci::from_f64(0.0), Sci::ZERO);
        assert_eq!(Sci::from_f64(-0.0), Sci::ZERO);
        assert_eq!(Sci::new(0.0, 42).normalize(), Sci::ZERO);
    }

    #[test]
    fn from_f64_1500() {
        let v = Sci::from_f64(1500.0).normalize();
        assert_eq!(v.exponent, 3);
        assert!(approx(v.mantissa, 1.5));
    }

    #[test]
    fn from_f64_small_and_negative() {
        let v = Sci::from(0.025);
        assert_eq!(v.exponent, -2);
        assert!(approx(v.mantissa, 2.5));

        let v = Sci::from(-4200.0);
        assert_eq!(v.exponent, 3);
        assert!(approx(v.mantissa, -4.2));
    }

    #[test]
    fn non_finite_inputs_stay_defined() {
        assert_eq!(Sci::from_f64(f64::NAN), Sci::ZERO);
        let inf = Sci::from_f64(f64::INFINITY);
        assert_eq!(inf.exponent, 308);
        assert!(inf.mantissa > 1.0 && inf.mantissa < 10.0);
        let neg_inf = Sci::new(f64::NEG_INFINITY, 3).normalize();
        assert!(neg_inf.mantissa < 0.0);
    }

    #[test]
    fn normalize_shifts_both_ways() {
        let v = Sci::new(1750.0, 1).normalize();
        assert_eq!(v.exponent, 4);
        assert!(approx(v.mantissa, 1.75));

        let v = Sci::new(0.003, 5).normalize();
        assert_eq!(v.exponent, 2);
        assert!(approx(v.mantissa, 3.0));
    }

    #[test]
    fn add_same_exponent_carries() {
        let sum = Sci::new(9.5, 3) + Sci::new(8.0, 3);
        assert_eq!(sum.exponent, 4);
        assert!(approx(sum.mantissa, 1.75));
    }

    #[test]
    fn add_zero_returns_other_unchanged() {
        let v = Sci::new(3.0, 7);
        assert_eq!(Sci::ZERO + v, v);
        assert_eq!(v + Sci::ZERO, v);
    }

    #[test]
    fn add_beyond_f64_range() {
        let huge = Sci::new(5.0, 400);
        let sum = huge + huge;
        assert_eq!(sum.exponent, 401);
        assert!(approx(sum.mantissa, 1.0));
    }

    #[test]
    fn add_tiny_to_huge_is_absorbed() {
        let huge = Sci::new(1.0, 100);
        assert_eq!(huge + Sci::new(1.0, 0), huge);
    }

    #[test]
    fn subtract_to_zero_and_below() {
        let a = Sci::new(2.5, 3);
        assert_eq!(a - a, Sci::ZERO);

        let diff = Sci::new(1.0, 3) - Sci::new(2.0, 3);
        assert_eq!(diff.exponent, 3);
        assert!(approx(diff.mantissa, -1.0));
    }

    #[test]
    fn subtract_mixed_exponents() {
        let diff = Sci::new(1.0, 4) - Sci::new(2.5, 3);
        assert_eq!(diff.exponent, 3);
        assert!(approx(diff.mantissa, 7.5));
    }

    #[test]
    fn compare_exponent_dominates() {
        assert_eq!(Sci::new(1.0, 5).compare(&Sci::new(9.9, 4)), Ordering::Greater);
        assert_eq!(Sci::new(2.0, 5).compare(&Sci::new(3.0, 5)), Ordering::Less);
        assert_eq!(Sci::new(2.0, 5).compare(&Sci::new(2.0, 5)), Ordering::Equal);
        // Larger exponent wins even against a positive mantissa.
        assert_eq!(Sci::new(-1.0, 5).compare(&Sci::new(1.0, 4)), Ordering::Greater);
    }

    #[test]
    fn partial_ord_follows_compare() {
        assert!(Sci::from(1e9) >= Sci::from(1e9));
        assert!(Sci::from(2e9) > Sci::from(1e9));
        assert!(Sci::from(5.0) < Sci::from(50.0));
    }

    #[test]
    fn scale_by_elapsed_seconds() {
        let rate = Sci::new(2.0, 3);
        let gain = rate.scale(0.1);
        assert_eq!(gain.exponent, 2);
        assert!(approx(gain.mantissa, 2.0));
        assert_eq!(rate.scale(0.0), Sci::ZERO);
    }

    #[test]
    fn to_f64_roundtrip() {
        assert!(approx(Sci::new(1.5, 3).to_f64(), 1500.0));
        assert!(Sci::new(1.0, 400).to_f64().is_infinite());
    }

    #[test]
    fn serde_uses_plain_two_field_record() {
        let json = serde_json::to_string(&Sci::new(1.5, 3)).unwrap();
        assert_eq!(json, r#"{"mantissa":1.5,"exponent":3}"#);
        let legacy: Sci = serde_json::from_str(r#"{"mantisse":2.0,"exposant":9}"#).unwrap();
        assert_eq!(legacy, Sci::new(2.0, 9));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_normalized() -> impl Strategy<Value = Sci> {
        prop_oneof![
            Just(Sci::ZERO),
            (1.0f64..10.0, any::<bool>(), -500i64..500).prop_map(|(m, neg, e)| {
                Sci::new(if neg { -m } else { m }, e)
            }),
        ]
    }

    proptest! {
        #[test]
        fn prop_normalize_idempotent(m in -1e12f64..1e12, e in -300i64..300) {
            let once = Sci::new(m, e).normalize();
            prop_assert_eq!(once.normalize(), once);
        }

        #[test]
        fn prop_normalize_invariant(m in -1e12f64..1e12, e in -300i64..300) {
            let v = Sci::new(m, e).normalize();
            if v.is_zero() {
                prop_assert_eq!(v.exponent, 0);
            } else {
                prop_assert!(v.mantissa.abs() >= 1.0 && v.mantissa.abs() < 10.0, "got {:?}", v);
            }
        }

        #[test]
        fn prop_add_commutative(a in arb_normalized(), b in arb_normalized()) {
            prop_assert_eq!(a + b, b + a);
        }

        #[test]
        fn prop_roundtrip_within_double_precision(x in -1e15f64..1e15) {
            let back = Sci::from_f64(x).normalize().to_f64();
            if x == 0.0 {
                prop_assert_eq!(back, 0.0);
            } else {
                prop_assert!(((back - x) / x).abs() < 1e-9, "{} -> {}", x, back);
            }
        }

        #[test]
        fn prop_compare_antisymmetric(a in arb_normalized(), b in arb_normalized()) {
            prop_assert_eq!(a.compare(&b), b.compare(&a).reverse());
            prop_assert_eq!(a.compare(&a), Ordering::Equal);
        }
    }
}

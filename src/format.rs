//! Compact display of scientific values: `"1.50k"`, `"250M"`, `"3.10e42"`.

use crate::sci::{pow10, Sci};

/// Suffix per tier of three decimal orders of magnitude.
const UNITS: [&str; 10] = ["", "k", "M", "B", "T", "Qa", "Qi", "Sx", "Sp", "Oc"];

/// Format a normalized value.
///
/// Values below 1 are shown at tier 0 with two decimals. Past the last named
/// tier (`1e30` and up) the mantissa is printed as `m.mm` followed by `e<exp>`.
pub fn format_sci(v: Sci) -> String {
    if v.is_zero() {
        return "0".to_string();
    }
    let tier = v.exponent.div_euclid(3).max(0);
    match UNITS.get(tier as usize) {
        Some(unit) => {
            let scaled = v.mantissa * pow10(v.exponent - tier * 3);
            let digits = if scaled < 10.0 {
                2
            } else if scaled < 100.0 {
                1
            } else {
                0
            };
            format!("{}{}", to_fixed(scaled, digits), unit)
        }
        None => format!("{}e{}", to_fixed(v.mantissa, 2), v.exponent),
    }
}

/// Fixed-point rendering that rounds exact ties away from zero.
///
/// `format!("{:.2}", 1.125)` gives `"1.12"` (ties to even); display parity
/// needs `"1.13"`. A value can only be an exact tie at `digits` decimals if it
/// is a multiple of `2^-(digits + 1)`, and for those the scaling below is exact.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let magnitude = value.abs();
    let factor = pow10(digits as i64);
    let halves = 2f64.powi(digits as i32 + 1);
    let scaled = magnitude * factor;
    if (magnitude * halves).fract() == 0.0 && scaled.fract() == 0.5 {
        let rounded = (scaled + 0.5) / factor;
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}{:.*}", sign, digits, rounded);
    }
    format!("{:.*}", digits, value)
}

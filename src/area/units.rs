//! Traditional land-area units and conversion constants
//!
//! Revenue records measure land in kanal, marle and sarsai. Every conversion
//! passes through sarsai, the smallest unit, before reaching acres.

use std::fmt;
use std::ops::{Add, Mul};

use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// Conversion Constants
// ============================================================================

/// Sarsai per marle
pub const SARSAI_PER_MARLE: f64 = 9.0;
/// Marle per kanal
pub const MARLE_PER_KANAL: f64 = 20.0;
/// Sarsai per kanal (20 marle x 9 sarsai)
pub const SARSAI_PER_KANAL: f64 = MARLE_PER_KANAL * SARSAI_PER_MARLE;
/// Kanal per acre
pub const KANAL_PER_ACRE: f64 = 8.0;
/// Marle per acre
pub const MARLE_PER_ACRE: f64 = KANAL_PER_ACRE * MARLE_PER_KANAL;
/// Sarsai per acre
pub const SARSAI_PER_ACRE: f64 = KANAL_PER_ACRE * SARSAI_PER_KANAL;

/// One of the three traditional units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraditionalUnit {
    Kanal,
    Marle,
    Sarsai,
}

impl TraditionalUnit {
    /// All units, largest first
    pub const ALL: [TraditionalUnit; 3] = [
        TraditionalUnit::Kanal,
        TraditionalUnit::Marle,
        TraditionalUnit::Sarsai,
    ];

    /// How many sarsai make up one of this unit
    pub fn sarsai_per_unit(&self) -> f64 {
        match self {
            TraditionalUnit::Kanal => SARSAI_PER_KANAL,
            TraditionalUnit::Marle => SARSAI_PER_MARLE,
            TraditionalUnit::Sarsai => 1.0,
        }
    }

    /// Suffix used in the compact "3K/5M/2S" display
    pub fn suffix(&self) -> &'static str {
        match self {
            TraditionalUnit::Kanal => "K",
            TraditionalUnit::Marle => "M",
            TraditionalUnit::Sarsai => "S",
        }
    }
}

// ============================================================================
// Permissive Component Parsing
// ============================================================================

/// A value that can stand in for one area component.
///
/// Anything that does not read as a finite number contributes zero. Records
/// coming from the backend are frequently incomplete, so this never fails.
pub trait AreaComponent {
    fn to_component(&self) -> f64;
}

impl AreaComponent for f64 {
    fn to_component(&self) -> f64 {
        finite_or_zero(*self)
    }
}

impl AreaComponent for f32 {
    fn to_component(&self) -> f64 {
        finite_or_zero(f64::from(*self))
    }
}

impl AreaComponent for i32 {
    fn to_component(&self) -> f64 {
        f64::from(*self)
    }
}

impl AreaComponent for i64 {
    fn to_component(&self) -> f64 {
        *self as f64
    }
}

impl AreaComponent for u32 {
    fn to_component(&self) -> f64 {
        f64::from(*self)
    }
}

impl AreaComponent for u64 {
    fn to_component(&self) -> f64 {
        *self as f64
    }
}

impl AreaComponent for str {
    fn to_component(&self) -> f64 {
        parse_leading_float(self)
    }
}

impl AreaComponent for String {
    fn to_component(&self) -> f64 {
        parse_leading_float(self)
    }
}

impl AreaComponent for Value {
    fn to_component(&self) -> f64 {
        parse_component(self)
    }
}

impl<T: AreaComponent> AreaComponent for Option<T> {
    fn to_component(&self) -> f64 {
        self.as_ref().map_or(0.0, AreaComponent::to_component)
    }
}

impl<T: AreaComponent + ?Sized> AreaComponent for &T {
    fn to_component(&self) -> f64 {
        (**self).to_component()
    }
}

/// Read a raw JSON field as an area component.
///
/// Numbers are taken as-is, strings are parsed leniently, and everything
/// else (null, booleans, arrays, objects) is zero.
pub fn parse_component(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().map_or(0.0, finite_or_zero),
        Value::String(s) => parse_leading_float(s),
        _ => 0.0,
    }
}

/// Parse the longest numeric prefix of a string ("12.5abc" -> 12.5).
///
/// Leading whitespace is skipped. Text with no numeric prefix is zero.
pub fn parse_leading_float(s: &str) -> f64 {
    let trimmed = s.trim_start();
    let bytes = trimmed.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            end = frac_end;
        }
    }

    if digits == 0 {
        if !trimmed.is_empty() {
            tracing::debug!("Area component '{}' is not numeric, treating as 0", s);
        }
        return 0.0;
    }

    // Exponent only counts when it carries at least one digit
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    trimmed[..end].parse::<f64>().map_or(0.0, finite_or_zero)
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

// ============================================================================
// Area Types
// ============================================================================

/// A kanal/marle/sarsai measurement.
///
/// Components are not kept in canonical ranges: summed records routinely carry
/// 30 marle or 14 sarsai, and that is what gets displayed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TraditionalArea {
    pub kanal: f64,
    pub marle: f64,
    pub sarsai: f64,
}

impl TraditionalArea {
    pub fn new(kanal: f64, marle: f64, sarsai: f64) -> Self {
        Self {
            kanal,
            marle,
            sarsai,
        }
    }

    /// Zero area
    pub fn zero() -> Self {
        Self::default()
    }

    /// Build an area from loosely-typed components
    pub fn from_components<K, M, S>(kanal: K, marle: M, sarsai: S) -> Self
    where
        K: AreaComponent,
        M: AreaComponent,
        S: AreaComponent,
    {
        Self {
            kanal: kanal.to_component(),
            marle: marle.to_component(),
            sarsai: sarsai.to_component(),
        }
    }

    /// The component for a single unit
    pub fn component(&self, unit: TraditionalUnit) -> f64 {
        match unit {
            TraditionalUnit::Kanal => self.kanal,
            TraditionalUnit::Marle => self.marle,
            TraditionalUnit::Sarsai => self.sarsai,
        }
    }

    /// Total area expressed in sarsai
    pub fn total_sarsai(&self) -> f64 {
        TraditionalUnit::ALL
            .iter()
            .map(|unit| self.component(*unit) * unit.sarsai_per_unit())
            .sum()
    }

    /// Total area expressed in acres
    pub fn to_acres(&self) -> f64 {
        self.total_sarsai() / SARSAI_PER_ACRE
    }

    /// Scale every component by a factor
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            kanal: self.kanal * factor,
            marle: self.marle * factor,
            sarsai: self.sarsai * factor,
        }
    }
}

impl Add for TraditionalArea {
    type Output = TraditionalArea;

    fn add(self, other: TraditionalArea) -> TraditionalArea {
        TraditionalArea {
            kanal: self.kanal + other.kanal,
            marle: self.marle + other.marle,
            sarsai: self.sarsai + other.sarsai,
        }
    }
}

impl Mul<f64> for TraditionalArea {
    type Output = TraditionalArea;

    fn mul(self, factor: f64) -> TraditionalArea {
        self.scale(factor)
    }
}

impl std::iter::Sum for TraditionalArea {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(TraditionalArea::zero(), |acc, area| acc + area)
    }
}

impl fmt::Display for TraditionalArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in TraditionalUnit::ALL {
            if unit != TraditionalUnit::Kanal {
                f.write_str("/")?;
            }
            // -0 would otherwise print as "-0"
            write!(f, "{}{}", self.component(unit) + 0.0, unit.suffix())?;
        }
        Ok(())
    }
}

/// An area split into canonical ranges: marle < 20 and sarsai < 9
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedArea {
    pub kanal: u64,
    pub marle: u32,
    pub sarsai: u32,
}

impl NormalizedArea {
    /// Whole sarsai represented by this split
    pub fn total_sarsai(&self) -> u64 {
        self.kanal * SARSAI_PER_KANAL as u64
            + u64::from(self.marle) * SARSAI_PER_MARLE as u64
            + u64::from(self.sarsai)
    }
}

impl fmt::Display for NormalizedArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}K/{}M/{}S", self.kanal, self.marle, self.sarsai)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_constants() {
        assert_eq!(SARSAI_PER_KANAL, 180.0);
        assert_eq!(MARLE_PER_ACRE, 160.0);
        assert_eq!(SARSAI_PER_ACRE, 1440.0);
    }

    #[test]
    fn test_parse_component_numbers_and_text() {
        assert_eq!(parse_component(&json!(4)), 4.0);
        assert_eq!(parse_component(&json!(2.5)), 2.5);
        assert_eq!(parse_component(&json!("7")), 7.0);
        assert_eq!(parse_component(&json!("  3.25")), 3.25);
    }

    #[test]
    fn test_parse_component_garbage_is_zero() {
        assert_eq!(parse_component(&json!(null)), 0.0);
        assert_eq!(parse_component(&json!("abc")), 0.0);
        assert_eq!(parse_component(&json!("")), 0.0);
        assert_eq!(parse_component(&json!(true)), 0.0);
        assert_eq!(parse_component(&json!([1, 2])), 0.0);
        assert_eq!(parse_component(&json!({"k": 1})), 0.0);
    }

    #[test]
    fn test_parse_leading_float_prefix() {
        assert_eq!(parse_leading_float("12.5abc"), 12.5);
        assert_eq!(parse_leading_float("5K"), 5.0);
        assert_eq!(parse_leading_float(".5"), 0.5);
        assert_eq!(parse_leading_float("-2"), -2.0);
        assert_eq!(parse_leading_float("1e2"), 100.0);
        assert_eq!(parse_leading_float("3e"), 3.0);
        assert_eq!(parse_leading_float("."), 0.0);
        assert_eq!(parse_leading_float("-"), 0.0);
        assert_eq!(parse_leading_float("Infinity"), 0.0);
        assert_eq!(parse_leading_float("1e999"), 0.0);
    }

    #[test]
    fn test_option_and_reference_components() {
        assert_eq!(None::<f64>.to_component(), 0.0);
        assert_eq!(Some("9").to_component(), 9.0);
        assert_eq!((&&3.0_f64).to_component(), 3.0);
        assert_eq!(f64::NAN.to_component(), 0.0);
    }

    #[test]
    fn test_total_sarsai() {
        let area = TraditionalArea::new(1.0, 1.0, 1.0);
        assert_eq!(area.total_sarsai(), 190.0);
        assert_eq!(TraditionalArea::zero().total_sarsai(), 0.0);
    }

    #[test]
    fn test_area_sum() {
        let total: TraditionalArea = vec![
            TraditionalArea::new(1.0, 15.0, 4.0),
            TraditionalArea::new(2.0, 10.0, 6.0),
        ]
        .into_iter()
        .sum();
        assert_eq!(total, TraditionalArea::new(3.0, 25.0, 10.0));
    }

    #[test]
    fn test_display_keeps_raw_components() {
        assert_eq!(TraditionalArea::new(3.0, 5.0, 2.0).to_string(), "3K/5M/2S");
        assert_eq!(TraditionalArea::new(1.5, 25.0, 0.0).to_string(), "1.5K/25M/0S");
        assert_eq!(TraditionalArea::new(-0.0, 0.0, 0.0).to_string(), "0K/0M/0S");
    }

    #[test]
    fn test_normalized_total_sarsai() {
        let split = NormalizedArea {
            kanal: 2,
            marle: 19,
            sarsai: 8,
        };
        assert_eq!(split.total_sarsai(), 2 * 180 + 19 * 9 + 8);
        assert_eq!(split.to_string(), "2K/19M/8S");
    }
}

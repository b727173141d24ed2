//! Total conversions from loosely typed cells to typed values.
//!
//! None of these functions fail: anything that is missing or does not read
//! as a finite number becomes the supplied default.

use crate::domain::model::RawValue;

fn parse_number(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(int) = text.parse::<i64>() {
        return Some(int as f64);
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Integer coercion; fractional values are truncated toward zero.
pub fn coerce_to_int(value: Option<&RawValue>, default: i64) -> i64 {
    match value {
        Some(RawValue::Integer(int)) => *int,
        Some(RawValue::Decimal(dec)) if dec.is_finite() => dec.trunc() as i64,
        Some(RawValue::Text(text)) => {
            let text = text.trim();
            // Exact path first so large integers keep their precision.
            match text.parse::<i64>() {
                Ok(int) => int,
                Err(_) => parse_number(text)
                    .map(|dec| dec.trunc() as i64)
                    .unwrap_or(default),
            }
        }
        _ => default,
    }
}

pub fn coerce_to_decimal(value: Option<&RawValue>, default: f64) -> f64 {
    match value {
        Some(RawValue::Integer(int)) => *int as f64,
        Some(RawValue::Decimal(dec)) if dec.is_finite() => *dec,
        Some(RawValue::Text(text)) => parse_number(text).unwrap_or(default),
        _ => default,
    }
}

/// Text form of a cell; missing becomes the empty string.
pub fn coerce_to_text(value: Option<&RawValue>) -> String {
    match value {
        None => String::new(),
        Some(RawValue::Text(text)) => text.clone(),
        Some(RawValue::Integer(int)) => int.to_string(),
        Some(RawValue::Decimal(dec)) => dec.to_string(),
        Some(RawValue::Flag(flag)) => flag.to_string(),
    }
}

//! Shared conversion helpers for row models.

use std::str::FromStr;

use log::error;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

/// Parses a stored TEXT amount back into a Decimal.
///
/// Tolerant on purpose: a malformed stored value falls back through f64 and
/// finally to zero with an error log, instead of poisoning every read of the
/// table. Writes always store `Decimal::to_string()`, so this path only
/// triggers on hand-edited or legacy data.
pub(crate) fn parse_decimal_tolerant(value: &str, field: &str) -> Decimal {
    match Decimal::from_str(value) {
        Ok(d) => d,
        Err(decimal_err) => match value.parse::<f64>() {
            Ok(f) => match Decimal::from_f64(f) {
                Some(d) => d,
                None => {
                    error!(
                        "Failed to convert {} '{}' (parsed as f64: {}) to Decimal, using 0",
                        field, value, f
                    );
                    Decimal::ZERO
                }
            },
            Err(float_err) => {
                error!(
                    "Failed to parse {} '{}' as Decimal ({}) or f64 ({}), using 0",
                    field, value, decimal_err, float_err
                );
                Decimal::ZERO
            }
        },
    }
}

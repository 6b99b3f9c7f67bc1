//! Rupiah amount parsing and formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! All amounts are `rust_decimal::Decimal`; these helpers only convert at the
//! edges (free-form form input, printed documents).

use rust_decimal::Decimal;

/// Decimal places kept by stored money columns.
pub const AMOUNT_SCALE: u32 = 2;

/// Whether an amount is stored without rounding.
///
/// Trailing zeros do not count, so `1250.500` fits and `1250.505` does not.
#[must_use]
pub fn fits_amount_scale(amount: Decimal) -> bool {
    amount.normalize().scale() <= AMOUNT_SCALE
}

/// Parses a free-form amount the way budget forms enter it.
///
/// Accepts an optional `Rp` prefix, a leading minus sign, and either `.` or `,`
/// as thousands separator. A final separator followed by one or two digits is
/// read as the decimal separator, so `"6,000,000"`, `"6.000.000"` and
/// `"Rp 6.000.000,00"` all parse to six million.
///
/// Returns `None` for blank or malformed input.
#[must_use]
pub fn try_parse_amount(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_prefix("Rp.")
        .or_else(|| trimmed.strip_prefix("Rp"))
        .or_else(|| trimmed.strip_prefix("rp"))
        .unwrap_or(trimmed)
        .trim();

    let (negative, body) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, trimmed),
    };

    if body.is_empty()
        || !body
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let groups: Vec<&str> = body.split(['.', ',']).collect();
    if groups.iter().any(|g| g.is_empty()) {
        return None;
    }

    let (integer_groups, fraction) = match groups.as_slice() {
        [single] => (vec![*single], None),
        [init @ .., last] if last.len() <= 2 => (init.to_vec(), Some(*last)),
        all => (all.to_vec(), None),
    };

    if integer_groups.iter().skip(1).any(|g| g.len() != 3) {
        return None;
    }

    let mut digits = integer_groups.concat();
    if let Some(fraction) = fraction {
        digits.push('.');
        digits.push_str(fraction);
    }

    let value: Decimal = digits.parse().ok()?;
    Some(if negative { -value } else { value })
}

/// Parses a free-form amount, defaulting to zero when blank or unparsable.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    try_parse_amount(raw).unwrap_or(Decimal::ZERO)
}

/// Formats an amount with Indonesian digit grouping, e.g. `1.200.000`.
///
/// Fractions are rounded to two places and printed with a decimal comma only
/// when non-zero.
#[must_use]
pub fn format_rupiah(amount: Decimal) -> String {
    let rounded = amount.round_dp(2);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let abs = rounded.abs();

    let whole = abs.trunc();
    let fraction = (abs - whole).normalize();

    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if !fraction.is_zero() {
        let fraction = fraction.to_string();
        grouped.push(',');
        grouped.push_str(fraction.trim_start_matches("0."));
    }

    if negative {
        format!("-{grouped}")
    } else {
        grouped
    }
}

#[cfg(test)]
#[path = "money_tests.rs"]
mod tests;

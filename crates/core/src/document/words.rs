//! Indonesian number words ("terbilang") for printed amounts.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

const UNITS: [&str; 12] = [
    "", "satu", "dua", "tiga", "empat", "lima", "enam", "tujuh", "delapan", "sembilan", "sepuluh",
    "sebelas",
];

/// Scales above a thousand, largest first.
const SCALES: [(u128, &str); 4] = [
    (1_000_000_000_000_000, "kuadriliun"),
    (1_000_000_000_000, "triliun"),
    (1_000_000_000, "miliar"),
    (1_000_000, "juta"),
];

/// Spells a whole number in Indonesian, e.g. `1_250_000` → "satu juta dua ratus lima puluh ribu".
#[must_use]
pub fn spell_number(n: u128) -> String {
    if n == 0 {
        "nol".to_string()
    } else {
        words(n)
    }
}

/// Spells an amount in Indonesian words.
///
/// The fraction is truncated; negative amounts are prefixed with "minus".
#[must_use]
pub fn spell_rupiah(amount: Decimal) -> String {
    let whole = amount.trunc();
    let spelled = spell_number(whole.abs().to_u128().unwrap_or_default());
    if whole.is_sign_negative() && !whole.is_zero() {
        format!("minus {spelled}")
    } else {
        spelled
    }
}

/// Words for a non-zero number; empty for zero.
fn words(n: u128) -> String {
    for (scale, name) in SCALES {
        if n >= scale {
            return join(format!("{} {name}", words(n / scale)), words(n % scale));
        }
    }

    match n {
        0 => String::new(),
        // The match guard bounds `n` below 12.
        #[allow(clippy::cast_possible_truncation)]
        1..=11 => UNITS[n as usize].to_string(),
        12..=19 => format!("{} belas", words(n - 10)),
        20..=99 => join(format!("{} puluh", words(n / 10)), words(n % 10)),
        100..=199 => join("seratus".to_string(), words(n - 100)),
        200..=999 => join(format!("{} ratus", words(n / 100)), words(n % 100)),
        1_000..=1_999 => join("seribu".to_string(), words(n - 1_000)),
        _ => join(format!("{} ribu", words(n / 1_000)), words(n % 1_000)),
    }
}

fn join(head: String, tail: String) -> String {
    if tail.is_empty() {
        head
    } else {
        format!("{head} {tail}")
    }
}

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::DisplayConfig;

/// Marker shown for fields that have no value (the total row's amount, price and exchange).
pub const NO_VALUE: &str = "<NA>";

fn group_int_digits(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    let len = int_part.len();
    for (i, ch) in int_part.chars().enumerate() {
        out.push(ch);
        let remaining = len.saturating_sub(i + 1);
        if remaining > 0 && remaining % 3 == 0 {
            out.push(',');
        }
    }
    out
}

fn pad_fraction(s: &str, dp: u32) -> String {
    let (int_part, frac_part) = s.split_once('.').unwrap_or((s, ""));
    if dp == 0 {
        return int_part.to_string();
    }

    let mut frac: String = frac_part.chars().take(dp as usize).collect();
    while frac.len() < dp as usize {
        frac.push('0');
    }
    format!("{int_part}.{frac}")
}

/// Render a quote-currency number for the report table.
///
/// Rounds half away from zero to `display.currency_decimals` places, pads to
/// exactly that many places, and inserts thousands separators when
/// `display.currency_grouping` is set.
pub fn format_decimal(value: Decimal, display: &DisplayConfig) -> String {
    let rounded = match display.currency_decimals {
        Some(dp) => value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero),
        None => value,
    };

    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let mut s = rounded.abs().normalize().to_string();
    if let Some(dp) = display.currency_decimals {
        s = pad_fraction(&s, dp);
    }
    if display.currency_grouping {
        s = match s.split_once('.') {
            Some((int_part, frac)) => format!("{}.{frac}", group_int_digits(int_part)),
            None => group_int_digits(&s),
        };
    }

    if negative {
        format!("-{s}")
    } else {
        s
    }
}

pub fn format_optional(value: Option<Decimal>, display: &DisplayConfig) -> String {
    value
        .map(|v| format_decimal(v, display))
        .unwrap_or_else(|| NO_VALUE.to_string())
}

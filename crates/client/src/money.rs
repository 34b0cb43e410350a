//! Display helpers for amounts.
use api_types::Currency;
use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

/// Formats a plain amount with `,` thousands separators and at most two decimals, dropping
/// trailing zeros (`1234567.5` → `1,234,567.5`).
#[must_use]
pub fn format_number(amount: Decimal) -> String {
    let rounded = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize();
    group_thousands(&rounded.abs().to_string(), rounded.is_sign_negative() && !rounded.is_zero())
}

/// Formats an amount using the minor units of `currency` (`1500000 VND` → `1,500,000`,
/// `12.5 USD` → `12.50`).
#[must_use]
pub fn format_amount(amount: Decimal, currency: Currency) -> String {
    let dp = currency.minor_units();
    let mut rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(dp);
    group_thousands(&rounded.abs().to_string(), rounded.is_sign_negative() && !rounded.is_zero())
}

/// Share of `target` covered by `saved`, as a whole percentage capped at 100.
///
/// A non-positive target yields 0 rather than dividing by zero.
#[must_use]
pub fn progress_percent(saved: Decimal, target: Decimal) -> u8 {
    if target <= Decimal::ZERO || saved <= Decimal::ZERO {
        return 0;
    }
    // Out-of-range quotients can only mean saved dwarfs target.
    let Some(ratio) = saved
        .checked_div(target)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
    else {
        return 100;
    };
    let ratio = ratio.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    if ratio >= Decimal::ONE_HUNDRED {
        100
    } else {
        ratio.to_u8().unwrap_or(0)
    }
}

fn group_thousands(digits: &str, negative: bool) -> String {
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(frac) if !frac.is_empty() => format!("{sign}{grouped}.{frac}"),
        _ => format!("{sign}{grouped}"),
    }
}

//! Currency and duration strings as they appear on service menus.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

pub const CURRENCY_SYMBOL: &str = "₹";
pub const ADVANCE_RATE: Decimal = dec!(0.10);

/// Numeric value of a display price such as `"₹1,499"`.
///
/// Everything except digits and `.` is dropped before parsing. Anything that
/// still fails to parse counts as zero.
pub fn parse_price(price: &str) -> Decimal {
    let cleaned: String = price
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let cleaned = cleaned.trim_matches('.');

    Decimal::from_str(cleaned).unwrap_or(Decimal::ZERO)
}

/// Display form of an amount: currency symbol, thousands separators, and
/// at most two fractional digits with trailing zeros dropped.
pub fn format_price(amount: Decimal) -> String {
    let amount = amount.round_dp(2).normalize();
    let sign = if amount.is_sign_negative() && !amount.is_zero() {
        "-"
    } else {
        ""
    };

    let digits = amount.abs().to_string();
    let (whole, fraction) = match digits.split_once('.') {
        Some((w, f)) => (w.to_string(), Some(f.to_string())),
        None => (digits, None),
    };

    let mut out = format!("{sign}{CURRENCY_SYMBOL}{}", group_thousands(&whole));
    if let Some(fraction) = fraction {
        out.push('.');
        out.push_str(&fraction);
    }
    out
}

fn group_thousands(whole: &str) -> String {
    let len = whole.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Leading integer of a duration such as `"45 min"`; zero when there is none.
pub fn parse_duration_minutes(duration: &str) -> u32 {
    let digits: String = duration
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    digits.parse().unwrap_or(0)
}

pub fn format_duration(minutes: u32) -> String {
    format!("{minutes} min")
}

/// Sum of several display prices. `None` when the total does not fit a
/// `Decimal`.
pub fn sum_prices<'a>(prices: impl IntoIterator<Item = &'a str>) -> Option<Decimal> {
    prices
        .into_iter()
        .try_fold(Decimal::ZERO, |total, price| total.checked_add(parse_price(price)))
}

/// Ten percent of the total, rounded to a whole currency unit.
pub fn advance_amount(total: Decimal) -> Option<Decimal> {
    total
        .checked_mul(ADVANCE_RATE)
        .map(|a| a.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
}

/// Amount in the currency's minor unit (paise for INR). `None` when it does
/// not fit an `i64`.
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    amount.checked_mul(dec!(100))?.trunc().to_i64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("₹300"), dec!(300));
        assert_eq!(parse_price("₹1,499"), dec!(1499));
        assert_eq!(parse_price("₹2,499.50"), dec!(2499.50));
        assert_eq!(parse_price("Rs. 450"), dec!(450));
    }

    #[test]
    fn test_parse_price_garbage_is_zero() {
        assert_eq!(parse_price(""), Decimal::ZERO);
        assert_eq!(parse_price("free"), Decimal::ZERO);
        assert_eq!(parse_price("1.2.3"), Decimal::ZERO);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(dec!(0)), "₹0");
        assert_eq!(format_price(dec!(300)), "₹300");
        assert_eq!(format_price(dec!(1100)), "₹1,100");
        assert_eq!(format_price(dec!(1234567)), "₹1,234,567");
        assert_eq!(format_price(dec!(1499.50)), "₹1,499.5");
        assert_eq!(format_price(dec!(99.999)), "₹100");
    }

    #[test]
    fn test_price_round_trip_is_stable() {
        for price in ["₹300", "₹1200", "₹1,499", "₹2,499.75", "₹0", "₹12,34,567", "INR 15.5"] {
            let parsed = parse_price(price);
            assert_eq!(parse_price(&format_price(parsed)), parsed, "unstable for {price}");
        }
    }

    #[test]
    fn test_parse_duration_minutes() {
        assert_eq!(parse_duration_minutes("30 min"), 30);
        assert_eq!(parse_duration_minutes(" 120 min"), 120);
        assert_eq!(parse_duration_minutes("90min"), 90);
        assert_eq!(parse_duration_minutes("about an hour"), 0);
    }

    #[test]
    fn test_advance_amount() {
        assert_eq!(advance_amount(dec!(1200)), Some(dec!(120)));
        assert_eq!(advance_amount(dec!(1100)), Some(dec!(110)));
        assert_eq!(advance_amount(dec!(1499)), Some(dec!(150)));
        assert_eq!(advance_amount(dec!(305)), Some(dec!(31)));
        assert_eq!(advance_amount(dec!(199)), Some(dec!(20)));
    }

    #[test]
    fn test_to_minor_units() {
        assert_eq!(to_minor_units(dec!(120)), Some(12000));
        assert_eq!(to_minor_units(dec!(1499.5)), Some(149950));
    }

    #[test]
    fn test_huge_amounts_do_not_overflow() {
        let max = "₹79228162514264337593543950335";
        assert_eq!(parse_price(max), Decimal::MAX);
        assert_eq!(to_minor_units(Decimal::MAX), None);
        assert_eq!(to_minor_units(dec!(100000000000000000)), None);
        assert_eq!(sum_prices([max, "₹1"]), None);
        assert_eq!(sum_prices(["₹300", "₹1,499"]), Some(dec!(1799)));
    }
}

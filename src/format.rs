//! Locale number codec.
//!
//! Brazilian-style numbers use `.` to group thousands and `,` as the
//! decimal separator (`R$ 1.234.567,89`). Parsing happens at the input
//! boundary and formatting at the report boundary; the calculator only
//! ever sees plain `f64`.

use rust_decimal::prelude::*;
use rust_decimal::RoundingStrategy;

use crate::types::AuctionError;

pub const CURRENCY_SYMBOL: &str = "R$";

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

/// Parse a locale-formatted number.
///
/// Accepts an optional `R$` prefix and leading `-`. Thousands groups after
/// the first must have exactly three digits, so `"500000.50"` is rejected
/// rather than read as fifty million.
pub fn parse_locale_number(text: &str) -> Result<f64, AuctionError> {
    let parse_err = || AuctionError::Parse(text.to_string());

    let mut s = text.trim();
    let negative = s.starts_with('-');
    if negative {
        s = s[1..].trim_start();
    }
    if let Some(rest) = s.strip_prefix(CURRENCY_SYMBOL) {
        s = rest.trim_start();
    }

    let (int_part, frac_part) = match s.split_once(',') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (s, None),
    };

    if int_part.is_empty() && frac_part.map_or(true, str::is_empty) {
        return Err(parse_err());
    }

    let groups: Vec<&str> = int_part.split('.').collect();
    if groups.len() > 1 {
        let leading_ok = !groups[0].is_empty() && groups[0].len() <= 3;
        if !leading_ok || groups[1..].iter().any(|g| g.len() != 3) {
            return Err(parse_err());
        }
    }

    let digits: String = groups.concat();
    let all_digits = |p: &str| p.chars().all(|c| c.is_ascii_digit());
    if !all_digits(digits.as_str()) || !frac_part.map_or(true, all_digits) {
        return Err(parse_err());
    }

    let normalised = match frac_part {
        Some(frac) if !frac.is_empty() => {
            let int_digits = if digits.is_empty() { "0" } else { digits.as_str() };
            format!("{int_digits}.{frac}")
        }
        _ => digits,
    };

    let value: f64 = normalised.parse().map_err(|_| parse_err())?;
    Ok(if negative { -value } else { value })
}

/// Parse a list of premiums separated by `;` or whitespace.
///
/// Order and duplicates are kept as written.
pub fn parse_premium_list(text: &str) -> Result<Vec<f64>, AuctionError> {
    text.split(|c: char| c == ';' || c.is_whitespace())
        .map(|p| p.trim().trim_end_matches('%'))
        .filter(|p| !p.is_empty())
        .map(parse_locale_number)
        .collect()
}

// ---------------------------------------------------------------------------
// Formatting
// ---------------------------------------------------------------------------

/// Format with `.` thousands and `,` decimals, rounding half away from zero.
pub fn format_locale_number(value: f64, decimals: u32) -> String {
    let Some(d) = Decimal::from_f64(value) else {
        return value.to_string();
    };

    let rounded = d.round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
    let plain = format!("{:.*}", decimals as usize, rounded.abs());

    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + plain.len() / 3 + 1);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// `R$ 1.234,56`; negatives as `-R$ 1.234,56`.
pub fn format_currency(value: f64) -> String {
    let body = format_locale_number(value, 2);
    match body.strip_prefix('-') {
        Some(abs) => format!("-{CURRENCY_SYMBOL} {abs}"),
        None => format!("{CURRENCY_SYMBOL} {body}"),
    }
}

/// `30,01%`.
pub fn format_percent(value: f64, decimals: u32) -> String {
    format!("{}%", format_locale_number(value, decimals))
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

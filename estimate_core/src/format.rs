//! Number formatting for notes and reports.
//!
//! The engine keeps full precision; these helpers only shape numbers for
//! people: thousands separators, fixed decimals, trimmed fractions.
//!
//! Halves round away from zero. Grouped and currency output rounds the
//! shortest decimal form of the value; [`format_fixed`] rounds its exact
//! binary value, so `1.005` shows as "1.01" in currency but "1.00" fixed.

/// Insert `,` every three digits of an unsigned integer string.
fn group_digits(int_part: &str) -> String {
    let mut out = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Where the decimal digits of a float come from before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Digits {
    /// Shortest decimal that reads back as the same float ("1.005")
    Shortest,
    /// The float's exact binary value in decimal ("1.00499999999999989...")
    Exact,
}

/// Enough fractional digits to spell out any f64 exactly
const EXACT_FRACTION_DIGITS: usize = 1074;

/// Round a non-negative decimal string to `decimals` places, halves away
/// from zero. Returns the integer and fraction digits.
fn round_half_up(digits: &str, decimals: usize) -> (String, String) {
    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(decimals))
        .collect();

    if frac_part.as_bytes().get(decimals).is_some_and(|&d| d >= b'5') {
        let mut i = kept.len();
        loop {
            if i == 0 {
                kept.insert(0, b'1');
                break;
            }
            i -= 1;
            if kept[i] == b'9' {
                kept[i] = b'0';
            } else {
                kept[i] += 1;
                break;
            }
        }
    }

    let split = kept.len() - decimals;
    let to_string = |bytes: &[u8]| bytes.iter().map(|&b| char::from(b)).collect::<String>();
    (to_string(&kept[..split]), to_string(&kept[split..]))
}

/// Format `value` with exactly `decimals` places, optionally grouped.
fn render(value: f64, decimals: usize, grouped: bool, trim: bool, digits: Digits) -> String {
    if !value.is_finite() {
        return "0".to_string();
    }
    let magnitude = match digits {
        Digits::Shortest => format!("{}", value.abs()),
        Digits::Exact => format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs()),
    };
    let (int_part, frac_part) = round_half_up(&magnitude, decimals);
    let frac = if trim { frac_part.trim_end_matches('0') } else { frac_part.as_str() };
    let is_zero = int_part.bytes().all(|b| b == b'0') && frac.bytes().all(|b| b == b'0');

    let mut out = String::new();
    if value.is_sign_negative() && !is_zero {
        out.push('-');
    }
    if grouped {
        out.push_str(&group_digits(&int_part));
    } else {
        out.push_str(&int_part);
    }
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Dollar amount with two decimals and thousands separators, no symbol.
///
/// ```rust
/// use estimate_core::format::format_currency;
/// assert_eq!(format_currency(5014.444), "5,014.44");
/// assert_eq!(format_currency(570.0), "570.00");
/// ```
pub fn format_currency(value: f64) -> String {
    render(value, 2, true, false, Digits::Shortest)
}

/// Grouped number with up to three decimals, trailing zeros dropped.
///
/// ```rust
/// use estimate_core::format::format_grouped;
/// assert_eq!(format_grouped(2400.0), "2,400");
/// assert_eq!(format_grouped(1234.5678), "1,234.568");
/// ```
pub fn format_grouped(value: f64) -> String {
    render(value, 3, true, true, Digits::Shortest)
}

/// Fixed decimals, no grouping.
///
/// ```rust
/// use estimate_core::format::format_fixed;
/// assert_eq!(format_fixed(29.6296, 2), "29.63");
/// assert_eq!(format_fixed(2760.0, 0), "2760");
/// ```
pub fn format_fixed(value: f64, decimals: usize) -> String {
    render(value, decimals, false, false, Digits::Exact)
}

/// Plain number with no forced decimals ("10", "7.5").
pub fn format_plain(value: f64) -> String {
    if value.is_finite() {
        format!("{}", value)
    } else {
        "0".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency() {
        assert_eq!(format_currency(0.0), "0.00");
        assert_eq!(format_currency(1234567.891), "1,234,567.89");
        assert_eq!(format_currency(999.999), "1,000.00");
        assert_eq!(format_currency(-1500.5), "-1,500.50");
        assert_eq!(format_currency(-0.001), "0.00");
    }

    #[test]
    fn test_currency_rounds_half_cents_up() {
        // 14,006 bricks at $0.75 on a commercial building
        assert_eq!(format_currency(14006.0 * 0.75 * 1.25), "13,130.63");
        assert_eq!(format_currency(13130.625), "13,130.63");
        assert_eq!(format_currency(0.125), "0.13");
        assert_eq!(format_currency(1.005), "1.01");
        assert_eq!(format_currency(9999.995), "10,000.00");
        assert_eq!(format_currency(-2.675), "-2.68");
    }

    #[test]
    fn test_grouped() {
        assert_eq!(format_grouped(0.0), "0");
        assert_eq!(format_grouped(100.0), "100");
        assert_eq!(format_grouped(1000.0), "1,000");
        assert_eq!(format_grouped(16800.0), "16,800");
        assert_eq!(format_grouped(2.5), "2.5");
        assert_eq!(format_grouped(1234.0005), "1,234.001");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(format_fixed(1.005, 0), "1");
        assert_eq!(format_fixed(12345.678, 1), "12345.7");
        assert_eq!(format_fixed(2.5, 0), "3");
        assert_eq!(format_fixed(0.5, 0), "1");
        assert_eq!(format_fixed(29.625, 2), "29.63");
        assert_eq!(format_fixed(1.005, 2), "1.00");
        assert_eq!(format_fixed(9.5, 0), "10");
    }

    #[test]
    fn test_plain() {
        assert_eq!(format_plain(10.0), "10");
        assert_eq!(format_plain(7.5), "7.5");
        assert_eq!(format_plain(f64::NAN), "0");
    }
}

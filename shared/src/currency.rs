/// Display text and canonical value produced by one keystroke.
///
/// Display strings follow the pt-BR convention (`1.234,56`).
#[derive(Debug, Clone, PartialEq)]
pub struct MaskedAmount {
    pub display: String,
    pub value: f64,
}

/// Mask raw input text: keep only the digits and read them as cents.
///
/// Never fails. Input without digits, or with so many digits that the value
/// is no longer finite, becomes zero.
pub fn encode_keystroke(raw: &str) -> MaskedAmount {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    let cents = if digits.is_empty() {
        0.0
    } else {
        digits.parse::<f64>().unwrap_or(0.0)
    };

    let value = cents / 100.0;
    let value = if value.is_finite() { value } else { 0.0 };

    MaskedAmount {
        display: format_value(Some(value)),
        value,
    }
}

/// Parse a pt-BR display string back into a number.
///
/// Thousands separators are dropped and the decimal comma becomes a point
/// before parsing the longest numeric prefix. Anything unparseable is 0.
pub fn decode_display(text: &str) -> f64 {
    let normalized: String = text
        .replace('.', "")
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-' || *c == '.')
        .collect();

    match leading_float(&normalized) {
        Some(value) if value.is_finite() => value,
        _ => 0.0,
    }
}

/// Render a value with two decimals, `,` as decimal and `.` as thousands separator.
pub fn format_value(value: Option<f64>) -> String {
    let value = value.filter(|v| v.is_finite()).unwrap_or(0.0);
    // Half-cent ties round away from zero, same as the submitted amount
    let value = round_cents(value);
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{},{}", sign, group_thousands(int_part), frac_part)
}

/// Round to whole cents, half-cent ties away from zero.
///
/// Values too large to scale are returned unchanged.
pub fn round_cents(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded.is_finite() {
        rounded
    } else {
        value
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }
    grouped
}

/// Longest prefix of `s` that reads as `[-]digits[.digits]`, parsed.
fn leading_float(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(bytes.first() == Some(&b'-'));

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digit_count = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digit_count += frac_end - frac_start;
        if digit_count > 0 {
            end = frac_end;
        }
    }

    if digit_count == 0 {
        return None;
    }
    s[..end].parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_reads_digits_as_cents() {
        let masked = encode_keystroke("1234");
        assert_eq!(masked.display, "12,34");
        assert_eq!(masked.value, 12.34);
    }

    #[test]
    fn test_encode_ignores_non_digits() {
        // Same digits as "123456", with the mask's own separators mixed in
        let masked = encode_keystroke("R$ 1.234,56");
        assert_eq!(masked.value, 1234.56);
        assert_eq!(masked.display, "1.234,56");

        let masked = encode_keystroke("a1b2c3");
        assert_eq!(masked.value, 1.23);
    }

    #[test]
    fn test_encode_empty_and_garbage_input() {
        for raw in ["", "abc", "-", ",.", "   "] {
            let masked = encode_keystroke(raw);
            assert_eq!(masked.display, "0,00", "input {:?}", raw);
            assert_eq!(masked.value, 0.0, "input {:?}", raw);
        }
    }

    #[test]
    fn test_encode_leading_zeros() {
        let masked = encode_keystroke("007");
        assert_eq!(masked.value, 0.07);
        assert_eq!(masked.display, "0,07");
    }

    #[test]
    fn test_encode_never_negative() {
        let masked = encode_keystroke("-500");
        assert_eq!(masked.value, 5.0);
        assert_eq!(masked.display, "5,00");
    }

    #[test]
    fn test_encode_huge_input_degrades_to_zero() {
        let raw = "9".repeat(400);
        let masked = encode_keystroke(&raw);
        assert_eq!(masked.value, 0.0);
        assert_eq!(masked.display, "0,00");
    }

    #[test]
    fn test_encode_typing_sequence() {
        // Each keystroke re-masks the whole field content
        let mut display = String::new();
        for key in ["1", "2", "3", "4", "5", "6", "7"] {
            display.push_str(key);
            display = encode_keystroke(&display).display;
        }
        assert_eq!(display, "12.345,67");
        assert_eq!(decode_display(&display), 12345.67);
    }

    #[test]
    fn test_decode_display() {
        assert_eq!(decode_display("12,34"), 12.34);
        assert_eq!(decode_display("1.500,50"), 1500.5);
        assert_eq!(decode_display("1.234.567,89"), 1234567.89);
        assert_eq!(decode_display("R$ 7,00"), 7.0);
        assert_eq!(decode_display("-3,50"), -3.5);
        assert_eq!(decode_display("42"), 42.0);
    }

    #[test]
    fn test_decode_malformed_is_zero() {
        for text in ["", "...", "-", ".,.", "abc", ",", "--"] {
            assert_eq!(decode_display(text), 0.0, "input {:?}", text);
        }
    }

    #[test]
    fn test_decode_takes_numeric_prefix() {
        assert_eq!(decode_display("1,2,3"), 1.2);
        assert_eq!(decode_display("5-3"), 5.0);
        assert_eq!(decode_display(",5"), 0.5);
    }

    #[test]
    fn test_format_value() {
        assert_eq!(format_value(Some(1500.5)), "1.500,50");
        assert_eq!(format_value(Some(0.0)), "0,00");
        assert_eq!(format_value(Some(12.3)), "12,30");
        assert_eq!(format_value(Some(999.99)), "999,99");
        assert_eq!(format_value(Some(1000.0)), "1.000,00");
        assert_eq!(format_value(Some(1234567.891)), "1.234.567,89");
        assert_eq!(format_value(Some(-1234.5)), "-1.234,50");
    }

    #[test]
    fn test_format_missing_or_non_finite() {
        assert_eq!(format_value(None), "0,00");
        assert_eq!(format_value(Some(f64::NAN)), "0,00");
        assert_eq!(format_value(Some(f64::INFINITY)), "0,00");
    }

    #[test]
    fn test_decode_recovers_formatted_value() {
        for x in [0.0, 0.01, 0.5, 12.34, 999.99, 1000.0, 1500.5, 98765.43, 1234567.0, 0.125, 10.125, 2.675] {
            let decoded = decode_display(&format_value(Some(x)));
            assert_eq!(round_cents(decoded), round_cents(x), "value {}", x);
        }
    }

    #[test]
    fn test_format_rounds_half_cents_away_from_zero() {
        assert_eq!(format_value(Some(0.125)), "0,13");
        assert_eq!(format_value(Some(10.125)), "10,13");
        assert_eq!(format_value(Some(-0.125)), "-0,13");
        assert_eq!(format_value(Some(0.004)), "0,00");
        assert!(format_value(Some(f64::MAX)).ends_with(",00"));
    }

    #[test]
    fn test_round_cents() {
        assert_eq!(round_cents(12.345_1), 12.35);
        assert_eq!(round_cents(0.1 + 0.2), 0.3);
        assert_eq!(round_cents(0.125), 0.13);
        assert_eq!(round_cents(f64::MAX), f64::MAX);
    }
}

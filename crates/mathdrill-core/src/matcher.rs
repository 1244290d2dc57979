//! Answer equivalence checking.
//!
//! Rules are applied in a fixed order: numeric comparison first, then
//! multiple-choice letters, then a case-insensitive text comparison.
//! Changing the order changes which answers count as multiple choice.

/// Absolute tolerance applied when either side is written as a decimal or fraction.
pub const DECIMAL_TOLERANCE: f64 = 0.01;

// Slack for binary representation error at the tolerance boundary.
const FLOAT_SLACK: f64 = 1e-9;

/// Returns `true` if `given` should be accepted for `expected`.
pub fn matches(expected: &str, given: &str) -> bool {
    let expected = expected.trim();
    let given = given.trim();
    if given.is_empty() {
        return false;
    }

    if let (Some(e), Some(g)) = (parse_number(expected), parse_number(given)) {
        if e.approximate || g.approximate {
            return (e.value - g.value).abs() <= DECIMAL_TOLERANCE + FLOAT_SLACK;
        }
        return e.value == g.value;
    }

    if is_choice_letter(expected) {
        return expected == given;
    }

    expected.to_lowercase() == given.to_lowercase()
}

#[derive(Debug, Clone, Copy)]
struct Number {
    value: f64,
    /// Written as a decimal, in exponent form, or as a fraction.
    approximate: bool,
}

fn parse_number(s: &str) -> Option<Number> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = parse_plain(num.trim())?;
        let den: f64 = parse_plain(den.trim())?;
        if den == 0.0 {
            return None;
        }
        return Some(Number {
            value: num / den,
            approximate: true,
        });
    }
    let value = parse_plain(s)?;
    Some(Number {
        value,
        approximate: looks_decimal(s),
    })
}

fn parse_plain(s: &str) -> Option<f64> {
    // Reject words like "inf" and "nan" that f64 parsing would otherwise accept.
    if !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn looks_decimal(s: &str) -> bool {
    s.contains(['.', 'e', 'E'])
}

fn is_choice_letter(s: &str) -> bool {
    matches!(s.as_bytes(), [b'A'..=b'E'])
}

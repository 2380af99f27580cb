//! Parsing of user-entered coordinate strings.

/// Separator between degrees, minutes, and seconds in DMS input
const DMS_SEPARATOR: char = ';';

/// Parse a single coordinate component entered by a user.
///
/// Accepts plain decimal degrees (`-26.106`) or degree;minute;second
/// notation (`26;6;22.889`). Blank or unparsable input yields `None`;
/// malformed input is never an error, the caller treats `None` as
/// "not provided".
pub fn parse_coordinate(input: &str) -> Option<f64> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.contains(DMS_SEPARATOR) {
        if let Some(value) = parse_dms(input) {
            return Some(value);
        }
    }

    parse_finite(input)
}

/// DMS input must split into exactly three numeric parts.
fn parse_dms(input: &str) -> Option<f64> {
    let mut parts = [0.0f64; 3];
    let mut count = 0;
    for piece in input.split(DMS_SEPARATOR) {
        if count == 3 {
            return None;
        }
        parts[count] = parse_finite(piece.trim())?;
        count += 1;
    }
    if count != 3 {
        return None;
    }
    Some(parts[0] + parts[1] / 60.0 + parts[2] / 3600.0)
}

/// Non-finite values would slip through range comparisons downstream, so
/// "NaN" and "inf" count as unparsable.
fn parse_finite(input: &str) -> Option<f64> {
    input.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_decimal_degrees() {
        assert_eq!(parse_coordinate("-26.106"), Some(-26.106));
        assert_eq!(parse_coordinate("  28.17 "), Some(28.17));
    }

    #[test]
    fn parses_dms_notation() {
        let parsed = parse_coordinate("26;6;22.889").unwrap();
        let expected = 26.0 + 6.0 / 60.0 + 22.889 / 3600.0;
        assert!((parsed - expected).abs() < 1e-12);
    }

    #[test]
    fn dms_allows_surrounding_whitespace_per_part() {
        assert!(parse_coordinate("26; 6 ;22.889").is_some());
    }

    #[test]
    fn blank_input_is_not_provided() {
        assert_eq!(parse_coordinate(""), None);
        assert_eq!(parse_coordinate("   "), None);
    }

    #[test]
    fn garbage_input_is_not_provided() {
        assert_eq!(parse_coordinate("not a number"), None);
        assert_eq!(parse_coordinate("26;6"), None);
        assert_eq!(parse_coordinate("26;6;22;1"), None);
        assert_eq!(parse_coordinate("26;six;22"), None);
    }

    proptest! {
        #[test]
        fn dms_matches_arithmetic(d in -90.0f64..90.0, m in 0.0f64..60.0, s in 0.0f64..60.0) {
            let input = format!("{d};{m};{s}");
            let parsed = parse_coordinate(&input).unwrap();
            let expected = d + m / 60.0 + s / 3600.0;
            prop_assert!((parsed - expected).abs() < 1e-9);
        }

        #[test]
        fn decimal_round_trips(v in -180.0f64..180.0) {
            let parsed = parse_coordinate(&v.to_string()).unwrap();
            prop_assert!((parsed - v).abs() < 1e-9);
        }
    }
}

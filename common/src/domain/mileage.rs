/// Extracts the numeric magnitude from a free-form mileage string such as
/// `"18 kmpl"` or `"22.5 kmpl city"`. The catalog stores mileage as text, so
/// the first run of digits, with an optional fractional part, is the only
/// load-bearing piece. When a string holds several numbers the FIRST one
/// wins.
///
/// Missing input or text without any digit yields `None`, never zero and
/// never an error. Both the api and the panel depend on this exact function
/// producing the same answer for the same string.
pub fn parse_mileage(raw: Option<&str>) -> Option<f64> {
    let raw = raw?;
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i].is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            // fractional part only counts when a digit follows the dot
            if i + 1 < bytes.len() && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            return raw[start..i].parse().ok();
        }
        i += 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_integer() {
        assert_eq!(parse_mileage(Some("18 kmpl")), Some(18.0));
    }

    #[test]
    fn decimal_with_trailing_text() {
        assert_eq!(parse_mileage(Some("22.5 kmpl city")), Some(22.5));
    }

    #[test]
    fn no_digits() {
        assert_eq!(parse_mileage(Some("N/A")), None);
    }

    #[test]
    fn missing_value() {
        assert_eq!(parse_mileage(None), None);
    }

    #[test]
    fn first_number_wins() {
        assert_eq!(parse_mileage(Some("up to 18 or 20 kmpl")), Some(18.0));
    }

    #[test]
    fn dot_without_following_digit_is_not_fractional() {
        assert_eq!(parse_mileage(Some("18. kmpl")), Some(18.0));
        assert_eq!(parse_mileage(Some("about 19.2.")), Some(19.2));
    }

    #[test]
    fn number_embedded_mid_string() {
        assert_eq!(parse_mileage(Some("city:14kmpl")), Some(14.0));
    }
}

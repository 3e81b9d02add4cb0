/// Drop every character that is not an ASCII digit
///
/// `"код: -12a3"` becomes `"123"`.
pub fn digits_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_digit).collect()
}

/// Loose integer coercion of free text
///
/// Every digit in the text is kept, in order, and read as one number. Text
/// without digits coerces to 0, and values beyond `i64` saturate.
pub fn coerce_int(text: &str) -> i64 {
    digits_only(text).bytes().fold(0i64, |value, digit| {
        value.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    })
}

const MIN_DIGITS: usize = 11;
const MAX_DIGITS: usize = 15;

/// International format: `+` followed by 11 to 15 ASCII digits, nothing else.
pub fn validate_phone(phone: &str) -> bool {
    match phone.strip_prefix('+') {
        Some(digits) => {
            (MIN_DIGITS..=MAX_DIGITS).contains(&digits.len())
                && digits.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}

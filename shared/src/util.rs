/// Get current UTC timestamp (milliseconds)
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Phone numbers are exactly this many digits on the wire.
pub const PHONE_DIGITS: usize = 10;

/// Strip everything but ASCII digits and cap at [`PHONE_DIGITS`].
///
/// Mirrors what the phone inputs accept: typing `98765-43210x` yields
/// `9876543210`, and further digits past ten are ignored.
pub fn sanitize_phone(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_digit())
        .take(PHONE_DIGITS)
        .collect()
}

/// A phone number is complete once it has exactly ten digits.
pub fn is_complete_phone(phone: &str) -> bool {
    phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit())
}

/// Mask a phone number for log output, keeping the last four digits.
pub fn mask_phone(phone: &str) -> String {
    if phone.len() <= 4 {
        return "*".repeat(phone.len());
    }
    let visible = &phone[phone.len() - 4..];
    format!("{}{}", "*".repeat(phone.len() - 4), visible)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_and_caps() {
        assert_eq!(sanitize_phone("98765-43210"), "9876543210");
        assert_eq!(sanitize_phone("+91 9876543210"), "9198765432");
        assert_eq!(sanitize_phone("abc"), "");
    }

    #[test]
    fn complete_phone() {
        assert!(is_complete_phone("9876543210"));
        assert!(!is_complete_phone("987654321"));
        assert!(!is_complete_phone(""));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_phone("9876543210"), "******3210");
        assert_eq!(mask_phone("321"), "***");
    }
}

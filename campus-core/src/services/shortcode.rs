use rand::Rng;

pub const SHORTCODE_MAX_LEN: usize = 10;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a random school shortcode: uppercase alphanumeric, max length.
pub fn generate_shortcode() -> String {
    let mut rng = rand::thread_rng();
    (0..SHORTCODE_MAX_LEN)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Shortcodes are uppercase alphanumeric and at most `SHORTCODE_MAX_LEN`
/// characters.
pub fn validate_shortcode(shortcode: &str) -> bool {
    !shortcode.is_empty()
        && shortcode.len() <= SHORTCODE_MAX_LEN
        && shortcode
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_shortcodes_validate() {
        for _ in 0..32 {
            let code = generate_shortcode();
            assert!(validate_shortcode(&code), "generated invalid code {code}");
        }
    }

    #[test]
    fn rejects_lowercase_and_symbols() {
        assert!(!validate_shortcode("abc123"));
        assert!(!validate_shortcode("ABC-123"));
        assert!(!validate_shortcode(""));
        assert!(!validate_shortcode("ABCDEFGHIJK"));
    }

    #[test]
    fn accepts_uppercase_alphanumerics() {
        assert!(validate_shortcode("SCHOOL01"));
        assert!(validate_shortcode("A"));
    }
}

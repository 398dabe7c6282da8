/// One-time verification code generation
///
/// Codes are 6-digit numeric strings drawn uniformly from
/// [100000, 999999], so they never carry a leading zero. Codes do not
/// expire; a code stays valid until it is consumed by a successful
/// verification.

use rand::Rng;

/// Inclusive bounds of the code space
const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Generates a random 6-digit verification code
pub fn generate_code() -> String {
    rand::thread_rng().gen_range(CODE_MIN..=CODE_MAX).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_is_six_digits() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), 6);
            assert!(code.chars().all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_code_in_range() {
        for _ in 0..100 {
            let value: u32 = generate_code().parse().unwrap();
            assert!((CODE_MIN..=CODE_MAX).contains(&value));
        }
    }

    #[test]
    fn test_codes_vary() {
        let first = generate_code();
        // 100 draws from a 900k space colliding every time is effectively impossible
        assert!((0..100).any(|_| generate_code() != first));
    }
}

//! Luhn (mod 10) checksum.
//!
//! Walking the digits right to left with a zero-based position, every digit
//! at an odd position is doubled and reduced by 9 when the result exceeds 9.
//! The number is valid when the sum of all digits is a multiple of 10.
//!
//! Card numbers entered in the storefront are always 16 digits, so the
//! string entry point [`validate_str`] refuses anything else before the
//! checksum runs. The slice functions work on any length and are used for
//! check digit generation.

/// Doubled digit with 9 subtracted when the product exceeds 9, indexed by digit.
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit slice (values 0-9) with the Luhn algorithm.
///
/// Empty input is invalid.
///
/// # Example
///
/// ```
/// use storefront_cards::luhn::validate;
///
/// let digits = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 6];
/// assert!(validate(&digits));
///
/// let typo = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6, 7];
/// assert!(!validate(&typo));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    !digits.is_empty() && compute_checksum(digits) % 10 == 0
}

/// Computes the weighted Luhn sum (before the mod 10 reduction).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &d)| {
            if position % 2 == 1 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum()
}

/// Validates a card number string of exactly 16 ASCII digits.
///
/// Returns `false` without running the checksum if the length is not 16
/// or any character is not a digit. Callers strip spaces first.
///
/// # Example
///
/// ```
/// use storefront_cards::luhn::validate_str;
///
/// assert!(validate_str("4532015112830366"));
/// assert!(!validate_str("1234567890123456"));
/// assert!(!validate_str("4532 0151 1283 0366"));
/// assert!(!validate_str("79927398713")); // Luhn-valid, but not 16 digits
/// ```
pub fn validate_str(input: &str) -> bool {
    let bytes = input.as_bytes();
    if bytes.len() != 16 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }

    let mut digits = [0u8; 16];
    for (slot, b) in digits.iter_mut().zip(bytes) {
        *slot = b - b'0';
    }
    validate_16(&digits)
}

/// Computes the check digit that makes `digits` followed by it Luhn-valid.
///
/// # Example
///
/// ```
/// use storefront_cards::luhn::generate_check_digit;
///
/// let partial = [4, 5, 3, 2, 0, 1, 5, 1, 1, 2, 8, 3, 0, 3, 6];
/// assert_eq!(generate_check_digit(&partial), 6);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // Appending a digit shifts every existing position by one, so the
    // digits doubled here are the ones at even positions from the right.
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(position, &d)| {
            if position % 2 == 0 {
                DOUBLE_TABLE[d as usize] as u32
            } else {
                d as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}

/// Validates a 16-digit number with the loop unrolled.
///
/// Positions 1, 3, ..., 15 from the right (indices 14, 12, ..., 0) are doubled.
#[inline]
pub fn validate_16(digits: &[u8; 16]) -> bool {
    let sum = digits[15] as u32
        + DOUBLE_TABLE[digits[14] as usize] as u32
        + digits[13] as u32
        + DOUBLE_TABLE[digits[12] as usize] as u32
        + digits[11] as u32
        + DOUBLE_TABLE[digits[10] as usize] as u32
        + digits[9] as u32
        + DOUBLE_TABLE[digits[8] as usize] as u32
        + digits[7] as u32
        + DOUBLE_TABLE[digits[6] as usize] as u32
        + digits[5] as u32
        + DOUBLE_TABLE[digits[4] as usize] as u32
        + digits[3] as u32
        + DOUBLE_TABLE[digits[2] as usize] as u32
        + digits[1] as u32
        + DOUBLE_TABLE[digits[0] as usize] as u32;

    sum % 10 == 0
}

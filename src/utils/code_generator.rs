//! Short code generation.

use base64::Engine as _;

/// Length of random bytes before base64 encoding.
///
/// 5 bytes encode to exactly 7 URL-safe characters without padding, the
/// short-code length used across the service.
const CODE_LENGTH_BYTES: usize = 5;

/// Generates a cryptographically secure random short code.
///
/// Uses `getrandom` for entropy and encodes the result as URL-safe base64
/// without padding, producing a 7-character code. With 40 bits of entropy
/// the collision probability is negligible; the unique constraint on the
/// `urls` table catches the rest and creation retries with a fresh code.
///
/// # Panics
///
/// Panics if the system random number generator fails (extremely rare).
pub fn generate_code() -> String {
    let mut buffer = [0u8; CODE_LENGTH_BYTES];

    getrandom::fill(&mut buffer).expect("Failed to generate random bytes");

    base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(buffer)
}

//! Opaque session token generation.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

/// Generate a cryptographically random session token: 16 bytes
/// (128 bits) of fresh entropy, base64url-encoded without padding.
/// Uniqueness across sessions is enforced by the storage layer's
/// unique column.
pub fn generate_session_token() -> String {
    let mut rng = rand::rng();
    let bytes: [u8; 16] = rand::Rng::random(&mut rng);
    URL_SAFE_NO_PAD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_url_safe() {
        let token = generate_session_token();
        assert!(
            token
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        );
        // 16 bytes → 22 base64url chars.
        assert_eq!(token.len(), 22);
    }

    #[test]
    fn tokens_differ() {
        assert_ne!(generate_session_token(), generate_session_token());
    }
}

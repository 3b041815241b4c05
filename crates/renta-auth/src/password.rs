//! Password hashing and verification using Argon2id.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use renta_core::error::{RentaError, RentaResult};

/// A well-formed Argon2id hash of no password anyone holds. Verifying
/// against it keeps the unknown-username path as expensive as a real
/// verification, so response timing does not reveal whether the
/// username exists.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$GRWdGckk0LgLRDlGIBO8tA$8c9wD3rCcGbzbwlh7DUQzEAVkyLjQY1latOHqaeTnXw";

/// Hash a plaintext password with a freshly generated random salt.
/// Two calls on the same plaintext produce different outputs.
pub fn hash_password(password: &str) -> RentaResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| RentaError::Crypto(format!("hash error: {e}")))
}

/// Verify a plaintext password against a stored PHC-format hash.
///
/// Returns `Ok(true)` on match, `Ok(false)` on mismatch. The
/// comparison inside argon2 is constant-time. A malformed stored hash
/// is a data-integrity error, not a normal-path condition.
pub fn verify_password(password: &str, hash: &str) -> RentaResult<bool> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| RentaError::Crypto(format!("invalid hash format: {e}")))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(RentaError::Crypto(format!("verify error: {e}"))),
    }
}

/// Burn a verification against [`DUMMY_HASH`]. Called when a login
/// names a username that does not exist.
pub fn dummy_verify(password: &str) {
    let _ = verify_password(password, DUMMY_HASH);
}

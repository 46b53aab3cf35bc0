//! Steam Guard mobile authenticator codes.
//!
//! Codes are HMAC-SHA1 over the 30-second time step, dynamically truncated
//! and rendered as five symbols from Steam's 26-character alphabet.

use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::SessionError;

/// Symbols used by Steam Guard codes.
pub const CODE_ALPHABET: &[u8; 26] = b"23456789BCDFGHJKMNPQRTVWXY";
pub const CODE_LEN: usize = 5;
const TIME_STEP_SECS: u64 = 30;

type HmacSha1 = Hmac<Sha1>;

/// Code for `shared_secret` (base64) at the current wall-clock time.
pub fn generate_auth_code(shared_secret: &str) -> Result<String, SessionError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0);
    generate_auth_code_at(shared_secret, now)
}

/// Code for `shared_secret` (base64) at `unix_time`.
pub fn generate_auth_code_at(shared_secret: &str, unix_time: u64) -> Result<String, SessionError> {
    let key = B64
        .decode(shared_secret.trim())
        .map_err(|err| SessionError::Crypto(format!("shared secret is not base64: {err}")))?;
    let mut mac = HmacSha1::new_from_slice(&key)
        .map_err(|err| SessionError::Crypto(format!("invalid shared secret: {err}")))?;
    mac.update(&(unix_time / TIME_STEP_SECS).to_be_bytes());
    let digest = mac.finalize().into_bytes();

    let offset = (digest[19] & 0x0f) as usize;
    let mut full = u32::from_be_bytes([
        digest[offset],
        digest[offset + 1],
        digest[offset + 2],
        digest[offset + 3],
    ]) & 0x7fff_ffff;

    let mut code = String::with_capacity(CODE_LEN);
    for _ in 0..CODE_LEN {
        code.push(CODE_ALPHABET[(full % 26) as usize] as char);
        full /= 26;
    }
    Ok(code)
}

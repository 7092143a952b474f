// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed cookie codec for [`TokenRecord`].
//!
//! The record is JSON, base64url-encoded and signed by the cookie jar's
//! HMAC key. The front-end lives on a different origin, so the cookie has to
//! be `SameSite=None; Secure` or the browser will not send it back.
//!
//! `write` and `clear` must carry the same attributes: browsers silently
//! ignore a removal whose path/secure/samesite differ from the original.

use crate::error::AppError;
use crate::models::TokenRecord;
use axum_extra::extract::cookie::{Cookie, Key, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hkdf::Hkdf;
use sha2::Sha256;
use time::{Duration, OffsetDateTime};

/// Cookie holding the signed token record.
pub const COOKIE_NAME: &str = "strava";

/// Client-side lifetime of the cookie.
pub const COOKIE_MAX_AGE: Duration = Duration::days(30);

const KEY_SALT: &[u8] = b"globalsport-api cookie key";
const KEY_INFO: &[u8] = b"strava token cookie v1";

/// Derive the 64-byte cookie signing key from the configured secret.
pub fn cookie_key(secret: &[u8]) -> anyhow::Result<Key> {
    let hk = Hkdf::<Sha256>::new(Some(KEY_SALT), secret);
    let mut okm = [0u8; 64];
    hk.expand(KEY_INFO, &mut okm)
        .map_err(|e| anyhow::anyhow!("Cookie key derivation failed: {}", e))?;
    Ok(Key::from(&okm))
}

/// Store `record` in the jar. The cookie is emitted when the jar is returned
/// as part of the response.
pub fn write(jar: SignedCookieJar, record: &TokenRecord) -> Result<SignedCookieJar, AppError> {
    let json = serde_json::to_vec(record)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Token serialization failed: {}", e)))?;

    let cookie = token_cookie(URL_SAFE_NO_PAD.encode(json), COOKIE_MAX_AGE, None);
    Ok(jar.add(cookie))
}

/// Decode the record from the jar.
///
/// Missing cookie, bad signature and undecodable payload all yield `None`.
pub fn read(jar: &SignedCookieJar) -> Option<TokenRecord> {
    let cookie = jar.get(COOKIE_NAME)?;
    let record = decode(cookie.value());
    if record.is_none() {
        tracing::debug!("Ignoring malformed token cookie");
    }
    record
}

/// Instruct the browser to drop the cookie.
///
/// Always emits a removal, whether or not the request carried the cookie.
pub fn clear(jar: SignedCookieJar) -> SignedCookieJar {
    jar.add(token_cookie(
        String::new(),
        Duration::ZERO,
        Some(OffsetDateTime::UNIX_EPOCH),
    ))
}

fn token_cookie(
    value: String,
    max_age: Duration,
    expires: Option<OffsetDateTime>,
) -> Cookie<'static> {
    let mut builder = Cookie::build((COOKIE_NAME, value))
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(max_age);
    if let Some(at) = expires {
        builder = builder.expires(at);
    }
    builder.build()
}

fn decode(value: &str) -> Option<TokenRecord> {
    let bytes = URL_SAFE_NO_PAD.decode(value).ok()?;
    serde_json::from_slice(&bytes).ok()
}

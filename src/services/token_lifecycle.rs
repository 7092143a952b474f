// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Access token lifecycle: validity check, refresh on demand, persistence.
//!
//! Refresh happens lazily on the request that crosses the expiry boundary;
//! there is no background timer. Two concurrent requests from the same
//! browser may both refresh, and whichever response lands last wins the
//! cookie. Both resulting tokens are valid upstream.

use crate::error::AppError;
use crate::models::TokenRecord;
use crate::services::strava::TokenEndpoint;
use crate::services::token_store;
use axum_extra::extract::cookie::SignedCookieJar;

/// Outcome of [`ensure_fresh`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Freshness {
    /// Stored token is still good; nothing to persist.
    Valid(TokenRecord),
    /// Token was refreshed upstream and must be written back.
    Refreshed(TokenRecord),
}

/// Return `record` if usable at `now`, otherwise refresh it via `endpoint`.
///
/// Upstream failures come back as `UpstreamExchangeFailed`, never as
/// `NotAuthorized`: the user did connect, the connection is just broken.
pub async fn ensure_fresh<E: TokenEndpoint>(
    endpoint: &E,
    record: TokenRecord,
    now: i64,
) -> Result<Freshness, AppError> {
    if record.is_usable_at(now) {
        return Ok(Freshness::Valid(record));
    }

    tracing::info!(
        athlete_id = ?record.athlete_id,
        expires_at = record.expires_at,
        "Access token expired, refreshing"
    );

    let response = endpoint.refresh_token(&record.refresh_token).await?;
    let refreshed = record.refreshed(response);

    tracing::info!(
        athlete_id = ?refreshed.athlete_id,
        expires_at = refreshed.expires_at,
        "Token refreshed"
    );
    Ok(Freshness::Refreshed(refreshed))
}

/// Get a usable access token for the session carried by `jar`.
///
/// Returns the jar to send back with the response; it carries the new cookie
/// when a refresh happened and is unchanged otherwise.
pub async fn get_valid_access_token<E: TokenEndpoint>(
    endpoint: &E,
    jar: SignedCookieJar,
    now: i64,
) -> Result<(SignedCookieJar, String), AppError> {
    let record = token_store::read(&jar).ok_or(AppError::NotAuthorized)?;

    match ensure_fresh(endpoint, record, now).await? {
        Freshness::Valid(record) => Ok((jar, record.access_token)),
        Freshness::Refreshed(record) => {
            let jar = token_store::write(jar, &record)?;
            Ok((jar, record.access_token))
        }
    }
}

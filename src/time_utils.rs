// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for date/time handling.

use chrono::Utc;

/// Current time as Unix seconds, the unit Strava uses for `expires_at`.
pub fn unix_now() -> i64 {
    Utc::now().timestamp()
}

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod oauth;
pub mod strava;
pub mod token_lifecycle;
pub mod token_store;

pub use strava::{StravaClient, TokenEndpoint};
pub use token_lifecycle::{ensure_fresh, get_valid_access_token, Freshness};

// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod token;

pub use token::{
    StravaAthlete, TokenExchangeResponse, TokenRecord, TokenRefreshResponse, REFRESH_MARGIN_SECS,
};

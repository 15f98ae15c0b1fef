//! Middleware module - Inbound rate limiting

pub mod rate_limit;

//! HTTP Client Factory
//!
//! Provides a factory function for building the reqwest client used by
//! `HttpBackend`. Timeouts and cancellation are intentionally left to the
//! transport defaults; callers own retry policy.

/// Build the `reqwest::Client` for backend calls.
pub fn build_http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .build()
        .expect("failed to build reqwest client")
}

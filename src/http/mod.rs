//! HTTP client module
//!
//! Thin transport used by the JSON operation invoker.
//!
//! # Features
//!
//! - **Single attempt**: one request per call; failed calls are reported,
//!   never retried
//! - **Timeouts**: client-wide default with per-request override
//! - **Status classification**: non-success statuses become `Error::HttpStatus`
//!   with the response body attached

mod client;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};

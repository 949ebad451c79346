//! `fetch-retry` is an async HTTP fetch helper with bounded retry and backoff.
//!
//! Every attempt carries a browser-like default header set, which caller
//! headers override by name. Entry points:
//! - [`RetryingFetcher::fetch`]
//! - [`fetch_with_retry`]

mod backoff;
mod client;
mod error;
mod headers;
mod options;
mod request;
mod response;
pub mod sleeper;

pub use client::{fetch_with_retry, RetryingFetcher};
pub use error::FetchError;
pub use headers::{default_headers, DEFAULT_USER_AGENT};
pub use options::ClientOptions;
pub use request::FetchRequest;
pub use reqwest::{header, Method, StatusCode};
pub use response::FetchResponse;
pub use sleeper::{Sleeper, TokioSleeper};

pub type Result<T> = std::result::Result<T, FetchError>;

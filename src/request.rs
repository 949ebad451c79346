use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    Method,
};
use serde::Serialize;

use crate::{FetchError, Result};

/// Outbound request descriptor.
///
/// A fetch never mutates the descriptor, so one value can be reused for
/// repeated or concurrent calls.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchRequest {
    /// HTTP method, `GET` unless set otherwise.
    pub method: Method,
    /// Target URL.
    pub url: String,
    /// Caller headers, merged over the default header set.
    pub headers: HeaderMap,
    /// Raw body re-sent on every attempt.
    pub body: Option<Vec<u8>>,
}

impl FetchRequest {
    /// Creates a request with an explicit method.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a `GET` request.
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Creates a `POST` request.
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(Method::POST, url)
    }

    /// Sets a header, replacing earlier values of the same name.
    pub fn header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Sets a raw body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the JSON body.
    ///
    /// Sets `Content-Type: application/json` unless the caller already set one.
    pub fn json<T: Serialize + ?Sized>(mut self, value: &T) -> Result<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|err| FetchError::InvalidRequest(format!("invalid JSON body: {err}")))?;
        self.headers
            .entry(CONTENT_TYPE)
            .or_insert_with(|| HeaderValue::from_static("application/json"));
        self.body = Some(body);
        Ok(self)
    }
}

use reqwest::{header::HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::{FetchError, Result};

/// Successful (2xx) response with its body already read.
#[derive(Clone, Debug)]
pub struct FetchResponse {
    status: StatusCode,
    headers: HeaderMap,
    body: Vec<u8>,
    attempts: usize,
}

impl FetchResponse {
    pub(crate) fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Vec<u8>,
        attempts: usize,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            attempts,
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Number of attempts it took to get this response (1-based).
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<&str> {
        std::str::from_utf8(&self.body)
            .map_err(|err| FetchError::Decode(format!("response body is not UTF-8: {err}")))
    }

    /// Body parsed as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|err| {
            FetchError::Decode(format!(
                "invalid response JSON: {err}; body: {}",
                String::from_utf8_lossy(&self.body)
            ))
        })
    }
}

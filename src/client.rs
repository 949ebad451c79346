use std::{fmt, sync::Arc, time::Duration};

use reqwest::StatusCode;

use crate::{
    backoff::{parse_retry_after, rate_limit_delay, transport_backoff},
    headers::merge_with_defaults,
    sleeper::{Sleeper, TokioSleeper},
    ClientOptions, FetchError, FetchRequest, FetchResponse, Result,
};

/// Fetches `request` with a default client and `max_attempts` total attempts.
///
/// Convenience wrapper around [`RetryingFetcher::fetch`] for one-off calls.
pub async fn fetch_with_retry(request: &FetchRequest, max_attempts: usize) -> Result<FetchResponse> {
    RetryingFetcher::new()
        .with_options(ClientOptions {
            max_attempts,
            ..ClientOptions::default()
        })
        .fetch(request)
        .await
}

/// Outcome of one attempt that did not produce a success response.
enum AttemptFailure {
    RateLimited { retry_after: Option<Duration> },
    Failed(FetchError),
}

#[derive(Clone)]
/// HTTP client that retries rate-limited and failed requests with backoff.
///
/// Holds no per-call state; clones share the connection pool.
pub struct RetryingFetcher {
    http: reqwest::Client,
    options: ClientOptions,
    sleeper: Arc<dyn Sleeper>,
}

impl fmt::Debug for RetryingFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryingFetcher")
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl Default for RetryingFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryingFetcher {
    /// Creates a fetcher with default options and a fresh `reqwest::Client`.
    pub fn new() -> Self {
        Self::with_http_client(reqwest::Client::new())
    }

    /// Creates a fetcher around an existing `reqwest::Client`.
    pub fn with_http_client(http: reqwest::Client) -> Self {
        Self {
            http,
            options: ClientOptions::default(),
            sleeper: Arc::new(TokioSleeper),
        }
    }

    /// Creates a fetcher configured from `FETCH_RETRY_*` environment variables.
    ///
    /// See [`ClientOptions::from_env`].
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::new().with_options(ClientOptions::from_env()?))
    }

    /// Applies client options such as timeout and retry behavior.
    pub fn with_options(mut self, opts: ClientOptions) -> Self {
        self.options = opts;
        self
    }

    /// Replaces the sleeper used between attempts.
    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn options(&self) -> &ClientOptions {
        &self.options
    }

    /// Sends `request`, retrying until a 2xx response or the attempt budget runs out.
    ///
    /// - 2xx: returned immediately.
    /// - 429: waits `Retry-After` seconds (or the rate-limit step) and retries.
    /// - other statuses and transport errors: exponential backoff, the last
    ///   error is returned once no attempts remain.
    /// - every attempt rate-limited: [`FetchError::RetriesExhausted`].
    pub async fn fetch(&self, request: &FetchRequest) -> Result<FetchResponse> {
        let max_attempts = self.options.max_attempts;

        for attempt in 0..max_attempts {
            let is_last = attempt + 1 == max_attempts;

            let delay = match self.attempt_once(request, attempt).await {
                Ok(response) => return Ok(response),
                Err(AttemptFailure::RateLimited { retry_after }) => {
                    let delay =
                        retry_after.unwrap_or_else(|| rate_limit_delay(&self.options, attempt));

                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        url = %request.url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited"
                    );

                    delay
                }
                Err(AttemptFailure::Failed(err)) => {
                    if is_last {
                        return Err(err);
                    }
                    let delay = transport_backoff(&self.options, attempt);

                    #[cfg(feature = "tracing")]
                    tracing::warn!(
                        url = %request.url,
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "attempt failed, retrying"
                    );

                    delay
                }
            };

            if !is_last {
                self.sleeper.sleep(delay).await;
            }
        }

        Err(FetchError::RetriesExhausted {
            attempts: max_attempts,
        })
    }

    async fn attempt_once(
        &self,
        request: &FetchRequest,
        attempt: usize,
    ) -> std::result::Result<FetchResponse, AttemptFailure> {
        #[cfg(feature = "tracing")]
        tracing::debug!(method = %request.method, url = %request.url, attempt = attempt + 1, "sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), &request.url)
            .headers(merge_with_defaults(&request.headers))
            .timeout(Duration::from_millis(self.options.timeout_ms));
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        let response = builder
            .send()
            .await
            .map_err(|err| AttemptFailure::Failed(FetchError::Transport(err)))?;
        let status = response.status();

        if status.is_success() {
            let headers = response.headers().clone();
            let body = response
                .bytes()
                .await
                .map_err(|err| AttemptFailure::Failed(FetchError::Transport(err)))?;

            #[cfg(feature = "tracing")]
            tracing::debug!(url = %request.url, status = status.as_u16(), attempts = attempt + 1, "request succeeded");

            return Ok(FetchResponse::new(
                status,
                headers,
                body.to_vec(),
                attempt + 1,
            ));
        }

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(AttemptFailure::RateLimited {
                retry_after: parse_retry_after(response.headers()),
            });
        }

        Err(AttemptFailure::Failed(FetchError::Http {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_owned(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::RetryingFetcher;
    use crate::ClientOptions;

    #[test]
    fn default_fetcher_uses_three_attempts() {
        let fetcher = RetryingFetcher::default();
        assert_eq!(fetcher.options().max_attempts, 3);
    }

    #[test]
    fn debug_lists_options() {
        let fetcher = RetryingFetcher::new().with_options(ClientOptions {
            max_attempts: 7,
            ..ClientOptions::default()
        });
        let debug = format!("{fetcher:?}");
        assert!(debug.contains("RetryingFetcher"));
        assert!(debug.contains("max_attempts: 7"));
    }
}

/// Configures per-attempt timeout and retry behavior.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientOptions {
    /// Per-attempt timeout in milliseconds.
    pub timeout_ms: u64,
    /// Total number of attempts, including the first one.
    pub max_attempts: usize,
    /// Base of the exponential backoff applied after a failed attempt.
    pub backoff_base_ms: u64,
    /// Per-attempt step used for 429 responses without `Retry-After`.
    pub rate_limit_step_ms: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 10_000,
            max_attempts: 3,
            backoff_base_ms: 1_000,
            rate_limit_step_ms: 2_000,
        }
    }
}

impl ClientOptions {
    /// Builds options from environment variables, falling back to defaults.
    ///
    /// Reads (all optional):
    /// - `FETCH_RETRY_TIMEOUT_MS`
    /// - `FETCH_RETRY_MAX_ATTEMPTS`
    /// - `FETCH_RETRY_BACKOFF_BASE_MS`
    /// - `FETCH_RETRY_RATE_LIMIT_STEP_MS`
    ///
    /// Returns an error if a variable is set but empty or not a number.
    ///
    /// **Not available on `wasm32` targets** — environment variables do not
    /// exist in browser runtimes.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> std::result::Result<Self, String> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            timeout_ms: read_var(&lookup, "FETCH_RETRY_TIMEOUT_MS", defaults.timeout_ms)?,
            max_attempts: read_var(&lookup, "FETCH_RETRY_MAX_ATTEMPTS", defaults.max_attempts)?,
            backoff_base_ms: read_var(
                &lookup,
                "FETCH_RETRY_BACKOFF_BASE_MS",
                defaults.backoff_base_ms,
            )?,
            rate_limit_step_ms: read_var(
                &lookup,
                "FETCH_RETRY_RATE_LIMIT_STEP_MS",
                defaults.rate_limit_step_ms,
            )?,
        })
    }
}

fn read_var<F, T>(lookup: &F, name: &str, default: T) -> std::result::Result<T, String>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Err(format!("{name} is set but empty")),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| format!("{name} must be a non-negative integer, got '{raw}'")),
    }
}

use fetch_retry::{FetchRequest, RetryingFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let url = std::env::var("FETCH_URL")?;

    let fetcher = RetryingFetcher::from_env().map_err(anyhow::Error::msg)?;

    match fetcher.fetch(&FetchRequest::get(url)).await {
        Ok(response) => {
            println!(
                "{} after {} attempt(s)",
                response.status(),
                response.attempts()
            );
            println!("{}", response.text()?);
        }
        // Fallback is the caller's job; here we just report.
        Err(err) => eprintln!("request failed: {err}"),
    }

    Ok(())
}

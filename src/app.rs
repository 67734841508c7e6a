//! Fetch-with-retry flow used by the binary.

use anyhow::{Context, Result};
use log::info;
use std::time::Duration;

use crate::config::Config;
use crate::http::{DateTimeClient, FetchDateTime};
use crate::retry::{ExponentialBackoff, retry};
use crate::runtime::Runtime;

/// Fetches the date/time, retrying every failure until the backoff budget is spent.
#[tracing::instrument(skip(fetcher, backoff))]
pub async fn fetch_with_retry<F: FetchDateTime + ?Sized>(
    fetcher: &F,
    backoff: &ExponentialBackoff,
) -> Result<String> {
    let datetime = retry("GET datetime", backoff, || fetcher.fetch_datetime())
        .await
        .context("Failed to get datetime")?;

    info!("Fetched datetime {:?}", datetime);
    Ok(datetime)
}

/// Loads configuration, builds the client and fetches the date/time.
#[tracing::instrument(skip(runtime, base_url))]
pub async fn run<R: Runtime>(
    runtime: &R,
    base_url: Option<String>,
    max_elapsed: Duration,
) -> Result<String> {
    let config = Config::load(runtime).with_base_url_override(base_url);
    let client = DateTimeClient::new(config).context("Failed to create HTTP client")?;
    let backoff = ExponentialBackoff::default().with_max_elapsed_time(max_elapsed);

    fetch_with_retry(&client, &backoff).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::URL_ENV_VAR;
    use crate::http::{FetchError, MockFetchDateTime};
    use crate::runtime::MockRuntime;
    use mockall::Sequence;
    use mockall::predicate::eq;

    #[tokio::test(start_paused = true)]
    async fn test_fetch_with_retry_recovers() {
        let mut fetcher = MockFetchDateTime::new();
        let mut seq = Sequence::new();

        fetcher
            .expect_fetch_datetime()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|| Err(FetchError::UnexpectedStatus { code: 503 }));
        fetcher
            .expect_fetch_datetime()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok("Sun, 07 Jul 2024 16:36:50 UTC".to_string()));

        let result = fetch_with_retry(&fetcher, &ExponentialBackoff::default())
            .await
            .unwrap();
        assert_eq!(result, "Sun, 07 Jul 2024 16:36:50 UTC");
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_with_retry_retries_unsupported_content_type() {
        let mut fetcher = MockFetchDateTime::new();
        fetcher.expect_fetch_datetime().returning(|| {
            Err(FetchError::UnsupportedContentType {
                content_type: "application/xml".to_string(),
            })
        });

        let backoff = ExponentialBackoff::default().with_max_elapsed_time(Duration::from_secs(3));
        let err = fetch_with_retry(&fetcher, &backoff).await.unwrap_err();

        assert!(err.to_string().contains("Failed to get datetime"));
        let cause = err.downcast_ref::<FetchError>().unwrap();
        assert!(matches!(cause, FetchError::UnsupportedContentType { .. }));
    }

    #[tokio::test]
    async fn test_run_uses_url_from_env() {
        let mut server = mockito::Server::new_async().await;
        let url = server.url();

        let mock = server
            .mock("GET", "/datetime")
            .with_status(200)
            .with_header("content-type", "text/plain")
            .with_body("Sun, 07 Jul 2024 16:36:50 UTC")
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(URL_ENV_VAR))
            .returning(move |_| Ok(url.clone()));

        let result = run(&runtime, None, Duration::from_secs(1)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result, "Sun, 07 Jul 2024 16:36:50 UTC");
    }

    #[tokio::test]
    async fn test_run_base_url_override_wins() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/datetime")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"datetime":"override"}"#)
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .with(eq(URL_ENV_VAR))
            .returning(|_| Ok("http://127.0.0.1:1".to_string()));

        let result = run(&runtime, Some(server.url()), Duration::ZERO)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result, "override");
    }

    #[tokio::test]
    async fn test_run_zero_budget_fails_after_one_attempt() {
        let mut server = mockito::Server::new_async().await;

        let mock = server
            .mock("GET", "/datetime")
            .with_status(500)
            .expect(1)
            .create_async()
            .await;

        let mut runtime = MockRuntime::new();
        runtime
            .expect_env_var()
            .returning(|_| Err(std::env::VarError::NotPresent));

        let err = run(&runtime, Some(server.url()), Duration::ZERO)
            .await
            .unwrap_err();

        mock.assert_async().await;
        assert!(matches!(
            err.downcast_ref::<FetchError>(),
            Some(FetchError::UnexpectedStatus { code: 500 })
        ));
    }
}

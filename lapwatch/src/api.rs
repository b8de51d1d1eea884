//! Quote list client
//!
//! The endpoint returns a JSON array of `{ text, author }`. One quote is
//! picked at random. A failed request is retried exactly once after
//! [`RETRY_DELAY`]; the second failure is returned to the caller.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::state::Quote;

pub const RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("quote request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("quote list is empty")]
    Empty,
}

/// Fetch and decode the whole quote list.
pub async fn fetch_quotes(client: &reqwest::Client, url: &str) -> Result<Vec<Quote>, QuoteError> {
    let quotes = client
        .get(url)
        .send()
        .await?
        .error_for_status()?
        .json::<Vec<Quote>>()
        .await?;
    Ok(quotes)
}

pub fn pick_random(quotes: &[Quote]) -> Result<Quote, QuoteError> {
    quotes
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or(QuoteError::Empty)
}

/// Run `attempt`, and once more after `delay` if it fails.
pub async fn retry_once<T, E, F, Fut>(delay: Duration, mut attempt: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    match attempt().await {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!(
                error = %err,
                retry_in_ms = delay.as_millis() as u64,
                "Request failed, retrying once"
            );
            tokio::time::sleep(delay).await;
            attempt().await
        }
    }
}

/// Fetch the list from `url` and pick one quote, with a single retry.
pub async fn fetch_random_quote(url: &str) -> Result<Quote, QuoteError> {
    let client = reqwest::Client::new();
    let client = &client;
    retry_once(RETRY_DELAY, || async move {
        let quotes = fetch_quotes(client, url).await?;
        pick_random(&quotes)
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_list_decodes() {
        let body = r#"[
            {"text": "Genius is one percent inspiration.", "author": "Thomas Edison"},
            {"text": "Anonymous wisdom.", "author": null},
            {"text": "No author field."}
        ]"#;
        let quotes: Vec<Quote> = serde_json::from_str(body).unwrap();
        assert_eq!(quotes.len(), 3);
        assert_eq!(quotes[0].author.as_deref(), Some("Thomas Edison"));
        assert_eq!(quotes[1].author, None);
        assert_eq!(quotes[2].author, None);
    }

    #[test]
    fn test_pick_random() {
        assert!(matches!(pick_random(&[]), Err(QuoteError::Empty)));

        let only = Quote {
            text: "Only one".into(),
            author: None,
        };
        assert_eq!(pick_random(std::slice::from_ref(&only)).unwrap(), only);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_once_recovers() {
        let started = tokio::time::Instant::now();
        let mut calls = 0;
        let result = retry_once(RETRY_DELAY, || {
            calls += 1;
            let n = calls;
            async move {
                if n == 1 {
                    Err("connection reset")
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result, Ok(2));
        assert_eq!(calls, 2);
        assert!(started.elapsed() >= RETRY_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_retry_once_gives_up_after_second_failure() {
        let mut calls = 0;
        let result: Result<(), &str> = retry_once(RETRY_DELAY, || {
            calls += 1;
            async { Err("timeout") }
        })
        .await;

        assert_eq!(result, Err("timeout"));
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_first_success_does_not_wait() {
        let started = std::time::Instant::now();
        let result: Result<u8, &str> = retry_once(Duration::from_secs(60), || async { Ok(7) }).await;
        assert_eq!(result, Ok(7));
        assert!(started.elapsed() < Duration::from_secs(60));
    }
}

//! Fixed-interval polling for generation jobs.

use std::future::Future;
use std::time::Duration;

/// How a polling loop ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// `done` accepted this value.
    Finished(T),
    /// `max_polls` fetches without a terminal value; carries the last one.
    GaveUp { polls: u32, last: T },
}

/// Fetch until `done` says stop or `max_polls` fetches have been made.
///
/// The interval is fixed (no backoff); there is no sleep before the first
/// fetch nor after the last. `on_tick` sees every non-terminal value.
///
/// # Errors
///
/// The first fetch error ends polling and is returned as-is.
pub async fn poll_until<T, E, F, Fut>(
    interval: Duration,
    max_polls: u32,
    mut fetch: F,
    done: impl Fn(&T) -> bool,
    mut on_tick: impl FnMut(u32, &T),
) -> Result<PollOutcome<T>, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let max_polls = max_polls.max(1);
    let mut poll = 0;
    loop {
        poll += 1;
        let value = fetch().await?;
        if done(&value) {
            return Ok(PollOutcome::Finished(value));
        }
        if poll >= max_polls {
            return Ok(PollOutcome::GaveUp { polls: poll, last: value });
        }
        on_tick(poll, &value);
        tokio::time::sleep(interval).await;
    }
}

//! Shared HTTP client configuration and helpers.
//!
//! All outbound requests go through one [`ureq::Agent`] with conservative
//! timeouts. Response bodies are read through a size cap so a misbehaving
//! server cannot exhaust memory.

use std::io::{self, Read};
use std::sync::OnceLock;
use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
const READ_TIMEOUT: Duration = Duration::from_secs(20);
const WRITE_TIMEOUT: Duration = Duration::from_secs(20);

static AGENT: OnceLock<ureq::Agent> = OnceLock::new();

/// Shared HTTP agent with timeouts applied.
pub fn agent() -> &'static ureq::Agent {
    AGENT.get_or_init(|| {
        ureq::AgentBuilder::new()
            .timeout_connect(CONNECT_TIMEOUT)
            .timeout_read(READ_TIMEOUT)
            .timeout_write(WRITE_TIMEOUT)
            .build()
    })
}

/// Retry budget for a request, with exponential backoff between attempts.
#[derive(Clone, Copy, Debug)]
pub struct RetryConfig {
    /// Total attempts, including the first one.
    pub max_attempts: u32,
    /// Delay after the first failed attempt.
    pub base_delay: Duration,
    /// Upper bound for the backoff delay.
    pub max_delay: Duration,
}

/// Run `action` until it succeeds, the retry budget is exhausted, or
/// `should_retry` rejects the error.
pub fn retry_with_backoff<T, E>(
    config: RetryConfig,
    mut action: impl FnMut() -> Result<T, E>,
    mut should_retry: impl FnMut(&E) -> bool,
) -> Result<T, E> {
    let attempts = config.max_attempts.max(1);
    for attempt in 1..=attempts {
        match action() {
            Ok(value) => return Ok(value),
            Err(err) => {
                if attempt == attempts || !should_retry(&err) {
                    return Err(err);
                }
                std::thread::sleep(backoff_delay(&config, attempt));
            }
        }
    }
    unreachable!("retry loop returns from its final attempt");
}

/// Read a response body, failing once it exceeds `max_bytes`.
pub fn read_response_bytes(response: ureq::Response, max_bytes: usize) -> io::Result<Vec<u8>> {
    check_content_length(&response, max_bytes)?;
    let mut body = Vec::new();
    response
        .into_reader()
        .take(max_bytes as u64 + 1)
        .read_to_end(&mut body)?;
    if body.len() > max_bytes {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response body exceeded {max_bytes} bytes"),
        ));
    }
    Ok(body)
}

fn check_content_length(response: &ureq::Response, max_bytes: usize) -> io::Result<()> {
    let Some(declared) = response
        .header("Content-Length")
        .and_then(|value| value.trim().parse::<u64>().ok())
    else {
        return Ok(());
    };
    if declared > max_bytes as u64 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Response declared {declared} bytes; limit is {max_bytes}"),
        ));
    }
    Ok(())
}

fn backoff_delay(config: &RetryConfig, attempt: u32) -> Duration {
    let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
    let delay = config
        .base_delay
        .checked_mul(factor)
        .unwrap_or(config.max_delay);
    delay.min(config.max_delay)
}

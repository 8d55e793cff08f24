//! True-random permutations from the random.org sequence generator.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::error::Error;
use core::time::Duration;
use std::io::{self, ErrorKind};

use super::{RandomSource, validate_permutation};
use crate::error::RandomError;
use crate::options::RandomOptions;

/// Client for an HTTP sequence service that returns one integer per line.
///
/// The request blocks for at most the configured timeout.
#[derive(Debug, Clone)]
pub struct RandomOrg {
    agent: ureq::Agent,
    base_url: String,
    timeout: Duration,
}

impl RandomOrg {
    /// Creates a client from the service URL and timeout in `options`.
    #[must_use]
    pub fn new(options: &RandomOptions) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(options.timeout)
            .build();
        Self {
            agent,
            base_url: options.service_url.clone(),
            timeout: options.timeout,
        }
    }

    /// Returns the request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn service_error(&self, err: &(dyn Error + 'static)) -> RandomError {
        if is_timeout(err) {
            RandomError::Timeout(self.timeout)
        } else {
            RandomError::Service(err.to_string())
        }
    }

    fn request_url(&self, len: usize) -> String {
        format!(
            "{}?min=0&max={}&col=1&format=plain&rnd=new",
            self.base_url,
            len.saturating_sub(1)
        )
    }
}

impl RandomSource for RandomOrg {
    fn permutation(&mut self, len: usize) -> Result<Vec<usize>, RandomError> {
        if len == 0 {
            return Ok(Vec::new());
        }

        let body = self
            .agent
            .get(&self.request_url(len))
            .call()
            .map_err(|err| self.service_error(&err))?
            .into_string()
            .map_err(|err| self.service_error(&err))?;

        let perm = parse_sequence(&body)?;
        validate_permutation(&perm, len)?;
        log::debug!("received {len} item permutation from {}", self.base_url);
        Ok(perm)
    }
}

/// Walks the source chain looking for an I/O timeout.
fn is_timeout(err: &(dyn Error + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        let timed_out = err
            .downcast_ref::<io::Error>()
            .is_some_and(|io_err| matches!(io_err.kind(), ErrorKind::TimedOut | ErrorKind::WouldBlock));
        if timed_out {
            return true;
        }
        current = err.source();
    }
    false
}

/// Parses one non-negative integer per non-blank line.
pub(crate) fn parse_sequence(body: &str) -> Result<Vec<usize>, RandomError> {
    body.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            line.parse::<usize>()
                .map_err(|_| RandomError::Service(format!("unexpected line: {line:?}")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_sequence() {
        assert_eq!(parse_sequence("2\n0\r\n1\n\n").unwrap(), vec![2, 0, 1]);
    }

    #[test]
    fn rejects_error_page() {
        let err = parse_sequence("Error: You have used your quota").unwrap_err();
        assert!(matches!(err, RandomError::Service(_)));
    }

    #[test]
    fn builds_query_for_zero_based_range() {
        let client = RandomOrg::new(&RandomOptions::default());
        assert!(client.request_url(52).ends_with("?min=0&max=51&col=1&format=plain&rnd=new"));
    }

    #[test]
    fn unreachable_service_is_an_error() {
        let options = RandomOptions::default()
            .with_service_url("http://127.0.0.1:9/sequences/")
            .with_timeout(Duration::from_millis(200));
        let mut client = RandomOrg::new(&options);
        assert!(matches!(
            client.permutation(52),
            Err(RandomError::Service(_))
        ));
    }

    #[test]
    fn silent_service_times_out() {
        // accepted by the kernel backlog but never answered
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let timeout = Duration::from_millis(300);
        let options = RandomOptions::default()
            .with_service_url(format!("http://{addr}/sequences/"))
            .with_timeout(timeout);
        let mut client = RandomOrg::new(&options);

        let started = std::time::Instant::now();
        assert_eq!(client.permutation(52), Err(RandomError::Timeout(timeout)));
        assert!(started.elapsed() < Duration::from_secs(5));
        drop(listener);
    }

    #[test]
    fn io_timeouts_are_found_through_the_source_chain() {
        let timed_out = io::Error::new(ErrorKind::TimedOut, "timed out reading response");
        assert!(is_timeout(&timed_out));
        let refused = io::Error::new(ErrorKind::ConnectionRefused, "refused");
        assert!(!is_timeout(&refused));
    }
}

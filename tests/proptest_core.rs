//! Property-Based Tests - Request-layer Invariants
//!
//! Uses `proptest` to verify retry scheduling, rate-limiter spacing and
//! URL building across random inputs.

use std::time::Duration;

use proptest::prelude::*;

use esi_market_watch::adapters::api::client::build_url;
use esi_market_watch::adapters::api::rate_limit::RateLimiter;
use esi_market_watch::adapters::api::retry::{AttemptPrep, RetrySchedule};

// ── Retry Schedule Properties ───────────────────────────────

proptest! {
    /// The schedule hands out exactly the configured number of attempts,
    /// indexed sequentially from zero.
    #[test]
    fn schedule_spends_exact_attempt_budget(max_retries in 1u32..50) {
        let mut schedule = RetrySchedule::new(max_retries);
        let mut attempts = Vec::new();
        while let Some(attempt) = schedule.next_attempt() {
            attempts.push(attempt);
        }
        prop_assert_eq!(attempts.len(), max_retries as usize);
        for (i, attempt) in attempts.iter().enumerate() {
            prop_assert_eq!(attempt.index, u32::try_from(i).unwrap());
        }
    }

    /// The forced reopen is exactly the second attempt, when one exists.
    #[test]
    fn reopen_prep_is_exactly_the_second_attempt(max_retries in 1u32..50) {
        let mut schedule = RetrySchedule::new(max_retries);
        let mut reopen_indices = Vec::new();
        while let Some(attempt) = schedule.next_attempt() {
            if attempt.prep == AttemptPrep::ReopenConnection {
                reopen_indices.push(attempt.index);
            }
        }
        if max_retries >= 2 {
            prop_assert_eq!(reopen_indices, vec![1]);
        } else {
            prop_assert!(reopen_indices.is_empty());
        }
    }

    /// Backoff follows every attempt except the last.
    #[test]
    fn backoff_follows_all_but_the_final_attempt(max_retries in 1u32..50) {
        let mut schedule = RetrySchedule::new(max_retries);
        let mut attempts = Vec::new();
        while let Some(attempt) = schedule.next_attempt() {
            attempts.push(attempt);
        }
        let (last, rest) = attempts.split_last().unwrap();
        prop_assert!(!last.backoff_after);
        prop_assert!(rest.iter().all(|a| a.backoff_after));
    }
}

// ── Rate Limiter Properties ─────────────────────────────────

proptest! {
    /// The enforced interval is the reciprocal of the request rate.
    #[test]
    fn limiter_interval_is_rate_reciprocal(rate in 0.5f64..1000.0) {
        let limiter = RateLimiter::new(rate);
        let expected = Duration::from_secs_f64(1.0 / rate);
        prop_assert!(limiter.interval().abs_diff(expected) <= Duration::from_nanos(1));
    }
}

// ── URL Building Properties ─────────────────────────────────

proptest! {
    /// Query values survive the percent-encoding round-trip, and the
    /// encoded URL never contains raw reserved characters.
    #[test]
    fn query_values_are_percent_encoded(value in "[ -~]{1,40}") {
        let query = vec![("search".to_string(), value.clone())];
        let url = build_url("https://host", "latest", "search", &query);

        let prefix = "https://host/latest/search/?search=";
        prop_assert!(url.starts_with(prefix));

        let encoded = &url[prefix.len()..];
        prop_assert!(!encoded.contains(' '));
        prop_assert!(!encoded.contains('&'));
        prop_assert!(!encoded.contains('='));

        let decoded = urlencoding::decode(encoded).unwrap();
        prop_assert_eq!(decoded.into_owned(), value);
    }

    /// Paths without query parameters get no question mark.
    #[test]
    fn bare_paths_have_no_query_string(version in "[a-z0-9]{1,8}") {
        let url = build_url("https://host", &version, "search", &[]);
        prop_assert_eq!(url, format!("https://host/{version}/search/"));
    }
}

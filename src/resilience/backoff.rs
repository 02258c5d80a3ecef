//! Exponential backoff with jitter.

use std::time::Duration;

use rand::Rng;

/// Delay before retry number `attempt` (1-based).
///
/// Doubles from `base_ms`, capped at `max_ms`, plus up to 10% jitter.
/// Attempt 0 means "no retry yet" and has no delay.
pub fn calculate_backoff(attempt: u32, base_ms: u64, max_ms: u64) -> Duration {
    if attempt == 0 {
        return Duration::ZERO;
    }

    let factor = 2u64.saturating_pow(attempt - 1);
    let capped = base_ms.saturating_mul(factor).min(max_ms);

    let jitter_range = capped / 10;
    let jitter = if jitter_range > 0 {
        rand::thread_rng().gen_range(0..jitter_range)
    } else {
        0
    };

    Duration::from_millis(capped + jitter)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_attempt_has_no_delay() {
        assert_eq!(calculate_backoff(0, 50, 2_000), Duration::ZERO);
    }

    #[test]
    fn delay_doubles_per_attempt() {
        let b1 = calculate_backoff(1, 50, 2_000).as_millis();
        let b2 = calculate_backoff(2, 50, 2_000).as_millis();
        let b3 = calculate_backoff(3, 50, 2_000).as_millis();

        assert!((50..55).contains(&b1));
        assert!((100..110).contains(&b2));
        assert!((200..220).contains(&b3));
    }

    #[test]
    fn delay_is_capped_with_bounded_jitter() {
        for attempt in [10, 20, 63, u32::MAX] {
            let delay = calculate_backoff(attempt, 50, 2_000).as_millis();
            assert!((2_000..2_200).contains(&delay), "attempt {attempt}: {delay}");
        }
    }
}

//! Tests for per-step pause computation

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use wavescope::run::pacing::Pacing;

    // Tests the pause grows with the work done
    // Verified by ignoring the check count
    #[test]
    fn test_proportional_to_checks() {
        let pacing = Pacing::new(Duration::from_micros(100), Duration::from_secs(1));
        assert_eq!(pacing.delay_for(0), Duration::ZERO);
        assert_eq!(pacing.delay_for(10), Duration::from_millis(1));
        assert_eq!(pacing.delay_for(250), Duration::from_micros(25_000));
    }

    // Tests the pause never exceeds the cap, even on overflow
    #[test]
    fn test_capped() {
        let pacing = Pacing::new(Duration::from_millis(1), Duration::from_millis(5));
        assert_eq!(pacing.delay_for(4), Duration::from_millis(4));
        assert_eq!(pacing.delay_for(6), Duration::from_millis(5));
        assert_eq!(pacing.delay_for(usize::MAX), Duration::from_millis(5));

        let huge = Pacing::new(Duration::from_secs(u64::MAX / 2), Duration::from_secs(1));
        assert_eq!(huge.delay_for(1_000), Duration::from_secs(1));
    }

    #[test]
    fn test_unthrottled() {
        assert_eq!(Pacing::unthrottled().delay_for(1_000_000), Duration::ZERO);
    }
}

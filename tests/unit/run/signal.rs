//! Tests for the cooperative stop signal

#[cfg(test)]
mod tests {
    use std::time::{Duration, Instant};
    use wavescope::run::signal::StopSignal;

    // Tests wait times out when nobody stops
    #[test]
    fn test_wait_times_out() {
        let signal = StopSignal::new();
        let started = Instant::now();
        assert!(!signal.wait(Duration::from_millis(20)));
        assert!(started.elapsed() >= Duration::from_millis(20));
        assert!(!signal.is_stopped());
    }

    // Tests a stop from another clone wakes a waiter early
    // Verified by removing notify_all from stop
    #[test]
    fn test_stop_wakes_waiter() {
        let signal = StopSignal::new();
        let remote = signal.clone();
        let started = Instant::now();

        let waiter = std::thread::spawn(move || remote.wait(Duration::from_secs(30)));
        std::thread::sleep(Duration::from_millis(20));
        signal.stop();

        assert!(waiter.join().unwrap());
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    // Tests waiting on a stopped signal returns at once
    #[test]
    fn test_wait_after_stop() {
        let signal = StopSignal::default();
        signal.stop();
        assert!(signal.is_stopped());
        assert!(signal.wait(Duration::from_secs(30)));
        assert!(signal.wait(Duration::ZERO));
    }
}

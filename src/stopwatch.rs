// For the full copyright and license information, please view the LICENSE
// file that was distributed with this source code.

//! A small lock-guarded stopwatch.

use std::sync::Mutex;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Running {
        since: Instant,
    },
    Paused,
}

#[derive(Debug, Default)]
struct Inner {
    state: State,
    elapsed: Duration,
}

/// An elapsed-time accumulator that can be paused and resumed, shareable
/// across threads.
///
/// [`start`](Stopwatch::start) after a [`pause`](Stopwatch::pause) resumes
/// the accumulated time; after a [`stop`](Stopwatch::stop) or on a fresh
/// stopwatch it starts from zero.
///
/// # Examples
///
/// ```
/// use futil::stopwatch::Stopwatch;
///
/// let watch = Stopwatch::new();
/// let (duration, answer) = watch.measure(|| 6 * 7);
/// assert_eq!(answer, 42);
/// assert_eq!(duration, watch.elapsed());
/// ```
#[derive(Debug, Default)]
pub struct Stopwatch {
    inner: Mutex<Inner>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        matches!(self.inner.lock().unwrap().state, State::Running { .. })
    }

    /// Starts the stopwatch. Resumes the accumulated time when paused,
    /// starts from zero otherwise. No effect while running.
    pub fn start(&self) {
        let mut inner = self.inner.lock().unwrap();
        match inner.state {
            State::Idle => {
                inner.elapsed = Duration::ZERO;
                inner.state = State::Running {
                    since: Instant::now(),
                };
            }
            State::Paused => {
                inner.state = State::Running {
                    since: Instant::now(),
                };
            }
            State::Running { .. } => {}
        }
    }

    /// Zeroes the accumulated time and starts timing, whatever the
    /// current state.
    pub fn restart(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.elapsed = Duration::ZERO;
        inner.state = State::Running {
            since: Instant::now(),
        };
    }

    /// Freezes the accumulated time and ends the run; the next
    /// [`start`](Stopwatch::start) begins at zero. No effect unless
    /// running, so a paused stopwatch stays resumable.
    pub fn stop(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let State::Running { since } = inner.state {
            inner.elapsed += since.elapsed();
            inner.state = State::Idle;
        }
    }

    /// Freezes the accumulated time but keeps it, so a later
    /// [`start`](Stopwatch::start) resumes. No effect unless running.
    pub fn pause(&self) {
        let mut inner = self.inner.lock().unwrap();
        if let State::Running { since } = inner.state {
            inner.elapsed += since.elapsed();
            inner.state = State::Paused;
        }
    }

    /// The accumulated time, including the in-flight segment when running.
    pub fn elapsed(&self) -> Duration {
        let inner = self.inner.lock().unwrap();
        match inner.state {
            State::Running { since } => inner.elapsed + since.elapsed(),
            _ => inner.elapsed,
        }
    }

    /// Times one closure: restarts, runs it, stops. Returns the elapsed
    /// time together with the closure's output.
    pub fn measure<T>(&self, task: impl FnOnce() -> T) -> (Duration, T) {
        self.restart();
        let output = task();
        self.stop();
        (self.elapsed(), output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sleep_ms(millis: u64) {
        thread::sleep(Duration::from_millis(millis));
    }

    #[test]
    fn fresh_stopwatch_is_idle() {
        let watch = Stopwatch::new();
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), Duration::ZERO);
    }

    #[test]
    fn start_and_stop_accumulate() {
        let watch = Stopwatch::new();
        watch.start();
        assert!(watch.is_running());
        sleep_ms(30);
        watch.stop();
        assert!(!watch.is_running());

        let frozen = watch.elapsed();
        assert!(frozen >= Duration::from_millis(30));
        sleep_ms(10);
        assert_eq!(watch.elapsed(), frozen);
    }

    #[test]
    fn start_after_stop_begins_at_zero() {
        let watch = Stopwatch::new();
        watch.start();
        sleep_ms(30);
        watch.stop();

        watch.start();
        watch.stop();
        assert!(watch.elapsed() < Duration::from_millis(30));
    }

    #[test]
    fn start_after_pause_resumes() {
        let watch = Stopwatch::new();
        watch.start();
        sleep_ms(30);
        watch.pause();
        let paused_at = watch.elapsed();
        assert!(paused_at >= Duration::from_millis(30));

        sleep_ms(20);
        assert_eq!(watch.elapsed(), paused_at);

        watch.start();
        sleep_ms(10);
        watch.stop();
        assert!(watch.elapsed() >= paused_at + Duration::from_millis(10));
    }

    #[test]
    fn stop_while_paused_keeps_the_pause() {
        let watch = Stopwatch::new();
        watch.start();
        sleep_ms(20);
        watch.pause();
        let paused_at = watch.elapsed();

        // A stop in the paused state is a no-op, so the next start resumes.
        watch.stop();
        watch.start();
        watch.stop();
        assert!(watch.elapsed() >= paused_at);
    }

    #[test]
    fn restart_zeroes_the_accumulator() {
        let watch = Stopwatch::new();
        watch.start();
        sleep_ms(30);
        watch.restart();
        watch.stop();
        assert!(watch.elapsed() < Duration::from_millis(30));
    }

    #[test]
    fn measure_times_the_closure() {
        let watch = Stopwatch::new();
        let (duration, output) = watch.measure(|| {
            sleep_ms(20);
            "done"
        });

        assert_eq!(output, "done");
        assert!(duration >= Duration::from_millis(20));
        assert!(!watch.is_running());
        assert_eq!(watch.elapsed(), duration);
    }
}

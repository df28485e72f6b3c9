//! Run-time control of a search: stop/status/pause requests, skip-to hints
//! and the per-level counters reported on request.
//!
//! Requests only set flags. The search looks at them at a single checkpoint
//! per innermost iteration and acts there.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::Duration;

const STOP: u8 = 1 << 0;
const STATUS: u8 = 1 << 1;
const PAUSE: u8 = 1 << 2;

/// Longest single wait while paused; a new request ends the wait early.
const PAUSE_POLL: Duration = Duration::from_secs(60);

/// A request picked up at the checkpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Stop,
    Status,
    Pause,
}

/// Cancellation and pause token shared between the search and whoever
/// translates outside events (signals, tests) into requests.
#[derive(Debug, Default)]
pub struct Control {
    pending: AtomicU8,
    wake_lock: Mutex<()>,
    wake: Condvar,
}

impl Control {
    pub fn new() -> Self {
        Self::default()
    }

    /// Asks the search to print its position and stop.
    pub fn request_stop(&self) {
        self.raise(STOP);
    }

    /// Asks for a diagnostic dump.
    pub fn request_status(&self) {
        self.raise(STATUS);
    }

    /// Pauses a running search, or resumes a paused one.
    pub fn request_pause(&self) {
        self.raise(PAUSE);
    }

    fn raise(&self, flag: u8) {
        self.pending.fetch_or(flag, Ordering::SeqCst);
        let _guard = self.wake_lock.lock().unwrap_or_else(|e| e.into_inner());
        self.wake.notify_all();
    }

    /// Returns true if any request is waiting. One relaxed load.
    #[inline(always)]
    pub fn is_pending(&self) -> bool {
        self.pending.load(Ordering::Relaxed) != 0
    }

    /// Takes the most urgent pending request.
    ///
    /// Stop stays pending once raised; status and pause are consumed.
    pub fn take(&self) -> Option<Request> {
        let pending = self.pending.load(Ordering::SeqCst);
        if pending & STOP != 0 {
            Some(Request::Stop)
        } else if pending & PAUSE != 0 {
            // a pause dumps status too, so both are consumed
            self.pending.fetch_and(!(PAUSE | STATUS), Ordering::SeqCst);
            Some(Request::Pause)
        } else if pending & STATUS != 0 {
            self.pending.fetch_and(!STATUS, Ordering::SeqCst);
            Some(Request::Status)
        } else {
            None
        }
    }

    /// Blocks until the next pause request (the resume) or a stop.
    ///
    /// Returns true if the search should stop instead of resuming.
    pub fn wait_for_resume(&self) -> bool {
        self.wait_for_resume_with(PAUSE_POLL)
    }

    fn wait_for_resume_with(&self, poll: Duration) -> bool {
        let mut guard = self.wake_lock.lock().unwrap_or_else(|e| e.into_inner());
        loop {
            let pending = self.pending.load(Ordering::SeqCst);
            if pending & STOP != 0 {
                return true;
            }
            if pending & PAUSE != 0 {
                self.pending.fetch_and(!PAUSE, Ordering::SeqCst);
                return false;
            }
            guard = match self.wake.wait_timeout(guard, poll) {
                Ok((guard, _)) => guard,
                Err(e) => e.into_inner().0,
            };
        }
    }
}

/// Skip-to positions, one optional word per level.
#[derive(Debug, Clone)]
pub struct Hints<const DEPTH: usize> {
    words: [Option<String>; DEPTH],
}

impl<const DEPTH: usize> Default for Hints<DEPTH> {
    fn default() -> Self {
        Self {
            words: std::array::from_fn(|_| None),
        }
    }
}

impl<const DEPTH: usize> Hints<DEPTH> {
    /// Builds hints from positional arguments.
    ///
    /// Arguments that are not exactly `word_len` bytes long count as absent,
    /// as do arguments past `DEPTH`.
    pub fn new<I, S>(args: I, word_len: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut hints = Self::default();
        for (level, arg) in args.into_iter().take(DEPTH).enumerate() {
            let arg = arg.as_ref();
            if arg.len() == word_len {
                hints.words[level] = Some(arg.to_ascii_uppercase());
            } else if !arg.is_empty() {
                log::debug!("ignoring skip-to hint {arg:?} for level {}", level + 1);
            }
        }
        hints
    }

    /// The hint still waiting at `level` (1-based).
    #[inline(always)]
    pub fn active(&self, level: usize) -> Option<&str> {
        self.words[level - 1].as_deref()
    }

    /// Drops the hint at `level` once the search has reached it.
    pub fn clear(&mut self, level: usize) {
        self.words[level - 1] = None;
    }

    pub fn is_empty(&self) -> bool {
        self.words.iter().all(Option::is_none)
    }
}

/// Per-level counters. Purely diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stats<const DEPTH: usize> {
    /// Candidates looked at, per level.
    pub iterations: [u64; DEPTH],
    /// Candidates skipped by a prune cache hit, per level.
    pub hits: [u64; DEPTH],
    /// `iterations` at the time of the last status dump.
    pub reported: [u64; DEPTH],
}

impl<const DEPTH: usize> Default for Stats<DEPTH> {
    fn default() -> Self {
        Self {
            iterations: [0; DEPTH],
            hits: [0; DEPTH],
            reported: [0; DEPTH],
        }
    }
}

impl<const DEPTH: usize> Stats<DEPTH> {
    /// Iterations since the previous dump, and marks this one as reported.
    pub fn take_deltas(&mut self) -> [u64; DEPTH] {
        let deltas = std::array::from_fn(|i| self.iterations[i] - self.reported[i]);
        self.reported = self.iterations;
        deltas
    }
}

/// Formats counters as space-separated columns.
pub(crate) fn columns(values: &[u64]) -> String {
    values
        .iter()
        .map(u64::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    #[test]
    fn test_take_prefers_stop_and_keeps_it() {
        let control = Control::new();
        assert!(!control.is_pending());
        control.request_status();
        control.request_stop();
        assert!(control.is_pending());
        assert_eq!(control.take(), Some(Request::Stop));
        assert_eq!(control.take(), Some(Request::Stop));
    }

    #[test]
    fn test_status_is_consumed() {
        let control = Control::new();
        control.request_status();
        assert_eq!(control.take(), Some(Request::Status));
        assert_eq!(control.take(), None);
        assert!(!control.is_pending());
    }

    #[test]
    fn test_pause_waits_for_second_request() {
        let control = Arc::new(Control::new());
        control.request_pause();
        assert_eq!(control.take(), Some(Request::Pause));

        let resumer = {
            let control = Arc::clone(&control);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                control.request_pause();
            })
        };
        assert!(!control.wait_for_resume_with(Duration::from_millis(5)));
        resumer.join().unwrap();
        assert!(!control.is_pending());
    }

    #[test]
    fn test_stop_ends_pause() {
        let control = Control::new();
        control.request_stop();
        assert!(control.wait_for_resume_with(Duration::from_millis(5)));
    }

    #[test]
    fn test_hints_ignore_wrong_lengths() {
        let hints = Hints::<6>::new(["quick", "", "toolong", "vibex"], 5);
        assert_eq!(hints.active(1), Some("QUICK"));
        assert_eq!(hints.active(2), None);
        assert_eq!(hints.active(3), None);
        assert_eq!(hints.active(4), Some("VIBEX"));
        assert_eq!(hints.active(6), None);
    }

    #[test]
    fn test_hints_beyond_depth_are_dropped() {
        let mut hints = Hints::<2>::new(["AB", "BC", "CA"], 2);
        assert_eq!(hints.active(2), Some("BC"));
        hints.clear(1);
        hints.clear(2);
        assert!(hints.is_empty());
    }

    #[test]
    fn test_stats_deltas() {
        let mut stats = Stats::<3>::default();
        stats.iterations = [1, 10, 100];
        assert_eq!(stats.take_deltas(), [1, 10, 100]);
        stats.iterations = [2, 15, 100];
        assert_eq!(stats.take_deltas(), [1, 5, 0]);
        assert_eq!(columns(&stats.iterations), "2 15 100");
    }
}

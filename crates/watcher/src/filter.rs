//! Change filter: deduplicates and debounces status transitions.
//!
//! The filter is a pure state machine. It never sleeps; instead it tells
//! the caller when to start or cancel the single pending read timer and
//! expects [`ChangeFilter::timer_expired`] to be called when that timer
//! fires.

use std::time::Duration;

use messenger_notifier_protocol::Status;

/// Delay before a read transition is emitted.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(3000);

/// Emission policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Policy {
    /// Unread is emitted immediately, read only after a quiet period.
    Debounced(Duration),
    /// Every change is emitted immediately.
    Immediate,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Debounced(DEFAULT_DEBOUNCE)
    }
}

/// Last status the filter emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unknown,
    Read,
    Unread,
}

/// What the caller must do with the pending read timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerCommand {
    /// Leave the timer as it is (running or not).
    Keep,
    /// Start the timer with the given delay.
    Start(Duration),
    /// Drop the running timer.
    Cancel,
}

/// Outcome of observing one signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub emit: Option<Status>,
    pub timer: TimerCommand,
}

impl Transition {
    const NOTHING: Transition = Transition {
        emit: None,
        timer: TimerCommand::Keep,
    };
}

/// Debouncing state machine over {unknown, read, unread}.
#[derive(Debug, Clone)]
pub struct ChangeFilter {
    policy: Policy,
    state: FilterState,
    pending: bool,
}

impl ChangeFilter {
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            state: FilterState::Unknown,
            pending: false,
        }
    }

    pub fn state(&self) -> FilterState {
        self.state
    }

    /// Whether a read timer is outstanding.
    pub fn has_pending(&self) -> bool {
        self.pending
    }

    pub fn policy(&self) -> Policy {
        self.policy
    }

    /// Feeds one detection result into the filter.
    pub fn observe(&mut self, has_unread: bool) -> Transition {
        if has_unread {
            return self.observe_unread();
        }

        match (self.policy, self.state) {
            (_, FilterState::Read) => Transition::NOTHING,
            (Policy::Immediate, _) | (Policy::Debounced(_), FilterState::Unknown) => {
                self.state = FilterState::Read;
                Transition {
                    emit: Some(Status::Read),
                    timer: TimerCommand::Keep,
                }
            }
            (Policy::Debounced(delay), FilterState::Unread) => {
                if self.pending {
                    return Transition::NOTHING;
                }
                self.pending = true;
                Transition {
                    emit: None,
                    timer: TimerCommand::Start(delay),
                }
            }
        }
    }

    fn observe_unread(&mut self) -> Transition {
        let timer = if self.pending {
            self.pending = false;
            TimerCommand::Cancel
        } else {
            TimerCommand::Keep
        };

        let emit = if self.state == FilterState::Unread {
            None
        } else {
            self.state = FilterState::Unread;
            Some(Status::Unread)
        };

        Transition { emit, timer }
    }

    /// Handles expiry of the pending read timer.
    ///
    /// `has_unread` is the signal re-derived at expiry. If the page went
    /// unread again the timer is dropped without emitting anything and the
    /// state is left alone.
    pub fn timer_expired(&mut self, has_unread: bool) -> Option<Status> {
        if !self.pending {
            return None;
        }
        self.pending = false;

        if has_unread {
            return None;
        }
        self.state = FilterState::Read;
        Some(Status::Read)
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const D: Duration = Duration::from_millis(3000);

    fn debounced() -> ChangeFilter {
        ChangeFilter::new(Policy::Debounced(D))
    }

    #[test]
    fn first_read_establishes_baseline() {
        let mut f = debounced();
        let t = f.observe(false);
        assert_eq!(t.emit, Some(Status::Read));
        assert_eq!(t.timer, TimerCommand::Keep);
        assert_eq!(f.state(), FilterState::Read);

        // Repeated read is silent.
        assert_eq!(f.observe(false), Transition::NOTHING);
    }

    #[test]
    fn unread_is_immediate_and_deduplicated() {
        let mut f = debounced();
        assert_eq!(f.observe(true).emit, Some(Status::Unread));
        assert_eq!(f.observe(true).emit, None);
        assert_eq!(f.state(), FilterState::Unread);
    }

    #[test]
    fn read_after_unread_starts_timer_once() {
        let mut f = debounced();
        f.observe(true);

        let t = f.observe(false);
        assert_eq!(t.emit, None);
        assert_eq!(t.timer, TimerCommand::Start(D));
        assert!(f.has_pending());

        // A second read while the timer runs does not restart it.
        assert_eq!(f.observe(false), Transition::NOTHING);
        assert_eq!(f.state(), FilterState::Unread);
    }

    #[test]
    fn unread_cancels_pending_read() {
        let mut f = debounced();
        f.observe(true);
        f.observe(false);

        let t = f.observe(true);
        assert_eq!(t.emit, None);
        assert_eq!(t.timer, TimerCommand::Cancel);
        assert!(!f.has_pending());

        // A stale expiry after cancellation emits nothing.
        assert_eq!(f.timer_expired(false), None);
        assert_eq!(f.state(), FilterState::Unread);
    }

    #[test]
    fn expiry_with_quiet_page_emits_read() {
        let mut f = debounced();
        f.observe(true);
        f.observe(false);

        assert_eq!(f.timer_expired(false), Some(Status::Read));
        assert_eq!(f.state(), FilterState::Read);
        assert!(!f.has_pending());
    }

    #[test]
    fn expiry_with_unread_page_aborts_silently() {
        let mut f = debounced();
        f.observe(true);
        f.observe(false);

        assert_eq!(f.timer_expired(true), None);
        assert_eq!(f.state(), FilterState::Unread);
        assert!(!f.has_pending());

        // The immediate path stays deduplicated afterwards.
        assert_eq!(f.observe(true).emit, None);
    }

    #[test]
    fn unread_from_unknown_emits() {
        let mut f = debounced();
        let t = f.observe(true);
        assert_eq!(t.emit, Some(Status::Unread));
        assert_eq!(t.timer, TimerCommand::Keep);
    }

    #[test]
    fn immediate_policy_emits_every_change() {
        let mut f = ChangeFilter::new(Policy::Immediate);
        assert_eq!(f.observe(true).emit, Some(Status::Unread));
        assert_eq!(f.observe(false).emit, Some(Status::Read));
        assert_eq!(f.observe(false).emit, None);
        assert_eq!(f.observe(true).emit, Some(Status::Unread));
        assert!(!f.has_pending());
    }

    #[test]
    fn default_policy_is_debounced() {
        assert_eq!(ChangeFilter::default().policy(), Policy::Debounced(DEFAULT_DEBOUNCE));
    }
}
